//! Rich output rendering for dashboard outputs.
//!
//! The [`Render`] trait lets every adapter provide the representations the
//! frontends need: plain text for the terminal, HTML for the browser page and
//! structured JSON for the WebSocket protocol.

/// Types that can render rich output on the dashboard.
///
/// Only the text form is mandatory. Override the other methods to provide
/// richer representations.
///
/// # Example
///
/// ```rust
/// use palmer::render::Render;
///
/// struct Summary {
///     rows: usize,
/// }
///
/// impl Render for Summary {
///     fn render_text(&self) -> String {
///         format!("{} rows", self.rows)
///     }
///
///     fn render_html(&self) -> Option<String> {
///         Some(format!("<p>{} rows</p>", self.rows))
///     }
/// }
/// ```
pub trait Render {
    /// Plain text representation (for terminals).
    fn render_text(&self) -> String;

    /// Rich HTML representation (for the dashboard page).
    ///
    /// Return `None` to fall back to text rendering.
    fn render_html(&self) -> Option<String> {
        None
    }

    /// Structured data for programmatic access.
    ///
    /// Return `None` if no structured data is available.
    fn render_data(&self) -> Option<serde_json::Value> {
        None
    }
}

/// Escape text for use inside HTML elements and attribute values.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
    }
}
