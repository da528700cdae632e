//! Embedded frontend assets for the Palmer server.
//!
//! This module provides the embedded static files of the dashboard page.
//! It is only available when the `embedded-frontend` feature is enabled.

use axum::{
    body::Body,
    http::{Response, StatusCode, header},
};
use rust_embed::Embed;

/// Embedded frontend assets.
#[derive(Embed)]
#[folder = "src/frontend/"]
pub struct FrontendAssets;

/// Serve an embedded frontend file.
pub fn serve_static(path: String) -> Response<Body> {
    let path = path.strip_prefix('/').map(|s| s.to_string()).unwrap_or(path);

    let (status, content_type, body) = match FrontendAssets::get(&path) {
        Some(content) => (
            StatusCode::OK,
            mime_guess::from_path(&path)
                .first_or_octet_stream()
                .to_string(),
            Body::from(content.data.into_owned()),
        ),
        None => (
            StatusCode::NOT_FOUND,
            "text/plain".to_string(),
            Body::from("Not Found"),
        ),
    };

    let mut response = Response::new(body);
    *response.status_mut() = status;
    if let Ok(value) = content_type.parse() {
        response.headers_mut().insert(header::CONTENT_TYPE, value);
    }
    if status == StatusCode::OK {
        response.headers_mut().insert(
            header::CACHE_CONTROL,
            header::HeaderValue::from_static("public, max-age=3600"),
        );
    }
    response
}

/// Serve the main index.html file.
pub fn serve_index() -> Response<Body> {
    serve_static("index.html".to_string())
}

/// Check if the frontend assets are available.
pub fn is_available() -> bool {
    FrontendAssets::get("index.html").is_some()
}

/// List all embedded files (for debugging).
pub fn list_files() -> Vec<String> {
    FrontendAssets::iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frontend_assets_available() {
        assert!(is_available(), "index.html should be embedded");
    }

    #[test]
    fn test_list_files() {
        let files = list_files();
        assert!(files.iter().any(|f| f == "index.html"));
        assert!(files.iter().any(|f| f == "app.js"));
        assert!(files.iter().any(|f| f == "styles.css"));
    }

    #[test]
    fn test_missing_asset() {
        let response = serve_static("/nope.js".to_string());
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_index_has_options_sidebar_and_heading() {
        let index = FrontendAssets::get("index.html").unwrap();
        let source = std::str::from_utf8(&index.data).unwrap();
        assert!(source.contains("<aside class=\"sidebar\">"));
        assert!(source.contains("<h2>Options</h2>"));
        assert!(source.contains("<h1 id=\"title\">Palmer Penguins</h1>"));
    }

    #[test]
    fn test_numeric_input_clamped_to_definition_range() {
        let app = FrontendAssets::get("app.js").unwrap();
        let source = std::str::from_utf8(&app.data).unwrap();
        assert!(source.contains("Math.min(def.max, Math.max(def.min, Math.round(value)))"));
        assert!(source.contains("input.value = clamped;"));
    }

    #[test]
    fn test_mime_type() {
        let response = serve_static("/styles.css".to_string());
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/css");
    }
}
