//! Plotly-compatible figure description.
//!
//! Charts build a [`Figure`] and serialize it as JSON; the browser page hands
//! it straight to `Plotly.newPlot`.

use palmer_core::Species;
use serde::Serialize;

use crate::render::html_escape;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    /// HTML placeholder plus the embedded figure JSON for `output_id`.
    pub fn to_html(&self, output_id: &str) -> String {
        let json = serde_json::to_string(self)
            .unwrap_or_else(|_| "{}".to_string())
            .replace("</", "<\\/");
        format!(
            "<div class=\"palmer-plot\" data-output=\"{id}\"></div>\n\
             <script type=\"application/json\" data-figure-for=\"{id}\">{json}</script>",
            id = html_escape(output_id),
            json = json,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceKind {
    Bar,
    Scatter,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: TraceKind,
    pub name: String,
    pub legendgroup: String,
    pub showlegend: bool,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
    pub marker: Marker,
}

impl Trace {
    fn new(kind: TraceKind, species: Species, x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            kind,
            name: species.to_string(),
            legendgroup: species.to_string(),
            showlegend: true,
            x,
            y,
            mode: None,
            width: None,
            line: None,
            marker: Marker {
                color: species_color(species),
                opacity: None,
            },
        }
    }

    /// Bars of equal `width` centred on `x`.
    pub fn bars(species: Species, x: Vec<f64>, y: Vec<f64>, width: f64) -> Self {
        Self {
            width: Some(width),
            ..Self::new(TraceKind::Bar, species, x, y)
        }
    }

    /// Unconnected markers.
    pub fn markers(species: Species, x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            mode: Some("markers"),
            marker: Marker {
                color: species_color(species),
                opacity: Some(0.8),
            },
            ..Self::new(TraceKind::Scatter, species, x, y)
        }
    }

    /// A line with the given plotly line shape (`linear`, `hv`, ...).
    pub fn line(species: Species, x: Vec<f64>, y: Vec<f64>, shape: &'static str) -> Self {
        Self {
            mode: Some("lines"),
            line: Some(Line {
                shape,
                color: species_color(species),
                width: 2.0,
            }),
            ..Self::new(TraceKind::Scatter, species, x, y)
        }
    }

    /// Hide this trace from the legend (it shares its group with another trace).
    pub fn without_legend(mut self) -> Self {
        self.showlegend = false;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub shape: &'static str,
    pub color: &'static str,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub color: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: Title,
    pub xaxis: Axis,
    pub yaxis: Axis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barmode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bargap: Option<f64>,
    pub legend: Legend,
}

impl Layout {
    /// Centred title with labelled axes.
    pub fn new(title: impl Into<String>, x_title: impl Into<String>, y_title: impl Into<String>) -> Self {
        Self {
            title: Title {
                text: title.into(),
                x: 0.5,
            },
            xaxis: Axis {
                title: AxisTitle {
                    text: x_title.into(),
                },
            },
            yaxis: Axis {
                title: AxisTitle {
                    text: y_title.into(),
                },
            },
            barmode: None,
            bargap: None,
            legend: Legend {
                title: AxisTitle {
                    text: "species".to_string(),
                },
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
    pub x: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: AxisTitle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTitle {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub title: AxisTitle,
}

/// Colour of a species across every chart.
pub fn species_color(species: Species) -> &'static str {
    match species {
        Species::Adelie => "#ff8c00",
        Species::Gentoo => "#159090",
        Species::Chinstrap => "#a034f0",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_serialization() {
        let trace = Trace::bars(Species::Gentoo, vec![1.0], vec![2.0], 0.5);
        let json = serde_json::to_value(&trace).unwrap();
        assert_eq!(json["type"], "bar");
        assert_eq!(json["name"], "Gentoo");
        assert_eq!(json["width"], 0.5);
        assert!(json.get("mode").is_none());
        assert!(json.get("line").is_none());
    }

    #[test]
    fn test_line_trace() {
        let trace = Trace::line(Species::Adelie, vec![0.0, 1.0], vec![1.0, 2.0], "hv").without_legend();
        let json = serde_json::to_value(&trace).unwrap();
        assert_eq!(json["type"], "scatter");
        assert_eq!(json["mode"], "lines");
        assert_eq!(json["line"]["shape"], "hv");
        assert_eq!(json["showlegend"], false);
    }

    #[test]
    fn test_figure_html_escapes_script_end() {
        let figure = Figure {
            data: vec![],
            layout: Layout::new("</script>", "x", "y"),
        };
        let html = figure.to_html("histogram_plot");
        assert!(html.contains("data-output=\"histogram_plot\""));
        assert_eq!(html.matches("</script>").count(), 1);
    }
}
