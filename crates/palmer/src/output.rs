//! Rendering of a named output into all of its representations.

use palmer_core::{DisplayOptions, FilteredView, OutputId};
use serde::{Deserialize, Serialize};

use crate::charts::{AttributeHistogram, DistributionChart, ScatterPlot};
use crate::render::{Render, html_escape};
use crate::table::{DataGrid, DataTable};

/// An output rendered for every frontend at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedOutput {
    pub id: OutputId,
    pub title: String,
    pub text: String,
    pub html: String,
    pub data: serde_json::Value,
}

/// Heading shown above an output.
pub fn output_title(id: OutputId, display: &DisplayOptions) -> String {
    match id {
        OutputId::DataTable => "Data Table".to_string(),
        OutputId::DataGrid => "Data Grid".to_string(),
        OutputId::Histogram => AttributeHistogram::TITLE.to_string(),
        OutputId::Scatter => ScatterPlot::TITLE.to_string(),
        OutputId::Distribution => format!("Distribution of {}", display.attribute.label()),
    }
}

/// Render one output from the current view and display inputs.
pub fn render_output(id: OutputId, view: &FilteredView, display: &DisplayOptions) -> RenderedOutput {
    tracing::debug!("Rendering {} from {} rows", id, view.len());

    let adapter: Box<dyn Render> = match id {
        OutputId::DataTable => Box::new(DataTable::new(view.clone())),
        OutputId::DataGrid => Box::new(DataGrid::new(view.clone())),
        OutputId::Histogram => Box::new(AttributeHistogram::new(
            view,
            display.attribute,
            display.plotly_bins,
        )),
        OutputId::Scatter => Box::new(ScatterPlot::new(view, display.attribute)),
        OutputId::Distribution => Box::new(DistributionChart::new(
            view,
            display.attribute,
            display.seaborn_bins,
        )),
    };

    let text = adapter.render_text();
    let html = adapter
        .render_html()
        .unwrap_or_else(|| format!("<pre>{}</pre>", html_escape(&text)));

    RenderedOutput {
        id,
        title: output_title(id, display),
        text,
        html,
        data: adapter.render_data().unwrap_or(serde_json::Value::Null),
    }
}

/// Render every output, in page order.
pub fn render_all(view: &FilteredView, display: &DisplayOptions) -> Vec<RenderedOutput> {
    OutputId::ALL
        .into_iter()
        .map(|id| render_output(id, view, display))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use palmer_core::{Attribute, InputState, ViewEngine, load_dataset};

    use super::*;

    fn engine() -> ViewEngine {
        ViewEngine::new(Arc::new(load_dataset().unwrap()), &InputState::default())
    }

    #[test]
    fn test_render_all_in_page_order() {
        let engine = engine();
        let outputs = render_all(&engine.filtered_data(), &engine.display());
        let ids: Vec<OutputId> = outputs.iter().map(|o| o.id).collect();
        assert_eq!(ids, OutputId::ALL.to_vec());
        assert!(outputs.iter().all(|o| !o.html.is_empty() && !o.data.is_null()));
    }

    #[test]
    fn test_distribution_title_follows_attribute() {
        let display = DisplayOptions {
            attribute: Attribute::FlipperLengthMm,
            plotly_bins: 10,
            seaborn_bins: 20,
        };
        assert_eq!(
            output_title(OutputId::Distribution, &display),
            "Distribution of Flipper Length Mm"
        );
    }

    #[test]
    fn test_rendered_output_serializes_id() {
        let engine = engine();
        let output = render_output(OutputId::Scatter, &engine.filtered_data(), &engine.display());
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["id"], "scatter_plot");
        assert_eq!(json["data"]["layout"]["yaxis"]["title"]["text"], "Body Mass (g)");
    }
}
