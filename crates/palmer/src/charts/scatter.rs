use palmer_core::{Attribute, FilteredView, Species};
use serde_json::Value;

use super::figure::{Figure, Layout, Trace};
use crate::render::Render;

/// Selected attribute against body mass, one series per species (`scatter_plot`).
#[derive(Debug, Clone)]
pub struct ScatterPlot {
    attribute: Attribute,
    series: Vec<(Species, Vec<(f64, f64)>)>,
}

impl ScatterPlot {
    pub const TITLE: &'static str = "Penguin Attribute vs Body Mass";

    pub fn new(view: &FilteredView, attribute: Attribute) -> Self {
        let mut series: Vec<(Species, Vec<(f64, f64)>)> = Vec::new();
        for (species, x, y) in view.pairs(attribute, Attribute::BodyMassG) {
            match series.iter_mut().find(|(s, _)| *s == species) {
                Some((_, points)) => points.push((x, y)),
                None => series.push((species, vec![(x, y)])),
            }
        }
        series.sort_by_key(|(species, _)| *species);

        Self { attribute, series }
    }

    pub fn series(&self) -> &[(Species, Vec<(f64, f64)>)] {
        &self.series
    }

    pub fn point_count(&self) -> usize {
        self.series.iter().map(|(_, points)| points.len()).sum()
    }

    pub fn figure(&self) -> Figure {
        let layout = Layout::new(Self::TITLE, self.attribute.label(), "Body Mass (g)");
        let data = self
            .series
            .iter()
            .map(|(species, points)| {
                let (x, y) = points.iter().copied().unzip();
                Trace::markers(*species, x, y)
            })
            .collect();

        Figure { data, layout }
    }
}

impl Render for ScatterPlot {
    fn render_text(&self) -> String {
        let mut out = format!("{}\n{} vs Body Mass (g)\n", Self::TITLE, self.attribute.label());
        if self.series.is_empty() {
            out.push_str("(no data)");
            return out;
        }

        for (species, points) in &self.series {
            let (xs, ys): (Vec<f64>, Vec<f64>) = points.iter().copied().unzip();
            out.push_str(&format!(
                "{:<10} n={:<4} x {:>8.1} .. {:<8.1} y {:>7.0} .. {:<7.0}\n",
                species.to_string(),
                points.len(),
                fold_min(&xs),
                fold_max(&xs),
                fold_min(&ys),
                fold_max(&ys),
            ));
        }
        out.trim_end().to_string()
    }

    fn render_html(&self) -> Option<String> {
        Some(self.figure().to_html("scatter_plot"))
    }

    fn render_data(&self) -> Option<Value> {
        serde_json::to_value(self.figure()).ok()
    }
}

fn fold_min(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

fn fold_max(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use palmer_core::{InputChange, InputState, ViewEngine, load_dataset};

    use super::*;

    #[test]
    fn test_points_grouped_by_species() {
        let dataset = Arc::new(load_dataset().unwrap());
        let engine = ViewEngine::new(dataset, &InputState::default());
        let view = engine.filtered_data();
        let plot = ScatterPlot::new(&view, Attribute::FlipperLengthMm);

        assert_eq!(plot.point_count(), view.pairs(Attribute::FlipperLengthMm, Attribute::BodyMassG).count());
        let species: Vec<Species> = plot.series().iter().map(|(s, _)| *s).collect();
        assert_eq!(species, vec![Species::Adelie, Species::Gentoo, Species::Chinstrap]);
    }

    #[test]
    fn test_figure_layout() {
        let dataset = Arc::new(load_dataset().unwrap());
        let mut engine = ViewEngine::new(dataset, &InputState::default());
        engine.apply(&InputChange::Species([Species::Gentoo].into()));

        let figure = ScatterPlot::new(&engine.filtered_data(), Attribute::BillDepthMm).figure();
        assert_eq!(figure.layout.title.text, "Penguin Attribute vs Body Mass");
        assert_eq!(figure.layout.xaxis.title.text, "Bill Depth Mm");
        assert_eq!(figure.layout.yaxis.title.text, "Body Mass (g)");
        assert_eq!(figure.data.len(), 1);
        assert_eq!(figure.data[0].mode, Some("markers"));
        assert_eq!(figure.data[0].name, "Gentoo");
    }
}
