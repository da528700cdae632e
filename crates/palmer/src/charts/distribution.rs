//! Per-species distribution: binned counts drawn as steps, with a Gaussian
//! kernel density estimate scaled to the same count axis.

use std::f64::consts::PI;

use palmer_core::{Attribute, FilteredView, Species};
use serde_json::Value;

use super::binning::Bins;
use super::figure::{Figure, Layout, Trace};
use super::{group_by_species, text_bar};
use crate::render::Render;

/// Points on each density curve.
pub const KDE_GRID_POINTS: usize = 200;

/// Bandwidths the curve extends beyond the outermost observations.
const KDE_CUT: f64 = 3.0;

/// One species' layer of the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesDistribution {
    pub species: Species,
    pub counts: Vec<u32>,
    /// `(x, expected count)` points, `None` with fewer than two distinct values.
    pub density: Option<Vec<(f64, f64)>>,
}

/// Binned distribution of one attribute by species (`distribution_plot`).
#[derive(Debug, Clone)]
pub struct DistributionChart {
    attribute: Attribute,
    bins: Option<Bins>,
    layers: Vec<SpeciesDistribution>,
}

impl DistributionChart {
    pub fn new(view: &FilteredView, attribute: Attribute, bin_count: u32) -> Self {
        let groups = group_by_species(view, attribute);
        let all: Vec<f64> = groups.iter().flat_map(|(_, v)| v.iter().copied()).collect();
        let bins = Bins::equal_width(&all, bin_count);

        let layers = match &bins {
            Some(bins) => groups
                .into_iter()
                .map(|(species, values)| SpeciesDistribution {
                    species,
                    counts: bins.counts(values.iter().copied()),
                    density: scaled_kde(&values, bins.width()),
                })
                .collect(),
            None => Vec::new(),
        };

        Self {
            attribute,
            bins,
            layers,
        }
    }

    pub fn title(&self) -> String {
        format!("Distribution of {}", self.attribute.label())
    }

    pub fn bins(&self) -> Option<&Bins> {
        self.bins.as_ref()
    }

    pub fn layers(&self) -> &[SpeciesDistribution] {
        &self.layers
    }

    pub fn figure(&self) -> Figure {
        let layout = Layout::new(self.title(), self.attribute.label(), "Count");
        let Some(bins) = &self.bins else {
            return Figure {
                data: Vec::new(),
                layout,
            };
        };

        let mut data = Vec::new();
        for layer in &self.layers {
            // Step outline: one point per edge, the last count repeated to close the final bin.
            let mut y: Vec<f64> = layer.counts.iter().map(|&c| c as f64).collect();
            y.push(y.last().copied().unwrap_or(0.0));
            data.push(Trace::line(layer.species, bins.edges().to_vec(), y, "hv"));

            if let Some(density) = &layer.density {
                let (x, y) = density.iter().copied().unzip();
                data.push(Trace::line(layer.species, x, y, "spline").without_legend());
            }
        }

        Figure { data, layout }
    }
}

impl Render for DistributionChart {
    fn render_text(&self) -> String {
        let mut out = format!("{}\n", self.title());
        let Some(bins) = &self.bins else {
            out.push_str("(no data)");
            return out;
        };

        let max = self
            .layers
            .iter()
            .flat_map(|l| l.counts.iter().copied())
            .max()
            .unwrap_or(0);

        for layer in &self.layers {
            out.push_str(&format!("{}\n", layer.species));
            for (edge, count) in bins.edges().windows(2).zip(&layer.counts) {
                out.push_str(&format!(
                    "  {:>10.2} - {:<10.2} {:<30} {}\n",
                    edge[0],
                    edge[1],
                    text_bar(*count, max, 30),
                    count
                ));
            }
            if let Some(peak) = layer
                .density
                .as_ref()
                .and_then(|d| d.iter().copied().max_by(|a, b| a.1.total_cmp(&b.1)))
            {
                out.push_str(&format!("  density peak at {:.2}\n", peak.0));
            }
        }
        out.trim_end().to_string()
    }

    fn render_html(&self) -> Option<String> {
        Some(self.figure().to_html("distribution_plot"))
    }

    fn render_data(&self) -> Option<Value> {
        serde_json::to_value(self.figure()).ok()
    }
}

/// Gaussian KDE with Scott's bandwidth, scaled so the area under the curve
/// equals the area of the count histogram (`n * bin_width`).
fn scaled_kde(values: &[f64], bin_width: f64) -> Option<Vec<(f64, f64)>> {
    let n = values.len();
    if n < 2 {
        return None;
    }

    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let std = variance.sqrt();
    if std <= 0.0 || !std.is_finite() {
        return None;
    }

    let bandwidth = std * (n as f64).powf(-0.2);
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min) - KDE_CUT * bandwidth;
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max) + KDE_CUT * bandwidth;
    let step = (hi - lo) / (KDE_GRID_POINTS - 1) as f64;

    let norm = 1.0 / (n as f64 * bandwidth * (2.0 * PI).sqrt());
    let scale = n as f64 * bin_width;

    Some(
        (0..KDE_GRID_POINTS)
            .map(|i| {
                let x = lo + step * i as f64;
                let density: f64 = values
                    .iter()
                    .map(|v| (-0.5 * ((x - v) / bandwidth).powi(2)).exp())
                    .sum::<f64>()
                    * norm;
                (x, density * scale)
            })
            .collect(),
    )
}
