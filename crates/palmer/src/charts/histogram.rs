use palmer_core::{Attribute, FilteredView, Species};
use serde_json::Value;

use super::binning::Bins;
use super::figure::{Figure, Layout, Trace};
use super::{group_by_species, text_bar};
use crate::render::Render;

/// Stacked-by-species histogram of one attribute (`histogram_plot`).
#[derive(Debug, Clone)]
pub struct AttributeHistogram {
    attribute: Attribute,
    bins: Option<Bins>,
    series: Vec<(Species, Vec<u32>)>,
}

impl AttributeHistogram {
    pub const TITLE: &'static str = "Penguin Attribute Histogram";

    pub fn new(view: &FilteredView, attribute: Attribute, bin_count: u32) -> Self {
        let groups = group_by_species(view, attribute);
        let all: Vec<f64> = groups.iter().flat_map(|(_, v)| v.iter().copied()).collect();
        let bins = Bins::equal_width(&all, bin_count);

        let series = match &bins {
            Some(bins) => groups
                .into_iter()
                .map(|(species, values)| (species, bins.counts(values)))
                .collect(),
            None => Vec::new(),
        };

        Self {
            attribute,
            bins,
            series,
        }
    }

    pub fn bins(&self) -> Option<&Bins> {
        self.bins.as_ref()
    }

    /// Per-species counts, one entry per bin.
    pub fn series(&self) -> &[(Species, Vec<u32>)] {
        &self.series
    }

    /// Stacked height of every bin.
    pub fn totals(&self) -> Vec<u32> {
        let len = self.bins.as_ref().map_or(0, Bins::len);
        let mut totals = vec![0; len];
        for (_, counts) in &self.series {
            for (total, count) in totals.iter_mut().zip(counts) {
                *total += count;
            }
        }
        totals
    }

    pub fn figure(&self) -> Figure {
        let mut layout = Layout::new(Self::TITLE, self.attribute.label(), "Count");
        layout.barmode = Some("stack");
        layout.bargap = Some(0.0);

        let data = match &self.bins {
            Some(bins) => self
                .series
                .iter()
                .map(|(species, counts)| {
                    Trace::bars(
                        *species,
                        bins.centers(),
                        counts.iter().map(|&c| c as f64).collect(),
                        bins.width(),
                    )
                })
                .collect(),
            None => Vec::new(),
        };

        Figure { data, layout }
    }
}

impl Render for AttributeHistogram {
    fn render_text(&self) -> String {
        let mut out = format!("{}\n{} by species\n", Self::TITLE, self.attribute.label());
        let Some(bins) = &self.bins else {
            out.push_str("(no data)");
            return out;
        };

        let totals = self.totals();
        let max = totals.iter().copied().max().unwrap_or(0);
        for (edge, total) in bins.edges().windows(2).zip(&totals) {
            out.push_str(&format!(
                "{:>10.2} - {:<10.2} {:<40} {}\n",
                edge[0],
                edge[1],
                text_bar(*total, max, 40),
                total
            ));
        }

        let legend: Vec<String> = self
            .series
            .iter()
            .map(|(species, counts)| format!("{} {}", species, counts.iter().sum::<u32>()))
            .collect();
        out.push_str(&legend.join(", "));
        out
    }

    fn render_html(&self) -> Option<String> {
        Some(self.figure().to_html("histogram_plot"))
    }

    fn render_data(&self) -> Option<Value> {
        serde_json::to_value(self.figure()).ok()
    }
}
