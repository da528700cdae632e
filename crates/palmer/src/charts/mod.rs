//! Chart adapters.
//!
//! Each chart is a pure function of the filtered view and the display inputs.
//! Rows missing the plotted measurement are skipped.

pub mod binning;
pub mod figure;

mod distribution;
mod histogram;
mod scatter;

pub use binning::Bins;
pub use distribution::{DistributionChart, KDE_GRID_POINTS, SpeciesDistribution};
pub use figure::{Figure, species_color};
pub use histogram::AttributeHistogram;
pub use scatter::ScatterPlot;

use palmer_core::{Attribute, Category, FilteredView, Species};

/// Present values of `attribute`, grouped by species in schema order.
/// Species without any value are omitted.
fn group_by_species(view: &FilteredView, attribute: Attribute) -> Vec<(Species, Vec<f64>)> {
    Species::all()
        .iter()
        .map(|&species| {
            let values: Vec<f64> = view
                .values(attribute)
                .filter(|(s, _)| *s == species)
                .map(|(_, v)| v)
                .collect();
            (species, values)
        })
        .filter(|(_, values)| !values.is_empty())
        .collect()
}

/// A row of `#` proportional to `value / max`.
fn text_bar(value: u32, max: u32, width: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let len = (value as usize * width).div_ceil(max as usize);
    "#".repeat(len.min(width))
}
