//! Salsa input types for the dashboard.
//!
//! Input types are the entry points for incremental computation.
//! Changes to inputs automatically invalidate dependent queries.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::dataset::{Attribute, Island, Species};

/// Input: the categorical columns of the dataset.
///
/// Set once per session from the shared dataset and never updated, since the
/// dataset itself is immutable. Only the columns the filter reads are stored.
#[salsa::input]
pub struct CategoryColumns {
    /// `species` column, one entry per row
    pub species: Arc<Vec<Species>>,

    /// `island` column, one entry per row
    pub islands: Arc<Vec<Island>>,
}

/// Input: the two category selections.
///
/// These are the only values the derived view reads. Each field is tracked
/// separately, so changing one set invalidates the view without touching
/// anything that does not read selections.
#[salsa::input]
pub struct Selections {
    /// Allowed species labels
    pub species: BTreeSet<Species>,

    /// Allowed island labels
    pub islands: BTreeSet<Island>,
}

/// Input: display-only settings.
///
/// Read by the presentation adapters, never by the derived view, so writing
/// them does not invalidate the filtered rows.
#[salsa::input]
pub struct DisplaySettings {
    /// Measurement plotted on the x axis of every chart
    pub attribute: Attribute,

    /// Bin count of the attribute histogram
    pub plotly_bins: u32,

    /// Bin count of the distribution chart
    pub seaborn_bins: u32,
}
