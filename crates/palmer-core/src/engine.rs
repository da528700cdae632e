//! Derived view engine.
//!
//! [`ViewEngine`] ties one session's inputs to the incremental database and
//! exposes the single accessor the presentation layer reads:
//! [`ViewEngine::filtered_data`].

use std::sync::Arc;

use crate::dataset::{Attribute, Dataset, PenguinRecord, Species};
use crate::inputs::{InputChange, InputState};
use crate::salsa_db::{CategoryColumns, DashboardDatabase, DisplaySettings, Selections};

/// Rows of the dataset selected by the current filters.
///
/// Holds the shared dataset and the memoized row selection; cloning is cheap
/// and never copies records.
#[derive(Debug, Clone)]
pub struct FilteredView {
    dataset: Arc<Dataset>,
    rows: Arc<Vec<usize>>,
}

impl FilteredView {
    /// Number of selected rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names; the filter never projects columns away.
    pub fn columns(&self) -> &'static [&'static str] {
        &Dataset::COLUMNS
    }

    /// Indices of the selected rows in the source dataset, ascending.
    pub fn row_indices(&self) -> &[usize] {
        &self.rows
    }

    /// Selected records in source order.
    pub fn iter(&self) -> impl Iterator<Item = &PenguinRecord> + '_ {
        self.rows.iter().filter_map(|&row| self.dataset.get(row))
    }

    /// Selected record at position `index` of the view.
    pub fn get(&self, index: usize) -> Option<&PenguinRecord> {
        self.rows.get(index).and_then(|&row| self.dataset.get(row))
    }

    /// `(species, value)` pairs of one measurement, skipping missing values.
    pub fn values(&self, attribute: Attribute) -> impl Iterator<Item = (Species, f64)> + '_ {
        self.iter()
            .filter_map(move |r| r.value(attribute).map(|v| (r.species, v)))
    }

    /// `(species, x, y)` triples of two measurements, skipping rows missing either.
    pub fn pairs(
        &self,
        x: Attribute,
        y: Attribute,
    ) -> impl Iterator<Item = (Species, f64, f64)> + '_ {
        self.iter()
            .filter_map(move |r| Some((r.species, r.value(x)?, r.value(y)?)))
    }

    /// The shared source dataset.
    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }
}

impl PartialEq for FilteredView {
    fn eq(&self, other: &Self) -> bool {
        (Arc::ptr_eq(&self.dataset, &other.dataset) || self.dataset == other.dataset)
            && self.rows == other.rows
    }
}

/// Snapshot of the display-only inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOptions {
    pub attribute: Attribute,
    pub plotly_bins: u32,
    pub seaborn_bins: u32,
}

/// The derived view of one session.
pub struct ViewEngine {
    db: DashboardDatabase,
    dataset: Arc<Dataset>,
    columns: CategoryColumns,
    selections: Selections,
    settings: DisplaySettings,
}

impl ViewEngine {
    /// Create an engine over a shared dataset, seeded with the given input values.
    pub fn new(dataset: Arc<Dataset>, inputs: &InputState) -> Self {
        let db = DashboardDatabase::new();
        let columns = db.create_columns(&dataset);
        let selections = db.create_selections(inputs.species.clone(), inputs.islands.clone());
        let settings =
            db.create_display_settings(inputs.attribute, inputs.plotly_bins, inputs.seaborn_bins);

        Self {
            db,
            dataset,
            columns,
            selections,
            settings,
        }
    }

    /// The dataset restricted to the selected species and islands.
    ///
    /// Recomputed only when a selection changed since the previous read;
    /// otherwise the cached rows are returned.
    pub fn filtered_data(&self) -> FilteredView {
        FilteredView {
            dataset: Arc::clone(&self.dataset),
            rows: self.db.get_filtered_rows(self.columns, self.selections),
        }
    }

    /// Current display settings.
    pub fn display(&self) -> DisplayOptions {
        DisplayOptions {
            attribute: self.settings.attribute(&self.db),
            plotly_bins: self.settings.plotly_bins(&self.db),
            seaborn_bins: self.settings.seaborn_bins(&self.db),
        }
    }

    /// Push a validated input change into the database.
    ///
    /// Returns whether anything changed.
    pub fn apply(&mut self, change: &InputChange) -> bool {
        let changed = match change {
            InputChange::Attribute(a) => self.db.set_attribute(self.settings, *a),
            InputChange::PlotlyBins(n) => self.db.set_plotly_bins(self.settings, *n),
            InputChange::SeabornBins(n) => self.db.set_seaborn_bins(self.settings, *n),
            InputChange::Species(set) => self.db.set_species(self.selections, set.clone()),
            InputChange::Islands(set) => self.db.set_islands(self.selections, set.clone()),
        };
        if changed {
            tracing::debug!("Input {} changed", change.name());
        }
        changed
    }

    /// Number of times the filter actually ran.
    pub fn recomputations(&self) -> u64 {
        self.db.executions()
    }

    /// The shared source dataset.
    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }
}
