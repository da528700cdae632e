//! Salsa-based incremental computation database for the dashboard.
//!
//! This module provides the derived view engine: a memoized query that
//! filters the dataset by the current category selections. The query is
//! demand-driven: writing an input only marks dependent memos stale, and the
//! filter runs again on the next read, once.
//!
//! # Module Organization
//!
//! - [`inputs`] - Input types (CategoryColumns, Selections, DisplaySettings)
//! - [`queries`] - Tracked query functions

mod inputs;
mod queries;

use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use salsa::Setter;

use crate::dataset::{Attribute, Dataset, Island, Species};

pub use inputs::{CategoryColumns, DisplaySettings, Selections};
pub use queries::filtered_rows;

/// The concrete database implementation.
///
/// Create an instance with [`DashboardDatabase::new()`] and use the helper
/// methods to interact with the incremental system. Each dashboard session
/// owns its own database.
#[salsa::db]
#[derive(Clone)]
pub struct DashboardDatabase {
    storage: salsa::Storage<Self>,
    /// Number of tracked-query executions since creation.
    executions: Arc<AtomicU64>,
}

#[salsa::db]
impl salsa::Database for DashboardDatabase {}

impl Default for DashboardDatabase {
    fn default() -> Self {
        let executions = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&executions);
        let storage = salsa::Storage::new(Some(Box::new(move |event: salsa::Event| {
            if let salsa::EventKind::WillExecute { .. } = event.kind {
                counter.fetch_add(1, Ordering::Relaxed);
            }
        })));

        Self {
            storage,
            executions,
        }
    }
}

impl DashboardDatabase {
    /// Create a new dashboard database.
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times a tracked query actually ran (cache misses).
    pub fn executions(&self) -> u64 {
        self.executions.load(Ordering::Relaxed)
    }

    // =========================================================================
    // Inputs
    // =========================================================================

    /// Register the categorical columns of a dataset.
    pub fn create_columns(&self, dataset: &Dataset) -> CategoryColumns {
        CategoryColumns::new(
            self,
            Arc::new(dataset.species_column()),
            Arc::new(dataset.island_column()),
        )
    }

    /// Create the selection input.
    pub fn create_selections(
        &self,
        species: BTreeSet<Species>,
        islands: BTreeSet<Island>,
    ) -> Selections {
        Selections::new(self, species, islands)
    }

    /// Create the display settings input.
    pub fn create_display_settings(
        &self,
        attribute: Attribute,
        plotly_bins: u32,
        seaborn_bins: u32,
    ) -> DisplaySettings {
        DisplaySettings::new(self, attribute, plotly_bins, seaborn_bins)
    }

    /// Replace the selected species.
    ///
    /// Writing the current value again is a no-op and does not invalidate
    /// anything. Returns whether the input changed.
    pub fn set_species(&mut self, selections: Selections, species: BTreeSet<Species>) -> bool {
        if selections.species(&*self) == species {
            return false;
        }
        selections.set_species(self).to(species);
        true
    }

    /// Replace the selected islands. Returns whether the input changed.
    pub fn set_islands(&mut self, selections: Selections, islands: BTreeSet<Island>) -> bool {
        if selections.islands(&*self) == islands {
            return false;
        }
        selections.set_islands(self).to(islands);
        true
    }

    /// Change the plotted attribute. Returns whether the input changed.
    pub fn set_attribute(&mut self, settings: DisplaySettings, attribute: Attribute) -> bool {
        if settings.attribute(&*self) == attribute {
            return false;
        }
        settings.set_attribute(self).to(attribute);
        true
    }

    /// Change the attribute histogram bin count. Returns whether the input changed.
    pub fn set_plotly_bins(&mut self, settings: DisplaySettings, bins: u32) -> bool {
        if settings.plotly_bins(&*self) == bins {
            return false;
        }
        settings.set_plotly_bins(self).to(bins);
        true
    }

    /// Change the distribution chart bin count. Returns whether the input changed.
    pub fn set_seaborn_bins(&mut self, settings: DisplaySettings, bins: u32) -> bool {
        if settings.seaborn_bins(&*self) == bins {
            return false;
        }
        settings.set_seaborn_bins(self).to(bins);
        true
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Indices of the rows passing the current selections (memoized).
    pub fn get_filtered_rows(
        &self,
        columns: CategoryColumns,
        selections: Selections,
    ) -> Arc<Vec<usize>> {
        filtered_rows(self, columns, selections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Category;

    fn all<C: Category>() -> BTreeSet<C> {
        C::all().iter().copied().collect()
    }

    fn three_rows() -> Dataset {
        crate::dataset::parse_csv(
            "species,island,bill_length_mm,bill_depth_mm,flipper_length_mm,body_mass_g\n\
             Adelie,Biscoe,39.1,18.7,181,3750\n\
             Gentoo,Dream,46.1,13.2,211,4500\n\
             Chinstrap,Torgersen,46.5,17.9,192,3500\n"
                .as_bytes(),
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_database_creation() {
        let db = DashboardDatabase::new();
        assert_eq!(db.executions(), 0);
    }

    #[test]
    fn test_filtered_rows_query() {
        let db = DashboardDatabase::new();
        let dataset = three_rows();
        let columns = db.create_columns(&dataset);
        let selections = db.create_selections(
            BTreeSet::from([Species::Adelie, Species::Gentoo]),
            all::<Island>(),
        );

        let rows = db.get_filtered_rows(columns, selections);
        assert_eq!(*rows, vec![0, 1]);
    }

    #[test]
    fn test_memoized_between_reads() {
        let db = DashboardDatabase::new();
        let dataset = three_rows();
        let columns = db.create_columns(&dataset);
        let selections = db.create_selections(all::<Species>(), all::<Island>());

        let first = db.get_filtered_rows(columns, selections);
        let second = db.get_filtered_rows(columns, selections);
        assert_eq!(first, second);
        assert_eq!(db.executions(), 1);
    }

    #[test]
    fn test_selection_change_recomputes_once() {
        let mut db = DashboardDatabase::new();
        let dataset = three_rows();
        let columns = db.create_columns(&dataset);
        let selections = db.create_selections(all::<Species>(), all::<Island>());

        assert_eq!(db.get_filtered_rows(columns, selections).len(), 3);
        assert_eq!(db.executions(), 1);

        assert!(db.set_islands(selections, BTreeSet::from([Island::Dream])));
        // Writing does not recompute; reading does.
        assert_eq!(db.executions(), 1);
        assert_eq!(*db.get_filtered_rows(columns, selections), vec![1]);
        assert_eq!(*db.get_filtered_rows(columns, selections), vec![1]);
        assert_eq!(db.executions(), 2);
    }

    #[test]
    fn test_display_settings_do_not_invalidate() {
        let mut db = DashboardDatabase::new();
        let dataset = three_rows();
        let columns = db.create_columns(&dataset);
        let selections = db.create_selections(all::<Species>(), all::<Island>());
        let settings = db.create_display_settings(Attribute::BillLengthMm, 10, 20);

        db.get_filtered_rows(columns, selections);
        assert!(db.set_plotly_bins(settings, 42));
        assert!(db.set_seaborn_bins(settings, 7));
        assert!(db.set_attribute(settings, Attribute::BodyMassG));
        db.get_filtered_rows(columns, selections);

        assert_eq!(db.executions(), 1);
        assert_eq!(settings.plotly_bins(&db), 42);
        assert_eq!(settings.attribute(&db), Attribute::BodyMassG);
    }

    #[test]
    fn test_rewriting_same_selection_is_noop() {
        let mut db = DashboardDatabase::new();
        let dataset = three_rows();
        let columns = db.create_columns(&dataset);
        let selections = db.create_selections(all::<Species>(), all::<Island>());

        db.get_filtered_rows(columns, selections);
        assert!(!db.set_species(selections, all::<Species>()));
        db.get_filtered_rows(columns, selections);
        assert_eq!(db.executions(), 1);
    }

    #[test]
    fn test_empty_selection_yields_no_rows() {
        let mut db = DashboardDatabase::new();
        let dataset = three_rows();
        let columns = db.create_columns(&dataset);
        let selections = db.create_selections(all::<Species>(), all::<Island>());

        db.set_species(selections, BTreeSet::new());
        assert!(db.get_filtered_rows(columns, selections).is_empty());

        db.set_species(selections, all::<Species>());
        db.set_islands(selections, BTreeSet::new());
        assert!(db.get_filtered_rows(columns, selections).is_empty());
    }
}
