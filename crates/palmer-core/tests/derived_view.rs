//! Integration tests for the derived view.
//!
//! Exercises the filter through the public surface: registry validates,
//! engine applies, view is read back.

use std::collections::BTreeSet;
use std::sync::Arc;

use palmer_core::dataset::parse_csv;
use palmer_core::{
    Category, Dataset, InputRegistry, InputValue, Island, OutputGraph, OutputId, Species,
    ViewEngine, load_dataset,
};

// =============================================================================
// Test Helpers
// =============================================================================

const THREE_ROWS: &str = "\
species,island,bill_length_mm,bill_depth_mm,flipper_length_mm,body_mass_g,sex,year
Adelie,Biscoe,37.8,18.3,174,3400,female,2007
Gentoo,Dream,46.1,13.2,211,4500,female,2007
Chinstrap,Torgersen,46.5,17.9,192,3500,female,2007
";

/// A session-like harness: registry and engine kept in step.
struct Harness {
    registry: InputRegistry,
    engine: ViewEngine,
}

impl Harness {
    fn new(dataset: Dataset) -> Self {
        let registry = InputRegistry::new();
        let engine = ViewEngine::new(Arc::new(dataset), registry.state());
        Self { registry, engine }
    }

    fn sample() -> Self {
        Self::new(load_dataset().expect("bundled sample loads"))
    }

    fn set(&mut self, name: &str, value: InputValue) {
        if let Some(change) = self
            .registry
            .set_value(name, &value)
            .expect("valid input value")
        {
            self.engine.apply(&change);
        }
    }

    fn select(&mut self, name: &str, labels: &[&str]) {
        self.set(
            name,
            InputValue::List(labels.iter().map(|s| s.to_string()).collect()),
        );
    }
}

fn species_of(engine: &ViewEngine) -> Vec<Species> {
    engine.filtered_data().iter().map(|r| r.species).collect()
}

// =============================================================================
// Filtering
// =============================================================================

#[test]
fn three_row_example_excludes_unselected_species() {
    let dataset = parse_csv(THREE_ROWS.as_bytes(), None).unwrap();
    let mut h = Harness::new(dataset);

    h.select("selected_species_list", &["Adelie", "Gentoo"]);
    h.select("selected_island_list", &["Biscoe", "Dream", "Torgersen"]);

    let view = h.engine.filtered_data();
    let rows: Vec<(Species, Island)> = view.iter().map(|r| (r.species, r.island)).collect();
    assert_eq!(
        rows,
        vec![
            (Species::Adelie, Island::Biscoe),
            (Species::Gentoo, Island::Dream)
        ]
    );
}

#[test]
fn every_row_satisfies_both_memberships() {
    let mut h = Harness::sample();
    h.select("selected_species_list", &["Adelie", "Chinstrap"]);
    h.select("selected_island_list", &["Dream"]);

    let view = h.engine.filtered_data();
    assert!(!view.is_empty());
    for record in view.iter() {
        assert!(matches!(record.species, Species::Adelie | Species::Chinstrap));
        assert_eq!(record.island, Island::Dream);
    }

    // Nothing that matches was dropped.
    let expected = h
        .engine
        .dataset()
        .records()
        .iter()
        .filter(|r| {
            matches!(r.species, Species::Adelie | Species::Chinstrap) && r.island == Island::Dream
        })
        .count();
    assert_eq!(view.len(), expected);
}

/// The members of `C::all()` whose bit is set in `mask`.
fn subset<C: Category>(mask: usize) -> Vec<C> {
    C::all()
        .iter()
        .enumerate()
        .filter(|(bit, _)| mask & (1 << bit) != 0)
        .map(|(_, c)| *c)
        .collect()
}

#[test]
fn every_species_and_island_subset_filters_exactly() {
    let mut h = Harness::sample();

    for species_mask in 0..8 {
        for island_mask in 0..8 {
            let species: Vec<Species> = subset(species_mask);
            let islands: Vec<Island> = subset(island_mask);
            let species_labels: Vec<&str> = species.iter().map(|s| s.as_str()).collect();
            let island_labels: Vec<&str> = islands.iter().map(|i| i.as_str()).collect();
            h.select("selected_species_list", &species_labels);
            h.select("selected_island_list", &island_labels);

            let expected: Vec<usize> = h
                .engine
                .dataset()
                .records()
                .iter()
                .enumerate()
                .filter(|(_, r)| species.contains(&r.species) && islands.contains(&r.island))
                .map(|(row, _)| row)
                .collect();
            assert_eq!(
                h.engine.filtered_data().row_indices(),
                expected.as_slice(),
                "species {:?}, islands {:?}",
                species,
                islands
            );
        }
    }
}

#[test]
fn filter_preserves_source_order() {
    let mut h = Harness::sample();
    h.select("selected_species_list", &["Gentoo", "Adelie"]);

    let indices = h.engine.filtered_data().row_indices().to_vec();
    assert!(indices.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn full_selection_is_identity() {
    let h = Harness::sample();
    let view = h.engine.filtered_data();
    let dataset = h.engine.dataset();

    assert_eq!(view.len(), dataset.len());
    assert!(view.iter().zip(dataset.records()).all(|(a, b)| a == b));
    assert_eq!(view.columns(), &Dataset::COLUMNS);
}

#[test]
fn empty_species_selection_yields_empty_view() {
    let mut h = Harness::sample();
    h.select("selected_species_list", &[]);
    assert!(h.engine.filtered_data().is_empty());
    assert_eq!(h.engine.filtered_data().columns().len(), 8);
}

#[test]
fn empty_island_selection_yields_empty_view() {
    let mut h = Harness::sample();
    h.select("selected_island_list", &[]);
    assert!(h.engine.filtered_data().is_empty());
}

#[test]
fn both_selections_empty_yields_empty_view() {
    let mut h = Harness::sample();
    h.select("selected_species_list", &[]);
    h.select("selected_island_list", &[]);
    assert!(h.engine.filtered_data().is_empty());
}

#[test]
fn unknown_labels_match_nothing() {
    let mut h = Harness::sample();
    h.select("selected_species_list", &["Emperor"]);
    assert!(h.engine.filtered_data().is_empty());

    h.select("selected_species_list", &["Emperor", "Gentoo"]);
    assert!(species_of(&h.engine).iter().all(|s| *s == Species::Gentoo));
}

// =============================================================================
// Memoization and invalidation
// =============================================================================

#[test]
fn repeated_reads_are_idempotent_and_cached() {
    let h = Harness::sample();
    let first = h.engine.filtered_data();
    let second = h.engine.filtered_data();

    assert_eq!(first, second);
    assert_eq!(h.engine.recomputations(), 1);
}

#[test]
fn selection_change_recomputes_once() {
    let mut h = Harness::sample();
    h.engine.filtered_data();

    h.select("selected_island_list", &["Biscoe"]);
    let after = h.engine.filtered_data();
    h.engine.filtered_data();

    assert_eq!(h.engine.recomputations(), 2);
    assert!(after.iter().all(|r| r.island == Island::Biscoe));
}

#[test]
fn unrelated_inputs_never_recompute() {
    let mut h = Harness::sample();
    let before = h.engine.filtered_data();

    h.set("selected_attribute", InputValue::Text("body_mass_g".into()));
    h.set("plotly_bin_count", InputValue::Number(42.0));
    h.set("seaborn_bin_count", InputValue::Number(7.0));

    assert_eq!(h.engine.filtered_data(), before);
    assert_eq!(h.engine.recomputations(), 1);
}

#[test]
fn rewriting_same_selection_is_not_a_change() {
    let mut h = Harness::sample();
    h.engine.filtered_data();

    let all: Vec<&str> = Species::all().iter().map(|s| s.as_str()).collect();
    h.select("selected_species_list", &all);
    h.engine.filtered_data();

    assert_eq!(h.engine.recomputations(), 1);
}

#[test]
fn graph_agrees_with_engine_about_unrelated_inputs() {
    let graph = OutputGraph::dashboard().unwrap();
    let table_inputs: BTreeSet<_> = palmer_core::InputName::ALL
        .into_iter()
        .filter(|name| {
            graph
                .invalidated_outputs(*name)
                .contains(&OutputId::DataTable)
        })
        .collect();

    assert_eq!(
        table_inputs,
        BTreeSet::from([
            palmer_core::InputName::SelectedSpeciesList,
            palmer_core::InputName::SelectedIslandList,
        ])
    );
}
