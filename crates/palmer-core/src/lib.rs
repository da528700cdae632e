//! Core engine for the Palmer penguins dashboard.
//!
//! This crate provides:
//! - The immutable penguin dataset and its CSV loader
//! - The input registry with validation and defaults
//! - Salsa-based incremental computation of the filtered view
//! - The output dependency graph

pub mod dataset;
pub mod engine;
pub mod error;
pub mod graph;
pub mod inputs;
pub mod salsa_db;

pub use dataset::{
    Attribute, Category, Dataset, Island, PenguinRecord, Sex, Species, load_dataset,
    load_dataset_from,
};
pub use engine::{DisplayOptions, FilteredView, ViewEngine};
pub use error::{Error, Result};
pub use graph::{NodeId, OutputGraph, OutputId};
pub use inputs::{
    InputChange, InputDef, InputName, InputRegistry, InputState, InputValue, PLOTLY_BINS,
    SEABORN_BINS,
};
pub use salsa_db::DashboardDatabase;
