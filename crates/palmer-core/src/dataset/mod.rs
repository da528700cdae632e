//! The immutable penguin table and its loader.

mod loader;
mod schema;

pub use loader::{SAMPLE_CSV, load_dataset, load_dataset_from, parse_csv};
pub use schema::{Attribute, Category, Dataset, Island, PenguinRecord, Sex, Species};
