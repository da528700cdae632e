//! Output dependency graph.
//!
//! This module provides:
//! - The static producer → consumer wiring of inputs, the filtered view and outputs
//! - Selection of the outputs to re-render after an input change
//! - Cycle detection with helpful error messages

mod types;

pub use types::{NodeId, OutputGraph, OutputId};
