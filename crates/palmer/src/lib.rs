//! Palmer: a reactive dashboard over the Palmer Archipelago penguin data.
//!
//! This crate holds the presentation adapters. Each one turns the current
//! filtered view (plus the display inputs) into a renderable artifact:
//! - **Tables**: [`DataTable`] and [`DataGrid`] show the filtered rows verbatim
//! - **Attribute histogram**: stacked by species, plotly-style figure
//! - **Scatter plot**: selected attribute against body mass
//! - **Distribution chart**: per-species step histogram with a density curve
//!
//! The reactive core (dataset, inputs, incremental filtering) lives in
//! `palmer-core`; the web server in `palmer-server`.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use palmer::prelude::*;
//!
//! let dataset = Arc::new(load_dataset()?);
//! let engine = ViewEngine::new(dataset, &InputState::default());
//! let output = render_output(OutputId::Histogram, &engine.filtered_data(), &engine.display());
//! println!("{}", output.text);
//! ```

pub mod charts;
pub mod output;
pub mod render;
pub mod table;

pub mod prelude {
    //! Common imports for working with the dashboard.
    //!
    //! ```rust,ignore
    //! use palmer::prelude::*;
    //! ```

    pub use crate::charts::{AttributeHistogram, DistributionChart, ScatterPlot};
    pub use crate::output::{RenderedOutput, render_all, render_output};
    pub use crate::render::Render;
    pub use crate::table::{DataGrid, DataTable};

    pub use palmer_core::{
        Attribute, DisplayOptions, FilteredView, InputRegistry, InputState, InputValue, Island,
        OutputId, Species, ViewEngine, load_dataset,
    };
}

/// Re-export for convenience
pub use output::{RenderedOutput, render_all, render_output};
pub use render::Render;
pub use table::{DataGrid, DataTable};
