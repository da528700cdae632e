//! Error types for palmer-core.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for palmer-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in palmer-core.
#[derive(Debug, Error)]
pub enum Error {
    /// The dataset could not be loaded or failed schema validation.
    #[error("dataset error{}: {message}", path.as_ref().map(|p| format!(" in {}", p.display())).unwrap_or_default())]
    Dataset {
        path: Option<PathBuf>,
        message: String,
    },

    /// CSV decoding error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No input with this name is registered.
    #[error("unknown input: {0}")]
    UnknownInput(String),

    /// A value of the wrong type (or an unrepresentable value) was written to an input.
    #[error("invalid value for input '{name}': {message}")]
    InvalidValue { name: String, message: String },

    /// No output with this id exists.
    #[error("unknown output: {0}")]
    UnknownOutput(String),

    /// Cyclic dependency detected in the output graph.
    #[error("cyclic dependency detected: {0}")]
    CyclicDependency(String),
}

impl Error {
    /// Format the error together with a short recovery hint for terminal output.
    pub fn with_hint(&self) -> String {
        let hint = match self {
            Error::Dataset { .. } | Error::Csv(_) => Some(
                "the CSV needs the columns species, island, bill_length_mm, bill_depth_mm, \
                 flipper_length_mm and body_mass_g (use NA for missing values)",
            ),
            Error::Io(_) => Some("check that the --data path exists and is readable"),
            Error::UnknownInput(_) => Some("run `palmer inputs` to list the available inputs"),
            Error::InvalidValue { .. } => {
                Some("run `palmer inputs` to see each input's type and valid range")
            }
            Error::UnknownOutput(_) => Some(
                "valid outputs are penguins_datatable, penguins_datagrid, histogram_plot, \
                 scatter_plot and distribution_plot",
            ),
            Error::CyclicDependency(_) => None,
        };

        match hint {
            Some(hint) => format!("{}\n  hint: {}", self, hint),
            None => self.to_string(),
        }
    }
}
