//! Dataset loading and input flags shared by the rendering commands.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Args;
use palmer_core::{Dataset, InputValue, load_dataset, load_dataset_from};
use palmer_server::DashboardSession;

/// Dataset and input flags.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Penguin CSV to load instead of the bundled sample
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Species to keep, comma separated (default: all; pass the flag alone for none)
    #[arg(long, num_args = 0.., value_delimiter = ',')]
    pub species: Option<Vec<String>>,

    /// Islands to keep, comma separated (default: all; pass the flag alone for none)
    #[arg(long, num_args = 0.., value_delimiter = ',')]
    pub island: Option<Vec<String>>,

    /// Measurement plotted by the charts (e.g. body_mass_g)
    #[arg(long)]
    pub attribute: Option<String>,

    /// Number of bins of the attribute histogram (1-100)
    #[arg(long)]
    pub plotly_bins: Option<f64>,

    /// Number of bins of the distribution chart (5-50)
    #[arg(long)]
    pub seaborn_bins: Option<f64>,
}

impl FilterArgs {
    /// Input writes requested on the command line, in registry order.
    fn updates(&self) -> Vec<(&'static str, InputValue)> {
        let mut updates = Vec::new();
        if let Some(attribute) = &self.attribute {
            updates.push(("selected_attribute", InputValue::Text(attribute.clone())));
        }
        if let Some(bins) = self.plotly_bins {
            updates.push(("plotly_bin_count", InputValue::Number(bins)));
        }
        if let Some(bins) = self.seaborn_bins {
            updates.push(("seaborn_bin_count", InputValue::Number(bins)));
        }
        if let Some(species) = &self.species {
            updates.push(("selected_species_list", InputValue::List(species.clone())));
        }
        if let Some(islands) = &self.island {
            updates.push(("selected_island_list", InputValue::List(islands.clone())));
        }
        updates
    }
}

/// Load the bundled sample or the CSV at `path`.
pub fn load(path: Option<&Path>) -> palmer_core::Result<Dataset> {
    match path {
        Some(path) => load_dataset_from(path),
        None => load_dataset(),
    }
}

/// A session with the command line inputs applied.
pub fn open_session(args: &FilterArgs, title: &str) -> anyhow::Result<DashboardSession> {
    let dataset = Arc::new(load(args.data.as_deref())?);
    let mut session = DashboardSession::new(dataset, title)?;

    for (name, value) in args.updates() {
        session.apply_input(name, &value)?;
    }

    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_no_updates() {
        assert!(FilterArgs::default().updates().is_empty());
    }

    #[test]
    fn test_empty_species_flag_selects_nothing() {
        let args = FilterArgs {
            species: Some(vec![]),
            ..FilterArgs::default()
        };
        let session = open_session(&args, "test").unwrap();
        assert!(session.filtered_data().is_empty());
    }

    #[test]
    fn test_flags_applied_without_rendering() {
        let args = FilterArgs {
            species: Some(vec!["Gentoo".to_string()]),
            island: Some(vec!["Biscoe".to_string()]),
            plotly_bins: Some(25.0),
            ..FilterArgs::default()
        };
        let session = open_session(&args, "test").unwrap();
        assert_eq!(session.recomputations(), 0);
        assert_eq!(session.filtered_data().len(), 14);
        assert_eq!(session.recomputations(), 1);
    }

    #[test]
    fn test_invalid_attribute_is_reported() {
        let args = FilterArgs {
            attribute: Some("wingspan".to_string()),
            ..FilterArgs::default()
        };
        let err = open_session(&args, "test").err().unwrap();
        assert!(err.to_string().contains("wingspan"));
    }
}
