//! Inputs command: list the dashboard inputs.

use palmer_core::{InputDef, InputRegistry};

use crate::colors;

/// Print every input with its widget, domain and default.
pub fn execute(json: bool) -> anyhow::Result<()> {
    let definitions = InputRegistry::new().definitions();

    if json {
        println!("{}", serde_json::to_string_pretty(&definitions)?);
        return Ok(());
    }

    println!("\n{}Dashboard inputs{}", colors::BOLD, colors::RESET);
    println!("{}", colors::rule());
    for def in &definitions {
        println!("{}{}{}", colors::CYAN, def.id(), colors::RESET);
        println!("  {}{}{}", colors::DIM, def.label(), colors::RESET);
        println!("  {}", describe(def));
    }

    Ok(())
}

fn describe(def: &InputDef) -> String {
    match def {
        InputDef::Selectize {
            options, selected, ..
        } => format!("one of {} (default {})", options.join(", "), selected),
        InputDef::Numeric { min, max, value, .. } => {
            format!("number {}..={} (default {})", min, max, value)
        }
        InputDef::Slider {
            min,
            max,
            step,
            value,
            ..
        } => format!("slider {}..={} step {} (default {})", min, max, step, value),
        InputDef::CheckboxGroup {
            options, selected, ..
        } => format!(
            "any of {} (default {})",
            options.join(", "),
            if selected.len() == options.len() {
                "all".to_string()
            } else {
                selected.join(", ")
            }
        ),
    }
}

#[cfg(test)]
mod tests {
    use palmer_core::InputName;

    use super::*;

    #[test]
    fn test_describe_defaults() {
        let registry = InputRegistry::new();
        assert_eq!(
            describe(&registry.definition(InputName::PlotlyBinCount)),
            "number 1..=100 (default 10)"
        );
        assert_eq!(
            describe(&registry.definition(InputName::SelectedSpeciesList)),
            "any of Adelie, Gentoo, Chinstrap (default all)"
        );
    }
}
