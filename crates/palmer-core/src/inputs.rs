//! Input registry for the dashboard.
//!
//! The dashboard exposes five user-controllable inputs. Each one is declared
//! once (id, widget kind, domain, default) and every value written to it is
//! validated here before it reaches the view engine:
//!
//! | input | widget | domain | default |
//! |---|---|---|---|
//! | `selected_attribute` | selectize | the four measurement columns | `bill_length_mm` |
//! | `plotly_bin_count` | numeric | 1..=100 | 10 |
//! | `seaborn_bin_count` | slider | 5..=50 | 20 |
//! | `selected_species_list` | checkbox group | Adelie, Gentoo, Chinstrap | all |
//! | `selected_island_list` | checkbox group | Biscoe, Dream, Torgersen | all |
//!
//! Numeric values outside their range are clamped, mirroring how the widgets
//! themselves constrain user input. Category labels outside the domain are
//! dropped from a selection, so they simply match no rows.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dataset::{Attribute, Category, Island, Species};
use crate::error::{Error, Result};

/// Bounds and default of the attribute histogram bin count.
pub const PLOTLY_BINS: BinRange = BinRange {
    min: 1,
    max: 100,
    default: 10,
};

/// Bounds and default of the distribution chart bin count.
pub const SEABORN_BINS: BinRange = BinRange {
    min: 5,
    max: 50,
    default: 20,
};

/// Inclusive integer range with a default, used by the bin count inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinRange {
    pub min: u32,
    pub max: u32,
    pub default: u32,
}

impl BinRange {
    fn clamp(&self, value: f64) -> u32 {
        // Range is tiny, the cast cannot truncate after clamping.
        value.round().clamp(self.min as f64, self.max as f64) as u32
    }
}

/// Names of the registered inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputName {
    SelectedAttribute,
    PlotlyBinCount,
    SeabornBinCount,
    SelectedSpeciesList,
    SelectedIslandList,
}

impl InputName {
    /// Every input, in sidebar order.
    pub const ALL: [InputName; 5] = [
        InputName::SelectedAttribute,
        InputName::PlotlyBinCount,
        InputName::SeabornBinCount,
        InputName::SelectedSpeciesList,
        InputName::SelectedIslandList,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InputName::SelectedAttribute => "selected_attribute",
            InputName::PlotlyBinCount => "plotly_bin_count",
            InputName::SeabornBinCount => "seaborn_bin_count",
            InputName::SelectedSpeciesList => "selected_species_list",
            InputName::SelectedIslandList => "selected_island_list",
        }
    }
}

impl fmt::Display for InputName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| Error::UnknownInput(s.to_string()))
    }
}

/// Input definition sent to the frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputDef {
    /// Single-choice dropdown.
    Selectize {
        id: String,
        label: String,
        options: Vec<String>,
        selected: String,
    },
    /// Integer entry box.
    Numeric {
        id: String,
        label: String,
        min: f64,
        max: f64,
        value: f64,
    },
    /// Integer slider.
    Slider {
        id: String,
        label: String,
        min: f64,
        max: f64,
        step: f64,
        value: f64,
    },
    /// Multi-choice list of checkboxes.
    CheckboxGroup {
        id: String,
        label: String,
        options: Vec<String>,
        selected: Vec<String>,
        inline: bool,
    },
}

impl InputDef {
    /// Get the input ID.
    pub fn id(&self) -> &str {
        match self {
            InputDef::Selectize { id, .. } => id,
            InputDef::Numeric { id, .. } => id,
            InputDef::Slider { id, .. } => id,
            InputDef::CheckboxGroup { id, .. } => id,
        }
    }

    /// Get the human-readable label.
    pub fn label(&self) -> &str {
        match self {
            InputDef::Selectize { label, .. } => label,
            InputDef::Numeric { label, .. } => label,
            InputDef::Slider { label, .. } => label,
            InputDef::CheckboxGroup { label, .. } => label,
        }
    }
}

/// Raw value written to an input by a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputValue {
    /// Numeric value (numeric box, slider).
    Number(f64),
    /// Single label (selectize).
    Text(String),
    /// Set of labels (checkbox group).
    List(Vec<String>),
}

impl InputValue {
    /// Get as f64 if it's a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            InputValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as str if it's text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            InputValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get as a slice of labels if it's a list.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            InputValue::List(items) => Some(items),
            _ => None,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            InputValue::Number(_) => "a number",
            InputValue::Text(_) => "text",
            InputValue::List(_) => "a list",
        }
    }
}

/// A validated, typed write to one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputChange {
    Attribute(Attribute),
    PlotlyBins(u32),
    SeabornBins(u32),
    Species(BTreeSet<Species>),
    Islands(BTreeSet<Island>),
}

impl InputChange {
    /// The input this change applies to.
    pub fn name(&self) -> InputName {
        match self {
            InputChange::Attribute(_) => InputName::SelectedAttribute,
            InputChange::PlotlyBins(_) => InputName::PlotlyBinCount,
            InputChange::SeabornBins(_) => InputName::SeabornBinCount,
            InputChange::Species(_) => InputName::SelectedSpeciesList,
            InputChange::Islands(_) => InputName::SelectedIslandList,
        }
    }
}

/// Current value of every input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputState {
    pub attribute: Attribute,
    pub plotly_bins: u32,
    pub seaborn_bins: u32,
    pub species: BTreeSet<Species>,
    pub islands: BTreeSet<Island>,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            attribute: Attribute::BillLengthMm,
            plotly_bins: PLOTLY_BINS.default,
            seaborn_bins: SEABORN_BINS.default,
            species: Species::all().iter().copied().collect(),
            islands: Island::all().iter().copied().collect(),
        }
    }
}

impl InputState {
    fn apply(&mut self, change: &InputChange) {
        match change {
            InputChange::Attribute(a) => self.attribute = *a,
            InputChange::PlotlyBins(n) => self.plotly_bins = *n,
            InputChange::SeabornBins(n) => self.seaborn_bins = *n,
            InputChange::Species(set) => self.species = set.clone(),
            InputChange::Islands(set) => self.islands = set.clone(),
        }
    }

    fn differs(&self, change: &InputChange) -> bool {
        match change {
            InputChange::Attribute(a) => self.attribute != *a,
            InputChange::PlotlyBins(n) => self.plotly_bins != *n,
            InputChange::SeabornBins(n) => self.seaborn_bins != *n,
            InputChange::Species(set) => self.species != *set,
            InputChange::Islands(set) => self.islands != *set,
        }
    }
}

/// The set of named inputs of one dashboard session.
#[derive(Debug, Clone, Default)]
pub struct InputRegistry {
    state: InputState,
}

impl InputRegistry {
    /// Create a registry with every input at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current values.
    pub fn state(&self) -> &InputState {
        &self.state
    }

    /// Declarative description of every input with its current value.
    pub fn definitions(&self) -> Vec<InputDef> {
        InputName::ALL
            .into_iter()
            .map(|name| self.definition(name))
            .collect()
    }

    /// Declarative description of a single input.
    pub fn definition(&self, name: InputName) -> InputDef {
        let id = name.as_str().to_string();
        match name {
            InputName::SelectedAttribute => InputDef::Selectize {
                id,
                label: "Select Penguin Attribute:".to_string(),
                options: Attribute::ALL
                    .iter()
                    .map(|a| a.column_name().to_string())
                    .collect(),
                selected: self.state.attribute.column_name().to_string(),
            },
            InputName::PlotlyBinCount => InputDef::Numeric {
                id,
                label: "Number of Plotly Bins:".to_string(),
                min: PLOTLY_BINS.min as f64,
                max: PLOTLY_BINS.max as f64,
                value: self.state.plotly_bins as f64,
            },
            InputName::SeabornBinCount => InputDef::Slider {
                id,
                label: "Number of Seaborn Bins:".to_string(),
                min: SEABORN_BINS.min as f64,
                max: SEABORN_BINS.max as f64,
                step: 1.0,
                value: self.state.seaborn_bins as f64,
            },
            InputName::SelectedSpeciesList => InputDef::CheckboxGroup {
                id,
                label: "Filter by Species:".to_string(),
                options: labels(Species::all().iter()),
                selected: labels(self.state.species.iter()),
                inline: false,
            },
            InputName::SelectedIslandList => InputDef::CheckboxGroup {
                id,
                label: "Filter by Island:".to_string(),
                options: labels(Island::all().iter()),
                selected: labels(self.state.islands.iter()),
                inline: false,
            },
        }
    }

    /// Current value of an input, in its wire representation.
    pub fn get_value(&self, name: &str) -> Result<InputValue> {
        let name: InputName = name.parse()?;
        Ok(match name {
            InputName::SelectedAttribute => {
                InputValue::Text(self.state.attribute.column_name().to_string())
            }
            InputName::PlotlyBinCount => InputValue::Number(self.state.plotly_bins as f64),
            InputName::SeabornBinCount => InputValue::Number(self.state.seaborn_bins as f64),
            InputName::SelectedSpeciesList => InputValue::List(labels(self.state.species.iter())),
            InputName::SelectedIslandList => InputValue::List(labels(self.state.islands.iter())),
        })
    }

    /// Validate a raw value without applying it.
    pub fn parse(&self, name: &str, value: &InputValue) -> Result<InputChange> {
        let input: InputName = name.parse()?;
        let invalid = |message: String| Error::InvalidValue {
            name: input.as_str().to_string(),
            message,
        };

        match input {
            InputName::SelectedAttribute => {
                let text = value
                    .as_text()
                    .ok_or_else(|| invalid(format!("expected text, got {}", value.kind())))?;
                Attribute::from_column_name(text)
                    .map(InputChange::Attribute)
                    .ok_or_else(|| invalid(format!("'{}' is not a measurement column", text)))
            }
            InputName::PlotlyBinCount | InputName::SeabornBinCount => {
                let number = value
                    .as_f64()
                    .ok_or_else(|| invalid(format!("expected a number, got {}", value.kind())))?;
                if !number.is_finite() {
                    return Err(invalid(format!("{} is not a finite number", number)));
                }
                Ok(if input == InputName::PlotlyBinCount {
                    InputChange::PlotlyBins(PLOTLY_BINS.clamp(number))
                } else {
                    InputChange::SeabornBins(SEABORN_BINS.clamp(number))
                })
            }
            InputName::SelectedSpeciesList => {
                let items = value
                    .as_list()
                    .ok_or_else(|| invalid(format!("expected a list, got {}", value.kind())))?;
                Ok(InputChange::Species(category_set(input, items)))
            }
            InputName::SelectedIslandList => {
                let items = value
                    .as_list()
                    .ok_or_else(|| invalid(format!("expected a list, got {}", value.kind())))?;
                Ok(InputChange::Islands(category_set(input, items)))
            }
        }
    }

    /// Validate and store a value.
    ///
    /// Returns the applied change, or `None` when the (validated) value equals
    /// the current one and nothing changed.
    pub fn set_value(&mut self, name: &str, value: &InputValue) -> Result<Option<InputChange>> {
        let change = self.parse(name, value)?;
        if !self.state.differs(&change) {
            return Ok(None);
        }
        self.state.apply(&change);
        Ok(Some(change))
    }

    /// Restore every input to its default, returning the changes that were needed.
    pub fn reset(&mut self) -> Vec<InputChange> {
        let defaults = InputState::default();
        let changes: Vec<InputChange> = [
            InputChange::Attribute(defaults.attribute),
            InputChange::PlotlyBins(defaults.plotly_bins),
            InputChange::SeabornBins(defaults.seaborn_bins),
            InputChange::Species(defaults.species.clone()),
            InputChange::Islands(defaults.islands.clone()),
        ]
        .into_iter()
        .filter(|change| self.state.differs(change))
        .collect();

        self.state = defaults;
        changes
    }
}

fn labels<'a, C: Category>(values: impl Iterator<Item = &'a C>) -> Vec<String> {
    values.map(|c| c.as_str().to_string()).collect()
}

fn category_set<C: Category>(input: InputName, items: &[String]) -> BTreeSet<C> {
    items
        .iter()
        .filter_map(|label| {
            let parsed = C::from_label(label);
            if parsed.is_none() {
                tracing::debug!("Ignoring unknown label '{}' for {}", label, input);
            }
            parsed
        })
        .collect()
}
