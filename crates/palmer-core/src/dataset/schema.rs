//! Schema of the penguin measurement table.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A categorical column value with a fixed, closed domain.
pub trait Category: Copy + Ord + fmt::Debug + Send + Sync + 'static {
    /// Every value of the domain, in display order.
    fn all() -> &'static [Self];

    /// The label used in the source data and in the UI.
    fn as_str(&self) -> &'static str;

    /// Parse a label. Labels outside the domain yield `None`.
    fn from_label(label: &str) -> Option<Self> {
        Self::all().iter().copied().find(|c| c.as_str() == label)
    }
}

/// Penguin species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Species {
    Adelie,
    Gentoo,
    Chinstrap,
}

impl Category for Species {
    fn all() -> &'static [Self] {
        &[Species::Adelie, Species::Gentoo, Species::Chinstrap]
    }

    fn as_str(&self) -> &'static str {
        match self {
            Species::Adelie => "Adelie",
            Species::Gentoo => "Gentoo",
            Species::Chinstrap => "Chinstrap",
        }
    }
}

/// Island of the Palmer Archipelago where the penguin was observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Island {
    Biscoe,
    Dream,
    Torgersen,
}

impl Category for Island {
    fn all() -> &'static [Self] {
        &[Island::Biscoe, Island::Dream, Island::Torgersen]
    }

    fn as_str(&self) -> &'static str {
        match self {
            Island::Biscoe => "Biscoe",
            Island::Dream => "Dream",
            Island::Torgersen => "Torgersen",
        }
    }
}

/// Recorded sex of the penguin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Female => "female",
            Sex::Male => "male",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Island {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the four numeric measurement columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    BillLengthMm,
    BillDepthMm,
    FlipperLengthMm,
    BodyMassG,
}

impl Attribute {
    /// All measurement columns, in table order.
    pub const ALL: [Attribute; 4] = [
        Attribute::BillLengthMm,
        Attribute::BillDepthMm,
        Attribute::FlipperLengthMm,
        Attribute::BodyMassG,
    ];

    /// Column name as it appears in the source data.
    pub fn column_name(&self) -> &'static str {
        match self {
            Attribute::BillLengthMm => "bill_length_mm",
            Attribute::BillDepthMm => "bill_depth_mm",
            Attribute::FlipperLengthMm => "flipper_length_mm",
            Attribute::BodyMassG => "body_mass_g",
        }
    }

    /// Look up a column by name.
    pub fn from_column_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.column_name() == name)
    }

    /// Axis label: underscores become spaces and every word is capitalised
    /// (`bill_length_mm` becomes `Bill Length Mm`).
    pub fn label(&self) -> String {
        self.column_name()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// A single observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenguinRecord {
    pub species: Species,
    pub island: Island,
    pub bill_length_mm: Option<f64>,
    pub bill_depth_mm: Option<f64>,
    pub flipper_length_mm: Option<f64>,
    pub body_mass_g: Option<f64>,
    pub sex: Option<Sex>,
    pub year: Option<u16>,
}

impl PenguinRecord {
    /// Value of a measurement column, `None` when it was not recorded.
    pub fn value(&self, attribute: Attribute) -> Option<f64> {
        match attribute {
            Attribute::BillLengthMm => self.bill_length_mm,
            Attribute::BillDepthMm => self.bill_depth_mm,
            Attribute::FlipperLengthMm => self.flipper_length_mm,
            Attribute::BodyMassG => self.body_mass_g,
        }
    }

    /// Cells of this record in [`Dataset::COLUMNS`] order, missing values as empty strings.
    pub fn cells(&self) -> Vec<String> {
        fn num(v: Option<f64>) -> String {
            v.map(|v| v.to_string()).unwrap_or_default()
        }

        vec![
            self.species.to_string(),
            self.island.to_string(),
            num(self.bill_length_mm),
            num(self.bill_depth_mm),
            num(self.flipper_length_mm),
            num(self.body_mass_g),
            self.sex.map(|s| s.as_str().to_string()).unwrap_or_default(),
            self.year.map(|y| y.to_string()).unwrap_or_default(),
        ]
    }
}

/// The immutable source table.
///
/// Built once by the loader and then only ever shared behind an `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<PenguinRecord>,
}

impl Dataset {
    /// Column names in table order.
    pub const COLUMNS: [&'static str; 8] = [
        "species",
        "island",
        "bill_length_mm",
        "bill_depth_mm",
        "flipper_length_mm",
        "body_mass_g",
        "sex",
        "year",
    ];

    pub fn new(records: Vec<PenguinRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, row: usize) -> Option<&PenguinRecord> {
        self.records.get(row)
    }

    pub fn records(&self) -> &[PenguinRecord] {
        &self.records
    }

    /// The `species` column.
    pub fn species_column(&self) -> Vec<Species> {
        self.records.iter().map(|r| r.species).collect()
    }

    /// The `island` column.
    pub fn island_column(&self) -> Vec<Island> {
        self.records.iter().map(|r| r.island).collect()
    }
}
