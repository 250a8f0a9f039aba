//! This submodule implements the general layout of material CSV files.
//!
//! Every record starts with the same leading columns, followed by the named
//! value columns of the property's data row. Different cards have different
//! value columns, so records vary in width and a header goes out whenever
//! the column set changes.

use std::fmt::Display;

use inp::prelude::*;
use serde::{Deserialize, Serialize};

/// The columns every record starts with.
pub const LEADING_HEADERS: [&str; 4] = ["material", "property", "modifiers", "row"];

/// The kinds of CSV fields we write.
#[derive(
  Clone, Debug, Serialize, Deserialize, PartialEq, PartialOrd,
  derive_more::From
)]
pub enum CsvField {
  /// A blank field.
  Blank,
  /// An integer.
  Integer(i64),
  /// A natural number.
  Natural(usize),
  /// A real number.
  Real(f64),
  /// An alloc'd string.
  String(String),
}

impl From<DeckField> for CsvField {
  fn from(value: DeckField) -> Self {
    return match value {
      DeckField::Real(x) => Self::Real(x),
      DeckField::Integer(i) => Self::Integer(i),
      DeckField::Text(s) if s.is_empty() => Self::Blank,
      DeckField::Text(s) => Self::String(s),
    };
  }
}

impl Display for CsvField {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    return match self {
      Self::Blank => write!(f, ""),
      Self::Integer(i) => i.fmt(f),
      Self::Natural(n) => n.fmt(f),
      Self::Real(x) => x.fmt(f),
      Self::String(s) => s.fmt(f),
    };
  }
}

/// A non-header line in a CSV file.
#[derive(Clone, Debug, Serialize)]
pub struct CsvRecord {
  /// Name of the material, as written.
  pub material: String,
  /// The keyword of the property.
  pub property: String,
  /// The modifiers as they'd go on the keyword line.
  pub modifiers: String,
  /// Index of the data row within the property, starting at 1. Zero for
  /// properties without rows.
  pub row: usize,
  /// Names of the value columns.
  pub columns: Vec<String>,
  /// The values.
  pub fields: Vec<CsvField>,
}

impl CsvRecord {
  /// Returns this as a sequence of fields, leading columns included.
  pub fn to_fields(self) -> impl Iterator<Item = CsvField> {
    return [
      CsvField::from(self.material),
      CsvField::from(self.property),
      CsvField::from(self.modifiers),
      CsvField::from(self.row),
    ].into_iter().chain(self.fields);
  }

  /// Returns this record's headers.
  pub fn header_as_iter(&self) -> impl Iterator<Item = &str> {
    return LEADING_HEADERS.into_iter()
      .chain(self.columns.iter().map(|s| s.as_str()));
  }
}
