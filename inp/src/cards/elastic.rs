//! The `*ELASTIC` card. The `TYPE=` modifier picks the column layout.

use serde::{Deserialize, Serialize};

use crate::blocks::{Modifiers, RawBlock};
use crate::cards::*;
use crate::errors::InpError;

/// Columns for isotropic elasticity.
const ISOTROPIC_COLUMNS: &[&str] = &["E", "NU"];

/// Columns for orthotropic elasticity (stiffness terms).
const ORTHOTROPIC_COLUMNS: &[&str] = &[
  "D1111", "D1122", "D2222", "D1133", "D2233", "D3333", "D1212", "D1313",
  "D2323",
];

/// Columns for orthotropic elasticity given as engineering constants.
const ENGINEERING_COLUMNS: &[&str] = &[
  "E1", "E2", "E3", "NU12", "NU13", "NU23", "G12", "G13", "G23",
];

/// Columns for plane-stress orthotropic elasticity.
const LAMINA_COLUMNS: &[&str] = &["E1", "E2", "NU12", "G12", "G13", "G23"];

/// Columns for fully anisotropic elasticity.
const ANISOTROPIC_COLUMNS: &[&str] = &[
  "D1111", "D1122", "D2222", "D1133", "D2233", "D3333", "D1112", "D2212",
  "D3312", "D1212", "D1113", "D2213", "D3313", "D1213", "D1313", "D1123",
  "D2223", "D3323", "D1223", "D1323", "D2323",
];

/// The kinds of elasticity.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ElasticType {
  /// Young's modulus and Poisson's ratio.
  Isotropic,
  /// Nine stiffness terms.
  Orthotropic,
  /// Nine engineering constants.
  EngineeringConstants,
  /// Six constants for plane stress.
  Lamina,
  /// The full 21-term stiffness.
  Anisotropic,
}

impl ElasticType {
  /// Decodes a normalized `TYPE=` value.
  pub fn from_modifier(s: &str) -> Option<Self> {
    return match s {
      "ISOTROPIC" | "ISO" => Some(Self::Isotropic),
      "ORTHOTROPIC" | "ORTHO" => Some(Self::Orthotropic),
      "ENGINEERING CONSTANTS" => Some(Self::EngineeringConstants),
      "LAMINA" => Some(Self::Lamina),
      "ANISOTROPIC" | "ANISO" => Some(Self::Anisotropic),
      _ => None,
    };
  }

  /// The names of the columns for this kind.
  pub const fn columns(&self) -> &'static [&'static str] {
    return match self {
      Self::Isotropic => ISOTROPIC_COLUMNS,
      Self::Orthotropic => ORTHOTROPIC_COLUMNS,
      Self::EngineeringConstants => ENGINEERING_COLUMNS,
      Self::Lamina => LAMINA_COLUMNS,
      Self::Anisotropic => ANISOTROPIC_COLUMNS,
    };
  }
}

/// Linear elastic properties.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Elastic {
  /// Which kind of elasticity.
  pub kind: ElasticType,
  /// The keyword modifiers.
  pub modifiers: Modifiers,
  /// One row per temperature/field-variable point.
  pub rows: Vec<DataRow>,
}

impl MaterialProperty for Elastic {
  fn card_type(&self) -> CardType {
    return CardType::Elastic;
  }

  fn modifiers(&self) -> &Modifiers {
    return &self.modifiers;
  }

  fn columns(&self) -> Vec<String> {
    return owned_columns(self.kind.columns());
  }

  fn optional_columns(&self) -> Vec<String> {
    return temperature_columns(&self.modifiers);
  }

  fn flat_rows(&self) -> Vec<FlatRow> {
    return table_flat_rows(&self.columns(), &self.rows);
  }

  fn deck_rows(&self) -> Vec<Vec<DeckField>> {
    return table_deck_rows(&self.rows);
  }

  fn visit_fields_mut(&mut self, f: &mut FieldVisitor<'_>) -> Result<(), InpError> {
    let columns = self.columns();
    return visit_table(&columns, &mut self.rows, f);
  }
}

/// Classifies an `*ELASTIC` block.
pub fn classify(block: &RawBlock) -> Result<PropertyRecord, InpError> {
  let tname = choice(block, "TYPE", "ISOTROPIC");
  let kind = ElasticType::from_modifier(&tname)
    .ok_or_else(|| unsupported(block, format!("TYPE={}", tname)))?;
  let rows = decode_table(block, kind.columns().len(), true)?;
  return Ok(Elastic { kind, modifiers: block.modifiers.clone(), rows }.into());
}
