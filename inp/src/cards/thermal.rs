//! The single-quantity cards: `*DENSITY`, `*SPECIFIC HEAT`, `*CONDUCTIVITY`
//! and `*EXPANSION`. The last two can be directional.

use serde::{Deserialize, Serialize};

use crate::blocks::{Modifiers, RawBlock};
use crate::cards::*;
use crate::errors::InpError;

/// How many directions a thermal quantity is given in.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Directionality {
  /// A single value.
  Iso,
  /// Three values, one per material direction.
  Ortho,
  /// Six values, a full symmetric tensor.
  Aniso,
}

impl Directionality {
  /// Decodes a normalized `TYPE=` value.
  pub fn from_modifier(s: &str) -> Option<Self> {
    return match s {
      "ISO" | "ISOTROPIC" => Some(Self::Iso),
      "ORTHO" | "ORTHOTROPIC" => Some(Self::Ortho),
      "ANISO" | "ANISOTROPIC" => Some(Self::Aniso),
      _ => None,
    };
  }

  /// Column names for a quantity with the given prefix.
  pub fn columns(&self, prefix: &str) -> Vec<String> {
    let suffixes: &[&str] = match self {
      Self::Iso => &[""],
      Self::Ortho => &["11", "22", "33"],
      Self::Aniso => &["11", "12", "22", "13", "23", "33"],
    };
    return suffixes.iter().map(|s| format!("{}{}", prefix, s)).collect();
  }

  /// Reads the `TYPE=` modifier of a block.
  fn of_block(block: &RawBlock) -> Result<Self, InpError> {
    let tname = choice(block, "TYPE", "ISO");
    return Self::from_modifier(&tname)
      .ok_or_else(|| unsupported(block, format!("TYPE={}", tname)));
  }
}

/// Mass density.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Density {
  /// The keyword modifiers.
  pub modifiers: Modifiers,
  /// The density points.
  pub rows: Vec<DataRow>,
}

/// Specific heat.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SpecificHeat {
  /// The keyword modifiers.
  pub modifiers: Modifiers,
  /// The specific heat points.
  pub rows: Vec<DataRow>,
}

/// Thermal conductivity.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Conductivity {
  /// How many directions.
  pub kind: Directionality,
  /// The keyword modifiers.
  pub modifiers: Modifiers,
  /// The conductivity points.
  pub rows: Vec<DataRow>,
}

/// Thermal expansion coefficients.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Expansion {
  /// How many directions.
  pub kind: Directionality,
  /// The keyword modifiers. `ZERO=` is the reference temperature.
  pub modifiers: Modifiers,
  /// The expansion points.
  pub rows: Vec<DataRow>,
}

/// Implements `MaterialProperty` for a card that's just a table.
macro_rules! impl_table_property {
  ($t:ty, $card:ident) => {
    impl MaterialProperty for $t {
      fn card_type(&self) -> CardType {
        return CardType::$card;
      }

      fn modifiers(&self) -> &Modifiers {
        return &self.modifiers;
      }

      fn columns(&self) -> Vec<String> {
        return self.column_names();
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

      fn visit_fields_mut(
        &mut self,
        f: &mut FieldVisitor<'_>
      ) -> Result<(), InpError> {
        let columns = self.columns();
        visit_table(&columns, &mut self.rows, f)?;
        return self.visit_extra_mut(f);
      }
    }
  };
}

impl Density {
  /// Column names.
  fn column_names(&self) -> Vec<String> {
    return owned_columns(&["RHO"]);
  }

  /// Nothing besides the table.
  fn visit_extra_mut(&mut self, _f: &mut FieldVisitor<'_>) -> Result<(), InpError> {
    return Ok(());
  }
}

impl SpecificHeat {
  /// Column names.
  fn column_names(&self) -> Vec<String> {
    return owned_columns(&["CP"]);
  }

  /// Nothing besides the table.
  fn visit_extra_mut(&mut self, _f: &mut FieldVisitor<'_>) -> Result<(), InpError> {
    return Ok(());
  }
}

impl Conductivity {
  /// Column names.
  fn column_names(&self) -> Vec<String> {
    return self.kind.columns("K");
  }

  /// Nothing besides the table.
  fn visit_extra_mut(&mut self, _f: &mut FieldVisitor<'_>) -> Result<(), InpError> {
    return Ok(());
  }
}

impl Expansion {
  /// Column names.
  fn column_names(&self) -> Vec<String> {
    return self.kind.columns("ALPHA");
  }

  /// The reference temperature lives in a modifier.
  fn visit_extra_mut(&mut self, f: &mut FieldVisitor<'_>) -> Result<(), InpError> {
    return visit_modifier(&mut self.modifiers, "ZERO", TEMPERATURE_COLUMN, f);
  }
}

impl_table_property!(Density, Density);
impl_table_property!(SpecificHeat, SpecificHeat);
impl_table_property!(Conductivity, Conductivity);
impl_table_property!(Expansion, Expansion);

/// Classifies a `*DENSITY` block.
pub fn classify_density(block: &RawBlock) -> Result<PropertyRecord, InpError> {
  let rows = decode_table(block, 1, true)?;
  return Ok(Density { modifiers: block.modifiers.clone(), rows }.into());
}

/// Classifies a `*SPECIFIC HEAT` block.
pub fn classify_specific_heat(
  block: &RawBlock
) -> Result<PropertyRecord, InpError> {
  let rows = decode_table(block, 1, true)?;
  return Ok(SpecificHeat { modifiers: block.modifiers.clone(), rows }.into());
}

/// Classifies a `*CONDUCTIVITY` block.
pub fn classify_conductivity(
  block: &RawBlock
) -> Result<PropertyRecord, InpError> {
  let kind = Directionality::of_block(block)?;
  let rows = decode_table(block, kind.columns("K").len(), true)?;
  return Ok(Conductivity {
    kind,
    modifiers: block.modifiers.clone(),
    rows,
  }.into());
}

/// Classifies an `*EXPANSION` block.
pub fn classify_expansion(block: &RawBlock) -> Result<PropertyRecord, InpError> {
  let kind = Directionality::of_block(block)?;
  modifier_number(block, "ZERO")?;
  let rows = decode_table(block, kind.columns("ALPHA").len(), true)?;
  return Ok(Expansion {
    kind,
    modifiers: block.modifiers.clone(),
    rows,
  }.into());
}
