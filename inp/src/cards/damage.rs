//! Progressive damage: `*DAMAGE INITIATION` and `*DAMAGE EVOLUTION`.

use serde::{Deserialize, Serialize};

use crate::blocks::{Modifiers, RawBlock};
use crate::cards::*;
use crate::errors::InpError;

/// The initiation criteria we know.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
  /// Equivalent plastic strain at onset against stress triaxiality.
  Ductile,
  /// Equivalent plastic strain at onset against the shear stress ratio.
  Shear,
  /// Maximum nominal stress.
  Maxs,
  /// Maximum nominal strain.
  Maxe,
}

impl Criterion {
  /// Decodes a normalized `CRITERION=` value.
  pub fn from_modifier(s: &str) -> Option<Self> {
    return match s {
      "DUCTILE" => Some(Self::Ductile),
      "SHEAR" => Some(Self::Shear),
      "MAXS" => Some(Self::Maxs),
      "MAXE" => Some(Self::Maxe),
      _ => None,
    };
  }

  /// The base columns of a row under this criterion.
  pub const fn columns(&self) -> &'static [&'static str] {
    return match self {
      Self::Ductile => &["PEEQ", "TRIAXIALITY", "RATE"],
      Self::Shear => &["PEEQ", "SHEAR RATIO", "RATE"],
      Self::Maxs => &["S1", "S2", "S3"],
      Self::Maxe => &["E1", "E2", "E3"],
    };
  }
}

/// What the evolution law is written in terms of.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EvolutionType {
  /// Effective displacement at failure.
  Displacement,
  /// Fracture energy.
  Energy,
}

impl EvolutionType {
  /// Decodes a normalized `TYPE=` value.
  pub fn from_modifier(s: &str) -> Option<Self> {
    return match s {
      "DISPLACEMENT" => Some(Self::Displacement),
      "ENERGY" => Some(Self::Energy),
      _ => None,
    };
  }

  /// The base columns of a row.
  pub const fn columns(&self) -> &'static [&'static str] {
    return match self {
      Self::Displacement => &["U"],
      Self::Energy => &["GF"],
    };
  }
}

/// A damage initiation criterion.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DamageInitiation {
  /// The criterion.
  pub criterion: Criterion,
  /// The keyword modifiers.
  pub modifiers: Modifiers,
  /// The criterion table.
  pub rows: Vec<DataRow>,
}

/// A damage evolution law.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DamageEvolution {
  /// Displacement or energy.
  pub kind: EvolutionType,
  /// The keyword modifiers.
  pub modifiers: Modifiers,
  /// The evolution table.
  pub rows: Vec<DataRow>,
}

impl MaterialProperty for DamageInitiation {
  fn card_type(&self) -> CardType {
    return CardType::DamageInitiation;
  }

  fn modifiers(&self) -> &Modifiers {
    return &self.modifiers;
  }

  fn columns(&self) -> Vec<String> {
    return owned_columns(self.criterion.columns());
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

impl MaterialProperty for DamageEvolution {
  fn card_type(&self) -> CardType {
    return CardType::DamageEvolution;
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

/// Classifies a `*DAMAGE INITIATION` block.
pub fn classify_initiation(
  block: &RawBlock
) -> Result<PropertyRecord, InpError> {
  let cname = choice(block, "CRITERION", "");
  let criterion = Criterion::from_modifier(&cname).ok_or_else(|| {
    if cname.is_empty() {
      unsupported(block, "no CRITERION=")
    } else {
      unsupported(block, format!("CRITERION={}", cname))
    }
  })?;
  let rows = decode_table(block, criterion.columns().len(), true)?;
  return Ok(DamageInitiation {
    criterion,
    modifiers: block.modifiers.clone(),
    rows,
  }.into());
}

/// Classifies a `*DAMAGE EVOLUTION` block. Only linear softening has a fixed
/// layout.
pub fn classify_evolution(
  block: &RawBlock
) -> Result<PropertyRecord, InpError> {
  let tname = choice(block, "TYPE", "DISPLACEMENT");
  let kind = EvolutionType::from_modifier(&tname)
    .ok_or_else(|| unsupported(block, format!("TYPE={}", tname)))?;
  let softening = choice(block, "SOFTENING", "LINEAR");
  if softening != "LINEAR" {
    return Err(unsupported(block, format!("SOFTENING={}", softening)));
  }
  let rows = decode_table(block, kind.columns().len(), true)?;
  return Ok(DamageEvolution {
    kind,
    modifiers: block.modifiers.clone(),
    rows,
  }.into());
}
