//! The `*VISCOELASTIC` card, time domain, as a Prony series.

use serde::{Deserialize, Serialize};

use crate::blocks::{Modifiers, RawBlock};
use crate::cards::*;
use crate::errors::InpError;

/// Columns of a Prony term: shear and bulk relaxation moduli ratios, and the
/// relaxation time.
const PRONY_COLUMNS: &[&str] = &["G", "K", "TAU"];

/// Viscoelastic properties, one Prony term per row.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Viscoelastic {
  /// The keyword modifiers.
  pub modifiers: Modifiers,
  /// The Prony terms.
  pub rows: Vec<DataRow>,
}

impl MaterialProperty for Viscoelastic {
  fn card_type(&self) -> CardType {
    return CardType::Viscoelastic;
  }

  fn modifiers(&self) -> &Modifiers {
    return &self.modifiers;
  }

  fn columns(&self) -> Vec<String> {
    return owned_columns(PRONY_COLUMNS);
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

/// Classifies a `*VISCOELASTIC` block. Only `TIME=PRONY` is understood.
pub fn classify(block: &RawBlock) -> Result<PropertyRecord, InpError> {
  if block.modifiers.has("FREQUENCY") {
    return Err(unsupported(block, "FREQUENCY domain"));
  }
  let time = choice(block, "TIME", "");
  if time != "PRONY" {
    let variant = if time.is_empty() {
      "no TIME=".to_owned()
    } else {
      format!("TIME={}", time)
    };
    return Err(unsupported(block, variant));
  }
  let rows = decode_table(block, PRONY_COLUMNS.len(), false)?;
  return Ok(Viscoelastic { modifiers: block.modifiers.clone(), rows }.into());
}
