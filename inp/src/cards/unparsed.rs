//! Passthrough for keywords inside a material that we don't interpret. The
//! text is kept as written so it can be exported again unchanged.

use serde::{Deserialize, Serialize};

use crate::blocks::{Modifiers, RawBlock};
use crate::cards::*;
use crate::errors::InpError;
use crate::util::{decode_inpfloat, fmt_inpfloat};

/// Column name prefix for the fields of an unparsed row.
pub const FIELD_PREFIX: &str = "FIELD";

/// A keyword block kept as text.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Unparsed {
  /// The normalized keyword, without the star.
  pub keyword: String,
  /// The keyword modifiers.
  pub modifiers: Modifiers,
  /// The data rows, field by field.
  pub rows: Vec<Vec<String>>,
}

impl MaterialProperty for Unparsed {
  fn card_type(&self) -> CardType {
    return CardType::Unparsed;
  }

  fn modifiers(&self) -> &Modifiers {
    return &self.modifiers;
  }

  fn keyword(&self) -> String {
    return self.keyword.clone();
  }

  fn columns(&self) -> Vec<String> {
    let widest = self.rows.iter().map(|r| r.len()).max().unwrap_or(0);
    return (1..=widest).map(|i| format!("{}{}", FIELD_PREFIX, i)).collect();
  }

  fn flat_rows(&self) -> Vec<FlatRow> {
    return self.rows.iter().map(|row| {
      row.iter().enumerate().map(|(i, text)| {
        let value = match decode_inpfloat(text) {
          Some(x) => DeckField::Real(x),
          None => DeckField::Text(text.clone()),
        };
        (format!("{}{}", FIELD_PREFIX, i + 1), value)
      }).collect()
    }).collect();
  }

  fn deck_rows(&self) -> Vec<Vec<DeckField>> {
    return self.rows.iter()
      .map(|row| row.iter().cloned().map(DeckField::Text).collect())
      .collect();
  }

  fn visit_fields_mut(&mut self, f: &mut FieldVisitor<'_>) -> Result<(), InpError> {
    for row in self.rows.iter_mut() {
      for (i, text) in row.iter_mut().enumerate() {
        if let Some(mut x) = decode_inpfloat(text) {
          let before = x;
          let col = format!("{}{}", FIELD_PREFIX, i + 1);
          f(col.as_str(), &mut x)?;
          if x != before {
            *text = fmt_inpfloat(x);
          }
        }
      }
    }
    return Ok(());
  }
}

/// Keeps a block as it is.
pub fn classify(block: &RawBlock) -> Result<PropertyRecord, InpError> {
  return Ok(Unparsed {
    keyword: block.keyword.clone(),
    modifiers: block.modifiers.clone(),
    rows: block.rows.iter().map(|r| r.fields.clone()).collect(),
  }.into());
}
