//! User subroutine data: `*USER MATERIAL` constants and the `*DEPVAR` count.
//! The constants are an opaque list; nothing here knows what they mean.

use serde::{Deserialize, Serialize};

use crate::blocks::{Modifiers, RawBlock};
use crate::cards::*;
use crate::errors::InpError;

/// Column name prefix for user material constants.
pub const CONSTANT_PREFIX: &str = "PROPS";

/// Constants handed to a user material subroutine.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserMaterial {
  /// The keyword modifiers. `CONSTANTS=` is the count.
  pub modifiers: Modifiers,
  /// The constants, in order.
  pub constants: Vec<f64>,
}

impl MaterialProperty for UserMaterial {
  fn card_type(&self) -> CardType {
    return CardType::UserMaterial;
  }

  fn modifiers(&self) -> &Modifiers {
    return &self.modifiers;
  }

  fn columns(&self) -> Vec<String> {
    return (1..=self.constants.len())
      .map(|i| format!("{}{}", CONSTANT_PREFIX, i))
      .collect();
  }

  fn flat_rows(&self) -> Vec<FlatRow> {
    if self.constants.is_empty() {
      return Vec::new();
    }
    return vec![
      self.columns()
        .into_iter()
        .zip(self.constants.iter().copied().map(DeckField::Real))
        .collect()
    ];
  }

  fn deck_rows(&self) -> Vec<Vec<DeckField>> {
    return self.constants
      .chunks(MAX_LINE_FIELDS)
      .map(|c| c.iter().copied().map(DeckField::Real).collect())
      .collect();
  }

  fn visit_fields_mut(&mut self, f: &mut FieldVisitor<'_>) -> Result<(), InpError> {
    for (i, x) in self.constants.iter_mut().enumerate() {
      let col = format!("{}{}", CONSTANT_PREFIX, i + 1);
      f(col.as_str(), x)?;
    }
    return Ok(());
  }
}

/// The number of solution-dependent state variables.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Depvar {
  /// The keyword modifiers.
  pub modifiers: Modifiers,
  /// How many state variables.
  pub count: usize,
}

impl MaterialProperty for Depvar {
  fn card_type(&self) -> CardType {
    return CardType::Depvar;
  }

  fn modifiers(&self) -> &Modifiers {
    return &self.modifiers;
  }

  fn columns(&self) -> Vec<String> {
    return owned_columns(&["COUNT"]);
  }

  fn flat_rows(&self) -> Vec<FlatRow> {
    return vec![vec![
      ("COUNT".to_owned(), DeckField::Integer(self.count as i64))
    ]];
  }

  fn deck_rows(&self) -> Vec<Vec<DeckField>> {
    return vec![vec![DeckField::Integer(self.count as i64)]];
  }

  fn visit_fields_mut(&mut self, _f: &mut FieldVisitor<'_>) -> Result<(), InpError> {
    // a count has no unit
    return Ok(());
  }
}

/// Classifies a `*USER MATERIAL` block. The number of values over all rows
/// must match `CONSTANTS=`.
pub fn classify_user_material(
  block: &RawBlock
) -> Result<PropertyRecord, InpError> {
  let expected = match block.modifiers.get("CONSTANTS") {
    None => 0,
    Some(s) => s.trim().parse::<usize>()
      .map_err(|_| unsupported(block, format!("CONSTANTS={}", s)))?,
  };
  let mut constants: Vec<f64> = Vec::with_capacity(expected);
  for row in block.rows.iter() {
    constants.extend(decode_row(block, row)?);
  }
  if constants.len() != expected {
    let line = block.rows.first().map(|r| r.line).unwrap_or(block.line);
    return Err(arity(
      block,
      line,
      format!("{} constants in total", expected),
      constants.len()
    ));
  }
  return Ok(UserMaterial {
    modifiers: block.modifiers.clone(),
    constants,
  }.into());
}

/// Classifies a `*DEPVAR` block: a single row with a single count.
pub fn classify_depvar(block: &RawBlock) -> Result<PropertyRecord, InpError> {
  let row = match block.rows.as_slice() {
    [row] => row,
    [] => return Err(arity(block, block.line, "1", 0)),
    [_, extra, ..] => return Err(arity(block, extra.line, "1 row", block.rows.len())),
  };
  let text = match row.fields.as_slice() {
    [text] => text,
    _ => return Err(arity(block, row.line, "1", row.fields.len())),
  };
  let count = text.trim().parse::<usize>().map_err(|_| InpError::InvalidNumber {
    line: row.line,
    material: None,
    keyword: block.keyword.clone(),
    text: text.to_owned(),
  })?;
  return Ok(Depvar { modifiers: block.modifiers.clone(), count }.into());
}
