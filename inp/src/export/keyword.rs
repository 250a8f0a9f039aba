//! Writes materials back as keyword text that reads in again to the same
//! model.

use itertools::Itertools;

use crate::blocks::Modifiers;
use crate::cards::*;
use crate::material::{Material, MaterialModel};

/// Writes the physical lines of one data row, breaking it every
/// `MAX_LINE_FIELDS` values with a trailing comma.
fn write_row(out: &mut String, row: &[DeckField]) {
  let mut chunks = row.chunks(MAX_LINE_FIELDS).peekable();
  while let Some(chunk) = chunks.next() {
    out.push_str(&chunk.iter().join(", "));
    if chunks.peek().is_some() {
      out.push(',');
    }
    out.push('\n');
  }
}

/// Writes the keyword line and data lines of one property.
pub fn property_to_keyword_text(prop: &PropertyRecord) -> String {
  let mut out = format!("*{}", prop.keyword());
  let mods = prop.modifiers();
  if !mods.is_empty() {
    out.push_str(", ");
    out.push_str(&mods.to_keyword_text());
  }
  out.push('\n');
  for row in prop.deck_rows() {
    write_row(&mut out, &row);
  }
  return out;
}

/// Writes one material: its `*MATERIAL` line and then every property.
pub fn material_to_keyword_text(mat: &Material) -> String {
  let mut name = Modifiers::new();
  name.set("NAME", &mat.name);
  let mut out = format!("*MATERIAL, {}\n", name.to_keyword_text());
  for prop in mat.properties.iter() {
    out.push_str(&property_to_keyword_text(prop));
  }
  return out;
}

/// Writes a whole model as keyword text.
pub fn to_keyword_text(model: &MaterialModel) -> String {
  return model.iter().map(material_to_keyword_text).collect();
}
