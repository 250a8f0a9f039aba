//! The JSON form of a model: an object keyed by material name, in deck
//! order, each holding an array of property objects tagged by `"property"`.

use indexmap::IndexMap;
use serde::de::Error as _;

use crate::cards::{MaterialProperty, PropertyRecord};
use crate::errors::InpError;
use crate::export::keyword::material_to_keyword_text;
use crate::material::{Material, MaterialModel};
use crate::parser::DeckParser;

/// Builds the JSON value for a model.
pub fn to_json_value(
  model: &MaterialModel
) -> Result<serde_json::Value, InpError> {
  let doc = model.iter()
    .map(|m| (m.name.as_str(), &m.properties))
    .collect::<IndexMap<_, _>>();
  return Ok(serde_json::to_value(doc)?);
}

/// Writes a model as pretty-printed JSON.
pub fn to_json(model: &MaterialModel) -> Result<String, InpError> {
  return Ok(serde_json::to_string_pretty(&to_json_value(model)?)?);
}

/// Error for a material whose records don't stand for a card.
fn invalid(material: &str, what: impl std::fmt::Display) -> InpError {
  return InpError::Json(serde_json::Error::custom(
    format!("material {}: {}", material, what)
  ));
}

/// Checks that a material read from JSON is one the parser could have made:
/// its keyword text must classify back into exactly the same records. This
/// catches rows of the wrong width and layouts that disagree with their
/// modifiers.
fn validate(mat: &Material) -> Result<(), InpError> {
  let text = material_to_keyword_text(mat);
  let again = DeckParser::parse_str(&text)
    .map_err(|e| invalid(&mat.name, e))?;
  let props = again.get(&mat.name)
    .map(|m| m.properties.as_slice())
    .unwrap_or_default();
  if props.len() != mat.properties.len() {
    return Err(invalid(&mat.name, format!(
      "{} properties read back as {}",
      mat.properties.len(),
      props.len()
    )));
  }
  for (prop, back) in mat.properties.iter().zip(props.iter()) {
    if prop != back {
      return Err(invalid(
        &mat.name,
        format!("*{} doesn't match its own modifiers and rows", prop.keyword())
      ));
    }
  }
  return Ok(());
}

/// Reads a model back from its JSON form. Every record is checked against
/// what its keyword text classifies into. Source lines are lost, so every
/// material gets line zero.
pub fn from_json(text: &str) -> Result<MaterialModel, InpError> {
  let doc: IndexMap<String, Vec<PropertyRecord>> = serde_json::from_str(text)?;
  let mut model = MaterialModel::new();
  for (name, properties) in doc {
    let mat = Material { name, line: 0, properties };
    validate(&mat)?;
    model.insert(mat)?;
  }
  return Ok(model);
}
