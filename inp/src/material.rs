//! This module implements the material model: named materials holding their
//! classified property records, in deck order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::blocks::MaterialBlock;
use crate::cards::*;
use crate::errors::InpError;
use crate::util::normalize_name;

/// A material and its properties.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Material {
  /// The name, as written.
  pub name: String,
  /// Line of the `*MATERIAL` keyword (zero if not read from a deck).
  pub line: usize,
  /// The properties, in deck order.
  pub properties: Vec<PropertyRecord>,
}

impl Material {
  /// Instantiates an empty material.
  pub fn new(name: impl Into<String>) -> Self {
    return Self { name: name.into(), line: 0, properties: Vec::new() };
  }

  /// Classifies every block of an assembled material block.
  pub fn classify(mb: &MaterialBlock) -> Result<Self, InpError> {
    let properties = mb.blocks.iter()
      .map(|b| PropertyRecord::classify(b).map_err(|e| e.in_material(&mb.name)))
      .collect::<Result<Vec<_>, _>>()?;
    return Ok(Self { name: mb.name.clone(), line: mb.line, properties });
  }

  /// Returns the properties of a given card type.
  pub fn properties_of(
    &self,
    ct: CardType
  ) -> impl Iterator<Item = &PropertyRecord> {
    return self.properties.iter().filter(move |p| p.card_type() == ct);
  }

  /// Compares names case-insensitively and properties within a relative
  /// tolerance. Source lines are ignored.
  pub fn approx_eq(&self, other: &Self, rel_tol: f64) -> bool {
    return normalize_name(&self.name) == normalize_name(&other.name)
      && self.properties.len() == other.properties.len()
      && self.properties.iter()
        .zip(other.properties.iter())
        .all(|(a, b)| a.approx_eq(b, rel_tol));
  }
}

/// All the materials of a deck, keyed by normalized name, in deck order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MaterialModel {
  /// The materials.
  materials: IndexMap<String, Material>,
}

impl MaterialModel {
  /// Instantiates an empty model.
  pub fn new() -> Self {
    return Self::default();
  }

  /// Adds a material. Fails if the name is taken.
  pub fn insert(&mut self, mat: Material) -> Result<(), InpError> {
    let key = normalize_name(&mat.name);
    if let Some(first) = self.materials.get(&key) {
      return Err(InpError::DuplicateMaterialName {
        name: mat.name,
        line: mat.line,
        first_line: first.line,
      });
    }
    self.materials.insert(key, mat);
    return Ok(());
  }

  /// Finds a material by name, case-insensitively.
  pub fn get(&self, name: &str) -> Option<&Material> {
    return self.materials.get(&normalize_name(name));
  }

  /// Iterates over the materials in deck order.
  pub fn iter(&self) -> impl Iterator<Item = &Material> {
    return self.materials.values();
  }

  /// Iterates mutably over the materials in deck order.
  pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Material> {
    return self.materials.values_mut();
  }

  /// The names of the materials, as written.
  pub fn names(&self) -> Vec<&str> {
    return self.iter().map(|m| m.name.as_str()).collect();
  }

  /// Number of materials.
  pub fn len(&self) -> usize {
    return self.materials.len();
  }

  /// Whether there are no materials.
  pub fn is_empty(&self) -> bool {
    return self.materials.is_empty();
  }

  /// Total number of property records.
  pub fn total_properties(&self) -> usize {
    return self.iter().map(|m| m.properties.len()).sum();
  }

  /// Compares two models material by material, in order.
  pub fn approx_eq(&self, other: &Self, rel_tol: f64) -> bool {
    return self.len() == other.len()
      && self.iter().zip(other.iter()).all(|(a, b)| a.approx_eq(b, rel_tol));
  }
}

impl<'a> IntoIterator for &'a MaterialModel {
  type Item = &'a Material;
  type IntoIter = indexmap::map::Values<'a, String, Material>;

  fn into_iter(self) -> Self::IntoIter {
    return self.materials.values();
  }
}
