//! This module implements unit conversion between the consistent unit
//! systems decks are usually written in.
//!
//! Every numeric field is identified by its card type and column name. The
//! column's stem (the name without trailing digits, so `D1111` is `D` and
//! `MU2` is `MU`) is looked up in a static table to get its dimension, and
//! the dimension gives the scale factor between systems.

use std::fmt::Display;

use clap::ValueEnum;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::cards::*;
use crate::errors::InpError;
use crate::material::{Material, MaterialModel};

/// The physical dimension of a field.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DimensionTag {
  /// Stress, moduli.
  Pressure,
  /// Compliance, like the hyperelastic D terms.
  InversePressure,
  /// Mass per volume.
  Density,
  /// Length, displacement.
  Length,
  /// Time.
  Time,
  /// Strain rate, frequency.
  InverseTime,
  /// Temperature.
  Temperature,
  /// Energy.
  Energy,
  /// Energy per area.
  FractureEnergy,
  /// Power per length per temperature.
  ThermalConductivity,
  /// Energy per mass per temperature.
  SpecificHeat,
  /// Strain per temperature.
  ThermalExpansion,
  /// No unit.
  Dimensionless,
}

impl DimensionTag {
  /// Returns all the tags.
  pub const fn all() -> &'static [Self] {
    return &[
      Self::Pressure,
      Self::InversePressure,
      Self::Density,
      Self::Length,
      Self::Time,
      Self::InverseTime,
      Self::Temperature,
      Self::Energy,
      Self::FractureEnergy,
      Self::ThermalConductivity,
      Self::SpecificHeat,
      Self::ThermalExpansion,
      Self::Dimensionless,
    ];
  }
}

impl Display for DimensionTag {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    return write!(f, "{:?}", self);
  }
}

/// The unit systems we convert between.
#[derive(
  Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, ValueEnum
)]
pub enum UnitSystem {
  /// m, kg, s, Pa, J.
  #[value(name = "si")]
  Si,
  /// mm, tonne, s, MPa, mJ.
  #[value(name = "eng", alias = "engineering")]
  Engineering,
}

impl UnitSystem {
  /// Size of this system's unit for a dimension, in SI units.
  pub const fn unit_size(&self, tag: DimensionTag) -> f64 {
    return match self {
      Self::Si => 1.0,
      Self::Engineering => match tag {
        DimensionTag::Pressure => 1e6,
        DimensionTag::InversePressure => 1e-6,
        DimensionTag::Density => 1e12,
        DimensionTag::Length => 1e-3,
        DimensionTag::Energy => 1e-3,
        DimensionTag::FractureEnergy => 1e3,
        DimensionTag::SpecificHeat => 1e-6,
        DimensionTag::Time
        | DimensionTag::InverseTime
        | DimensionTag::Temperature
        | DimensionTag::ThermalConductivity
        | DimensionTag::ThermalExpansion
        | DimensionTag::Dimensionless => 1.0,
      },
    };
  }
}

impl Display for UnitSystem {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    return write!(f, "{}", match self {
      Self::Si => "SI (m, kg, s)",
      Self::Engineering => "engineering (mm, tonne, s)",
    });
  }
}

/// Dimensions by (card type, column stem). Temperatures and field variables
/// aren't here, they're the same for every card.
static DIMENSION_TABLE: &[(CardType, &str, DimensionTag)] = &[
  (CardType::Elastic, "E", DimensionTag::Pressure),
  (CardType::Elastic, "NU", DimensionTag::Dimensionless),
  (CardType::Elastic, "G", DimensionTag::Pressure),
  (CardType::Elastic, "D", DimensionTag::Pressure),
  (CardType::Plastic, "YIELD STRESS", DimensionTag::Pressure),
  (CardType::Plastic, "PLASTIC STRAIN", DimensionTag::Dimensionless),
  (CardType::Plastic, "STRESS", DimensionTag::Pressure),
  (CardType::Plastic, "BACK STRESS", DimensionTag::Pressure),
  (CardType::Plastic, "A", DimensionTag::Pressure),
  (CardType::Plastic, "B", DimensionTag::Pressure),
  (CardType::Plastic, "N", DimensionTag::Dimensionless),
  (CardType::Plastic, "M", DimensionTag::Dimensionless),
  (CardType::Plastic, "TMELT", DimensionTag::Temperature),
  (CardType::Plastic, "TTRANSITION", DimensionTag::Temperature),
  (CardType::Plastic, "RATE", DimensionTag::InverseTime),
  (CardType::Density, "RHO", DimensionTag::Density),
  (CardType::Conductivity, "K", DimensionTag::ThermalConductivity),
  (CardType::SpecificHeat, "CP", DimensionTag::SpecificHeat),
  (CardType::Expansion, "ALPHA", DimensionTag::ThermalExpansion),
  (CardType::Damping, "ALPHA", DimensionTag::InverseTime),
  (CardType::Damping, "BETA", DimensionTag::Time),
  (CardType::Damping, "COMPOSITE", DimensionTag::Dimensionless),
  (CardType::Damping, "STRUCTURAL", DimensionTag::Dimensionless),
  (CardType::Hyperelastic, "C", DimensionTag::Pressure),
  (CardType::Hyperelastic, "MU", DimensionTag::Pressure),
  (CardType::Hyperelastic, "D", DimensionTag::InversePressure),
  (CardType::Hyperelastic, "ALPHA", DimensionTag::Dimensionless),
  (CardType::Hyperelastic, "LAMBDAM", DimensionTag::Dimensionless),
  (CardType::Hyperelastic, "A", DimensionTag::Dimensionless),
  (CardType::Hyperelastic, "BETA", DimensionTag::Dimensionless),
  (CardType::Viscoelastic, "G", DimensionTag::Dimensionless),
  (CardType::Viscoelastic, "K", DimensionTag::Dimensionless),
  (CardType::Viscoelastic, "TAU", DimensionTag::Time),
  (CardType::RateDependent, "MULTIPLIER", DimensionTag::InverseTime),
  (CardType::RateDependent, "EXPONENT", DimensionTag::Dimensionless),
  (CardType::DamageInitiation, "PEEQ", DimensionTag::Dimensionless),
  (CardType::DamageInitiation, "TRIAXIALITY", DimensionTag::Dimensionless),
  (CardType::DamageInitiation, "SHEAR RATIO", DimensionTag::Dimensionless),
  (CardType::DamageInitiation, "RATE", DimensionTag::InverseTime),
  (CardType::DamageInitiation, "S", DimensionTag::Pressure),
  (CardType::DamageInitiation, "E", DimensionTag::Dimensionless),
  (CardType::DamageEvolution, "U", DimensionTag::Length),
  (CardType::DamageEvolution, "GF", DimensionTag::FractureEnergy),
];

/// Strips the trailing digits off a column name.
pub fn column_stem(column: &str) -> &str {
  return column.trim_end_matches(|c: char| c.is_ascii_digit());
}

/// Finds the dimension of a column of a card type.
pub fn lookup_dimension(card: CardType, column: &str) -> Option<DimensionTag> {
  let stem = column_stem(column);
  if stem == TEMPERATURE_COLUMN {
    return Some(DimensionTag::Temperature);
  }
  if stem == FIELD_VARIABLE_PREFIX {
    return Some(DimensionTag::Dimensionless);
  }
  return DIMENSION_TABLE.iter()
    .find(|(ct, s, _)| *ct == card && *s == stem)
    .map(|(_, _, tag)| *tag);
}

/// The factor a value of a dimension gets multiplied by to go between
/// systems.
pub fn factor(tag: DimensionTag, from: UnitSystem, to: UnitSystem) -> f64 {
  return from.unit_size(tag) / to.unit_size(tag);
}

/// Converts a single value.
pub fn convert_value(
  x: f64,
  tag: DimensionTag,
  from: UnitSystem,
  to: UnitSystem
) -> f64 {
  if from == to {
    return x;
  }
  // multiply first, dividing by the exact unit size rounds once
  return x * from.unit_size(tag) / to.unit_size(tag);
}

/// Converts a property record of a material, returning a new one.
pub fn convert_record(
  record: &PropertyRecord,
  material: &Material,
  from: UnitSystem,
  to: UnitSystem
) -> Result<PropertyRecord, InpError> {
  let mut out = record.clone();
  if from == to {
    return Ok(out);
  }
  let card = record.card_type();
  let keyword = record.keyword();
  out.visit_fields_mut(&mut |column: &str, x: &mut f64| -> Result<(), InpError> {
    let tag = lookup_dimension(card, column).ok_or_else(|| {
      InpError::UnknownDimension {
        line: (material.line > 0).then_some(material.line),
        material: material.name.clone(),
        keyword: keyword.clone(),
        column: column.to_owned(),
      }
    })?;
    *x = convert_value(*x, tag, from, to);
    return Ok(());
  })?;
  return Ok(out);
}

/// Converts every property of a material.
pub fn convert_material(
  mat: &Material,
  from: UnitSystem,
  to: UnitSystem
) -> Result<Material, InpError> {
  let properties = mat.properties.iter()
    .map(|p| convert_record(p, mat, from, to))
    .collect::<Result<Vec<_>, _>>()?;
  return Ok(Material { properties, ..mat.clone() });
}

/// Converts a whole model between unit systems. The input is left alone; a
/// conversion to the same system gives back an exact copy.
pub fn convert(
  model: &MaterialModel,
  from: UnitSystem,
  to: UnitSystem
) -> Result<MaterialModel, InpError> {
  let mut out = model.clone();
  if from == to {
    return Ok(out);
  }
  debug!("Converting {} materials from {} to {}.", model.len(), from, to);
  for mat in out.iter_mut() {
    *mat = convert_material(mat, from, to)?;
  }
  return Ok(out);
}

impl MaterialModel {
  /// Returns this model converted between unit systems.
  pub fn converted(
    &self,
    from: UnitSystem,
    to: UnitSystem
  ) -> Result<Self, InpError> {
    return convert(self, from, to);
  }
}
