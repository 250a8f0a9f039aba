//! This module implements the typed property records that keyword blocks
//! inside a material are classified into, along with the helpers the
//! classifiers share.
//!
//! Each card family lives in its own submodule with a `classify` function;
//! `types` ties keyword names to card types and their classifiers. Adding a
//! card means adding a submodule, a `PropertyRecord` variant and a line in
//! the `gen_card_types!` invocation.

pub mod damage;
pub mod damping;
pub mod elastic;
pub mod hyperelastic;
pub mod plastic;
pub mod thermal;
pub mod types;
pub mod unparsed;
pub mod user;
pub mod viscoelastic;

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::blocks::{approx_eq_f64, Modifiers, RawBlock, RawRow};
use crate::errors::InpError;
use crate::util::{decode_inpfloat, fmt_inpfloat};

pub use damage::{Criterion, DamageEvolution, DamageInitiation, EvolutionType};
pub use damping::{Damping, RateDependent};
pub use elastic::{Elastic, ElasticType};
pub use hyperelastic::{Hyperelastic, HyperelasticModel};
pub use plastic::{Hardening, Plastic, PlasticTable, RateGroup};
pub use thermal::{Conductivity, Density, Directionality, Expansion};
pub use thermal::SpecificHeat;
pub use types::CardType;
pub use unparsed::Unparsed;
pub use user::{Depvar, UserMaterial};
pub use viscoelastic::Viscoelastic;

/// Widest a physical data line gets in a deck.
pub const MAX_LINE_FIELDS: usize = 8;

/// Column name for the optional temperature.
pub const TEMPERATURE_COLUMN: &str = "TEMP";

/// Column name prefix for field variables.
pub const FIELD_VARIABLE_PREFIX: &str = "FV";

/// One typed row of a tabular card.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct DataRow {
  /// The values for the card's base columns.
  pub values: Vec<f64>,
  /// The temperature this row applies at, if given.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub temperature: Option<f64>,
  /// Field variable values, if given.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub field_variables: Vec<f64>,
}

impl DataRow {
  /// A row with only base values.
  pub fn plain(values: Vec<f64>) -> Self {
    return Self { values, ..Default::default() };
  }

  /// Splits decoded fields into base values, temperature and field variables.
  pub fn from_fields(mut fields: Vec<f64>, base: usize) -> Self {
    let mut extras = fields.split_off(base.min(fields.len())).into_iter();
    let temperature = extras.next();
    return Self {
      values: fields,
      temperature,
      field_variables: extras.collect(),
    };
  }

  /// All the fields, in deck order.
  pub fn fields(&self) -> Vec<f64> {
    return self.values.iter()
      .chain(self.temperature.iter())
      .chain(self.field_variables.iter())
      .copied()
      .collect();
  }

  /// Column names for this row, given the base ones.
  pub fn column_names(&self, base: &[String]) -> Vec<String> {
    let mut names = base.to_vec();
    if self.temperature.is_some() {
      names.push(TEMPERATURE_COLUMN.to_owned());
    }
    for i in 1..=self.field_variables.len() {
      names.push(format!("{}{}", FIELD_VARIABLE_PREFIX, i));
    }
    return names;
  }
}

/// A single value as it goes on a deck or into a table.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum DeckField {
  /// A real number.
  Real(f64),
  /// An integer.
  Integer(i64),
  /// Text we didn't interpret.
  Text(String),
}

impl Display for DeckField {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    return match self {
      Self::Real(x) => write!(f, "{}", fmt_inpfloat(*x)),
      Self::Integer(i) => write!(f, "{}", i),
      Self::Text(s) => write!(f, "{}", s),
    };
  }
}

impl DeckField {
  /// Compares two fields, reals with a relative tolerance.
  pub fn approx_eq(&self, other: &Self, rel_tol: f64) -> bool {
    return match (self, other) {
      (Self::Real(a), Self::Real(b)) => approx_eq_f64(*a, *b, rel_tol),
      _ => self == other,
    };
  }
}

/// A row for a flat table: column names paired with values.
pub type FlatRow = Vec<(String, DeckField)>;

/// Callback that gets to see (and change) every numeric field of a property,
/// along with its column name.
pub type FieldVisitor<'a> = dyn FnMut(&str, &mut f64) -> Result<(), InpError> + 'a;

/// The capabilities every material property has, whatever its card.
pub trait MaterialProperty {
  /// The card type this came from.
  fn card_type(&self) -> CardType;

  /// The modifiers as they go on the keyword line.
  fn modifiers(&self) -> &Modifiers;

  /// The keyword, without the star.
  fn keyword(&self) -> String {
    return self.card_type().keyword().to_owned();
  }

  /// The names of the base columns of this property's data.
  fn columns(&self) -> Vec<String>;

  /// The columns a row may carry after the base ones: a temperature and the
  /// field variables. Empty for cards without them.
  fn optional_columns(&self) -> Vec<String> {
    return Vec::new();
  }

  /// The data as rows of named values, one per data row.
  fn flat_rows(&self) -> Vec<FlatRow>;

  /// The data rows as they'd be written on a deck.
  fn deck_rows(&self) -> Vec<Vec<DeckField>>;

  /// Visits every numeric field mutably.
  fn visit_fields_mut(&mut self, f: &mut FieldVisitor<'_>) -> Result<(), InpError>;
}

/// A classified keyword block.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, derive_more::From)]
#[serde(tag = "property", rename_all = "snake_case")]
pub enum PropertyRecord {
  /// `*ELASTIC`
  Elastic(Elastic),
  /// `*PLASTIC`
  Plastic(Plastic),
  /// `*DENSITY`
  Density(Density),
  /// `*CONDUCTIVITY`
  Conductivity(Conductivity),
  /// `*SPECIFIC HEAT`
  SpecificHeat(SpecificHeat),
  /// `*EXPANSION`
  Expansion(Expansion),
  /// `*DAMPING`
  Damping(Damping),
  /// `*HYPERELASTIC`
  Hyperelastic(Hyperelastic),
  /// `*VISCOELASTIC`
  Viscoelastic(Viscoelastic),
  /// `*RATE DEPENDENT`
  RateDependent(RateDependent),
  /// `*USER MATERIAL`
  UserMaterial(UserMaterial),
  /// `*DEPVAR`
  Depvar(Depvar),
  /// `*DAMAGE INITIATION`
  DamageInitiation(DamageInitiation),
  /// `*DAMAGE EVOLUTION`
  DamageEvolution(DamageEvolution),
  /// Any keyword we don't know, kept as text.
  Unparsed(Unparsed),
}

/// Implements `MaterialProperty` for `PropertyRecord` by delegation.
macro_rules! delegate_property {
  ($($v:ident),* $(,)?) => {
    impl MaterialProperty for PropertyRecord {
      fn card_type(&self) -> CardType {
        return match self { $(Self::$v(p) => p.card_type(),)* };
      }

      fn modifiers(&self) -> &Modifiers {
        return match self { $(Self::$v(p) => p.modifiers(),)* };
      }

      fn keyword(&self) -> String {
        return match self { $(Self::$v(p) => p.keyword(),)* };
      }

      fn columns(&self) -> Vec<String> {
        return match self { $(Self::$v(p) => p.columns(),)* };
      }

      fn optional_columns(&self) -> Vec<String> {
        return match self { $(Self::$v(p) => p.optional_columns(),)* };
      }

      fn flat_rows(&self) -> Vec<FlatRow> {
        return match self { $(Self::$v(p) => p.flat_rows(),)* };
      }

      fn deck_rows(&self) -> Vec<Vec<DeckField>> {
        return match self { $(Self::$v(p) => p.deck_rows(),)* };
      }

      fn visit_fields_mut(
        &mut self,
        f: &mut FieldVisitor<'_>
      ) -> Result<(), InpError> {
        return match self { $(Self::$v(p) => p.visit_fields_mut(f),)* };
      }
    }
  };
}

delegate_property!(
  Elastic,
  Plastic,
  Density,
  Conductivity,
  SpecificHeat,
  Expansion,
  Damping,
  Hyperelastic,
  Viscoelastic,
  RateDependent,
  UserMaterial,
  Depvar,
  DamageInitiation,
  DamageEvolution,
  Unparsed,
);

impl PropertyRecord {
  /// Classifies a raw block into a property record.
  pub fn classify(block: &RawBlock) -> Result<Self, InpError> {
    return CardType::from_keyword(&block.keyword).classify(block);
  }

  /// Compares two records: same card, same modifiers, same data within a
  /// relative tolerance.
  pub fn approx_eq(&self, other: &Self, rel_tol: f64) -> bool {
    if self.keyword() != other.keyword()
      || !self.modifiers().approx_eq(other.modifiers(), rel_tol) {
      return false;
    }
    let (ra, rb) = (self.flat_rows(), other.flat_rows());
    return ra.len() == rb.len() && ra.iter().zip(rb.iter()).all(|(a, b)| {
      a.len() == b.len() && a.iter().zip(b.iter()).all(|((ca, va), (cb, vb))| {
        ca == cb && va.approx_eq(vb, rel_tol)
      })
    });
  }
}

/// Turns static column names into owned ones.
pub(crate) fn owned_columns(names: &[&str]) -> Vec<String> {
  return names.iter().map(|s| s.to_string()).collect();
}

/// Error for a modifier combination a classifier can't handle.
pub(crate) fn unsupported(block: &RawBlock, variant: impl Into<String>) -> InpError {
  return InpError::UnsupportedCardVariant {
    line: block.line,
    material: None,
    keyword: block.keyword.clone(),
    variant: variant.into(),
  };
}

/// Error for a row (or a row set) with the wrong number of fields.
pub(crate) fn arity(
  block: &RawBlock,
  line: usize,
  expected: impl Into<String>,
  got: usize
) -> InpError {
  return InpError::RowArityMismatch {
    line,
    material: None,
    keyword: block.keyword.clone(),
    expected: expected.into(),
    got,
  };
}

/// Decodes a single field. Blank fields are zero.
pub(crate) fn decode_field(
  block: &RawBlock,
  line: usize,
  text: &str
) -> Result<f64, InpError> {
  if text.trim().is_empty() {
    return Ok(0.0);
  }
  return decode_inpfloat(text).ok_or_else(|| InpError::InvalidNumber {
    line,
    material: None,
    keyword: block.keyword.clone(),
    text: text.to_owned(),
  });
}

/// Decodes all fields of a row.
pub(crate) fn decode_row(block: &RawBlock, row: &RawRow) -> Result<Vec<f64>, InpError> {
  return row.fields.iter()
    .map(|f| decode_field(block, row.line, f))
    .collect();
}

/// Reads the `DEPENDENCIES=` modifier (number of field variables).
pub(crate) fn dependencies(block: &RawBlock) -> Result<usize, InpError> {
  return match block.modifiers.get("DEPENDENCIES") {
    None => Ok(0),
    Some(s) => s.trim().parse::<usize>()
      .map_err(|_| unsupported(block, format!("DEPENDENCIES={}", s))),
  };
}

/// The temperature column, then one column per field variable that
/// `DEPENDENCIES=` announces.
pub(crate) fn temperature_columns(modifiers: &Modifiers) -> Vec<String> {
  let deps = modifiers.get("DEPENDENCIES")
    .and_then(|s| s.trim().parse::<usize>().ok())
    .unwrap_or(0);
  return std::iter::once(TEMPERATURE_COLUMN.to_owned())
    .chain((1..=deps).map(|i| format!("{}{}", FIELD_VARIABLE_PREFIX, i)))
    .collect();
}

/// Reads a numeric modifier, if present.
pub(crate) fn modifier_number(
  block: &RawBlock,
  key: &str
) -> Result<Option<f64>, InpError> {
  return match block.modifiers.get(key) {
    None => Ok(None),
    Some(s) => decode_inpfloat(s).map(Some).ok_or_else(|| {
      InpError::InvalidNumber {
        line: block.line,
        material: None,
        keyword: block.keyword.clone(),
        text: s.to_owned(),
      }
    }),
  };
}

/// Reads a choice modifier, normalized, falling back to a default.
pub(crate) fn choice(block: &RawBlock, key: &str, default: &str) -> String {
  return block.modifiers.get(key)
    .map(crate::util::normalize_name)
    .unwrap_or_else(|| default.to_owned());
}

/// Fails if a block has data rows.
pub(crate) fn expect_no_rows(block: &RawBlock) -> Result<(), InpError> {
  if let Some(row) = block.rows.first() {
    return Err(arity(block, row.line, "no data lines", row.fields.len()));
  }
  return Ok(());
}

/// Fails if a block has modifiers besides the allowed ones.
pub(crate) fn only_modifiers(
  block: &RawBlock,
  allowed: &[&str]
) -> Result<(), InpError> {
  if let Some(k) = block.modifiers.keys().find(|k| !allowed.contains(k)) {
    return Err(unsupported(block, format!("unexpected modifier {}", k)));
  }
  return Ok(());
}

/// Decodes the rows of a tabular card with `base` columns. If
/// `with_temperature` is set, a temperature and as many field variables as
/// `DEPENDENCIES=` says may follow.
///
/// Layouts wider than a deck line put their temperature on a continuation
/// line, so for those a single physical line can't carry more than the base
/// columns.
pub(crate) fn decode_table(
  block: &RawBlock,
  base: usize,
  with_temperature: bool
) -> Result<Vec<DataRow>, InpError> {
  let max = if with_temperature {
    base + 1 + dependencies(block)?
  } else {
    base
  };
  let expected = if max == base {
    format!("{}", base)
  } else {
    format!("{} to {}", base, max)
  };
  if block.rows.is_empty() {
    return Err(arity(block, block.line, expected, 0));
  }
  let mut rows: Vec<DataRow> = Vec::with_capacity(block.rows.len());
  for row in block.rows.iter() {
    let n = row.fields.len();
    if n < base || n > max {
      return Err(arity(block, row.line, expected, n));
    }
    if base > MAX_LINE_FIELDS && n > base && row.first_width > base {
      return Err(arity(
        block,
        row.line,
        format!("{} on the first line, extras on a continuation", base),
        row.first_width
      ));
    }
    rows.push(DataRow::from_fields(decode_row(block, row)?, base));
  }
  return Ok(rows);
}

/// Flat rows for a table.
pub(crate) fn table_flat_rows(columns: &[String], rows: &[DataRow]) -> Vec<FlatRow> {
  return rows.iter().map(|row| {
    row.column_names(columns)
      .into_iter()
      .zip(row.fields().into_iter().map(DeckField::Real))
      .collect()
  }).collect();
}

/// Deck rows for a table.
pub(crate) fn table_deck_rows(rows: &[DataRow]) -> Vec<Vec<DeckField>> {
  return rows.iter()
    .map(|row| row.fields().into_iter().map(DeckField::Real).collect())
    .collect();
}

/// Visits every field of a table.
pub(crate) fn visit_table(
  columns: &[String],
  rows: &mut [DataRow],
  f: &mut FieldVisitor<'_>
) -> Result<(), InpError> {
  for row in rows.iter_mut() {
    for (col, x) in columns.iter().zip(row.values.iter_mut()) {
      f(col.as_str(), x)?;
    }
    if let Some(ref mut t) = row.temperature {
      f(TEMPERATURE_COLUMN, t)?;
    }
    for (i, fv) in row.field_variables.iter_mut().enumerate() {
      let col = format!("{}{}", FIELD_VARIABLE_PREFIX, i + 1);
      f(col.as_str(), fv)?;
    }
  }
  return Ok(());
}

/// Visits a numeric modifier and writes it back if it changed.
pub(crate) fn visit_modifier(
  modifiers: &mut Modifiers,
  key: &str,
  column: &str,
  f: &mut FieldVisitor<'_>
) -> Result<(), InpError> {
  if let Some(mut x) = modifiers.get(key).and_then(decode_inpfloat) {
    let before = x;
    f(column, &mut x)?;
    if x != before {
      modifiers.set(key, &fmt_inpfloat(x));
    }
  }
  return Ok(());
}
