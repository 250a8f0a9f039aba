//! The `*PLASTIC` card. Column meaning depends on `HARDENING=`, and `RATE=`
//! turns the table into groups of rows keyed by strain rate.

use serde::{Deserialize, Serialize};

use crate::blocks::{Modifiers, RawBlock};
use crate::cards::*;
use crate::errors::InpError;

/// Column holding the strain rate of a rate group.
pub const RATE_COLUMN: &str = "RATE";

/// The hardening laws we know.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Hardening {
  /// Yield stress against plastic strain.
  Isotropic,
  /// Yield stress against back stress.
  Kinematic,
  /// Combined isotropic/kinematic, tabulated like isotropic.
  Combined,
  /// The Johnson-Cook analytical law.
  JohnsonCook,
}

impl Hardening {
  /// Decodes a normalized `HARDENING=` value.
  pub fn from_modifier(s: &str) -> Option<Self> {
    return match s {
      "ISOTROPIC" => Some(Self::Isotropic),
      "KINEMATIC" => Some(Self::Kinematic),
      "COMBINED" => Some(Self::Combined),
      "JOHNSON COOK" => Some(Self::JohnsonCook),
      _ => None,
    };
  }

  /// The base columns of a row under this law.
  pub const fn columns(&self) -> &'static [&'static str] {
    return match self {
      Self::Isotropic | Self::Combined => &["YIELD STRESS", "PLASTIC STRAIN"],
      Self::Kinematic => &["STRESS", "BACK STRESS"],
      Self::JohnsonCook => &["A", "B", "N", "M", "TMELT", "TTRANSITION"],
    };
  }
}

/// A group of rows sharing a strain rate.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RateGroup {
  /// The strain rate.
  pub rate: f64,
  /// The (stress, strain) points at that rate.
  pub points: Vec<DataRow>,
}

/// The data of a plastic card.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum PlasticTable {
  /// A plain table, rows possibly temperature-dependent.
  Tabular {
    /// The rows.
    rows: Vec<DataRow>,
  },
  /// Rows grouped by strain rate.
  RateGroups {
    /// The groups, in deck order.
    groups: Vec<RateGroup>,
  },
}

/// Plastic properties.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Plastic {
  /// The hardening law.
  pub hardening: Hardening,
  /// The keyword modifiers.
  pub modifiers: Modifiers,
  /// The data.
  pub table: PlasticTable,
}

impl MaterialProperty for Plastic {
  fn card_type(&self) -> CardType {
    return CardType::Plastic;
  }

  fn modifiers(&self) -> &Modifiers {
    return &self.modifiers;
  }

  fn columns(&self) -> Vec<String> {
    let mut columns = owned_columns(self.hardening.columns());
    if matches!(self.table, PlasticTable::RateGroups { .. }) {
      columns.push(RATE_COLUMN.to_owned());
    }
    return columns;
  }

  fn optional_columns(&self) -> Vec<String> {
    let tabular = matches!(self.table, PlasticTable::Tabular { .. });
    if !tabular || self.hardening == Hardening::JohnsonCook {
      return Vec::new();
    }
    return temperature_columns(&self.modifiers);
  }

  fn flat_rows(&self) -> Vec<FlatRow> {
    let columns = self.columns();
    return match &self.table {
      PlasticTable::Tabular { rows } => table_flat_rows(&columns, rows),
      PlasticTable::RateGroups { groups } => groups.iter()
        .flat_map(|g| g.points.iter().map(move |p| (g.rate, p)))
        .map(|(rate, p)| {
          columns.iter()
            .cloned()
            .zip(p.values.iter().copied().chain([rate]).map(DeckField::Real))
            .collect::<FlatRow>()
        })
        .collect(),
    };
  }

  fn deck_rows(&self) -> Vec<Vec<DeckField>> {
    return match &self.table {
      PlasticTable::Tabular { rows } => table_deck_rows(rows),
      // the rate only goes on the first row of each group
      PlasticTable::RateGroups { groups } => groups.iter()
        .flat_map(|g| g.points.iter().enumerate().map(move |(i, p)| {
          let rate = if i == 0 { Some(g.rate) } else { None };
          p.values.iter()
            .copied()
            .chain(rate)
            .map(DeckField::Real)
            .collect::<Vec<_>>()
        }))
        .collect(),
    };
  }

  fn visit_fields_mut(&mut self, f: &mut FieldVisitor<'_>) -> Result<(), InpError> {
    let base = owned_columns(self.hardening.columns());
    match &mut self.table {
      PlasticTable::Tabular { rows } => visit_table(&base, rows, f)?,
      PlasticTable::RateGroups { groups } => {
        for group in groups.iter_mut() {
          f(RATE_COLUMN, &mut group.rate)?;
          visit_table(&base, &mut group.points, f)?;
        }
      },
    };
    return visit_modifier(&mut self.modifiers, "RATE", RATE_COLUMN, f);
  }
}

/// Groups the rows of a `RATE=` block. A row with a third field starts a
/// group at that rate (unless it repeats the current one); two-field rows
/// join the latest group. A numeric `RATE=` value opens the first group when
/// the first row doesn't.
fn decode_rate_groups(block: &RawBlock) -> Result<Vec<RateGroup>, InpError> {
  // a bare RATE flag carries no value
  let initial = match block.modifiers.get("RATE") {
    Some("") | None => None,
    Some(_) => modifier_number(block, "RATE")?,
  };
  let mut groups: Vec<RateGroup> = Vec::new();
  if block.rows.is_empty() {
    return Err(arity(block, block.line, "2 or 3", 0));
  }
  for row in block.rows.iter() {
    let fields = decode_row(block, row)?;
    let (point, rate) = match fields.as_slice() {
      [s, e] => (DataRow::plain(vec![*s, *e]), None),
      [s, e, r] => (DataRow::plain(vec![*s, *e]), Some(*r)),
      _ => return Err(arity(block, row.line, "2 or 3", fields.len())),
    };
    let current = groups.last().map(|g| g.rate);
    match (rate, current) {
      (Some(r), Some(c)) if r == c => {},
      (Some(r), _) => groups.push(RateGroup { rate: r, points: Vec::new() }),
      (None, Some(_)) => {},
      (None, None) => match initial {
        Some(r) => groups.push(RateGroup { rate: r, points: Vec::new() }),
        None => return Err(arity(
          block,
          row.line,
          "3 (stress, strain, rate) to open a rate group",
          fields.len()
        )),
      },
    };
    if let Some(g) = groups.last_mut() {
      g.points.push(point);
    }
  }
  return Ok(groups);
}

/// The modifiers a `*PLASTIC` block may carry. Anything else (parameter
/// input, backstress counts, scaling) changes what the rows mean.
const PLASTIC_MODIFIERS: &[&str] = &["HARDENING", "RATE", "DEPENDENCIES", "DATATYPE"];

/// Classifies a `*PLASTIC` block.
pub fn classify(block: &RawBlock) -> Result<PropertyRecord, InpError> {
  only_modifiers(block, PLASTIC_MODIFIERS)?;
  let datatype = choice(block, "DATATYPE", "HALF CYCLE");
  if datatype != "HALF CYCLE" {
    return Err(unsupported(block, format!("DATATYPE={}", datatype)));
  }
  let hname = choice(block, "HARDENING", "ISOTROPIC");
  let hardening = Hardening::from_modifier(&hname)
    .ok_or_else(|| unsupported(block, format!("HARDENING={}", hname)))?;
  let table = if block.modifiers.has("RATE") {
    if hardening == Hardening::JohnsonCook {
      return Err(unsupported(block, "HARDENING=JOHNSON COOK with RATE"));
    }
    PlasticTable::RateGroups { groups: decode_rate_groups(block)? }
  } else {
    let temps = hardening != Hardening::JohnsonCook;
    let rows = decode_table(block, hardening.columns().len(), temps)?;
    PlasticTable::Tabular { rows }
  };
  return Ok(Plastic {
    hardening,
    modifiers: block.modifiers.clone(),
    table,
  }.into());
}
