//! The `*HYPERELASTIC` card. A model flag on the keyword line (and `N=` for
//! the series models) decides how many coefficients a row has and what they
//! are called.

use serde::{Deserialize, Serialize};

use crate::blocks::{Modifiers, RawBlock};
use crate::cards::*;
use crate::errors::InpError;

/// Highest series order accepted in `N=`.
pub const MAX_ORDER: usize = 6;

/// Modifiers with a value that leave the coefficient layout alone.
const VALUED_MODIFIERS: &[&str] = &["N", "DEPENDENCIES", "MODULI"];

/// Strain energy potentials.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum HyperelasticModel {
  /// C10, D1.
  NeoHooke,
  /// C10, C01, D1.
  MooneyRivlin,
  /// Three C_i0 and three D_i.
  Yeoh,
  /// MU, LAMBDAM, D.
  ArrudaBoyce,
  /// MU, LAMBDAM, A, BETA, D.
  VanDerWaals,
  /// MU_i and ALPHA_i pairs, then D_i.
  Ogden {
    /// Number of terms.
    order: usize
  },
  /// C_i0, then D_i.
  ReducedPolynomial {
    /// Number of terms.
    order: usize
  },
  /// All C_ij with i+j up to the order, then D_i.
  Polynomial {
    /// Highest i+j.
    order: usize
  },
}

impl HyperelasticModel {
  /// Decodes a model flag, compared with spaces and hyphens removed. Series
  /// models take the given order.
  fn from_flag(flag: &str, order: usize) -> Option<Self> {
    let compact: String = flag.chars()
      .filter(|c| !matches!(c, ' ' | '-'))
      .collect();
    return match compact.as_str() {
      "NEOHOOKE" => Some(Self::NeoHooke),
      "MOONEYRIVLIN" => Some(Self::MooneyRivlin),
      "YEOH" => Some(Self::Yeoh),
      "ARRUDABOYCE" => Some(Self::ArrudaBoyce),
      "VANDERWAALS" => Some(Self::VanDerWaals),
      "OGDEN" => Some(Self::Ogden { order }),
      "REDUCEDPOLYNOMIAL" => Some(Self::ReducedPolynomial { order }),
      "POLYNOMIAL" => Some(Self::Polynomial { order }),
      _ => None,
    };
  }

  /// The coefficient names, in deck order.
  pub fn columns(&self) -> Vec<String> {
    let d_terms = |n: usize| (1..=n).map(|i| format!("D{}", i));
    return match *self {
      Self::NeoHooke => owned_columns(&["C10", "D1"]),
      Self::MooneyRivlin => owned_columns(&["C10", "C01", "D1"]),
      Self::Yeoh => owned_columns(&["C10", "C20", "C30", "D1", "D2", "D3"]),
      Self::ArrudaBoyce => owned_columns(&["MU", "LAMBDAM", "D"]),
      Self::VanDerWaals => owned_columns(&["MU", "LAMBDAM", "A", "BETA", "D"]),
      Self::Ogden { order } => (1..=order)
        .flat_map(|i| [format!("MU{}", i), format!("ALPHA{}", i)])
        .chain(d_terms(order))
        .collect(),
      Self::ReducedPolynomial { order } => (1..=order)
        .map(|i| format!("C{}0", i))
        .chain(d_terms(order))
        .collect(),
      Self::Polynomial { order } => (1..=order)
        .flat_map(|k| (0..=k).map(move |j| format!("C{}{}", k - j, j)))
        .chain(d_terms(order))
        .collect(),
    };
  }
}

/// Hyperelastic properties.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Hyperelastic {
  /// The potential.
  pub model: HyperelasticModel,
  /// The keyword modifiers.
  pub modifiers: Modifiers,
  /// The coefficients, one row per temperature point.
  pub rows: Vec<DataRow>,
}

impl MaterialProperty for Hyperelastic {
  fn card_type(&self) -> CardType {
    return CardType::Hyperelastic;
  }

  fn modifiers(&self) -> &Modifiers {
    return &self.modifiers;
  }

  fn columns(&self) -> Vec<String> {
    return self.model.columns();
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

/// Classifies a `*HYPERELASTIC` block.
pub fn classify(block: &RawBlock) -> Result<PropertyRecord, InpError> {
  let order = match block.modifiers.get("N") {
    None => 1,
    Some(s) => match s.trim().parse::<usize>() {
      Ok(n) if (1..=MAX_ORDER).contains(&n) => n,
      _ => return Err(unsupported(block, format!("N={}", s))),
    },
  };
  let mut model: Option<HyperelasticModel> = None;
  for (key, value) in block.modifiers.iter() {
    if !value.is_empty() {
      if !VALUED_MODIFIERS.contains(&key) {
        return Err(unsupported(block, format!("{}={}", key, value)));
      }
      continue;
    }
    if key == "ISOTROPIC" {
      continue;
    }
    let Some(found) = HyperelasticModel::from_flag(key, order) else {
      return Err(unsupported(block, key));
    };
    if model.is_some() {
      return Err(unsupported(block, "more than one model flag"));
    }
    model = Some(found);
  }
  let model = model.unwrap_or(HyperelasticModel::Polynomial { order });
  let rows = decode_table(block, model.columns().len(), true)?;
  return Ok(Hyperelastic {
    model,
    modifiers: block.modifiers.clone(),
    rows,
  }.into());
}
