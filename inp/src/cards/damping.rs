//! Cards whose data sits entirely in modifiers: `*DAMPING` and the power-law
//! `*RATE DEPENDENT`. Neither takes data lines.

use serde::{Deserialize, Serialize};

use crate::blocks::{Modifiers, RawBlock};
use crate::cards::*;
use crate::errors::InpError;

/// The damping coefficients, by modifier name.
const DAMPING_KEYS: &[&str] = &["ALPHA", "BETA", "COMPOSITE", "STRUCTURAL"];

/// Rayleigh and structural damping.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Damping {
  /// The keyword modifiers.
  pub modifiers: Modifiers,
  /// Mass-proportional Rayleigh damping.
  pub alpha: Option<f64>,
  /// Stiffness-proportional Rayleigh damping.
  pub beta: Option<f64>,
  /// Fraction of critical damping for composite modal damping.
  pub composite: Option<f64>,
  /// Structural (hysteretic) damping factor.
  pub structural: Option<f64>,
}

impl Damping {
  /// The coefficients that are present, by modifier name.
  fn present(&self) -> Vec<(&'static str, f64)> {
    return DAMPING_KEYS.iter()
      .copied()
      .zip([self.alpha, self.beta, self.composite, self.structural])
      .filter_map(|(k, v)| v.map(|x| (k, x)))
      .collect();
  }
}

impl MaterialProperty for Damping {
  fn card_type(&self) -> CardType {
    return CardType::Damping;
  }

  fn modifiers(&self) -> &Modifiers {
    return &self.modifiers;
  }

  fn columns(&self) -> Vec<String> {
    return owned_columns(DAMPING_KEYS);
  }

  fn flat_rows(&self) -> Vec<FlatRow> {
    return vec![
      self.present()
        .into_iter()
        .map(|(k, x)| (k.to_owned(), DeckField::Real(x)))
        .collect()
    ];
  }

  fn deck_rows(&self) -> Vec<Vec<DeckField>> {
    return Vec::new();
  }

  fn visit_fields_mut(&mut self, f: &mut FieldVisitor<'_>) -> Result<(), InpError> {
    let slots = [
      &mut self.alpha,
      &mut self.beta,
      &mut self.composite,
      &mut self.structural,
    ];
    for (key, slot) in DAMPING_KEYS.iter().copied().zip(slots) {
      if let Some(x) = slot.as_mut() {
        let before = *x;
        f(key, x)?;
        if *x != before {
          self.modifiers.set(key, &crate::util::fmt_inpfloat(*x));
        }
      }
    }
    return Ok(());
  }
}

/// Classifies a `*DAMPING` block.
pub fn classify_damping(block: &RawBlock) -> Result<PropertyRecord, InpError> {
  only_modifiers(block, DAMPING_KEYS)?;
  expect_no_rows(block)?;
  let damping = Damping {
    modifiers: block.modifiers.clone(),
    alpha: modifier_number(block, "ALPHA")?,
    beta: modifier_number(block, "BETA")?,
    composite: modifier_number(block, "COMPOSITE")?,
    structural: modifier_number(block, "STRUCTURAL")?,
  };
  if damping.present().is_empty() {
    return Err(unsupported(block, "no damping coefficient given"));
  }
  return Ok(damping.into());
}

/// Cowper-Symonds style power-law scaling of the yield stress with strain
/// rate: the ratio to static yield is `1 + (rate / multiplier)^(1/exponent)`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RateDependent {
  /// The keyword modifiers.
  pub modifiers: Modifiers,
  /// The rate multiplier (D).
  pub multiplier: f64,
  /// The exponent (n).
  pub exponent: f64,
}

impl MaterialProperty for RateDependent {
  fn card_type(&self) -> CardType {
    return CardType::RateDependent;
  }

  fn modifiers(&self) -> &Modifiers {
    return &self.modifiers;
  }

  fn columns(&self) -> Vec<String> {
    return owned_columns(&["MULTIPLIER", "EXPONENT"]);
  }

  fn flat_rows(&self) -> Vec<FlatRow> {
    return vec![vec![
      ("MULTIPLIER".to_owned(), DeckField::Real(self.multiplier)),
      ("EXPONENT".to_owned(), DeckField::Real(self.exponent)),
    ]];
  }

  fn deck_rows(&self) -> Vec<Vec<DeckField>> {
    return Vec::new();
  }

  fn visit_fields_mut(&mut self, f: &mut FieldVisitor<'_>) -> Result<(), InpError> {
    let slots = [
      ("MULTIPLIER", &mut self.multiplier),
      ("EXPONENT", &mut self.exponent),
    ];
    for (key, x) in slots {
      let before = *x;
      f(key, x)?;
      if *x != before {
        self.modifiers.set(key, &crate::util::fmt_inpfloat(*x));
      }
    }
    return Ok(());
  }
}

/// Classifies a `*RATE DEPENDENT` block.
pub fn classify_rate_dependent(
  block: &RawBlock
) -> Result<PropertyRecord, InpError> {
  let law = choice(block, "TYPE", "POWER LAW");
  if law != "POWER LAW" {
    return Err(unsupported(block, format!("TYPE={}", law)));
  }
  only_modifiers(block, &["TYPE", "MULTIPLIER", "EXPONENT"])?;
  expect_no_rows(block)?;
  let multiplier = modifier_number(block, "MULTIPLIER")?
    .ok_or_else(|| unsupported(block, "POWER LAW without MULTIPLIER"))?;
  let exponent = modifier_number(block, "EXPONENT")?
    .ok_or_else(|| unsupported(block, "POWER LAW without EXPONENT"))?;
  return Ok(RateDependent {
    modifiers: block.modifiers.clone(),
    multiplier,
    exponent,
  }.into());
}
