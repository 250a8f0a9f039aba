//! This module implements facilities to customise the display of CsvFields.

use std::fmt::Write;

use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// This struct specifies how floats should be formatted.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, Args)]
pub struct FloatFormat {
  /// Specifies a fixed number of decimal places to display numbers with.
  ///
  /// If absent, the shortest form that reads back exactly is used.
  #[arg(long = "decimals")]
  pub dec_places: Option<usize>,
  /// Always use scientific notation.
  #[arg(long = "sci", verbatim_doc_comment)]
  pub scientific: bool,
  /// Use a capital 'E' for exponents instead of a small 'e'.
  #[arg(long = "big-e", verbatim_doc_comment)]
  pub big_e: bool,
}

impl FloatFormat {
  /// Writes an f64 into a formatter.
  pub fn fmt_f64<W: Write>(&self, f: &mut W, x: f64) -> std::fmt::Result {
    // plain decimals get unwieldy outside this range
    let tame = x == 0.0 || (1e-4..1e16).contains(&x.abs());
    let s = match (self.scientific || !tame, self.dec_places) {
      (false, None) => format!("{}", x),
      (false, Some(d)) => format!("{:.prec$}", x, prec = d),
      (true, None) => format!("{:e}", x),
      (true, Some(d)) => format!("{:.prec$e}", x, prec = d),
    };
    if self.big_e {
      return write!(f, "{}", s.replace('e', "E"));
    }
    return write!(f, "{}", s);
  }
}

/// What to do with blank values?
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, ValueEnum)]
#[clap(rename_all = "snake_case")]
pub enum BlankDisplay {
  /// Prints out a zero.
  Zero,
  /// Prints a dash.
  Dash,
  /// Prints nothing (empty field).
  #[default]
  Empty,
}

impl BlankDisplay {
  /// Returns the string that should be written.
  pub const fn fmt_str(&self) -> &'static str {
    return match self {
      Self::Zero => "0",
      Self::Dash => "-",
      Self::Empty => "",
    };
  }
}

/// Display/formatting options for CSV fields.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, Default, Args)]
pub struct CsvFormatting {
  /// Options for printing out real numbers.
  #[command(flatten)]
  pub reals: FloatFormat,
  /// What to print for blank fields?
  #[arg(short = 'B', long = "blanks", default_value = "empty")]
  pub blanks: BlankDisplay,
}

impl CsvFormatting {
  /// Turns a CSV field into a string using this formatter.
  pub fn to_string(&self, field: CsvField) -> String {
    return match field {
      CsvField::Blank => self.blanks.fmt_str().to_owned(),
      CsvField::Real(x) => {
        let mut buf = String::new();
        if self.reals.fmt_f64(&mut buf, x).is_err() {
          buf = x.to_string();
        }
        buf
      },
      CsvField::String(s) => s,
      _ => field.to_string(),
    };
  }
}
