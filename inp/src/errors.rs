//! This module contains the error type for everything that can go wrong while
//! reading, classifying, converting and exporting materials.

use std::error::Error;
use std::fmt::Display;
use std::io;

use serde::{Deserialize, Serialize};

/// The broad kind of an error, for callers that only want to report it.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ErrorKind {
  /// A line was misplaced or a continuation never ended.
  MalformedLine,
  /// A `*MATERIAL` keyword had no name.
  MissingName,
  /// Two materials shared a name.
  DuplicateMaterialName,
  /// A known card had a modifier combination we can't interpret.
  UnsupportedCardVariant,
  /// A data row had the wrong number of fields.
  RowArityMismatch,
  /// A field could not be decoded as a number.
  InvalidNumber,
  /// A field had no entry in the dimension table.
  UnknownDimension,
  /// Reading the deck failed.
  Io,
  /// A JSON document didn't describe a material model.
  Json,
}

/// Everything that can go wrong in this library.
#[derive(Debug)]
#[non_exhaustive]
pub enum InpError {
  /// Structural problem with a line: data before any keyword, or a
  /// continuation that runs into the end of the input.
  MalformedLine {
    /// Line number (1-based) of the offending line.
    line: usize,
    /// What was wrong.
    reason: String,
  },
  /// A `*MATERIAL` keyword without a `NAME=`.
  MissingName {
    /// Line number of the keyword.
    line: usize,
  },
  /// A material name that was already taken (case-insensitively).
  DuplicateMaterialName {
    /// The repeated name, as written the second time.
    name: String,
    /// Line of the second definition.
    line: usize,
    /// Line of the first definition.
    first_line: usize,
  },
  /// A known keyword whose modifiers select something we don't support.
  UnsupportedCardVariant {
    /// Line of the keyword.
    line: usize,
    /// Material the card belongs to, when known.
    material: Option<String>,
    /// The normalized keyword.
    keyword: String,
    /// Description of the modifier combination.
    variant: String,
  },
  /// A data row whose field count doesn't fit the card's layout.
  RowArityMismatch {
    /// Line of the data row.
    line: usize,
    /// Material the card belongs to, when known.
    material: Option<String>,
    /// The normalized keyword.
    keyword: String,
    /// What the layout allows, human-readable.
    expected: String,
    /// How many fields the row had.
    got: usize,
  },
  /// A field in a known card that isn't a number.
  InvalidNumber {
    /// Line of the data row.
    line: usize,
    /// Material the card belongs to, when known.
    material: Option<String>,
    /// The normalized keyword.
    keyword: String,
    /// The offending text.
    text: String,
  },
  /// A numeric field with no entry in the dimension table.
  UnknownDimension {
    /// Line of the material's `*MATERIAL` keyword, when it came from a deck.
    line: Option<usize>,
    /// The material holding the field.
    material: String,
    /// The keyword of the property holding the field.
    keyword: String,
    /// The column name of the field.
    column: String,
  },
  /// An I/O error while reading a deck.
  Io(io::Error),
  /// A JSON document that couldn't be read back.
  Json(serde_json::Error),
  /// Another error, tagged with the file it happened in.
  InFile {
    /// The file name.
    file: String,
    /// The actual error.
    error: Box<InpError>,
  },
}

impl InpError {
  /// Returns the kind of this error.
  pub fn kind(&self) -> ErrorKind {
    return match self {
      Self::MalformedLine { .. } => ErrorKind::MalformedLine,
      Self::MissingName { .. } => ErrorKind::MissingName,
      Self::DuplicateMaterialName { .. } => ErrorKind::DuplicateMaterialName,
      Self::UnsupportedCardVariant { .. } => {
        ErrorKind::UnsupportedCardVariant
      },
      Self::RowArityMismatch { .. } => ErrorKind::RowArityMismatch,
      Self::InvalidNumber { .. } => ErrorKind::InvalidNumber,
      Self::UnknownDimension { .. } => ErrorKind::UnknownDimension,
      Self::Io(_) => ErrorKind::Io,
      Self::Json(_) => ErrorKind::Json,
      Self::InFile { error, .. } => error.kind(),
    };
  }

  /// Returns the line this error points at, if any.
  pub fn line(&self) -> Option<usize> {
    return match self {
      Self::MalformedLine { line, .. }
      | Self::MissingName { line }
      | Self::DuplicateMaterialName { line, .. }
      | Self::UnsupportedCardVariant { line, .. }
      | Self::RowArityMismatch { line, .. }
      | Self::InvalidNumber { line, .. } => Some(*line),
      Self::UnknownDimension { line, .. } => *line,
      Self::InFile { error, .. } => error.line(),
      Self::Io(_) | Self::Json(_) => None,
    };
  }

  /// Fills in the material name for card-level errors that don't have one.
  pub fn in_material(mut self, name: &str) -> Self {
    match &mut self {
      Self::UnsupportedCardVariant { material, .. }
      | Self::RowArityMismatch { material, .. }
      | Self::InvalidNumber { material, .. } => {
        if material.is_none() {
          *material = Some(name.to_owned());
        }
      },
      _ => {}
    };
    return self;
  }

  /// Tags this error with a file name.
  pub fn in_file(self, file: &str) -> Self {
    return Self::InFile { file: file.to_owned(), error: Box::new(self) };
  }
}

/// Writes " in material X" if there is one.
fn fmt_material(
  f: &mut std::fmt::Formatter<'_>,
  material: &Option<String>
) -> std::fmt::Result {
  if let Some(m) = material {
    return write!(f, " in material {}", m);
  }
  return Ok(());
}

impl Display for InpError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    return match self {
      Self::MalformedLine { line, reason } => {
        write!(f, "line {}: malformed line: {}", line, reason)
      },
      Self::MissingName { line } => {
        write!(f, "line {}: *MATERIAL without a NAME", line)
      },
      Self::DuplicateMaterialName { name, line, first_line } => write!(
        f,
        "line {}: material {} was already defined on line {}",
        line,
        name,
        first_line
      ),
      Self::UnsupportedCardVariant { line, material, keyword, variant } => {
        write!(f, "line {}: unsupported *{} variant ({})", line, keyword, variant)?;
        fmt_material(f, material)
      },
      Self::RowArityMismatch { line, material, keyword, expected, got } => {
        write!(
          f,
          "line {}: *{} row has {} fields, expected {}",
          line,
          keyword,
          got,
          expected
        )?;
        fmt_material(f, material)
      },
      Self::InvalidNumber { line, material, keyword, text } => {
        write!(f, "line {}: \"{}\" in *{} is not a number", line, text, keyword)?;
        fmt_material(f, material)
      },
      Self::UnknownDimension { line, material, keyword, column } => {
        if let Some(l) = line {
          write!(f, "line {}: ", l)?;
        }
        write!(
          f,
          "no known dimension for column {} of *{} in material {}",
          column,
          keyword,
          material
        )
      },
      Self::Io(e) => e.fmt(f),
      Self::Json(e) => write!(f, "bad material JSON: {}", e),
      Self::InFile { file, error } => write!(f, "{}: {}", file, error),
    };
  }
}

impl Error for InpError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    return match self {
      Self::Io(e) => Some(e),
      Self::Json(e) => Some(e),
      Self::InFile { error, .. } => Some(error.as_ref()),
      _ => None,
    };
  }
}

impl From<io::Error> for InpError {
  fn from(value: io::Error) -> Self {
    return Self::Io(value);
  }
}

impl From<serde_json::Error> for InpError {
  fn from(value: serde_json::Error) -> Self {
    return Self::Json(value);
  }
}
