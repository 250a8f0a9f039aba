//! This module implements the block assembler, which groups logical lines
//! into `*MATERIAL` blocks, each holding the raw keyword blocks under it.

use std::collections::HashMap;

use indexmap::IndexMap;
use itertools::Itertools;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::errors::InpError;
use crate::lines::{LineKind, LogicalLine};
use crate::util::*;

/// Keywords that belong to the rest of the model. Seeing one closes the
/// current material.
const MODEL_KEYWORDS: &[&str] = &[
  "HEADING",
  "PREPRINT",
  "PHYSICAL CONSTANTS",
  "INCLUDE",
  "PART",
  "ASSEMBLY",
  "INSTANCE",
  "NODE",
  "ELEMENT",
  "NSET",
  "ELSET",
  "SURFACE",
  "SYSTEM",
  "TRANSFORM",
  "ORIENTATION",
  "SOLID SECTION",
  "SHELL SECTION",
  "BEAM SECTION",
  "MEMBRANE SECTION",
  "COHESIVE SECTION",
  "CONNECTOR SECTION",
  "SECTION CONTROLS",
  "EQUATION",
  "TIE",
  "CONTACT PAIR",
  "SURFACE INTERACTION",
  "AMPLITUDE",
  "BOUNDARY",
  "INITIAL CONDITIONS",
  "STEP",
];

/// Returns whether a normalized keyword belongs to the rest of the model.
pub fn is_model_keyword(keyword: &str) -> bool {
  return keyword.starts_with("END ") || MODEL_KEYWORDS.contains(&keyword);
}

/// The modifiers on a keyword line, in the order they were written. Names
/// are normalized; values keep their text. Flags have an empty value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Modifiers(IndexMap<String, String>);

impl Modifiers {
  /// Instantiates an empty set of modifiers.
  pub fn new() -> Self {
    return Self::default();
  }

  /// Parses the pieces that come after the keyword name on a keyword line.
  pub fn parse<S: AsRef<str>>(pieces: &[S]) -> Self {
    let mut mods = Self::new();
    for piece in pieces.iter().map(|p| p.as_ref().trim()) {
      if piece.is_empty() {
        continue;
      }
      match piece.split_once('=') {
        Some((k, v)) => mods.set(k, unquote(v)),
        None => mods.set(piece, ""),
      };
    }
    return mods;
  }

  /// Gets the value of a modifier.
  pub fn get(&self, key: &str) -> Option<&str> {
    return self.0.get(&normalize_name(key)).map(|s| s.as_str());
  }

  /// Checks whether a modifier (or flag) is present.
  pub fn has(&self, key: &str) -> bool {
    return self.0.contains_key(&normalize_name(key));
  }

  /// Sets a modifier, keeping its position if it already exists.
  pub fn set(&mut self, key: &str, value: &str) {
    self.0.insert(normalize_name(key), value.trim().to_owned());
  }

  /// Iterates over (name, value) pairs.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    return self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()));
  }

  /// The names of the modifiers.
  pub fn keys(&self) -> impl Iterator<Item = &str> {
    return self.0.keys().map(|k| k.as_str());
  }

  /// Number of modifiers.
  pub fn len(&self) -> usize {
    return self.0.len();
  }

  /// Whether there are no modifiers.
  pub fn is_empty(&self) -> bool {
    return self.0.is_empty();
  }

  /// Writes the modifiers the way they go on a keyword line, comma-separated,
  /// quoting values that need it.
  pub fn to_keyword_text(&self) -> String {
    return self.iter().map(|(k, v)| {
      if v.is_empty() {
        k.to_owned()
      } else if v.contains(',') || v.contains(' ') {
        format!("{}=\"{}\"", k, v)
      } else {
        format!("{}={}", k, v)
      }
    }).join(", ");
  }

  /// Compares two sets of modifiers. Names must match in order; values that
  /// are numbers on both sides are compared with a relative tolerance, the
  /// rest case-insensitively.
  pub fn approx_eq(&self, other: &Self, rel_tol: f64) -> bool {
    if self.len() != other.len() {
      return false;
    }
    return self.iter().zip(other.iter()).all(|((ka, va), (kb, vb))| {
      if ka != kb {
        return false;
      }
      return match (decode_inpfloat(va), decode_inpfloat(vb)) {
        (Some(a), Some(b)) => approx_eq_f64(a, b, rel_tol),
        _ => va.eq_ignore_ascii_case(vb),
      };
    });
  }
}

/// Compares two numbers with a relative tolerance.
pub fn approx_eq_f64(a: f64, b: f64, rel_tol: f64) -> bool {
  if a == b {
    return true;
  }
  return (a - b).abs() <= rel_tol * a.abs().max(b.abs());
}

/// Splits a keyword line into its normalized name and its modifiers.
pub fn parse_keyword_line(text: &str) -> (String, Modifiers) {
  let pieces = split_unquoted(text.trim_start_matches('*'));
  let keyword = normalize_name(&pieces[0]);
  return (keyword, Modifiers::parse(&pieces[1..]));
}

/// A data row as it came from the deck: text fields, not yet decoded.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawRow {
  /// Line number where the row starts.
  pub line: usize,
  /// The fields, trimmed.
  pub fields: Vec<String>,
  /// Number of fields on the row's first physical line.
  pub first_width: usize,
}

impl From<&LogicalLine> for RawRow {
  fn from(ll: &LogicalLine) -> Self {
    let mut fields = ll.text.split(',')
      .map(|f| f.trim().to_owned())
      .collect::<Vec<_>>();
    if fields.len() > 1 && fields.last().is_some_and(|f| f.is_empty()) {
      fields.pop();
    }
    return Self {
      line: ll.line,
      first_width: ll.first_width.min(fields.len()),
      fields,
    };
  }
}

/// A keyword block within a material, before classification.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawBlock {
  /// The normalized keyword, without the star.
  pub keyword: String,
  /// Line of the keyword.
  pub line: usize,
  /// The modifiers on the keyword line.
  pub modifiers: Modifiers,
  /// The data rows under it.
  pub rows: Vec<RawRow>,
}

/// A `*MATERIAL` and everything under it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MaterialBlock {
  /// The material name, as written.
  pub name: String,
  /// Line of the `*MATERIAL` keyword.
  pub line: usize,
  /// The keyword blocks under it, in order.
  pub blocks: Vec<RawBlock>,
}

/// The block assembler. Logical lines go in, complete material blocks come
/// out.
#[derive(Clone, Debug, Default)]
pub struct BlockAssembler {
  /// The material we're currently in, if any.
  current: Option<MaterialBlock>,
  /// Normalized names already seen, with the line they were defined on.
  seen: HashMap<String, usize>,
}

impl BlockAssembler {
  /// Instantiates a new assembler.
  pub fn new() -> Self {
    return Self::default();
  }

  /// Opens a new material from the modifiers of a `*MATERIAL` line. Returns
  /// the material that was open before, if any.
  fn open_material(
    &mut self,
    line: usize,
    modifiers: &Modifiers
  ) -> Result<Option<MaterialBlock>, InpError> {
    let name = match modifiers.get("NAME") {
      Some(n) if !n.is_empty() => n.to_owned(),
      _ => return Err(InpError::MissingName { line }),
    };
    let key = normalize_name(&name);
    if let Some(first_line) = self.seen.get(&key) {
      return Err(InpError::DuplicateMaterialName {
        name,
        line,
        first_line: *first_line,
      });
    }
    self.seen.insert(key, line);
    debug!("Started material \"{}\" on line {}.", name, line);
    let previous = self.current.take();
    self.current = Some(MaterialBlock { name, line, blocks: Vec::new() });
    return Ok(previous);
  }

  /// Consumes a logical line. Returns a material block when the line closed
  /// one.
  pub fn consume(
    &mut self,
    ll: &LogicalLine
  ) -> Result<Option<MaterialBlock>, InpError> {
    match ll.kind {
      LineKind::Keyword => {
        let (keyword, modifiers) = parse_keyword_line(&ll.text);
        if keyword == "MATERIAL" {
          return self.open_material(ll.line, &modifiers);
        }
        if is_model_keyword(&keyword) {
          if self.current.is_some() {
            debug!("*{} on line {} closed a material.", keyword, ll.line);
          }
          return Ok(self.current.take());
        }
        if let Some(ref mut mat) = self.current {
          mat.blocks.push(RawBlock {
            keyword,
            line: ll.line,
            modifiers,
            rows: Vec::new(),
          });
        }
      },
      LineKind::Data => {
        if let Some(ref mut mat) = self.current {
          match mat.blocks.last_mut() {
            Some(block) => block.rows.push(ll.into()),
            None => return Err(InpError::MalformedLine {
              line: ll.line,
              reason: format!("data line directly under *MATERIAL {}", mat.name),
            }),
          };
        }
      },
    };
    return Ok(None);
  }

  /// Finishes up, returning the material still open, if any.
  pub fn finish(&mut self) -> Option<MaterialBlock> {
    if let Some(ref mat) = self.current {
      if mat.blocks.is_empty() {
        warn!("Material \"{}\" has no properties.", mat.name);
      }
    }
    return self.current.take();
  }
}
