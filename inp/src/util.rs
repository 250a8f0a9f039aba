//! This module implements utility functions without much need for defining
//! context or not enough of it to warrant them having their own modules.

use itertools::Itertools;

/// Decodes a number as written in a deck. Accepts Fortran-style `D`
/// exponents and the usual trailing-dot reals ("7800."). Returns `None` for
/// blank or non-numeric text.
pub fn decode_inpfloat(s: &str) -> Option<f64> {
  let s = s.trim();
  if s.is_empty() {
    return None;
  }
  // refuse "inf", "nan" and friends, which str::parse would take
  let plausible = s.chars()
    .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E' | 'd' | 'D'));
  if !plausible || !s.chars().any(|c| c.is_ascii_digit()) {
    return None;
  }
  let fixed = s.replace(['d', 'D'], "e");
  return fixed.parse::<f64>().ok();
}

/// Formats a number so that decoding it gives back exactly the same value.
/// Integral values keep a trailing dot, like decks usually write them; very
/// large or very small magnitudes use exponent notation.
pub fn fmt_inpfloat(x: f64) -> String {
  let ax = x.abs();
  if ax != 0.0 && !(1e-4..1e7).contains(&ax) {
    return format!("{:e}", x);
  }
  let s = format!("{}", x);
  if s.contains('.') {
    return s;
  }
  return format!("{}.", s);
}

/// Normalizes a keyword or modifier name: trimmed, internal whitespace
/// collapsed to single spaces, uppercased.
pub fn normalize_name(s: &str) -> String {
  return s.split_whitespace().join(" ").to_uppercase();
}

/// Splits a line on commas that aren't within double quotes. Pieces are
/// trimmed; quotes are kept.
pub fn split_unquoted(s: &str) -> Vec<String> {
  let mut pieces: Vec<String> = Vec::new();
  let mut current = String::new();
  let mut quoted = false;
  for c in s.chars() {
    match c {
      '"' => {
        quoted = !quoted;
        current.push(c);
      },
      ',' if !quoted => {
        pieces.push(current.trim().to_owned());
        current.clear();
      },
      _ => current.push(c),
    }
  }
  pieces.push(current.trim().to_owned());
  return pieces;
}

/// Removes one level of surrounding double quotes, if present.
pub fn unquote(s: &str) -> &str {
  let s = s.trim();
  if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
    return &s[1..s.len()-1];
  }
  return s;
}

/// Strips an inline `**` comment from a line.
pub(crate) fn strip_inline_comment(s: &str) -> &str {
  return match s.find("**") {
    Some(i) => &s[..i],
    None => s,
  };
}
