//! This module implements the line normalizer: it turns physical lines of a
//! deck into logical lines, dropping comments and merging continuations.

use std::collections::VecDeque;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::InpError;
use crate::util::strip_inline_comment;

/// What a logical line is.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum LineKind {
  /// A line starting with a single `*`.
  Keyword,
  /// Anything else that isn't blank or a comment.
  Data,
}

/// A logical line: one or more physical lines merged through continuation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogicalLine {
  /// What kind of line this is.
  pub kind: LineKind,
  /// Number of the first physical line (1-based).
  pub line: usize,
  /// The merged text, comments removed.
  pub text: String,
  /// Number of fields on the first physical line. Only meaningful for data.
  pub first_width: usize,
}

/// Counts the comma-separated fields in a physical data line, not counting
/// the empty one after a trailing comma.
fn segment_width(s: &str) -> usize {
  let n = s.split(',').count();
  return if s.ends_with(',') { n - 1 } else { n };
}

/// The line normalizer. Physical lines are fed in one at a time and logical
/// lines come out as soon as they're complete.
#[derive(Clone, Debug, Default)]
pub struct LineNormalizer {
  /// A logical line still waiting for its continuation.
  pending: Option<LogicalLine>,
  /// Number of physical lines consumed.
  total_lines: usize,
  /// Whether we've seen a keyword yet.
  seen_keyword: bool,
}

impl LineNormalizer {
  /// Instantiates a new normalizer.
  pub fn new() -> Self {
    return Self::default();
  }

  /// Returns the number of physical lines consumed so far.
  pub fn total_lines(&self) -> usize {
    return self.total_lines;
  }

  /// Closes the pending line, dropping a dangling trailing comma.
  fn close_pending(&mut self) -> Option<LogicalLine> {
    let mut ll = self.pending.take()?;
    if ll.text.ends_with(',') {
      ll.text.pop();
      ll.text.truncate(ll.text.trim_end().len());
    }
    return Some(ll);
  }

  /// Feeds a physical line. Returns the logical lines it completed (at most
  /// two: a terminated continuation and the line itself).
  pub fn feed(&mut self, raw: &str) -> Result<Vec<LogicalLine>, InpError> {
    self.total_lines += 1;
    let line = self.total_lines;
    let mut done: Vec<LogicalLine> = Vec::new();
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with("**") {
      return Ok(done);
    }
    let content = strip_inline_comment(trimmed).trim();
    if content.is_empty() {
      return Ok(done);
    }
    let kind = if content.starts_with('*') {
      LineKind::Keyword
    } else {
      LineKind::Data
    };
    // continue a pending line if there is one
    if let Some(ref mut pending) = self.pending {
      if kind == LineKind::Data {
        if pending.kind == LineKind::Keyword {
          pending.text.push(' ');
        }
        pending.text.push_str(content);
        if !content.ends_with(',') {
          done.extend(self.close_pending());
        }
        return Ok(done);
      }
      // a keyword ends any continuation
      debug!("Continuation ended by a keyword on line {}.", line);
      done.extend(self.close_pending());
    }
    if kind == LineKind::Keyword {
      self.seen_keyword = true;
    } else if !self.seen_keyword {
      return Err(InpError::MalformedLine {
        line,
        reason: "data line before any keyword".to_owned(),
      });
    }
    let ll = LogicalLine {
      kind,
      line,
      text: content.to_owned(),
      first_width: segment_width(content),
    };
    if content.ends_with(',') {
      self.pending = Some(ll);
    } else {
      done.push(ll);
    }
    return Ok(done);
  }

  /// Signals the end of the input. Errs if a continuation is still open.
  pub fn finish(&mut self) -> Result<(), InpError> {
    if let Some(ll) = self.pending.take() {
      return Err(InpError::MalformedLine {
        line: ll.line,
        reason: "continuation runs into the end of the input".to_owned(),
      });
    }
    return Ok(());
  }
}

/// Lazily yields logical lines from an iterator over physical lines.
pub struct LogicalLines<I> {
  /// The physical lines.
  inner: I,
  /// The normalizer state.
  normalizer: LineNormalizer,
  /// Completed lines not yet handed out.
  ready: VecDeque<LogicalLine>,
  /// Whether the input (or an error) has been reached.
  finished: bool,
}

impl<I, S> LogicalLines<I>
  where I: Iterator<Item = S>, S: AsRef<str> {
  /// Wraps an iterator over physical lines.
  pub fn new(inner: I) -> Self {
    return Self {
      inner,
      normalizer: LineNormalizer::new(),
      ready: VecDeque::new(),
      finished: false,
    };
  }
}

impl<I, S> Iterator for LogicalLines<I>
  where I: Iterator<Item = S>, S: AsRef<str> {
  type Item = Result<LogicalLine, InpError>;

  fn next(&mut self) -> Option<Self::Item> {
    loop {
      if let Some(ll) = self.ready.pop_front() {
        return Some(Ok(ll));
      }
      if self.finished {
        return None;
      }
      match self.inner.next() {
        Some(raw) => match self.normalizer.feed(raw.as_ref()) {
          Ok(lls) => self.ready.extend(lls),
          Err(e) => {
            self.finished = true;
            return Some(Err(e));
          },
        },
        None => {
          self.finished = true;
          if let Err(e) = self.normalizer.finish() {
            return Some(Err(e));
          }
        },
      }
    }
  }
}

/// Normalizes a whole text into logical lines.
pub fn logical_lines(text: &str) -> LogicalLines<std::str::Lines<'_>> {
  return LogicalLines::new(text.lines());
}
