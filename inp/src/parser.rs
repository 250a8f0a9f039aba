//! This module implements the deck parser, which chains the line normalizer,
//! the block assembler and the card classifiers into a material model.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::blocks::{BlockAssembler, MaterialBlock};
use crate::errors::InpError;
use crate::lines::LineNormalizer;
use crate::material::{Material, MaterialModel};

/// The parser responds this when successfully consuming a line.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParserResponse {
  /// The line was blank, a comment, or is waiting on a continuation.
  Useless,
  /// The line completed this many logical lines.
  Consumed(usize),
  /// The line closed a material, which got classified into the model.
  FinishedMaterial(String),
}

/// This is the deck parser -- it doesn't care how lines are fed into it.
/// It's one-pass, single-thread; any error aborts the whole deck.
#[derive(Debug, Default)]
pub struct DeckParser {
  /// Turns physical lines into logical ones.
  normalizer: LineNormalizer,
  /// Groups logical lines into material blocks.
  assembler: BlockAssembler,
  /// The materials done so far.
  model: MaterialModel,
}

impl DeckParser {
  /// Instantiates a new parser.
  pub fn new() -> Self {
    return Self::default();
  }

  /// Returns the total number of physical lines consumed.
  pub fn total_lines(&self) -> usize {
    return self.normalizer.total_lines();
  }

  /// Classifies a finished material block and adds it to the model.
  fn flush_material(&mut self, mb: MaterialBlock) -> Result<String, InpError> {
    debug!(
      "Classifying material \"{}\" ({} blocks) from line {}.",
      mb.name,
      mb.blocks.len(),
      mb.line
    );
    let mat = Material::classify(&mb)?;
    let name = mat.name.clone();
    self.model.insert(mat)?;
    return Ok(name);
  }

  /// Consumes a physical line into the parser.
  pub fn consume(&mut self, line: &str) -> Result<ParserResponse, InpError> {
    let lls = self.normalizer.feed(line)?;
    if lls.is_empty() {
      return Ok(ParserResponse::Useless);
    }
    let mut finished: Option<String> = None;
    for ll in lls.iter() {
      if let Some(mb) = self.assembler.consume(ll)? {
        finished = Some(self.flush_material(mb)?);
      }
    }
    return Ok(match finished {
      Some(name) => ParserResponse::FinishedMaterial(name),
      None => ParserResponse::Consumed(lls.len()),
    });
  }

  /// Finishes up and returns the model.
  pub fn finish(mut self) -> Result<MaterialModel, InpError> {
    self.normalizer.finish()?;
    if let Some(mb) = self.assembler.finish() {
      self.flush_material(mb)?;
    }
    debug!(
      "Done after {} lines: {} materials.",
      self.total_lines(),
      self.model.len()
    );
    return Ok(self.model);
  }

  /// Parses a whole deck held in memory.
  pub fn parse_str(text: &str) -> Result<MaterialModel, InpError> {
    let mut parser = Self::new();
    for line in text.lines() {
      parser.consume(line)?;
    }
    return parser.finish();
  }

  /// Parses from a BufRead instance. Bytes that aren't valid UTF-8 (Latin-1
  /// comments, mostly) are replaced rather than failing the whole deck.
  pub fn parse_bufread<R: BufRead>(mut reader: R) -> Result<MaterialModel, InpError> {
    let mut parser = Self::new();
    let mut buf: Vec<u8> = Vec::new();
    loop {
      buf.clear();
      if reader.read_until(b'\n', &mut buf)? == 0 {
        break;
      }
      let text = String::from_utf8_lossy(&buf);
      let line = text.trim_end_matches(|c: char| c == '\n' || c == '\r');
      if let ParserResponse::FinishedMaterial(name) = parser.consume(line)? {
        debug!("Material \"{}\" done at line {}.", name, parser.total_lines());
      }
    }
    return parser.finish();
  }

  /// Utility method -- reads and parses a file. Errors carry the file name.
  pub fn parse_file<S: AsRef<Path>>(p: S) -> Result<MaterialModel, InpError> {
    let fname = p.as_ref().display().to_string();
    let parse = || -> Result<MaterialModel, InpError> {
      let file = File::open(p.as_ref())?;
      return Self::parse_bufread(BufReader::new(file));
    };
    let model = parse().map_err(|e| e.in_file(&fname))?;
    info!("Read {} materials from {}.", model.len(), fname);
    return Ok(model);
  }
}
