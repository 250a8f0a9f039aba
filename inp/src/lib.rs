//! This library implements types and functions to read the material
//! definitions within keyword-format finite element input decks (the `.inp`
//! format and its relatives).
//!
//! A deck is broken into logical lines, logical lines into keyword blocks,
//! and the blocks that live under a `*MATERIAL` are classified into typed
//! property records. The resulting model can be converted between unit
//! systems and exported back out as JSON or as keyword text.
//!
//! Only material data is interpreted -- elements, steps and the rest of the
//! model are skipped over.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![allow(clippy::needless_return)]

pub mod blocks;
pub mod cards;
pub mod errors;
pub mod export;
pub mod lines;
pub mod material;
pub mod parser;
pub mod units;
pub mod util;

/// Imports the most relevant exports from the library.
pub mod prelude {
  pub use crate::blocks::*;
  pub use crate::cards::*;
  pub use crate::cards::types::CardType;
  pub use crate::errors::*;
  pub use crate::lines::*;
  pub use crate::material::*;
  pub use crate::parser::*;
  pub use crate::units::*;
}

#[cfg(test)]
mod tests;
