//! This library implements a flat CSV layout for material models: one record
//! per data row of every property of every material. Primarily meant for use
//! by the `inpmat` tool.

#![allow(clippy::needless_return)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

pub mod formatting;
pub mod from_model;
pub mod layout;

/// Imports the most relevant exports from the library.
pub mod prelude {
  pub use super::formatting::*;
  pub use super::from_model::*;
  pub use super::layout::*;
}

pub use from_model::write_csv;

#[cfg(test)]
mod tests;
