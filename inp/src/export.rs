//! This module implements the ways a material model gets written out: back
//! into keyword text, and into a JSON document that can be read back in.
//! The flat table lives in its own crate.

pub mod json;
pub mod keyword;
