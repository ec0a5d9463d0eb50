//! Prelude module for the rpgtools crate.
//!
//! Re-exports the derive macros from derive_more that the crate relies on.

#[allow(unused_imports)]
pub use derive_more::{Display, From};
