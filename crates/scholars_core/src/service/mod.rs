//! Loaded dataset and the use-case entry points over it.
//!
//! # Invariants
//! - A [`data_context::DataContext`] is built once and never mutated.
//! - Every query takes the context by shared reference.

pub mod data_context;
pub mod quality;
