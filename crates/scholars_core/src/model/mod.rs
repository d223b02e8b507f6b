//! Relational model for the place-mention dataset.
//!
//! # Responsibility
//! - Define the records loaded from the three source tables.
//! - Define the derived shapes (totals, chapter summary, enriched rows).
//!
//! # Invariants
//! - Records are immutable once loaded; derived tables are recomputed on
//!   every load and never persisted.
//! - Place names are plain strings; role (place vs character) is never
//!   stored on a record.

pub mod context;
pub mod enriched;
pub mod frequency;
pub mod place;
