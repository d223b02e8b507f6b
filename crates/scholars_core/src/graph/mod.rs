//! Character–place relationship graph.

pub mod relationship;
