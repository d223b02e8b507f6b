//! Gazetteer records and the read-only place table.
//!
//! # Invariants
//! - Place names are expected to be unique. Duplicates are tolerated (the
//!   table indexes every occurrence) and reported by the quality report.
//! - A coordinate is either a finite number or absent.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One gazetteer row: a named narrative location with optional coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Serialized as `place` to match the source column.
    #[serde(rename = "place")]
    pub name: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl Place {
    pub fn new(name: impl Into<String>, lat: Option<f64>, lon: Option<f64>) -> Self {
        Self {
            name: name.into(),
            lat,
            lon,
        }
    }

    /// Returns `(lat, lon)` only when both coordinates are present.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.lat?, self.lon?))
    }
}

/// Gazetteer rows in source order plus a name index.
#[derive(Debug, Clone, Default)]
pub struct PlaceTable {
    places: Vec<Place>,
    by_name: HashMap<String, Vec<usize>>,
}

impl PlaceTable {
    pub fn new(places: Vec<Place>) -> Self {
        let mut by_name: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, place) in places.iter().enumerate() {
            by_name.entry(place.name.clone()).or_default().push(idx);
        }
        Self { places, by_name }
    }

    /// All rows in source order.
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    /// Every row whose name equals `name` exactly, in source order.
    ///
    /// More than one row is only returned when the table violates the
    /// unique-name precondition.
    pub fn lookup(&self, name: &str) -> Vec<&Place> {
        self.by_name
            .get(name)
            .map(|indices| indices.iter().map(|&idx| &self.places[idx]).collect())
            .unwrap_or_default()
    }

    /// Whether `name` is a gazetteer place (case-sensitive, exact).
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Number of names that occur more than once.
    pub fn duplicate_name_count(&self) -> usize {
        self.by_name
            .values()
            .filter(|indices| indices.len() > 1)
            .count()
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}
