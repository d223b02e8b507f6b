//! Join output: a record plus the coordinates of its place, if any.

use serde::Serialize;

/// A record augmented with geocoordinates via the place-name join.
///
/// Coordinates are `None` when the place is unknown to the gazetteer, when
/// the record has no place, or when the gazetteer row lacks them. Consumers
/// filter on [`Enriched::coordinates`] per query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Enriched<T> {
    #[serde(flatten)]
    pub record: T,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl<T> Enriched<T> {
    pub fn new(record: T, lat: Option<f64>, lon: Option<f64>) -> Self {
        Self { record, lat, lon }
    }

    /// A join miss: the record with no coordinates.
    pub fn unmatched(record: T) -> Self {
        Self::new(record, None, None)
    }

    /// Returns `(lat, lon)` only when both are present.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.lat?, self.lon?))
    }

    pub fn has_coordinates(&self) -> bool {
        self.coordinates().is_some()
    }
}
