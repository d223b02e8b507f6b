//! Geocoding join: left outer join of any place-keyed table onto the
//! gazetteer.
//!
//! # Invariants
//! - No input row is dropped; misses carry `lat = lon = None`.
//! - Matching is exact and case-sensitive on the stored name.
//! - Duplicate gazetteer names multiply the matching row once per match.

use crate::model::context::ContextRecord;
use crate::model::enriched::Enriched;
use crate::model::frequency::{ChapterFrequency, TotalFrequency};
use crate::model::place::PlaceTable;

/// Records that can be joined onto the gazetteer by place name.
pub trait PlaceKeyed {
    /// The join key, or `None` when the record names no place.
    fn place_key(&self) -> Option<&str>;
}

impl PlaceKeyed for ChapterFrequency {
    fn place_key(&self) -> Option<&str> {
        Some(&self.place)
    }
}

impl PlaceKeyed for TotalFrequency {
    fn place_key(&self) -> Option<&str> {
        Some(&self.place)
    }
}

impl PlaceKeyed for ContextRecord {
    fn place_key(&self) -> Option<&str> {
        self.place.as_deref()
    }
}

/// Enriches every row with the coordinates of its place.
pub fn join<T: PlaceKeyed + Clone>(rows: &[T], places: &PlaceTable) -> Vec<Enriched<T>> {
    let mut enriched = Vec::with_capacity(rows.len());
    for row in rows {
        let matches = row
            .place_key()
            .map(|name| places.lookup(name))
            .unwrap_or_default();
        if matches.is_empty() {
            enriched.push(Enriched::unmatched(row.clone()));
            continue;
        }
        for place in matches {
            enriched.push(Enriched::new(row.clone(), place.lat, place.lon));
        }
    }
    enriched
}

/// Counts rows whose place is absent or unknown to the gazetteer.
pub fn count_join_misses<T: PlaceKeyed>(rows: &[T], places: &PlaceTable) -> usize {
    rows.iter()
        .filter(|row| row.place_key().map_or(true, |name| !places.contains(name)))
        .count()
}
