//! Non-fatal data quality findings collected at load time.
//!
//! Partial enrichment is expected for this dataset, so findings are logged
//! and exposed for inspection but never raised as errors.

use crate::model::context::ContextRecord;
use crate::model::frequency::{ChapterFrequency, TotalFrequency};
use crate::model::place::PlaceTable;
use crate::pipeline::geocode::count_join_misses;
use log::warn;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DataQualityReport {
    /// Gazetteer rows lacking latitude or longitude.
    pub places_without_coordinates: usize,
    /// Place names that occur more than once in the gazetteer.
    pub duplicate_place_names: usize,
    /// Per-chapter rows whose place is not in the gazetteer.
    pub chapter_join_misses: usize,
    /// Distinct aggregated places not in the gazetteer.
    pub total_join_misses: usize,
    /// Context rows with no place or a place not in the gazetteer.
    pub context_join_misses: usize,
    /// Context rows without a primary character.
    pub contexts_without_character: usize,
}

impl DataQualityReport {
    pub fn collect(
        places: &PlaceTable,
        chapter_frequencies: &[ChapterFrequency],
        totals: &[TotalFrequency],
        contexts: &[ContextRecord],
    ) -> Self {
        Self {
            places_without_coordinates: places
                .places()
                .iter()
                .filter(|place| place.coordinates().is_none())
                .count(),
            duplicate_place_names: places.duplicate_name_count(),
            chapter_join_misses: count_join_misses(chapter_frequencies, places),
            total_join_misses: count_join_misses(totals, places),
            context_join_misses: count_join_misses(contexts, places),
            contexts_without_character: contexts
                .iter()
                .filter(|row| row.character1.is_none())
                .count(),
        }
    }

    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }

    /// Emits one `warn` event when any finding is non-zero.
    pub fn log(&self) {
        if self.is_clean() {
            return;
        }
        warn!(
            "event=data_quality module=service status=degraded places_without_coordinates={} duplicate_place_names={} chapter_join_misses={} total_join_misses={} context_join_misses={} contexts_without_character={}",
            self.places_without_coordinates,
            self.duplicate_place_names,
            self.chapter_join_misses,
            self.total_join_misses,
            self.context_join_misses,
            self.contexts_without_character
        );
    }
}
