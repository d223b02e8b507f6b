//! Single-chapter view of geocoded, non-zero mentions.

use super::{centroid, first_max_by_count};
use crate::model::enriched::Enriched;
use crate::model::frequency::ChapterFrequency;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChapterView<'a> {
    pub chapter: u32,
    pub rows: Vec<&'a Enriched<ChapterFrequency>>,
    /// The chapter's most-mentioned place; first occurrence wins on ties.
    pub top_place: Option<&'a Enriched<ChapterFrequency>>,
}

impl ChapterView<'_> {
    pub fn empty(chapter: u32) -> Self {
        Self {
            chapter,
            rows: Vec::new(),
            top_place: None,
        }
    }

    pub fn centroid(&self) -> Option<(f64, f64)> {
        centroid(&self.rows)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Rows of `chapter` with `count > 0` and both coordinates.
pub fn chapter_view(rows: &[Enriched<ChapterFrequency>], chapter: u32) -> ChapterView<'_> {
    let rows: Vec<&Enriched<ChapterFrequency>> = rows
        .iter()
        .filter(|row| row.record.chapter == chapter && row.record.count > 0 && row.has_coordinates())
        .collect();
    let top_place = first_max_by_count(&rows, |row| row.record.count);
    ChapterView {
        chapter,
        rows,
        top_place,
    }
}
