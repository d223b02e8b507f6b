//! Per-chapter mention counts and the shapes derived from them.

use serde::{Deserialize, Serialize};

/// Mentions of one place in one chapter.
///
/// # Invariants
/// - `chapter` is a positive integer.
/// - `count` is non-negative (enforced by the unsigned type).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterFrequency {
    pub place: String,
    pub chapter: u32,
    pub count: u64,
    /// Mentions per 1000 characters of chapter text.
    pub per_1k_chars: f64,
}

impl ChapterFrequency {
    pub fn new(place: impl Into<String>, chapter: u32, count: u64, per_1k_chars: f64) -> Self {
        Self {
            place: place.into(),
            chapter,
            count,
            per_1k_chars,
        }
    }
}

/// Book-wide mentions of one place.
///
/// Always derived from [`ChapterFrequency`] rows at load time; `count` equals
/// the sum of that place's per-chapter counts exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalFrequency {
    pub place: String,
    pub count: u64,
    pub per_1k_chars: f64,
}

/// Sum of mention counts over every place for one chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterSummary {
    pub chapter: u32,
    pub count: u64,
}

impl ChapterSummary {
    /// A chapter is valid (selectable) when at least one place is mentioned.
    pub fn is_valid(&self) -> bool {
        self.count > 0
    }
}
