//! Book-wide and per-chapter aggregation of the chapter-frequency table.
//!
//! # Invariants
//! - Each total's `count` equals the exact sum of its place's chapter counts.
//! - Output depends only on the multiset of input rows: groups are ordered
//!   by key and float sums are taken over sorted addends.
//! - Count sums that exceed `u64::MAX` are rejected by [`check_count_sums`]
//!   at load; the aggregators saturate instead of wrapping.

use crate::model::frequency::{ChapterFrequency, ChapterSummary, TotalFrequency};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// A count sum that does not fit in `u64`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountOverflow {
    Place(String),
    Chapter(u32),
}

impl Display for CountOverflow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Place(place) => write!(f, "count sum for place `{place}` overflows"),
            Self::Chapter(chapter) => write!(f, "count sum for chapter {chapter} overflows"),
        }
    }
}

impl Error for CountOverflow {}

/// Verifies every per-place and per-chapter count sum fits in `u64`.
///
/// # Errors
/// - Returns the first place (by name), or else the first chapter, whose sum
///   overflows.
pub fn check_count_sums(rows: &[ChapterFrequency]) -> Result<(), CountOverflow> {
    let mut by_place: BTreeMap<&str, Option<u64>> = BTreeMap::new();
    let mut by_chapter: BTreeMap<u32, Option<u64>> = BTreeMap::new();
    for row in rows {
        let place = by_place.entry(row.place.as_str()).or_insert(Some(0));
        *place = place.and_then(|sum| sum.checked_add(row.count));
        let chapter = by_chapter.entry(row.chapter).or_insert(Some(0));
        *chapter = chapter.and_then(|sum| sum.checked_add(row.count));
    }

    if let Some((place, _)) = by_place.iter().find(|(_, sum)| sum.is_none()) {
        return Err(CountOverflow::Place((*place).to_string()));
    }
    if let Some((chapter, _)) = by_chapter.iter().find(|(_, sum)| sum.is_none()) {
        return Err(CountOverflow::Chapter(*chapter));
    }
    Ok(())
}

/// Groups chapter rows by place and sums `count` and `per_1k_chars`.
///
/// Totals are returned in ascending place-name order.
pub fn aggregate(rows: &[ChapterFrequency]) -> Vec<TotalFrequency> {
    let mut groups: BTreeMap<&str, (u64, Vec<f64>)> = BTreeMap::new();
    for row in rows {
        let (count, per_1k) = groups.entry(row.place.as_str()).or_default();
        *count = count.saturating_add(row.count);
        per_1k.push(row.per_1k_chars);
    }

    groups
        .into_iter()
        .map(|(place, (count, per_1k))| TotalFrequency {
            place: place.to_string(),
            count,
            per_1k_chars: order_independent_sum(per_1k),
        })
        .collect()
}

/// Per-chapter count sums over all places, ascending by chapter.
///
/// Chapters whose rows all have zero counts are included with `count == 0`.
pub fn chapter_summary(rows: &[ChapterFrequency]) -> Vec<ChapterSummary> {
    let mut sums: BTreeMap<u32, u64> = BTreeMap::new();
    for row in rows {
        let sum = sums.entry(row.chapter).or_default();
        *sum = sum.saturating_add(row.count);
    }
    sums.into_iter()
        .map(|(chapter, count)| ChapterSummary { chapter, count })
        .collect()
}

/// Chapters with a positive count sum, ascending.
pub fn valid_chapters(summary: &[ChapterSummary]) -> Vec<u32> {
    summary
        .iter()
        .filter(|entry| entry.is_valid())
        .map(|entry| entry.chapter)
        .collect()
}

fn order_independent_sum(mut values: Vec<f64>) -> f64 {
    values.sort_by(f64::total_cmp);
    values.into_iter().sum()
}
