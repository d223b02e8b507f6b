//! Filtered browsing of context rows by place and primary character.
//!
//! # Invariants
//! - Filters are exact-match and combine as a conjunction.
//! - `available_characters` reflects the place filter only, never the
//!   character filter.

use crate::model::context::ContextRecord;
use crate::model::enriched::Enriched;
use serde::Serialize;
use std::collections::BTreeSet;

/// Optional place and primary-character filters; `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextFilter {
    pub place: Option<String>,
    pub character: Option<String>,
}

impl ContextFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_place(mut self, place: impl Into<String>) -> Self {
        self.place = Some(place.into());
        self
    }

    pub fn with_character(mut self, character: impl Into<String>) -> Self {
        self.character = Some(character.into());
        self
    }

    fn matches_place(&self, row: &ContextRecord) -> bool {
        match &self.place {
            Some(place) => row.place.as_deref() == Some(place.as_str()),
            None => true,
        }
    }

    fn matches_character(&self, row: &ContextRecord) -> bool {
        match &self.character {
            Some(character) => row.character1.as_deref() == Some(character.as_str()),
            None => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextView<'a> {
    pub rows: Vec<&'a Enriched<ContextRecord>>,
    /// Sorted distinct primary characters after the place filter.
    pub available_characters: Vec<&'a str>,
}

impl<'a> ContextView<'a> {
    pub fn snippet_count(&self) -> usize {
        self.rows.len()
    }

    /// The bare context records, for export.
    pub fn records(&self) -> impl Iterator<Item = &'a ContextRecord> + '_ {
        self.rows.iter().map(|&row| &row.record)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Applies `filter` to the context rows.
pub fn context_view<'a>(
    rows: &'a [Enriched<ContextRecord>],
    filter: &ContextFilter,
) -> ContextView<'a> {
    let by_place: Vec<&'a Enriched<ContextRecord>> = rows
        .iter()
        .filter(|row| filter.matches_place(&row.record))
        .collect();

    let available_characters: Vec<&'a str> = by_place
        .iter()
        .filter_map(|&row| row.record.character1.as_deref())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let rows = by_place
        .into_iter()
        .filter(|row| filter.matches_character(&row.record))
        .collect();

    ContextView {
        rows,
        available_characters,
    }
}
