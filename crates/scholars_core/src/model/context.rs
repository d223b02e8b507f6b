//! Textual context rows tying a chapter, a place and characters together.

use serde::{Deserialize, Serialize};

/// Column order used by the context table and by exports.
pub const CONTEXT_COLUMNS: [&str; 6] = [
    "chapter",
    "place",
    "Character1",
    "Character2",
    "Activity",
    "snippet",
];

/// One excerpt from the novel.
///
/// Optional fields are `None` when the source cell was empty or held a null
/// sentinel; no `"nan"` text survives loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextRecord {
    pub chapter: u32,
    pub place: Option<String>,
    /// Primary character; the only character the context filter matches on.
    #[serde(rename = "Character1")]
    pub character1: Option<String>,
    #[serde(rename = "Character2")]
    pub character2: Option<String>,
    #[serde(rename = "Activity")]
    pub activity: Option<String>,
    pub snippet: Option<String>,
}

impl ContextRecord {
    /// Creates a row with only chapter and place set.
    pub fn new(chapter: u32, place: impl Into<String>) -> Self {
        Self {
            chapter,
            place: Some(place.into()),
            character1: None,
            character2: None,
            activity: None,
            snippet: None,
        }
    }

    pub fn with_characters(mut self, primary: impl Into<String>, secondary: Option<&str>) -> Self {
        self.character1 = Some(primary.into());
        self.character2 = secondary.map(str::to_string);
        self
    }

    pub fn with_activity(mut self, activity: impl Into<String>, snippet: impl Into<String>) -> Self {
        self.activity = Some(activity.into());
        self.snippet = Some(snippet.into());
        self
    }
}
