use serde::{Deserialize, Serialize};

use super::entity::EntityMoodKey;
use super::mood::Mood;

/// One line of dialogue, linked back to the row it was read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueEntry {
    pub key: EntityMoodKey,
    pub text: String,
    /// Same as `key.mood`; kept alongside the text for callers that only hold the entry.
    pub mood: Mood,
    pub views: u32,
    /// Index of the source row in the row table. Fixed for the session.
    pub origin_row: usize,
}

impl DialogueEntry {
    pub fn new(key: EntityMoodKey, text: impl Into<String>, views: u32, origin_row: usize) -> Self {
        Self {
            key,
            text: text.into(),
            mood: key.mood,
            views,
            origin_row,
        }
    }

    /// Count one more showing of this line and return the new total.
    pub fn record_view(&mut self) -> u32 {
        self.views = self.views.saturating_add(1);
        self.views
    }

    /// The display form handed to the host: `"<views>. <text>"`.
    pub fn formatted(&self) -> String {
        format!("{}. {}", self.views, self.text)
    }
}
