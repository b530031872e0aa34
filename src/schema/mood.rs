use serde::{Deserialize, Serialize};
use std::fmt;

/// The mood an NPC is in when a line of dialogue is requested.
///
/// The vocabulary is closed. Dialogue files label moods as plain text;
/// only `"Happy"` and `"Sad"` are matched exactly, every other label
/// (including `"Angry"`) reads as [`Mood::Angry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    Happy,
    Sad,
    Angry,
}

impl Mood {
    /// All moods, in declaration order.
    pub const ALL: [Mood; 3] = [Mood::Happy, Mood::Sad, Mood::Angry];

    /// Classify a mood cell from a dialogue file. Never fails.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Happy" => Self::Happy,
            "Sad" => Self::Sad,
            _ => Self::Angry,
        }
    }

    /// The label written in dialogue files for this mood.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Happy => "Happy",
            Self::Sad => "Sad",
            Self::Angry => "Angry",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
