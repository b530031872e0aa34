use serde::{Deserialize, Serialize};
use std::fmt;

use super::mood::Mood;

/// Newtype wrapper for the NPC identifiers found in column 0 of a dialogue file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub i32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Composite index key: which NPC, in which mood.
///
/// Two lines for the same NPC but different moods never share a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityMoodKey {
    pub entity: EntityId,
    pub mood: Mood,
}

impl EntityMoodKey {
    pub fn new(entity: EntityId, mood: Mood) -> Self {
        Self { entity, mood }
    }
}

impl fmt::Display for EntityMoodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.entity, self.mood)
    }
}
