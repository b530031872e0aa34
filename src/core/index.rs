/// Dialogue index — entries grouped by (entity, mood).

use rustc_hash::FxHashMap;

use crate::schema::dialogue::DialogueEntry;
use crate::schema::entity::EntityMoodKey;

/// Buckets of dialogue entries keyed by [`EntityMoodKey`].
///
/// Entries inside a bucket stay in file order. Keys are also remembered in
/// the order they were first seen so that walking the index is
/// deterministic.
#[derive(Debug, Clone, Default)]
pub struct DialogueIndex {
    buckets: FxHashMap<EntityMoodKey, Vec<DialogueEntry>>,
    key_order: Vec<EntityMoodKey>,
}

impl DialogueIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to the bucket named by its own key.
    pub fn insert(&mut self, entry: DialogueEntry) {
        let key = entry.key;
        match self.buckets.get_mut(&key) {
            Some(bucket) => bucket.push(entry),
            None => {
                self.buckets.insert(key, vec![entry]);
                self.key_order.push(key);
            }
        }
    }

    pub fn contains_key(&self, key: &EntityMoodKey) -> bool {
        self.buckets.contains_key(key)
    }

    pub fn bucket(&self, key: &EntityMoodKey) -> Option<&[DialogueEntry]> {
        self.buckets.get(key).map(Vec::as_slice)
    }

    pub fn bucket_mut(&mut self, key: &EntityMoodKey) -> Option<&mut [DialogueEntry]> {
        self.buckets.get_mut(key).map(Vec::as_mut_slice)
    }

    /// Keys in first-seen order.
    pub fn keys(&self) -> &[EntityMoodKey] {
        &self.key_order
    }

    /// Every entry, walking keys in first-seen order and each bucket in file order.
    pub fn entries(&self) -> impl Iterator<Item = &DialogueEntry> {
        self.key_order
            .iter()
            .filter_map(|key| self.buckets.get(key))
            .flatten()
    }

    /// Number of entries across all buckets.
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.key_order.is_empty()
    }
}
