/// Random index sources used to pick a line from a bucket.

use rand::rngs::StdRng;
use rand::Rng;

/// Picks a uniformly distributed index in `0..bound`.
///
/// Callers only ask with `bound > 0`. Implementations must return a value
/// below `bound`; the store rejects anything else with
/// [`StoreError::PickOutOfRange`](crate::core::store::StoreError::PickOutOfRange).
pub trait IndexSource {
    fn next_index(&mut self, bound: usize) -> usize;
}

impl IndexSource for StdRng {
    fn next_index(&mut self, bound: usize) -> usize {
        self.gen_range(0..bound)
    }
}

/// Replays a fixed list of picks, cycling when exhausted.
///
/// Each pick is reduced modulo the requested bound, so a script stays valid
/// for buckets of any size. An empty script always picks 0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedIndex {
    picks: Vec<usize>,
    cursor: usize,
}

impl ScriptedIndex {
    pub fn new(picks: impl Into<Vec<usize>>) -> Self {
        Self {
            picks: picks.into(),
            cursor: 0,
        }
    }
}

impl IndexSource for ScriptedIndex {
    fn next_index(&mut self, bound: usize) -> usize {
        if self.picks.is_empty() {
            return 0;
        }
        let pick = self.picks[self.cursor % self.picks.len()];
        self.cursor += 1;
        pick % bound
    }
}
