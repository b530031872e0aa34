/// Dialogue store — random draws, view counting, and write-back.

use rustc_hash::FxHashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::index::DialogueIndex;
use crate::core::loader::{DialogueLoader, LoadError, LoadedDialogue};
use crate::core::random::IndexSource;
use crate::core::table::{RowTable, VIEWS_COLUMN};
use crate::schema::dialogue::DialogueEntry;
use crate::schema::entity::EntityMoodKey;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no dialogue for {0}")]
    KeyNotFound(EntityMoodKey),
    #[error("index source picked {pick} for {key}, which has {len} lines")]
    PickOutOfRange {
        key: EntityMoodKey,
        pick: usize,
        len: usize,
    },
    #[error("failed to write dialogue file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A loaded dialogue file: its rows, its index, and where it came from.
///
/// Not synchronised. Hosts sharing a store across threads must hold one
/// lock around each [`get_dialogue`](Self::get_dialogue) and around
/// [`save`](Self::save).
#[derive(Debug, Clone)]
pub struct DialogueStore {
    path: PathBuf,
    rows: RowTable,
    index: DialogueIndex,
}

impl DialogueStore {
    /// Load the dialogue file at `path`.
    pub fn open(path: impl Into<PathBuf>, loader: &DialogueLoader) -> Result<Self, LoadError> {
        let path = path.into();
        let loaded = loader.load_file(&path)?;
        Ok(Self::from_loaded(path, loaded))
    }

    /// Wrap already parsed dialogue; `path` is where [`save`](Self::save) writes.
    pub fn from_loaded(path: impl Into<PathBuf>, loaded: LoadedDialogue) -> Self {
        Self {
            path: path.into(),
            rows: loaded.rows,
            index: loaded.index,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn rows(&self) -> &RowTable {
        &self.rows
    }

    pub fn index(&self) -> &DialogueIndex {
        &self.index
    }

    /// Pick a random line for `key`, count the view, and return it as
    /// `"<views>. <text>"` with the updated count.
    ///
    /// An unknown key, or a pick outside the bucket, is an error and leaves
    /// every count unchanged.
    pub fn get_dialogue<R>(&mut self, key: EntityMoodKey, rng: &mut R) -> Result<String, StoreError>
    where
        R: IndexSource + ?Sized,
    {
        let bucket = self
            .index
            .bucket_mut(&key)
            .ok_or(StoreError::KeyNotFound(key))?;
        let len = bucket.len();
        let pick = rng.next_index(len);
        let entry = bucket
            .get_mut(pick)
            .ok_or(StoreError::PickOutOfRange { key, pick, len })?;
        let views = entry.record_view();
        tracing::debug!(%key, row = entry.origin_row, views, "drew dialogue line");
        Ok(entry.formatted())
    }

    /// Current view counts for `key`, in file order.
    pub fn views_of(&self, key: &EntityMoodKey) -> Option<Vec<u32>> {
        self.index
            .bucket(key)
            .map(|bucket| bucket.iter().map(|entry| entry.views).collect())
    }

    pub fn entries(&self) -> impl Iterator<Item = &DialogueEntry> {
        self.index.entries()
    }

    /// Copy every entry's view count into column 3 of its source row,
    /// widening three-column rows.
    pub fn sync_views(&mut self) {
        let mut patched = FxHashSet::default();
        for entry in self.index.entries() {
            debug_assert!(
                patched.insert(entry.origin_row),
                "row {} claimed by more than one entry",
                entry.origin_row
            );
            match self.rows.get_mut(entry.origin_row) {
                Some(row) => row.set_cell(VIEWS_COLUMN, entry.views.to_string()),
                None => tracing::warn!(row = entry.origin_row, "dialogue entry points past the row table"),
            }
        }
    }

    /// The file text [`save`](Self::save) would write. Patches the row
    /// table with the current counts first, as [`sync_views`](Self::sync_views) does.
    pub fn render_csv(&mut self) -> String {
        self.sync_views();
        self.rows.to_text()
    }

    /// Overwrite the source file with the current counts.
    ///
    /// Safe to repeat: saving an unchanged store writes the same text again.
    pub fn save(&mut self) -> Result<(), StoreError> {
        let path = self.path.clone();
        self.save_to(&path)
    }

    /// Write the current counts to `path`, replacing its contents.
    pub fn save_to(&mut self, path: &Path) -> Result<(), StoreError> {
        let text = self.render_csv();
        std::fs::write(path, text).map_err(|source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), rows = self.rows.len(), "saved dialogue");
        Ok(())
    }
}
