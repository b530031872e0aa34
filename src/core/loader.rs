/// Dialogue loader — turns dialogue file text into a row table and an index.
///
/// File layout, one dialogue line per row, no header:
///
/// ```text
/// <entity id>,<mood>,<text>[,<views>]
/// ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::index::DialogueIndex;
use crate::core::table::{Row, RowTable, VIEWS_COLUMN};
use crate::schema::dialogue::DialogueEntry;
use crate::schema::entity::{EntityId, EntityMoodKey};
use crate::schema::mood::Mood;

const ID_COLUMN: usize = 0;
const MOOD_COLUMN: usize = 1;
const TEXT_COLUMN: usize = 2;

const BYTE_ORDER_MARK: char = '\u{feff}';

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read dialogue file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed integer '{value}' at line {line}, column {column}")]
    MalformedCell {
        /// 1-based line number in the file.
        line: usize,
        column: usize,
        value: String,
    },
}

/// What to do with a row whose entity id or view count is not an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MalformedRowPolicy {
    /// Fail the whole load with [`LoadError::MalformedCell`].
    #[default]
    Abort,
    /// Leave the row out of the index but keep it in the row table untouched.
    Skip,
}

/// The result of a successful load.
#[derive(Debug, Clone, Default)]
pub struct LoadedDialogue {
    pub rows: RowTable,
    pub index: DialogueIndex,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DialogueLoader {
    policy: MalformedRowPolicy,
}

impl DialogueLoader {
    pub fn new(policy: MalformedRowPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> MalformedRowPolicy {
        self.policy
    }

    /// Read and parse a dialogue file. Nothing is returned on a read failure.
    pub fn load_file(&self, path: &Path) -> Result<LoadedDialogue, LoadError> {
        let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_str(&contents)
    }

    /// Parse dialogue file text. A leading UTF-8 byte order mark is dropped.
    pub fn load_str(&self, text: &str) -> Result<LoadedDialogue, LoadError> {
        let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
        let rows = RowTable::parse(text);
        let mut index = DialogueIndex::new();
        let mut skipped = 0usize;

        for (row_index, row) in rows.iter().enumerate() {
            match parse_entry(row, row_index) {
                Ok(Some(entry)) => index.insert(entry),
                Ok(None) => skipped += 1,
                Err(err) => match self.policy {
                    MalformedRowPolicy::Abort => return Err(err),
                    MalformedRowPolicy::Skip => {
                        tracing::warn!(error = %err, "skipping malformed dialogue row");
                        skipped += 1;
                    }
                },
            }
        }

        tracing::debug!(
            rows = rows.len(),
            entries = index.len(),
            buckets = index.keys().len(),
            skipped,
            "loaded dialogue"
        );

        Ok(LoadedDialogue { rows, index })
    }
}

/// Build the entry for one row, or `None` for rows that carry no dialogue.
fn parse_entry(row: &Row, row_index: usize) -> Result<Option<DialogueEntry>, LoadError> {
    let id_cell = row.cell(ID_COLUMN).unwrap_or_default();
    if id_cell.is_empty() {
        return Ok(None);
    }
    if row.width() <= TEXT_COLUMN {
        tracing::warn!(
            line = row_index + 1,
            width = row.width(),
            "skipping dialogue row with fewer than three columns"
        );
        return Ok(None);
    }

    let entity = EntityId(parse_int(id_cell, row_index, ID_COLUMN)?);
    let mood = Mood::from_label(row.cell(MOOD_COLUMN).unwrap_or_default());
    let text = row.cell(TEXT_COLUMN).unwrap_or_default();
    let views = match row.cell(VIEWS_COLUMN) {
        Some(cell) => parse_int(cell, row_index, VIEWS_COLUMN)?,
        None => 0,
    };

    Ok(Some(DialogueEntry::new(
        EntityMoodKey::new(entity, mood),
        text,
        views,
        row_index,
    )))
}

fn parse_int<T: std::str::FromStr>(cell: &str, row_index: usize, column: usize) -> Result<T, LoadError> {
    cell.trim().parse().map_err(|_| LoadError::MalformedCell {
        line: row_index + 1,
        column,
        value: cell.to_string(),
    })
}
