/// Host settings — where dialogue files live and how they are read.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::loader::MalformedRowPolicy;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogueSettings {
    /// Directory dataset names are resolved against.
    pub data_dir: PathBuf,
    /// File extension appended to dataset names, without the dot.
    pub extension: String,
    /// Fixed seed for line selection; `None` seeds from the OS.
    pub seed: Option<u64>,
    pub malformed_rows: MalformedRowPolicy,
}

impl Default for DialogueSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            extension: "csv".to_string(),
            seed: None,
            malformed_rows: MalformedRowPolicy::default(),
        }
    }
}

impl DialogueSettings {
    pub fn load_from_ron(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    pub fn parse_ron(input: &str) -> Result<Self, SettingsError> {
        Ok(ron::from_str(input)?)
    }

    /// Path of the file backing `dataset`, e.g. `NPCDialogue` → `<data_dir>/NPCDialogue.csv`.
    pub fn dataset_path(&self, dataset: &str) -> PathBuf {
        let file = if self.extension.is_empty() {
            dataset.to_string()
        } else {
            format!("{}.{}", dataset, self.extension)
        };
        self.data_dir.join(file)
    }
}
