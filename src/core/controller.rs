/// Dialogue controller — the host-facing lifecycle around a [`DialogueStore`].
///
/// The host calls [`initialize`](DialogueController::initialize) once at
/// startup, [`get_dialogue`](DialogueController::get_dialogue) as often as
/// it likes, and [`shutdown`](DialogueController::shutdown) once at
/// teardown to persist view counts. Nothing is written implicitly on drop.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::loader::{DialogueLoader, LoadError, MalformedRowPolicy};
use crate::core::settings::{DialogueSettings, SettingsError};
use crate::core::store::{DialogueStore, StoreError};
use crate::schema::entity::{EntityId, EntityMoodKey};
use crate::schema::mood::Mood;

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("load error: {0}")]
    Load(#[from] LoadError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
    #[error("no dialogue loaded")]
    NotLoaded,
    #[error("dialogue already initialized from '{0}'")]
    AlreadyInitialized(String),
}

/// Lifecycle of a controller. `Saved` is terminal.
#[derive(Debug)]
pub enum ControllerState {
    Unloaded,
    Loaded { dataset: String, store: DialogueStore },
    Saved { dataset: String },
}

pub struct DialogueController {
    settings: DialogueSettings,
    rng: StdRng,
    state: ControllerState,
}

/// Builder for constructing a `DialogueController`.
pub struct DialogueControllerBuilder {
    settings: DialogueSettings,
    settings_path: Option<PathBuf>,
}

impl DialogueController {
    pub fn builder() -> DialogueControllerBuilder {
        DialogueControllerBuilder {
            settings: DialogueSettings::default(),
            settings_path: None,
        }
    }

    pub fn settings(&self) -> &DialogueSettings {
        &self.settings
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, ControllerState::Loaded { .. })
    }

    /// The loaded store, if any.
    pub fn store(&self) -> Option<&DialogueStore> {
        match &self.state {
            ControllerState::Loaded { store, .. } => Some(store),
            _ => None,
        }
    }

    /// Load the file backing `dataset`. A read or parse failure leaves the
    /// controller unloaded.
    pub fn initialize(&mut self, dataset: &str) -> Result<(), ControllerError> {
        match &self.state {
            ControllerState::Unloaded => {}
            ControllerState::Loaded { dataset, .. } | ControllerState::Saved { dataset } => {
                return Err(ControllerError::AlreadyInitialized(dataset.clone()));
            }
        }

        let path = self.settings.dataset_path(dataset);
        let loader = DialogueLoader::new(self.settings.malformed_rows);
        let store = DialogueStore::open(&path, &loader)?;
        tracing::info!(
            dataset,
            path = %path.display(),
            entries = store.index().len(),
            "dialogue initialized"
        );
        self.state = ControllerState::Loaded {
            dataset: dataset.to_string(),
            store,
        };
        Ok(())
    }

    /// Draw a line for `entity_id` in `mood`; see [`DialogueStore::get_dialogue`].
    pub fn get_dialogue(&mut self, entity_id: i32, mood: Mood) -> Result<String, ControllerError> {
        match &mut self.state {
            ControllerState::Loaded { store, .. } => {
                let key = EntityMoodKey::new(EntityId(entity_id), mood);
                Ok(store.get_dialogue(key, &mut self.rng)?)
            }
            _ => Err(ControllerError::NotLoaded),
        }
    }

    /// Write view counts back to the dataset file.
    ///
    /// On a write failure the controller stays loaded so the host can retry.
    /// Calling it again after a successful save does nothing.
    pub fn shutdown(&mut self) -> Result<(), ControllerError> {
        match &mut self.state {
            ControllerState::Unloaded => Err(ControllerError::NotLoaded),
            ControllerState::Saved { dataset } => {
                tracing::debug!(dataset = %dataset, "dialogue already saved");
                Ok(())
            }
            ControllerState::Loaded { dataset, store } => {
                store.save()?;
                tracing::info!(dataset = %dataset, path = %store.path().display(), "dialogue saved");
                let dataset = std::mem::take(dataset);
                self.state = ControllerState::Saved { dataset };
                Ok(())
            }
        }
    }
}

impl DialogueControllerBuilder {
    pub fn data_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.settings.data_dir = path.as_ref().to_path_buf();
        self
    }

    pub fn extension(mut self, extension: &str) -> Self {
        self.settings.extension = extension.to_string();
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.settings.seed = Some(seed);
        self
    }

    pub fn malformed_rows(mut self, policy: MalformedRowPolicy) -> Self {
        self.settings.malformed_rows = policy;
        self
    }

    /// Replace all settings at once.
    pub fn with_settings(mut self, settings: DialogueSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Read settings from a RON file at build time. Values set on the
    /// builder are replaced by the file's.
    pub fn settings_file(mut self, path: impl AsRef<Path>) -> Self {
        self.settings_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn build(self) -> Result<DialogueController, ControllerError> {
        let settings = match self.settings_path {
            Some(path) => DialogueSettings::load_from_ron(&path)?,
            None => self.settings,
        };
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(DialogueController {
            settings,
            rng,
            state: ControllerState::Unloaded,
        })
    }
}
