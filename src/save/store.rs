//! Save domain: reading and writing save files.

use std::fs;
use std::path::{Path, PathBuf};

use bevy::prelude::*;

use crate::save::SaveGame;

pub const SAVE_DIR: &str = "saves";
pub const CHECKPOINT_SLOT: &str = "checkpoint";

/// Error type for save file failures.
#[derive(Debug)]
pub struct SaveError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Save file {}: {}", self.file, self.message)
    }
}

/// Save files live at `<dir>/<scene>/<slot>.json`.
#[derive(Resource, Debug, Clone)]
pub struct SaveStore {
    dir: PathBuf,
}

impl Default for SaveStore {
    fn default() -> Self {
        Self::new(SAVE_DIR)
    }
}

impl SaveStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, scene: &str, slot: &str) -> PathBuf {
        self.dir.join(scene).join(format!("{}.json", slot))
    }

    pub fn write(&self, slot: &str, game: &SaveGame) -> Result<PathBuf, SaveError> {
        let path = self.path_for(&game.scene, slot);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
        }

        let json = serde_json::to_string_pretty(game).map_err(|e| SaveError {
            file: path.display().to_string(),
            message: format!("Encode error: {}", e),
        })?;
        fs::write(&path, json).map_err(|e| io_error(&path, e))?;
        Ok(path)
    }

    pub fn read(&self, scene: &str, slot: &str) -> Result<SaveGame, SaveError> {
        let path = self.path_for(scene, slot);
        let contents = fs::read_to_string(&path).map_err(|e| io_error(&path, e))?;

        serde_json::from_str(&contents).map_err(|e| SaveError {
            file: path.display().to_string(),
            message: format!("Parse error: {}", e),
        })
    }
}

fn io_error(path: &Path, err: std::io::Error) -> SaveError {
    SaveError {
        file: path.display().to_string(),
        message: format!("IO error: {}", err),
    }
}
