//! Saved rename sequences
//!
//! Each preset is a TOML file `<name>.toml` in the presets directory. The
//! sequence used by the last successful apply is kept separately so it can
//! be rerun with `--last`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::core::error::{MulliganError, Result};
use crate::operations::RenameOperation;
use crate::sequence::RenameOperationSequence;

/// A named, saved sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub operations: Vec<RenameOperation>,
}

impl Preset {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        sequence: &RenameOperationSequence,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            operations: sequence.operations().to_vec(),
        }
    }

    pub fn sequence(&self) -> RenameOperationSequence {
        RenameOperationSequence::from_operations(self.operations.clone())
    }
}

/// Presets stored as TOML files in one directory
#[derive(Debug, Clone)]
pub struct PresetStore {
    dir: PathBuf,
}

impl PresetStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// All presets, sorted by name. Files that fail to parse are skipped.
    pub fn list(&self) -> Result<Vec<Preset>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut presets = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("toml") {
                continue;
            }

            match read_toml::<Preset>(&path) {
                Ok(preset) => presets.push(preset),
                Err(e) => tracing::warn!("Skipping unreadable preset {}: {}", path.display(), e),
            }
        }

        presets.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(presets)
    }

    pub fn load(&self, name: &str) -> Result<Preset> {
        let path = self.preset_path(name)?;
        if !path.exists() {
            return Err(MulliganError::PresetNotFound(name.to_string()));
        }

        debug!("Loading preset from {}", path.display());
        read_toml(&path)
    }

    /// Save a preset, replacing any preset with the same name
    pub fn save(&self, preset: &Preset) -> Result<PathBuf> {
        let path = self.preset_path(&preset.name)?;
        write_toml(&path, preset)?;
        info!("Saved preset '{}' to {}", preset.name, path.display());
        Ok(path)
    }

    pub fn delete(&self, name: &str) -> Result<()> {
        let path = self.preset_path(name)?;
        if !path.exists() {
            return Err(MulliganError::PresetNotFound(name.to_string()));
        }

        fs::remove_file(&path)?;
        info!("Deleted preset '{}'", name);
        Ok(())
    }

    fn preset_path(&self, name: &str) -> Result<PathBuf> {
        validate_preset_name(name)?;
        Ok(self.dir.join(format!("{}.toml", name)))
    }
}

/// Preset names become file names, so keep them to a safe alphabet
pub fn validate_preset_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(MulliganError::InvalidPresetName(name.to_string()))
    }
}

/// Remember the sequence used by the last apply
pub fn save_last_used(path: &Path, sequence: &RenameOperationSequence) -> Result<()> {
    write_toml(path, sequence)
}

/// The sequence used by the last apply, if any
pub fn load_last_used(path: &Path) -> Result<Option<RenameOperationSequence>> {
    if !path.exists() {
        return Ok(None);
    }
    read_toml(path).map(Some)
}

fn read_toml<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path)?;
    Ok(toml::from_str(&contents)?)
}

fn write_toml<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let contents = toml::to_string_pretty(value)?;

    // Write atomically: temp file + rename
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, contents)?;
    fs::rename(temp_path, path)?;

    Ok(())
}
