use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MulliganError {
    #[error("Index {index} is out of range for {len} item(s)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Name '{0}' is already taken")]
    NameTaken(String),

    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    #[error("Naming store error: {0}")]
    Store(String),

    #[error("Failed to rename {path}: {source}")]
    Rename {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Preset not found: {0}")]
    PresetNotFound(String),

    #[error("Invalid preset name '{0}': use letters, digits, '-' or '_'")]
    InvalidPresetName(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, MulliganError>;
