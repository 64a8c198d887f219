pub mod apply;
pub mod config;
pub mod ops;
pub mod preset;
pub mod preview;
pub mod undo;

use anyhow::{bail, Context, Result};
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};

use mulligan::config::Config;
use mulligan::presets::{load_last_used, PresetStore};
use mulligan::rename::{FileSelection, FileStore};
use mulligan::sequence::RenameOperationSequence;

/// Which files to rename
#[derive(Args, Debug, Clone)]
pub struct SelectionArgs {
    /// Files to rename, in batch order (overrides --dir)
    pub paths: Vec<PathBuf>,

    /// Directory to pick files from (defaults to current directory)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Only pick files whose name matches this glob (e.g. "*.png")
    #[arg(short, long)]
    pub glob: Option<String>,

    /// Walk into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Rename the whole file name, extension included
    #[arg(long)]
    pub include_extension: bool,

    /// Pick up hidden files
    #[arg(long)]
    pub include_hidden: bool,
}

/// Where the rename sequence comes from
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct SequenceArgs {
    /// Sequence file (TOML, or JSON with a .json extension)
    #[arg(short, long)]
    pub sequence: Option<PathBuf>,

    /// Saved preset name
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Rerun the sequence from the last apply
    #[arg(long)]
    pub last: bool,
}

impl SelectionArgs {
    /// Build the file store, filling unset options from config
    pub fn into_store(self, config: &Config) -> Result<FileStore> {
        let include_extension = self.include_extension || config.selection.include_extension;

        if !self.paths.is_empty() {
            for path in &self.paths {
                if !path.is_file() {
                    bail!("Not a file: {}", path.display());
                }
            }
            return Ok(FileStore::from_paths(self.paths, include_extension));
        }

        let selection = FileSelection {
            root: self.dir.unwrap_or_else(|| PathBuf::from(".")),
            glob: self.glob.or_else(|| config.selection.glob.clone()),
            recursive: self.recursive || config.selection.recursive,
            include_hidden: self.include_hidden || config.selection.include_hidden,
        };

        FileStore::scan(&selection, include_extension)
            .with_context(|| format!("Failed to scan {}", selection.root.display()))
    }
}

impl SequenceArgs {
    pub fn load(&self, config: &Config) -> Result<RenameOperationSequence> {
        if let Some(path) = &self.sequence {
            return load_sequence_file(path);
        }

        if let Some(name) = &self.preset {
            let store = PresetStore::new(config.presets_dir()?);
            let preset = store
                .load(name)
                .with_context(|| format!("Failed to load preset '{}'", name))?;
            return Ok(preset.sequence());
        }

        let path = config.last_used_path()?;
        load_last_used(&path)?.context("No sequence has been applied yet; nothing to rerun")
    }
}

/// Read a sequence file, picking the format from its extension
pub fn load_sequence_file(path: &Path) -> Result<RenameOperationSequence> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read sequence file: {}", path.display()))?;

    let sequence = if path.extension().and_then(|e| e.to_str()) == Some("json") {
        RenameOperationSequence::from_json_str(&contents)
    } else {
        RenameOperationSequence::from_toml_str(&contents)
    };

    sequence.with_context(|| format!("Failed to parse sequence file: {}", path.display()))
}

/// Current paths of every entry, used to label preview rows
pub fn entry_labels(store: &FileStore) -> Vec<String> {
    store
        .entities()
        .iter()
        .filter_map(|entity| store.path(entity).ok())
        .map(|path| path.display().to_string())
        .collect()
}

/// Fail with a listing of misconfigured operations
pub fn ensure_no_errors(sequence: &RenameOperationSequence) -> Result<()> {
    let errors = sequence.errors();
    if errors.is_empty() {
        return Ok(());
    }

    let details: Vec<String> = errors
        .iter()
        .map(|(position, message)| format!("  operation {}: {}", position + 1, message))
        .collect();
    bail!(
        "The sequence has {} misconfigured operation(s):\n{}",
        errors.len(),
        details.join("\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use mulligan::operations::AddStringOperation;
    use tempfile::TempDir;

    #[test]
    fn test_load_sequence_file_by_extension() {
        let temp = TempDir::new().unwrap();
        let sequence = RenameOperationSequence::new().push(AddStringOperation::new("SM_", ""));

        let toml_path = temp.path().join("seq.toml");
        fs::write(&toml_path, sequence.to_toml_string().unwrap()).unwrap();
        assert_eq!(load_sequence_file(&toml_path).unwrap(), sequence);

        let json_path = temp.path().join("seq.json");
        fs::write(&json_path, sequence.to_json_string().unwrap()).unwrap();
        assert_eq!(load_sequence_file(&json_path).unwrap(), sequence);

        fs::write(&json_path, "not json").unwrap();
        assert!(load_sequence_file(&json_path).is_err());
    }

    #[test]
    fn test_explicit_paths_must_exist() {
        let temp = TempDir::new().unwrap();
        let args = SelectionArgs {
            paths: vec![temp.path().join("missing.png")],
            dir: None,
            glob: None,
            recursive: false,
            include_extension: false,
            include_hidden: false,
        };
        assert!(args.into_store(&Config::default()).is_err());
    }

    #[test]
    fn test_sequence_errors_block() {
        use mulligan::operations::ReplaceStringOperation;

        let sequence = RenameOperationSequence::new().push(ReplaceStringOperation::regex("(", ""));
        let err = ensure_no_errors(&sequence).unwrap_err();
        assert!(err.to_string().contains("operation 1"));
    }
}
