use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::diff::DiffStrategy;

/// Main configuration structure for Mulligan
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub selection: SelectionConfig,

    #[serde(default)]
    pub preview: PreviewConfig,

    #[serde(default)]
    pub apply: ApplyConfig,

    #[serde(default)]
    pub paths: PathsConfig,
}

/// Which files a command picks up when none are listed explicitly
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Rename the whole file name instead of just the stem
    #[serde(default)]
    pub include_extension: bool,

    /// Walk into subdirectories
    #[serde(default)]
    pub recursive: bool,

    /// File name glob applied while walking (e.g. "*.png")
    #[serde(default)]
    pub glob: Option<String>,

    /// Pick up dotfiles and dot-directories
    #[serde(default)]
    pub include_hidden: bool,
}

/// Preview rendering
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// How the original-to-final summary diff is computed
    #[serde(default)]
    pub diff_strategy: DiffStrategy,

    /// Print each operation's diff instead of only the summary
    #[serde(default)]
    pub show_stages: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyConfig {
    /// Apply even when the preview has warnings
    #[serde(default)]
    pub allow_warnings: bool,

    /// Record applied renames so `undo` can revert them
    #[serde(default = "default_write_journal")]
    pub write_journal: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Where presets are stored. Defaults to ~/.config/mulligan/presets
    #[serde(default)]
    pub presets_dir: Option<PathBuf>,

    /// Where the undo journal and last used sequence live. Defaults to ~/.config/mulligan
    #[serde(default)]
    pub state_dir: Option<PathBuf>,
}

fn default_write_journal() -> bool {
    true
}

impl Default for ApplyConfig {
    fn default() -> Self {
        Self {
            allow_warnings: false,
            write_journal: default_write_journal(),
        }
    }
}

impl Config {
    /// Load configuration
    ///
    /// **Config Priority (highest to lowest):**
    /// 1. `explicit` (the `--config` flag); nothing else is read when given
    /// 2. `./mulligan.toml` (project-level config)
    /// 3. `~/.config/mulligan/config.toml` (global user config)
    /// 4. Hardcoded defaults (fallback)
    ///
    /// A higher-priority file replaces lower ones as a whole; fields it leaves
    /// out take their defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            tracing::info!("Loading config from: {}", path.display());
            return Self::load_from_file(path);
        }

        let mut config = Config::default();

        if let Some(global_path) = Self::user_config_path() {
            if global_path.exists() {
                tracing::info!("Loading global config from: {}", global_path.display());
                config = Self::load_from_file(&global_path)?;
            }
        }

        let project_path = Self::project_config_path();
        if project_path.exists() {
            tracing::info!("Loading project config from: {}", project_path.display());
            config = Self::load_from_file(&project_path)?;
        }

        tracing::debug!(
            "Final config: diff_strategy={}, include_extension={}",
            config.preview.diff_strategy.as_str(),
            config.selection.include_extension
        );

        Ok(config)
    }

    /// Load config from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Get the project config path (./mulligan.toml in current directory)
    pub fn project_config_path() -> PathBuf {
        PathBuf::from("mulligan.toml")
    }

    /// Create a default config file at the specified path
    pub fn create_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Config::default();
        let toml_string =
            toml::to_string_pretty(&config).context("Failed to serialize default config")?;

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        fs::write(path.as_ref(), toml_string)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    /// Get the user config directory path (~/.config/mulligan)
    pub fn user_config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config").join("mulligan"))
    }

    /// Get the user config file path (~/.config/mulligan/config.toml)
    pub fn user_config_path() -> Option<PathBuf> {
        Self::user_config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Directory holding saved presets
    pub fn presets_dir(&self) -> Result<PathBuf> {
        match &self.paths.presets_dir {
            Some(dir) => Ok(dir.clone()),
            None => Self::user_config_dir()
                .map(|dir| dir.join("presets"))
                .context("Could not determine home directory for presets"),
        }
    }

    fn state_dir(&self) -> Result<PathBuf> {
        match &self.paths.state_dir {
            Some(dir) => Ok(dir.clone()),
            None => Self::user_config_dir().context("Could not determine home directory"),
        }
    }

    /// Where the last applied sequence is remembered
    pub fn last_used_path(&self) -> Result<PathBuf> {
        Ok(self.state_dir()?.join("last_used.toml"))
    }

    /// Where the undo journal lives
    pub fn journal_path(&self) -> Result<PathBuf> {
        Ok(self.state_dir()?.join("journal.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.selection.include_extension);
        assert!(!config.selection.recursive);
        assert_eq!(config.selection.glob, None);
        assert_eq!(config.preview.diff_strategy, DiffStrategy::Positional);
        assert!(!config.preview.show_stages);
        assert!(!config.apply.allow_warnings);
        assert!(config.apply.write_journal);
        assert_eq!(config.paths.presets_dir, None);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
            [preview]
            diff_strategy = "lcs"

            [selection]
            glob = "*.png"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.preview.diff_strategy, DiffStrategy::Lcs);
        assert_eq!(config.selection.glob.as_deref(), Some("*.png"));
        // Other fields should use defaults
        assert!(!config.preview.show_stages);
        assert!(config.apply.write_journal);
    }

    #[test]
    fn test_invalid_toml() {
        let toml_str = r#"
            [preview
            show_stages = true
        "#;

        let result: std::result::Result<Config, _> = toml::from_str(toml_str);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        let toml_str = r#"
            [preview]
            diff_strategy = "myers"
        "#;

        let result: std::result::Result<Config, _> = toml::from_str(toml_str);
        assert!(result.is_err());
    }

    #[test]
    fn test_create_default_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");

        Config::create_default_config(&config_path).unwrap();

        let config = Config::load(Some(&config_path)).unwrap();
        assert!(config.apply.write_journal);
        assert_eq!(config.preview.diff_strategy, DiffStrategy::Positional);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        assert!(Config::load(Some(&temp_dir.path().join("missing.toml"))).is_err());
    }

    #[test]
    fn test_presets_dir_override() {
        let mut config = Config::default();
        config.paths.presets_dir = Some(PathBuf::from("/tmp/mulligan-presets"));
        assert_eq!(
            config.presets_dir().unwrap(),
            PathBuf::from("/tmp/mulligan-presets")
        );
    }

    #[test]
    fn test_state_dir_override() {
        let config: Config = toml::from_str(
            r#"
[paths]
state_dir = "/tmp/mulligan-state"
"#,
        )
        .unwrap();

        assert_eq!(
            config.journal_path().unwrap(),
            PathBuf::from("/tmp/mulligan-state/journal.json")
        );
        assert_eq!(
            config.last_used_path().unwrap(),
            PathBuf::from("/tmp/mulligan-state/last_used.toml")
        );
    }
}
