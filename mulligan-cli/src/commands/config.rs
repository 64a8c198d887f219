use anyhow::{bail, Context, Result};
use std::path::Path;

use mulligan::config::Config;

/// Write a default config to ./mulligan.toml, or the user config with `global`
pub fn init(global: bool, force: bool) -> Result<()> {
    let path = if global {
        Config::user_config_path().context("Could not determine home directory")?
    } else {
        Config::project_config_path()
    };

    write_default(&path, force)?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

fn write_default(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Config file already exists: {} (pass --force to overwrite)",
            path.display()
        );
    }
    Config::create_default_config(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_write_default_refuses_overwrite() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("mulligan.toml");

        write_default(&path, false).unwrap();
        let config = Config::load(Some(path.as_path())).unwrap();
        assert!(config.apply.write_journal);

        fs::write(&path, "[apply]\nallow_warnings = true\n").unwrap();
        assert!(write_default(&path, false).is_err());
        assert!(Config::load(Some(path.as_path())).unwrap().apply.allow_warnings);

        write_default(&path, true).unwrap();
        assert!(!Config::load(Some(path.as_path())).unwrap().apply.allow_warnings);
    }
}
