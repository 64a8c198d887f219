use anyhow::{Context, Result};
use std::path::Path;

use super::load_sequence_file;
use mulligan::config::Config;
use mulligan::core::output::{OutputFormat, OutputWriter};
use mulligan::presets::{Preset, PresetStore};

fn open(config: &Config) -> Result<PresetStore> {
    Ok(PresetStore::new(config.presets_dir()?))
}

pub fn list(config: &Config, format: OutputFormat) -> Result<()> {
    let presets = open(config)?.list().context("Failed to list presets")?;
    OutputWriter::new(format).write_presets(&presets)
}

pub fn show(name: &str, config: &Config, format: OutputFormat) -> Result<()> {
    let preset = open(config)?
        .load(name)
        .with_context(|| format!("Failed to load preset '{}'", name))?;
    OutputWriter::new(format).write_preset(&preset)
}

pub fn save(
    name: &str,
    sequence_file: &Path,
    description: Option<String>,
    config: &Config,
) -> Result<()> {
    let sequence = load_sequence_file(sequence_file)?;
    let preset = Preset::new(name, description.unwrap_or_default(), &sequence);

    let path = open(config)?
        .save(&preset)
        .with_context(|| format!("Failed to save preset '{}'", name))?;
    println!("✓ Saved preset '{}' to {}", name, path.display());
    Ok(())
}

pub fn delete(name: &str, config: &Config) -> Result<()> {
    open(config)?
        .delete(name)
        .with_context(|| format!("Failed to delete preset '{}'", name))?;
    println!("✓ Deleted preset '{}'", name);
    Ok(())
}
