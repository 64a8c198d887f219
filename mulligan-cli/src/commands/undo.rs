use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use mulligan::config::Config;
use mulligan::core::output::{OutputFormat, OutputWriter};
use mulligan::rename::{revert, RenameJournal};

/// Revert the renames recorded by the last apply
pub fn run(config: &Config, format: OutputFormat) -> Result<()> {
    let path = config.journal_path()?;
    let journal = RenameJournal::load(&path)
        .with_context(|| format!("Failed to read undo journal: {}", path.display()))?;

    let Some(journal) = journal.filter(|j| !j.is_empty()) else {
        if format != OutputFormat::Json {
            println!("Nothing to undo.");
        }
        return Ok(());
    };

    let (mut store, deltas) = journal.to_store();
    info!("Undoing {} rename(s)", deltas.len());

    let progress = ProgressBar::new(0);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .context("Invalid progress bar template")?
            .progress_chars("=>-"),
    );
    if format == OutputFormat::Json {
        progress.set_draw_target(indicatif::ProgressDrawTarget::hidden());
    }
    progress.set_message("reverting");

    let report = revert(&mut store, &deltas, |done, total| {
        progress.set_length(total as u64);
        progress.set_position(done as u64);
    })
    .map_err(|e| {
        progress.abandon_with_message("failed");
        anyhow!(e)
    })
    .with_context(|| format!("Undo failed; the journal is kept at {}", path.display()))?;
    progress.finish_and_clear();

    RenameJournal::clear(&path)?;
    OutputWriter::new(format).write_report(&report)?;
    Ok(())
}
