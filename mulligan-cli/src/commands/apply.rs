use anyhow::{anyhow, bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use super::{ensure_no_errors, entry_labels, SelectionArgs, SequenceArgs};
use mulligan::config::Config;
use mulligan::core::output::{OutputFormat, OutputWriter};
use mulligan::presets::save_last_used;
use mulligan::rename::{
    BulkRenamePreview, EntryId, FileStore, ObjectNameDelta, RenameJournal, RenameTransaction,
    TransactionMode,
};

pub struct ApplyOptions {
    pub dry_run: bool,
    pub allow_warnings: bool,
}

pub fn run(
    selection: SelectionArgs,
    sequence: SequenceArgs,
    options: ApplyOptions,
    config: &Config,
    format: OutputFormat,
) -> Result<()> {
    let sequence = sequence.load(config)?;
    ensure_no_errors(&sequence)?;

    let mut store = selection.into_store(config)?;
    let entities = store.entities();

    let preview = BulkRenamePreview::generate_for_store(&store, &entities, &sequence)
        .context("Failed to read current names")?;

    if preview.has_warnings() && !(options.allow_warnings || config.apply.allow_warnings) {
        if format != OutputFormat::Json {
            OutputWriter::new(format)
                .with_strategy(config.preview.diff_strategy)
                .write_preview(&preview, &entry_labels(&store))?;
        }
        bail!(
            "Preview has {} warning(s); fix the sequence or pass --allow-warnings",
            preview.warning_count()
        );
    }

    let mode = if options.dry_run {
        TransactionMode::DryRun
    } else {
        TransactionMode::Execute
    };
    let mut transaction = RenameTransaction::plan(&store, &entities, &sequence, mode)
        .context("Failed to plan renames")?;

    if transaction.deltas().is_empty() {
        if format != OutputFormat::Json {
            println!("Nothing to rename.");
        }
        return Ok(());
    }

    info!(
        "Renaming {} of {} file(s)",
        transaction.deltas().len(),
        entities.len()
    );

    let progress = ProgressBar::new(0);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .context("Invalid progress bar template")?
            .progress_chars("=>-"),
    );
    if mode == TransactionMode::DryRun || format == OutputFormat::Json {
        progress.set_draw_target(indicatif::ProgressDrawTarget::hidden());
    }
    progress.set_message("renaming");

    if mode == TransactionMode::Execute {
        let journal = config.journal_path()?;
        RenameJournal::clear(&journal).with_context(|| {
            format!("Failed to discard old undo journal: {}", journal.display())
        })?;
    }

    let outcome = transaction.commit(&mut store, |done, total| {
        progress.set_length(total as u64);
        progress.set_position(done as u64);
    });

    match outcome {
        Ok(report) => {
            progress.finish_and_clear();

            if mode == TransactionMode::Execute {
                if config.apply.write_journal {
                    write_journal(config, &store, &report.deltas)?;
                }
                save_last_used(&config.last_used_path()?, &sequence)
                    .context("Failed to remember the last used sequence")?;
            }

            OutputWriter::new(format).write_report(&report)?;
            Ok(())
        }
        Err(e) => {
            progress.abandon_with_message("failed");

            if e.applied.is_empty() {
                return Err(anyhow!(e)).context("Rename failed; no file was renamed");
            }

            warn!("{} rename(s) were applied before the failure", e.applied.len());
            if !config.apply.write_journal {
                return Err(anyhow!(e)).context("Rename failed partway; undo journal is disabled");
            }

            write_journal(config, &store, &e.applied)?;
            Err(anyhow!(e)).context("Rename failed; run `mulligan undo` to revert what was applied")
        }
    }
}

fn write_journal(
    config: &Config,
    store: &FileStore,
    deltas: &[ObjectNameDelta<EntryId>],
) -> Result<()> {
    let path = config.journal_path()?;
    RenameJournal::from_deltas(store, deltas)?
        .save(&path)
        .with_context(|| format!("Failed to write undo journal: {}", path.display()))?;
    info!("Wrote undo journal to {}", path.display());
    Ok(())
}
