use anyhow::{Context, Result};

use super::{entry_labels, SelectionArgs, SequenceArgs};
use mulligan::config::Config;
use mulligan::core::output::{OutputFormat, OutputWriter};
use mulligan::rename::BulkRenamePreview;

pub fn run(
    selection: SelectionArgs,
    sequence: SequenceArgs,
    stages: bool,
    config: &Config,
    format: OutputFormat,
) -> Result<()> {
    let sequence = sequence.load(config)?;
    let store = selection.into_store(config)?;

    if store.is_empty() {
        match format {
            OutputFormat::Json => println!("[]"),
            _ => println!("No files selected."),
        }
        return Ok(());
    }

    let preview = BulkRenamePreview::generate_for_store(&store, &store.entities(), &sequence)
        .context("Failed to read current names")?;

    OutputWriter::new(format)
        .with_strategy(config.preview.diff_strategy)
        .with_stages(stages || config.preview.show_stages)
        .write_preview(&preview, &entry_labels(&store))?;

    if format == OutputFormat::Text {
        for (position, message) in sequence.errors() {
            println!("❌ Operation {} is misconfigured: {}", position + 1, message);
        }
        if preview.changed_count() > 0 && !sequence.has_errors() {
            println!("\n💡 Run `mulligan apply` with the same arguments to rename");
        }
    }

    Ok(())
}
