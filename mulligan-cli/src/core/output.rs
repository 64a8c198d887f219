use anyhow::Result;
use serde::Serialize;

use crate::diff::{DiffOperation, DiffStrategy, RenameResult};
use crate::operations::RenameOperationKind;
use crate::presets::Preset;
use crate::rename::{ApplyReport, BulkRenamePreview, PreviewWarning, TransactionMode};

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Markdown,
}

pub struct OutputWriter {
    format: OutputFormat,
    strategy: DiffStrategy,
    show_stages: bool,
}

#[derive(Serialize)]
struct PreviewRow<'a> {
    index: usize,
    original_name: String,
    new_name: String,
    changed: bool,
    diff: RenameResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    stages: Option<&'a [RenameResult]>,
    warnings: &'a [PreviewWarning],
}

#[derive(Serialize)]
struct OperationKindRow {
    key: &'static str,
    name: &'static str,
    description: &'static str,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            strategy: DiffStrategy::default(),
            show_stages: false,
        }
    }

    pub fn with_strategy(mut self, strategy: DiffStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_stages(mut self, show_stages: bool) -> Self {
        self.show_stages = show_stages;
        self
    }

    pub fn write_preview(&self, preview: &BulkRenamePreview, labels: &[String]) -> Result<()> {
        print!("{}", self.render_preview(preview, labels)?);
        Ok(())
    }

    /// `labels` name each row (e.g. its path); rows without one use the name
    pub fn render_preview(&self, preview: &BulkRenamePreview, labels: &[String]) -> Result<String> {
        let mut output = String::new();

        match self.format {
            OutputFormat::Json => {
                let rows: Vec<PreviewRow> = preview
                    .iter()
                    .map(|entry| PreviewRow {
                        index: entry.index,
                        original_name: entry.original_name(),
                        new_name: entry.new_name(),
                        changed: entry.is_changed(),
                        diff: entry.summary_diff(self.strategy),
                        stages: self.show_stages.then(|| entry.result.stages()),
                        warnings: &entry.warnings,
                    })
                    .collect();
                output.push_str(&serde_json::to_string_pretty(&rows)?);
                output.push('\n');
            }
            OutputFormat::Text => {
                for entry in preview {
                    let label = labels
                        .get(entry.index)
                        .cloned()
                        .unwrap_or_else(|| entry.original_name());
                    let marker = if entry.is_changed() { "~" } else { "=" };

                    output.push_str(&format!(
                        "{} [{}] {}\n    {}\n",
                        marker,
                        entry.index,
                        label,
                        render_diff(&entry.summary_diff(self.strategy), self.format)
                    ));

                    if self.show_stages {
                        for (stage, result) in entry.result.stages().iter().enumerate() {
                            output.push_str(&format!(
                                "      {}. {}\n",
                                stage + 1,
                                render_diff(result, self.format)
                            ));
                        }
                    }

                    for warning in &entry.warnings {
                        output.push_str(&format!("    ⚠️  {}\n", warning.message()));
                    }
                }

                output.push_str(&format!(
                    "\n📊 {} of {} name(s) change",
                    preview.changed_count(),
                    preview.len()
                ));
                if preview.has_warnings() {
                    output.push_str(&format!(", {} warning(s)", preview.warning_count()));
                }
                output.push('\n');
            }
            OutputFormat::Markdown => {
                output.push_str("# Rename Preview\n\n");
                for entry in preview {
                    output.push_str(&format!(
                        "- **{}** `{}` → `{}`: {}\n",
                        entry.index,
                        entry.original_name(),
                        entry.new_name(),
                        render_diff(&entry.summary_diff(self.strategy), self.format)
                    ));

                    if self.show_stages {
                        for (stage, result) in entry.result.stages().iter().enumerate() {
                            output.push_str(&format!(
                                "  {}. {}\n",
                                stage + 1,
                                render_diff(result, self.format)
                            ));
                        }
                    }

                    for warning in &entry.warnings {
                        output.push_str(&format!("  - ⚠️ {}\n", warning.message()));
                    }
                }

                output.push_str(&format!(
                    "\n**{}** of **{}** name(s) change, **{}** warning(s)\n",
                    preview.changed_count(),
                    preview.len(),
                    preview.warning_count()
                ));
            }
        }

        Ok(output)
    }

    pub fn write_report<E: Serialize>(&self, report: &ApplyReport<E>) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(report)?);
            }
            OutputFormat::Text => {
                print!("{}", report.format_summary());
            }
            OutputFormat::Markdown => {
                println!("# Rename Result\n");
                let mode = match report.mode {
                    TransactionMode::Execute => "execute",
                    TransactionMode::DryRun => "dry_run",
                };
                println!("**Mode:** `{}`\n", mode);
                for delta in &report.deltas {
                    println!("- `{}` → `{}`", delta.old_name, delta.new_name);
                }
                println!("\n**{}** rename(s)", report.renamed_count());
            }
        }
        Ok(())
    }

    pub fn write_presets(&self, presets: &[Preset]) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(presets)?);
            }
            OutputFormat::Text => {
                if presets.is_empty() {
                    println!("No presets saved.");
                }
                for preset in presets {
                    println!(
                        "{} ({} operation{}){}",
                        preset.name,
                        preset.operations.len(),
                        if preset.operations.len() == 1 { "" } else { "s" },
                        if preset.description.is_empty() {
                            String::new()
                        } else {
                            format!(" - {}", preset.description)
                        }
                    );
                }
            }
            OutputFormat::Markdown => {
                println!("# Presets\n");
                for preset in presets {
                    println!("- **{}** ({} operations)", preset.name, preset.operations.len());
                    if !preset.description.is_empty() {
                        println!("  {}", preset.description);
                    }
                }
            }
        }
        Ok(())
    }

    pub fn write_preset(&self, preset: &Preset) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(preset)?);
            }
            OutputFormat::Text => {
                print!("{}", toml::to_string_pretty(preset)?);
            }
            OutputFormat::Markdown => {
                println!("# {}\n", preset.name);
                if !preset.description.is_empty() {
                    println!("{}\n", preset.description);
                }
                for (i, operation) in preset.operations.iter().enumerate() {
                    println!("{}. {}", i + 1, operation.kind().display_name());
                }
                println!("\n```toml\n{}```", toml::to_string_pretty(preset)?);
            }
        }
        Ok(())
    }

    pub fn write_operation_kinds(&self) -> Result<()> {
        let rows: Vec<OperationKindRow> = RenameOperationKind::ALL
            .iter()
            .map(|kind| OperationKindRow {
                key: kind.key(),
                name: kind.display_name(),
                description: kind.description(),
            })
            .collect();

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            }
            OutputFormat::Text => {
                for row in &rows {
                    println!("{:<22} {}", row.key, row.description);
                }
            }
            OutputFormat::Markdown => {
                println!("# Operations\n");
                println!("| Key | Name | Description |");
                println!("|-----|------|-------------|");
                for row in &rows {
                    println!("| `{}` | {} | {} |", row.key, row.name, row.description);
                }
            }
        }
        Ok(())
    }
}

/// Inline rendering of a diff: `[-removed-]{+added+}` in text,
/// `~~removed~~**added**` in Markdown
pub fn render_diff(result: &RenameResult, format: OutputFormat) -> String {
    if result.is_empty() {
        return "(empty)".to_string();
    }

    let mut output = String::new();
    for diff in result.diffs() {
        let (open, close) = match (diff.operation, format) {
            (DiffOperation::Equal, _) => ("", ""),
            (DiffOperation::Deletion, OutputFormat::Markdown) => ("~~", "~~"),
            (DiffOperation::Insertion, OutputFormat::Markdown) => ("**", "**"),
            (DiffOperation::Deletion, _) => ("[-", "-]"),
            (DiffOperation::Insertion, _) => ("{+", "+}"),
        };
        output.push_str(open);
        output.push_str(&diff.text);
        output.push_str(close);
    }
    output
}
