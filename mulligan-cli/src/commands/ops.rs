use anyhow::{anyhow, Result};

use mulligan::core::output::{OutputFormat, OutputWriter};
use mulligan::operations::RenameOperationKind;
use mulligan::sequence::RenameOperationSequence;

pub fn list(format: OutputFormat) -> Result<()> {
    OutputWriter::new(format).write_operation_kinds()
}

/// Print a one-operation sequence with default settings, ready to edit
pub fn template(kind: &str, format: OutputFormat) -> Result<()> {
    let kind: RenameOperationKind = kind.parse().map_err(|e: String| anyhow!(e))?;
    let sequence = RenameOperationSequence::new().push(kind.default_operation());

    match format {
        OutputFormat::Json => println!("{}", sequence.to_json_string()?),
        _ => print!("{}", sequence.to_toml_string()?),
    }
    Ok(())
}
