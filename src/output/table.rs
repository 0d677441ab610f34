//! CSV table writer

use crate::output::OutputResult;
use crate::record::{BookRecord, COLUMNS};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes all records to `path`, replacing any existing file
///
/// The header row is always written, even when there are no records.
///
/// # Arguments
///
/// * `records` - Records in crawl order
/// * `path` - Destination file; missing parent directories are created
pub fn write_table(records: &[BookRecord], path: &Path) -> OutputResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(path)?;
    write_table_to(records, file)?;

    tracing::debug!("Wrote {} rows to {}", records.len(), path.display());
    Ok(())
}

/// Writes all records as CSV to any writer
pub fn write_table_to<W: Write>(records: &[BookRecord], writer: W) -> OutputResult<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    writer.write_record(COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(())
}
