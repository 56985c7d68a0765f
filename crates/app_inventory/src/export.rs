use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

use tracing::info;

use crate::api::installations::InstallationRecord;
use crate::errors::Result;

#[cfg(test)]
#[path = "export_tests.rs"]
mod export_tests;

#[derive(Debug, PartialEq, Eq)]
pub enum WriteOutcome {
    Written { path: PathBuf, rows: usize },
    NoRecords,
}

/// Writes the records to `path` as CSV with a header row.
///
/// An empty slice is not an error: nothing is created on disk and the caller gets
/// [`WriteOutcome::NoRecords`].
pub fn write_records(records: &[InstallationRecord], path: &Path) -> Result<WriteOutcome> {
    if records.is_empty() {
        info!("No apps found.");
        return Ok(WriteOutcome::NoRecords);
    }

    let file = File::create(path)?;
    let rows = write_to(records, file)?;

    info!("Data written to {}", path.display());
    Ok(WriteOutcome::Written {
        path: path.to_path_buf(),
        rows,
    })
}

pub fn write_to<W: Write>(records: &[InstallationRecord], sink: W) -> Result<usize> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .terminator(csv::Terminator::CRLF)
        .from_writer(sink);

    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(records.len())
}
