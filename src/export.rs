//! Export of cleaned tables.
//!
//! CSV output has one header row with the column names, no index column, UTF-8 text, empty
//! fields for missing values and `YYYY-MM-DD` dates (see [`crate::types::Value`]'s `Display`).

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::CleanerResult;
use crate::types::{CleaningReport, DataSet};

/// Write `dataset` as CSV to `writer`.
pub fn write_csv<W: Write>(dataset: &DataSet, writer: W) -> CleanerResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(dataset.schema.field_names())?;
    for row in &dataset.rows {
        wtr.write_record(row.iter().map(|v| v.to_string()))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Serialize `dataset` as CSV bytes, ready to be offered as a download.
pub fn to_csv_bytes(dataset: &DataSet) -> CleanerResult<Vec<u8>> {
    let mut buf = Vec::new();
    write_csv(dataset, &mut buf)?;
    Ok(buf)
}

/// Write `dataset` as CSV to a file, replacing it if it exists.
pub fn write_csv_to_path(dataset: &DataSet, path: impl AsRef<Path>) -> CleanerResult<()> {
    let file = File::create(path)?;
    write_csv(dataset, BufWriter::new(file))
}

/// Pretty-printed JSON rendering of a [`CleaningReport`].
pub fn report_to_json(report: &CleaningReport) -> CleanerResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
