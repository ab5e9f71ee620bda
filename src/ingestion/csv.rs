//! CSV ingestion implementation.

use std::io::Read;
use std::path::Path;

use crate::error::{CleanerError, CleanerResult};
use crate::types::{DataSet, Field, Schema, Value};

use super::infer::{
    classify_text, dedupe_headers, text_to_inferred_value, text_to_typed_value, unify_column,
};

/// Ingest a CSV file into an in-memory [`DataSet`].
///
/// Rules:
///
/// - CSV must have a header row.
/// - Without a schema, every header becomes a column and column types are inferred.
/// - With a schema, headers must contain all schema fields (order can differ) and each value is
///   parsed according to the schema field type.
/// - Rows shorter than the header are padded with missing cells.
pub fn ingest_csv_from_path(
    path: impl AsRef<Path>,
    schema: Option<&Schema>,
) -> CleanerResult<DataSet> {
    let mut rdr = reader_builder().from_path(path)?;
    ingest_csv_from_reader(&mut rdr, schema)
}

/// Ingest CSV data held in memory, e.g. an uploaded file.
pub fn ingest_csv_from_bytes(bytes: &[u8], schema: Option<&Schema>) -> CleanerResult<DataSet> {
    let mut rdr = reader_builder().from_reader(bytes);
    ingest_csv_from_reader(&mut rdr, schema)
}

/// Ingest CSV data from an existing CSV reader.
///
/// The reader should be `flexible` so short rows reach the padding logic instead of failing.
pub fn ingest_csv_from_reader<R: Read>(
    rdr: &mut csv::Reader<R>,
    schema: Option<&Schema>,
) -> CleanerResult<DataSet> {
    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_owned).collect();
    if headers.is_empty() {
        return Err(CleanerError::SchemaMismatch {
            message: "no header row found".to_string(),
        });
    }

    let mut records: Vec<csv::StringRecord> = Vec::new();
    for (row_idx0, result) in rdr.records().enumerate() {
        let record = result?;
        if record.len() > headers.len() {
            // Report 1-based row number for users; +1 again because header is row 1.
            return Err(CleanerError::SchemaMismatch {
                message: format!(
                    "row {} has {} fields, header has {}",
                    row_idx0 + 2,
                    record.len(),
                    headers.len()
                ),
            });
        }
        records.push(record);
    }

    match schema {
        Some(schema) => project_with_schema(&headers, &records, schema),
        None => Ok(infer_dataset(headers, &records)),
    }
}

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(true).flexible(true);
    builder
}

fn infer_dataset(headers: Vec<String>, records: &[csv::StringRecord]) -> DataSet {
    let names = dedupe_headers(headers);

    let fields: Vec<Field> = names
        .into_iter()
        .enumerate()
        .map(|(idx, name)| {
            let data_type = unify_column(records.iter().map(|r| classify_text(cell(r, idx))));
            Field::new(name, data_type)
        })
        .collect();

    let rows = records
        .iter()
        .map(|record| {
            fields
                .iter()
                .enumerate()
                .map(|(idx, field)| text_to_inferred_value(cell(record, idx), field.data_type))
                .collect()
        })
        .collect();

    DataSet::new(Schema::new(fields), rows)
}

fn cell(record: &csv::StringRecord, idx: usize) -> &str {
    record.get(idx).unwrap_or("")
}

fn project_with_schema(
    headers: &[String],
    records: &[csv::StringRecord],
    schema: &Schema,
) -> CleanerResult<DataSet> {
    // Map schema fields -> CSV column indexes (allows re-ordered CSV columns).
    let mut col_idxs = Vec::with_capacity(schema.fields.len());
    for field in &schema.fields {
        match headers.iter().position(|h| *h == field.name) {
            Some(idx) => col_idxs.push(idx),
            None => {
                return Err(CleanerError::SchemaMismatch {
                    message: format!(
                        "missing required column '{field}'. headers={headers:?}",
                        field = field.name
                    ),
                });
            }
        }
    }

    let mut rows: Vec<Vec<Value>> = Vec::with_capacity(records.len());
    for (row_idx0, record) in records.iter().enumerate() {
        let user_row = row_idx0 + 2;
        let mut row: Vec<Value> = Vec::with_capacity(schema.fields.len());
        for (field, &csv_idx) in schema.fields.iter().zip(col_idxs.iter()) {
            let raw = cell(record, csv_idx);
            row.push(text_to_typed_value(user_row, &field.name, field.data_type, raw)?);
        }
        rows.push(row);
    }

    Ok(DataSet::new(schema.clone(), rows))
}
