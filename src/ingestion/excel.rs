#![cfg(feature = "excel")]

use std::path::Path;

use calamine::{Data, DataType as _, Range, Reader, open_workbook_auto};
use chrono::{NaiveDate, NaiveTime};

use crate::error::{CleanerError, CleanerResult};
use crate::types::{DataSet, DataType, Field, Schema, Value};

use super::infer::{CellKind, classify_text, dedupe_headers, is_na_token, unify_column};

/// Ingest an Excel document (`.xlsx`, `.xls`, `.ods`, etc.) into an in-memory `DataSet`.
///
/// Behavior:
/// - Picks `sheet_name` if provided; otherwise uses the first sheet in the workbook
/// - Detects the first non-empty row as the header row
/// - Without a schema, infers column types from the cells (date cells become `Date`)
/// - With a schema, validates that all schema fields exist as headers and converts cells to the
///   field types
pub fn ingest_excel_from_path(
    path: impl AsRef<Path>,
    sheet_name: Option<&str>,
    schema: Option<&Schema>,
) -> CleanerResult<DataSet> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet = match sheet_name {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| CleanerError::SchemaMismatch {
                message: "workbook has no sheets".to_string(),
            })?,
    };
    let range = workbook.worksheet_range(&sheet)?;
    let (headers, rows) = read_sheet(&sheet, &range)?;
    build_dataset(headers, rows, schema)
}

/// Ingest multiple sheets from an Excel workbook and concatenate all rows into one `DataSet`.
///
/// - If `sheet_names` is `None`, ingests **all sheets** in workbook order.
/// - If `sheet_names` is `Some(&[...])`, ingests only those sheets (in the provided order).
///
/// Every sheet must carry the same header row as the first one.
pub fn ingest_excel_workbook_from_path(
    path: impl AsRef<Path>,
    sheet_names: Option<&[&str]>,
    schema: Option<&Schema>,
) -> CleanerResult<DataSet> {
    let mut workbook = open_workbook_auto(path)?;

    let sheets: Vec<String> = match sheet_names {
        Some(names) => names.iter().map(|s| s.to_string()).collect(),
        None => workbook.sheet_names().to_vec(),
    };
    if sheets.is_empty() {
        return Err(CleanerError::SchemaMismatch {
            message: "workbook has no sheets".to_string(),
        });
    }

    let mut headers: Option<Vec<String>> = None;
    let mut all_rows: Vec<Vec<Data>> = Vec::new();
    for sheet in sheets {
        let range = workbook.worksheet_range(&sheet)?;
        let (sheet_headers, mut sheet_rows) = read_sheet(&sheet, &range)?;
        match &headers {
            Some(first) if *first != sheet_headers => {
                return Err(CleanerError::SchemaMismatch {
                    message: format!(
                        "sheet '{sheet}': headers {sheet_headers:?} differ from first sheet {first:?}"
                    ),
                });
            }
            Some(_) => {}
            None => headers = Some(sheet_headers),
        }
        all_rows.append(&mut sheet_rows);
    }

    build_dataset(headers.unwrap_or_default(), all_rows, schema)
}

/// Split a sheet into its header names and the (padded) data rows below them.
fn read_sheet(sheet: &str, range: &Range<Data>) -> CleanerResult<(Vec<String>, Vec<Vec<Data>>)> {
    let mut rows = range.rows().skip_while(|row| row.iter().all(|c| matches!(c, Data::Empty)));

    let header_cells = rows.next().ok_or_else(|| CleanerError::SchemaMismatch {
        message: format!("sheet '{sheet}': no non-empty rows (no header row found)"),
    })?;
    let headers: Vec<String> = header_cells.iter().map(cell_to_header_string).collect();
    let width = headers.len();

    let data = rows
        .filter(|row| row.iter().any(|c| !matches!(c, Data::Empty)))
        .map(|row| {
            let mut cells = row.to_vec();
            cells.resize(width, Data::Empty);
            cells
        })
        .collect();

    Ok((headers, data))
}

fn build_dataset(
    headers: Vec<String>,
    rows: Vec<Vec<Data>>,
    schema: Option<&Schema>,
) -> CleanerResult<DataSet> {
    match schema {
        Some(schema) => project_with_schema(&headers, &rows, schema),
        None => Ok(infer_dataset(headers, &rows)),
    }
}

fn infer_dataset(headers: Vec<String>, rows: &[Vec<Data>]) -> DataSet {
    let fields: Vec<Field> = dedupe_headers(headers)
        .into_iter()
        .enumerate()
        .map(|(idx, name)| {
            let data_type = unify_column(rows.iter().map(|row| classify_cell(&row[idx])));
            Field::new(name, data_type)
        })
        .collect();

    let out_rows = rows
        .iter()
        .map(|row| {
            fields
                .iter()
                .zip(row)
                .map(|(field, cell)| cell_to_inferred_value(cell, field.data_type))
                .collect()
        })
        .collect();

    DataSet::new(Schema::new(fields), out_rows)
}

fn project_with_schema(
    headers: &[String],
    rows: &[Vec<Data>],
    schema: &Schema,
) -> CleanerResult<DataSet> {
    let mut col_idxs: Vec<usize> = Vec::with_capacity(schema.fields.len());
    for f in &schema.fields {
        match headers.iter().position(|h| h.trim() == f.name) {
            Some(idx) => col_idxs.push(idx),
            None => {
                return Err(CleanerError::SchemaMismatch {
                    message: format!("missing required column '{}'. headers={headers:?}", f.name),
                });
            }
        }
    }

    let mut out: Vec<Vec<Value>> = Vec::with_capacity(rows.len());
    for (idx0, row) in rows.iter().enumerate() {
        // 1-based, counting the header row.
        let user_row = idx0 + 2;
        let mut out_row: Vec<Value> = Vec::with_capacity(schema.fields.len());
        for (field, &col_idx) in schema.fields.iter().zip(col_idxs.iter()) {
            out_row.push(convert_cell(user_row, &field.name, field.data_type, &row[col_idx])?);
        }
        out.push(out_row);
    }

    Ok(DataSet::new(schema.clone(), out))
}

fn classify_cell(c: &Data) -> CellKind {
    match c {
        Data::Empty | Data::Error(_) => CellKind::Missing,
        Data::Int(_) => CellKind::Int,
        Data::Float(f) if f.fract() == 0.0 && f.is_finite() => CellKind::Int,
        Data::Float(_) => CellKind::Float,
        Data::Bool(_) => CellKind::Bool,
        Data::DateTime(dt) if !dt.is_duration() && c.as_date().is_some() => CellKind::Date,
        Data::DateTimeIso(_) if c.as_date().is_some() => CellKind::Date,
        Data::String(s) => classify_text(s),
        _ => CellKind::Text,
    }
}

fn cell_to_inferred_value(c: &Data, data_type: DataType) -> Value {
    match (c, data_type) {
        (Data::Empty | Data::Error(_), _) => Value::Null,
        (Data::String(s), _) if is_na_token(s) => Value::Null,
        (Data::Int(i), DataType::Int64) => Value::Int64(*i),
        (Data::Float(f), DataType::Int64) => Value::Int64(*f as i64),
        (Data::Int(i), DataType::Float64) => Value::Float64(*i as f64),
        (Data::Float(f), DataType::Float64) => Value::Float64(*f),
        (Data::Bool(b), DataType::Bool) => Value::Bool(*b),
        (_, DataType::Date) => c.as_date().map(Value::Date).unwrap_or(Value::Null),
        (Data::String(s), DataType::Int64) => {
            s.trim().parse().map(Value::Int64).unwrap_or(Value::Null)
        }
        (Data::String(s), DataType::Float64) => {
            s.trim().parse().map(Value::Float64).unwrap_or(Value::Null)
        }
        (Data::String(s), DataType::Bool) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ => Value::Null,
        },
        _ => Value::Utf8(cell_to_string(c)),
    }
}

fn cell_to_header_string(c: &Data) -> String {
    match c {
        Data::Float(f) if f.fract() == 0.0 => (*f as i64).to_string(),
        Data::Error(e) => format!("{e:?}"),
        Data::Empty => String::new(),
        _ => cell_to_string(c),
    }
}

/// Text rendering of a cell in a text column. Dates drop a midnight time component.
fn cell_to_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Float(f) => Value::Float64(*f).to_string(),
        Data::DateTime(dt) if !dt.is_duration() => match c.as_datetime() {
            Some(ts) if ts.time() == NaiveTime::MIN => ts.date().format("%Y-%m-%d").to_string(),
            Some(ts) => ts.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => c.to_string(),
        },
        _ => c.to_string(),
    }
}

fn convert_cell(row: usize, column: &str, data_type: DataType, c: &Data) -> CleanerResult<Value> {
    if matches!(c, Data::Empty) {
        return Ok(Value::Null);
    }
    if let Data::String(s) = c {
        if s.trim().is_empty() || is_na_token(s) {
            return Ok(Value::Null);
        }
    }

    let parse_error = |message: &str| CleanerError::ParseError {
        row,
        column: column.to_string(),
        raw: cell_to_string(c),
        message: message.to_string(),
    };

    match data_type {
        DataType::Utf8 => Ok(Value::Utf8(cell_to_string(c))),
        DataType::Bool => match c {
            Data::Bool(b) => Ok(Value::Bool(*b)),
            Data::Int(i) => Ok(Value::Bool(*i != 0)),
            Data::Float(f) => Ok(Value::Bool(*f != 0.0)),
            Data::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                _ => Err(parse_error("expected bool (true/false)")),
            },
            _ => Err(parse_error("expected bool")),
        },
        DataType::Int64 => match c {
            Data::Int(i) => Ok(Value::Int64(*i)),
            Data::Float(f) if f.fract() == 0.0 => Ok(Value::Int64(*f as i64)),
            Data::Float(_) => Err(parse_error("expected integer (got non-integer float)")),
            Data::String(s) => s
                .trim()
                .parse::<i64>()
                .map(Value::Int64)
                .map_err(|e| parse_error(&e.to_string())),
            _ => Err(parse_error("expected integer")),
        },
        DataType::Float64 => match c {
            Data::Float(f) => Ok(Value::Float64(*f)),
            Data::Int(i) => Ok(Value::Float64(*i as f64)),
            Data::String(s) => s
                .trim()
                .parse::<f64>()
                .map(Value::Float64)
                .map_err(|e| parse_error(&e.to_string())),
            _ => Err(parse_error("expected number")),
        },
        DataType::Date => match c {
            Data::String(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                .map(Value::Date)
                .map_err(|e| parse_error(&e.to_string())),
            _ => c
                .as_date()
                .map(Value::Date)
                .ok_or_else(|| parse_error("expected date")),
        },
    }
}
