//! Column type inference shared by the CSV and Excel readers.
//!
//! Each reader classifies its cells into a [`CellKind`]; [`unify_column`] then picks one
//! [`DataType`] for the whole column and the reader converts cells accordingly.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::error::{CleanerError, CleanerResult};
use crate::types::{DataType, Value};

/// Raw cell tokens read as missing values.
pub const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Whether a raw cell is one of the [`NA_TOKENS`]. The match is exact.
pub fn is_na_token(raw: &str) -> bool {
    NA_TOKENS.contains(&raw)
}

/// What a single cell looks like before the column type is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Missing,
    Int,
    Float,
    Bool,
    Date,
    Text,
}

/// Classify a raw text cell.
pub fn classify_text(raw: &str) -> CellKind {
    if is_na_token(raw) {
        return CellKind::Missing;
    }
    let trimmed = raw.trim();
    if trimmed.parse::<i64>().is_ok() {
        CellKind::Int
    } else if trimmed.parse::<f64>().is_ok() {
        CellKind::Float
    } else if parse_bool_token(trimmed).is_some() {
        CellKind::Bool
    } else {
        CellKind::Text
    }
}

/// Pick the column type that holds every non-missing cell.
///
/// Integers widen to floats; any other mix, any text, or a column with no values at all
/// becomes [`DataType::Utf8`].
pub fn unify_column(kinds: impl IntoIterator<Item = CellKind>) -> DataType {
    let mut seen: Option<DataType> = None;
    for kind in kinds {
        let next = match kind {
            CellKind::Missing => continue,
            CellKind::Int => DataType::Int64,
            CellKind::Float => DataType::Float64,
            CellKind::Bool => DataType::Bool,
            CellKind::Date => DataType::Date,
            CellKind::Text => return DataType::Utf8,
        };
        seen = match (seen, next) {
            (None, t) => Some(t),
            (Some(a), b) if a == b => Some(a),
            (Some(DataType::Int64), DataType::Float64)
            | (Some(DataType::Float64), DataType::Int64) => Some(DataType::Float64),
            _ => return DataType::Utf8,
        };
    }
    seen.unwrap_or(DataType::Utf8)
}

/// Convert a raw text cell into a value of an inferred column type.
///
/// Text columns keep the cell exactly as read; the cleaning steps do the trimming.
pub fn text_to_inferred_value(raw: &str, data_type: DataType) -> Value {
    if is_na_token(raw) {
        return Value::Null;
    }
    let trimmed = raw.trim();
    let parsed = match data_type {
        DataType::Int64 => trimmed.parse().ok().map(Value::Int64),
        DataType::Float64 => trimmed.parse().ok().map(Value::Float64),
        DataType::Bool => parse_bool_token(trimmed).map(Value::Bool),
        DataType::Date => parse_iso_date(trimmed).map(Value::Date),
        DataType::Utf8 => None,
    };
    parsed.unwrap_or_else(|| Value::Utf8(raw.to_string()))
}

/// Parse a raw text cell into the type forced by an explicit schema.
///
/// `row` is the 1-based row number reported in errors.
pub fn text_to_typed_value(
    row: usize,
    column: &str,
    data_type: DataType,
    raw: &str,
) -> CleanerResult<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || is_na_token(raw) {
        return Ok(Value::Null);
    }

    let parse_error = |message: String| CleanerError::ParseError {
        row,
        column: column.to_owned(),
        raw: raw.to_owned(),
        message,
    };

    match data_type {
        DataType::Utf8 => Ok(Value::Utf8(raw.to_owned())),
        DataType::Int64 => trimmed
            .parse::<i64>()
            .map(Value::Int64)
            .map_err(|e| parse_error(e.to_string())),
        DataType::Float64 => trimmed
            .parse::<f64>()
            .map(Value::Float64)
            .map_err(|e| parse_error(e.to_string())),
        DataType::Bool => parse_bool_token(trimmed)
            .map(Value::Bool)
            .ok_or_else(|| parse_error("expected bool (true/false)".to_string())),
        DataType::Date => parse_iso_date(trimmed)
            .map(Value::Date)
            .ok_or_else(|| parse_error("expected date (YYYY-MM-DD)".to_string())),
    }
}

/// Make header names usable as unique column names.
///
/// Blank headers become `Unnamed: {index}` and repeated headers get a `.1`, `.2`, ... suffix.
pub fn dedupe_headers(raw: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::new();
    let mut out = Vec::new();
    for (idx, header) in raw.into_iter().enumerate() {
        let base = if header.trim().is_empty() {
            format!("Unnamed: {idx}")
        } else {
            header
        };
        let mut name = base.clone();
        let mut n = 1;
        while used.contains(&name) {
            name = format!("{base}.{n}");
            n += 1;
        }
        used.insert(name.clone());
        out.push(name);
    }
    out
}

fn parse_bool_token(s: &str) -> Option<bool> {
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}
