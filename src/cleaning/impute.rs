//! Missing-value imputation gated by a missingness threshold.

use std::collections::HashMap;

use tracing::debug;

use crate::types::{ColumnKind, DataSet, DataType, Value};

/// Fill missing cells column by column.
///
/// A column is imputed only when its missing fraction is at or below `threshold`. Textual and
/// temporal columns are filled with their mode (ties go to the value seen first); numeric
/// columns with their median. An `Int64` column whose median is fractional becomes `Float64`.
/// Columns above the threshold keep their missing cells. Row and column counts never change.
pub fn impute_missing(dataset: &DataSet, threshold: f64) -> DataSet {
    let mut out = dataset.clone();
    let rows = dataset.row_count();
    if rows == 0 {
        return out;
    }

    for (idx, field) in dataset.schema.fields.iter().enumerate() {
        let missing = dataset.column(idx).filter(|v| v.is_null()).count();
        let fraction = missing as f64 / rows as f64;
        if missing == 0 || missing == rows || fraction > threshold {
            continue;
        }

        let (data_type, fill) = match field.data_type.kind() {
            ColumnKind::Numeric => {
                let Some(mid) = median(dataset.column(idx).filter_map(Value::as_f64)) else {
                    continue;
                };
                match field.data_type {
                    DataType::Int64 if mid.fract() == 0.0 => {
                        (DataType::Int64, Value::Int64(mid as i64))
                    }
                    _ => (DataType::Float64, Value::Float64(mid)),
                }
            }
            ColumnKind::Textual | ColumnKind::Temporal => match mode(dataset.column(idx)) {
                Some(mode) => (field.data_type, mode),
                None => continue,
            },
        };

        debug!(
            column = %field.name,
            missing,
            fraction,
            fill = %fill,
            "imputed missing values"
        );

        let values = dataset
            .column(idx)
            .map(|value| match value {
                Value::Null => fill.clone(),
                Value::Int64(v) if data_type == DataType::Float64 => Value::Float64(*v as f64),
                other => other.clone(),
            })
            .collect();
        out.replace_column(idx, data_type, values);
    }

    out
}

/// Median of the values, averaging the two middle values for even counts.
pub fn median(values: impl Iterator<Item = f64>) -> Option<f64> {
    let mut sorted: Vec<f64> = values.filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Most frequent non-missing value; ties go to the value that appears first.
pub fn mode<'a>(values: impl Iterator<Item = &'a Value>) -> Option<Value> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut first_seen: Vec<(String, &'a Value)> = Vec::new();
    for value in values.filter(|v| !v.is_null()) {
        let key = value.to_string();
        let count = counts.entry(key.clone()).or_insert(0);
        if *count == 0 {
            first_seen.push((key, value));
        }
        *count += 1;
    }

    let mut best: Option<(usize, &Value)> = None;
    for (key, value) in &first_seen {
        let count = counts[key];
        if best.is_none_or(|(top, _)| count > top) {
            best = Some((count, *value));
        }
    }
    best.map(|(_, value)| value.clone())
}
