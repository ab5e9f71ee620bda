//! Age column normalization: spelled-out words and numeric strings to numbers.

use tracing::debug;

use super::options::AgeWords;
use crate::types::{DataSet, DataType, Value};

/// Rewrite every column whose name contains `age` into numbers.
///
/// Each cell's trimmed, lower-cased text is first looked up in `age_words` (exact match); the
/// result, or the original cell, is then coerced to a number. Cells that fail coercion become
/// [`Value::Null`]. The column is `Int64` when every surviving value is integral, else `Float64`.
///
/// Name matching is a plain substring test, so `Manager` or `Page_Views` are treated as ages too.
pub fn normalize_age(dataset: &DataSet, age_words: &AgeWords) -> DataSet {
    let mut out = dataset.clone();
    for idx in dataset.column_indexes_where(|f| f.name_contains("age")) {
        let numbers: Vec<Option<f64>> = dataset
            .column(idx)
            .map(|value| coerce_age(value, age_words))
            .collect();

        let all_integral = numbers
            .iter()
            .flatten()
            .all(|v| v.fract() == 0.0 && *v >= i64::MIN as f64 && *v <= i64::MAX as f64);
        let data_type = if all_integral {
            DataType::Int64
        } else {
            DataType::Float64
        };
        let values: Vec<Value> = numbers
            .into_iter()
            .map(|n| match n {
                None => Value::Null,
                Some(v) if all_integral => Value::Int64(v as i64),
                Some(v) => Value::Float64(v),
            })
            .collect();

        debug!(column = %dataset.schema.fields[idx].name, ?data_type, "normalized age column");
        out.replace_column(idx, data_type, values);
    }
    out
}

fn coerce_age(value: &Value, age_words: &AgeWords) -> Option<f64> {
    match value {
        Value::Null => None,
        Value::Int64(v) => Some(*v as f64),
        Value::Float64(v) => Some(*v).filter(|v| v.is_finite()),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Date(_) => None,
        Value::Utf8(s) => {
            let key = s.trim().to_lowercase();
            match age_words.lookup(&key) {
                Some(mapped) => mapped.map(|v| v as f64),
                None => key.parse::<f64>().ok().filter(|v| v.is_finite()),
            }
        }
    }
}
