//! Exact duplicate-row removal.

use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::debug;

use crate::types::{DataSet, Value};

/// Hashable view of a [`Value`]. Floats compare by bit pattern, with `-0.0` folded into `0.0`.
#[derive(Debug, PartialEq, Eq, Hash)]
enum CellKey<'a> {
    Null,
    Int64(i64),
    Float64(u64),
    Bool(bool),
    Utf8(&'a str),
    Date(NaiveDate),
}

impl<'a> From<&'a Value> for CellKey<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Null => CellKey::Null,
            Value::Int64(v) => CellKey::Int64(*v),
            Value::Float64(v) if *v == 0.0 => CellKey::Float64(0.0f64.to_bits()),
            Value::Float64(v) => CellKey::Float64(v.to_bits()),
            Value::Bool(v) => CellKey::Bool(*v),
            Value::Utf8(s) => CellKey::Utf8(s.as_str()),
            Value::Date(d) => CellKey::Date(*d),
        }
    }
}

/// Drop rows that are exactly equal to an earlier row across all columns.
///
/// The first occurrence is kept and survivors keep their original order, so the operation is
/// idempotent. Two missing cells compare equal.
pub fn remove_duplicates(dataset: &DataSet) -> DataSet {
    let mut seen: HashSet<Vec<CellKey<'_>>> = HashSet::with_capacity(dataset.row_count());
    let rows = dataset
        .rows
        .iter()
        .filter(|&row| seen.insert(row.iter().map(CellKey::from).collect()))
        .cloned()
        .collect();
    let out = DataSet::new(dataset.schema.clone(), rows);
    debug!(
        removed = dataset.row_count() - out.row_count(),
        "removed duplicate rows"
    );
    out
}

#[cfg(test)]
mod tests {
    use super::remove_duplicates;
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    fn s(v: &str) -> Value {
        Value::Utf8(v.to_string())
    }

    fn sample_dataset() -> DataSet {
        let schema = Schema::new(vec![
            Field::new("Id", DataType::Int64),
            Field::new("Name", DataType::Utf8),
            Field::new("Score", DataType::Float64),
        ]);
        DataSet::new(
            schema,
            vec![
                vec![Value::Int64(1), s("Ada"), Value::Float64(1.0)],
                vec![Value::Int64(2), s("Grace"), Value::Null],
                vec![Value::Int64(1), s("Ada"), Value::Float64(1.0)],
                vec![Value::Int64(2), s("Grace"), Value::Null],
                vec![Value::Int64(1), s("ada"), Value::Float64(1.0)],
            ],
        )
    }

    #[test]
    fn keeps_first_occurrence_in_order() {
        let ds = sample_dataset();
        let out = remove_duplicates(&ds);
        assert_eq!(out.schema, ds.schema);
        assert_eq!(
            out.rows,
            vec![
                vec![Value::Int64(1), s("Ada"), Value::Float64(1.0)],
                vec![Value::Int64(2), s("Grace"), Value::Null],
                vec![Value::Int64(1), s("ada"), Value::Float64(1.0)],
            ]
        );
    }

    #[test]
    fn is_idempotent() {
        let once = remove_duplicates(&sample_dataset());
        let twice = remove_duplicates(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn signed_zero_counts_as_duplicate() {
        let schema = Schema::new(vec![Field::new("X", DataType::Float64)]);
        let ds = DataSet::new(
            schema,
            vec![vec![Value::Float64(0.0)], vec![Value::Float64(-0.0)]],
        );
        assert_eq!(remove_duplicates(&ds).row_count(), 1);
    }

    #[test]
    fn empty_dataset_stays_empty() {
        let ds = DataSet::new(Schema::new(Vec::new()), Vec::new());
        assert_eq!(remove_duplicates(&ds), ds);
    }
}
