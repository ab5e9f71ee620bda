//! Core data model types.
//!
//! A table is an in-memory [`DataSet`]: a [`Schema`] (ordered, typed [`Field`]s) plus row-major
//! storage of [`Value`]s. Every cleaning step consumes a `&DataSet` and returns a new one.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Logical data type for a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// 64-bit signed integer.
    Int64,
    /// 64-bit floating point number.
    Float64,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    Utf8,
    /// Calendar date.
    Date,
}

impl DataType {
    /// The broad kind used to decide which transforms apply to a column.
    pub fn kind(self) -> ColumnKind {
        match self {
            DataType::Int64 | DataType::Float64 => ColumnKind::Numeric,
            DataType::Utf8 | DataType::Bool => ColumnKind::Textual,
            DataType::Date => ColumnKind::Temporal,
        }
    }
}

/// Inferred kind of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Textual,
    Numeric,
    Temporal,
}

/// A single named, typed field in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field/column name.
    pub name: String,
    /// Field data type.
    pub data_type: DataType,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }

    /// Case-insensitive substring match against the field name.
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name
            .to_lowercase()
            .contains(needle.to_lowercase().as_str())
    }
}

/// Ordered list of fields describing a table's columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

/// A single cell value in a [`DataSet`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing value marker.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
    /// Calendar date, rendered as `YYYY-MM-DD`.
    Date(NaiveDate),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int64(v) => Some(*v as f64),
            Value::Float64(v) => Some(*v),
            _ => None,
        }
    }
}

/// Renders the value the way it is written to CSV. `Null` renders as an empty string.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Int64(v) => write!(f, "{v}"),
            // Integral floats keep one decimal so they stay distinguishable from integers.
            Value::Float64(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{v:.1}"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Utf8(s) => f.write_str(s),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

/// In-memory tabular dataset.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as the [`Schema`] fields.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    /// Schema describing row shape.
    pub schema: Schema,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl DataSet {
    /// Create a dataset from schema and rows.
    ///
    /// Rows shorter than the schema are padded with [`Value::Null`], so every column holds one
    /// cell per row.
    pub fn new(schema: Schema, mut rows: Vec<Vec<Value>>) -> Self {
        let width = schema.fields.len();
        for row in rows.iter_mut().filter(|row| row.len() < width) {
            row.resize(width, Value::Null);
        }
        Self { schema, rows }
    }

    /// Number of rows in the dataset.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns in the dataset.
    pub fn column_count(&self) -> usize {
        self.schema.fields.len()
    }

    /// Borrow every cell of one column, top to bottom.
    pub fn column(&self, idx: usize) -> impl Iterator<Item = &Value> {
        self.rows.iter().filter_map(move |row| row.get(idx))
    }

    /// Borrow a column by name.
    pub fn column_by_name(&self, name: &str) -> Option<Vec<&Value>> {
        let idx = self.schema.index_of(name)?;
        Some(self.column(idx).collect())
    }

    /// Indexes of columns whose field matches `predicate`, in schema order.
    pub fn column_indexes_where<F>(&self, mut predicate: F) -> Vec<usize>
    where
        F: FnMut(&Field) -> bool,
    {
        self.schema
            .fields
            .iter()
            .enumerate()
            .filter(|(_, f)| predicate(f))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Replace one column's cells and data type in place.
    ///
    /// # Panics
    ///
    /// Panics if `values` does not have exactly one value per row.
    pub fn replace_column(&mut self, idx: usize, data_type: DataType, values: Vec<Value>) {
        assert!(
            values.len() == self.rows.len(),
            "replacement column length {} does not match row count {}",
            values.len(),
            self.rows.len()
        );
        self.schema.fields[idx].data_type = data_type;
        for (row, value) in self.rows.iter_mut().zip(values) {
            row[idx] = value;
        }
    }
}

/// Before/after shape summary of one cleaning run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningReport {
    pub rows_before: usize,
    pub rows_after: usize,
    pub columns_before: usize,
    pub columns_after: usize,
}

impl CleaningReport {
    /// Build the report from the input snapshot and the cleaned table.
    pub fn from_snapshots(before: &DataSet, after: &DataSet) -> Self {
        Self {
            rows_before: before.row_count(),
            rows_after: after.row_count(),
            columns_before: before.column_count(),
            columns_after: after.column_count(),
        }
    }

    /// Number of rows removed by the run.
    pub fn rows_removed(&self) -> usize {
        self.rows_before.saturating_sub(self.rows_after)
    }
}

impl fmt::Display for CleaningReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rows {} -> {}, columns {} -> {}",
            self.rows_before, self.rows_after, self.columns_before, self.columns_after
        )
    }
}
