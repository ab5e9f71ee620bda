//! Monetary column normalization.

use tracing::debug;

use super::numeral::parse_numeral;
use super::options::RomanNumerals;
use crate::types::{DataSet, DataType, Value};

/// Rewrite every column whose name contains `salary` through [`parse_numeral`].
///
/// The whole column becomes `Float64`; unparsable and missing cells become [`Value::Null`].
/// No rows are removed, even when every value fails to parse.
pub fn normalize_salary(dataset: &DataSet, numerals: &RomanNumerals) -> DataSet {
    let mut out = dataset.clone();
    for idx in dataset.column_indexes_where(|f| f.name_contains("salary")) {
        let values: Vec<Value> = dataset
            .column(idx)
            .map(|value| match value {
                Value::Null => Value::Null,
                other => parse_numeral(&other.to_string(), numerals)
                    .map(Value::Float64)
                    .unwrap_or(Value::Null),
            })
            .collect();

        debug!(
            column = %dataset.schema.fields[idx].name,
            unparsed = values.iter().filter(|v| v.is_null()).count(),
            "normalized salary column"
        );
        out.replace_column(idx, DataType::Float64, values);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::normalize_salary;
    use crate::cleaning::RomanNumerals;
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    fn s(v: &str) -> Value {
        Value::Utf8(v.to_string())
    }

    #[test]
    fn salary_columns_are_parsed_to_floats() {
        let schema = Schema::new(vec![
            Field::new("Salary", DataType::Utf8),
            Field::new("Name", DataType::Utf8),
        ]);
        let ds = DataSet::new(
            schema,
            vec![
                vec![s("$50,000"), s("60k")],
                vec![s("xl"), s("xl")],
                vec![s("60k"), s("n/a")],
                vec![Value::Null, s("n/a")],
                vec![s("n/a"), s("n/a")],
            ],
        );

        let out = normalize_salary(&ds, &RomanNumerals::default());
        assert_eq!(out.schema.fields[0].data_type, DataType::Float64);
        assert_eq!(
            out.column(0).cloned().collect::<Vec<_>>(),
            vec![
                Value::Float64(50000.0),
                Value::Float64(40.0),
                Value::Float64(60000.0),
                Value::Null,
                Value::Null,
            ]
        );
        // Non-matching column untouched.
        assert_eq!(out.schema.fields[1], ds.schema.fields[1]);
        assert_eq!(
            out.column(1).collect::<Vec<_>>(),
            ds.column(1).collect::<Vec<_>>()
        );
    }

    #[test]
    fn numeric_salary_cells_are_kept_as_floats() {
        let schema = Schema::new(vec![Field::new("Annual_Salary_Usd", DataType::Int64)]);
        let ds = DataSet::new(schema, vec![vec![Value::Int64(42)], vec![Value::Null]]);
        let out = normalize_salary(&ds, &RomanNumerals::default());
        assert_eq!(out.rows, vec![vec![Value::Float64(42.0)], vec![Value::Null]]);
    }

    #[test]
    fn no_salary_column_is_a_no_op() {
        let schema = Schema::new(vec![Field::new("Wage", DataType::Utf8)]);
        let ds = DataSet::new(schema, vec![vec![s("$10")]]);
        assert_eq!(normalize_salary(&ds, &RomanNumerals::default()), ds);
    }
}
