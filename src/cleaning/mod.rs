//! Composable cleaning transforms.
//!
//! Every transform takes a `&DataSet` and returns a new [`crate::types::DataSet`]; none of them
//! fail. Cells that cannot be interpreted become [`crate::types::Value::Null`] and transforms
//! whose column heuristic matches nothing are no-ops.
//!
//! - [`normalize_column_names()`]: trim, title-case and underscore column names
//! - [`remove_duplicates()`]: drop exact duplicate rows, keeping the first
//! - [`clean_text_cells()`]: lower-case and strip text cells; title-case `name` columns
//! - [`normalize_salary()`]: parse `salary` columns with [`parse_numeral()`]
//! - [`normalize_age()`]: resolve spelled-out and numeric `age` values
//! - [`normalize_dates()`]: parse date-like text columns into ISO dates
//! - [`impute_missing()`]: fill gaps with the column mode or median
//!
//! [`crate::pipeline::Cleaner`] runs them in the required order.
//!
//! ## Example: one transform at a time
//!
//! ```rust
//! use auto_data_cleaner::cleaning::{normalize_column_names, normalize_salary, RomanNumerals};
//! use auto_data_cleaner::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let ds = DataSet::new(
//!     Schema::new(vec![Field::new(" base salary ", DataType::Utf8)]),
//!     vec![
//!         vec![Value::Utf8("$50,000".to_string())],
//!         vec![Value::Utf8("xl".to_string())],
//!         vec![Value::Utf8("60k".to_string())],
//!     ],
//! );
//!
//! let named = normalize_column_names(&ds);
//! assert_eq!(named.schema.fields[0].name, "Base_Salary");
//!
//! let parsed = normalize_salary(&named, &RomanNumerals::default());
//! assert_eq!(
//!     parsed.column(0).cloned().collect::<Vec<_>>(),
//!     vec![Value::Float64(50000.0), Value::Float64(40.0), Value::Float64(60000.0)]
//! );
//! ```

pub mod age;
pub mod dates;
pub mod dedup;
pub mod impute;
pub mod numeral;
pub mod options;
pub mod salary;
pub mod text;

pub use age::normalize_age;
pub use dates::{normalize_dates, parse_date};
pub use dedup::remove_duplicates;
pub use impute::impute_missing;
pub use numeral::{parse_numeral, roman_to_int};
pub use options::{AgeWords, CleaningOptions, DateGrammars, RomanNumerals};
pub use salary::normalize_salary;
pub use text::{clean_text_cells, normalize_column_names};
