//! `auto-data-cleaner` normalizes messy tabular data into a clean, analysis-ready
//! [`types::DataSet`] and reports how the table's shape changed.
//!
//! The primary entrypoint is [`pipeline::auto_clean`] (or a configured [`pipeline::Cleaner`]),
//! which runs a fixed sequence of transforms:
//!
//! 1. column names are trimmed, title-cased and underscored (`" full name "` -> `Full_Name`)
//! 2. exact duplicate rows are dropped, keeping the first
//! 3. text cells are trimmed, lower-cased and stripped of symbols; `name` columns are title-cased
//! 4. `salary` columns are parsed from `$50,000`, `60k` or Roman numerals like `xl`
//! 5. `age` columns resolve spelled-out numbers (`thirty`) and numeric text
//! 6. date-like text columns are parsed against an ordered list of grammars
//! 7. columns missing at most 40% of their values are filled with the median or mode
//!
//! None of these steps fail: a cell that cannot be interpreted becomes [`types::Value::Null`].
//!
//! ## Input and output
//!
//! - **Ingestion** ([`ingestion::ingest_from_path`]): CSV, and with the Cargo feature `excel`,
//!   `.xlsx`, `.xls`, `.xlsm`, `.xlsb` and `.ods`. Column types are inferred unless a
//!   [`types::Schema`] is supplied.
//! - **Export** ([`export::to_csv_bytes`]): header row, no index column, missing values as empty
//!   fields, dates as `YYYY-MM-DD`.
//!
//! ## Quick example
//!
//! ```rust
//! use auto_data_cleaner::auto_clean;
//! use auto_data_cleaner::export::to_csv_bytes;
//! use auto_data_cleaner::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let text = |s: &str| Value::Utf8(s.to_string());
//! let schema = Schema::new(
//!     [" full name ", "salary", "age", "join date"]
//!         .into_iter()
//!         .map(|name| Field::new(name, DataType::Utf8))
//!         .collect(),
//! );
//! let john = vec![text("  JOHN smith "), text("$50,000"), text("thirty"), text("2023-01-15")];
//! let ds = DataSet::new(
//!     schema,
//!     vec![
//!         john.clone(),
//!         john,
//!         vec![text("jane DOE"), text("xl"), text("22"), text("15/02/2023")],
//!         vec![text("alex ray"), text("60k"), Value::Null, text("March 5, 2023")],
//!     ],
//! );
//!
//! let (cleaned, report) = auto_clean(&ds);
//! assert_eq!(report.to_string(), "rows 4 -> 3, columns 4 -> 4");
//!
//! let csv = String::from_utf8(to_csv_bytes(&cleaned).unwrap()).unwrap();
//! assert_eq!(
//!     csv,
//!     "Full_Name,Salary,Age,Join_Date\n\
//!      John Smith,50000.0,30,2023-01-15\n\
//!      Jane Doe,40.0,22,2023-02-15\n\
//!      Alex Ray,60000.0,26,2023-03-05\n"
//! );
//! ```
//!
//! ## Modules
//!
//! - [`cleaning`]: the individual transforms and their [`cleaning::CleaningOptions`]
//! - [`pipeline`]: fixed-order orchestration, [`types::CleaningReport`] and observer events
//! - [`ingestion`]: file readers with type inference and ingestion observers
//! - [`export`]: CSV serialization of a cleaned table
//! - [`types`]: schema + in-memory dataset types
//! - [`error`]: error types used at the I/O and configuration boundary
//!
//! ## Logging
//!
//! The crate logs through `tracing` (per-step detail at `debug`, column-name collisions at
//! `warn`, the run summary at `info`) and never installs a subscriber itself.

pub mod cleaning;
pub mod error;
pub mod export;
pub mod ingestion;
pub mod pipeline;
pub mod types;

pub use error::{CleanerError, CleanerResult};
pub use pipeline::{Cleaner, auto_clean};
