use std::collections::HashSet;

use auto_data_cleaner::Cleaner;
use auto_data_cleaner::cleaning::{CleaningOptions, normalize_column_names, remove_duplicates};
use auto_data_cleaner::ingestion::csv::ingest_csv_from_path;
use auto_data_cleaner::pipeline::{CleaningStep, auto_clean};
use auto_data_cleaner::types::{CleaningReport, DataSet, DataType, Field, Schema, Value};
use chrono::NaiveDate;

fn text(s: &str) -> Value {
    Value::Utf8(s.to_string())
}

fn date(y: i32, m: u32, d: u32) -> Value {
    Value::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn messy_employees() -> DataSet {
    ingest_csv_from_path("tests/fixtures/messy_employees.csv", None).unwrap()
}

#[test]
fn messy_employees_are_cleaned_end_to_end() {
    let (cleaned, report) = auto_clean(&messy_employees());

    assert_eq!(
        report,
        CleaningReport {
            rows_before: 6,
            rows_after: 5,
            columns_before: 6,
            columns_after: 6,
        }
    );

    let names: Vec<&str> = cleaned.schema.field_names().collect();
    assert_eq!(
        names,
        vec!["Employee_Name", "Salary", "Age", "Joining_Date", "Department", "Remarks"]
    );
    let types: Vec<DataType> = cleaned.schema.fields.iter().map(|f| f.data_type).collect();
    assert_eq!(
        types,
        vec![
            DataType::Utf8,
            DataType::Float64,
            DataType::Int64,
            DataType::Date,
            DataType::Utf8,
            DataType::Utf8,
        ]
    );

    assert_eq!(
        cleaned.rows,
        vec![
            vec![
                text("John Smith"),
                Value::Float64(50000.0),
                Value::Int64(30),
                date(2023, 1, 15),
                text("sales"),
                text("good 1"),
            ],
            vec![
                text("Jane Doe"),
                Value::Float64(40.0),
                Value::Int64(22),
                date(2023, 2, 15),
                text("engineering"),
                text("good 1"),
            ],
            vec![
                text("Alex Ray"),
                Value::Float64(60000.0),
                Value::Int64(26),
                date(2023, 3, 5),
                text("sales"),
                text("needs review"),
            ],
            vec![
                text("Maria Garcia"),
                Value::Float64(55000.0),
                Value::Int64(20),
                date(2023, 2, 1),
                text("sales"),
                text("good 1"),
            ],
            vec![
                text("Chen Li"),
                Value::Float64(72500.0),
                Value::Int64(45),
                date(2023, 4, 10),
                text("engineering"),
                text("ok"),
            ],
        ]
    );
}

#[test]
fn cleaning_never_adds_rows_or_columns() {
    let raw = messy_employees();
    let (cleaned, report) = auto_clean(&raw);
    assert!(cleaned.row_count() <= raw.row_count());
    assert!(cleaned.column_count() <= raw.column_count());
    assert_eq!(report.rows_removed(), 1);
}

#[test]
fn cleaned_column_names_are_unique_and_space_free() {
    let ds = DataSet::new(
        Schema::new(vec![
            Field::new("first name", DataType::Utf8),
            Field::new(" First Name", DataType::Utf8),
            Field::new("City", DataType::Utf8),
        ]),
        vec![vec![text("a"), text("b"), text("c")]],
    );

    let (cleaned, report) = auto_clean(&ds);

    let names: Vec<&str> = cleaned.schema.field_names().collect();
    assert_eq!(names, vec!["First_Name", "City"]);
    assert_eq!(report.columns_after, 2);
    let unique: HashSet<&str> = names.iter().copied().collect();
    assert_eq!(unique.len(), names.len());
    assert!(names.iter().all(|n| !n.contains(' ')));
    // The later definition wins the collision.
    assert_eq!(cleaned.rows[0][0], text("B"));
}

#[test]
fn remove_duplicates_is_idempotent() {
    let raw = normalize_column_names(&messy_employees());
    let once = remove_duplicates(&raw);
    let twice = remove_duplicates(&once);
    assert_eq!(once, twice);
    assert_eq!(once.row_count(), 5);
}

#[test]
fn cleaning_is_deterministic() {
    let raw = messy_employees();
    let cleaner = Cleaner::new(CleaningOptions::default()).unwrap();
    assert_eq!(cleaner.clean(&raw), cleaner.clean(&raw));
}

#[test]
fn cleaning_twice_changes_nothing() {
    let (once, _) = auto_clean(&messy_employees());
    let (twice, report) = auto_clean(&once);
    assert_eq!(twice, once);
    assert_eq!(report.rows_removed(), 0);
}

#[test]
fn steps_can_be_applied_one_at_a_time() {
    let raw = messy_employees();
    let cleaner = Cleaner::default();
    let stepped = CleaningStep::ORDER
        .iter()
        .fold(raw.clone(), |ds, step| cleaner.apply_step(*step, &ds));
    assert_eq!(stepped, auto_clean(&raw).0);
}

#[test]
fn columns_over_the_missing_threshold_keep_their_gaps() {
    let ds = DataSet::new(
        Schema::new(vec![
            Field::new("Id", DataType::Int64),
            Field::new("Bonus", DataType::Float64),
        ]),
        vec![
            vec![Value::Int64(1), Value::Float64(1.0)],
            vec![Value::Int64(2), Value::Null],
            vec![Value::Int64(3), Value::Null],
            vec![Value::Int64(4), Value::Float64(4.0)],
        ],
    );
    let (cleaned, _) = auto_clean(&ds);
    assert_eq!(cleaned.rows[1][1], Value::Null);

    let lenient = Cleaner::new(CleaningOptions {
        missing_threshold: 0.5,
        ..Default::default()
    })
    .unwrap();
    let (filled, _) = lenient.clean(&ds);
    assert_eq!(filled.rows[1][1], Value::Float64(2.5));
    assert_eq!(filled.rows[2][1], Value::Float64(2.5));
}

#[test]
fn ragged_rows_are_cleaned_as_missing_cells() {
    let ds = DataSet::new(
        Schema::new(vec![
            Field::new("id", DataType::Utf8),
            Field::new("note", DataType::Utf8),
        ]),
        vec![vec![text("1")], vec![text("2"), text("x")]],
    );

    let (cleaned, report) = auto_clean(&ds);

    assert_eq!(report.rows_after, 2);
    assert_eq!(cleaned.rows[0], vec![text("1"), Value::Null]);
    assert_eq!(cleaned.rows[1], vec![text("2"), text("x")]);
}
