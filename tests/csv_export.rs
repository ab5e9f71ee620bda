use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use auto_data_cleaner::auto_clean;
use auto_data_cleaner::export::{to_csv_bytes, write_csv_to_path};
use auto_data_cleaner::ingestion::csv::ingest_csv_from_path;
use auto_data_cleaner::types::{DataType, Value};

fn tmp_file(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("auto-data-cleaner-{name}-{nanos}.csv"))
}

#[test]
fn cleaned_table_exports_as_download_ready_csv() {
    let raw = ingest_csv_from_path("tests/fixtures/messy_employees.csv", None).unwrap();
    let (cleaned, _) = auto_clean(&raw);

    let text = String::from_utf8(to_csv_bytes(&cleaned).unwrap()).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "Employee_Name,Salary,Age,Joining_Date,Department,Remarks");
    assert_eq!(lines[1], "John Smith,50000.0,30,2023-01-15,sales,good 1");
    assert_eq!(lines[4], "Maria Garcia,55000.0,20,2023-02-01,sales,good 1");
}

#[test]
fn exported_file_reads_back_with_the_same_shape() {
    let raw = ingest_csv_from_path("tests/fixtures/messy_employees.csv", None).unwrap();
    let (cleaned, _) = auto_clean(&raw);
    let path = tmp_file("roundtrip");

    write_csv_to_path(&cleaned, &path).unwrap();
    let back = ingest_csv_from_path(&path, None).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(
        back.schema.field_names().collect::<Vec<_>>(),
        cleaned.schema.field_names().collect::<Vec<_>>()
    );
    assert_eq!(back.row_count(), cleaned.row_count());
    assert_eq!(back.schema.fields[1].data_type, DataType::Float64);
    assert_eq!(back.schema.fields[2].data_type, DataType::Int64);
    assert_eq!(back.rows[2][2], Value::Int64(26));
}

#[test]
fn missing_cells_export_as_empty_fields() {
    let raw = ingest_csv_from_path("tests/fixtures/people.csv", None).unwrap();
    let mut ds = raw.clone();
    ds.rows[0][1] = Value::Null;

    let text = String::from_utf8(to_csv_bytes(&ds).unwrap()).unwrap();
    assert_eq!(text, "id,name,score,active\n1,,98.5,true\n2,Grace,87.25,false\n");
}
