//! Column-name canonicalization and per-cell text cleanup.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::types::{DataSet, DataType, Field, Schema, Value};

static DISALLOWED_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s.,/-]").expect("valid character filter"));

/// Trim, title-case and underscore every column name.
///
/// `" full name "` becomes `Full_Name`. When two columns normalize to the same name the
/// later column wins and the earlier one is dropped, so names stay unique.
pub fn normalize_column_names(dataset: &DataSet) -> DataSet {
    let names: Vec<String> = dataset
        .schema
        .fields
        .iter()
        .map(|f| normalize_column_name(&f.name))
        .collect();

    // Walk right to left so the last definition of each name is the one kept.
    let mut seen = HashSet::with_capacity(names.len());
    let mut keep = vec![false; names.len()];
    for (idx, name) in names.iter().enumerate().rev() {
        if seen.insert(name.as_str()) {
            keep[idx] = true;
        } else {
            warn!(
                column = %dataset.schema.fields[idx].name,
                normalized = %name,
                "column name collision; earlier column dropped"
            );
        }
    }

    let fields = dataset
        .schema
        .fields
        .iter()
        .zip(&names)
        .zip(&keep)
        .filter(|(_, keep)| **keep)
        .map(|((field, name), _)| Field::new(name.clone(), field.data_type))
        .collect();

    let rows = dataset
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .zip(&keep)
                .filter(|(_, keep)| **keep)
                .map(|(value, _)| value.clone())
                .collect()
        })
        .collect();

    DataSet::new(Schema::new(fields), rows)
}

/// Canonical form of a single column name.
pub fn normalize_column_name(raw: &str) -> String {
    title_case(raw.trim()).replace(' ', "_")
}

/// Upper-cases the first letter of every alphabetic run and lower-cases the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// Clean every cell of the textual (`Utf8`) columns.
///
/// Cells are trimmed, lower-cased and stripped of everything except ASCII letters, digits,
/// whitespace and `. , / -`. Columns whose name contains `name` are title-cased word by word;
/// columns whose name contains `remarks` lose any `#`. Missing cells stay missing.
pub fn clean_text_cells(dataset: &DataSet) -> DataSet {
    let mut out = dataset.clone();
    let textual = dataset.column_indexes_where(|f| f.data_type == DataType::Utf8);

    for idx in textual {
        let field = &dataset.schema.fields[idx];
        let is_name = field.name_contains("name");
        let is_remarks = field.name_contains("remarks");

        let values = dataset
            .column(idx)
            .map(|value| match value {
                Value::Null => Value::Null,
                other => {
                    let mut cleaned = clean_text(&other.to_string());
                    if is_name {
                        cleaned = capitalize_words(&cleaned);
                    }
                    if is_remarks {
                        cleaned = cleaned.replace('#', "");
                    }
                    Value::Utf8(cleaned)
                }
            })
            .collect();

        debug!(column = %field.name, is_name, is_remarks, "cleaned text column");
        out.replace_column(idx, DataType::Utf8, values);
    }

    out
}

/// Trim, lower-case and drop disallowed characters from one string.
pub fn clean_text(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    DISALLOWED_CHARS.replace_all(&lowered, "").into_owned()
}

fn capitalize_words(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
