//! Multi-format date parsing with fallback inference and ISO output.

use std::borrow::Cow;
use std::sync::LazyLock;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use regex::Regex;
use tracing::debug;

use super::options::DateGrammars;
use crate::types::{DataSet, DataType, Value};

static ORDINAL_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d{1,2})(st|nd|rd|th)\b").expect("valid ordinal pattern"));

// A partial date is completed with the first day (and month) of its period.
const PARTIAL_DATE_FORMATS: &[&str] = &["%Y-%m %d", "%Y/%m %d", "%B %Y %d", "%b %Y %d"];

/// Rewrite text columns that hold dates into [`Value::Date`] cells.
///
/// Every `Utf8` column is attempted. Each cell goes through [`parse_date`]; cells that do not
/// parse become [`Value::Null`]. A column is only replaced when at least one of its cells parsed,
/// so text columns without any date are left exactly as they were.
pub fn normalize_dates(dataset: &DataSet, grammars: &DateGrammars) -> DataSet {
    let mut out = dataset.clone();
    for idx in dataset.column_indexes_where(|f| f.data_type == DataType::Utf8) {
        let parsed: Vec<Option<NaiveDate>> = dataset
            .column(idx)
            .map(|value| match value {
                Value::Utf8(s) => parse_date(s, grammars),
                _ => None,
            })
            .collect();

        let hits = parsed.iter().filter(|d| d.is_some()).count();
        if hits == 0 {
            continue;
        }

        debug!(
            column = %dataset.schema.fields[idx].name,
            parsed = hits,
            rows = parsed.len(),
            "committed date column"
        );
        let values = parsed
            .into_iter()
            .map(|d| d.map(Value::Date).unwrap_or(Value::Null))
            .collect();
        out.replace_column(idx, DataType::Date, values);
    }
    out
}

/// Parse one cell.
///
/// The primary grammars are tried in order and the first match wins, so `01-02-2023` is read
/// as day-month. When none match, fallback inference runs: RFC 3339 / RFC 2822 timestamps, the
/// fallback date-time and date patterns, the leading token of values such as
/// `2023-01-02 103000`, compact and partial dates (`20230102`, `march 2023`, `2023`) and finally
/// the same grammars again with ordinal suffixes removed (`march 5th, 2023`).
///
/// ```rust
/// use auto_data_cleaner::cleaning::{DateGrammars, parse_date};
/// use chrono::NaiveDate;
///
/// let grammars = DateGrammars::default();
/// assert_eq!(
///     parse_date("01-02-2023", &grammars),
///     NaiveDate::from_ymd_opt(2023, 2, 1)
/// );
/// assert_eq!(parse_date("not a date", &grammars), None);
/// ```
pub fn parse_date(raw: &str, grammars: &DateGrammars) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    parse_with(trimmed, &grammars.formats).or_else(|| infer_date(trimmed, grammars))
}

fn infer_date(s: &str, grammars: &DateGrammars) -> Option<NaiveDate> {
    let timestamp = DateTime::parse_from_rfc3339(s)
        .or_else(|_| DateTime::parse_from_rfc2822(s))
        .ok()
        .map(|dt| dt.date_naive())
        .filter(plausible_year);

    timestamp
        .or_else(|| {
            grammars
                .fallback_datetime_formats
                .iter()
                .filter_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
                .find(plausible_year)
        })
        .or_else(|| parse_with(s, &grammars.fallback_formats))
        .or_else(|| {
            let token = leading_date_token(s)?;
            parse_with(token, &grammars.formats)
                .or_else(|| parse_with(token, &grammars.fallback_formats))
        })
        .or_else(|| parse_partial(s))
        .or_else(|| {
            let stripped = strip_ordinals(s)?;
            parse_with(&stripped, &grammars.formats)
                .or_else(|| parse_with(&stripped, &grammars.fallback_formats))
        })
}

/// `20230102` -> 2023-01-02, `2023` -> 2023-01-01, `2023-03` and `march 2023` -> 2023-03-01.
fn parse_partial(s: &str) -> Option<NaiveDate> {
    if s.bytes().all(|b| b.is_ascii_digit()) {
        let date = match s.len() {
            4 => NaiveDate::from_ymd_opt(s.parse().ok()?, 1, 1),
            8 => NaiveDate::from_ymd_opt(
                s[..4].parse().ok()?,
                s[4..6].parse().ok()?,
                s[6..].parse().ok()?,
            ),
            _ => None,
        };
        return date.filter(plausible_year);
    }

    let padded = format!("{s} 1");
    PARTIAL_DATE_FORMATS
        .iter()
        .filter_map(|fmt| NaiveDate::parse_from_str(&padded, fmt).ok())
        .find(plausible_year)
}

/// `march 5th, 2023` -> `march 5, 2023`; `None` when there is nothing to strip.
fn strip_ordinals(s: &str) -> Option<String> {
    match ORDINAL_SUFFIX.replace_all(s, "$1") {
        Cow::Owned(stripped) => Some(stripped),
        Cow::Borrowed(_) => None,
    }
}

fn parse_with(s: &str, formats: &[String]) -> Option<NaiveDate> {
    formats
        .iter()
        .filter_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .find(plausible_year)
}

// chrono accepts 1-4 digit `%Y`; a two-digit year must not be read as year 23 AD.
fn plausible_year(date: &NaiveDate) -> bool {
    (1000..=9999).contains(&date.year())
}

/// `2023-01-02 103000` -> `2023-01-02`, `2023-01-02t1030` -> `2023-01-02`.
fn leading_date_token(s: &str) -> Option<&str> {
    let mut parts = s.splitn(2, |c: char| c.is_whitespace() || c == 't' || c == 'T');
    let head = parts.next()?;
    let tail = parts.next()?.trim_start();
    let head_has_digit = head.chars().any(|c| c.is_ascii_digit());
    let tail_is_time = tail.chars().next().is_some_and(|c| c.is_ascii_digit());
    (head_has_digit && tail_is_time).then_some(head)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Field, Schema};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn parse(raw: &str) -> Option<NaiveDate> {
        parse_date(raw, &DateGrammars::default())
    }

    fn s(v: &str) -> Value {
        Value::Utf8(v.to_string())
    }

    #[test]
    fn every_primary_grammar_parses() {
        assert_eq!(parse("15-01-2023"), Some(ymd(2023, 1, 15)));
        assert_eq!(parse("15/01/2023"), Some(ymd(2023, 1, 15)));
        assert_eq!(parse("2023-01-15"), Some(ymd(2023, 1, 15)));
        assert_eq!(parse("01/15/2023"), Some(ymd(2023, 1, 15)));
        assert_eq!(parse("2023/01/15"), Some(ymd(2023, 1, 15)));
        assert_eq!(parse("15-Jan-2023"), Some(ymd(2023, 1, 15)));
        assert_eq!(parse("15 January 2023"), Some(ymd(2023, 1, 15)));
        assert_eq!(parse("January 15, 2023"), Some(ymd(2023, 1, 15)));
        assert_eq!(parse("Jan 15, 2023"), Some(ymd(2023, 1, 15)));
    }

    #[test]
    fn month_names_are_case_insensitive() {
        assert_eq!(parse("15-jan-2023"), Some(ymd(2023, 1, 15)));
        assert_eq!(parse("january 15, 2023"), Some(ymd(2023, 1, 15)));
    }

    #[test]
    fn ambiguous_dates_follow_grammar_priority() {
        // Day-month grammars come before month-day ones.
        assert_eq!(parse("01-02-2023"), Some(ymd(2023, 2, 1)));
        assert_eq!(parse("03/04/2023"), Some(ymd(2023, 4, 3)));
        // Only month-day fits when the day is above 12.
        assert_eq!(parse("12/31/2023"), Some(ymd(2023, 12, 31)));
    }

    #[test]
    fn fallback_inference() {
        assert_eq!(parse("2023-03-04T10:30:00Z"), Some(ymd(2023, 3, 4)));
        assert_eq!(parse("Sat, 4 Mar 2023 10:30:00 +0000"), Some(ymd(2023, 3, 4)));
        assert_eq!(parse("2023-03-04 10:30:00.250"), Some(ymd(2023, 3, 4)));
        assert_eq!(parse("2023.03.04"), Some(ymd(2023, 3, 4)));
        assert_eq!(parse("04.03.2023"), Some(ymd(2023, 3, 4)));
        assert_eq!(parse("01/02/23"), Some(ymd(2023, 1, 2)));
    }

    #[test]
    fn two_digit_year_dash_dates_read_month_first() {
        assert_eq!(parse("01-02-23"), Some(ymd(2023, 1, 2)));
        assert_eq!(parse("12-31-99"), Some(ymd(1999, 12, 31)));
    }

    #[test]
    fn compact_dates_parse() {
        assert_eq!(parse("20230102"), Some(ymd(2023, 1, 2)));
        assert_eq!(parse("20231302"), None);
    }

    #[test]
    fn partial_dates_default_to_the_first_day() {
        assert_eq!(parse("2023"), Some(ymd(2023, 1, 1)));
        assert_eq!(parse("2023-03"), Some(ymd(2023, 3, 1)));
        assert_eq!(parse("march 2023"), Some(ymd(2023, 3, 1)));
        assert_eq!(parse("Mar 2023"), Some(ymd(2023, 3, 1)));
        assert_eq!(parse("0999"), None);
    }

    #[test]
    fn ordinal_day_suffixes_are_ignored() {
        assert_eq!(parse("march 5th, 2023"), Some(ymd(2023, 3, 5)));
        assert_eq!(parse("1st january 2023"), Some(ymd(2023, 1, 1)));
        assert_eq!(parse("22nd Feb 2023"), Some(ymd(2023, 2, 22)));
        assert_eq!(parse("the 5th"), None);
    }

    #[test]
    fn time_residue_after_text_cleaning_is_ignored() {
        assert_eq!(parse("2023-01-02 103000"), Some(ymd(2023, 1, 2)));
        assert_eq!(parse("2023-01-02t103000"), Some(ymd(2023, 1, 2)));
        assert_eq!(parse("01/02/2023 1030"), Some(ymd(2023, 2, 1)));
    }

    #[test]
    fn non_dates_are_none() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("john smith"), None);
        assert_eq!(parse("31-02-2023"), None);
        assert_eq!(parse("22"), None);
        assert_eq!(parse("10 east street"), None);
    }

    #[test]
    fn mixed_column_is_rewritten_to_dates() {
        let schema = Schema::new(vec![
            Field::new("Joined", DataType::Utf8),
            Field::new("Name", DataType::Utf8),
        ]);
        let ds = DataSet::new(
            schema,
            vec![
                vec![s("01-02-2023"), s("ada")],
                vec![s("2023/03/04"), s("grace")],
                vec![s("soon"), s("linus")],
                vec![Value::Null, s("ken")],
                vec![s("march 2023"), s("rob")],
            ],
        );

        let out = normalize_dates(&ds, &DateGrammars::default());
        assert_eq!(out.schema.fields[0].data_type, DataType::Date);
        let rendered: Vec<String> = out.column(0).map(|v| v.to_string()).collect();
        assert_eq!(rendered, vec!["2023-02-01", "2023-03-04", "", "", "2023-03-01"]);

        // Name column had no dates: untouched.
        assert_eq!(out.schema.fields[1], ds.schema.fields[1]);
        assert_eq!(
            out.column(1).collect::<Vec<_>>(),
            ds.column(1).collect::<Vec<_>>()
        );
    }

    #[test]
    fn non_text_columns_are_skipped() {
        let schema = Schema::new(vec![Field::new("Id", DataType::Int64)]);
        let ds = DataSet::new(schema, vec![vec![Value::Int64(20230102)]]);
        assert_eq!(normalize_dates(&ds, &DateGrammars::default()), ds);
    }

    #[test]
    fn custom_grammar_list_replaces_defaults() {
        let grammars = DateGrammars {
            formats: vec!["%m/%d/%Y".to_string()],
            ..Default::default()
        };
        assert_eq!(parse_date("01/02/2023", &grammars), Some(ymd(2023, 1, 2)));
    }
}
