//! Mixed-representation number parsing: plain numbers, Roman numerals and `k` shorthand.

use std::sync::LazyLock;

use regex::Regex;

use super::options::RomanNumerals;

static NON_NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9.]").expect("valid numeric filter"));

/// Resolve a raw string into a number.
///
/// The input is lower-cased, stripped of `$` and `,` and trimmed. Then, in order:
///
/// 1. a string made only of Roman-numeral symbols is decoded with [`roman_to_int`];
/// 2. a string containing `k` has every `k` removed and is scaled by 1000;
/// 3. anything else keeps only digits and periods and is parsed as a float.
///
/// Every failure yields `None`.
///
/// ```rust
/// use auto_data_cleaner::cleaning::{RomanNumerals, parse_numeral};
///
/// let numerals = RomanNumerals::default();
/// assert_eq!(parse_numeral("IV", &numerals), Some(4.0));
/// assert_eq!(parse_numeral("$1,200", &numerals), Some(1200.0));
/// assert_eq!(parse_numeral("15k", &numerals), Some(15000.0));
/// assert_eq!(parse_numeral("abc", &numerals), None);
/// ```
pub fn parse_numeral(raw: &str, numerals: &RomanNumerals) -> Option<f64> {
    let cleaned = raw.to_lowercase().replace(['$', ','], "");
    let cleaned = cleaned.trim();

    if numerals.is_numeral(cleaned) {
        return roman_to_int(cleaned, numerals).map(|v| v as f64);
    }

    let parsed = if cleaned.contains('k') {
        cleaned
            .replace('k', "")
            .trim()
            .parse::<f64>()
            .ok()
            .map(|v| v * 1000.0)
    } else {
        NON_NUMERIC.replace_all(cleaned, "").parse::<f64>().ok()
    };

    parsed.filter(|v| v.is_finite())
}

/// Decode a Roman numeral right to left.
///
/// A symbol smaller than the one to its right is subtracted, otherwise added. There is no
/// well-formedness check: `iiii` decodes to 4 and any word spelled only with numeral letters
/// (`mix`, `civil`) decodes to some number. Returns `None` if a character is not a known symbol.
pub fn roman_to_int(s: &str, numerals: &RomanNumerals) -> Option<i64> {
    let mut total: i64 = 0;
    let mut prev: i64 = 0;
    for c in s.chars().rev() {
        let value = i64::from(numerals.value_of(c)?);
        if value < prev {
            total -= value;
        } else {
            total += value;
        }
        prev = value;
    }
    Some(total)
}
