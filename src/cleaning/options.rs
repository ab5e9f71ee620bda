//! Configuration for the cleaning pipeline.
//!
//! The heuristic tables (Roman-numeral alphabet, spelled-out age words, date grammar priority
//! list) are plain data so callers can extend or override them without touching control flow.
//! Every field has a default; a JSON document only needs the keys it overrides:
//!
//! ```rust
//! use auto_data_cleaner::cleaning::CleaningOptions;
//!
//! let opts = CleaningOptions::from_json_str(r#"{ "missing_threshold": 0.25 }"#).unwrap();
//! assert_eq!(opts.missing_threshold, 0.25);
//! assert_eq!(opts.date_grammars, Default::default());
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CleanerError, CleanerResult};

/// Default missingness fraction at or below which a column is imputed.
pub const DEFAULT_MISSING_THRESHOLD: f64 = 0.4;

/// Primary date grammars, in priority order. The first one that parses a cell wins.
pub const DEFAULT_DATE_FORMATS: &[&str] = &[
    "%d-%m-%Y",
    "%d/%m/%Y",
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%d-%b-%Y",
    "%d %B %Y",
    "%B %d, %Y",
    "%b %d, %Y",
];

/// Date-time patterns tried during fallback inference; only the date part is kept.
pub const DEFAULT_FALLBACK_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Date patterns tried during fallback inference, after the primary grammars.
pub const DEFAULT_FALLBACK_DATE_FORMATS: &[&str] = &[
    "%Y.%m.%d",
    "%d.%m.%Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %b %Y",
    "%d-%b-%y",
    "%m-%d-%Y",
    "%m/%d/%y",
    "%m-%d-%y",
];

/// Symbol values used by the Roman-numeral decoder. Keys are lower-case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RomanNumerals(pub BTreeMap<char, u32>);

impl RomanNumerals {
    /// Value of a symbol, case-insensitive.
    pub fn value_of(&self, symbol: char) -> Option<u32> {
        symbol
            .to_lowercase()
            .next()
            .and_then(|c| self.0.get(&c).copied())
    }

    /// True when `s` is non-empty and every character is a known symbol.
    pub fn is_numeral(&self, s: &str) -> bool {
        !s.is_empty() && s.chars().all(|c| self.value_of(c).is_some())
    }
}

impl Default for RomanNumerals {
    fn default() -> Self {
        Self(
            [
                ('i', 1),
                ('v', 5),
                ('x', 10),
                ('l', 50),
                ('c', 100),
                ('d', 500),
                ('m', 1000),
            ]
            .into_iter()
            .collect(),
        )
    }
}

/// Spelled-out age words and their numeric replacement. `None` maps the word to missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgeWords(pub BTreeMap<String, Option<i64>>);

impl AgeWords {
    /// Exact lookup; `Some(None)` means "known word that maps to missing".
    pub fn lookup(&self, word: &str) -> Option<Option<i64>> {
        self.0.get(word).copied()
    }
}

impl Default for AgeWords {
    fn default() -> Self {
        Self(
            [
                ("thirty", Some(30)),
                ("twenty two", Some(22)),
                ("twenty", Some(20)),
                ("forty", Some(40)),
                ("none", None),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
        )
    }
}

/// Ordered chrono format strings used by the date normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateGrammars {
    /// Primary grammars, tried first and in order.
    pub formats: Vec<String>,
    /// Date-time patterns for fallback inference.
    pub fallback_datetime_formats: Vec<String>,
    /// Date patterns for fallback inference.
    pub fallback_formats: Vec<String>,
}

impl Default for DateGrammars {
    fn default() -> Self {
        fn owned(list: &[&str]) -> Vec<String> {
            list.iter().map(|s| s.to_string()).collect()
        }
        Self {
            formats: owned(DEFAULT_DATE_FORMATS),
            fallback_datetime_formats: owned(DEFAULT_FALLBACK_DATETIME_FORMATS),
            fallback_formats: owned(DEFAULT_FALLBACK_DATE_FORMATS),
        }
    }
}

/// Options controlling a cleaning run.
///
/// Use [`Default`] for the standard heuristics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningOptions {
    /// Roman-numeral alphabet for salary parsing.
    pub roman_numerals: RomanNumerals,
    /// Spelled-out age lookup.
    pub age_words: AgeWords,
    /// Date grammar priority list and fallbacks.
    pub date_grammars: DateGrammars,
    /// Columns with a missing fraction at or below this value are imputed.
    pub missing_threshold: f64,
}

impl Default for CleaningOptions {
    fn default() -> Self {
        Self {
            roman_numerals: RomanNumerals::default(),
            age_words: AgeWords::default(),
            date_grammars: DateGrammars::default(),
            missing_threshold: DEFAULT_MISSING_THRESHOLD,
        }
    }
}

impl CleaningOptions {
    /// Parse options from a JSON document and validate them.
    pub fn from_json_str(input: &str) -> CleanerResult<Self> {
        let opts: Self = serde_json::from_str(input)?;
        opts.validate()?;
        Ok(opts)
    }

    /// Read options from a JSON file and validate them.
    pub fn from_json_path(path: impl AsRef<Path>) -> CleanerResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Check that the options describe a usable pipeline.
    pub fn validate(&self) -> CleanerResult<()> {
        if !self.missing_threshold.is_finite() || !(0.0..=1.0).contains(&self.missing_threshold) {
            return Err(CleanerError::InvalidOptions {
                message: format!(
                    "missing_threshold must be within [0, 1] (got {})",
                    self.missing_threshold
                ),
            });
        }
        if self.date_grammars.formats.is_empty() {
            return Err(CleanerError::InvalidOptions {
                message: "date_grammars.formats must list at least one grammar".to_string(),
            });
        }
        if let Some((symbol, _)) = self.roman_numerals.0.iter().find(|(_, v)| **v == 0) {
            return Err(CleanerError::InvalidOptions {
                message: format!("roman numeral '{symbol}' must have a non-zero value"),
            });
        }
        Ok(())
    }
}
