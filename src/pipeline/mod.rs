//! Pipeline orchestration: runs every cleaning step in a fixed order and reports the result.
//!
//! The order is load-bearing. Column names are normalized before any name-substring matching,
//! duplicates are removed before text cleaning can blur near-duplicates, and imputation runs
//! last so it sees fully typed values.
//!
//! ```rust
//! use auto_data_cleaner::pipeline::auto_clean;
//! use auto_data_cleaner::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let row = vec![Value::Utf8("  ADA lovelace ".to_string()), Value::Utf8("thirty".to_string())];
//! let ds = DataSet::new(
//!     Schema::new(vec![
//!         Field::new("Full Name ", DataType::Utf8),
//!         Field::new("age", DataType::Utf8),
//!     ]),
//!     vec![row.clone(), row],
//! );
//!
//! let (cleaned, report) = auto_clean(&ds);
//! assert_eq!(report.rows_before, 2);
//! assert_eq!(report.rows_after, 1);
//! assert_eq!(cleaned.schema.fields[0].name, "Full_Name");
//! assert_eq!(cleaned.rows[0], vec![Value::Utf8("Ada Lovelace".to_string()), Value::Int64(30)]);
//! ```

mod observer;

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::cleaning::{
    CleaningOptions, clean_text_cells, impute_missing, normalize_age, normalize_column_names,
    normalize_dates, normalize_salary, remove_duplicates,
};
use crate::error::CleanerResult;
use crate::types::{CleaningReport, DataSet};

pub use observer::{PipelineEvent, PipelineObserver, StdErrPipelineObserver};

/// One transform of the cleaning pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CleaningStep {
    NormalizeColumnNames,
    RemoveDuplicates,
    CleanTextCells,
    NormalizeSalary,
    NormalizeAge,
    NormalizeDates,
    ImputeMissing,
}

impl CleaningStep {
    /// The order in which [`Cleaner::clean`] applies the steps.
    pub const ORDER: [CleaningStep; 7] = [
        CleaningStep::NormalizeColumnNames,
        CleaningStep::RemoveDuplicates,
        CleaningStep::CleanTextCells,
        CleaningStep::NormalizeSalary,
        CleaningStep::NormalizeAge,
        CleaningStep::NormalizeDates,
        CleaningStep::ImputeMissing,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CleaningStep::NormalizeColumnNames => "normalize_column_names",
            CleaningStep::RemoveDuplicates => "remove_duplicates",
            CleaningStep::CleanTextCells => "clean_text_cells",
            CleaningStep::NormalizeSalary => "normalize_salary",
            CleaningStep::NormalizeAge => "normalize_age",
            CleaningStep::NormalizeDates => "normalize_dates",
            CleaningStep::ImputeMissing => "impute_missing",
        }
    }
}

impl fmt::Display for CleaningStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Runs the cleaning pipeline with a fixed set of [`CleaningOptions`].
///
/// A `Cleaner` holds no per-run state, so one instance can clean any number of tables,
/// from any number of threads.
#[derive(Clone, Default)]
pub struct Cleaner {
    options: CleaningOptions,
    observer: Option<Arc<dyn PipelineObserver>>,
}

impl fmt::Debug for Cleaner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cleaner")
            .field("options", &self.options)
            .field("observer_set", &self.observer.is_some())
            .finish()
    }
}

impl Cleaner {
    /// Create a cleaner after validating `options`.
    pub fn new(options: CleaningOptions) -> CleanerResult<Self> {
        options.validate()?;
        Ok(Self {
            options,
            observer: None,
        })
    }

    /// Attach an observer for pipeline events.
    pub fn with_observer(mut self, observer: Arc<dyn PipelineObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn options(&self) -> &CleaningOptions {
        &self.options
    }

    /// Clean `dataset` and report its shape before and after.
    ///
    /// The input is borrowed immutably and doubles as the "before" snapshot.
    pub fn clean(&self, dataset: &DataSet) -> (DataSet, CleaningReport) {
        let start = Instant::now();
        self.emit(PipelineEvent::RunStarted {
            rows: dataset.row_count(),
            columns: dataset.column_count(),
        });

        let mut current = dataset.clone();
        for step in CleaningStep::ORDER {
            let step_start = Instant::now();
            current = self.apply_step(step, &current);
            debug!(
                %step,
                rows = current.row_count(),
                columns = current.column_count(),
                "cleaning step finished"
            );
            self.emit(PipelineEvent::StepFinished {
                step,
                rows: current.row_count(),
                columns: current.column_count(),
                elapsed: step_start.elapsed(),
            });
        }

        let report = CleaningReport::from_snapshots(dataset, &current);
        info!(
            rows_before = report.rows_before,
            rows_after = report.rows_after,
            columns_before = report.columns_before,
            columns_after = report.columns_after,
            "cleaning run finished"
        );
        self.emit(PipelineEvent::RunFinished {
            report,
            elapsed: start.elapsed(),
        });

        (current, report)
    }

    /// Apply a single step with this cleaner's options.
    pub fn apply_step(&self, step: CleaningStep, dataset: &DataSet) -> DataSet {
        let opts = &self.options;
        match step {
            CleaningStep::NormalizeColumnNames => normalize_column_names(dataset),
            CleaningStep::RemoveDuplicates => remove_duplicates(dataset),
            CleaningStep::CleanTextCells => clean_text_cells(dataset),
            CleaningStep::NormalizeSalary => normalize_salary(dataset, &opts.roman_numerals),
            CleaningStep::NormalizeAge => normalize_age(dataset, &opts.age_words),
            CleaningStep::NormalizeDates => normalize_dates(dataset, &opts.date_grammars),
            CleaningStep::ImputeMissing => impute_missing(dataset, opts.missing_threshold),
        }
    }

    fn emit(&self, event: PipelineEvent) {
        if let Some(obs) = &self.observer {
            obs.on_event(&event);
        }
    }
}

/// Clean `dataset` with the default options.
pub fn auto_clean(dataset: &DataSet) -> (DataSet, CleaningReport) {
    Cleaner::default().clean(dataset)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::types::{DataType, Field, Schema, Value};

    #[derive(Default)]
    struct RecordingObserver {
        events: Mutex<Vec<PipelineEvent>>,
    }

    impl PipelineObserver for RecordingObserver {
        fn on_event(&self, event: &PipelineEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    fn s(v: &str) -> Value {
        Value::Utf8(v.to_string())
    }

    #[test]
    fn observer_sees_every_step_in_order() {
        let observer = Arc::new(RecordingObserver::default());
        let cleaner = Cleaner::default().with_observer(observer.clone());
        let ds = DataSet::new(
            Schema::new(vec![Field::new("x", DataType::Utf8)]),
            vec![vec![s("a")], vec![s("a")]],
        );

        let (_, report) = cleaner.clean(&ds);

        let events = observer.events.lock().unwrap();
        assert_eq!(events.len(), CleaningStep::ORDER.len() + 2);
        assert_eq!(events[0], PipelineEvent::RunStarted { rows: 2, columns: 1 });
        let steps: Vec<CleaningStep> = events
            .iter()
            .filter_map(|e| match e {
                PipelineEvent::StepFinished { step, .. } => Some(*step),
                _ => None,
            })
            .collect();
        assert_eq!(steps, CleaningStep::ORDER.to_vec());
        assert!(matches!(
            events.last(),
            Some(PipelineEvent::RunFinished { report: r, .. }) if *r == report
        ));
    }

    #[test]
    fn empty_table_yields_trivial_report() {
        let ds = DataSet::new(Schema::new(Vec::new()), Vec::new());
        let (cleaned, report) = auto_clean(&ds);
        assert_eq!(cleaned, ds);
        assert_eq!(
            report,
            CleaningReport {
                rows_before: 0,
                rows_after: 0,
                columns_before: 0,
                columns_after: 0,
            }
        );
    }

    #[test]
    fn columns_without_rows_are_kept() {
        let ds = DataSet::new(
            Schema::new(vec![Field::new(" salary ", DataType::Utf8)]),
            Vec::new(),
        );
        let (cleaned, report) = auto_clean(&ds);
        assert_eq!(cleaned.schema.fields[0].name, "Salary");
        assert_eq!(cleaned.schema.fields[0].data_type, DataType::Float64);
        assert_eq!(report.columns_after, 1);
        assert_eq!(report.rows_after, 0);
    }

    #[test]
    fn custom_threshold_is_applied() {
        let opts = CleaningOptions {
            missing_threshold: 0.5,
            ..Default::default()
        };
        let cleaner = Cleaner::new(opts).unwrap();
        let ds = DataSet::new(
            Schema::new(vec![Field::new("Score", DataType::Float64)]),
            vec![vec![Value::Float64(1.0)], vec![Value::Null]],
        );
        let (cleaned, _) = cleaner.clean(&ds);
        assert_eq!(cleaned.rows[1][0], Value::Float64(1.0));

        let (default_cleaned, _) = auto_clean(&ds);
        assert_eq!(default_cleaned.rows[1][0], Value::Null);
    }

    #[test]
    fn invalid_options_are_rejected() {
        let opts = CleaningOptions {
            missing_threshold: f64::NAN,
            ..Default::default()
        };
        assert!(Cleaner::new(opts).is_err());
    }
}
