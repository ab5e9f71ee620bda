use std::fmt;
use std::time::Duration;

use crate::types::CleaningReport;

use super::CleaningStep;

/// Events emitted by [`super::Cleaner`] during a run.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    RunStarted {
        rows: usize,
        columns: usize,
    },
    StepFinished {
        step: CleaningStep,
        rows: usize,
        columns: usize,
        elapsed: Duration,
    },
    RunFinished {
        report: CleaningReport,
        elapsed: Duration,
    },
}

impl fmt::Display for PipelineEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineEvent::RunStarted { rows, columns } => {
                write!(f, "run started rows={rows} columns={columns}")
            }
            PipelineEvent::StepFinished {
                step,
                rows,
                columns,
                elapsed,
            } => write!(
                f,
                "step {step} finished rows={rows} columns={columns} elapsed={elapsed:?}"
            ),
            PipelineEvent::RunFinished { report, elapsed } => {
                write!(f, "run finished {report} elapsed={elapsed:?}")
            }
        }
    }
}

/// Observer hook for pipeline events.
pub trait PipelineObserver: Send + Sync {
    fn on_event(&self, event: &PipelineEvent);
}

/// Prints every pipeline event to stderr.
#[derive(Debug, Default)]
pub struct StdErrPipelineObserver;

impl PipelineObserver for StdErrPipelineObserver {
    fn on_event(&self, event: &PipelineEvent) {
        eprintln!("[clean] {event}");
    }
}
