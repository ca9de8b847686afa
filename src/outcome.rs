//! Per-item result and the aggregated (summaries, errors) view over a run.

use crate::error::{ExecutorFailed, SyncError};
use crate::styling;
use indexmap::IndexMap;
use log::error;

/// The result of processing one item.
///
/// A successful item carries an optional summary fragment; a failed one
/// carries the error and, if the pipeline made partial progress before the
/// failing step, a summary fragment too.
#[derive(Debug)]
pub enum Outcome {
    Empty,
    Summary(String),
    Error(SyncError),
    SummaryAndError(String, SyncError),
}

impl Outcome {
    pub fn empty() -> Self {
        Outcome::Empty
    }

    pub fn from_summary(summary: impl Into<String>) -> Self {
        let summary = summary.into();
        if summary.is_empty() {
            Outcome::Empty
        } else {
            Outcome::Summary(summary)
        }
    }

    /// Join non-empty `lines` with `\n`; an empty list is equivalent to [`Outcome::empty`].
    pub fn from_summary_lines(lines: &[String]) -> Self {
        if lines.is_empty() {
            Outcome::Empty
        } else {
            Outcome::Summary(lines.join("\n"))
        }
    }

    pub fn from_error(error: SyncError) -> Self {
        Outcome::Error(error)
    }

    /// Attach `error` to an existing outcome, preserving any summary already present.
    pub fn with_error(self, error: SyncError) -> Self {
        match self {
            Outcome::Empty => Outcome::Error(error),
            Outcome::Summary(s) => Outcome::SummaryAndError(s, error),
            Outcome::Error(_) => Outcome::Error(error),
            Outcome::SummaryAndError(s, _) => Outcome::SummaryAndError(s, error),
        }
    }

    pub fn success(&self) -> bool {
        !matches!(self, Outcome::Error(_) | Outcome::SummaryAndError(_, _))
    }

    pub fn summary(&self) -> Option<&str> {
        match self {
            Outcome::Summary(s) | Outcome::SummaryAndError(s, _) => Some(s),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&SyncError> {
        match self {
            Outcome::Error(e) | Outcome::SummaryAndError(_, e) => Some(e),
            _ => None,
        }
    }
}

/// The aggregated view over a completed run: every success summary, in
/// order, and every failure keyed by the item description that produced it.
#[derive(Debug, Default)]
pub struct OutcomeCollection {
    pub summaries: Vec<String>,
    pub errors: IndexMap<String, SyncError>,
}

impl OutcomeCollection {
    /// Partition `outcomes` in a single traversal, preserving its iteration
    /// order (insertion order for a sequential run, completion order for a
    /// parallel one, since both hand in an [`IndexMap`]).
    pub fn from_outcomes(outcomes: IndexMap<String, Outcome>) -> Self {
        let mut summaries = Vec::new();
        let mut errors = IndexMap::new();

        for (description, outcome) in outcomes {
            if let Some(summary) = outcome.summary() {
                summaries.push(summary.to_string());
            }
            if !outcome.success() {
                if let Outcome::Error(e) | Outcome::SummaryAndError(_, e) = outcome {
                    errors.insert(description, e);
                }
            }
        }

        OutcomeCollection { summaries, errors }
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty() && self.errors.is_empty()
    }

    /// Print the success/failure report to the terminal, then fail with
    /// [`ExecutorFailed`] iff any error was collected.
    pub fn handle_result(
        &self,
        error_message: &str,
        summary_title: Option<&str>,
    ) -> Result<(), ExecutorFailed> {
        if !self.summaries.is_empty() {
            if let Some(title) = summary_title {
                println!("{title}");
            }
            for summary in &self.summaries {
                println!("{summary}");
            }
        }

        if !self.errors.is_empty() {
            error!("{error_message}");
            for (item, err) in &self.errors {
                eprintln!("{}", styling::error_bullet(item, &err.to_string()));
            }
            return Err(ExecutorFailed);
        }

        Ok(())
    }
}
