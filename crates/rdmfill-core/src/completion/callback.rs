//! Progress reporting for completion runs.
//!
//! The engine reports every pair it visits and every pass it finishes to a
//! [`CompletionCallback`]. Reporting has no influence on the numeric result
//! except that `on_pass_end` may stop the run early.

use super::result::{Completion, TerminationReason};
use crate::error::CompletionResult;
use crate::types::Scalar;

/// A missing pair that received an estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairEstimate<T> {
    /// Pass number, starting at 1
    pub pass: usize,
    /// Position of the pair within the pass, starting at 1
    pub position: usize,
    /// Number of missing pairs at the start of the pass
    pub total: usize,
    /// Row index (upper triangle)
    pub row: usize,
    /// Column index (upper triangle)
    pub col: usize,
    /// Estimated distance written to both (row, col) and (col, row)
    pub value: T,
    /// Number of reference indices the estimate was derived from
    pub references: usize,
}

/// A missing pair left untouched because it had no reference index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairSkipped {
    /// Pass number, starting at 1
    pub pass: usize,
    /// Position of the pair within the pass, starting at 1
    pub position: usize,
    /// Number of missing pairs at the start of the pass
    pub total: usize,
    /// Row index (upper triangle)
    pub row: usize,
    /// Column index (upper triangle)
    pub col: usize,
}

/// Summary of a finished pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassSummary {
    /// Pass number, starting at 1
    pub pass: usize,
    /// Missing pairs at the start of the pass
    pub missing_before: usize,
    /// Missing pairs at the end of the pass
    pub missing_after: usize,
}

impl PassSummary {
    /// Number of pairs filled during the pass.
    pub fn filled(&self) -> usize {
        self.missing_before - self.missing_after
    }
}

/// Trait for completion callbacks.
///
/// Callbacks observe the completion as it progresses. They can be used for
/// printing, recording, or stopping after a given pass.
pub trait CompletionCallback<T: Scalar>: Send {
    /// Called once after validation, before the first pass.
    fn on_completion_start(&mut self, size: usize, missing: usize) -> CompletionResult<()> {
        let _ = (size, missing);
        Ok(())
    }

    /// Called before each pass with the number of missing pairs it will visit.
    fn on_pass_start(&mut self, pass: usize, missing: usize) -> CompletionResult<()> {
        let _ = (pass, missing);
        Ok(())
    }

    /// Called after a pair received an estimate.
    fn on_pair_estimated(&mut self, estimate: &PairEstimate<T>) -> CompletionResult<()> {
        let _ = estimate;
        Ok(())
    }

    /// Called after a pair was left missing for this pass.
    fn on_pair_skipped(&mut self, skipped: &PairSkipped) -> CompletionResult<()> {
        let _ = skipped;
        Ok(())
    }

    /// Called at the end of each pass.
    ///
    /// Returns `true` to continue, `false` to stop early.
    fn on_pass_end(&mut self, summary: &PassSummary) -> CompletionResult<bool> {
        let _ = summary;
        Ok(true)
    }

    /// Called once with the final result.
    fn on_completion_end(&mut self, completion: &Completion<T>) -> CompletionResult<()> {
        let _ = completion;
        Ok(())
    }
}

/// A no-op callback that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpCallback;

impl<T: Scalar> CompletionCallback<T> for NoOpCallback {}

/// A callback that prints progress to stdout.
///
/// Prints one line per pass start, one per visited pair, one per pass end
/// and a closing line with the termination reason.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrintProgressCallback;

impl PrintProgressCallback {
    /// Create a new progress printing callback.
    pub fn new() -> Self {
        Self
    }
}

impl<T: Scalar> CompletionCallback<T> for PrintProgressCallback {
    fn on_pass_start(&mut self, _pass: usize, missing: usize) -> CompletionResult<()> {
        println!("Reconstructing {missing} missing entries");
        Ok(())
    }

    fn on_pair_estimated(&mut self, estimate: &PairEstimate<T>) -> CompletionResult<()> {
        println!(
            "{}/{} Estimated ({},{}) and ({},{}) with {:.4} using {} references",
            estimate.position,
            estimate.total,
            estimate.row,
            estimate.col,
            estimate.col,
            estimate.row,
            estimate.value,
            estimate.references
        );
        Ok(())
    }

    fn on_pair_skipped(&mut self, skipped: &PairSkipped) -> CompletionResult<()> {
        println!(
            "{}/{} No references available for ({},{})",
            skipped.position, skipped.total, skipped.row, skipped.col
        );
        Ok(())
    }

    fn on_pass_end(&mut self, summary: &PassSummary) -> CompletionResult<bool> {
        println!(
            "Pass {}: filled {} of {} missing entries",
            summary.pass,
            summary.filled(),
            summary.missing_before
        );
        Ok(true)
    }

    fn on_completion_end(&mut self, completion: &Completion<T>) -> CompletionResult<()> {
        match completion.termination_reason {
            TerminationReason::Complete => {
                println!("Completed after {} passes", completion.passes)
            }
            TerminationReason::Stagnated => println!(
                "No progress in reducing missing entries; stopping with {} unestimable",
                completion.remaining.len()
            ),
            TerminationReason::MaxPasses | TerminationReason::CallbackRequest => println!(
                "Stopped after {} passes with {} entries missing",
                completion.passes,
                completion.remaining.len()
            ),
        }
        Ok(())
    }
}

/// Events collected by [`RecordingCallback`].
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent<T> {
    /// Completion started on an N×N matrix with this many missing pairs
    Started {
        /// Matrix size N
        size: usize,
        /// Missing upper-triangle pairs
        missing: usize,
    },
    /// A pair received an estimate
    Estimated(PairEstimate<T>),
    /// A pair had no reference index
    Skipped(PairSkipped),
    /// A pass finished
    PassEnded(PassSummary),
    /// Completion finished
    Finished(TerminationReason),
}

/// A callback that records every event, optionally stopping after a pass.
#[derive(Debug, Clone, Default)]
pub struct RecordingCallback<T> {
    /// Recorded events in order of occurrence
    pub events: Vec<ProgressEvent<T>>,
    stop_after_pass: Option<usize>,
}

impl<T: Scalar> RecordingCallback<T> {
    /// Create a callback that records everything and never stops the run.
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            stop_after_pass: None,
        }
    }

    /// Request termination once the given pass has ended.
    pub fn stop_after_pass(mut self, pass: usize) -> Self {
        self.stop_after_pass = Some(pass);
        self
    }

    /// Summaries of every finished pass.
    pub fn passes(&self) -> Vec<PassSummary> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ProgressEvent::PassEnded(summary) => Some(*summary),
                _ => None,
            })
            .collect()
    }

    /// Every estimate in the order it was written.
    pub fn estimates(&self) -> Vec<PairEstimate<T>> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ProgressEvent::Estimated(estimate) => Some(*estimate),
                _ => None,
            })
            .collect()
    }
}

impl<T: Scalar> CompletionCallback<T> for RecordingCallback<T> {
    fn on_completion_start(&mut self, size: usize, missing: usize) -> CompletionResult<()> {
        self.events.push(ProgressEvent::Started { size, missing });
        Ok(())
    }

    fn on_pair_estimated(&mut self, estimate: &PairEstimate<T>) -> CompletionResult<()> {
        self.events.push(ProgressEvent::Estimated(*estimate));
        Ok(())
    }

    fn on_pair_skipped(&mut self, skipped: &PairSkipped) -> CompletionResult<()> {
        self.events.push(ProgressEvent::Skipped(*skipped));
        Ok(())
    }

    fn on_pass_end(&mut self, summary: &PassSummary) -> CompletionResult<bool> {
        self.events.push(ProgressEvent::PassEnded(*summary));
        Ok(self.stop_after_pass != Some(summary.pass))
    }

    fn on_completion_end(&mut self, completion: &Completion<T>) -> CompletionResult<()> {
        self.events
            .push(ProgressEvent::Finished(completion.termination_reason));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_callback_stops_after_pass() {
        let mut callback = RecordingCallback::<f64>::new().stop_after_pass(2);
        let first = PassSummary {
            pass: 1,
            missing_before: 5,
            missing_after: 3,
        };
        let second = PassSummary {
            pass: 2,
            missing_before: 3,
            missing_after: 1,
        };
        assert!(callback.on_pass_end(&first).unwrap());
        assert!(!callback.on_pass_end(&second).unwrap());
        assert_eq!(callback.passes(), vec![first, second]);
        assert_eq!(first.filled(), 2);
    }

    #[test]
    fn test_recording_callback_collects_estimates() {
        let mut callback = RecordingCallback::<f64>::new();
        let estimate = PairEstimate {
            pass: 1,
            position: 1,
            total: 1,
            row: 0,
            col: 2,
            value: 1.5,
            references: 2,
        };
        callback.on_completion_start(4, 1).unwrap();
        callback.on_pair_estimated(&estimate).unwrap();
        assert_eq!(callback.estimates(), vec![estimate]);
        assert_eq!(
            callback.events[0],
            ProgressEvent::Started {
                size: 4,
                missing: 1
            }
        );
    }

    #[test]
    fn test_noop_callback_continues() {
        let mut callback = NoOpCallback;
        let summary = PassSummary {
            pass: 1,
            missing_before: 1,
            missing_after: 0,
        };
        assert!(CompletionCallback::<f64>::on_pass_end(&mut callback, &summary).unwrap());
    }
}
