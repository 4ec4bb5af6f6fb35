use std::thread::JoinHandle;

use crate::error::ClassifierError;
use crate::train::iteration_stats::TrainingOutcome;

/// Completion side of a background training run.
///
/// The outcome is produced exactly once, when the run publishes its
/// parameters. There is no way to cancel a run through the handle.
#[derive(Debug)]
pub struct TrainingHandle {
    inner: JoinHandle<TrainingOutcome>,
}

impl TrainingHandle {
    pub(crate) fn new(inner: JoinHandle<TrainingOutcome>) -> TrainingHandle {
        TrainingHandle { inner }
    }

    pub fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }

    /// Blocks until the run has published its parameters.
    pub fn wait(self) -> Result<TrainingOutcome, ClassifierError> {
        self.inner.join().map_err(|_| ClassifierError::TrainingPanicked)
    }
}
