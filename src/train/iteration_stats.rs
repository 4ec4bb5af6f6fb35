use serde::{Deserialize, Serialize};

/// Per-iteration statistics emitted by `train_loop`.
///
/// When a `progress_tx` channel is configured in `TrainOptions`, the loop
/// sends one value at the end of every full pass over the training set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IterationStats {
    /// 1-based iteration number.
    pub iteration: usize,
    /// Iteration cap for this run.
    pub max_iterations: usize,
    /// Mean per-example cost over this pass.
    pub error: f64,
    /// Wall-clock duration of this single pass in milliseconds.
    pub elapsed_ms: u64,
}

/// Final result of a training run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingOutcome {
    /// Error achieved on the last completed iteration.
    pub error: f64,
    /// Number of full passes performed.
    pub iterations: usize,
    /// Wall-clock duration of the whole run in milliseconds.
    pub elapsed_ms: u64,
}

impl TrainingOutcome {
    /// Whether the run stopped because it reached the error threshold rather
    /// than the iteration cap.
    pub fn converged(&self, error_threshold: f64) -> bool {
        self.error <= error_threshold
    }
}
