use std::sync::mpsc;

use crate::error::ClassifierError;
use crate::loss::loss_type::LossType;
use crate::train::iteration_stats::IterationStats;

/// Options for one `train_loop` run.
///
/// # Fields
/// - `rate`            : SGD learning rate, must be > 0
/// - `error_threshold` : stop once the mean error is at or below this, must be ≥ 0
/// - `max_iterations`  : iteration cap; `None` means [`TrainOptions::DEFAULT_MAX_ITERATIONS`]
/// - `batch_size`      : samples per update; `1` is online backprop
/// - `loss_type`       : cost minimised and reported as the error
/// - `shuffle`         : visit examples in a fresh random order each pass
/// - `log_every`       : emit a debug event every N iterations
/// - `progress_tx`     : optional channel; one `IterationStats` per pass.
///                       A dropped receiver does not stop the run.
#[derive(Debug, Clone)]
pub struct TrainOptions {
    pub rate: f64,
    pub error_threshold: f64,
    pub max_iterations: Option<usize>,
    pub batch_size: usize,
    pub loss_type: LossType,
    pub shuffle: bool,
    pub log_every: Option<usize>,
    pub progress_tx: Option<mpsc::Sender<IterationStats>>,
}

impl TrainOptions {
    pub const DEFAULT_RATE: f64 = 0.2;
    pub const DEFAULT_ERROR_THRESHOLD: f64 = 0.0000005;
    pub const DEFAULT_MAX_ITERATIONS: usize = 100_000;

    /// Online MSE training in set order, no progress channel.
    pub fn new(rate: f64, error_threshold: f64) -> Self {
        TrainOptions {
            rate,
            error_threshold,
            max_iterations: None,
            batch_size: 1,
            loss_type: LossType::Mse,
            shuffle: false,
            log_every: None,
            progress_tx: None,
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    pub fn iteration_cap(&self) -> usize {
        self.max_iterations.unwrap_or(Self::DEFAULT_MAX_ITERATIONS)
    }

    /// Rejects option values that cannot describe a training run.
    pub fn validate(&self) -> Result<(), ClassifierError> {
        if !(self.rate.is_finite() && self.rate > 0.0) {
            return Err(ClassifierError::InvalidRate(self.rate));
        }
        if !(self.error_threshold.is_finite() && self.error_threshold >= 0.0) {
            return Err(ClassifierError::InvalidErrorThreshold(self.error_threshold));
        }
        if self.batch_size == 0 {
            return Err(ClassifierError::InvalidBatchSize);
        }
        if self.max_iterations == Some(0) {
            return Err(ClassifierError::InvalidMaxIterations);
        }
        Ok(())
    }
}

impl Default for TrainOptions {
    fn default() -> Self {
        TrainOptions::new(Self::DEFAULT_RATE, Self::DEFAULT_ERROR_THRESHOLD)
    }
}
