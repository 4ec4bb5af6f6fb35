use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::classifier::classifier::Classifier;
use crate::error::ClassifierError;
use crate::network::snapshot::ParameterSnapshot;
use crate::synth::example::TrainingExample;
use crate::train::iteration_stats::TrainingOutcome;
use crate::train::train_config::TrainOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingState {
    Idle,
    Training,
}

#[derive(Default)]
struct Completed {
    snapshot: Option<ParameterSnapshot>,
    outcome: Option<TrainingOutcome>,
    supervisor: Option<JoinHandle<()>>,
}

/// Runs at most one training run at a time against a classifier and keeps
/// the parameter snapshot taken when the latest run finished.
///
/// `start_training` while a run is in flight is dropped, not queued.
pub struct TrainingCoordinator {
    classifier: Classifier,
    examples: Arc<[TrainingExample]>,
    options: TrainOptions,
    is_training: Arc<AtomicBool>,
    runs_started: AtomicUsize,
    completed: Arc<Mutex<Completed>>,
}

impl TrainingCoordinator {
    pub fn new(
        classifier: Classifier,
        examples: Arc<[TrainingExample]>,
        options: TrainOptions,
    ) -> Self {
        TrainingCoordinator {
            classifier,
            examples,
            options,
            is_training: Arc::new(AtomicBool::new(false)),
            runs_started: AtomicUsize::new(0),
            completed: Arc::new(Mutex::new(Completed::default())),
        }
    }

    pub fn state(&self) -> TrainingState {
        if self.is_training() {
            TrainingState::Training
        } else {
            TrainingState::Idle
        }
    }

    pub fn is_training(&self) -> bool {
        self.is_training.load(Ordering::Acquire)
    }

    /// Number of runs actually started over this coordinator's lifetime.
    pub fn runs_started(&self) -> usize {
        self.runs_started.load(Ordering::Acquire)
    }

    pub fn training_set_len(&self) -> usize {
        self.examples.len()
    }

    /// Idle → Training. Returns `Ok(false)` without side effects when a run is
    /// already in flight.
    pub fn start_training(&self) -> Result<bool, ClassifierError> {
        // Held until the supervisor handle is stored. The previous run's
        // supervisor needs this lock before it can clear the flag, so no later
        // start can store its handle ahead of ours.
        let mut guard = self.lock();
        if self
            .is_training
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("training already running; start request dropped");
            return Ok(false);
        }

        let handle = match self.classifier.train(self.examples.clone(), self.options.clone()) {
            Ok(handle) => handle,
            Err(e) => {
                self.is_training.store(false, Ordering::Release);
                return Err(e);
            }
        };
        self.runs_started.fetch_add(1, Ordering::AcqRel);

        let classifier = self.classifier.clone();
        let completed = self.completed.clone();
        let is_training = self.is_training.clone();
        let supervisor = thread::spawn(move || {
            let result = handle.wait();
            {
                let mut done = completed.lock().unwrap_or_else(PoisonError::into_inner);
                match result {
                    Ok(outcome) => done.outcome = Some(outcome),
                    Err(e) => warn!("training run ended abnormally: {e}"),
                }
                done.snapshot = Some(classifier.snapshot());
            }
            // Training → Idle only once the snapshot is visible.
            is_training.store(false, Ordering::Release);
        });

        guard.supervisor = Some(supervisor);
        Ok(true)
    }

    /// Blocks until the in-flight run (if any) is back to Idle and returns the
    /// outcome of the latest completed run.
    pub fn wait(&self) -> Option<TrainingOutcome> {
        let supervisor = self.lock().supervisor.take();
        if let Some(supervisor) = supervisor {
            if supervisor.join().is_err() {
                warn!("training supervisor panicked");
            }
        }
        self.last_outcome()
    }

    /// Parameters captured at the end of the latest run; `None` before any
    /// run has completed.
    pub fn latest_snapshot(&self) -> Option<ParameterSnapshot> {
        self.lock().snapshot.clone()
    }

    pub fn last_outcome(&self) -> Option<TrainingOutcome> {
        self.lock().outcome
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Completed> {
        self.completed.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::activation::ActivationFunction;
    use crate::network::spec::Topology;
    use rand::{rngs::StdRng, SeedableRng};

    fn coordinator(max_iterations: usize) -> TrainingCoordinator {
        let mut rng = StdRng::seed_from_u64(31);
        let classifier = Classifier::initialize_with(
            Topology::new(2, 5, 1),
            ActivationFunction::Sigmoid,
            &mut rng,
        );
        let examples: Arc<[TrainingExample]> = vec![
            TrainingExample { input: vec![1.0, 1.0], output: vec![1.0] },
            TrainingExample { input: vec![0.0, 1.0], output: vec![0.0] },
        ]
        .into();
        TrainingCoordinator::new(
            classifier,
            examples,
            TrainOptions::new(0.2, 0.0).with_max_iterations(max_iterations),
        )
    }

    #[test]
    fn starts_idle_without_snapshot() {
        let c = coordinator(10);
        assert_eq!(c.state(), TrainingState::Idle);
        assert!(c.latest_snapshot().is_none());
        assert!(c.wait().is_none());
    }

    #[test]
    fn completed_run_returns_to_idle_with_snapshot() {
        let c = coordinator(25);
        assert!(c.start_training().unwrap());
        let outcome = c.wait().unwrap();
        assert_eq!(outcome.iterations, 25);
        assert_eq!(c.state(), TrainingState::Idle);
        assert!(c.latest_snapshot().is_some());
    }

    #[test]
    fn second_start_is_dropped() {
        let c = coordinator(20_000);
        assert!(c.start_training().unwrap());
        assert!(!c.start_training().unwrap());
        assert_eq!(c.runs_started(), 1);
        c.wait();
        assert_eq!(c.runs_started(), 1);
    }

    #[test]
    fn coordinator_is_reentrant() {
        let c = coordinator(5);
        assert!(c.start_training().unwrap());
        c.wait();
        assert!(c.start_training().unwrap());
        c.wait();
        assert_eq!(c.runs_started(), 2);
    }

    #[test]
    fn concurrent_starts_leave_wait_covering_the_last_run() {
        let c = coordinator(50);
        thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for _ in 0..25 {
                        c.start_training().unwrap();
                    }
                });
            }
        });
        let outcome = c.wait().unwrap();
        assert_eq!(outcome.iterations, 50);
        assert_eq!(c.state(), TrainingState::Idle);
        assert!(!c.classifier.is_training());
        assert!(c.runs_started() >= 1);
    }

    #[test]
    fn rejected_run_leaves_coordinator_idle() {
        let mut rng = StdRng::seed_from_u64(32);
        let classifier = Classifier::initialize_with(
            Topology::new(2, 5, 1),
            ActivationFunction::Sigmoid,
            &mut rng,
        );
        let examples: Arc<[TrainingExample]> =
            vec![TrainingExample { input: vec![1.0, 1.0], output: vec![1.0] }].into();
        let c = TrainingCoordinator::new(classifier, examples, TrainOptions::new(-1.0, 0.0));
        assert!(matches!(c.start_training(), Err(ClassifierError::InvalidRate(_))));
        assert_eq!(c.state(), TrainingState::Idle);
        assert_eq!(c.runs_started(), 0);
    }
}
