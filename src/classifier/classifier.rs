use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::thread;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::activation::activation::ActivationFunction;
use crate::classifier::handle::TrainingHandle;
use crate::error::ClassifierError;
use crate::network::network::Network;
use crate::network::snapshot::ParameterSnapshot;
use crate::network::spec::Topology;
use crate::synth::example::TrainingExample;
use crate::train::loop_fn::train_loop;
use crate::train::train_config::TrainOptions;

/// Feed-forward glyph classifier with a fixed topology.
///
/// Cloning yields another handle onto the same parameters. Readers
/// (`activate`, `snapshot`) always see either the parameters from before a
/// training run or the complete result of it: a run trains a private copy and
/// swaps it in with one write. Only one writer may hold the parameters at a
/// time.
#[derive(Debug, Clone)]
pub struct Classifier {
    topology: Topology,
    params: Arc<RwLock<Arc<Network>>>,
    writer: Arc<AtomicBool>,
}

/// Holds the writer slot; releases it on drop, including when a training
/// thread panics.
struct WriterSlot(Arc<AtomicBool>);

impl WriterSlot {
    fn acquire(flag: &Arc<AtomicBool>) -> Result<WriterSlot, ClassifierError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| WriterSlot(flag.clone()))
            .map_err(|_| ClassifierError::TrainingInProgress)
    }
}

impl Drop for WriterSlot {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Classifier {
    /// Randomly initialized sigmoid network `input → hidden → output`.
    pub fn initialize(input_width: usize, hidden_width: usize, output_width: usize) -> Classifier {
        Classifier::initialize_with(
            Topology::new(input_width, hidden_width, output_width),
            ActivationFunction::Sigmoid,
            &mut rand::thread_rng(),
        )
    }

    pub fn initialize_with<R: Rng + ?Sized>(
        topology: Topology,
        hidden_activation: ActivationFunction,
        rng: &mut R,
    ) -> Classifier {
        let network = Network::new(topology, hidden_activation, rng);
        Classifier {
            topology,
            params: Arc::new(RwLock::new(Arc::new(network))),
            writer: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// True while a training run owns the writer slot.
    pub fn is_training(&self) -> bool {
        self.writer.load(Ordering::Acquire)
    }

    fn current(&self) -> Arc<Network> {
        self.params.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn publish(&self, network: Network) {
        *self.params.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(network);
    }

    /// Forward pass: one score in [0, 1] per output class.
    pub fn activate(&self, input: &[f64]) -> Result<Vec<f64>, ClassifierError> {
        if input.len() != self.topology.input_width {
            return Err(ClassifierError::InputWidth {
                expected: self.topology.input_width,
                actual: input.len(),
            });
        }
        Ok(self.current().forward(input))
    }

    pub fn snapshot(&self) -> ParameterSnapshot {
        self.current().snapshot()
    }

    /// Replaces the parameters with an in-memory snapshot of the same topology.
    pub fn restore(&self, snapshot: ParameterSnapshot) -> Result<(), ClassifierError> {
        if snapshot.topology != self.topology {
            return Err(ClassifierError::SnapshotShape(format!(
                "snapshot topology {:?} differs from {:?}",
                snapshot.topology, self.topology
            )));
        }
        let network = Network::from_snapshot(snapshot)?;
        let _slot = WriterSlot::acquire(&self.writer)?;
        self.publish(network);
        Ok(())
    }

    /// Re-randomizes every parameter, keeping the topology and hidden activation.
    pub fn reset<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<(), ClassifierError> {
        let _slot = WriterSlot::acquire(&self.writer)?;
        let hidden_activation = self.current().hidden_activation();
        self.publish(Network::new(self.topology, hidden_activation, rng));
        Ok(())
    }

    /// Starts a background training run over `examples`.
    ///
    /// Options and example shapes are checked before anything is spawned. The
    /// returned handle resolves to the run's outcome once the trained
    /// parameters have been published.
    pub fn train(
        &self,
        examples: Arc<[TrainingExample]>,
        options: TrainOptions,
    ) -> Result<TrainingHandle, ClassifierError> {
        options.validate()?;
        self.check_examples(&examples)?;

        let slot = WriterSlot::acquire(&self.writer)?;
        let mut network = Network::clone(&self.current());
        let classifier = self.clone();

        info!(
            examples = examples.len(),
            rate = options.rate,
            error_threshold = options.error_threshold,
            max_iterations = options.iteration_cap(),
            "training started"
        );

        let inner = thread::spawn(move || {
            let _slot = slot;
            let mut rng = StdRng::from_entropy();
            let outcome = train_loop(&mut network, &examples, &options, &mut rng);
            classifier.publish(network);
            info!(
                error = outcome.error,
                iterations = outcome.iterations,
                elapsed_ms = outcome.elapsed_ms,
                "training finished"
            );
            outcome
        });

        Ok(TrainingHandle::new(inner))
    }

    fn check_examples(&self, examples: &[TrainingExample]) -> Result<(), ClassifierError> {
        if examples.is_empty() {
            return Err(ClassifierError::EmptyTrainingSet);
        }
        for example in examples {
            if example.input.len() != self.topology.input_width {
                return Err(ClassifierError::InputWidth {
                    expected: self.topology.input_width,
                    actual: example.input.len(),
                });
            }
            if example.output.len() != self.topology.output_width {
                return Err(ClassifierError::OutputWidth {
                    expected: self.topology.output_width,
                    actual: example.output.len(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn seeded(seed: u64) -> Classifier {
        let mut rng = StdRng::seed_from_u64(seed);
        Classifier::initialize_with(Topology::new(3, 5, 3), ActivationFunction::Sigmoid, &mut rng)
    }

    fn tiny_set() -> Arc<[TrainingExample]> {
        vec![
            TrainingExample { input: vec![1.0, 0.0, 1.0], output: vec![0.0, 1.0, 0.0] },
            TrainingExample { input: vec![0.0, 0.0, 0.0], output: vec![0.0, 0.0, 0.0] },
        ]
        .into()
    }

    #[test]
    fn activate_returns_one_bounded_score_per_class() {
        let c = Classifier::initialize(3, 5, 3);
        let scores = c.activate(&[1.0, 0.0, 1.0]).unwrap();
        assert_eq!(scores.len(), 3);
        assert!(scores.iter().all(|s| (0.0..=1.0).contains(s)));
    }

    #[test]
    fn activate_is_deterministic() {
        let c = seeded(1);
        assert_eq!(c.activate(&[0.0, 1.0, 1.0]).unwrap(), c.activate(&[0.0, 1.0, 1.0]).unwrap());
    }

    #[test]
    fn wrong_input_width_fails_loudly() {
        let c = seeded(2);
        let err = c.activate(&[1.0, 0.0]).unwrap_err();
        assert!(matches!(err, ClassifierError::InputWidth { expected: 3, actual: 2 }));
    }

    #[test]
    fn invalid_options_are_rejected_before_spawning() {
        let c = seeded(3);
        assert!(matches!(
            c.train(tiny_set(), TrainOptions::new(0.0, 0.1)),
            Err(ClassifierError::InvalidRate(_))
        ));
        assert!(matches!(
            c.train(tiny_set(), TrainOptions::new(0.2, -0.1)),
            Err(ClassifierError::InvalidErrorThreshold(_))
        ));
        assert!(!c.is_training());
    }

    #[test]
    fn malformed_examples_are_rejected() {
        let c = seeded(4);
        let empty: Arc<[TrainingExample]> = Vec::new().into();
        assert!(matches!(
            c.train(empty, TrainOptions::default()),
            Err(ClassifierError::EmptyTrainingSet)
        ));
        let bad: Arc<[TrainingExample]> =
            vec![TrainingExample { input: vec![1.0, 0.0, 1.0], output: vec![1.0] }].into();
        assert!(matches!(
            c.train(bad, TrainOptions::default()),
            Err(ClassifierError::OutputWidth { expected: 3, actual: 1 })
        ));
    }

    #[test]
    fn training_publishes_new_parameters() {
        let c = seeded(5);
        let before = c.snapshot();
        let outcome = c
            .train(tiny_set(), TrainOptions::new(0.2, 0.0).with_max_iterations(50))
            .unwrap()
            .wait()
            .unwrap();
        assert_eq!(outcome.iterations, 50);
        assert_ne!(c.snapshot(), before);
        assert!(!c.is_training());
    }

    #[test]
    fn finished_handle_has_released_the_writer_slot() {
        let c = seeded(10);
        let handle = c
            .train(tiny_set(), TrainOptions::new(0.2, 0.0).with_max_iterations(10))
            .unwrap();
        while !handle.is_finished() {
            thread::yield_now();
        }
        assert!(!c.is_training());
        assert_eq!(handle.wait().unwrap().iterations, 10);
    }

    #[test]
    fn second_writer_is_refused_while_training() {
        let c = seeded(6);
        let (tx, rx) = mpsc::channel();
        let mut opts = TrainOptions::new(0.2, 0.0).with_max_iterations(20_000);
        opts.progress_tx = Some(tx);
        let handle = c.train(tiny_set(), opts).unwrap();
        // Once the first progress report arrives the run certainly holds the slot.
        rx.recv().unwrap();
        assert!(c.is_training());
        assert!(matches!(
            c.train(tiny_set(), TrainOptions::default()),
            Err(ClassifierError::TrainingInProgress)
        ));
        assert!(matches!(
            c.reset(&mut StdRng::seed_from_u64(0)),
            Err(ClassifierError::TrainingInProgress)
        ));
        // Readers keep working against a complete parameter set.
        let scores = c.activate(&[1.0, 0.0, 1.0]).unwrap();
        assert!(scores.iter().all(|s| (0.0..=1.0).contains(s)));
        handle.wait().unwrap();
        assert!(!c.is_training());
    }

    #[test]
    fn restore_round_trips_and_checks_topology() {
        let a = seeded(7);
        let b = seeded(8);
        b.restore(a.snapshot()).unwrap();
        assert_eq!(a.activate(&[1.0, 1.0, 0.0]).unwrap(), b.activate(&[1.0, 1.0, 0.0]).unwrap());

        let other = Classifier::initialize(4, 5, 3);
        assert!(matches!(b.restore(other.snapshot()), Err(ClassifierError::SnapshotShape(_))));
    }

    #[test]
    fn reset_changes_parameters() {
        let c = seeded(9);
        let before = c.snapshot();
        c.reset(&mut StdRng::seed_from_u64(99)).unwrap();
        assert_ne!(c.snapshot(), before);
        assert_eq!(c.snapshot().topology, before.topology);
    }
}
