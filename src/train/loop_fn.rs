use std::time::Instant;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::layers::dense::LayerGradients;
use crate::loss::bce::BceLoss;
use crate::loss::loss_type::LossType;
use crate::loss::mse::MseLoss;
use crate::network::network::Network;
use crate::optim::sgd::Sgd;
use crate::synth::example::TrainingExample;
use crate::train::iteration_stats::{IterationStats, TrainingOutcome};
use crate::train::train_config::TrainOptions;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` in place until the mean error of a pass is at or below
/// `options.error_threshold`, or the iteration cap is reached. At least one
/// pass always runs.
///
/// The error of a pass is the mean per-example cost, each measured just
/// before that example's update.
///
/// # Panics
/// Panics if `examples` is empty or `batch_size == 0`. `Classifier::train`
/// rejects both before calling in here.
pub fn train_loop<R: Rng + ?Sized>(
    network: &mut Network,
    examples: &[TrainingExample],
    options: &TrainOptions,
    rng: &mut R,
) -> TrainingOutcome {
    assert!(!examples.is_empty(), "examples must not be empty");
    assert!(options.batch_size > 0, "batch_size must be at least 1");

    let optimizer = Sgd::new(options.rate);
    let cap = options.iteration_cap();
    let run_start = Instant::now();

    let mut order: Vec<usize> = (0..examples.len()).collect();
    let mut error = f64::INFINITY;
    let mut iterations = 0;

    while iterations < cap && error > options.error_threshold {
        let t_start = Instant::now();

        if options.shuffle {
            order.shuffle(rng);
        }

        error = run_one_iteration(
            network,
            examples,
            &order,
            &optimizer,
            options.batch_size,
            options.loss_type,
        );
        iterations += 1;

        let stats = IterationStats {
            iteration: iterations,
            max_iterations: cap,
            error,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };

        if let Some(every) = options.log_every {
            if every > 0 && iterations % every == 0 {
                debug!(iteration = iterations, error, "training progress");
            }
        }

        if let Some(ref tx) = options.progress_tx {
            // Nobody listening is fine; the run is not cancellable.
            let _ = tx.send(stats);
        }

        // A diverged run cannot recover, stop instead of spinning to the cap.
        if error.is_nan() {
            break;
        }
    }

    TrainingOutcome {
        error,
        iterations,
        elapsed_ms: run_start.elapsed().as_millis() as u64,
    }
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// One full pass over the examples in `order`, applying an SGD step after
/// every `batch_size` samples. Returns the mean loss over all samples.
fn run_one_iteration(
    network: &mut Network,
    examples: &[TrainingExample],
    order: &[usize],
    optimizer: &Sgd,
    batch_size: usize,
    loss_type: LossType,
) -> f64 {
    let n = order.len();
    let mut total_loss = 0.0;

    for batch in order.chunks(batch_size) {
        let mut acc_grads: Vec<LayerGradients> =
            network.layers.iter().map(LayerGradients::zeros_like).collect();

        for &idx in batch {
            let example = &examples[idx];
            let traces = network.forward_traced(&example.input);
            let output = &traces[traces.len() - 1].activations;

            total_loss += compute_loss(output, &example.output, loss_type);

            // Backward pass: error starts as ∂L/∂a of the output layer.
            let mut error = compute_loss_derivative(output, &example.output, loss_type);
            for i in (0..network.layers.len()).rev() {
                let layer_input: &[f64] = if i == 0 {
                    &example.input
                } else {
                    &traces[i - 1].activations
                };

                let grads = network.layers[i].compute_gradients(&error, &traces[i], layer_input);

                if i > 0 {
                    error = network.layers[i].propagate_error(&grads.biases);
                }

                acc_grads[i].accumulate(&grads);
            }
        }

        let inv_batch = 1.0 / batch.len() as f64;
        for (layer, mut grads) in network.layers.iter_mut().zip(acc_grads) {
            if batch.len() > 1 {
                grads.weights = grads.weights.map(|x| x * inv_batch);
                grads.biases.iter_mut().for_each(|b| *b *= inv_batch);
            }
            optimizer.step(layer, &grads);
        }
    }

    total_loss / n as f64
}

/// Scalar loss for one sample, dispatched on `LossType`.
fn compute_loss(predicted: &[f64], expected: &[f64], loss_type: LossType) -> f64 {
    match loss_type {
        LossType::Mse => MseLoss::loss(predicted, expected),
        LossType::BinaryCrossEntropy => BceLoss::loss(predicted, expected),
    }
}

/// Per-output gradient for one sample, dispatched on `LossType`.
fn compute_loss_derivative(predicted: &[f64], expected: &[f64], loss_type: LossType) -> Vec<f64> {
    match loss_type {
        LossType::Mse => MseLoss::derivative(predicted, expected),
        LossType::BinaryCrossEntropy => BceLoss::derivative(predicted, expected),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::activation::ActivationFunction;
    use crate::network::spec::Topology;
    use rand::{rngs::StdRng, SeedableRng};
    use std::sync::mpsc;

    fn xor_set() -> Vec<TrainingExample> {
        [([0.0, 0.0], 0.0), ([0.0, 1.0], 1.0), ([1.0, 0.0], 1.0), ([1.0, 1.0], 0.0)]
            .into_iter()
            .map(|(i, o)| TrainingExample { input: i.to_vec(), output: vec![o] })
            .collect()
    }

    fn network(rng: &mut StdRng) -> Network {
        Network::new(Topology::new(2, 5, 1), ActivationFunction::Sigmoid, rng)
    }

    #[test]
    fn stops_at_iteration_cap() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut net = network(&mut rng);
        let opts = TrainOptions::new(0.2, 0.0).with_max_iterations(7);
        let outcome = train_loop(&mut net, &xor_set(), &opts, &mut rng);
        assert_eq!(outcome.iterations, 7);
        assert!(outcome.error.is_finite());
    }

    #[test]
    fn loose_threshold_stops_after_one_pass() {
        let mut rng = StdRng::seed_from_u64(22);
        let mut net = network(&mut rng);
        let opts = TrainOptions::new(0.2, 1.0).with_max_iterations(100);
        let outcome = train_loop(&mut net, &xor_set(), &opts, &mut rng);
        assert_eq!(outcome.iterations, 1);
        assert!(outcome.converged(1.0));
    }

    #[test]
    fn training_lowers_error() {
        let mut rng = StdRng::seed_from_u64(23);
        let mut net = network(&mut rng);
        let once = TrainOptions::new(0.5, 0.0).with_max_iterations(1);
        let first = train_loop(&mut net, &xor_set(), &once, &mut rng);
        let many = TrainOptions::new(0.5, 0.0).with_max_iterations(3000);
        let later = train_loop(&mut net, &xor_set(), &many, &mut rng);
        assert!(later.error < first.error, "{} !< {}", later.error, first.error);
    }

    #[test]
    fn progress_is_reported_every_iteration() {
        let mut rng = StdRng::seed_from_u64(24);
        let mut net = network(&mut rng);
        let (tx, rx) = mpsc::channel();
        let mut opts = TrainOptions::new(0.2, 0.0).with_max_iterations(5);
        opts.progress_tx = Some(tx);
        opts.shuffle = true;
        opts.batch_size = 2;
        opts.loss_type = LossType::BinaryCrossEntropy;
        train_loop(&mut net, &xor_set(), &opts, &mut rng);
        drop(opts);
        let stats: Vec<IterationStats> = rx.iter().collect();
        assert_eq!(stats.len(), 5);
        assert_eq!(stats.last().map(|s| s.iteration), Some(5));
    }

    #[test]
    fn dropped_receiver_does_not_stop_training() {
        let mut rng = StdRng::seed_from_u64(25);
        let mut net = network(&mut rng);
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let mut opts = TrainOptions::new(0.2, 0.0).with_max_iterations(4);
        opts.progress_tx = Some(tx);
        assert_eq!(train_loop(&mut net, &xor_set(), &opts, &mut rng).iterations, 4);
    }
}
