use rand::Rng;

use crate::activation::activation::ActivationFunction;
use crate::error::ClassifierError;
use crate::layers::dense::{Layer, LayerTrace};
use crate::math::matrix::Matrix;
use crate::network::snapshot::{LayerSnapshot, ParameterSnapshot};
use crate::network::spec::Topology;

#[derive(Debug, Clone)]
pub struct Network {
    topology: Topology,
    pub layers: Vec<Layer>,
}

impl Network {
    /// Builds a freshly randomized network for `topology`.
    pub fn new<R: Rng + ?Sized>(
        topology: Topology,
        hidden_activation: ActivationFunction,
        rng: &mut R,
    ) -> Network {
        let layers = topology
            .layer_specs(hidden_activation)
            .into_iter()
            .map(|spec| Layer::new(spec.size, spec.input_size, spec.activation, rng))
            .collect();
        Network { topology, layers }
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Activation of the first layer; the output layer is always sigmoid.
    pub fn hidden_activation(&self) -> ActivationFunction {
        self.layers
            .first()
            .map(|l| l.activator)
            .unwrap_or_default()
    }

    /// Inference forward pass. The caller guarantees `input.len()` equals
    /// the topology's input width.
    pub fn forward(&self, input: &[f64]) -> Vec<f64> {
        let mut current = input.to_vec();
        for layer in &self.layers {
            current = layer.forward(&current);
        }
        current
    }

    /// Forward pass keeping every layer's pre-activations and activations.
    pub fn forward_traced(&self, input: &[f64]) -> Vec<LayerTrace> {
        let mut traces: Vec<LayerTrace> = Vec::with_capacity(self.layers.len());
        for layer in &self.layers {
            let trace = match traces.last() {
                Some(prev) => layer.forward_traced(&prev.activations),
                None => layer.forward_traced(input),
            };
            traces.push(trace);
        }
        traces
    }

    pub fn snapshot(&self) -> ParameterSnapshot {
        ParameterSnapshot {
            topology: self.topology,
            layers: self
                .layers
                .iter()
                .map(|l| LayerSnapshot {
                    activation: l.activator,
                    weights: l.weights.to_rows(),
                    biases: l.biases.clone(),
                })
                .collect(),
        }
    }

    /// Rebuilds a network from a snapshot, checking every layer against the
    /// snapshot's topology.
    pub fn from_snapshot(snapshot: ParameterSnapshot) -> Result<Network, ClassifierError> {
        let topology = snapshot.topology;
        let expected = topology.layer_specs(ActivationFunction::Sigmoid);
        if snapshot.layers.len() != expected.len() {
            return Err(ClassifierError::SnapshotShape(format!(
                "expected {} layers, found {}",
                expected.len(),
                snapshot.layers.len()
            )));
        }

        let layer_count = expected.len();
        let mut layers = Vec::with_capacity(layer_count);
        for (i, (stored, spec)) in snapshot.layers.into_iter().zip(expected).enumerate() {
            let weights = Matrix::from_rows(stored.weights).ok_or_else(|| {
                ClassifierError::SnapshotShape(format!("layer {i} has ragged weights"))
            })?;
            if weights.rows != spec.input_size || weights.cols != spec.size {
                return Err(ClassifierError::SnapshotShape(format!(
                    "layer {i} weights are {}x{}, expected {}x{}",
                    weights.rows, weights.cols, spec.input_size, spec.size
                )));
            }
            if !weights.is_finite() || stored.biases.iter().any(|b| !b.is_finite()) {
                return Err(ClassifierError::SnapshotShape(format!(
                    "layer {i} has non-finite parameters"
                )));
            }
            if i + 1 == layer_count && !stored.activation.is_unit_bounded() {
                return Err(ClassifierError::SnapshotShape(
                    "output layer activation must be bounded to [0, 1]".into(),
                ));
            }
            let layer = Layer::from_parts(weights, stored.biases, stored.activation).ok_or_else(|| {
                ClassifierError::SnapshotShape(format!("layer {i} bias count mismatch"))
            })?;
            layers.push(layer);
        }

        Ok(Network { topology, layers })
    }
}
