use rand::Rng;

use crate::{activation::activation::ActivationFunction, math::matrix::Matrix};

/// Fully connected layer. `weights` has shape `(input_size, size)`.
#[derive(Debug, Clone)]
pub struct Layer {
    pub size: usize,
    pub weights: Matrix,
    pub biases: Vec<f64>,
    pub activator: ActivationFunction,
}

/// Values recorded during a forward pass, needed for backprop.
#[derive(Debug, Clone)]
pub struct LayerTrace {
    /// z = xW + b
    pub pre_activations: Vec<f64>,
    /// a = σ(z)
    pub activations: Vec<f64>,
}

/// Gradient of the loss with respect to one layer's parameters.
#[derive(Debug, Clone)]
pub struct LayerGradients {
    pub weights: Matrix,
    pub biases: Vec<f64>,
}

impl LayerGradients {
    pub fn zeros_like(layer: &Layer) -> LayerGradients {
        LayerGradients {
            weights: Matrix::zeros(layer.weights.rows, layer.weights.cols),
            biases: vec![0.0; layer.biases.len()],
        }
    }

    pub fn accumulate(&mut self, other: &LayerGradients) {
        self.weights.add_scaled(&other.weights, 1.0);
        for (a, b) in self.biases.iter_mut().zip(&other.biases) {
            *a += b;
        }
    }
}

impl Layer {
    pub fn new<R: Rng + ?Sized>(
        size: usize,
        input_size: usize,
        activation: ActivationFunction,
        rng: &mut R,
    ) -> Layer {
        let weights = Matrix::random(input_size, size, rng);
        let biases = Matrix::random(1, size, rng).row(0).to_vec();

        Layer {
            size,
            weights,
            biases,
            activator: activation,
        }
    }

    /// Reassembles a layer from stored parameters. `None` when the bias
    /// length does not match the weight columns.
    pub fn from_parts(
        weights: Matrix,
        biases: Vec<f64>,
        activation: ActivationFunction,
    ) -> Option<Layer> {
        if weights.cols != biases.len() {
            return None;
        }
        Some(Layer { size: biases.len(), weights, biases, activator: activation })
    }

    pub fn input_size(&self) -> usize {
        self.weights.rows
    }

    fn pre_activate(&self, input: &[f64]) -> Vec<f64> {
        let mut z = self.weights.left_mul(input);
        for (zi, b) in z.iter_mut().zip(&self.biases) {
            *zi += b;
        }
        z
    }

    /// Inference-only forward pass. Takes `&self`, so concurrent readers never
    /// observe scratch state from another caller.
    pub fn forward(&self, input: &[f64]) -> Vec<f64> {
        self.pre_activate(input)
            .into_iter()
            .map(|z| self.activator.function(z))
            .collect()
    }

    pub fn forward_traced(&self, input: &[f64]) -> LayerTrace {
        let pre_activations = self.pre_activate(input);
        let activations = pre_activations.iter().map(|&z| self.activator.function(z)).collect();
        LayerTrace { pre_activations, activations }
    }

    /// Computes parameter gradients for one sample.
    /// `activation_error` is ∂L/∂a for this layer; `input` is what the layer
    /// was fed during the traced forward pass.
    pub fn compute_gradients(
        &self,
        activation_error: &[f64],
        trace: &LayerTrace,
        input: &[f64],
    ) -> LayerGradients {
        // δ = error ⊙ σ'(z)
        let delta: Vec<f64> = activation_error
            .iter()
            .zip(&trace.pre_activations)
            .map(|(e, &z)| e * self.activator.derivative(z))
            .collect();

        LayerGradients {
            weights: Matrix::outer(input, &delta),
            biases: delta,
        }
    }

    /// ∂L/∂a of the previous layer, given this layer's δ.
    pub fn propagate_error(&self, delta: &[f64]) -> Vec<f64> {
        self.weights.right_mul(delta)
    }

    /// Applies pre-computed gradients scaled by lr.
    pub fn apply_gradients(&mut self, grads: &LayerGradients, lr: f64) {
        self.weights.add_scaled(&grads.weights, -lr);
        for (b, g) in self.biases.iter_mut().zip(&grads.biases) {
            *b -= lr * g;
        }
    }
}
