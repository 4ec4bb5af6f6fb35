use serde::{Deserialize, Serialize};

/// Element-wise squashing function applied after a layer's linear transform.
///
/// Only bounded activations are offered: the output layer must map every
/// finite pre-activation into [0, 1], and the hidden layer may use either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationFunction {
    /// Logistic sigmoid, range (0, 1). Saturates to exactly 0.0 / 1.0 for
    /// very large |x|, never outside [0, 1].
    #[default]
    Sigmoid,
    /// Hyperbolic tangent, range (-1, 1). Hidden layer only.
    Tanh,
}

impl ActivationFunction {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => {
                // Split on sign so exp() never overflows into inf/inf.
                if x >= 0.0 {
                    1.0 / (1.0 + (-x).exp())
                } else {
                    let e = x.exp();
                    e / (1.0 + e)
                }
            }
            ActivationFunction::Tanh => x.tanh(),
        }
    }

    /// Derivative with respect to the pre-activation `x`.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => {
                let fx = self.function(x);
                fx * (1.0 - fx)
            }
            ActivationFunction::Tanh => {
                let t = x.tanh();
                1.0 - t * t
            }
        }
    }

    /// Whether every output of this activation lies in [0, 1].
    pub fn is_unit_bounded(&self) -> bool {
        matches!(self, ActivationFunction::Sigmoid)
    }
}
