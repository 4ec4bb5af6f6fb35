use serde::{Deserialize, Serialize};
use crate::activation::activation::ActivationFunction;

/// Fixed layer widths of a three-layer (input → hidden → output) perceptron.
///
/// The topology never changes for the lifetime of a classifier; only the
/// weights behind it do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    pub input_width: usize,
    pub hidden_width: usize,
    pub output_width: usize,
}

/// Describes one layer in a network specification.
///
/// - `size`       : number of neurons in this layer
/// - `input_size` : output size of the previous layer, or the raw input
///                  dimension for the first layer
/// - `activation` : activation applied after the linear transform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub size: usize,
    pub input_size: usize,
    pub activation: ActivationFunction,
}

impl Topology {
    /// Hidden width used by the glyph panel.
    pub const DEFAULT_HIDDEN_WIDTH: usize = 5;

    pub fn new(input_width: usize, hidden_width: usize, output_width: usize) -> Topology {
        Topology { input_width, hidden_width, output_width }
    }

    /// Layer list for this topology. The output layer is always sigmoid so
    /// every score lands in [0, 1].
    pub fn layer_specs(&self, hidden_activation: ActivationFunction) -> Vec<LayerSpec> {
        vec![
            LayerSpec {
                size: self.hidden_width,
                input_size: self.input_width,
                activation: hidden_activation,
            },
            LayerSpec {
                size: self.output_width,
                input_size: self.hidden_width,
                activation: ActivationFunction::Sigmoid,
            },
        ]
    }
}
