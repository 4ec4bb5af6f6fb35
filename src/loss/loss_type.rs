use serde::{Deserialize, Serialize};

/// Selects the cost the training loop minimises and reports as its error.
///
/// - `Mse`                : mean squared error over the output vector.
/// - `BinaryCrossEntropy` : per-output BCE; suits independent sigmoid
///   outputs such as the one-vs-rest glyph classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossType {
    #[default]
    Mse,
    BinaryCrossEntropy,
}
