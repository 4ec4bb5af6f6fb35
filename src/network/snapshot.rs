use serde::{Deserialize, Serialize};

use crate::activation::activation::ActivationFunction;
use crate::network::spec::Topology;

/// Serializable copy of one layer's parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSnapshot {
    pub activation: ActivationFunction,
    /// `input_size` rows of `size` weights each.
    pub weights: Vec<Vec<f64>>,
    pub biases: Vec<f64>,
}

/// Point-in-time copy of every learned parameter, for display or for
/// restoring an in-memory classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSnapshot {
    pub topology: Topology,
    pub layers: Vec<LayerSnapshot>,
}

impl ParameterSnapshot {
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<ParameterSnapshot> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::network::Network;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn json_text_restores_the_same_network() {
        let mut rng = StdRng::seed_from_u64(41);
        let net = Network::new(Topology::new(4, 5, 2), ActivationFunction::Sigmoid, &mut rng);
        let json = net.snapshot().to_json_pretty().unwrap();
        assert!(json.contains("\"topology\""));

        let parsed = ParameterSnapshot::from_json(&json).unwrap();
        let restored = Network::from_snapshot(parsed).unwrap();
        let input = [1.0, 0.0, 0.0, 1.0];
        assert_eq!(restored.forward(&input), net.forward(&input));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(ParameterSnapshot::from_json("{\"topology\":").is_err());
    }
}
