use serde::{Deserialize, Serialize};

use crate::glyph::encoder::EncodedVector;

/// A hand-picked input known to belong to `class_index`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exemplar {
    pub input: EncodedVector,
    pub class_index: usize,
}

impl Exemplar {
    pub fn new(input: EncodedVector, class_index: usize) -> Exemplar {
        Exemplar { input, class_index }
    }
}

/// One labeled sample. `output` holds one target per class, each in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub input: EncodedVector,
    pub output: Vec<f64>,
}

impl TrainingExample {
    /// Labeled "matches no known class".
    pub fn negative(input: EncodedVector, class_count: usize) -> TrainingExample {
        TrainingExample { input, output: vec![0.0; class_count] }
    }

    /// Labeled with a one-hot target. The caller checks `class_index < class_count`.
    pub fn one_hot(
        input: EncodedVector,
        class_index: usize,
        class_count: usize,
    ) -> TrainingExample {
        let mut output = vec![0.0; class_count];
        output[class_index] = 1.0;
        TrainingExample { input, output }
    }
}
