pub mod example;
pub mod synthesizer;

pub use example::{Exemplar, TrainingExample};
pub use synthesizer::TrainingSetSynthesizer;
