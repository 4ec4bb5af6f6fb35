pub mod classifier;
pub mod handle;

pub use classifier::Classifier;
pub use handle::TrainingHandle;
