pub mod coordinator;

pub use coordinator::{TrainingCoordinator, TrainingState};
