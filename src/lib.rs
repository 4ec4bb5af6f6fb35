pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;
pub mod glyph;
pub mod synth;
pub mod classifier;
pub mod coordinator;
pub mod score;
pub mod session;
pub mod config;
pub mod error;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use network::{Network, ParameterSnapshot, Topology};
pub use loss::loss_type::LossType;
pub use train::{IterationStats, TrainOptions, TrainingOutcome};
pub use glyph::{encode, EncodedVector, GlyphDefinition, GlyphSet, Tile};
pub use synth::{Exemplar, TrainingExample, TrainingSetSynthesizer};
pub use classifier::{Classifier, TrainingHandle};
pub use coordinator::{TrainingCoordinator, TrainingState};
pub use score::{Interpretation, ScorePolicy, Tier, TierThresholds};
pub use session::{PanelView, Session, Variant};
pub use config::PanelConfig;
pub use error::{ClassifierError, ConfigError, GlyphError, SessionError};
