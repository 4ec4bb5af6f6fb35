use std::path::PathBuf;

use thiserror::Error;

/// Contract violations raised by the classifier and its training entry points.
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("input vector has length {actual}, classifier expects {expected}")]
    InputWidth { expected: usize, actual: usize },
    #[error("target vector has length {actual}, classifier expects {expected}")]
    OutputWidth { expected: usize, actual: usize },
    #[error("learning rate must be positive and finite, got {0}")]
    InvalidRate(f64),
    #[error("error threshold must be non-negative and finite, got {0}")]
    InvalidErrorThreshold(f64),
    #[error("batch size must be at least 1")]
    InvalidBatchSize,
    #[error("max iterations must be at least 1 when given")]
    InvalidMaxIterations,
    #[error("training set is empty")]
    EmptyTrainingSet,
    #[error("class index {index} is out of range for {classes} classes")]
    ClassIndexOutOfRange { index: usize, classes: usize },
    #[error("parameter snapshot does not fit this network: {0}")]
    SnapshotShape(String),
    #[error("a training run is already writing the parameters")]
    TrainingInProgress,
    #[error("training thread panicked")]
    TrainingPanicked,
}

/// Problems with reference glyph definitions or tile edits.
#[derive(Debug, Error)]
pub enum GlyphError {
    #[error("no tile with id {0}")]
    UnknownTile(u32),
    #[error("tile id {0} appears more than once")]
    DuplicateTile(u32),
    #[error("glyph has no tiles")]
    Empty,
    #[error("glyph width must be positive")]
    ZeroWidth,
    #[error("glyph `{name}` has {actual} tiles, expected {expected}")]
    TileCountMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
    #[error("no reference glyphs supplied")]
    NoGlyphs,
    #[error("unknown glyph `{0}`")]
    Unknown(String),
    #[error("invalid glyph JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read glyph file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Errors raised while loading a [`crate::config::PanelConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Anything a [`crate::session::Session`] operation can fail with.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
    #[error(transparent)]
    Glyph(#[from] GlyphError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
