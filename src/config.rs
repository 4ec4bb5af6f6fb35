//! Panel configuration loaded from TOML.
//!
//! Every key is optional; a missing file section falls back to the values the
//! demo has always used (rate 0.2, error threshold 5e-7, 10 000 random
//! negatives, hidden width 5).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::activation::activation::ActivationFunction;
use crate::error::ConfigError;
use crate::loss::loss_type::LossType;
use crate::network::spec::Topology;
use crate::score::interpreter::{ScorePolicy, TierThresholds};
use crate::session::variant::Variant;
use crate::train::train_config::TrainOptions;

/// Upper bound on synthesized negatives, to keep a typo from exhausting memory.
pub const MAX_NEGATIVE_COUNT: usize = 5_000_000;

/// Example:
///
/// ```toml
/// variant = "binary"
/// seed = 7
///
/// [training]
/// negative_count = 2000
/// max_iterations = 500
///
/// [scoring]
/// match_threshold = 0.9
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PanelConfig {
    pub variant: Variant,
    /// Seeds parameter initialization and training-set synthesis.
    pub seed: Option<u64>,
    /// Directory of `<name>.json` glyph definitions; built-ins when absent.
    pub glyph_dir: Option<PathBuf>,
    /// Class order for `glyph_dir`. Required when `glyph_dir` is set.
    pub glyph_names: Option<Vec<String>>,
    pub network: NetworkSettings,
    pub training: TrainingSettings,
    pub scoring: ScoringSettings,
    pub server: ServerSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkSettings {
    pub hidden_width: usize,
    pub hidden_activation: ActivationFunction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrainingSettings {
    pub rate: f64,
    pub error_threshold: f64,
    pub max_iterations: Option<usize>,
    pub negative_count: usize,
    pub batch_size: usize,
    pub shuffle: bool,
    pub loss: LossType,
    pub log_every: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringSettings {
    pub high: f64,
    pub mid: f64,
    pub match_threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerSettings {
    pub addr: String,
}

impl Default for PanelConfig {
    fn default() -> Self {
        PanelConfig {
            variant: Variant::default(),
            seed: None,
            glyph_dir: None,
            glyph_names: None,
            network: NetworkSettings::default(),
            training: TrainingSettings::default(),
            scoring: ScoringSettings::default(),
            server: ServerSettings::default(),
        }
    }
}

impl Default for NetworkSettings {
    fn default() -> Self {
        NetworkSettings {
            hidden_width: Topology::DEFAULT_HIDDEN_WIDTH,
            hidden_activation: ActivationFunction::Sigmoid,
        }
    }
}

impl Default for TrainingSettings {
    fn default() -> Self {
        TrainingSettings {
            rate: TrainOptions::DEFAULT_RATE,
            error_threshold: TrainOptions::DEFAULT_ERROR_THRESHOLD,
            max_iterations: None,
            negative_count: 10_000,
            batch_size: 1,
            shuffle: false,
            loss: LossType::Mse,
            log_every: Some(1000),
        }
    }
}

impl Default for ScoringSettings {
    fn default() -> Self {
        let tiers = TierThresholds::default();
        ScoringSettings {
            high: tiers.high,
            mid: tiers.mid,
            match_threshold: ScorePolicy::DEFAULT_MATCH_THRESHOLD,
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings { addr: "127.0.0.1:7878".to_owned() }
    }
}

impl PanelConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        let config: PanelConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Structural checks only. Learning rate and error threshold are checked
    /// when a training run is requested.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.network.hidden_width == 0 {
            return Err(ConfigError::Invalid("network.hidden_width must be at least 1".into()));
        }
        if self.training.negative_count > MAX_NEGATIVE_COUNT {
            return Err(ConfigError::Invalid(format!(
                "training.negative_count must be at most {MAX_NEGATIVE_COUNT}"
            )));
        }
        if self.glyph_dir.is_some() && self.glyph_names.as_ref().map_or(true, |n| n.is_empty()) {
            return Err(ConfigError::Invalid(
                "glyph_dir requires a non-empty glyph_names list".into(),
            ));
        }
        if self.glyph_dir.is_none() && self.glyph_names.is_some() {
            return Err(ConfigError::Invalid("glyph_names requires glyph_dir".into()));
        }
        if self.scoring.mid > self.scoring.high {
            return Err(ConfigError::Invalid("scoring.mid must not exceed scoring.high".into()));
        }
        Ok(())
    }

    pub fn train_options(&self) -> TrainOptions {
        let t = &self.training;
        TrainOptions {
            rate: t.rate,
            error_threshold: t.error_threshold,
            max_iterations: t.max_iterations,
            batch_size: t.batch_size,
            loss_type: t.loss,
            shuffle: t.shuffle,
            log_every: t.log_every,
            progress_tx: None,
        }
    }

    pub fn score_policy(&self) -> ScorePolicy {
        match self.variant {
            Variant::ThreeClass => ScorePolicy::Tiered(TierThresholds {
                high: self.scoring.high,
                mid: self.scoring.mid,
            }),
            Variant::Binary => ScorePolicy::Threshold { threshold: self.scoring.match_threshold },
        }
    }
}
