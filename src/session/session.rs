use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::classifier::classifier::Classifier;
use crate::config::PanelConfig;
use crate::coordinator::coordinator::{TrainingCoordinator, TrainingState};
use crate::error::{GlyphError, SessionError};
use crate::glyph::encoder::EncodedVector;
use crate::glyph::glyph_set::GlyphSet;
use crate::glyph::tile::{GlyphDefinition, Tile};
use crate::network::snapshot::ParameterSnapshot;
use crate::network::spec::Topology;
use crate::score::interpreter::{Interpretation, ScorePolicy};
use crate::session::variant::Variant;
use crate::session::view::PanelView;
use crate::synth::synthesizer::TrainingSetSynthesizer;
use crate::train::iteration_stats::TrainingOutcome;

/// All state of one panel session: the editable tiles, the classifier, the
/// training set and its coordinator, and the scoring policy.
///
/// Scores are never cached; every read re-encodes the current tiles and runs
/// a fresh activation.
pub struct Session {
    variant: Variant,
    panel: GlyphDefinition,
    labels: Vec<String>,
    classifier: Classifier,
    coordinator: TrainingCoordinator,
    policy: ScorePolicy,
}

impl Session {
    /// Builds a session from config, loading glyphs from `glyph_dir` when set.
    pub fn new(config: &PanelConfig) -> Result<Session, SessionError> {
        let glyphs = match (&config.glyph_dir, &config.glyph_names) {
            (Some(dir), Some(names)) => GlyphSet::load_dir(dir, names)?,
            _ => GlyphSet::builtin()?,
        };
        Session::with_glyphs(config, glyphs)
    }

    pub fn with_glyphs(config: &PanelConfig, glyphs: GlyphSet) -> Result<Session, SessionError> {
        config.validate()?;
        let variant = config.variant;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let topology = Topology::new(
            glyphs.vector_length(),
            config.network.hidden_width,
            variant.output_width(&glyphs),
        );
        let classifier =
            Classifier::initialize_with(topology, config.network.hidden_activation, &mut rng);

        let synthesizer = TrainingSetSynthesizer::new(topology.input_width, topology.output_width);
        let examples = synthesizer.synthesize(
            config.training.negative_count,
            &variant.exemplars(&glyphs),
            &mut rng,
        )?;
        let coordinator = TrainingCoordinator::new(
            classifier.clone(),
            Arc::from(examples),
            config.train_options(),
        );

        let panel = glyphs
            .get(variant.initial_glyph(&glyphs))
            .cloned()
            .ok_or(GlyphError::NoGlyphs)?;

        info!(
            ?variant,
            input_width = topology.input_width,
            hidden_width = topology.hidden_width,
            output_width = topology.output_width,
            training_set = coordinator.training_set_len(),
            "session ready"
        );

        Ok(Session {
            variant,
            panel,
            labels: variant.labels(&glyphs),
            classifier,
            coordinator,
            policy: config.score_policy(),
        })
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn glyph(&self) -> &GlyphDefinition {
        &self.panel
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.panel.tiles
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn policy(&self) -> ScorePolicy {
        self.policy
    }

    /// Flips one tile and returns its new state.
    pub fn toggle_tile(&mut self, id: u32) -> Result<bool, SessionError> {
        Ok(self.panel.toggle(id)?)
    }

    pub fn encoded(&self) -> EncodedVector {
        self.panel.encode()
    }

    pub fn scores(&self) -> Result<Vec<f64>, SessionError> {
        Ok(self.classifier.activate(&self.encoded())?)
    }

    pub fn interpretation(&self) -> Result<Interpretation, SessionError> {
        Ok(self.policy.interpret(&self.scores()?))
    }

    /// Starts training unless a run is already in flight. `Ok(false)` means
    /// the request was dropped.
    pub fn start_training(&self) -> Result<bool, SessionError> {
        Ok(self.coordinator.start_training()?)
    }

    pub fn is_training(&self) -> bool {
        self.coordinator.is_training()
    }

    pub fn training_state(&self) -> TrainingState {
        self.coordinator.state()
    }

    pub fn runs_started(&self) -> usize {
        self.coordinator.runs_started()
    }

    /// Blocks until any in-flight run has finished.
    pub fn wait_for_training(&self) -> Option<TrainingOutcome> {
        self.coordinator.wait()
    }

    /// Snapshot captured at the end of the latest training run.
    pub fn network_snapshot(&self) -> Option<ParameterSnapshot> {
        self.coordinator.latest_snapshot()
    }

    pub fn view(&self) -> Result<PanelView, SessionError> {
        let encoded = self.encoded();
        let scores = self.classifier.activate(&encoded)?;
        let interpretation = self.policy.interpret(&scores);
        Ok(PanelView {
            variant: self.variant,
            width: self.panel.width,
            tiles: self.panel.tiles.clone(),
            encoded,
            labels: self.labels.clone(),
            scores,
            interpretation,
            training_state: self.coordinator.state(),
            is_training: self.coordinator.is_training(),
            runs_started: self.coordinator.runs_started(),
            training_set_size: self.coordinator.training_set_len(),
            network: self.coordinator.latest_snapshot(),
            last_outcome: self.coordinator.last_outcome(),
        })
    }
}
