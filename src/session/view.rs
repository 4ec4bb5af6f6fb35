use serde::Serialize;

use crate::coordinator::coordinator::TrainingState;
use crate::glyph::encoder::EncodedVector;
use crate::glyph::tile::Tile;
use crate::network::snapshot::ParameterSnapshot;
use crate::score::interpreter::Interpretation;
use crate::session::variant::Variant;
use crate::train::iteration_stats::TrainingOutcome;

/// Everything the view layer renders, computed fresh on every request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelView {
    pub variant: Variant,
    pub width: usize,
    pub tiles: Vec<Tile>,
    pub encoded: EncodedVector,
    pub labels: Vec<String>,
    pub scores: Vec<f64>,
    pub interpretation: Interpretation,
    pub training_state: TrainingState,
    pub is_training: bool,
    pub runs_started: usize,
    pub training_set_size: usize,
    /// Parameters captured when the latest run finished.
    pub network: Option<ParameterSnapshot>,
    pub last_outcome: Option<TrainingOutcome>,
}
