pub mod interpreter;

pub use interpreter::{
    format_percent, interpret_match, interpret_tiers, Interpretation, MatchScore, ScorePolicy,
    Tier, TierThresholds, TieredScore,
};
