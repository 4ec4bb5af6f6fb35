use serde::{Deserialize, Serialize};

/// Confidence bucket for a class score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tier {
    High,
    Mid,
    Low,
}

/// Strict lower bounds: a score is HIGH when `> high`, MID when `> mid`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierThresholds {
    pub high: f64,
    pub mid: f64,
}

impl Default for TierThresholds {
    fn default() -> Self {
        TierThresholds { high: 0.9, mid: 0.25 }
    }
}

impl TierThresholds {
    pub fn tier(&self, score: f64) -> Tier {
        if score > self.high {
            Tier::High
        } else if score > self.mid {
            Tier::Mid
        } else {
            Tier::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TieredScore {
    pub score: f64,
    pub tier: Tier,
    pub formatted_percent: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchScore {
    pub score: f64,
    pub is_match: bool,
    pub formatted_percent: String,
}

/// How raw scores become feedback. Chosen once per session from the variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScorePolicy {
    /// One-vs-rest classes, each bucketed into a tier.
    Tiered(TierThresholds),
    /// Single detector, match iff the score exceeds `threshold`.
    Threshold { threshold: f64 },
}

impl ScorePolicy {
    pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.925;

    pub fn interpret(&self, scores: &[f64]) -> Interpretation {
        match self {
            ScorePolicy::Tiered(thresholds) => {
                Interpretation::Tiered(interpret_tiers(scores, thresholds))
            }
            ScorePolicy::Threshold { threshold } => Interpretation::Match(
                scores.iter().map(|&s| interpret_match(s, *threshold)).collect(),
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "scores", rename_all = "snake_case")]
pub enum Interpretation {
    Tiered(Vec<TieredScore>),
    Match(Vec<MatchScore>),
}

pub fn interpret_tiers(scores: &[f64], thresholds: &TierThresholds) -> Vec<TieredScore> {
    scores
        .iter()
        .map(|&score| TieredScore {
            score,
            tier: thresholds.tier(score),
            formatted_percent: format_percent(score),
        })
        .collect()
}

pub fn interpret_match(score: f64, threshold: f64) -> MatchScore {
    MatchScore {
        score,
        is_match: score > threshold,
        formatted_percent: format_percent(score),
    }
}

/// `0.9254` → `"92.5%"`. Halves round up, so `0.9125` → `"91.3%"`.
pub fn format_percent(score: f64) -> String {
    let tenths = (score * 1000.0).round() / 10.0;
    format!("{tenths:.1}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn tier_boundaries_are_strict() {
        let t = TierThresholds::default();
        assert_eq!(t.tier(0.9 + EPS), Tier::High);
        assert_eq!(t.tier(0.9), Tier::Mid);
        assert_eq!(t.tier(0.9 - EPS), Tier::Mid);
        assert_eq!(t.tier(0.25 + EPS), Tier::Mid);
        assert_eq!(t.tier(0.25), Tier::Low);
        assert_eq!(t.tier(0.0), Tier::Low);
        assert_eq!(t.tier(1.0), Tier::High);
    }

    #[test]
    fn match_threshold_boundary() {
        assert!(interpret_match(0.9251, 0.925).is_match);
        assert!(!interpret_match(0.9249, 0.925).is_match);
        assert!(!interpret_match(0.925, 0.925).is_match);
    }

    #[test]
    fn percent_has_one_decimal() {
        assert_eq!(format_percent(0.9254), "92.5%");
        assert_eq!(format_percent(0.0), "0.0%");
        assert_eq!(format_percent(1.0), "100.0%");
        assert_eq!(format_percent(0.003), "0.3%");
    }

    #[test]
    fn percent_rounds_halves_up() {
        assert_eq!(format_percent(0.0025), "0.3%");
        assert_eq!(format_percent(0.9125), "91.3%");
    }

    #[test]
    fn policy_dispatches_per_variant() {
        let tiered = ScorePolicy::Tiered(TierThresholds::default()).interpret(&[0.95, 0.5, 0.1]);
        match tiered {
            Interpretation::Tiered(s) => {
                let tiers: Vec<Tier> = s.iter().map(|t| t.tier).collect();
                assert_eq!(tiers, vec![Tier::High, Tier::Mid, Tier::Low]);
            }
            other => panic!("unexpected {other:?}"),
        }

        let policy = ScorePolicy::Threshold { threshold: ScorePolicy::DEFAULT_MATCH_THRESHOLD };
        let single = policy.interpret(&[0.93]);
        assert_eq!(
            single,
            Interpretation::Match(vec![MatchScore {
                score: 0.93,
                is_match: true,
                formatted_percent: "93.0%".into(),
            }])
        );
    }

    #[test]
    fn tiers_serialize_uppercase() {
        assert_eq!(serde_json::to_string(&Tier::High).unwrap(), "\"HIGH\"");
    }
}
