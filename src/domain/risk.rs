use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower bound (inclusive) of the HIGH band
pub const HIGH_THRESHOLD: f64 = 0.75;
/// Lower bound (inclusive) of the MEDIUM band
pub const MEDIUM_THRESHOLD: f64 = 0.40;

/// Decimal places kept in a returned risk score
pub const SCORE_DECIMALS: i32 = 4;

/// Discrete risk band derived from a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLabel {
    Low,
    Medium,
    High,
}

impl RiskLabel {
    /// Step function over the score, evaluated high to low.
    pub fn from_score(score: f64) -> Self {
        if score >= HIGH_THRESHOLD {
            RiskLabel::High
        } else if score >= MEDIUM_THRESHOLD {
            RiskLabel::Medium
        } else {
            RiskLabel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLabel::Low => "LOW",
            RiskLabel::Medium => "MEDIUM",
            RiskLabel::High => "HIGH",
        }
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scoring result for one transaction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_score: f64,
    pub risk_label: RiskLabel,
}

impl RiskAssessment {
    /// Rounds the raw probability and labels the rounded value.
    pub fn from_probability(probability: f64) -> Self {
        let risk_score = round_score(probability);
        Self {
            risk_score,
            risk_label: RiskLabel::from_score(risk_score),
        }
    }
}

/// Round half away from zero to [`SCORE_DECIMALS`] places.
pub fn round_score(score: f64) -> f64 {
    let factor = 10f64.powi(SCORE_DECIMALS);
    (score * factor).round() / factor
}
