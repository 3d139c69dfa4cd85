use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Education score when the job description asks for no degree and the
/// resume names none.
pub const NEUTRAL_EDUCATION_SCORE: f64 = 50.0;

/// Experience score when either the required years or the resume's years
/// cannot be found.
pub const NEUTRAL_EXPERIENCE_SCORE: f64 = 50.0;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Weights combining the four sub-scores into `overall_score`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub content: f64,
    pub skills: f64,
    pub education: f64,
    pub experience: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            content: 0.30,
            skills: 0.40,
            education: 0.15,
            experience: 0.15,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum InvalidWeights {
    #[error("scoring weight '{name}' is negative ({value})")]
    Negative { name: &'static str, value: f64 },

    #[error("scoring weights must sum to 1.0, got {0}")]
    BadSum(f64),
}

impl ScoringWeights {
    pub fn validate(&self) -> Result<(), InvalidWeights> {
        for (name, value) in [
            ("content", self.content),
            ("skills", self.skills),
            ("education", self.education),
            ("experience", self.experience),
        ] {
            if value.is_nan() || value < 0.0 {
                return Err(InvalidWeights::Negative { name, value });
            }
        }
        let sum = self.content + self.skills + self.education + self.experience;
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(InvalidWeights::BadSum(sum));
        }
        Ok(())
    }

    /// Weighted sum of sub-scores already on the 0–100 scale, clamped.
    pub fn combine(&self, content: f64, skills: f64, education: f64, experience: f64) -> f64 {
        clamp_score(
            self.content * content
                + self.skills * skills
                + self.education * education
                + self.experience * experience,
        )
    }
}

/// Clamps to [0, 100]; NaN and negative zero become 0.
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() || score <= 0.0 {
        0.0
    } else {
        score.min(100.0)
    }
}

/// Rounds to one decimal place for display.
pub fn round_score(score: f64) -> f64 {
    (score * 10.0).round() / 10.0
}
