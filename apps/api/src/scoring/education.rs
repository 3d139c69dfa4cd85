use serde::{Deserialize, Serialize};

use crate::scoring::skills::mentions;
use crate::scoring::weights::NEUTRAL_EDUCATION_SCORE;

/// Degree ladder, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegreeLevel {
    Associate = 1,
    Bachelor = 2,
    Master = 3,
    Doctorate = 4,
}

const DEGREE_TERMS: &[(DegreeLevel, &[&str])] = &[
    (
        DegreeLevel::Doctorate,
        &["phd", "ph.d", "doctorate", "doctoral"],
    ),
    (
        DegreeLevel::Master,
        &["master", "masters", "msc", "m.sc", "m.s.", "mba", "m.eng"],
    ),
    (
        DegreeLevel::Bachelor,
        &[
            "bachelor",
            "bachelors",
            "bsc",
            "b.sc",
            "b.s.",
            "b.a.",
            "b.eng",
            "undergraduate degree",
        ],
    ),
    (
        DegreeLevel::Associate,
        &["associate degree", "associate's degree", "associates degree", "associate of"],
    ),
];

/// Highest degree mentioned in a normalized (lowercase) haystack.
pub fn highest_degree(haystack: &str) -> Option<DegreeLevel> {
    DEGREE_TERMS
        .iter()
        .find(|(_, terms)| terms.iter().any(|t| mentions(haystack, t)))
        .map(|(level, _)| *level)
}

/// Scores the resume's degree against the job's.
///
/// | required | held      | score              |
/// |----------|-----------|--------------------|
/// | none     | none      | neutral (50)       |
/// | none     | any       | 100                |
/// | L        | none      | 0                  |
/// | L        | R         | min(R / L, 1) × 100 |
pub fn education_score(required: Option<DegreeLevel>, held: Option<DegreeLevel>) -> f64 {
    match (required, held) {
        (None, None) => NEUTRAL_EDUCATION_SCORE,
        (None, Some(_)) => 100.0,
        (Some(_), None) => 0.0,
        (Some(required), Some(held)) => {
            (held as u8 as f64 / required as u8 as f64).min(1.0) * 100.0
        }
    }
}
