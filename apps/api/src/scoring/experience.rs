use std::sync::LazyLock;

use regex::Regex;

use crate::scoring::weights::NEUTRAL_EXPERIENCE_SCORE;

/// "5 years", "5+ years", "2.5 yrs", "10+yr". Decimals are taken at face
/// value, so "3.5 years" reads as 3.5.
static YEARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*\+?\s*(?:years?|yrs?)\b").unwrap());

/// Largest year count mentioned in a lowercase haystack.
pub fn max_years(haystack: &str) -> Option<f64> {
    YEARS_RE
        .captures_iter(haystack)
        .filter_map(|caps| caps.get(1)?.as_str().parse::<f64>().ok())
        .fold(None, |best: Option<f64>, years| {
            Some(best.map_or(years, |b| b.max(years)))
        })
}

/// `min(evidence / required, 1) × 100` when both are known and the
/// requirement is positive; the neutral default otherwise.
pub fn experience_score(required: Option<f64>, evidence: Option<f64>) -> f64 {
    match (required, evidence) {
        (Some(required), Some(evidence)) if required > 0.0 => {
            (evidence / required).clamp(0.0, 1.0) * 100.0
        }
        _ => NEUTRAL_EXPERIENCE_SCORE,
    }
}
