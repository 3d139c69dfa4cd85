use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::nlp::keywords::extract_keywords;
use crate::nlp::resources::LanguageResources;

/// Where a job description's skill vocabulary came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillSource {
    /// Curated skills lexicon entries mentioned in the job description.
    Lexicon,
    /// No lexicon skill was mentioned; the job description's keywords are used.
    Keywords,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillsMatch {
    /// Fraction of the vocabulary found in the resume, 0–100.
    pub score: f64,
    pub matched: BTreeSet<String>,
    pub missing: BTreeSet<String>,
}

/// Lowercases and collapses whitespace so multi-word terms match across
/// line breaks.
pub fn normalize_haystack(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// True when `term` occurs in `haystack` with no letter or digit directly
/// before or after it. Both arguments are expected lowercase.
pub fn mentions(haystack: &str, term: &str) -> bool {
    if term.is_empty() {
        return false;
    }
    haystack.match_indices(term).any(|(start, _)| {
        let end = start + term.len();
        let before_ok = haystack[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        before_ok && after_ok
    })
}

/// Builds the skill vocabulary for a job description.
pub fn job_skills(
    job_description: &str,
    resources: &LanguageResources,
) -> (BTreeSet<String>, SkillSource) {
    let haystack = normalize_haystack(job_description);
    let from_lexicon: BTreeSet<String> = resources
        .skills()
        .iter()
        .filter(|skill| mentions(&haystack, skill))
        .cloned()
        .collect();

    if from_lexicon.is_empty() {
        (
            extract_keywords(job_description, resources),
            SkillSource::Keywords,
        )
    } else {
        (from_lexicon, SkillSource::Lexicon)
    }
}

/// Splits the vocabulary into skills the resume mentions and skills it lacks.
pub fn match_skills(skills: &BTreeSet<String>, resume_haystack: &str) -> SkillsMatch {
    let (matched, missing): (BTreeSet<String>, BTreeSet<String>) = skills
        .iter()
        .cloned()
        .partition(|skill| mentions(resume_haystack, skill));

    let score = if skills.is_empty() {
        0.0
    } else {
        matched.len() as f64 / skills.len() as f64 * 100.0
    };

    SkillsMatch {
        score,
        matched,
        missing,
    }
}
