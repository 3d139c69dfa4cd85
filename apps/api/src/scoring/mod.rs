//! Relevance scoring — pluggable, trait-based scorer that measures a resume
//! against a job description.
//!
//! Default: `HeuristicScorer` (term overlap and keyword rules; fast,
//! deterministic, no model). The `Screener` in `AppState` holds it as an
//! `Arc<dyn RelevanceScorer>`.

pub mod education;
pub mod experience;
pub mod similarity;
pub mod skills;
pub mod weights;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::nlp::resources::LanguageResources;
use crate::scoring::education::{education_score, highest_degree, DegreeLevel};
use crate::scoring::experience::{experience_score, max_years};
use crate::scoring::similarity::TermVector;
use crate::scoring::skills::{job_skills, match_skills, normalize_haystack, SkillSource};
use crate::scoring::weights::{clamp_score, round_score, ScoringWeights};

// ────────────────────────────────────────────────────────────────────────────
// Output data model
// ────────────────────────────────────────────────────────────────────────────

/// Multi-factor match of one resume against one job description.
/// Every numeric field is in [0, 100], rounded to one decimal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub overall_score: f64,
    pub content_similarity: f64,
    pub skills_match: f64,
    pub education_level: f64,
    pub experience_level: f64,
    pub matched_skills: BTreeSet<String>,
    pub missing_skills: BTreeSet<String>,
}

impl ScoreBreakdown {
    /// All scores at zero, every job skill missing.
    fn floor(job_skills: &BTreeSet<String>) -> Self {
        Self {
            overall_score: 0.0,
            content_similarity: 0.0,
            skills_match: 0.0,
            education_level: 0.0,
            experience_level: 0.0,
            matched_skills: BTreeSet::new(),
            missing_skills: job_skills.clone(),
        }
    }
}

/// Everything the scorer needs from a job description, computed once per
/// screening run and shared read-only across resumes.
#[derive(Debug, Clone)]
pub struct JobProfile {
    is_empty: bool,
    terms: TermVector,
    skills: BTreeSet<String>,
    skill_source: SkillSource,
    required_degree: Option<DegreeLevel>,
    required_years: Option<f64>,
}

impl JobProfile {
    pub fn build(job_description: &str, resources: &LanguageResources) -> Self {
        let haystack = normalize_haystack(job_description);
        let (skills, skill_source) = job_skills(job_description, resources);
        Self {
            is_empty: haystack.is_empty(),
            terms: TermVector::from_text(job_description, resources),
            skills,
            skill_source,
            required_degree: highest_degree(&haystack),
            required_years: max_years(&haystack),
        }
    }

    pub fn skills(&self) -> &BTreeSet<String> {
        &self.skills
    }

    pub fn skill_source(&self) -> SkillSource {
        self.skill_source
    }

    pub fn required_degree(&self) -> Option<DegreeLevel> {
        self.required_degree
    }

    pub fn required_years(&self) -> Option<f64> {
        self.required_years
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to swap scoring backends without touching the pipeline
/// or the handlers. Scoring never fails on text input.
pub trait RelevanceScorer: Send + Sync {
    fn analyze_job(&self, job_description: &str) -> JobProfile;

    fn score(&self, job: &JobProfile, resume_text: &str) -> ScoreBreakdown;

    /// Convenience for one-off scoring of a single pair.
    fn score_text(&self, job_description: &str, resume_text: &str) -> ScoreBreakdown {
        let job = self.analyze_job(job_description);
        self.score(&job, resume_text)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// HeuristicScorer — default implementation
// ────────────────────────────────────────────────────────────────────────────

/// Heuristic scorer.
///
/// 1. content_similarity: cosine of term-frequency vectors × 100
/// 2. skills_match: share of the job's skill vocabulary the resume mentions
/// 3. education_level: degree ladder comparison (see `education_score`)
/// 4. experience_level: years mentioned vs years required (see `experience_score`)
/// 5. overall_score: weighted sum of 1–4
pub struct HeuristicScorer {
    resources: &'static LanguageResources,
    weights: ScoringWeights,
}

impl HeuristicScorer {
    pub fn new(resources: &'static LanguageResources, weights: ScoringWeights) -> Self {
        Self { resources, weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }
}

impl RelevanceScorer for HeuristicScorer {
    fn analyze_job(&self, job_description: &str) -> JobProfile {
        JobProfile::build(job_description, self.resources)
    }

    fn score(&self, job: &JobProfile, resume_text: &str) -> ScoreBreakdown {
        let haystack = normalize_haystack(resume_text);
        if job.is_empty || haystack.is_empty() {
            return ScoreBreakdown::floor(&job.skills);
        }

        let content = clamp_score(
            job.terms
                .cosine(&TermVector::from_text(resume_text, self.resources))
                * 100.0,
        );
        let skills = match_skills(&job.skills, &haystack);
        let skills_score = clamp_score(skills.score);
        let education = clamp_score(education_score(
            job.required_degree,
            highest_degree(&haystack),
        ));
        let experience = clamp_score(experience_score(
            job.required_years,
            max_years(&haystack),
        ));
        let overall = self
            .weights
            .combine(content, skills_score, education, experience);

        ScoreBreakdown {
            overall_score: round_score(overall),
            content_similarity: round_score(content),
            skills_match: round_score(skills_score),
            education_level: round_score(education),
            experience_level: round_score(experience),
            matched_skills: skills.matched,
            missing_skills: skills.missing,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
