//! Pipeline orchestrator.
//!
//! For each document: extract text → stats → entities → scores → record.
//! Documents are processed in order, once each, with no state shared between
//! them beyond the read-only `JobProfile` and language resources.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::ScreenError;
use crate::extraction::{extract_text, UploadedDocument};
use crate::nlp::entities::{extract_entities_with, EntityBundle};
use crate::nlp::resources::LanguageResources;
use crate::scoring::{JobProfile, RelevanceScorer, ScoreBreakdown};
use crate::stats::{compute_stats, DocumentStats};

/// Analysis of one resume.
#[derive(Debug, Clone, Serialize)]
pub struct ResultRecord {
    pub filename: String,
    pub text: String,
    pub stats: DocumentStats,
    pub entities: EntityBundle,
    pub scores: ScoreBreakdown,
}

/// What to do when one document cannot be analyzed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop the run and return the first error.
    Abort,
    /// Record the failure and carry on with the remaining documents.
    #[default]
    Skip,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentFailure {
    pub filename: String,
    pub message: String,
}

impl From<&ScreenError> for DocumentFailure {
    fn from(err: &ScreenError) -> Self {
        Self {
            filename: err.filename().unwrap_or_default().to_string(),
            message: err.to_string(),
        }
    }
}

/// Ranked results plus the documents that were skipped.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScreeningReport {
    pub results: Vec<ResultRecord>,
    pub failures: Vec<DocumentFailure>,
}

pub struct Screener {
    resources: &'static LanguageResources,
    scorer: Arc<dyn RelevanceScorer>,
}

impl Screener {
    pub fn new(resources: &'static LanguageResources, scorer: Arc<dyn RelevanceScorer>) -> Self {
        Self { resources, scorer }
    }

    pub fn scorer(&self) -> &dyn RelevanceScorer {
        self.scorer.as_ref()
    }

    /// Runs one document through the full pipeline. Every error names the
    /// document's filename.
    pub fn analyze_document(
        &self,
        job: &JobProfile,
        document: &UploadedDocument,
    ) -> Result<ResultRecord, ScreenError> {
        let text = extract_text(document)?;
        let stats = compute_stats(&text);
        let entities = extract_entities_with(&text, self.resources);
        let scores = self.scorer.score(job, &text);

        Ok(ResultRecord {
            filename: document.filename.clone(),
            text,
            stats,
            entities,
            scores,
        })
    }

    /// Screens every document against the job description and ranks the
    /// results by overall score.
    pub fn screen(
        &self,
        job_description: &str,
        documents: &[UploadedDocument],
        policy: FailurePolicy,
    ) -> Result<ScreeningReport, ScreenError> {
        let job = self.scorer.analyze_job(job_description);
        let total = documents.len();
        let mut report = ScreeningReport::default();

        for (index, document) in documents.iter().enumerate() {
            match self.analyze_document(&job, document) {
                Ok(record) => {
                    info!(
                        filename = %record.filename,
                        index = index + 1,
                        total,
                        overall_score = record.scores.overall_score,
                        "Analyzed resume"
                    );
                    report.results.push(record);
                }
                Err(e) => {
                    warn!(
                        filename = %document.filename,
                        index = index + 1,
                        total,
                        error = %e,
                        "Resume analysis failed"
                    );
                    match policy {
                        FailurePolicy::Abort => return Err(e),
                        FailurePolicy::Skip => report.failures.push(DocumentFailure::from(&e)),
                    }
                }
            }
        }

        rank_results(&mut report.results);
        info!(
            analyzed = report.results.len(),
            failed = report.failures.len(),
            total,
            "Screening run complete"
        );
        Ok(report)
    }
}

/// Orders by overall score, highest first. Stable, so ties keep upload order.
pub fn rank_results(results: &mut [ResultRecord]) {
    results.sort_by(|a, b| b.scores.overall_score.total_cmp(&a.scores.overall_score));
}
