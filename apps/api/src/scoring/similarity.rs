use std::collections::BTreeMap;

use crate::nlp::keywords::preprocess_text;
use crate::nlp::resources::LanguageResources;

/// Term-frequency vector over preprocessed text.
///
/// Ordered map so the dot product sums in the same order on every run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermVector {
    counts: BTreeMap<String, usize>,
    norm: f64,
}

impl TermVector {
    /// Counts content terms: stop words and terms of two characters or less
    /// are dropped after `preprocess_text`.
    pub fn from_text(text: &str, resources: &LanguageResources) -> Self {
        let mut counts = BTreeMap::new();
        for term in preprocess_text(text).split_whitespace() {
            if term.chars().count() > 2 && !resources.is_stop_word(term) {
                *counts.entry(term.to_string()).or_insert(0usize) += 1;
            }
        }
        let norm = counts
            .values()
            .map(|&c| (c * c) as f64)
            .sum::<f64>()
            .sqrt();
        Self { counts, norm }
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Cosine similarity in [0, 1]; 0 when either vector is empty.
    pub fn cosine(&self, other: &TermVector) -> f64 {
        if self.norm == 0.0 || other.norm == 0.0 {
            return 0.0;
        }
        let dot: f64 = self
            .counts
            .iter()
            .filter_map(|(term, &a)| other.counts.get(term).map(|&b| (a * b) as f64))
            .sum();
        // An empty sum is -0.0.
        if dot <= 0.0 {
            return 0.0;
        }
        (dot / (self.norm * other.norm)).min(1.0)
    }
}
