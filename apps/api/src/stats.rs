use serde::{Deserialize, Serialize};

/// Basic counts over an extracted resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentStats {
    pub word_count: usize,
    /// Number of `.`-separated segments. Naive on purpose: "U.S." counts
    /// extra segments and a trailing period adds an empty segment.
    pub sentence_count: usize,
    pub avg_word_length: f64,
    pub char_count: usize,
}

/// Computes document statistics. Total over any input, including "".
pub fn compute_stats(text: &str) -> DocumentStats {
    let words: Vec<&str> = text.split_whitespace().collect();
    let word_count = words.len();

    let avg_word_length = if word_count == 0 {
        0.0
    } else {
        let letters: usize = words.iter().map(|w| w.chars().count()).sum();
        letters as f64 / word_count as f64
    };

    DocumentStats {
        word_count,
        sentence_count: text.split('.').count(),
        avg_word_length,
        char_count: text.chars().count(),
    }
}
