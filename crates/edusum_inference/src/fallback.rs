use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Reverse;

use edusum_core::CompressionLevel;

static SENTENCE_BOUNDARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[.!?]+").expect("sentence boundary pattern is valid")
});

/// Split `text` on runs of `.`, `!` and `?`, dropping empty fragments.
pub fn split_sentences(text: &str) -> Vec<&str> {
    SENTENCE_BOUNDARY
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Model-free summarizer used whenever no backend result is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractiveFallback;

impl ExtractiveFallback {
    pub fn new() -> Self {
        Self
    }

    /// Keeps the leading `max(1, floor(sentences * ratio))` sentences.
    /// Text without any sentence is returned unchanged.
    pub fn summarize(&self, text: &str, ratio: CompressionLevel) -> String {
        let sentences = split_sentences(text);
        if sentences.is_empty() {
            return text.to_string();
        }

        let keep = ratio.apply(sentences.len()).max(1);
        format!("{}.", sentences[..keep].join(". "))
    }

    /// Longest sentences first; equally long sentences keep their original order.
    pub fn extract_key_points(&self, text: &str, count: usize) -> Vec<String> {
        if count == 0 {
            return Vec::new();
        }

        let mut scored: Vec<(usize, &str)> = split_sentences(text)
            .into_iter()
            .map(|sentence| (word_count(sentence), sentence))
            .collect();
        scored.sort_by_key(|(words, _)| Reverse(*words));

        scored
            .into_iter()
            .take(count)
            .map(|(_, sentence)| sentence.to_string())
            .collect()
    }
}
