use serde::{Deserialize, Serialize};

use crate::CompressionLevel;

/// Word-count window a backend is asked to target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthBudget {
    pub min_length: usize,
    pub max_length: usize,
}

impl LengthBudget {
    /// `max_length` is the floored share of `word_count`, kept at one word for
    /// any non-empty source so that `1 <= min_length <= max_length <= word_count`.
    /// A zero word count yields `max_length = 0, min_length = 1`.
    pub fn compute(word_count: usize, ratio: CompressionLevel) -> Self {
        let mut max_length = ratio.apply(word_count);
        if word_count > 0 {
            max_length = max_length.max(1);
        }
        let min_length = (max_length / 2).max(1);
        Self { min_length, max_length }
    }

    /// No meaningful budget: the source had no words.
    pub fn is_empty(&self) -> bool {
        self.max_length == 0
    }
}
