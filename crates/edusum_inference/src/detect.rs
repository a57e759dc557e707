//! Stopword based language detection for the supported languages.

use std::collections::HashSet;
use std::fmt;
use stop_words::{get, LANGUAGE};

use edusum_core::{Error, LanguageDetector, Result};

/// Detects `ru` by script and tells `en` from `de` by stopword hits.
pub struct StopwordDetector {
    english: HashSet<String>,
    german: HashSet<String>,
}

impl fmt::Debug for StopwordDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StopwordDetector")
            .field("english", &self.english.len())
            .field("german", &self.german.len())
            .finish()
    }
}

impl Default for StopwordDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl StopwordDetector {
    pub fn new() -> Self {
        Self {
            english: get(LANGUAGE::English).iter().map(|s| s.to_string()).collect(),
            german: get(LANGUAGE::German).iter().map(|s| s.to_string()).collect(),
        }
    }

    fn is_cyrillic(c: char) -> bool {
        matches!(c, '\u{0400}'..='\u{04FF}' | '\u{0500}'..='\u{052F}')
    }

    fn is_german_letter(c: char) -> bool {
        matches!(c, 'ä' | 'ö' | 'ü' | 'ß' | 'Ä' | 'Ö' | 'Ü')
    }
}

impl LanguageDetector for StopwordDetector {
    fn detect(&self, text: &str) -> Result<String> {
        let (cyrillic, latin) = text
            .chars()
            .filter(|c| c.is_alphabetic())
            .fold((0usize, 0usize), |(cyrillic, latin), c| {
                if Self::is_cyrillic(c) {
                    (cyrillic + 1, latin)
                } else {
                    (cyrillic, latin + 1)
                }
            });

        if cyrillic + latin == 0 {
            return Err(Error::Undetectable);
        }
        if cyrillic > latin {
            return Ok("ru".to_string());
        }

        let mut english = 0usize;
        let mut german = 0usize;
        for word in text
            .split(|c: char| !c.is_alphabetic())
            .filter(|w| !w.is_empty())
        {
            let word = word.to_lowercase();
            if self.english.contains(&word) {
                english += 1;
            }
            if self.german.contains(&word) {
                german += 1;
            }
            if word.chars().any(Self::is_german_letter) {
                german += 1;
            }
        }

        tracing::debug!("Stopword hits: en={} de={}", english, german);
        if english > german {
            Ok("en".to_string())
        } else if german > english {
            Ok("de".to_string())
        } else {
            Err(Error::Undetectable)
        }
    }
}
