use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

use edusum_core::{
    CompressionLevel, Diagnostic, DiagnosticKind, LanguageDetector, LanguageSelection, LanguageTag,
    LengthBudget, Result, Summary, SummaryMethod,
};
use crate::config::SummarizerConfig;
use crate::detect::StopwordDetector;
use crate::fallback::{word_count, ExtractiveFallback};
use crate::models::create_loader;
use crate::registry::BackendRegistry;

/// Routes each request to the backend for its language and falls back to
/// extraction when that backend is unavailable or fails.
///
/// Calls may be issued concurrently; backend loads are serialized by the registry.
pub struct SummarizationDispatcher {
    language: LanguageSelection,
    registry: BackendRegistry,
    detector: Arc<dyn LanguageDetector>,
    fallback: ExtractiveFallback,
}

impl fmt::Debug for SummarizationDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SummarizationDispatcher")
            .field("language", &self.language)
            .field("registry", &self.registry)
            .field("detector", &"<dyn LanguageDetector>")
            .finish()
    }
}

impl SummarizationDispatcher {
    pub fn new(
        language: LanguageSelection,
        registry: BackendRegistry,
        detector: Arc<dyn LanguageDetector>,
    ) -> Self {
        Self {
            language,
            registry,
            detector,
            fallback: ExtractiveFallback::new(),
        }
    }

    pub fn from_config(config: &SummarizerConfig) -> Result<Self> {
        config.models.validate()?;
        let loader = create_loader(&config.backend)?;
        let registry = BackendRegistry::new(loader, config.models.clone());
        Ok(Self::new(config.language, registry, Arc::new(StopwordDetector::new())))
    }

    pub fn language(&self) -> LanguageSelection {
        self.language
    }

    pub fn registry(&self) -> &BackendRegistry {
        &self.registry
    }

    /// Detected language of `text`; anything undetectable or unsupported is English.
    pub fn detect_language(&self, text: &str) -> LanguageTag {
        match self.detector.detect(text) {
            Ok(code) => LanguageTag::from_code_lossy(&code),
            Err(e) => {
                debug!("Language detection failed ({}), defaulting to en", e);
                LanguageTag::En
            }
        }
    }

    /// A per-call explicit language wins over the configured one; otherwise detect.
    pub fn resolve_language(&self, text: &str, requested: Option<LanguageSelection>) -> LanguageTag {
        requested
            .and_then(|selection| selection.explicit())
            .or_else(|| self.language.explicit())
            .map(LanguageTag::or_default)
            .unwrap_or_else(|| self.detect_language(text))
    }

    pub async fn summarize(
        &self,
        text: &str,
        ratio: CompressionLevel,
        language: Option<LanguageSelection>,
    ) -> Summary {
        let words = word_count(text);
        if words == 0 {
            return Summary::empty();
        }

        let language = self.resolve_language(text, language);
        let budget = LengthBudget::compute(words, ratio);
        debug!("Summarizing {} words in {} with budget {:?}", words, language, budget);

        let diagnostic = match self.run_backend(text, language, budget).await {
            Ok((summary, model_id)) => {
                return Summary {
                    text: summary,
                    language,
                    method: SummaryMethod::Backend { model_id },
                    diagnostics: Vec::new(),
                };
            }
            Err(diagnostic) => diagnostic,
        };

        warn!("⚠️ {}. Falling back to the extractive method.", diagnostic.message);
        Summary {
            text: self.fallback.summarize(text, ratio),
            language,
            method: SummaryMethod::Extractive,
            diagnostics: vec![diagnostic],
        }
    }

    async fn run_backend(
        &self,
        text: &str,
        language: LanguageTag,
        budget: LengthBudget,
    ) -> std::result::Result<(String, String), Diagnostic> {
        let backend = self
            .registry
            .try_acquire(language)
            .await
            .map_err(|e| Diagnostic::new(DiagnosticKind::BackendUnavailable, e.to_string()))?;

        let summary = backend.run(text, budget).await.map_err(|e| {
            Diagnostic::new(
                DiagnosticKind::BackendFailed,
                format!("{} failed: {}", backend.model_id(), e),
            )
        })?;

        let summary = summary.trim();
        if summary.is_empty() {
            return Err(Diagnostic::new(
                DiagnosticKind::EmptyOutput,
                format!("{} returned an empty summary", backend.model_id()),
            ));
        }
        Ok((summary.to_string(), backend.model_id().to_string()))
    }

    pub fn extract_key_points(&self, text: &str, count: usize) -> Vec<String> {
        self.fallback.extract_key_points(text, count)
    }
}
