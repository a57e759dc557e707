use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use edusum_core::{BackendLoader, Error, LanguageTag, Result, SummaryBackend};
use crate::config::ModelTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendState {
    Uninitialized,
    Loaded(LanguageTag),
}

struct LoadedBackend {
    language: LanguageTag,
    backend: Arc<dyn SummaryBackend>,
}

/// Single-slot cache of the backend for the most recently requested language.
pub struct BackendRegistry {
    loader: Arc<dyn BackendLoader>,
    models: ModelTable,
    slot: Mutex<Option<LoadedBackend>>,
}

impl fmt::Debug for BackendRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendRegistry")
            .field("loader", &"<dyn BackendLoader>")
            .field("models", &self.models)
            .finish()
    }
}

impl BackendRegistry {
    pub fn new(loader: Arc<dyn BackendLoader>, models: ModelTable) -> Self {
        Self {
            loader,
            models,
            slot: Mutex::new(None),
        }
    }

    pub async fn state(&self) -> BackendState {
        match self.slot.lock().await.as_ref() {
            Some(loaded) => BackendState::Loaded(loaded.language),
            None => BackendState::Uninitialized,
        }
    }

    /// Backend for `language`, loading it and evicting the cached one if needed.
    /// A failed load leaves the cache as it was.
    pub async fn try_acquire(&self, language: LanguageTag) -> Result<Arc<dyn SummaryBackend>> {
        let mut slot = self.slot.lock().await;
        if let Some(loaded) = slot.as_ref() {
            if loaded.language == language {
                return Ok(loaded.backend.clone());
            }
        }

        let descriptor = self.models.get(language).ok_or_else(|| Error::BackendLoad {
            model: "<none>".to_string(),
            reason: format!("no model configured for {}", language),
        })?;

        info!("🤖 Loading model {} for {} on {}", descriptor.model_id, language, descriptor.device);
        let backend = self
            .loader
            .load(language, descriptor)
            .await
            .map_err(|e| match e {
                Error::BackendLoad { .. } => e,
                other => Error::BackendLoad {
                    model: descriptor.model_id.clone(),
                    reason: other.to_string(),
                },
            })?;
        info!("✨ Model {} ready on {}", backend.model_id(), backend.device());

        if let Some(previous) = slot.replace(LoadedBackend {
            language,
            backend: backend.clone(),
        }) {
            debug!("Evicted {} backend {}", previous.language, previous.backend.model_id());
        }
        Ok(backend)
    }

    /// Like `try_acquire`, but a load failure is logged and reported as `None`.
    pub async fn acquire(&self, language: LanguageTag) -> Option<Arc<dyn SummaryBackend>> {
        match self.try_acquire(language).await {
            Ok(backend) => Some(backend),
            Err(e) => {
                warn!("⚠️ {}. Using the extractive method.", e);
                None
            }
        }
    }

    pub async fn evict(&self) {
        self.slot.lock().await.take();
    }
}
