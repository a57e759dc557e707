use std::fmt;
use std::sync::Arc;
use edusum_core::{BackendLoader, LanguageTag, LengthBudget, ModelDescriptor, Result, SummaryBackend};

/// Offline backend that keeps the first `max_length` words of the input.
pub struct DummyBackend {
    model_id: String,
}

impl fmt::Debug for DummyBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyBackend")
            .field("model_id", &self.model_id)
            .finish()
    }
}

impl DummyBackend {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self { model_id: model_id.into() }
    }
}

#[async_trait::async_trait]
impl SummaryBackend for DummyBackend {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn run(&self, text: &str, budget: LengthBudget) -> Result<String> {
        let words: Vec<&str> = text.split_whitespace().take(budget.max_length).collect();
        Ok(words.join(" "))
    }
}

#[derive(Debug, Default)]
pub struct DummyBackendLoader;

#[async_trait::async_trait]
impl BackendLoader for DummyBackendLoader {
    async fn load(&self, _language: LanguageTag, descriptor: &ModelDescriptor) -> Result<Arc<dyn SummaryBackend>> {
        Ok(Arc::new(DummyBackend::new(descriptor.model_id.clone())))
    }
}
