use async_trait::async_trait;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::{Device, LanguageTag, LengthBudget, ModelDescriptor, Result};

#[async_trait]
pub trait SummaryBackend: Send + Sync + fmt::Debug {
    /// Identifier of the model this backend runs
    fn model_id(&self) -> &str;

    /// Device the model is placed on
    fn device(&self) -> Device {
        Device::Cpu
    }

    /// Summarize `text` within `budget` using deterministic decoding
    async fn run(&self, text: &str, budget: LengthBudget) -> Result<String>;
}

#[async_trait]
pub trait BackendLoader: Send + Sync {
    /// Load the model described by `descriptor` for `language`
    async fn load(&self, language: LanguageTag, descriptor: &ModelDescriptor) -> Result<Arc<dyn SummaryBackend>>;
}

pub trait LanguageDetector: Send + Sync {
    /// Detect the ISO-639-1 code of `text`, failing with `Error::Undetectable`
    fn detect(&self, text: &str) -> Result<String>;
}

pub trait TextExtractor: Send + Sync {
    /// Read the text content of the document at `path`
    fn extract(&self, path: &Path) -> Result<String>;
}
