pub mod config;
pub mod detect;
pub mod dispatcher;
pub mod fallback;
pub mod logging;
pub mod models;
pub mod registry;

pub mod prelude {
    pub use super::config::{BackendConfig, HttpBackendConfig, ModelTable, SummarizerConfig};
    pub use super::dispatcher::SummarizationDispatcher;
    pub use super::fallback::ExtractiveFallback;
    pub use super::models::create_loader;
    pub use super::registry::{BackendRegistry, BackendState};
    pub use edusum_core::{CompressionLevel, Error, LanguageSelection, LanguageTag, Result, Summary};
}

pub use config::SummarizerConfig;
pub use detect::StopwordDetector;
pub use dispatcher::SummarizationDispatcher;
pub use fallback::{split_sentences, word_count, ExtractiveFallback};
pub use registry::{BackendRegistry, BackendState};
