use std::sync::Arc;
use edusum_core::{BackendLoader, Result};
use crate::config::BackendConfig;

pub mod dummy;
pub mod http;

pub use dummy::{DummyBackend, DummyBackendLoader};
pub use http::{HttpBackend, HttpBackendLoader};

/// Build the loader selected by `config`.
pub fn create_loader(config: &BackendConfig) -> Result<Arc<dyn BackendLoader>> {
    match config {
        BackendConfig::Http(http) => {
            tracing::info!("🌐 Using inference endpoint {}", http.endpoint);
            Ok(Arc::new(HttpBackendLoader::new(http)?))
        }
        BackendConfig::Dummy => {
            tracing::info!("🧪 Using the offline dummy backend");
            Ok(Arc::new(DummyBackendLoader))
        }
    }
}
