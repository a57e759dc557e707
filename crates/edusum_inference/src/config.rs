use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use edusum_core::{Error, LanguageSelection, LanguageTag, ModelDescriptor, Result};

pub const DEFAULT_ENDPOINT: &str = "https://api-inference.huggingface.co/models";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

pub const ENV_API_TOKEN: &str = "EDUSUM_API_TOKEN";
pub const ENV_ENDPOINT: &str = "EDUSUM_ENDPOINT";
pub const ENV_LANGUAGE: &str = "EDUSUM_LANGUAGE";

/// Language to model table with a default entry for languages it does not list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelTable {
    pub default: LanguageTag,
    pub entries: BTreeMap<LanguageTag, ModelDescriptor>,
}

impl Default for ModelTable {
    fn default() -> Self {
        let entries = BTreeMap::from([
            (LanguageTag::En, ModelDescriptor::new("facebook/bart-large-cnn")),
            (LanguageTag::Ru, ModelDescriptor::new("IlyaGusev/rut5_base_sum_gazeta")),
            (LanguageTag::De, ModelDescriptor::new("facebook/mbart-large-50-many-to-many-mmt")),
        ]);
        Self {
            default: LanguageTag::En,
            entries,
        }
    }
}

impl ModelTable {
    pub fn new(default: LanguageTag, descriptor: ModelDescriptor) -> Self {
        Self {
            default,
            entries: BTreeMap::from([(default, descriptor)]),
        }
    }

    pub fn with_entry(mut self, language: LanguageTag, descriptor: ModelDescriptor) -> Self {
        self.entries.insert(language, descriptor);
        self
    }

    /// Descriptor for `language`, or the default entry.
    pub fn get(&self, language: LanguageTag) -> Option<&ModelDescriptor> {
        self.entries
            .get(&language)
            .or_else(|| self.entries.get(&self.default))
    }

    pub fn validate(&self) -> Result<()> {
        if !self.entries.contains_key(&self.default) {
            return Err(Error::Config(format!(
                "model table has no entry for its default language {}",
                self.default
            )));
        }
        Ok(())
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpBackendConfig {
    pub endpoint: String,
    pub api_token: Option<String>,
    pub timeout_secs: u64,
    pub check_on_load: bool,
}

impl Default for HttpBackendConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            check_on_load: false,
        }
    }
}

impl fmt::Debug for HttpBackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpBackendConfig")
            .field("endpoint", &self.endpoint)
            .field("api_token", &self.api_token.as_deref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .field("check_on_load", &self.check_on_load)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BackendConfig {
    Http(HttpBackendConfig),
    Dummy,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::Http(HttpBackendConfig::default())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    pub language: LanguageSelection,
    pub backend: BackendConfig,
    pub models: ModelTable,
}

impl SummarizerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.models.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Apply `EDUSUM_*` environment overrides.
    pub fn with_env(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(language) = lookup(ENV_LANGUAGE) {
            self.language = language
                .parse()
                .map_err(|e| Error::Config(format!("{}: {}", ENV_LANGUAGE, e)))?;
        }

        if let BackendConfig::Http(http) = &mut self.backend {
            if let Some(endpoint) = lookup(ENV_ENDPOINT) {
                http.endpoint = endpoint;
            }
            if let Some(token) = lookup(ENV_API_TOKEN) {
                http.api_token = Some(token);
            }
        }

        Ok(self)
    }
}
