use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid compression level {0}: expected a value in (0, 1]")]
    InvalidCompression(f64),

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Language could not be detected")]
    Undetectable,

    #[error("Could not load model {model}: {reason}")]
    BackendLoad { model: String, reason: String },

    #[error("Backend error: {0}")]
    BackendRuntime(String),

    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
