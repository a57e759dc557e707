pub mod budget;
pub mod error;
pub mod models;
pub mod types;

pub use budget::LengthBudget;
pub use error::{Error, Result};
pub use models::{BackendLoader, LanguageDetector, SummaryBackend, TextExtractor};
pub use types::{
    CompressionLevel, Device, Diagnostic, DiagnosticKind, LanguageSelection, LanguageTag,
    ModelDescriptor, Summary, SummaryMethod,
};
