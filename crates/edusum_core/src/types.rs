use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageTag {
    En,
    Ru,
    De,
    Unknown,
}

impl LanguageTag {
    pub const SUPPORTED: [LanguageTag; 3] = [LanguageTag::En, LanguageTag::Ru, LanguageTag::De];

    pub fn code(&self) -> &'static str {
        match self {
            LanguageTag::En => "en",
            LanguageTag::Ru => "ru",
            LanguageTag::De => "de",
            LanguageTag::Unknown => "unknown",
        }
    }

    /// Maps any ISO-639-1 code onto the supported set, defaulting to English.
    pub fn from_code_lossy(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "ru" => LanguageTag::Ru,
            "de" => LanguageTag::De,
            _ => LanguageTag::En,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, LanguageTag::Unknown)
    }

    /// Collapses `Unknown` to English so a resolved language is always usable.
    pub fn or_default(self) -> Self {
        if self.is_supported() {
            self
        } else {
            LanguageTag::En
        }
    }
}

impl Default for LanguageTag {
    fn default() -> Self {
        LanguageTag::En
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for LanguageTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(LanguageTag::En),
            "ru" => Ok(LanguageTag::Ru),
            "de" => Ok(LanguageTag::De),
            "unknown" => Ok(LanguageTag::Unknown),
            other => Err(Error::UnsupportedLanguage(other.to_string())),
        }
    }
}

/// Language requested by a caller: a fixed tag or auto-detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LanguageSelection {
    #[default]
    Auto,
    Explicit(LanguageTag),
}

impl LanguageSelection {
    pub fn explicit(&self) -> Option<LanguageTag> {
        match self {
            LanguageSelection::Auto => None,
            LanguageSelection::Explicit(tag) => Some(*tag),
        }
    }
}

impl From<LanguageTag> for LanguageSelection {
    fn from(tag: LanguageTag) -> Self {
        LanguageSelection::Explicit(tag)
    }
}

impl FromStr for LanguageSelection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("auto") {
            return Ok(LanguageSelection::Auto);
        }
        s.parse().map(LanguageSelection::Explicit)
    }
}

impl TryFrom<String> for LanguageSelection {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<LanguageSelection> for String {
    fn from(selection: LanguageSelection) -> Self {
        selection.to_string()
    }
}

impl fmt::Display for LanguageSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageSelection::Auto => f.write_str("auto"),
            LanguageSelection::Explicit(tag) => tag.fmt(f),
        }
    }
}

/// Target fraction of the source word count, always in (0, 1].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct CompressionLevel(f64);

impl CompressionLevel {
    pub const STRONG: CompressionLevel = CompressionLevel(0.2);
    pub const MEDIUM: CompressionLevel = CompressionLevel(0.3);
    pub const LIGHT: CompressionLevel = CompressionLevel(0.5);

    pub fn new(ratio: f64) -> Result<Self> {
        if ratio.is_finite() && ratio > 0.0 && ratio <= 1.0 {
            Ok(Self(ratio))
        } else {
            Err(Error::InvalidCompression(ratio))
        }
    }

    /// Builds a level from a percentage such as `20`, `30` or `50`.
    pub fn from_percent(percent: u32) -> Result<Self> {
        Self::new(f64::from(percent) / 100.0)
    }

    pub fn ratio(&self) -> f64 {
        self.0
    }

    /// Number of items kept out of `total`, floored.
    pub fn apply(&self, total: usize) -> usize {
        (total as f64 * self.0).floor() as usize
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        Self::MEDIUM
    }
}

impl TryFrom<f64> for CompressionLevel {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<CompressionLevel> for f64 {
    fn from(level: CompressionLevel) -> Self {
        level.0
    }
}

impl fmt::Display for CompressionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", (self.0 * 100.0).round())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    #[default]
    Cpu,
    Accelerator,
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Cpu => f.write_str("cpu"),
            Device::Accelerator => f.write_str("accelerator"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub model_id: String,
    #[serde(default)]
    pub device: Device,
}

impl ModelDescriptor {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            device: Device::default(),
        }
    }

    pub fn with_device(mut self, device: Device) -> Self {
        self.device = device;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SummaryMethod {
    /// Produced by a loaded model backend.
    Backend { model_id: String },
    /// Produced by leading-sentence extraction.
    Extractive,
    /// Input had no content.
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    BackendUnavailable,
    BackendFailed,
    EmptyOutput,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub text: String,
    pub language: LanguageTag,
    pub method: SummaryMethod,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl Summary {
    pub fn empty() -> Self {
        Self {
            text: String::new(),
            language: LanguageTag::Unknown,
            method: SummaryMethod::Empty,
            diagnostics: Vec::new(),
        }
    }

    pub fn used_fallback(&self) -> bool {
        self.method == SummaryMethod::Extractive
    }

    pub fn into_pair(self) -> (String, LanguageTag) {
        (self.text, self.language)
    }
}
