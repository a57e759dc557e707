pub mod extract;

use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use edusum_core::{CompressionLevel, LanguageSelection, Result, Summary, TextExtractor};
use edusum_inference::SummarizationDispatcher;

pub use extract::FileExtractor;

/// Number of key points collected when a report asks for them.
pub const DEFAULT_KEY_POINTS: usize = 5;

/// Outcome of summarizing one document.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub path: PathBuf,
    pub source_chars: usize,
    pub summary: Summary,
    pub key_points: Vec<String>,
}

impl Report {
    /// Write the rendered report to `path`, creating missing parent directories.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_string())?;
        info!("💾 Summary saved to: {}", path.display());
        Ok(())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(50);
        writeln!(f, "SUMMARY:")?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "{}", self.summary.text)?;
        if !self.key_points.is_empty() {
            writeln!(f)?;
            writeln!(f, "KEY POINTS:")?;
            writeln!(f, "{}", rule)?;
            for (i, point) in self.key_points.iter().enumerate() {
                writeln!(f, "{}. {}", i + 1, point)?;
            }
        }
        Ok(())
    }
}

/// Extract `path`, summarize it and, when `key_points` is set, collect up to
/// [`DEFAULT_KEY_POINTS`] key sentences.
/// Extraction errors propagate; summarization itself never fails.
pub async fn summarize_file(
    dispatcher: &SummarizationDispatcher,
    extractor: &dyn TextExtractor,
    path: &Path,
    ratio: CompressionLevel,
    language: Option<LanguageSelection>,
    key_points: bool,
) -> Result<Report> {
    info!("📄 Reading file: {}", path.display());
    let text = extractor.extract(path)?;
    info!("Input text length: {} characters", text.chars().count());

    let summary = dispatcher.summarize(&text, ratio, language).await;
    info!(
        "✨ Summarized with {} compression in {} ({} characters)",
        ratio,
        summary.language,
        summary.text.chars().count()
    );

    let key_points = if key_points {
        dispatcher.extract_key_points(&text, DEFAULT_KEY_POINTS)
    } else {
        Vec::new()
    };

    Ok(Report {
        path: path.to_path_buf(),
        source_chars: text.chars().count(),
        summary,
        key_points,
    })
}
