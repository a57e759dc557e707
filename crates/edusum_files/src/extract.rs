//! Text extraction from documents on disk.

use std::fs;
use std::path::Path;

use docx_rs::{DocumentChild, Paragraph, ParagraphChild, RunChild};
use edusum_core::{Error, Result, TextExtractor};
use tracing::debug;

/// Reads `.txt`, `.docx` and `.pdf` documents; other extensions are accepted when they hold UTF-8 text.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileExtractor;

impl FileExtractor {
    pub fn new() -> Self {
        Self
    }

    /// UTF-8 first, Latin-1 otherwise.
    fn read_text(bytes: Vec<u8>) -> String {
        match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => e.into_bytes().iter().map(|&b| b as char).collect(),
        }
    }

    /// Non-empty paragraphs, one per line.
    fn read_docx(path: &Path) -> Result<String> {
        let bytes = fs::read(path)?;
        let docx = docx_rs::read_docx(&bytes).map_err(|e| parse_error("docx", path, e))?;

        let paragraphs: Vec<String> = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(para) => Some(paragraph_text(para)),
                _ => None,
            })
            .filter(|text| !text.trim().is_empty())
            .collect();

        debug!("Read {} paragraphs from {}", paragraphs.len(), path.display());
        Ok(paragraphs.join("\n"))
    }

    /// Page texts in page order, one page per line.
    fn read_pdf(path: &Path) -> Result<String> {
        let pdf_error = |e| parse_error("pdf", path, e);
        let mut doc = pdf_oxide::PdfDocument::open(path).map_err(pdf_error)?;
        let page_count = doc.page_count().map_err(pdf_error)?;

        let mut pages = Vec::with_capacity(page_count);
        for page_index in 0..page_count {
            pages.push(doc.extract_text(page_index).map_err(pdf_error)?);
        }

        debug!("Read {} pages from {}", page_count, path.display());
        Ok(pages.join("\n"))
    }
}

fn parse_error(kind: &str, path: &Path, e: impl std::fmt::Display) -> Error {
    Error::External(anyhow::anyhow!("{} parse error in '{}': {}", kind, path.display(), e))
}

/// Runs within a paragraph belong to the same line and are concatenated as is.
fn paragraph_text(para: &Paragraph) -> String {
    let mut text = String::new();
    for child in &para.children {
        if let ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                if let RunChild::Text(t) = run_child {
                    text.push_str(&t.text);
                }
            }
        }
    }
    text
}

impl TextExtractor for FileExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(Error::NotFound(path.to_path_buf()));
        }

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "txt" => Ok(Self::read_text(fs::read(path)?)),
            "docx" => Self::read_docx(path),
            "pdf" => Self::read_pdf(path),
            _ => {
                let bytes = fs::read(path)?;
                if bytes.contains(&0) {
                    return Err(Error::UnsupportedFormat(format!(".{}", extension)));
                }
                String::from_utf8(bytes).map_err(|_| Error::UnsupportedFormat(format!(".{}", extension)))
            }
        }
    }
}
