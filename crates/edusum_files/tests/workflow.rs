use std::io::Write;
use std::path::Path;
use edusum_core::{CompressionLevel, Error, LanguageSelection, LanguageTag, SummaryMethod};
use edusum_files::{summarize_file, FileExtractor, DEFAULT_KEY_POINTS};
use edusum_inference::prelude::*;

const TEXT: &str = "Artificial intelligence has become one of the most transformative technologies of our time. \
    It encompasses machine learning, deep learning, natural language processing, and computer vision. \
    These technologies are being applied across various industries including healthcare, finance, \
    transportation, and education. The potential benefits are enormous, but we must also consider \
    ethical implications and ensure responsible development and deployment of AI systems.";

fn dispatcher() -> SummarizationDispatcher {
    let config = SummarizerConfig {
        backend: BackendConfig::Dummy,
        ..SummarizerConfig::default()
    };
    SummarizationDispatcher::from_config(&config).unwrap()
}

#[tokio::test]
async fn test_full_workflow_english() {
    let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    file.write_all(TEXT.as_bytes()).unwrap();

    let report = summarize_file(
        &dispatcher(),
        &FileExtractor::new(),
        file.path(),
        CompressionLevel::MEDIUM,
        Some(LanguageSelection::Explicit(LanguageTag::En)),
        true,
    )
    .await
    .unwrap();

    assert_eq!(report.summary.language, LanguageTag::En);
    assert!(matches!(report.summary.method, SummaryMethod::Backend { .. }));
    assert!(!report.summary.text.is_empty());
    assert!(report.summary.text.len() < TEXT.len());
    // Four sentences, fewer than the default count.
    assert_eq!(report.key_points.len(), 4);
    assert_eq!(report.source_chars, TEXT.chars().count());

    let rendered = report.to_string();
    assert!(rendered.starts_with("SUMMARY:\n"));
    assert!(rendered.contains("KEY POINTS:"));
    assert!(rendered.contains("1. "));
}

#[tokio::test]
async fn test_workflow_without_key_points() {
    let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    file.write_all("Это пример русского текста. Он состоит из двух предложений.".as_bytes())
        .unwrap();

    let report = summarize_file(
        &dispatcher(),
        &FileExtractor::new(),
        file.path(),
        CompressionLevel::LIGHT,
        None,
        false,
    )
    .await
    .unwrap();

    assert_eq!(report.summary.language, LanguageTag::Ru);
    assert!(report.key_points.is_empty());
    assert!(!report.to_string().contains("KEY POINTS:"));
}

#[tokio::test]
async fn test_missing_file_propagates() {
    let result = summarize_file(
        &dispatcher(),
        &FileExtractor::new(),
        Path::new("/no/such/lecture.txt"),
        CompressionLevel::MEDIUM,
        None,
        true,
    )
    .await;
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn test_empty_file_yields_empty_summary() {
    let file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    let report = summarize_file(
        &dispatcher(),
        &FileExtractor::new(),
        file.path(),
        CompressionLevel::MEDIUM,
        None,
        true,
    )
    .await
    .unwrap();
    assert_eq!(report.summary.language, LanguageTag::Unknown);
    assert!(report.summary.text.is_empty());
    assert!(report.key_points.is_empty());
}

#[tokio::test]
async fn test_key_points_capped_at_default() {
    let sentences: Vec<String> = (1..=8)
        .map(|i| format!("Sentence number {} talks about topic {}.", i, "x ".repeat(i).trim()))
        .collect();
    let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    file.write_all(sentences.join(" ").as_bytes()).unwrap();

    let report = summarize_file(
        &dispatcher(),
        &FileExtractor::new(),
        file.path(),
        CompressionLevel::MEDIUM,
        Some(LanguageSelection::Explicit(LanguageTag::En)),
        true,
    )
    .await
    .unwrap();

    assert_eq!(report.key_points.len(), DEFAULT_KEY_POINTS);
    assert!(report.key_points[0].starts_with("Sentence number 8"));
}

#[tokio::test]
async fn test_report_written_to_nested_path() {
    let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    file.write_all(TEXT.as_bytes()).unwrap();
    let report = summarize_file(
        &dispatcher(),
        &FileExtractor::new(),
        file.path(),
        CompressionLevel::STRONG,
        None,
        true,
    )
    .await
    .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("reports").join("week1").join("summary.txt");
    report.write_to(&output).unwrap();

    let written = std::fs::read_to_string(&output).unwrap();
    assert_eq!(written, report.to_string());
    assert!(written.contains("KEY POINTS:"));
}
