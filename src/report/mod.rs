//! Report generation

pub mod generator;

use crate::models::BatchSummary;
use anyhow::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Markdown,
    Json,
}

impl ReportFormat {
    /// JSON for `.json` paths, Markdown otherwise
    pub fn for_path(path: &std::path::Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => ReportFormat::Json,
            _ => ReportFormat::Markdown,
        }
    }
}

pub fn generate_report(summary: &BatchSummary, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Markdown => generator::generate_markdown_report(summary),
        ReportFormat::Json => generator::generate_json_report(summary),
    }
}
