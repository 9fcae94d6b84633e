//! Run configuration
//!
//! Every path, filter and token used by a run lives here. A config can be
//! read from a JSON5 file; the CLI then overrides individual fields.

use crate::converter::ConverterConfig;
use crate::error::{CertError, Result};
use crate::models::{ColumnLabels, RecordFilter};
use crate::source::SourceOptions;
use crate::template::TemplateTokens;
use crate::utils::naming::DEFAULT_PREFIX;
use chrono::format::{Item, StrftimeItems};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Spreadsheet or CSV with one row per recipient
    pub input: PathBuf,
    /// DOCX template with placeholder tokens
    pub template: PathBuf,
    pub sheet: Option<String>,
    pub csv_delimiter: char,
    pub columns: ColumnLabels,
    pub filters: RecordFilter,
    pub tokens: TemplateTokens,
    /// Intermediate DOCX files
    pub docx_dir: PathBuf,
    /// Converted PDFs, archived at the end
    pub pdf_dir: PathBuf,
    pub archive: PathBuf,
    pub file_prefix: String,
    /// strftime format for the date placeholder
    pub date_format: String,
    /// Fixed date text, used instead of today's date
    pub date: Option<String>,
    pub converter: ConverterConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from("GVO_certificaat_template.xlsx"),
            template: PathBuf::from("GVO_certificaat.docx"),
            sheet: None,
            csv_delimiter: ',',
            columns: ColumnLabels::default(),
            filters: RecordFilter::default(),
            tokens: TemplateTokens::default(),
            docx_dir: PathBuf::from("Generated_Certificates"),
            pdf_dir: PathBuf::from("Generated_PDFs"),
            archive: PathBuf::from("Generated_PDFs.zip"),
            file_prefix: DEFAULT_PREFIX.to_string(),
            date_format: "%d-%m-%Y".to_string(),
            date: None,
            converter: ConverterConfig::default(),
        }
    }
}

impl Config {
    /// Read a JSON5 config file. Missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CertError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json5(&content)
            .map_err(|e| CertError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_json5(content: &str) -> std::result::Result<Self, json5::Error> {
        json5::from_str(content)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.csv_delimiter.is_ascii() {
            return Err(CertError::Config(format!(
                "csv_delimiter must be a single ASCII character, got '{}'",
                self.csv_delimiter
            )));
        }

        if let Some(label) = self.columns.all().iter().find(|l| l.trim().is_empty()) {
            return Err(CertError::Config(format!("empty column label '{}'", label)));
        }

        if self.tokens.keys().iter().any(|k| k.is_empty()) {
            return Err(CertError::Config("template tokens must not be empty".to_string()));
        }

        if self.date.is_none()
            && StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error))
        {
            return Err(CertError::Config(format!(
                "invalid date_format '{}'",
                self.date_format
            )));
        }

        Ok(())
    }

    pub fn source_options(&self) -> SourceOptions {
        SourceOptions {
            columns: self.columns.clone(),
            sheet: self.sheet.clone(),
            csv_delimiter: self.csv_delimiter as u8,
        }
    }

    /// Text that replaces `{date}` in the date placeholder
    pub fn date_text(&self) -> String {
        match &self.date {
            Some(date) => date.clone(),
            None => Local::now().format(&self.date_format).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.pdf_dir, PathBuf::from("Generated_PDFs"));
        assert_eq!(config.archive, PathBuf::from("Generated_PDFs.zip"));
        assert_eq!(config.converter.binary, "libreoffice");
        assert!(config.filters.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json5() {
        let config = Config::from_json5(
            r#"{
                // only what differs from the defaults
                input: "klanten.csv",
                csv_delimiter: ";",
                filters: { customer: "Patrick B.V." },
                converter: { binary: "soffice", timeout_secs: 120 },
            }"#,
        )
        .unwrap();

        assert_eq!(config.input, PathBuf::from("klanten.csv"));
        assert_eq!(config.source_options().csv_delimiter, b';');
        assert_eq!(config.filters.customer.as_deref(), Some("Patrick B.V."));
        assert_eq!(config.filters.code, None);
        assert_eq!(config.converter.binary, "soffice");
        assert_eq!(config.converter.timeout_secs, Some(120));
        assert_eq!(config.tokens, TemplateTokens::default());
    }

    #[test]
    fn test_fixed_date() {
        let config = Config {
            date: Some("01-02-2026".into()),
            ..Default::default()
        };
        assert_eq!(config.date_text(), "01-02-2026");
    }

    #[test]
    fn test_today_formatted() {
        let text = Config::default().date_text();
        assert_eq!(text.len(), 10);
        assert_eq!(text.matches('-').count(), 2);
    }

    #[test]
    fn test_invalid_settings() {
        let bad_format = Config {
            date_format: "%Q".into(),
            ..Default::default()
        };
        assert!(bad_format.validate().is_err());

        let mut empty_token = Config::default();
        empty_token.tokens.city = String::new();
        assert!(empty_token.validate().is_err());

        let wide_delimiter = Config {
            csv_delimiter: '§',
            ..Default::default()
        };
        assert!(wide_delimiter.validate().is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = Config::from_file(Path::new("/nonexistent/certgen.json5")).unwrap_err();
        assert!(matches!(err, CertError::Config(_)));
    }
}
