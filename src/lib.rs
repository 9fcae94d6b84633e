//! Certificate generator
//!
//! Merges spreadsheet records into a DOCX template, converts each merged
//! document to PDF with a headless office suite, and zips the PDFs.

pub mod models;
pub mod error;
pub mod config;
pub mod source;
pub mod template;
pub mod converter;
pub mod packager;
pub mod batch;
pub mod validator;
pub mod report;
pub mod utils;
#[cfg(feature = "cli")]
pub mod cli;

pub use models::{BatchOutcome, BatchSummary, Record, RecordOutcome, RecordStatus};
pub use config::Config;
pub use error::{CertError, Result};
pub use converter::{Converter, LibreOfficeConverter};
pub use batch::{BatchObserver, NoopObserver};

/// Main entry point: run a full batch with the LibreOffice converter
/// described by `config`
pub fn generate_certificates(config: &Config) -> Result<BatchOutcome> {
    let converter = LibreOfficeConverter::new(config.converter.clone());
    batch::run(config, &converter)
}
