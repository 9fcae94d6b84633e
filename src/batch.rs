//! Batch orchestration
//!
//! One record at a time: load the template, substitute, save the DOCX,
//! convert it, then remove the DOCX if a PDF came out. Failures inside that
//! sequence skip the record; loading the records and finding the template
//! are checked before the loop and abort the run.

use crate::config::Config;
use crate::converter::Converter;
use crate::error::{CertError, Result};
use crate::models::{
    BatchOutcome, BatchSummary, Record, RecordOutcome, RecordStatus, RenderedDocument, Stage,
};
use crate::packager;
use crate::source;
use crate::template::{self, ReplacementMap};
use crate::utils::naming::output_names;
use std::fs;
use std::path::Path;

/// Receives progress events during a run. All methods default to no-ops.
pub trait BatchObserver {
    fn on_start(&mut self, _total: usize) {}
    fn on_record(&mut self, _index: usize, _outcome: &RecordOutcome) {}
    fn on_archive(&mut self, _path: &Path, _files: usize) {}
}

/// Observer that ignores everything
pub struct NoopObserver;

impl BatchObserver for NoopObserver {}

/// Run a whole batch without progress reporting
pub fn run(config: &Config, converter: &dyn Converter) -> Result<BatchOutcome> {
    run_with_observer(config, converter, &mut NoopObserver)
}

pub fn run_with_observer(
    config: &Config,
    converter: &dyn Converter,
    observer: &mut dyn BatchObserver,
) -> Result<BatchOutcome> {
    config.validate()?;

    let records =
        source::load_filtered(&config.input, &config.source_options(), &config.filters)?;

    if records.is_empty() {
        log::warn!("⚠️ No matching entries found.");
        return Ok(BatchOutcome::NoMatchingRecords);
    }

    if !config.template.is_file() {
        return Err(CertError::TemplateMissing(config.template.clone()));
    }

    fs::create_dir_all(&config.docx_dir)?;
    fs::create_dir_all(&config.pdf_dir)?;

    let date = config.date_text();
    let mut summary = BatchSummary {
        generated_on: date.clone(),
        ..Default::default()
    };

    observer.on_start(records.len());

    for (index, record) in records.into_iter().enumerate() {
        let status = process_record(config, converter, &record, &date);
        let outcome = RecordOutcome { record, status };
        observer.on_record(index, &outcome);
        summary.outcomes.push(outcome);
    }

    let archived = packager::create_archive(&config.pdf_dir, &config.archive)?;
    log::info!("📦 ZIP file created: {} ({} files)", config.archive.display(), archived);
    observer.on_archive(&config.archive, archived);

    summary.archive = Some(config.archive.clone());
    summary.archived_files = archived;

    Ok(BatchOutcome::Completed(summary))
}

/// Render one record into a DOCX named after it
pub fn render_record(
    config: &Config,
    record: &Record,
    date: &str,
) -> std::result::Result<RenderedDocument, (Stage, CertError)> {
    let mut document =
        packager::load_template(&config.template).map_err(|e| (Stage::LoadTemplate, e))?;

    let replacements = ReplacementMap::for_record(record, &config.tokens, date);
    template::render(&mut document, &replacements).map_err(|e| (Stage::Substitute, e))?;

    let (docx_name, pdf_name) = output_names(record, &config.file_prefix);
    Ok(RenderedDocument {
        document,
        docx_name,
        pdf_name,
    })
}

fn process_record(
    config: &Config,
    converter: &dyn Converter,
    record: &Record,
    date: &str,
) -> RecordStatus {
    let rendered = match render_record(config, record, date) {
        Ok(rendered) => rendered,
        Err((stage, e)) => return skipped(record, stage, e),
    };

    let docx_path = config.docx_dir.join(&rendered.docx_name);
    if let Err(e) = packager::save_document(&rendered.document, &docx_path) {
        return skipped(record, Stage::SaveEditable, e);
    }
    log::info!("📄 Certificate saved: {}", docx_path.display());

    let Some(pdf) = converter.convert(&docx_path, &config.pdf_dir) else {
        log::error!("❌ Failed to convert {} to PDF.", docx_path.display());
        return RecordStatus::ConversionFailed { docx: docx_path };
    };
    log::info!("✅ PDF generated: {}", pdf.display());

    if pdf.file_name().map(|n| n != rendered.pdf_name.as_str()).unwrap_or(true) {
        log::debug!("converter wrote {} for {}", pdf.display(), rendered.pdf_name);
    }

    let docx_removed = docx_path.exists()
        && match fs::remove_file(&docx_path) {
            Ok(()) => {
                log::info!("🧹 Deleted intermediate DOCX: {}", docx_path.display());
                true
            }
            Err(e) => {
                log::warn!("could not delete {}: {}", docx_path.display(), e);
                false
            }
        };

    RecordStatus::Converted { pdf, docx_removed }
}

fn skipped(record: &Record, stage: Stage, error: CertError) -> RecordStatus {
    log::error!("❌ Row {} skipped at {}: {}", record.row, stage, error);
    RecordStatus::Skipped {
        stage,
        reason: error.to_string(),
    }
}
