//! Console progress and summaries

use crate::batch::BatchObserver;
use crate::models::{BatchSummary, RecordOutcome, RecordStatus};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

/// Drives an indicatif bar from batch events
pub struct ProgressObserver {
    bar: Option<ProgressBar>,
    quiet: bool,
}

impl ProgressObserver {
    pub fn new(quiet: bool) -> Self {
        Self { bar: None, quiet }
    }
}

impl BatchObserver for ProgressObserver {
    fn on_start(&mut self, total: usize) {
        if self.quiet {
            return;
        }
        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::with_template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
        );
        self.bar = Some(bar);
    }

    fn on_record(&mut self, _index: usize, outcome: &RecordOutcome) {
        if let Some(bar) = &self.bar {
            bar.set_message(outcome.record.customer.clone());
            if !outcome.is_converted() {
                bar.println(format!("{} {}", "❌".red(), describe(outcome)));
            }
            bar.inc(1);
        }
    }

    fn on_archive(&mut self, _path: &Path, _files: usize) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

fn describe(outcome: &RecordOutcome) -> String {
    let record = &outcome.record;
    match &outcome.status {
        RecordStatus::Converted { pdf, .. } => format!("Row {}: {}", record.row, pdf.display()),
        RecordStatus::ConversionFailed { docx } => format!(
            "Row {} ({}): conversion failed, kept {}",
            record.row,
            record.customer,
            docx.display()
        ),
        RecordStatus::Skipped { stage, reason } => format!(
            "Row {} ({}): skipped at {}: {}",
            record.row, record.customer, stage, reason
        ),
    }
}

pub fn print_summary(summary: &BatchSummary) {
    println!();
    println!("📊 Summary:");
    println!("  - Records: {}", summary.total());
    println!("  - PDFs generated: {}", summary.converted().to_string().green());
    if summary.conversion_failures() > 0 {
        println!(
            "  - Conversions failed: {}",
            summary.conversion_failures().to_string().red()
        );
    }
    if summary.skipped() > 0 {
        println!("  - Records skipped: {}", summary.skipped().to_string().yellow());
    }
    if let Some(archive) = &summary.archive {
        println!(
            "  - Archive: {} ({} files)",
            archive.display(),
            summary.archived_files
        );
    }

    let retained = summary.retained_docx();
    if !retained.is_empty() {
        println!();
        println!("{}", "⚠️  DOCX files kept for inspection:".yellow().bold());
        for docx in retained {
            println!("  - {}", docx.display());
        }
    }
}
