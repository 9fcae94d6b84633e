//! Batch report generation

use crate::models::{BatchSummary, RecordStatus};
use anyhow::Result;

pub fn generate_markdown_report(summary: &BatchSummary) -> Result<String> {
    let mut report = String::new();

    report.push_str("# Certificate Generation Report\n\n");

    // Summary
    report.push_str("## Summary\n\n");
    report.push_str(&format!("- **Date**: {}\n", summary.generated_on));
    report.push_str(&format!("- **Records**: {}\n", summary.total()));
    report.push_str(&format!("- **PDFs Generated**: {}\n", summary.converted()));
    report.push_str(&format!("- **Conversions Failed**: {}\n", summary.conversion_failures()));
    report.push_str(&format!("- **Records Skipped**: {}\n", summary.skipped()));
    if let Some(archive) = &summary.archive {
        report.push_str(&format!(
            "- **Archive**: {} ({} files)\n",
            archive.display(),
            summary.archived_files
        ));
    }
    report.push('\n');

    // Generated
    let converted: Vec<_> = summary.outcomes.iter()
        .filter_map(|o| match &o.status {
            RecordStatus::Converted { pdf, .. } => Some((o, pdf)),
            _ => None,
        })
        .collect();
    if !converted.is_empty() {
        report.push_str("## ✅ Generated\n\n");
        for (outcome, pdf) in converted {
            report.push_str(&format!("- Row {} ({}): {}\n",
                outcome.record.row, outcome.record.customer, pdf.display()));
        }
        report.push('\n');
    }

    // Failed conversions
    let retained = summary.retained_docx();
    if !retained.is_empty() {
        report.push_str("## ❌ Conversion Failures\n\n");
        report.push_str("The intermediate DOCX files were kept for inspection:\n\n");
        for docx in retained {
            report.push_str(&format!("- {}\n", docx.display()));
        }
        report.push('\n');
    }

    // Skipped
    let skipped: Vec<_> = summary.outcomes.iter()
        .filter_map(|o| match &o.status {
            RecordStatus::Skipped { stage, reason } => Some((o, stage, reason)),
            _ => None,
        })
        .collect();
    if !skipped.is_empty() {
        report.push_str("## ⚠️ Skipped Records\n\n");
        for (outcome, stage, reason) in skipped {
            report.push_str(&format!("- Row {} ({}), {}: {}\n",
                outcome.record.row, outcome.record.customer, stage, reason));
        }
        report.push('\n');
    }

    Ok(report)
}

pub fn generate_json_report(summary: &BatchSummary) -> Result<String> {
    Ok(serde_json::to_string_pretty(summary)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Record, RecordOutcome, Stage};
    use std::path::PathBuf;

    fn summary() -> BatchSummary {
        BatchSummary {
            generated_on: "19-10-2026".into(),
            outcomes: vec![
                RecordOutcome {
                    record: Record::new("Acme", "EAN1", "Main St", "Town").with_row(2),
                    status: RecordStatus::Converted {
                        pdf: PathBuf::from("pdf/a.pdf"),
                        docx_removed: true,
                    },
                },
                RecordOutcome {
                    record: Record::new("Beta", "EAN2", "Side St", "City").with_row(3),
                    status: RecordStatus::ConversionFailed {
                        docx: PathBuf::from("docx/b.docx"),
                    },
                },
                RecordOutcome {
                    record: Record::new("Gamma", "EAN3", "Long St", "Ville").with_row(4),
                    status: RecordStatus::Skipped {
                        stage: Stage::LoadTemplate,
                        reason: "not a zip".into(),
                    },
                },
            ],
            archive: Some(PathBuf::from("out.zip")),
            archived_files: 1,
        }
    }

    #[test]
    fn test_markdown_sections() {
        let report = generate_markdown_report(&summary()).unwrap();
        assert!(report.contains("- **Records**: 3"));
        assert!(report.contains("- **PDFs Generated**: 1"));
        assert!(report.contains("- **Archive**: out.zip (1 files)"));
        assert!(report.contains("- Row 2 (Acme): pdf/a.pdf"));
        assert!(report.contains("- docx/b.docx"));
        assert!(report.contains("- Row 4 (Gamma), load template: not a zip"));
    }

    #[test]
    fn test_json_report() {
        let json = generate_json_report(&summary()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["outcomes"][0]["status"]["status"], "converted");
        assert_eq!(value["outcomes"][2]["status"]["stage"], "load_template");
        assert_eq!(value["archived_files"], 1);
    }
}
