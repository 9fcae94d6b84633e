//! Per-record outcomes and batch summaries

use super::Record;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Step at which a record is skipped. Conversion and cleanup results are
/// carried by [`RecordStatus::ConversionFailed`] and
/// [`RecordStatus::Converted`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    LoadTemplate,
    Substitute,
    SaveEditable,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::LoadTemplate => "load template",
            Stage::Substitute => "substitute",
            Stage::SaveEditable => "save editable",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecordStatus {
    /// PDF produced; `docx_removed` is false when the editable file was
    /// already gone or could not be deleted
    Converted { pdf: PathBuf, docx_removed: bool },
    /// Conversion produced no PDF; the editable file is kept for inspection
    ConversionFailed { docx: PathBuf },
    /// The record was abandoned before conversion
    Skipped { stage: Stage, reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordOutcome {
    pub record: Record,
    pub status: RecordStatus,
}

impl RecordOutcome {
    pub fn is_converted(&self) -> bool {
        matches!(self.status, RecordStatus::Converted { .. })
    }
}

/// Result of one full batch run
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchSummary {
    pub generated_on: String,
    pub outcomes: Vec<RecordOutcome>,
    /// Archive written after the loop, if any
    pub archive: Option<PathBuf>,
    /// Number of files placed in the archive
    pub archived_files: usize,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn converted(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_converted()).count()
    }

    pub fn conversion_failures(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, RecordStatus::ConversionFailed { .. }))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, RecordStatus::Skipped { .. }))
            .count()
    }

    /// Editable files left behind by failed conversions
    pub fn retained_docx(&self) -> Vec<&PathBuf> {
        self.outcomes
            .iter()
            .filter_map(|o| match &o.status {
                RecordStatus::ConversionFailed { docx } => Some(docx),
                _ => None,
            })
            .collect()
    }
}

/// How a run ended
#[derive(Debug, Clone)]
pub enum BatchOutcome {
    /// No records left after filtering; nothing was written
    NoMatchingRecords,
    Completed(BatchSummary),
}
