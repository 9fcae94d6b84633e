//! Error types for certificate generation

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CertError>;

/// Errors raised while generating certificates.
///
/// Two severities exist: fatal errors abort the whole run, the others only
/// cause the current record to be skipped. See [`CertError::is_fatal`].
#[derive(Debug, Error)]
pub enum CertError {
    #[error("failed to load records from {path}: {reason}")]
    Load { path: PathBuf, reason: String },

    #[error("template not found: {0}")]
    TemplateMissing(PathBuf),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to create archive {path}: {reason}")]
    Archive { path: PathBuf, reason: String },

    #[error("could not load template {path}: {reason}")]
    TemplateLoad { path: PathBuf, reason: String },

    #[error("failed to render {part}: {reason}")]
    Render { part: String, reason: String },

    #[error("failed to save {path}: {reason}")]
    Save { path: PathBuf, reason: String },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl CertError {
    pub(crate) fn load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        CertError::Load {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether this error aborts the run instead of skipping a record
    pub fn is_fatal(&self) -> bool {
        match self {
            CertError::Load { .. }
            | CertError::TemplateMissing(_)
            | CertError::Config(_)
            | CertError::Archive { .. }
            | CertError::Io(_) => true,
            CertError::TemplateLoad { .. } | CertError::Render { .. } | CertError::Save { .. } => {
                false
            }
        }
    }
}
