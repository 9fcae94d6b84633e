//! DOCX package loading/saving and the final PDF archive

pub mod extractor;
pub mod builder;

use crate::error::{CertError, Result};
use crate::models::TemplateDocument;
use std::path::Path;

/// Load a fresh copy of the template
pub fn load_template(path: &Path) -> Result<TemplateDocument> {
    extractor::load_from_archive(path).map_err(|e| CertError::TemplateLoad {
        path: path.to_path_buf(),
        reason: format!("{:#}", e),
    })
}

pub fn save_document(document: &TemplateDocument, output_path: &Path) -> Result<()> {
    builder::write_docx(document, output_path).map_err(|e| CertError::Save {
        path: output_path.to_path_buf(),
        reason: format!("{:#}", e),
    })
}

/// Bundle the PDF directory into one zip. Returns the number of files archived.
pub fn create_archive(pdf_dir: &Path, archive_path: &Path) -> Result<usize> {
    builder::create_zip_from_directory(pdf_dir, archive_path).map_err(|e| CertError::Archive {
        path: archive_path.to_path_buf(),
        reason: format!("{:#}", e),
    })
}
