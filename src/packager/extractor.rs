//! Template extraction from DOCX archives

use crate::models::{TemplateDocument, DOCUMENT_PART};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use zip::ZipArchive;

/// Load every part of a DOCX package, keeping archive order
pub fn load_from_archive(archive_path: &Path) -> Result<TemplateDocument> {
    let file = fs::File::open(archive_path)
        .context("Failed to open template")?;

    let mut archive = ZipArchive::new(file)
        .context("Failed to read DOCX archive")?;

    let mut parts = Vec::with_capacity(archive.len());

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)
            .context("Failed to read part from archive")?;

        if file.is_file() {
            let name = file.name().to_string();
            let mut content = Vec::new();
            std::io::copy(&mut file, &mut content)
                .with_context(|| format!("Failed to read {}", name))?;
            parts.push((name, content));
        }
    }

    if !parts.iter().any(|(name, _)| name == DOCUMENT_PART) {
        anyhow::bail!("{} not found in archive", DOCUMENT_PART);
    }

    Ok(TemplateDocument::new(archive_path, parts))
}
