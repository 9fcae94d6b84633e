//! DOCX and archive writers

use crate::models::TemplateDocument;
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use walkdir::WalkDir;
use zip::write::{FileOptions, ZipWriter};
use zip::CompressionMethod;

/// Write the document's parts back out as a DOCX package
pub fn write_docx(document: &TemplateDocument, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(output_path)
        .context("Failed to create DOCX file")?;
    let mut zip = ZipWriter::new(file);

    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644);

    for (name, content) in &document.parts {
        zip.start_file(name.as_str(), options)
            .with_context(|| format!("Failed to add {}", name))?;
        zip.write_all(content)?;
    }

    zip.finish()?;
    Ok(())
}

/// Zip every file below `source_dir`, replacing any existing archive.
/// Returns the number of files written. The archive itself is never added
/// when it lives inside `source_dir`.
pub fn create_zip_from_directory(source_dir: &Path, zip_path: &Path) -> Result<usize> {
    if let Some(parent) = zip_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(zip_path)
        .context("Failed to create ZIP file")?;
    let mut zip = ZipWriter::new(file);

    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644);

    let archive_canonical = fs::canonicalize(zip_path).ok();
    let mut count = 0;

    let mut entries: Vec<_> = WalkDir::new(source_dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .collect();
    entries.sort_by(|a, b| a.path().cmp(b.path()));

    for entry in entries {
        let path = entry.path();
        if archive_canonical.is_some() && fs::canonicalize(path).ok() == archive_canonical {
            continue;
        }

        let relative_path = path.strip_prefix(source_dir)
            .context("Failed to get relative path")?;

        let name = relative_path.to_string_lossy().replace('\\', "/");
        zip.start_file(name, options)?;
        let content = fs::read(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        zip.write_all(&content)?;
        count += 1;
    }

    zip.finish()?;
    Ok(count)
}
