//! Conversion of editable documents to PDF

pub mod libreoffice;

pub use libreoffice::{ConverterConfig, LibreOfficeConverter};

use std::path::{Path, PathBuf};

/// Turns an editable document into a fixed-layout file
pub trait Converter {
    /// Convert `input` into `output_dir`. Returns the produced file when it
    /// exists afterwards, `None` otherwise.
    fn convert(&self, input: &Path, output_dir: &Path) -> Option<PathBuf>;
}

/// Where a converter is expected to put the PDF for `input`
pub fn expected_output(input: &Path, output_dir: &Path) -> PathBuf {
    let mut name = input
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_default();
    // stems may contain dots ("B.V."), so no with_extension
    name.push(".pdf");
    output_dir.join(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_output() {
        assert_eq!(
            expected_output(Path::new("docs/GVO_Certificaat_A_B_C.docx"), Path::new("pdfs")),
            PathBuf::from("pdfs/GVO_Certificaat_A_B_C.pdf")
        );
    }

    #[test]
    fn test_expected_output_keeps_dotted_stem() {
        assert_eq!(
            expected_output(Path::new("docs/Patrick_B.V._Town.docx"), Path::new("pdfs")),
            PathBuf::from("pdfs/Patrick_B.V._Town.pdf")
        );
    }
}
