//! In-memory DOCX package

use std::path::PathBuf;

/// Main body part of a WordprocessingML package
pub const DOCUMENT_PART: &str = "word/document.xml";

/// An editable document held as its ordered zip parts
#[derive(Debug, Clone)]
pub struct TemplateDocument {
    /// Where the template was loaded from
    pub source: PathBuf,
    /// Part name and raw bytes, in archive order
    pub parts: Vec<(String, Vec<u8>)>,
}

impl TemplateDocument {
    pub fn new(source: impl Into<PathBuf>, parts: Vec<(String, Vec<u8>)>) -> Self {
        Self {
            source: source.into(),
            parts,
        }
    }

    pub fn part(&self, name: &str) -> Option<&[u8]> {
        self.parts
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, bytes)| bytes.as_slice())
    }

    pub fn set_part(&mut self, name: &str, content: Vec<u8>) {
        match self.parts.iter_mut().find(|(n, _)| n == name) {
            Some((_, bytes)) => *bytes = content,
            None => self.parts.push((name.to_string(), content)),
        }
    }

    /// Names of the parts that carry substitutable text: the body, then
    /// headers and footers
    pub fn text_part_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .parts
            .iter()
            .map(|(n, _)| n.clone())
            .filter(|n| n == DOCUMENT_PART || is_header_or_footer(n))
            .collect();
        names.sort_by_key(|n| n != DOCUMENT_PART);
        names
    }
}

fn is_header_or_footer(name: &str) -> bool {
    name.strip_prefix("word/")
        .map(|rest| {
            (rest.starts_with("header") || rest.starts_with("footer"))
                && rest.ends_with(".xml")
                && !rest.contains('/')
        })
        .unwrap_or(false)
}

/// A template after substitution, with the file names it will be saved under
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub document: TemplateDocument,
    pub docx_name: String,
    pub pdf_name: String,
}
