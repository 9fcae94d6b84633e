//! Which tokens a template will actually substitute

use crate::error::{CertError, Result};
use crate::models::TemplateDocument;
use crate::template::{render_xml, ReplacementMap, TemplateTokens};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenCheck {
    pub found: Vec<String>,
    /// Tokens that would be left alone, either absent or split across runs
    pub missing: Vec<String>,
}

impl TokenCheck {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Probe each token on its own against the template's text parts, using
/// the same rules as rendering.
pub fn check_tokens(document: &TemplateDocument, tokens: &TemplateTokens) -> Result<TokenCheck> {
    let mut check = TokenCheck::default();

    for token in tokens.keys() {
        let mut marker = ReplacementMap::new();
        marker.insert(token, "\u{fffc}");

        let mut hits = 0;
        for name in document.text_part_names() {
            let Some(bytes) = document.part(&name) else {
                continue;
            };
            let source = String::from_utf8_lossy(bytes);
            let (_, count) = render_xml(&source, &marker).map_err(|reason| CertError::Render {
                part: name.clone(),
                reason,
            })?;
            hits += count;
        }

        if hits > 0 {
            check.found.push(token.to_string());
        } else {
            check.missing.push(token.to_string());
        }
    }

    Ok(check)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_and_absent_tokens_are_missing() {
        let body = concat!(
            "<w:body>",
            "<w:p><w:r><w:t>KOLOM A en KOLOM B</w:t></w:r></w:p>",
            "<w:p><w:r><w:t>KOLOM</w:t></w:r><w:r><w:t xml:space=\"preserve\"> C</w:t></w:r></w:p>",
            "<w:tbl><w:tr><w:tc><w:p><w:r><w:t>Datum: van</w:t></w:r><w:r><w:t xml:space=\"preserve\"> vandaag</w:t></w:r></w:p></w:tc></w:tr></w:tbl>",
            "</w:body>"
        );
        let doc = TemplateDocument::new(
            "t.docx",
            vec![("word/document.xml".into(), body.as_bytes().to_vec())],
        );

        let check = check_tokens(&doc, &TemplateTokens::default()).unwrap();
        assert_eq!(check.found, vec!["KOLOM A", "KOLOM B", "Datum: van vandaag"]);
        assert_eq!(check.missing, vec!["KOLOM C", "KOLOM D"]);
        assert!(!check.is_complete());
    }
}
