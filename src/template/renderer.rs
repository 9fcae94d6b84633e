//! Token substitution over WordprocessingML parts
//!
//! Paragraphs outside tables are rewritten run by run, so a token has to sit
//! inside a single run to be found there. Paragraphs inside table cells are
//! rewritten over their whole text. Line breaks and tabs split a unit into
//! separate stretches of text, and a token never matches across one. Nested
//! tables, text boxes, headers and footers are all visited.

use super::replacements::ReplacementMap;
use super::xml::{self, Element, Node};
use crate::error::{CertError, Result};
use crate::models::TemplateDocument;

const PARAGRAPH: &[u8] = b"w:p";
const RUN: &[u8] = b"w:r";
const TEXT: &[u8] = b"w:t";
const CELL: &[u8] = b"w:tc";
const PARAGRAPH_PROPS: &[u8] = b"w:pPr";
const RUN_PROPS: &[u8] = b"w:rPr";
const SEPARATORS: [&[u8]; 3] = [b"w:br", b"w:cr", b"w:tab"];

/// Substitute tokens in every text-bearing part of `document`.
/// Returns the number of runs and cell paragraphs whose text changed.
pub fn render(document: &mut TemplateDocument, replacements: &ReplacementMap) -> Result<usize> {
    let mut changed = 0;

    for name in document.text_part_names() {
        let Some(bytes) = document.part(&name) else {
            continue;
        };
        let source = std::str::from_utf8(bytes).map_err(|e| CertError::Render {
            part: name.clone(),
            reason: e.to_string(),
        })?;

        let (content, count) = render_xml(source, replacements).map_err(|reason| {
            CertError::Render {
                part: name.clone(),
                reason,
            }
        })?;

        if count > 0 {
            log::debug!("{}: {} text unit(s) substituted", name, count);
            document.set_part(&name, content);
            changed += count;
        }
    }

    Ok(changed)
}

/// Substitute tokens in one XML part
pub fn render_xml(
    source: &str,
    replacements: &ReplacementMap,
) -> std::result::Result<(Vec<u8>, usize), String> {
    let mut nodes = xml::parse(source)?;
    let mut changed = 0;
    for node in nodes.iter_mut() {
        visit(node, replacements, false, &mut changed);
    }
    Ok((xml::write(&nodes)?, changed))
}

fn visit(node: &mut Node, replacements: &ReplacementMap, in_cell: bool, changed: &mut usize) {
    let Node::Element(element) = node else {
        return;
    };

    if element.is(PARAGRAPH) {
        if in_cell {
            if substitute_unit(element, replacements) {
                *changed += 1;
            }
        } else {
            let mut runs = Vec::new();
            collect_runs(element, &mut runs);
            for run in runs {
                if substitute_unit(run, replacements) {
                    *changed += 1;
                }
            }
        }
    }

    let in_cell = in_cell || element.is(CELL);
    for child in element.children.iter_mut() {
        visit(child, replacements, in_cell, changed);
    }
}

/// Substitute each stretch of text in a run or cell paragraph on its own
fn substitute_unit(element: &mut Element, replacements: &ReplacementMap) -> bool {
    let mut stretches = Vec::new();
    collect_stretches(element, &mut stretches);

    let mut changed = false;
    for texts in stretches {
        changed |= substitute(texts, replacements);
    }
    changed
}

/// `w:t` elements below `element` in document order, grouped into stretches
/// with no break or tab between them. Nested paragraphs and property
/// elements are not entered.
fn collect_stretches<'a>(element: &'a mut Element, out: &mut Vec<Vec<&'a mut Element>>) {
    for child in element.children.iter_mut() {
        if let Node::Element(child) = child {
            if child.is(PARAGRAPH) || child.is(PARAGRAPH_PROPS) || child.is(RUN_PROPS) {
                continue;
            }
            if child.is(TEXT) {
                if out.is_empty() {
                    out.push(Vec::new());
                }
                if let Some(current) = out.last_mut() {
                    current.push(child);
                }
            } else if SEPARATORS.iter().any(|name| child.is(name)) {
                if out.last().is_some_and(|current| !current.is_empty()) {
                    out.push(Vec::new());
                }
            } else {
                collect_stretches(child, out);
            }
        }
    }
}

/// `w:r` elements of a paragraph, including those wrapped in hyperlinks or
/// field and content-control containers
fn collect_runs<'a>(element: &'a mut Element, out: &mut Vec<&'a mut Element>) {
    for child in element.children.iter_mut() {
        if let Node::Element(child) = child {
            if child.is(PARAGRAPH) {
                continue;
            }
            if child.is(RUN) {
                out.push(child);
            } else {
                collect_runs(child, out);
            }
        }
    }
}

/// Apply the map to the joined text of `texts`. The result lands in the
/// first element and the others are emptied.
fn substitute(texts: Vec<&mut Element>, replacements: &ReplacementMap) -> bool {
    let original: String = texts.iter().map(|t| t.text()).collect();
    if original.is_empty() {
        return false;
    }

    let replaced = replacements.apply(&original);
    if replaced == original {
        return false;
    }

    let mut texts = texts.into_iter();
    if let Some(first) = texts.next() {
        first.set_text(&replaced);
    }
    for rest in texts {
        rest.set_text("");
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Record;
    use crate::template::TemplateTokens;
    use pretty_assertions::assert_eq;

    fn map() -> ReplacementMap {
        let record = Record::new("Acme", "EAN1", "Main St", "Town");
        ReplacementMap::for_record(&record, &TemplateTokens::default(), "19-10-2026")
    }

    fn render_str(xml: &str) -> (String, usize) {
        let (bytes, count) = render_xml(xml, &map()).unwrap();
        (String::from_utf8(bytes).unwrap(), count)
    }

    #[test]
    fn test_body_paragraph_runs() {
        let (out, count) = render_str(
            r#"<w:body><w:p><w:r><w:rPr><w:b/></w:rPr><w:t>Klant: KOLOM A</w:t></w:r><w:r><w:t>Datum: van vandaag</w:t></w:r></w:p></w:body>"#,
        );
        assert_eq!(
            out,
            r#"<w:body><w:p><w:r><w:rPr><w:b/></w:rPr><w:t>Klant: Acme</w:t></w:r><w:r><w:t>Datum: 19-10-2026</w:t></w:r></w:p></w:body>"#
        );
        assert_eq!(count, 2);
    }

    #[test]
    fn test_token_split_across_body_runs_is_not_replaced() {
        let xml = r#"<w:p><w:r><w:t>KOLOM</w:t></w:r><w:r><w:t xml:space="preserve"> A</w:t></w:r></w:p>"#;
        let (out, count) = render_str(xml);
        assert_eq!(out, xml);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_table_cell_text_across_runs() {
        let (out, count) = render_str(
            r#"<w:tbl><w:tr><w:tc><w:p><w:r><w:t>KOLOM</w:t></w:r><w:r><w:t xml:space="preserve"> B</w:t></w:r></w:p></w:tc></w:tr></w:tbl>"#,
        );
        assert_eq!(
            out,
            r#"<w:tbl><w:tr><w:tc><w:p><w:r><w:t>EAN1</w:t></w:r><w:r><w:t xml:space="preserve"></w:t></w:r></w:p></w:tc></w:tr></w:tbl>"#
        );
        assert_eq!(count, 1);
    }

    #[test]
    fn test_cell_line_break_keeps_both_lines() {
        let (out, count) = render_str(
            r#"<w:tc><w:p><w:r><w:t>KOLOM C</w:t><w:br/><w:t>KOLOM D</w:t></w:r></w:p></w:tc>"#,
        );
        assert_eq!(
            out,
            r#"<w:tc><w:p><w:r><w:t>Main St</w:t><w:br/><w:t>Town</w:t></w:r></w:p></w:tc>"#
        );
        assert_eq!(count, 1);
    }

    #[test]
    fn test_cell_tab_stays_between_label_and_value() {
        let (out, count) = render_str(
            r#"<w:tc><w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="2000"/></w:tabs></w:pPr><w:r><w:t>Naam:</w:t></w:r><w:r><w:tab/></w:r><w:r><w:t>KOLOM</w:t></w:r><w:r><w:t xml:space="preserve"> A</w:t></w:r></w:p></w:tc>"#,
        );
        assert_eq!(
            out,
            r#"<w:tc><w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="2000"/></w:tabs></w:pPr><w:r><w:t>Naam:</w:t></w:r><w:r><w:tab/></w:r><w:r><w:t>Acme</w:t></w:r><w:r><w:t xml:space="preserve"></w:t></w:r></w:p></w:tc>"#
        );
        assert_eq!(count, 1);
    }

    #[test]
    fn test_token_split_by_break_in_body_run_is_not_replaced() {
        let xml = r#"<w:p><w:r><w:t>KOLOM</w:t><w:br/><w:t xml:space="preserve"> A</w:t></w:r></w:p>"#;
        let (out, count) = render_str(xml);
        assert_eq!(out, xml);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_body_run_with_tab_substitutes_each_side() {
        let (out, count) = render_str(
            r#"<w:p><w:r><w:t>KOLOM B</w:t><w:tab/><w:t>KOLOM A</w:t><w:cr/><w:t>vast</w:t></w:r></w:p>"#,
        );
        assert_eq!(
            out,
            r#"<w:p><w:r><w:t>EAN1</w:t><w:tab/><w:t>Acme</w:t><w:cr/><w:t>vast</w:t></w:r></w:p>"#
        );
        assert_eq!(count, 1);
    }

    #[test]
    fn test_nested_table_and_hyperlink() {
        let (out, count) = render_str(
            r#"<w:tbl><w:tr><w:tc><w:tbl><w:tr><w:tc><w:p><w:r><w:t>KOLOM C</w:t></w:r></w:p></w:tc></w:tr></w:tbl></w:tc></w:tr></w:tbl><w:p><w:hyperlink><w:r><w:t>KOLOM D</w:t></w:r></w:hyperlink></w:p>"#,
        );
        assert!(out.contains("<w:t>Main St</w:t>"));
        assert!(out.contains("<w:t>Town</w:t>"));
        assert_eq!(count, 2);
    }

    #[test]
    fn test_text_box_paragraph_handled_once() {
        let (out, count) = render_str(
            r#"<w:p><w:r><w:t>KOLOM A</w:t><w:drawing><w:txbxContent><w:p><w:r><w:t>KOLOM B</w:t></w:r></w:p></w:txbxContent></w:drawing></w:r></w:p>"#,
        );
        assert_eq!(
            out,
            r#"<w:p><w:r><w:t>Acme</w:t><w:drawing><w:txbxContent><w:p><w:r><w:t>EAN1</w:t></w:r></w:p></w:txbxContent></w:drawing></w:r></w:p>"#
        );
        assert_eq!(count, 2);
    }

    #[test]
    fn test_unknown_token_left_verbatim() {
        let xml = r#"<w:p><w:r><w:t>KOLOM E</w:t></w:r></w:p>"#;
        assert_eq!(render_str(xml), (xml.to_string(), 0));
    }

    #[test]
    fn test_escaped_values() {
        let record = Record::new("Smith & <Sons>", "1", "s", "c");
        let map = ReplacementMap::for_record(&record, &TemplateTokens::default(), "d");
        let (bytes, _) = render_xml("<w:p><w:r><w:t>KOLOM A</w:t></w:r></w:p>", &map).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "<w:p><w:r><w:t>Smith &amp; &lt;Sons&gt;</w:t></w:r></w:p>"
        );
    }

    #[test]
    fn test_render_document_parts() {
        let mut doc = TemplateDocument::new(
            "t.docx",
            vec![
                ("word/document.xml".into(), b"<w:p><w:r><w:t>KOLOM A</w:t></w:r></w:p>".to_vec()),
                ("word/footer1.xml".into(), b"<w:p><w:r><w:t>KOLOM D</w:t></w:r></w:p>".to_vec()),
                ("word/styles.xml".into(), b"<w:t>KOLOM A</w:t>".to_vec()),
            ],
        );
        let changed = render(&mut doc, &map()).unwrap();
        assert_eq!(changed, 2);
        assert_eq!(doc.part("word/footer1.xml").unwrap(), b"<w:p><w:r><w:t>Town</w:t></w:r></w:p>");
        assert_eq!(doc.part("word/styles.xml").unwrap(), b"<w:t>KOLOM A</w:t>");
    }

    #[test]
    fn test_malformed_part_is_render_error() {
        let mut doc = TemplateDocument::new(
            "t.docx",
            vec![("word/document.xml".into(), b"<w:p><w:r>".to_vec())],
        );
        let err = render(&mut doc, &map()).unwrap_err();
        assert!(matches!(err, CertError::Render { .. }));
        assert!(!err.is_fatal());
    }
}
