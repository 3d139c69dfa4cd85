use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use crate::errors::ExtractionCause;

const DOCUMENT_PART: &str = "word/document.xml";

/// Reads body paragraphs in document order and joins them with newlines.
pub fn extract(bytes: &[u8]) -> Result<String, ExtractionCause> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut xml = String::new();
    archive.by_name(DOCUMENT_PART)?.read_to_string(&mut xml)?;

    let paragraphs = body_paragraphs(&xml)?;
    Ok(paragraphs.join("\n").trim().to_string())
}

/// Subtrees whose paragraphs are not part of the body text: tables, text
/// boxes (`w:txbxContent`), and the `mc:Fallback` copy Word writes next to
/// every drawing.
fn is_skipped_subtree(name: &[u8]) -> bool {
    matches!(name, b"w:tbl" | b"w:txbxContent" | b"mc:Fallback")
}

/// Collects the text of every body-level `w:p`, in document order.
///
/// Runs contribute their `w:t` text; `w:tab` becomes a tab and `w:br`/`w:cr`
/// a newline. Paragraphs in tables and text boxes are dropped, and their
/// text never leaks into the surrounding paragraph.
fn body_paragraphs(xml: &str) -> Result<Vec<String>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut open: Vec<String> = Vec::new();
    let mut skip_depth = 0usize;
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) if is_skipped_subtree(e.name().as_ref()) => skip_depth += 1,
            Event::End(e) if is_skipped_subtree(e.name().as_ref()) => {
                skip_depth = skip_depth.saturating_sub(1)
            }
            Event::Eof => break,
            _ if skip_depth > 0 => {}
            Event::Start(e) => match e.name().as_ref() {
                b"w:p" => open.push(String::new()),
                b"w:t" => in_text = true,
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:p" => paragraphs.push(String::new()),
                b"w:tab" => {
                    if let Some(p) = open.last_mut() {
                        p.push('\t');
                    }
                }
                b"w:br" | b"w:cr" => {
                    if let Some(p) = open.last_mut() {
                        p.push('\n');
                    }
                }
                _ => {}
            },
            Event::Text(t) if in_text => {
                if let Some(p) = open.last_mut() {
                    p.push_str(&t.unescape()?);
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"w:p" => {
                    if let Some(p) = open.pop() {
                        paragraphs.push(p);
                    }
                }
                b"w:t" => in_text = false,
                _ => {}
            },
            _ => {}
        }
    }

    Ok(paragraphs)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::io::Write;

    use zip::write::FileOptions;
    use zip::ZipWriter;

    use super::*;

    const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

    fn escape(text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
    }

    /// Wraps raw `w:body` content in a minimal DOCX package.
    pub(crate) fn build_docx_from_body(body: &str) -> Vec<u8> {
        let document = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006" xmlns:wps="http://schemas.microsoft.com/office/word/2010/wordprocessingShape" xmlns:v="urn:schemas-microsoft-com:vml"><w:body>{body}</w:body></w:document>"#
        );
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("[Content_Types].xml", FileOptions::default())
            .unwrap();
        writer.write_all(CONTENT_TYPES.as_bytes()).unwrap();
        writer
            .start_file(DOCUMENT_PART, FileOptions::default())
            .unwrap();
        writer.write_all(document.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    /// Builds a DOCX whose body holds one single-run paragraph per entry.
    pub(crate) fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
        let body: String = paragraphs
            .iter()
            .map(|p| {
                format!(
                    r#"<w:p><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
                    escape(p)
                )
            })
            .collect();
        build_docx_from_body(&body)
    }

    #[test]
    fn test_paragraphs_join_with_newline() {
        let bytes = build_docx(&["Jane Doe", "Python developer", "Berlin"]);
        assert_eq!(
            extract(&bytes).unwrap(),
            "Jane Doe\nPython developer\nBerlin"
        );
    }

    #[test]
    fn test_runs_concatenate_within_paragraph() {
        let body = r#"<w:p><w:r><w:t>Senior </w:t></w:r><w:r><w:t>Engineer</w:t></w:r></w:p>"#;
        let bytes = build_docx_from_body(body);
        assert_eq!(extract(&bytes).unwrap(), "Senior Engineer");
    }

    #[test]
    fn test_empty_paragraphs_are_kept_then_trimmed() {
        let body = r#"<w:p/><w:p><w:r><w:t>A</w:t></w:r></w:p><w:p/><w:p><w:r><w:t>B</w:t></w:r></w:p><w:p/>"#;
        let bytes = build_docx_from_body(body);
        assert_eq!(extract(&bytes).unwrap(), "A\n\nB");
    }

    #[test]
    fn test_table_paragraphs_are_skipped() {
        let body = r#"<w:p><w:r><w:t>Intro</w:t></w:r></w:p><w:tbl><w:tr><w:tc><w:p><w:r><w:t>cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl><w:p><w:r><w:t>Outro</w:t></w:r></w:p>"#;
        let bytes = build_docx_from_body(body);
        assert_eq!(extract(&bytes).unwrap(), "Intro\nOutro");
    }

    #[test]
    fn test_tabs_breaks_and_entities() {
        let body = r#"<w:p><w:r><w:t>R&amp;D</w:t><w:tab/><w:t>Lead</w:t><w:br/><w:t>2019</w:t></w:r></w:p>"#;
        let bytes = build_docx_from_body(body);
        assert_eq!(extract(&bytes).unwrap(), "R&D\tLead\n2019");
    }

    #[test]
    fn test_text_boxes_are_dropped_and_not_duplicated() {
        let text_box = r#"<w:txbxContent><w:p><w:r><w:t>Box text</w:t></w:r></w:p></w:txbxContent>"#;
        let body = format!(
            r#"<w:p><w:r><w:t>Header</w:t></w:r></w:p><w:p><w:r><mc:AlternateContent><mc:Choice Requires="wps"><w:drawing><wps:txbx>{text_box}</wps:txbx></w:drawing></mc:Choice><mc:Fallback><w:pict><v:textbox>{text_box}</v:textbox></w:pict></mc:Fallback></mc:AlternateContent></w:r><w:r><w:t>Host</w:t></w:r></w:p><w:p><w:r><w:t>Body</w:t></w:r></w:p>"#
        );
        let bytes = build_docx_from_body(&body);
        assert_eq!(extract(&bytes).unwrap(), "Header\nHost\nBody");
    }

    #[test]
    fn test_not_a_zip_fails() {
        let err = extract(b"definitely not a zip archive").unwrap_err();
        assert!(matches!(err, ExtractionCause::Zip(_)), "got {err:?}");
    }

    #[test]
    fn test_zip_without_document_part_fails() {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/other.xml", FileOptions::default())
            .unwrap();
        writer.write_all(b"<x/>").unwrap();
        let bytes = writer.finish().unwrap().into_inner();
        assert!(matches!(extract(&bytes), Err(ExtractionCause::Zip(_))));
    }
}
