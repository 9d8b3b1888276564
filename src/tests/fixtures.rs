//! In-memory `.docx` packages for tests.

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const DOCUMENT_HEAD: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main"><w:body>"#;
const DOCUMENT_TAIL: &str = "</w:body></w:document>";

/// Zips `parts` (archive path, contents) into a package.
pub(crate) fn package(parts: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    for (name, contents) in parts {
        writer.start_file(*name, options).unwrap();
        writer.write_all(contents).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Wraps body XML in a `word/document.xml` part.
pub(crate) fn document_xml(body: &str) -> String {
    format!("{DOCUMENT_HEAD}{body}{DOCUMENT_TAIL}")
}

/// A package holding only a main document with `body`.
pub(crate) fn docx(body: &str) -> Vec<u8> {
    package(&[("word/document.xml", document_xml(body).as_bytes())])
}

pub(crate) fn heading(level: u8, text: &str) -> String {
    format!(
        r#"<w:p><w:pPr><w:pStyle w:val="Heading{level}"/></w:pPr><w:r><w:t>{text}</w:t></w:r></w:p>"#
    )
}

pub(crate) fn paragraph(text: &str) -> String {
    format!("<w:p><w:r><w:t>{text}</w:t></w:r></w:p>")
}

/// The topic/question document used across tests: two topics, three cards.
pub(crate) fn study_notes() -> Vec<u8> {
    let body = [
        heading(1, "Topic A"),
        heading(2, "Q1"),
        paragraph("Body1"),
        heading(2, "Q2"),
        paragraph("Body2"),
        heading(1, "Topic B"),
        heading(2, "Q3"),
        paragraph("Body3"),
    ]
    .concat();
    docx(&body)
}
