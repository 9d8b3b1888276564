use super::{extract_sections, read_document};
use crate::config::Config;
use crate::error::Error;
use crate::fixtures::{document_xml, heading, package, paragraph, study_notes};
use crate::section::{HeadingLevel, HeadingPair};
use pretty_assertions::assert_eq;
use std::io::Write;

const IMAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/image1.png"/></Relationships>"#;

#[test]
fn test_images_reach_card_bodies() {
    let body = [
        heading(1, "Anatomy"),
        heading(2, "Label the heart"),
        paragraph("See below"),
        r#"<w:p><w:r><w:t xml:space="preserve">Figure </w:t></w:r><w:r><w:drawing><a:blip r:embed="rId1"/></w:drawing></w:r></w:p>"#.to_string(),
    ]
    .concat();
    let bytes = package(&[
        ("word/document.xml", document_xml(&body).as_bytes()),
        ("word/_rels/document.xml.rels", IMAGE_RELS.as_bytes()),
        ("word/media/image1.png", &[1_u8, 2, 3]),
    ]);

    let deck = extract_sections(&bytes, HeadingPair::default()).unwrap();

    assert_eq!(deck.sections.len(), 1);
    let card = &deck.sections[0];
    assert_eq!(card.part, "Anatomy");
    assert_eq!(card.title, "Label the heart");
    assert_eq!(
        card.body,
        vec![
            "See below".to_string(),
            r#"<img src="data:image/png;base64,AQID" alt="image" />"#.to_string(),
        ]
    );
    assert!(deck.messages.is_empty());
}

#[test]
fn test_sections_follow_document_order() {
    let deck = extract_sections(&study_notes(), HeadingPair::default()).unwrap();

    let titles: Vec<&str> = deck.sections.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Q1", "Q2", "Q3"]);
    let ids: Vec<usize> = deck.sections.iter().map(|s| s.id.0).collect();
    assert_eq!(ids, vec![0, 1, 2]);
}

#[test]
fn test_unmatched_levels_yield_no_sections() {
    let headings = HeadingPair::new(HeadingLevel::H2, HeadingLevel::H4).unwrap();

    let result = extract_sections(&study_notes(), headings);

    assert!(matches!(
        result,
        Err(Error::NoSections {
            parent: HeadingLevel::H2,
            node: HeadingLevel::H4,
        })
    ));
}

#[test]
fn test_read_document_checks_extension_first() {
    let mut file = tempfile::Builder::new().suffix(".DOCX").tempfile().unwrap();
    file.write_all(b"bytes").unwrap();
    file.flush().unwrap();

    assert_eq!(read_document(file.path(), &Config::default()).unwrap(), b"bytes");

    let odt = std::path::Path::new("/nonexistent/notes.odt");
    assert!(matches!(
        read_document(odt, &Config::default()),
        Err(Error::UnsupportedExtension { .. })
    ));
}
