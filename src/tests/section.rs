use super::{HeadingLevel, HeadingPair, Section, SectionId};
use crate::error::Error;
use pretty_assertions::assert_eq;

#[test]
fn test_parse_heading_levels() {
    assert_eq!("h2".parse::<HeadingLevel>().unwrap(), HeadingLevel::H2);
    assert_eq!(" H3 ".parse::<HeadingLevel>().unwrap(), HeadingLevel::H3);
    assert!("h7".parse::<HeadingLevel>().is_err());
    assert!("heading".parse::<HeadingLevel>().is_err());
    assert!("".parse::<HeadingLevel>().is_err());
}

#[test]
fn test_selectors_restrict_choices() {
    assert_eq!(HeadingLevel::parse_parent("h3").unwrap(), HeadingLevel::H3);
    assert_eq!(HeadingLevel::parse_node("h4").unwrap(), HeadingLevel::H4);

    let Err(Error::InvalidHeading { value, allowed }) = HeadingLevel::parse_parent("h4") else {
        panic!("h4 is not a parent choice");
    };
    assert_eq!(value, "h4");
    assert_eq!(allowed, vec!["h1", "h2", "h3"]);

    assert!(HeadingLevel::parse_node("h1").is_err());
}

#[test]
fn test_cycle_wraps_around() {
    let choices = HeadingLevel::NODE_CHOICES;
    assert_eq!(HeadingLevel::H2.cycle(&choices), HeadingLevel::H3);
    assert_eq!(HeadingLevel::H4.cycle(&choices), HeadingLevel::H2);
    // A level outside the choices jumps to the first one.
    assert_eq!(HeadingLevel::H1.cycle(&choices), HeadingLevel::H2);
}

#[test]
fn test_display_and_depth() {
    assert_eq!(HeadingLevel::H3.to_string(), "h3");
    assert_eq!(HeadingLevel::H3.depth(), 3);
    assert_eq!(HeadingLevel::new(6).map(HeadingLevel::tag), Some("h6"));
    assert_eq!(HeadingLevel::new(0), None);
}

#[test]
fn test_heading_pair_rejects_same_level() {
    assert!(matches!(
        HeadingPair::new(HeadingLevel::H2, HeadingLevel::H2),
        Err(Error::SameHeadingLevels(HeadingLevel::H2))
    ));

    // A deeper parent than node is unusual but allowed.
    let inverted = HeadingPair::new(HeadingLevel::H3, HeadingLevel::H2).unwrap();
    assert_eq!(inverted.parent, HeadingLevel::H3);
}

#[test]
fn test_sections_serialize_for_export() {
    let section = Section {
        id: SectionId(4),
        part: "Topic".to_string(),
        title: "Question".to_string(),
        body: vec!["<strong>Answer</strong>".to_string()],
    };

    let json = serde_json::to_value(&section).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "id": 4,
            "part": "Topic",
            "title": "Question",
            "body": ["<strong>Answer</strong>"],
        })
    );
}
