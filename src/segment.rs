//! Grouping a flat element run into study cards by heading level.
//!
//! Segmentation is a single pass. A parent heading only relabels the broad topic; a node heading
//! closes the open card and opens the next one; anything else is body content of the open card,
//! or dropped when no card is open yet.

use crate::markup::Element;
use crate::section::{HeadingPair, Section, SectionId};

#[must_use]
/// Groups top-level elements into sections in document order.
///
/// Elements carrying an image contribute a bare `<img>` referencing the resolved source instead
/// of their own markup.
pub fn segment(elements: &[Element], headings: HeadingPair) -> Vec<Section> {
    let parent_tag = headings.parent.tag();
    let node_tag = headings.node.tag();

    let mut sections = Vec::new();
    let mut current_part = String::new();
    let mut current: Option<Section> = None;

    for element in elements {
        if element.tag == parent_tag {
            current_part.clone_from(&element.inner);
        } else if element.tag == node_tag {
            if let Some(section) = current.take() {
                sections.push(section);
            }
            current = Some(Section {
                id: SectionId(sections.len()),
                part: current_part.clone(),
                title: element.inner.clone(),
                body: Vec::new(),
            });
        } else if let Some(section) = current.as_mut() {
            let content = match &element.image_src {
                Some(src) => format!(r#"<img src="{src}" alt="image" />"#),
                None => element.inner.clone(),
            };
            section.body.push(content);
        }
    }

    if let Some(section) = current {
        sections.push(section);
    }

    sections
}

#[cfg(test)]
#[path = "tests/segment.rs"]
mod tests;
