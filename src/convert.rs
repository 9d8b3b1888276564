//! DOCX to markup conversion.
//!
//! DOCX files are ZIP archives containing XML files in Open XML format. The main content is in
//! `word/document.xml`; paragraph style names live in `word/styles.xml` and image targets in
//! `word/_rels/document.xml.rels`.
//!
//! The output is a flat HTML fragment: one element per heading, paragraph, list or table, with
//! every embedded image already resolved to a self-contained `src` by an [`ImageHandler`], so
//! nothing downstream ever has to go back to the archive.

use crate::error::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::debug;
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::io::{Cursor, Read, Seek};
use zip::ZipArchive;

const DOCUMENT_PART: &str = "word/document.xml";
const STYLES_PART: &str = "word/styles.xml";
const RELATIONSHIPS_PART: &str = "word/_rels/document.xml.rels";
const CORE_PROPERTIES_PART: &str = "docProps/core.xml";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Markup produced from a document, with non-fatal diagnostics.
pub struct Conversion {
    /// Flat HTML fragment, one top-level element per block.
    pub markup: String,
    /// Issues that did not stop conversion, such as images that could not be embedded.
    pub messages: Vec<String>,
    /// Document title from the package properties, when set.
    pub title: Option<String>,
}

/// An image stored inside the document package.
pub struct EmbeddedImage<'a> {
    /// Archive path of the image, e.g. `word/media/image1.png`.
    pub name: &'a str,
    /// MIME type inferred from the file extension.
    pub content_type: &'a str,
    /// Raw image bytes.
    pub bytes: &'a [u8],
}

/// Resolves embedded images to a `src` usable without access to the archive.
pub trait ImageHandler {
    /// Produces the `src` attribute value for an image.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be represented; conversion records it and moves on.
    fn image_src(&self, image: &EmbeddedImage<'_>) -> Result<String>;
}

/// Embeds images as base64 `data:` URIs.
pub struct DataUriImages;

impl ImageHandler for DataUriImages {
    fn image_src(&self, image: &EmbeddedImage<'_>) -> Result<String> {
        Ok(format!(
            "data:{};base64,{}",
            image.content_type,
            STANDARD.encode(image.bytes)
        ))
    }
}

/// DOCX to markup converter.
pub struct DocxConverter<H: ImageHandler = DataUriImages> {
    images: H,
}

impl DocxConverter {
    #[must_use]
    /// Create a converter that embeds images as data URIs.
    pub fn new() -> Self {
        Self {
            images: DataUriImages,
        }
    }
}

impl Default for DocxConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: ImageHandler> DocxConverter<H> {
    /// Create a converter with a custom image handler.
    pub fn with_image_handler(images: H) -> Self {
        Self { images }
    }

    /// Convert DOCX bytes to a markup fragment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conversion`] if the bytes are not a ZIP archive, the main document part
    /// is missing, or its XML is malformed.
    pub fn convert(&self, bytes: &[u8]) -> Result<Conversion> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;

        let document = read_part(&mut archive, DOCUMENT_PART)?
            .ok_or_else(|| Error::Conversion(format!("{DOCUMENT_PART} not found")))?;
        let styles = read_part(&mut archive, STYLES_PART)?
            .map(|xml| parse_style_names(&xml))
            .transpose()?
            .unwrap_or_default();
        let relationships = read_part(&mut archive, RELATIONSHIPS_PART)?
            .map(|xml| parse_relationships(&xml))
            .transpose()?
            .unwrap_or_default();

        let mut builder = BlockBuilder::new(&styles);
        let mut messages = Vec::new();
        let mut reader = Reader::from_str(&document);
        let mut buf = Vec::new();

        loop {
            let event = reader.read_event_into(&mut buf)?;
            match event {
                Event::Start(ref e) | Event::Empty(ref e) => {
                    builder.open(e);
                    if e.local_name().as_ref() == b"blip" {
                        if let Some(id) = get_attribute(e, "embed") {
                            match self.resolve_image(&mut archive, &relationships, &id) {
                                Ok(src) => builder.image(&src),
                                Err(message) => {
                                    debug!("{message}");
                                    messages.push(message);
                                }
                            }
                        }
                    }
                    if matches!(event, Event::Empty(_)) {
                        builder.close(e.local_name().as_ref());
                    }
                }
                Event::End(ref e) => builder.close(e.local_name().as_ref()),
                Event::Text(ref e) => {
                    if builder.in_text() {
                        builder.text(&e.unescape()?);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        let title = read_part(&mut archive, CORE_PROPERTIES_PART)
            .ok()
            .flatten()
            .and_then(|xml| parse_title(&xml));

        Ok(Conversion {
            markup: render_blocks(&builder.finish()),
            messages,
            title,
        })
    }

    fn resolve_image<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        relationships: &HashMap<String, String>,
        id: &str,
    ) -> std::result::Result<String, String> {
        let target = relationships
            .get(id)
            .ok_or_else(|| format!("image relationship {id} not found"))?;
        let name = target.strip_prefix('/').map_or_else(
            || format!("word/{target}"),
            ToString::to_string,
        );
        let mut bytes = Vec::new();
        archive
            .by_name(&name)
            .map_err(|e| format!("image {name} missing from archive: {e}"))?
            .read_to_end(&mut bytes)
            .map_err(|e| format!("image {name} could not be read: {e}"))?;
        let image = EmbeddedImage {
            name: &name,
            content_type: content_type(&name),
            bytes: &bytes,
        };
        self.images
            .image_src(&image)
            .map_err(|e| format!("image {name} skipped: {e}"))
    }
}

fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Option<String>> {
    match archive.by_name(name) {
        Ok(mut file) => {
            let mut content = String::new();
            file.read_to_string(&mut content)
                .map_err(|e| Error::Conversion(format!("failed to read {name}: {e}")))?;
            Ok(Some(content))
        }
        Err(zip::result::ZipError::FileNotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn content_type(name: &str) -> &'static str {
    let extension = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "svg" => "image/svg+xml",
        "emf" => "image/x-emf",
        "wmf" => "image/x-wmf",
        _ => "application/octet-stream",
    }
}

/// Maps style ids to their display names, e.g. `Heading1` to `heading 1`.
fn parse_style_names(xml: &str) -> Result<HashMap<String, String>> {
    let mut names = HashMap::new();
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut current_id: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) if e.local_name().as_ref() == b"style" => {
                current_id = get_attribute(e, "styleId");
            }
            Event::Empty(ref e) | Event::Start(ref e) if e.local_name().as_ref() == b"name" => {
                if let (Some(id), Some(name)) = (current_id.as_ref(), get_attribute(e, "val")) {
                    names.insert(id.clone(), name);
                }
            }
            Event::End(ref e) if e.local_name().as_ref() == b"style" => current_id = None,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(names)
}

/// Maps relationship ids to their targets for internal relationships.
fn parse_relationships(xml: &str) -> Result<HashMap<String, String>> {
    let mut targets = HashMap::new();
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Empty(ref e) | Event::Start(ref e)
                if e.local_name().as_ref() == b"Relationship" =>
            {
                let external = get_attribute(e, "TargetMode").is_some_and(|m| m == "External");
                if let (false, Some(id), Some(target)) =
                    (external, get_attribute(e, "Id"), get_attribute(e, "Target"))
                {
                    targets.insert(id, target);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(targets)
}

/// Extracts `dc:title` from the core properties part.
fn parse_title(xml: &str) -> Option<String> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut in_title = false;
    let mut title = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.local_name().as_ref() == b"title" => in_title = true,
            Ok(Event::End(ref e)) if e.local_name().as_ref() == b"title" => in_title = false,
            Ok(Event::Text(e)) if in_title => {
                title = e.unescape().ok().map(|t| t.trim().to_string());
            }
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
        buf.clear();
    }

    title.filter(|t| !t.is_empty())
}

/// Helper to get an attribute value from an XML element, ignoring its namespace prefix.
fn get_attribute(e: &BytesStart, name: &str) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == name.as_bytes())
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}

/// Whether a toggle property such as `<w:b/>` is switched on.
fn toggle_on(e: &BytesStart) -> bool {
    get_attribute(e, "val").is_none_or(|v| !matches!(v.as_str(), "0" | "false" | "off"))
}

/// Heading depth for a paragraph style, judged by its display name when known.
fn heading_level(style_id: &str, styles: &HashMap<String, String>) -> Option<u8> {
    let name = styles
        .get(style_id)
        .map_or(style_id, String::as_str)
        .to_ascii_lowercase();
    if name == "title" {
        return Some(1);
    }
    let rest = name.strip_prefix("heading")?.trim();
    let level = rest.parse::<u8>().ok()?;
    Some(level.clamp(1, 6))
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum ParagraphKind {
    #[default]
    Normal,
    Heading(u8),
    ListItem,
}

#[derive(Debug, Default)]
struct Paragraph {
    kind: ParagraphKind,
    content: String,
}

#[derive(Debug)]
enum Block {
    Paragraph(Paragraph),
    Table(Vec<Vec<Vec<Paragraph>>>),
}

#[derive(Debug, Default)]
struct RunStyle {
    bold: bool,
    italic: bool,
    underline: bool,
    strike: bool,
}

impl RunStyle {
    fn wrap(&self, content: &str) -> String {
        let mut out = content.to_string();
        for (on, tag) in [
            (self.strike, "s"),
            (self.underline, "u"),
            (self.italic, "em"),
            (self.bold, "strong"),
        ] {
            if on {
                out = format!("<{tag}>{out}</{tag}>");
            }
        }
        out
    }
}

/// Accumulates blocks while walking `word/document.xml`.
struct BlockBuilder<'s> {
    styles: &'s HashMap<String, String>,
    blocks: Vec<Block>,
    paragraph: Paragraph,
    paragraph_depth: usize,
    numbered: bool,
    run: String,
    run_style: RunStyle,
    in_run: bool,
    in_text: bool,
    table_depth: usize,
    rows: Vec<Vec<Vec<Paragraph>>>,
}

impl<'s> BlockBuilder<'s> {
    fn new(styles: &'s HashMap<String, String>) -> Self {
        Self {
            styles,
            blocks: Vec::new(),
            paragraph: Paragraph::default(),
            paragraph_depth: 0,
            numbered: false,
            run: String::new(),
            run_style: RunStyle::default(),
            in_run: false,
            in_text: false,
            table_depth: 0,
            rows: Vec::new(),
        }
    }

    fn in_text(&self) -> bool {
        self.in_run && self.in_text
    }

    fn open(&mut self, e: &BytesStart) {
        match e.local_name().as_ref() {
            b"p" => {
                if self.paragraph_depth == 0 {
                    self.paragraph = Paragraph::default();
                    self.numbered = false;
                }
                self.paragraph_depth += 1;
            }
            b"r" => {
                self.in_run = true;
                self.run.clear();
                self.run_style = RunStyle::default();
            }
            b"t" => self.in_text = true,
            b"b" if self.in_run => self.run_style.bold = toggle_on(e),
            b"i" if self.in_run => self.run_style.italic = toggle_on(e),
            b"strike" | b"dstrike" if self.in_run => self.run_style.strike = toggle_on(e),
            b"u" if self.in_run => {
                self.run_style.underline = get_attribute(e, "val").is_none_or(|v| v != "none");
            }
            b"br" | b"cr" if self.in_run => self.run.push_str("<br />"),
            b"tab" if self.in_run => self.run.push('\t'),
            b"pStyle" if self.paragraph_depth > 0 => {
                if let Some(level) =
                    get_attribute(e, "val").and_then(|id| heading_level(&id, self.styles))
                {
                    self.paragraph.kind = ParagraphKind::Heading(level);
                }
            }
            b"numPr" if self.paragraph_depth > 0 => self.numbered = true,
            b"tbl" => {
                if self.table_depth == 0 {
                    self.rows.clear();
                }
                self.table_depth += 1;
            }
            b"tr" if self.table_depth == 1 => self.rows.push(Vec::new()),
            b"tc" if self.table_depth == 1 => {
                if let Some(row) = self.rows.last_mut() {
                    row.push(Vec::new());
                }
            }
            _ => {}
        }
    }

    fn close(&mut self, name: &[u8]) {
        match name {
            b"t" => self.in_text = false,
            b"r" => {
                self.in_run = false;
                self.in_text = false;
                if !self.run.is_empty() {
                    let run = std::mem::take(&mut self.run);
                    self.paragraph.content.push_str(&self.run_style.wrap(&run));
                }
            }
            b"p" => {
                self.paragraph_depth = self.paragraph_depth.saturating_sub(1);
                if self.paragraph_depth == 0 {
                    self.finish_paragraph();
                }
            }
            b"tbl" => {
                self.table_depth = self.table_depth.saturating_sub(1);
                if self.table_depth == 0 {
                    let rows = std::mem::take(&mut self.rows);
                    if rows.iter().any(|row| !row.is_empty()) {
                        self.blocks.push(Block::Table(rows));
                    }
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        self.run.push_str(&escape(text));
    }

    fn image(&mut self, src: &str) {
        let tag = format!(r#"<img src="{}" />"#, escape(src));
        if self.in_run {
            self.run.push_str(&tag);
        } else {
            self.paragraph.content.push_str(&tag);
        }
    }

    fn finish_paragraph(&mut self) {
        let mut paragraph = std::mem::take(&mut self.paragraph);
        if paragraph.content.trim().is_empty() {
            return;
        }
        if paragraph.kind == ParagraphKind::Normal && self.numbered {
            paragraph.kind = ParagraphKind::ListItem;
        }
        if self.table_depth > 0 {
            if let Some(cell) = self.rows.last_mut().and_then(|row| row.last_mut()) {
                cell.push(paragraph);
            }
        } else {
            self.blocks.push(Block::Paragraph(paragraph));
        }
    }

    fn finish(self) -> Vec<Block> {
        self.blocks
    }
}

fn render_blocks(blocks: &[Block]) -> String {
    let mut out = String::new();
    let mut in_list = false;

    for block in blocks {
        let is_list_item = matches!(
            block,
            Block::Paragraph(Paragraph {
                kind: ParagraphKind::ListItem,
                ..
            })
        );
        if in_list && !is_list_item {
            out.push_str("</ul>");
            in_list = false;
        }
        match block {
            Block::Paragraph(paragraph) => match paragraph.kind {
                ParagraphKind::Heading(level) => {
                    out.push_str(&format!("<h{level}>{}</h{level}>", paragraph.content));
                }
                ParagraphKind::ListItem => {
                    if !in_list {
                        out.push_str("<ul>");
                        in_list = true;
                    }
                    out.push_str(&format!("<li>{}</li>", paragraph.content));
                }
                ParagraphKind::Normal => {
                    out.push_str(&format!("<p>{}</p>", paragraph.content));
                }
            },
            Block::Table(rows) => {
                out.push_str("<table>");
                for row in rows {
                    out.push_str("<tr>");
                    for cell in row {
                        let content: Vec<&str> =
                            cell.iter().map(|p| p.content.as_str()).collect();
                        out.push_str(&format!("<td>{}</td>", content.join("<br />")));
                    }
                    out.push_str("</tr>");
                }
                out.push_str("</table>");
            }
        }
    }
    if in_list {
        out.push_str("</ul>");
    }

    out
}

#[cfg(test)]
#[path = "tests/convert.rs"]
mod tests;
