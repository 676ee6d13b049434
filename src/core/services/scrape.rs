//! Lyrics extraction from Genius song pages

use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};
use std::sync::OnceLock;

use crate::error::LyricsError;

const CONTAINER_SELECTOR: &str = r#"div[data-lyrics-container="true"]"#;
const LEGACY_SELECTOR: &str = "div.lyrics";

fn section_header_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\[.*?\])*").expect("valid section header regex"))
}

fn double_newline_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n{2}").expect("valid newline regex"))
}

/// Extract the lyrics text from a song page. Returns an empty string when
/// the page has no lyrics container.
pub fn extract_lyrics(html: &str, remove_section_headers: bool) -> Result<String, LyricsError> {
    let document = Html::parse_document(html);
    let containers = parse_selector(CONTAINER_SELECTOR)?;

    let mut blocks: Vec<String> = Vec::new();
    for container in document.select(&containers) {
        let mut text = String::new();
        push_text(container, &mut text);
        blocks.push(text);
    }

    if blocks.is_empty() {
        let legacy = parse_selector(LEGACY_SELECTOR)?;
        if let Some(container) = document.select(&legacy).next() {
            let mut text = String::new();
            push_text(container, &mut text);
            blocks.push(text);
        }
    }

    Ok(clean_lyrics(&blocks.join("\n"), remove_section_headers))
}

/// Strip section headers and collapse doubled newlines
pub fn clean_lyrics(raw: &str, remove_section_headers: bool) -> String {
    let mut lyrics = raw.replace("\r\n", "\n");
    if remove_section_headers {
        lyrics = section_header_regex().replace_all(&lyrics, "").into_owned();
        lyrics = double_newline_regex().replace_all(&lyrics, "\n").into_owned();
    }
    lyrics.trim().to_string()
}

fn parse_selector(selector: &str) -> Result<Selector, LyricsError> {
    Selector::parse(selector).map_err(|e| LyricsError::Selector(e.to_string()))
}

fn push_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => {
                if el.name() == "br" {
                    out.push('\n');
                    continue;
                }
                // Genius injects headers and ads marked this way inside the container
                if el.attr("data-exclude-from-selection") == Some("true") {
                    continue;
                }
                if let Some(child_element) = ElementRef::wrap(child) {
                    push_text(child_element, out);
                }
            }
            _ => {}
        }
    }
}
