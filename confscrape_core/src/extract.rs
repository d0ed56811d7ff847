//! Text extraction for rendered session pages.
//!
//! The page text is the browser's `innerText` of the document body. Every rule
//! here is a heuristic over that text: a missing marker yields an empty field,
//! never an error. Sections that run together without a blank line bleed into
//! each other; that is a known limitation of the block rules.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::debug;

use crate::record::NOT_AVAILABLE;

/// Zero-based line index holding the session title in the page layout.
pub const TITLE_LINE_INDEX: usize = 13;

/// Prefix of the page footer line that leaks into trailing blocks.
const COPYRIGHT_GLYPH: char = '©';

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFields {
    pub title: String,
    pub chairs: Vec<String>,
    pub presenters: Vec<String>,
    pub speakers: Vec<String>,
    pub moderators: Vec<String>,
    pub panelists: Vec<String>,
}

static CHAIRS_PATTERN: OnceLock<Regex> = OnceLock::new();
static PRESENTER_PATTERN: OnceLock<Regex> = OnceLock::new();
static SPEAKERS_PATTERN: OnceLock<Regex> = OnceLock::new();
static MODERATORS_PATTERN: OnceLock<Regex> = OnceLock::new();
static PANELISTS_PATTERN: OnceLock<Regex> = OnceLock::new();

#[expect(
    clippy::expect_used,
    reason = "Static regex patterns validated at compile time"
)]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("Static regex pattern is guaranteed to be valid")
}

fn chairs_pattern() -> &'static Regex {
    CHAIRS_PATTERN.get_or_init(|| compile(r"(?s)Chair\(s\)\s*(.*?)\s*(?:Room|Date)"))
}

fn presenter_pattern() -> &'static Regex {
    PRESENTER_PATTERN.get_or_init(|| compile(r"([\w.\-' ]+?)\s*\(Presenter\)"))
}

fn speakers_pattern() -> &'static Regex {
    SPEAKERS_PATTERN.get_or_init(|| compile(&block_pattern("Speakers:")))
}

fn moderators_pattern() -> &'static Regex {
    MODERATORS_PATTERN.get_or_init(|| compile(&block_pattern("Moderators:")))
}

fn panelists_pattern() -> &'static Regex {
    PANELISTS_PATTERN.get_or_init(|| compile(&block_pattern("Panel members:")))
}

/// Label line, then everything up to the next blank line or end of text.
fn block_pattern(label: &str) -> String {
    format!(r"(?s){}\s*\n(.*?)(?:\n\n|\z)", regex::escape(label))
}

/// Extract every field from rendered page text.
#[must_use]
pub fn extract(text: &str) -> ExtractedFields {
    let fields = ExtractedFields {
        title: extract_title(text),
        chairs: extract_chairs(text),
        presenters: extract_presenters(text),
        speakers: extract_block(speakers_pattern(), text),
        moderators: extract_block(moderators_pattern(), text),
        panelists: extract_block(panelists_pattern(), text),
    };

    debug!(
        "Extracted title={:?} chairs={} presenters={} speakers={} moderators={} panelists={}",
        fields.title,
        fields.chairs.len(),
        fields.presenters.len(),
        fields.speakers.len(),
        fields.moderators.len(),
        fields.panelists.len()
    );

    fields
}

/// Title at the fixed line offset, or `N/A` for short text.
#[must_use]
pub fn extract_title(text: &str) -> String {
    text.lines()
        .nth(TITLE_LINE_INDEX)
        .map_or_else(|| NOT_AVAILABLE.to_string(), ToString::to_string)
}

/// Names between the `Chair(s)` marker and the next `Room` or `Date` marker.
#[must_use]
pub fn extract_chairs(text: &str) -> Vec<String> {
    let Some(span) = chairs_pattern()
        .captures(text)
        .and_then(|caps| caps.get(1))
    else {
        return Vec::new();
    };

    span.as_str()
        .trim()
        .split([',', '\n'])
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Every `<name> (Presenter)` occurrence, in order of appearance.
#[must_use]
pub fn extract_presenters(text: &str) -> Vec<String> {
    presenter_pattern()
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .collect()
}

fn extract_block(pattern: &Regex, text: &str) -> Vec<String> {
    let Some(block) = pattern.captures(text).and_then(|caps| caps.get(1)) else {
        return Vec::new();
    };

    block
        .as_str()
        .trim()
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !line.starts_with(COPYRIGHT_GLYPH))
        .map(ToString::to_string)
        .collect()
}
