// ABOUTME: Segment splitter for layout-specific slide structure
// ABOUTME: Divides raw slide text into columns, quote/attribution and image/text parts

use regex::Regex;
use std::sync::OnceLock;

fn column_marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)<!--\s*column\s*-->").unwrap())
}

fn image_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"!\[([^\]]*)\]\(([^)]*)\)").unwrap())
}

/// An embedded image reference pulled out of slide text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub alt: String,
    pub url: String,
}

/// Two-way split on the first column markers. Content before the first
/// marker is the left part; the segment after it is the right part. Without
/// a marker everything is left and right is empty. Markers beyond the second
/// segment are ignored.
pub fn split_two_columns(text: &str) -> (String, String) {
    let mut parts = column_marker_re().splitn(text, 3);
    let left = parts.next().unwrap_or_default().to_string();
    let right = parts.next().unwrap_or_default().to_string();
    (left, right)
}

/// Split on all column markers into exactly three parts, in source order.
/// Missing parts come back as empty strings; extra parts are dropped.
pub fn split_three_columns(text: &str) -> [String; 3] {
    let mut columns = [String::new(), String::new(), String::new()];
    for (slot, part) in columns.iter_mut().zip(column_marker_re().split(text)) {
        *slot = part.to_string();
    }
    columns
}

/// Line-oriented quote split. A line opening with an em-dash or a double
/// hyphen is the attribution; every other non-blank line joins the quote
/// body with single spaces. Surrounding straight or curly quote characters
/// are trimmed from the assembled body.
pub fn split_quote(text: &str) -> (String, Option<String>) {
    let mut body_lines: Vec<&str> = Vec::new();
    let mut author = None;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with('\u{2014}') || trimmed.starts_with("--") {
            let name = trimmed.trim_start_matches(&['\u{2014}', '-'][..]).trim();
            if !name.is_empty() {
                author = Some(name.to_string());
            }
            continue;
        }
        body_lines.push(trimmed);
    }

    let joined = body_lines.join(" ");
    let quote = joined
        .trim_matches(&['"', '\'', '\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}'][..])
        .trim()
        .to_string();
    (quote, author)
}

/// Pull the first embedded image reference out of `text`.
///
/// Returns the reference and the remaining text with the reference removed.
/// Without a match the text comes back untouched and the reference is None.
pub fn extract_image(text: &str) -> (Option<ImageRef>, String) {
    match image_re().captures(text) {
        Some(caps) => {
            let whole = caps.get(0).unwrap();
            let image = ImageRef {
                alt: caps[1].to_string(),
                url: caps[2].to_string(),
            };
            let mut remaining = String::with_capacity(text.len() - whole.len());
            remaining.push_str(&text[..whole.start()]);
            remaining.push_str(&text[whole.end()..]);
            (Some(image), remaining)
        }
        None => (None, text.to_string()),
    }
}
