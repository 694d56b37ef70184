// ABOUTME: Markdown parser for the deck-slides library
// ABOUTME: Splits a Markdown document into slide chunks and normalizes each into a SlideRecord

use crate::config::Config;
use crate::errors::Result;
use crate::metadata;
use crate::segments;
use crate::slide::{SlideRecord, DEFAULT_LAYOUT};
use comrak::{markdown_to_html, ComrakOptions};
use log::debug;
use regex::Regex;
use std::sync::OnceLock;

/// A slide boundary is a line holding nothing but the horizontal-rule marker.
fn delimiter_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^---[ \t]*$").unwrap())
}

/// Convert one Markdown fragment to HTML with the options used across the
/// crate (raw HTML allowed, matching authored inline markup).
fn to_html(markdown: &str) -> String {
    let mut options = ComrakOptions::default();
    options.render.unsafe_ = true;
    markdown_to_html(markdown, &options).trim_end().to_string()
}

/// Parse a Markdown document into an ordered sequence of slide records.
///
/// Chunks that are empty after trimming are skipped and do not consume an
/// index. Column markers survive metadata extraction; they are consumed by
/// the segment splitter, which sees the chunk before any cleaning.
pub fn parse_slides(_config: &Config, input: &str) -> Result<Vec<SlideRecord>> {
    let mut records = Vec::new();

    for chunk in delimiter_re().split(input) {
        if chunk.trim().is_empty() {
            continue;
        }

        let index = records.len();
        records.push(parse_chunk(index, chunk));
    }

    debug!("Parsed {} slides from markdown source", records.len());
    Ok(records)
}

fn parse_chunk(index: usize, chunk: &str) -> SlideRecord {
    let mut meta = metadata::extract(chunk);
    let layout = meta
        .remove("layout")
        .unwrap_or_else(|| DEFAULT_LAYOUT.to_string());
    let background = meta.remove("background");
    let overlay = meta.remove("overlay");

    let mut record = SlideRecord {
        index,
        layout: layout.clone(),
        background,
        overlay,
        attributes: meta,
        ..SlideRecord::default()
    };

    match layout.as_str() {
        "two-cols" => {
            let (left, right) = segments::split_two_columns(chunk);
            record.left = Some(to_html(metadata::strip(&left).trim()));
            record.right = Some(to_html(metadata::strip(&right).trim()));
        }
        "three-cols" => {
            let columns = segments::split_three_columns(chunk);
            record.columns = Some(
                columns
                    .iter()
                    .map(|part| to_html(metadata::strip(part).trim()))
                    .collect(),
            );
        }
        "quote" => {
            let cleaned = metadata::strip(chunk);
            let (quote, author) = segments::split_quote(&cleaned);
            record.quote = Some(quote);
            record.author = author;
        }
        "image-left" | "image-right" | "full-image" => {
            let cleaned = metadata::strip(chunk);
            let (image, rest) = segments::extract_image(&cleaned);
            if let Some(image) = image {
                record.image = Some(image.url);
                record.image_alt = Some(image.alt);
            }
            record.content = to_html(rest.trim());
        }
        _ => {
            record.content = to_html(metadata::strip(chunk).trim());
        }
    }

    record
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Vec<SlideRecord> {
        parse_slides(&Config::default(), input).unwrap()
    }

    #[test]
    fn splits_slides_on_rule_lines() {
        let slides = parse("# Slide One\n---\n<!-- layout: quote -->\nHello world\n\u{2014} Ada");
        assert_eq!(slides.len(), 2);

        assert_eq!(slides[0].layout, "default");
        assert!(slides[0].content.contains("<h1>"));

        assert_eq!(slides[1].layout, "quote");
        assert_eq!(slides[1].quote.as_deref(), Some("Hello world"));
        assert_eq!(slides[1].author.as_deref(), Some("Ada"));
    }

    #[test]
    fn empty_chunks_do_not_consume_indices() {
        let slides = parse("# One\n---\n   \n---\n# Two");
        assert_eq!(slides.len(), 2);
        assert_eq!(slides[0].index, 0);
        assert_eq!(slides[1].index, 1);
    }

    #[test]
    fn three_column_chunk_renders_each_column() {
        let slides = parse("<!-- layout: three-cols -->\nA<!-- column -->B<!-- column -->C");
        assert_eq!(slides.len(), 1);
        let columns = slides[0].columns.as_ref().unwrap();
        assert_eq!(columns.len(), 3);
        assert_eq!(columns[0], "<p>A</p>");
        assert_eq!(columns[1], "<p>B</p>");
        assert_eq!(columns[2], "<p>C</p>");
        assert_eq!(slides[0].content, "");
    }

    #[test]
    fn two_column_chunk_sets_left_and_right_only() {
        let slides = parse("<!-- layout: two-cols -->\nLeft text\n<!-- column -->\nRight text");
        assert_eq!(slides[0].left.as_deref(), Some("<p>Left text</p>"));
        assert_eq!(slides[0].right.as_deref(), Some("<p>Right text</p>"));
        assert_eq!(slides[0].content, "");
    }

    #[test]
    fn image_layout_extracts_reference() {
        let slides = parse("<!-- layout: image-right -->\n![Diagram](arch.png)\nSome prose");
        assert_eq!(slides[0].image.as_deref(), Some("arch.png"));
        assert_eq!(slides[0].image_alt.as_deref(), Some("Diagram"));
        assert!(slides[0].content.contains("Some prose"));
        assert!(!slides[0].content.contains("arch.png"));
    }

    #[test]
    fn directives_feed_dedicated_fields_and_attributes() {
        let slides = parse("<!-- layout: cover -->\n<!-- background: \"#222\" -->\n<!-- speaker: Ada -->\n# Title");
        let slide = &slides[0];
        assert_eq!(slide.layout, "cover");
        assert_eq!(slide.background.as_deref(), Some("#222"));
        assert_eq!(slide.attributes.get("speaker").map(String::as_str), Some("Ada"));
        assert!(!slide.attributes.contains_key("layout"));
    }
}
