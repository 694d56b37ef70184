// ABOUTME: Structured markup parser for the deck-slides library
// ABOUTME: Extracts slides from elements carrying reserved data-deck-* attributes

use crate::config::Config;
use crate::errors::{DeckError, Result};
use crate::segments;
use crate::slide::{SlideRecord, DEFAULT_LAYOUT};
use log::debug;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::BTreeMap;

const ATTR_PREFIX: &str = "data-deck-";

/// A slide element that has been opened but not yet closed.
struct PendingSlide {
    attrs: BTreeMap<String, String>,
    content_start: usize,
    depth: usize,
    columns: Vec<String>,
    pending_column: Option<(usize, usize)>,
}

/// Parse well-formed markup into slide records, one per element carrying the
/// reserved `data-deck-page` attribute, in document order.
///
/// Reserved attributes select layout, background and overlay; every
/// `data-deck-*` attribute is also copied (prefix stripped) into the
/// record's attribute map. Nested `data-deck-column` elements supply column
/// markup for the column layouts.
pub fn parse_slides(_config: &Config, input: &str) -> Result<Vec<SlideRecord>> {
    let mut reader = Reader::from_str(input);
    let mut slides: Vec<SlideRecord> = Vec::new();
    let mut pending: Option<PendingSlide> = None;
    let mut depth: usize = 0;

    loop {
        let event_start = reader.buffer_position();
        match reader.read_event() {
            Err(err) => {
                return Err(DeckError::MarkupError(format!(
                    "{} at byte {}",
                    err,
                    reader.buffer_position()
                )));
            }
            Ok(Event::Eof) => {
                if pending.is_some() {
                    return Err(DeckError::MarkupError(
                        "unclosed slide element at end of input".to_string(),
                    ));
                }
                break;
            }
            Ok(Event::Start(element)) => {
                let attrs = deck_attributes(&element)?;
                match pending.as_mut() {
                    Some(slide) => {
                        if slide.pending_column.is_none() && attrs.contains_key("column") {
                            slide.pending_column = Some((reader.buffer_position(), depth));
                        }
                    }
                    None => {
                        if attrs.contains_key("page") {
                            pending = Some(PendingSlide {
                                attrs,
                                content_start: reader.buffer_position(),
                                depth,
                                columns: Vec::new(),
                                pending_column: None,
                            });
                        }
                    }
                }
                depth += 1;
            }
            Ok(Event::End(_)) => {
                depth = depth.saturating_sub(1);
                let slide_closed = match pending.as_mut() {
                    None => false,
                    Some(slide) => match slide.pending_column {
                        Some((column_start, column_depth)) => {
                            if depth == column_depth {
                                slide
                                    .columns
                                    .push(input[column_start..event_start].trim().to_string());
                                slide.pending_column = None;
                            }
                            false
                        }
                        None => depth == slide.depth,
                    },
                };
                if slide_closed {
                    if let Some(finished) = pending.take() {
                        let content = &input[finished.content_start..event_start];
                        slides.push(build_record(
                            slides.len(),
                            finished.attrs,
                            finished.columns,
                            content,
                        ));
                    }
                }
            }
            Ok(Event::Empty(element)) => {
                let attrs = deck_attributes(&element)?;
                match pending.as_mut() {
                    Some(slide) => {
                        if attrs.contains_key("column") {
                            slide.columns.push(String::new());
                        }
                    }
                    None => {
                        if attrs.contains_key("page") {
                            slides.push(build_record(slides.len(), attrs, Vec::new(), ""));
                        }
                    }
                }
            }
            Ok(_) => {}
        }
    }

    debug!("Parsed {} slides from markup source", slides.len());
    Ok(slides)
}

/// Collect the reserved-namespace attributes of an element, prefix stripped.
fn deck_attributes(element: &BytesStart<'_>) -> Result<BTreeMap<String, String>> {
    let mut attrs = BTreeMap::new();
    for attr in element.attributes() {
        let attr = attr.map_err(|err| DeckError::MarkupError(err.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        if let Some(stripped) = key.strip_prefix(ATTR_PREFIX) {
            let value = attr
                .unescape_value()
                .map_err(|err| DeckError::MarkupError(err.to_string()))?
                .into_owned();
            attrs.insert(stripped.to_string(), value);
        }
    }
    Ok(attrs)
}

fn build_record(
    index: usize,
    attrs: BTreeMap<String, String>,
    columns: Vec<String>,
    content: &str,
) -> SlideRecord {
    let layout = attrs
        .get("layout")
        .cloned()
        .unwrap_or_else(|| DEFAULT_LAYOUT.to_string());

    let mut record = SlideRecord {
        index,
        layout: layout.clone(),
        background: attrs.get("background").cloned(),
        overlay: attrs.get("overlay").cloned(),
        attributes: attrs,
        ..SlideRecord::default()
    };

    let trimmed = content.trim();
    match layout.as_str() {
        "two-cols" => {
            if columns.is_empty() {
                let (left, right) = segments::split_two_columns(trimmed);
                record.left = Some(left.trim().to_string());
                record.right = Some(right.trim().to_string());
            } else {
                let mut parts = columns.into_iter();
                record.left = Some(parts.next().unwrap_or_default());
                record.right = Some(parts.next().unwrap_or_default());
            }
        }
        "three-cols" => {
            let mut padded = [String::new(), String::new(), String::new()];
            if columns.is_empty() {
                for (slot, part) in padded.iter_mut().zip(segments::split_three_columns(trimmed)) {
                    *slot = part.trim().to_string();
                }
            } else {
                for (slot, part) in padded.iter_mut().zip(columns) {
                    *slot = part;
                }
            }
            record.columns = Some(padded.to_vec());
        }
        _ => {
            record.content = trimmed.to_string();
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
    fn pages_become_slides_in_document_order() {
        let input = r##"<div>
            <section data-deck-page="" data-deck-layout="cover" data-deck-background="#000"><h1>Hi</h1></section>
            <section data-deck-page=""><p>Body</p></section>
        </div>"##;
        let slides = parse(input);
        assert_eq!(slides.len(), 2);

        assert_eq!(slides[0].index, 0);
        assert_eq!(slides[0].layout, "cover");
        assert_eq!(slides[0].background.as_deref(), Some("#000"));
        assert_eq!(slides[0].content, "<h1>Hi</h1>");

        assert_eq!(slides[1].index, 1);
        assert_eq!(slides[1].layout, "default");
        assert_eq!(slides[1].content, "<p>Body</p>");
    }

    #[test]
    fn reserved_attributes_land_in_the_attribute_map() {
        let input = r#"<div><section data-deck-page="" data-deck-layout="center" data-deck-notes="remember water"><p>x</p></section></div>"#;
        let slides = parse(input);
        let attrs = &slides[0].attributes;
        assert_eq!(attrs.get("layout").map(String::as_str), Some("center"));
        assert_eq!(attrs.get("notes").map(String::as_str), Some("remember water"));
        assert!(attrs.contains_key("page"));
    }

    #[test]
    fn column_elements_feed_two_column_fields() {
        let input = r#"<div><section data-deck-page="" data-deck-layout="two-cols"><div data-deck-column=""><p>L</p></div><div data-deck-column=""><p>R</p></div></section></div>"#;
        let slides = parse(input);
        assert_eq!(slides[0].left.as_deref(), Some("<p>L</p>"));
        assert_eq!(slides[0].right.as_deref(), Some("<p>R</p>"));
        assert_eq!(slides[0].content, "");
    }

    #[test]
    fn three_column_slides_are_padded_to_three() {
        let input = r#"<div><section data-deck-page="" data-deck-layout="three-cols"><div data-deck-column=""><p>A</p></div><div data-deck-column=""><p>B</p></div></section></div>"#;
        let slides = parse(input);
        let columns = slides[0].columns.as_ref().unwrap();
        assert_eq!(columns.len(), 3);
        assert_eq!(columns[0], "<p>A</p>");
        assert_eq!(columns[1], "<p>B</p>");
        assert_eq!(columns[2], "");
    }

    #[test]
    fn column_layout_without_column_elements_uses_comment_markers() {
        let input = r#"<div><section data-deck-page="" data-deck-layout="two-cols"><p>L</p><!-- column --><p>R</p></section></div>"#;
        let slides = parse(input);
        assert_eq!(slides[0].left.as_deref(), Some("<p>L</p>"));
        assert_eq!(slides[0].right.as_deref(), Some("<p>R</p>"));
    }

    #[test]
    fn markup_without_pages_yields_an_empty_deck() {
        assert!(parse("<div><p>nothing here</p></div>").is_empty());
    }

    #[test]
    fn mismatched_markup_is_a_content_error() {
        let err = parse_slides(&Config::default(), "<div><section data-deck-page=\"\"><p>x</div>")
            .unwrap_err();
        assert!(err.is_content());
    }
}
