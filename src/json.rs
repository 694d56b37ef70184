// ABOUTME: JSON parser for the deck-slides library
// ABOUTME: Converts a slides document into SlideRecords through a typed content-item renderer

use crate::config::Config;
use crate::errors::{DeckError, Result};
use crate::slide::{SlideRecord, DEFAULT_LAYOUT};
use crate::utils::escape_html;
use log::debug;
use serde_json::Value;

/// Object keys with dedicated record fields; everything else is copied into
/// the record's attribute map.
const RESERVED_KEYS: &[&str] = &[
    "layout", "background", "overlay", "content", "left", "right", "col1", "col2", "col3",
    "quote", "author", "image", "imageAlt",
];

/// Parse a JSON document with a top-level `slides` array into slide records.
pub fn parse_slides(_config: &Config, input: &str) -> Result<Vec<SlideRecord>> {
    let doc: Value = serde_json::from_str(input)?;

    let slides = doc
        .get("slides")
        .ok_or_else(|| DeckError::ContentError("missing top-level 'slides' array".to_string()))?
        .as_array()
        .ok_or_else(|| DeckError::ContentError("'slides' must be an array".to_string()))?;

    let records = slides
        .iter()
        .enumerate()
        .map(|(index, value)| build_record(index, value))
        .collect::<Result<Vec<_>>>()?;

    debug!("Parsed {} slides from JSON source", records.len());
    Ok(records)
}

fn build_record(index: usize, value: &Value) -> Result<SlideRecord> {
    let object = value
        .as_object()
        .ok_or_else(|| DeckError::ContentError(format!("slide {} must be an object", index)))?;

    let layout = match object.get("layout") {
        None => DEFAULT_LAYOUT.to_string(),
        Some(value) => string_field(index, "layout", value)?,
    };

    let mut record = SlideRecord {
        index,
        layout: layout.clone(),
        ..SlideRecord::default()
    };

    if let Some(value) = object.get("background") {
        record.background = Some(string_field(index, "background", value)?);
    }
    if let Some(value) = object.get("overlay") {
        record.overlay = Some(string_field(index, "overlay", value)?);
    }
    if let Some(value) = object.get("quote") {
        record.quote = Some(string_field(index, "quote", value)?);
    }
    if let Some(value) = object.get("author") {
        record.author = Some(string_field(index, "author", value)?);
    }
    if let Some(value) = object.get("image") {
        record.image = Some(string_field(index, "image", value)?);
    }
    if let Some(value) = object.get("imageAlt") {
        record.image_alt = Some(string_field(index, "imageAlt", value)?);
    }

    match layout.as_str() {
        "two-cols" => {
            record.left = render_optional(index, object.get("left"))?;
            record.right = render_optional(index, object.get("right"))?;
        }
        "three-cols" => {
            let mut columns = Vec::with_capacity(3);
            for key in ["col1", "col2", "col3"] {
                columns.push(render_optional(index, object.get(key))?.unwrap_or_default());
            }
            record.columns = Some(columns);
        }
        _ => {
            if let Some(value) = object.get("content") {
                record.content = render_content(index, value)?;
            }
        }
    }

    for (key, value) in object {
        if RESERVED_KEYS.contains(&key.as_str()) {
            continue;
        }
        let rendered = match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        record.attributes.insert(key.clone(), rendered);
    }

    Ok(record)
}

fn string_field(index: usize, key: &str, value: &Value) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| DeckError::ContentError(format!("slide {}: '{}' must be a string", index, key)))
}

fn render_optional(index: usize, value: Option<&Value>) -> Result<Option<String>> {
    value.map(|value| render_content(index, value)).transpose()
}

/// Render a content value: a bare string, one content item, or an ordered
/// list of items.
fn render_content(index: usize, value: &Value) -> Result<String> {
    match value {
        Value::String(text) => Ok(paragraph(text)),
        Value::Object(_) => render_item(index, value),
        Value::Array(items) => {
            let rendered = items
                .iter()
                .map(|item| render_item(index, item))
                .collect::<Result<Vec<_>>>()?;
            Ok(rendered.join("\n"))
        }
        other => Err(DeckError::ContentError(format!(
            "slide {}: unsupported content value {}",
            index, other
        ))),
    }
}

fn render_item(index: usize, value: &Value) -> Result<String> {
    if let Value::String(text) = value {
        return Ok(paragraph(text));
    }

    let object = value.as_object().ok_or_else(|| {
        DeckError::ContentError(format!("slide {}: content items must be objects or strings", index))
    })?;
    let kind = object
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| DeckError::ContentError(format!("slide {}: content item missing 'type'", index)))?;

    match kind {
        "heading" => {
            let level = object
                .get("level")
                .and_then(Value::as_u64)
                .unwrap_or(2)
                .clamp(1, 6);
            let text = item_text(index, object, "text")?;
            Ok(format!("<h{level}>{}</h{level}>", escape_html(&text)))
        }
        "paragraph" => {
            let text = item_text(index, object, "text")?;
            Ok(paragraph(&text))
        }
        "list" => {
            let ordered = object.get("ordered").and_then(Value::as_bool).unwrap_or(false);
            let items = object
                .get("items")
                .and_then(Value::as_array)
                .ok_or_else(|| {
                    DeckError::ContentError(format!("slide {}: list item missing 'items'", index))
                })?;
            let tag = if ordered { "ol" } else { "ul" };
            let mut out = format!("<{}>", tag);
            for entry in items {
                let text = entry.as_str().ok_or_else(|| {
                    DeckError::ContentError(format!("slide {}: list entries must be strings", index))
                })?;
                out.push_str(&format!("<li>{}</li>", escape_html(text)));
            }
            out.push_str(&format!("</{}>", tag));
            Ok(out)
        }
        "code" => {
            let code = item_text(index, object, "code")?;
            let language = object.get("language").and_then(Value::as_str).unwrap_or("");
            if language.is_empty() {
                Ok(format!("<pre><code>{}</code></pre>", escape_html(&code)))
            } else {
                Ok(format!(
                    "<pre><code class=\"language-{}\">{}</code></pre>",
                    escape_html(language),
                    escape_html(&code)
                ))
            }
        }
        "image" => {
            let src = item_text(index, object, "src")?;
            let alt = object.get("alt").and_then(Value::as_str).unwrap_or("");
            Ok(format!(
                "<img src=\"{}\" alt=\"{}\">",
                escape_html(&src),
                escape_html(alt)
            ))
        }
        "video" => {
            let src = item_text(index, object, "src")?;
            Ok(format!("<video src=\"{}\" controls></video>", escape_html(&src)))
        }
        "table" => render_table(index, object),
        other => Err(DeckError::ContentError(format!(
            "slide {}: unsupported content item type '{}'",
            index, other
        ))),
    }
}

fn render_table(index: usize, object: &serde_json::Map<String, Value>) -> Result<String> {
    let mut out = String::from("<table>");

    if let Some(headers) = object.get("headers").and_then(Value::as_array) {
        out.push_str("<thead><tr>");
        for header in headers {
            let text = header.as_str().ok_or_else(|| {
                DeckError::ContentError(format!("slide {}: table headers must be strings", index))
            })?;
            out.push_str(&format!("<th>{}</th>", escape_html(text)));
        }
        out.push_str("</tr></thead>");
    }

    let rows = object
        .get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| DeckError::ContentError(format!("slide {}: table missing 'rows'", index)))?;
    out.push_str("<tbody>");
    for row in rows {
        let cells = row.as_array().ok_or_else(|| {
            DeckError::ContentError(format!("slide {}: table rows must be arrays", index))
        })?;
        out.push_str("<tr>");
        for cell in cells {
            let text = match cell {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            };
            out.push_str(&format!("<td>{}</td>", escape_html(&text)));
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");
    Ok(out)
}

fn item_text(index: usize, object: &serde_json::Map<String, Value>, key: &str) -> Result<String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            DeckError::ContentError(format!("slide {}: content item missing '{}'", index, key))
        })
}

fn paragraph(text: &str) -> String {
    format!("<p>{}</p>", escape_html(text))
}
