// ABOUTME: Canonical slide model shared by all format parsers
// ABOUTME: Defines SlideRecord, the closed Layout enum and the per-layout content view

use crate::errors::{DeckError, Result};
use serde::Serialize;
use std::collections::BTreeMap;

/// The enumerated structural templates a slide can render with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Default,
    Cover,
    Center,
    Section,
    Quote,
    TwoCols,
    ThreeCols,
    ImageLeft,
    ImageRight,
    FullImage,
}

impl Layout {
    /// Resolve an authored layout name. Unknown names are a configuration
    /// error; resolution is deferred to render time so a bad name in one
    /// slide does not abort parsing of the deck.
    pub fn from_name(name: &str) -> Result<Layout> {
        match name {
            "default" => Ok(Layout::Default),
            "cover" => Ok(Layout::Cover),
            "center" => Ok(Layout::Center),
            "section" => Ok(Layout::Section),
            "quote" => Ok(Layout::Quote),
            "two-cols" => Ok(Layout::TwoCols),
            "three-cols" => Ok(Layout::ThreeCols),
            "image-left" => Ok(Layout::ImageLeft),
            "image-right" => Ok(Layout::ImageRight),
            "full-image" => Ok(Layout::FullImage),
            other => Err(DeckError::UnknownLayout(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::Default => "default",
            Layout::Cover => "cover",
            Layout::Center => "center",
            Layout::Section => "section",
            Layout::Quote => "quote",
            Layout::TwoCols => "two-cols",
            Layout::ThreeCols => "three-cols",
            Layout::ImageLeft => "image-left",
            Layout::ImageRight => "image-right",
            Layout::FullImage => "full-image",
        }
    }
}

pub const DEFAULT_LAYOUT: &str = "default";

/// One normalized slide, independent of the source format it was authored in.
///
/// Records are fully formed at parse time and never mutated afterwards. For
/// column layouts `content` is deliberately left empty; the structure lives
/// in `left`/`right` or `columns` instead.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideRecord {
    /// Position in the deck, contiguous from 0 in source order.
    pub index: usize,

    /// Authored layout name; resolved against [`Layout`] at render time.
    pub layout: String,

    /// Primary body markup.
    pub content: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<String>,

    /// Exactly 3 entries when present; missing columns are empty strings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_alt: Option<String>,

    /// Source-specific metadata not otherwise modeled.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

/// Per-layout view of a record carrying exactly the fields that layout
/// renders. Building this is where an unrecognized layout name surfaces.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutContent {
    Default { content: String },
    Cover { content: String },
    Center { content: String },
    Section { content: String },
    Quote { quote: Option<String>, author: Option<String>, content: String },
    TwoCols { left: String, right: String },
    ThreeCols { columns: [String; 3] },
    ImageLeft { image: Option<String>, image_alt: Option<String>, content: String },
    ImageRight { image: Option<String>, image_alt: Option<String>, content: String },
    FullImage { content: String },
}

impl SlideRecord {
    /// Resolve the authored layout name and project the record onto the
    /// fields that layout needs.
    pub fn layout_content(&self) -> Result<LayoutContent> {
        let layout = Layout::from_name(&self.layout)?;
        Ok(match layout {
            Layout::Default => LayoutContent::Default { content: self.content.clone() },
            Layout::Cover => LayoutContent::Cover { content: self.content.clone() },
            Layout::Center => LayoutContent::Center { content: self.content.clone() },
            Layout::Section => LayoutContent::Section { content: self.content.clone() },
            Layout::Quote => LayoutContent::Quote {
                quote: self.quote.clone(),
                author: self.author.clone(),
                content: self.content.clone(),
            },
            Layout::TwoCols => LayoutContent::TwoCols {
                left: self.left.clone().unwrap_or_default(),
                right: self.right.clone().unwrap_or_default(),
            },
            Layout::ThreeCols => {
                let mut columns = [String::new(), String::new(), String::new()];
                if let Some(parsed) = &self.columns {
                    for (slot, value) in columns.iter_mut().zip(parsed.iter()) {
                        *slot = value.clone();
                    }
                }
                LayoutContent::ThreeCols { columns }
            }
            Layout::ImageLeft => LayoutContent::ImageLeft {
                image: self.image.clone(),
                image_alt: self.image_alt.clone(),
                content: self.content.clone(),
            },
            Layout::ImageRight => LayoutContent::ImageRight {
                image: self.image.clone(),
                image_alt: self.image_alt.clone(),
                content: self.content.clone(),
            },
            Layout::FullImage => LayoutContent::FullImage { content: self.content.clone() },
        })
    }
}
