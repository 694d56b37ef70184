// ABOUTME: Slide renderer for the deck-slides library
// ABOUTME: Maps slide records to a layout-tagged structural tree and serializes it to HTML

use crate::errors::Result;
use crate::slide::{Layout, LayoutContent, SlideRecord};
use crate::utils::escape_html;
use log::info;

/// One named region of a rendered slide, carrying its inner markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub name: &'static str,
    pub markup: String,
}

impl Region {
    fn new(name: &'static str, markup: impl Into<String>) -> Self {
        Self {
            name,
            markup: markup.into(),
        }
    }
}

/// Structural representation of one slide: a root node tagged with the
/// resolved layout and the regions that layout populates.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSlide {
    pub index: usize,
    pub layout: Layout,
    pub background: Option<String>,
    pub overlay: Option<String>,
    pub regions: Vec<Region>,
}

/// Render one slide record. This is a pure mapping; resolving the authored
/// layout name here is where an unknown layout surfaces as a configuration
/// error.
pub fn render_slide(record: &SlideRecord) -> Result<RenderedSlide> {
    let content = record.layout_content()?;

    let regions = match content {
        LayoutContent::Default { content }
        | LayoutContent::Cover { content }
        | LayoutContent::Center { content }
        | LayoutContent::Section { content } => vec![Region::new("content", content)],
        LayoutContent::FullImage { content } => {
            if content.trim().is_empty() {
                Vec::new()
            } else {
                vec![Region::new("overlay-text", content)]
            }
        }
        LayoutContent::Quote {
            quote,
            author,
            content,
        } => match quote {
            Some(quote) => {
                let mut regions = vec![Region::new(
                    "quote-text",
                    format!("<blockquote>{}</blockquote>", escape_html(&quote)),
                )];
                if let Some(author) = author {
                    regions.push(Region::new(
                        "quote-author",
                        format!("<cite>&mdash; {}</cite>", escape_html(&author)),
                    ));
                }
                regions
            }
            None => vec![Region::new("content", content)],
        },
        LayoutContent::TwoCols { left, right } => vec![
            Region::new("col-left", left),
            Region::new("col-right", right),
        ],
        LayoutContent::ThreeCols { columns } => {
            let [first, second, third] = columns;
            vec![
                Region::new("col-1", first),
                Region::new("col-2", second),
                Region::new("col-3", third),
            ]
        }
        LayoutContent::ImageLeft {
            image,
            image_alt,
            content,
        }
        | LayoutContent::ImageRight {
            image,
            image_alt,
            content,
        } => {
            let mut regions = Vec::new();
            if let Some(image) = image {
                regions.push(Region::new(
                    "image",
                    format!(
                        "<img src=\"{}\" alt=\"{}\">",
                        escape_html(&image),
                        escape_html(image_alt.as_deref().unwrap_or(""))
                    ),
                ));
            }
            regions.push(Region::new("text", content));
            regions
        }
    };

    Ok(RenderedSlide {
        index: record.index,
        layout: Layout::from_name(&record.layout)?,
        background: record.background.clone(),
        overlay: record.overlay.clone(),
        regions,
    })
}

impl RenderedSlide {
    /// Serialize the slide to an HTML section element.
    pub fn to_html(&self) -> String {
        let mut html = format!(
            "<section class=\"deck-slide\" data-index=\"{}\" data-layout=\"{}\">\n",
            self.index,
            self.layout.as_str()
        );

        if let Some(background) = &self.background {
            html.push_str(&format!(
                "  <div class=\"deck-slide-background\" style=\"{}\"></div>\n",
                background_style(background)
            ));
        }

        html.push_str(&format!(
            "  <div class=\"deck-slide-content deck-layout-{}\">\n",
            self.layout.as_str()
        ));
        for region in &self.regions {
            html.push_str(&format!(
                "    <div class=\"deck-{}\">{}</div>\n",
                region.name, region.markup
            ));
        }
        html.push_str("  </div>\n</section>");
        html
    }
}

/// Backgrounds are either URL-ish (rendered as an image) or a raw CSS value
/// such as a color or gradient.
fn background_style(background: &str) -> String {
    let url_like = background.starts_with("http://")
        || background.starts_with("https://")
        || background.starts_with("./")
        || background.starts_with("../")
        || background.starts_with('/');
    if url_like {
        format!("background-image: url({})", escape_html(background))
    } else {
        format!("background: {}", escape_html(background))
    }
}

/// Assemble a standalone HTML document for a whole deck.
pub fn render_document(title: &str, slides: &[SlideRecord]) -> Result<String> {
    info!("Rendering document with {} slides", slides.len());

    let mut html = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    html.push_str(&format!("<title>{}</title>\n", escape_html(title)));
    html.push_str("</head>\n<body>\n<div class=\"deck-wrapper\">\n<div class=\"deck-slides\">\n");

    for record in slides {
        let rendered = render_slide(record)?;
        html.push_str(&rendered.to_html());
        html.push('\n');
    }

    html.push_str("</div>\n</div>\n</body>\n</html>");
    Ok(html)
}
