// ABOUTME: Configuration module for the deck-slides library
// ABOUTME: Holds the presentation settings surface and validates enumerated options

use crate::errors::{DeckError, Result};
use std::collections::HashMap;
use std::str::FromStr;

/// Which authoring format the deck is parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Source {
    #[default]
    Html,
    Markdown,
    Json,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Html => "html",
            Source::Markdown => "markdown",
            Source::Json => "json",
        }
    }
}

impl FromStr for Source {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "html" => Ok(Source::Html),
            "markdown" => Ok(Source::Markdown),
            "json" => Ok(Source::Json),
            other => Err(DeckError::UnknownSource(other.to_string())),
        }
    }
}

/// Visual strategy used to hand off between two slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionType {
    None,
    #[default]
    Slide,
    Fade,
    Zoom,
    Flip,
}

impl TransitionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionType::None => "none",
            TransitionType::Slide => "slide",
            TransitionType::Fade => "fade",
            TransitionType::Zoom => "zoom",
            TransitionType::Flip => "flip",
        }
    }
}

impl FromStr for TransitionType {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" => Ok(TransitionType::None),
            "slide" => Ok(TransitionType::Slide),
            "fade" => Ok(TransitionType::Fade),
            "zoom" => Ok(TransitionType::Zoom),
            "flip" => Ok(TransitionType::Flip),
            other => Err(DeckError::ConfigError(format!(
                "Invalid transition '{}'. Must be one of: slide, fade, zoom, flip, none",
                other
            ))),
        }
    }
}

/// Transition duration, either a named preset or explicit milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionSpeed {
    Fast,
    Normal,
    Slow,
    Millis(u64),
}

impl Default for TransitionSpeed {
    fn default() -> Self {
        TransitionSpeed::Normal
    }
}

impl TransitionSpeed {
    /// Preset values match the stylesheet timings: fast 300ms, normal 500ms,
    /// slow 800ms.
    pub fn as_millis(&self) -> u64 {
        match self {
            TransitionSpeed::Fast => 300,
            TransitionSpeed::Normal => 500,
            TransitionSpeed::Slow => 800,
            TransitionSpeed::Millis(ms) => *ms,
        }
    }
}

impl FromStr for TransitionSpeed {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "fast" => Ok(TransitionSpeed::Fast),
            "normal" => Ok(TransitionSpeed::Normal),
            "slow" => Ok(TransitionSpeed::Slow),
            other => match other.parse::<u64>() {
                Ok(ms) => Ok(TransitionSpeed::Millis(ms)),
                Err(_) => Err(DeckError::ConfigError(format!(
                    "Invalid transition speed '{}'. Must be one of: fast, normal, slow, or milliseconds",
                    other
                ))),
            },
        }
    }
}

/// Presentation settings consumed by the parsing pipeline and the
/// navigation/transition engines.
#[derive(Debug, Clone)]
pub struct Config {
    /// Source type the deck is authored in.
    pub source: Source,

    /// Inline source data. Takes priority over the URL fields.
    pub data: Option<String>,

    /// Local path or http(s) URL of an external Markdown document.
    pub markdown_url: Option<String>,

    /// Local path or http(s) URL of an external JSON document.
    pub json_url: Option<String>,

    /// Wrap around at the deck boundaries.
    pub loop_slides: bool,

    /// Autoplay interval in milliseconds; 0 disables autoplay.
    pub auto_slide: u64,

    /// Transition strategy between slides.
    pub transition: TransitionType,

    /// Transition duration.
    pub transition_speed: TransitionSpeed,

    /// Keyboard shortcut overrides, key name to action name.
    pub keyboard_shortcuts: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: Source::Html,
            data: None,
            markdown_url: None,
            json_url: None,
            loop_slides: false,
            auto_slide: 0,
            transition: TransitionType::Slide,
            transition_speed: TransitionSpeed::Normal,
            keyboard_shortcuts: HashMap::new(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check cross-field constraints. Enumerated options are already
    /// well-formed by construction; this validates what the type system
    /// cannot: that the selected source has somewhere to read from.
    pub fn validate(&self) -> Result<()> {
        match self.source {
            Source::Html => {
                if self.data.is_none() {
                    return Err(DeckError::ConfigError(
                        "source 'html' requires inline data".to_string(),
                    ));
                }
            }
            Source::Markdown => {
                if self.data.is_none() && self.markdown_url.is_none() {
                    return Err(DeckError::ConfigError(
                        "source 'markdown' requires data or markdownUrl".to_string(),
                    ));
                }
            }
            Source::Json => {
                if self.data.is_none() && self.json_url.is_none() {
                    return Err(DeckError::ConfigError(
                        "source 'json' requires data or jsonUrl".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }
}
