// ABOUTME: Parser factory for the deck-slides library
// ABOUTME: Dispatches on the configured source type and loads external documents

use crate::config::{Config, Source};
use crate::errors::{DeckError, Result};
use crate::slide::SlideRecord;
use crate::source::SourceDocument;
use crate::{html, json, markdown};
use log::info;

/// Content parser factory. Resolves the configured source location and
/// dispatches to the matching format parser.
pub struct Parser<'a> {
    config: &'a Config,
}

impl<'a> Parser<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Parse raw input under the configured source type.
    ///
    /// Either every slide of the input is produced or the error propagates;
    /// a deck is never partially populated.
    pub fn parse(&self, raw: &str) -> Result<Vec<SlideRecord>> {
        let records = match self.config.source {
            Source::Html => html::parse_slides(self.config, raw)?,
            Source::Markdown => markdown::parse_slides(self.config, raw)?,
            Source::Json => json::parse_slides(self.config, raw)?,
        };
        info!(
            "Parsed {} slides from {} source",
            records.len(),
            self.config.source.as_str()
        );
        Ok(records)
    }

    /// Load the configured source document and parse it. Inline data takes
    /// priority over an external location.
    pub fn load_and_parse(&self) -> Result<Vec<SlideRecord>> {
        let raw = self.resolve_input()?;
        self.parse(&raw)
    }

    fn resolve_input(&self) -> Result<String> {
        if let Some(data) = &self.config.data {
            return Ok(data.clone());
        }

        let location = match self.config.source {
            Source::Html => {
                return Err(DeckError::ConfigError(
                    "source 'html' requires inline data".to_string(),
                ));
            }
            Source::Markdown => self.config.markdown_url.as_deref(),
            Source::Json => self.config.json_url.as_deref(),
        };

        match location {
            Some(location) => SourceDocument::new(location).content(),
            None => Err(DeckError::ConfigError(format!(
                "source '{}' requires data or a source URL",
                self.config.source.as_str()
            ))),
        }
    }
}
