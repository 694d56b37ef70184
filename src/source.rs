// ABOUTME: Source document loading for the deck-slides library
// ABOUTME: Reads deck sources from local files or remote URLs with retry

use crate::errors::{DeckError, Result};
use log::info;
use reqwest::blocking::Client;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// A deck source that can be either a local file or a remote document.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub location: String,
    pub is_remote: bool,
}

impl SourceDocument {
    /// Create a new SourceDocument from a location string.
    /// The location can be either a local file path or a URL.
    pub fn new(location: &str) -> Self {
        let is_remote = location.starts_with("http://") || location.starts_with("https://");
        Self {
            location: location.to_string(),
            is_remote,
        }
    }

    /// Get the raw content of the source document.
    /// Remote documents are fetched over HTTP; local ones read from disk.
    pub fn content(&self) -> Result<String> {
        if self.is_remote {
            self.fetch_remote_content()
        } else {
            self.read_local_content()
        }
    }

    /// Fetch content from a remote URL with retry capability
    fn fetch_remote_content(&self) -> Result<String> {
        url::Url::parse(&self.location)
            .map_err(|e| DeckError::InvalidSourceUrl(format!("{}: {}", self.location, e)))?;

        info!("Fetching remote source: {}", self.location);

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(DeckError::FetchError)?;

        // Try up to 3 times with increasing backoff
        let mut retry_delay = 1000;
        let mut last_error = None;

        for attempt in 1..=3 {
            match client.get(&self.location).send() {
                Ok(response) => {
                    if response.status().is_success() {
                        return response.text().map_err(DeckError::FetchError);
                    } else {
                        let status = response.status();
                        last_error =
                            Some(DeckError::ContentError(format!("HTTP error: {}", status)));
                    }
                }
                Err(e) => {
                    last_error = Some(DeckError::FetchError(e));
                }
            }

            info!(
                "Fetch attempt {} failed, retrying in {} ms",
                attempt, retry_delay
            );
            std::thread::sleep(Duration::from_millis(retry_delay));
            retry_delay *= 2;
        }

        Err(last_error.unwrap_or_else(|| {
            DeckError::ContentError("Unknown error fetching source".to_string())
        }))
    }

    /// Read content from a local file
    fn read_local_content(&self) -> Result<String> {
        info!("Reading local source: {}", self.location);
        if !Path::new(&self.location).exists() {
            return Err(DeckError::PathNotFoundError(
                Path::new(&self.location).to_path_buf(),
            ));
        }

        fs::read_to_string(&self.location).map_err(DeckError::FileReadError)
    }
}
