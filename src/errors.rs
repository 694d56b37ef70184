// ABOUTME: Error types for the deck-slides library
// ABOUTME: Provides structured error handling for configuration, content and transport failures

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unknown source type: {0}")]
    UnknownSource(String),

    #[error("Unknown layout: {0}")]
    UnknownLayout(String),

    #[error("Content error: {0}")]
    ContentError(String),

    #[error("Malformed JSON document: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Malformed markup: {0}")]
    MarkupError(String),

    #[error("Failed to fetch remote source: {0}")]
    FetchError(#[from] reqwest::Error),

    #[error("Failed to read file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Path not found: {0}")]
    PathNotFoundError(PathBuf),

    #[error("Invalid source URL: {0}")]
    InvalidSourceUrl(String),
}

impl DeckError {
    /// True when the caller supplied an invalid option, source type or
    /// layout name rather than a broken document.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            DeckError::ConfigError(_)
                | DeckError::UnknownSource(_)
                | DeckError::UnknownLayout(_)
                | DeckError::InvalidSourceUrl(_)
        )
    }

    /// True when the source document itself is malformed or incomplete.
    pub fn is_content(&self) -> bool {
        matches!(
            self,
            DeckError::ContentError(_) | DeckError::JsonError(_) | DeckError::MarkupError(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, DeckError>;
