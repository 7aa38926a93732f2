//! Error types for deck generation.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a presentation.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open, read, or write a file.
    #[error("Failed to read or write file: {0}")]
    Io(#[from] std::io::Error),

    /// The input could not be parsed as JSON.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The deck description is missing required structure.
    #[error("Invalid deck: {0}")]
    InvalidDeck(String),

    /// Failed to assemble the PPTX package (ZIP container).
    #[error("ZIP error: {0}")]
    Zip(String),

    /// Failed to generate part XML for the PPTX package.
    #[error("XML error: {0}")]
    Xml(String),
}
