//! Typed error types for font fetching.
//!
//! Callers at the crate boundary can match on the failure category instead of
//! parsing message strings. A cache miss is never an error; it is reported as
//! `None` by the cache lookup.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout font-fetcher.
pub type Result<T, E = FetchError> = std::result::Result<T, E>;

/// Top-level error type for searching, downloading and caching fonts.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The requested font or style could not be located.
    ///
    /// Raised when every repository was exhausted, when a downloaded archive
    /// holds no font files, or when no style candidate exists.
    #[error("{0}")]
    NotFound(String),

    /// An HTTP request failed or returned a non-success status.
    #[error("HTTP request to '{url}' failed: {message}")]
    Http {
        /// URL that was requested.
        url: String,
        /// Transport error or status description.
        message: String,
    },

    /// A downloaded archive could not be unpacked.
    #[error("Failed to extract archive '{archive}': {message}")]
    Extraction {
        /// Name of the archive (usually the font name plus extension).
        archive: String,
        /// Human-readable extraction error.
        message: String,
    },

    /// A search results page could not be interpreted.
    #[error("Failed to parse search results from {repository}: {message}")]
    Scrape {
        /// Repository whose page failed to parse.
        repository: String,
        /// Human-readable parse error.
        message: String,
    },

    /// A URL was malformed or used a scheme that is not allowed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A file handed to the cache cannot be stored as a font.
    #[error("Not a cacheable font file (missing extension): {}", .0.display())]
    InvalidFontFile(PathBuf),

    /// Underlying filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FetchError {
    /// Build a [`FetchError::NotFound`] from anything printable.
    pub fn not_found(message: impl Into<String>) -> Self {
        FetchError::NotFound(message.into())
    }

    /// Whether this error means "nothing matched" rather than "something broke".
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::NotFound(_))
    }
}
