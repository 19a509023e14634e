//! Search results and the repository capability contract.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// A font as reported by a remote repository's search.
///
/// Names are compared case-insensitively everywhere. A `Font` is only meant to
/// be handed straight back to the repository that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Font {
    /// Full font name as the repository reports it
    pub name: String,

    /// Available styles, `None` while not yet known
    pub styles: Option<Vec<String>>,

    /// Repository-specific locator needed by `download_font`
    pub download_url: Option<String>,
}

impl Font {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            styles: None,
            download_url: None,
        }
    }

    pub fn with_download_url(mut self, url: impl Into<String>) -> Self {
        self.download_url = Some(url.into());
        self
    }

    pub fn with_styles<I, S>(mut self, styles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.styles = Some(styles.into_iter().map(Into::into).collect());
        self
    }

    /// Case-insensitive name comparison.
    pub fn name_matches(&self, wanted: &str) -> bool {
        self.name.to_lowercase() == wanted.to_lowercase()
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A source from which fonts can be searched and downloaded.
///
/// Implementations are registered once in an ordered list; the order is the
/// fallback priority. Both operations block on I/O.
pub trait FontRepo: Send + Sync {
    /// Short repository name for logs and error messages.
    fn name(&self) -> &str;

    /// Search for fonts with names similar to `font_name`.
    ///
    /// The returned list must already be ranked, closest name first
    /// (see [`crate::rank::sort_fonts_by_name`]).
    fn search_font(&self, font_name: &str) -> Result<Vec<Font>>;

    /// Download the style of `font` closest to `style` into `out_dir`.
    ///
    /// Styles are fuzzy matched; the path of the chosen file inside `out_dir`
    /// is returned. Fails with `NotFound` if no font file can be obtained.
    fn download_font(&self, out_dir: &Path, font: &Font, style: &str) -> Result<PathBuf>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_builder() {
        let font = Font::new("Open Sans")
            .with_download_url("https://example.com/open-sans.zip")
            .with_styles(["Regular", "Bold"]);
        assert_eq!(font.name, "Open Sans");
        assert_eq!(
            font.download_url.as_deref(),
            Some("https://example.com/open-sans.zip")
        );
        assert_eq!(
            font.styles,
            Some(vec!["Regular".to_string(), "Bold".to_string()])
        );
    }

    #[test]
    fn test_name_matches_ignores_case() {
        let font = Font::new("Open Sans");
        assert!(font.name_matches("open sans"));
        assert!(font.name_matches("OPEN SANS"));
        assert!(!font.name_matches("Open Sans Condensed"));
    }

    #[test]
    fn test_styles_unknown_by_default() {
        assert!(Font::new("Poppins").styles.is_none());
        assert_eq!(Font::new("Poppins").to_string(), "Poppins");
    }
}
