//! Repository backed by 1001fonts.com.
//!
//! Search scrapes the HTML results page; every result links to a zip holding
//! the whole family, which is handed to [`download_font_url`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use scraper::{Html, Selector};
use ureq::Agent;
use url::Url;

use crate::download::download_font_url;
use crate::error::{FetchError, Result};
use crate::rank::sort_fonts_by_name;
use crate::repo::{Font, FontRepo};

/// Search page of 1001fonts.com.
pub const SEARCH_URL: &str = "https://www.1001fonts.com/search.html";

/// One page of results is enough for ranking.
const ITEMS_PER_PAGE: &str = "50";

const REPO_NAME: &str = "1001fonts";

/// Fetches fonts from 1001fonts.com.
pub struct Fonts1001Repo {
    agent: Agent,
    search_url: String,
}

impl Default for Fonts1001Repo {
    fn default() -> Self {
        Self::new()
    }
}

impl Fonts1001Repo {
    /// Repository using the default HTTP timeout.
    pub fn new() -> Self {
        Self::with_timeout(crate::http::DEFAULT_HTTP_TIMEOUT)
    }

    /// Repository whose requests time out after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            agent: crate::http::agent(timeout),
            search_url: SEARCH_URL.to_string(),
        }
    }

    fn search_page_url(&self, font_name: &str) -> Result<Url> {
        Url::parse_with_params(
            &self.search_url,
            &[("search", font_name), ("items", ITEMS_PER_PAGE)],
        )
        .map_err(|e| FetchError::InvalidUrl(format!("'{}': {}", self.search_url, e)))
    }
}

/// Extract the fonts listed on a search results page.
///
/// The name is the first non-empty text of `.font-title` (the element also
/// contains unrelated children); the download link is `a.btn-download`,
/// resolved against `page_url`. Entries lacking either are skipped.
pub fn parse_search_results(html: &str, page_url: &Url) -> Result<Vec<Font>> {
    let item_sel = selector(".font-list-item")?;
    let title_sel = selector(".font-title")?;
    let download_sel = selector("a.btn-download")?;

    let document = Html::parse_document(html);
    let mut fonts = Vec::new();
    for element in document.select(&item_sel) {
        let name = element
            .select(&title_sel)
            .next()
            .and_then(|title| {
                title
                    .text()
                    .map(str::trim)
                    .find(|text| !text.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_default();
        if name.is_empty() {
            log::info!("Skipping empty font name in search results");
            continue;
        }

        let href = element
            .select(&download_sel)
            .next()
            .and_then(|link| link.value().attr("href"))
            .filter(|href| !href.trim().is_empty());
        let Some(url) = href.and_then(|href| page_url.join(href).ok()) else {
            log::info!("Skipping '{}' as no download URL was found", name);
            continue;
        };

        fonts.push(Font::new(name).with_download_url(url.to_string()));
    }
    Ok(fonts)
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| FetchError::Scrape {
        repository: REPO_NAME.to_string(),
        message: format!("invalid selector '{}': {:?}", css, e),
    })
}

impl FontRepo for Fonts1001Repo {
    fn name(&self) -> &str {
        REPO_NAME
    }

    fn search_font(&self, font_name: &str) -> Result<Vec<Font>> {
        let url = self.search_page_url(font_name)?;
        let html = crate::http::get_text(&self.agent, url.as_str())?;
        let fonts = parse_search_results(&html, &url)?;
        log::debug!(
            "{} returned {} results for '{}'",
            REPO_NAME,
            fonts.len(),
            font_name
        );
        Ok(sort_fonts_by_name(font_name, fonts))
    }

    fn download_font(&self, out_dir: &Path, font: &Font, style: &str) -> Result<PathBuf> {
        let url = font.download_url.as_deref().ok_or_else(|| {
            FetchError::not_found(format!(
                "Font '{}' has no download URL in {}",
                font.name, REPO_NAME
            ))
        })?;
        download_font_url(&self.agent, out_dir, font, style, url)
    }
}
