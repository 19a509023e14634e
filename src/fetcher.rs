//! Cache-first font fetching across an ordered list of repositories.
//!
//! `FontFetcher` is the top-level policy:
//! 1. Look the (name, style) pair up in the [`FontCache`]
//! 2. On a miss, ask each registered repository in order to search
//! 3. Accept the top-ranked result (exactly named, unless `exact` is off)
//! 4. Download its closest style and store it under the *requested* name
//!
//! Each fetch is stateless. Concurrent fetches of different keys do not
//! interfere; concurrent fetches of the same key may both download, and the
//! last cache write wins.

use std::path::PathBuf;

use font_fetcher_repo::{FetchError, FontRepo, Result};

use crate::cache::FontCache;

/// Failure policy for remote fetches.
///
/// Name acceptance is chosen per call through the `exact` argument of
/// [`FontFetcher::fetch`] and friends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// When a repository accepted the request but its download failed, try
    /// the next repository instead of failing the whole fetch.
    pub continue_on_download_error: bool,
}

/// Where a fetched font came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchSource {
    /// Found in the cache; no network access happened
    CacheHit,
    /// Downloaded from the named repository
    Remote { repository: String },
}

/// A successfully resolved font file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched {
    pub path: PathBuf,
    pub source: FetchSource,
}

/// Resolves font names to cached files, downloading on demand.
pub struct FontFetcher {
    cache: FontCache,
    repos: Vec<Box<dyn FontRepo>>,
    options: FetchOptions,
}

impl FontFetcher {
    /// Create a fetcher over `repos`, whose order is the fallback priority.
    pub fn new(cache: FontCache, repos: Vec<Box<dyn FontRepo>>) -> Self {
        Self {
            cache,
            repos,
            options: FetchOptions::default(),
        }
    }

    /// Fetcher with the default cache location and all built-in repositories.
    pub fn with_default_repos() -> Result<Self> {
        Ok(Self::new(FontCache::open_default()?, default_repos()))
    }

    pub fn with_options(mut self, options: FetchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn cache(&self) -> &FontCache {
        &self.cache
    }

    pub fn options(&self) -> FetchOptions {
        self.options
    }

    /// Names of the registered repositories in priority order.
    pub fn repo_names(&self) -> Vec<&str> {
        self.repos.iter().map(|repo| repo.name()).collect()
    }

    /// Fetch a font from the cache, or from the repositories if not cached.
    pub fn fetch(&self, font_name: &str, style: &str, exact: bool) -> Result<PathBuf> {
        self.fetch_with_outcome(font_name, style, exact)
            .map(|fetched| fetched.path)
    }

    /// Like [`Self::fetch`] but also reports whether the cache was hit.
    pub fn fetch_with_outcome(&self, font_name: &str, style: &str, exact: bool) -> Result<Fetched> {
        if let Some(path) = self.fetch_cached(font_name, style) {
            return Ok(Fetched {
                path,
                source: FetchSource::CacheHit,
            });
        }
        self.fetch_remote_with_outcome(font_name, style, exact)
    }

    /// Cache lookup only; never touches the network.
    pub fn fetch_cached(&self, font_name: &str, style: &str) -> Option<PathBuf> {
        self.cache.lookup(font_name, style)
    }

    /// Skip the cache lookup and go straight to the repositories.
    pub fn fetch_remote(&self, font_name: &str, style: &str, exact: bool) -> Result<PathBuf> {
        self.fetch_remote_with_outcome(font_name, style, exact)
            .map(|fetched| fetched.path)
    }

    fn fetch_remote_with_outcome(
        &self,
        font_name: &str,
        style: &str,
        exact: bool,
    ) -> Result<Fetched> {
        log::debug!("Fetching font '{}' with style '{}'", font_name, style);
        for repo in &self.repos {
            let fonts = match repo.search_font(font_name) {
                Ok(fonts) => fonts,
                Err(e) => {
                    log::warn!(
                        "Search for '{}' failed in repository {}: {}",
                        font_name,
                        repo.name(),
                        e
                    );
                    continue;
                }
            };

            let Some(top) = fonts.first() else {
                log::debug!(
                    "Font '{}' not found in repository: {}",
                    font_name,
                    repo.name()
                );
                continue;
            };
            if exact && !top.name_matches(font_name) {
                log::debug!(
                    "Font '{}' not found exactly in repository: {} (closest: '{}')",
                    font_name,
                    repo.name(),
                    top.name
                );
                continue;
            }

            log::info!(
                "Downloading '{}' (style '{}') from {} for request '{}'",
                top.name,
                style,
                repo.name(),
                font_name
            );
            // Per-attempt staging area; only `put` writes cache entries
            let staging = tempfile::Builder::new()
                .prefix(".download-")
                .tempdir_in(self.cache.root())?;
            let downloaded = match repo.download_font(staging.path(), top, style) {
                Ok(path) => path,
                Err(e) if self.options.continue_on_download_error => {
                    log::warn!(
                        "Download of '{}' from {} failed, trying next repository: {}",
                        top.name,
                        repo.name(),
                        e
                    );
                    continue;
                }
                Err(e) => return Err(e),
            };

            // Keyed by the requested name and style, so later lookups with the
            // caller's spelling hit even when the remote match differed.
            let path = self.cache.put(font_name, style, &downloaded)?;
            return Ok(Fetched {
                path,
                source: FetchSource::Remote {
                    repository: repo.name().to_string(),
                },
            });
        }

        Err(FetchError::not_found(format!(
            "Font '{}' with style '{}' not found in any registered repositories.",
            font_name, style
        )))
    }
}

/// Built-in repositories in priority order.
pub fn default_repos() -> Vec<Box<dyn FontRepo>> {
    vec![Box::new(font_fetcher_repo::Fonts1001Repo::new())]
}
