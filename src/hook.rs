//! Auto-download hook for a host application's font manager.
//!
//! A host (for example a CAD kernel's font registry) implements
//! [`HostFontManager`]. [`FontHook::install`] wraps it in a session handle:
//! lookups that the host cannot satisfy are fetched through the
//! [`FontFetcher`] (cache first), registered with the host and returned.
//! [`FontHook::uninstall`] consumes the session and hands the host back, so a
//! host can never be hooked twice at the same time.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use font_fetcher_repo::Result;

use crate::fetcher::FontFetcher;

/// Style variants a host asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FontAspect {
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

impl FontAspect {
    /// Style string used for fetching and cache keys.
    pub fn style(&self) -> &'static str {
        match self {
            FontAspect::Regular => "Regular",
            FontAspect::Bold => "Bold",
            FontAspect::Italic => "Italic",
            FontAspect::BoldItalic => "Bold Italic",
        }
    }
}

/// A font as registered with the host: a family name plus one file per aspect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemFont {
    pub name: String,
    paths: BTreeMap<FontAspect, PathBuf>,
}

impl SystemFont {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            paths: BTreeMap::new(),
        }
    }

    pub fn set_font_path(&mut self, aspect: FontAspect, path: impl Into<PathBuf>) {
        self.paths.insert(aspect, path.into());
    }

    pub fn font_path(&self, aspect: FontAspect) -> Option<&Path> {
        self.paths.get(&aspect).map(PathBuf::as_path)
    }
}

/// The host font manager being intercepted.
pub trait HostFontManager {
    /// Strict lookup: no fallbacks or aliases.
    fn find_font(&self, name: &str, aspect: FontAspect) -> Option<SystemFont>;

    /// Make `font` available to later lookups.
    fn register_font(&mut self, font: SystemFont);

    /// Drop every font added since startup and rescan the system fonts.
    fn reset_font_database(&mut self);
}

/// Behavior of an installed hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookOptions {
    /// Requested name → name actually fetched
    pub renames: BTreeMap<String, String>,
    /// Passed to the fetcher as `exact`
    pub exact_match: bool,
}

impl Default for HookOptions {
    fn default() -> Self {
        Self {
            renames: default_renames(),
            exact_match: true,
        }
    }
}

/// Arial is not freely downloadable; DejaVu Sans is the usual stand-in.
pub fn default_renames() -> BTreeMap<String, String> {
    BTreeMap::from([("Arial".to_string(), "DejaVu Sans".to_string())])
}

/// An installed hook; owns the host until [`FontHook::uninstall`].
pub struct FontHook<H: HostFontManager> {
    host: H,
    fetcher: Arc<FontFetcher>,
    options: HookOptions,
}

impl<H: HostFontManager> FontHook<H> {
    /// Start intercepting `host` lookups.
    pub fn install(host: H, fetcher: Arc<FontFetcher>, options: HookOptions) -> Self {
        log::info!("Installed font auto-download hook");
        Self {
            host,
            fetcher,
            options,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn options(&self) -> &HookOptions {
        &self.options
    }

    /// Look a font up, fetching and registering it if the host lacks it.
    ///
    /// The rename table is applied first. Fetch failures are returned to the
    /// caller unchanged.
    pub fn find_font(&mut self, name: &str, aspect: FontAspect) -> Result<SystemFont> {
        let font_name = self
            .options
            .renames
            .get(name)
            .map(String::as_str)
            .unwrap_or(name);
        if font_name != name {
            log::debug!(
                "Trying to find font: {} (renamed from {}), aspect: {:?}",
                font_name,
                name,
                aspect
            );
        } else {
            log::debug!("Trying to find font: {}, aspect: {:?}", font_name, aspect);
        }

        if let Some(font) = self.host.find_font(font_name, aspect) {
            return Ok(font);
        }

        let style = aspect.style();
        let font_path = match self.fetcher.fetch_cached(font_name, style) {
            Some(path) => path,
            None => {
                log::info!(
                    "Font '{}' with style '{}' not found. Attempting to fetch it...",
                    font_name,
                    style
                );
                self.fetcher
                    .fetch_remote(font_name, style, self.options.exact_match)?
            }
        };

        log::debug!("Fetched font: {}. Registering it...", font_path.display());
        let absolute = std::path::absolute(&font_path).unwrap_or(font_path);
        let mut font = SystemFont::new(font_name);
        font.set_font_path(aspect, absolute);
        self.host.register_font(font.clone());
        Ok(font)
    }

    /// Stop intercepting and return the host.
    ///
    /// Added fonts cannot be removed one by one, so the host's font database
    /// is reset.
    pub fn uninstall(mut self) -> H {
        self.host.reset_font_database();
        log::info!("Uninstalled font auto-download hook");
        self.host
    }
}
