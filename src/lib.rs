//! Resolve a font name and style to a local font file.
//!
//! Fonts are looked up in an on-disk cache first. On a miss, the registered
//! remote repositories are searched in priority order; the first acceptable
//! match is downloaded, its closest style extracted, and the file stored in
//! the cache under the name the caller asked for.
//!
//! ```no_run
//! use font_fetcher::FontFetcher;
//!
//! let fetcher = FontFetcher::with_default_repos()?;
//! let path = fetcher.fetch("Open Sans", "Regular", true)?;
//! println!("{}", path.display());
//! # Ok::<(), font_fetcher::FetchError>(())
//! ```
//!
//! Modules:
//! - `cache`: the flat `{name}-{style}.{ext}` cache directory
//! - `fetcher`: cache-first fetching across repositories
//! - `hook`: auto-download hook for a host application's font manager
//! - `config`, `logging`, `cli`: support for the `font-fetcher` binary

pub mod cache;
pub mod cli;
pub mod config;
pub mod fetcher;
pub mod hook;
pub mod logging;

pub use cache::{FontCache, cached_basename};
pub use config::{ConfigError, FetcherConfig};
pub use fetcher::{FetchOptions, FetchSource, Fetched, FontFetcher, default_repos};
pub use font_fetcher_repo::{FetchError, Font, FontRepo, Result};
pub use hook::{FontAspect, FontHook, HookOptions, HostFontManager, SystemFont};
