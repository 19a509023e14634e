//! On-disk font cache.
//!
//! The cache is a flat directory of `{name}-{style}.{ext}` files with `ext`
//! either `ttf` or `otf`. There is no index: the directory listing is the
//! index. Entries are never evicted, only replaced by a newer download of the
//! same (name, style, extension).

use std::fs;
use std::path::{Path, PathBuf};

use font_fetcher_repo::fsops::move_file;
use font_fetcher_repo::style::{FONT_EXTENSIONS, is_font_file};
use font_fetcher_repo::{FetchError, Result};

/// Directory name used below the platform cache directory.
pub const CACHE_DIR_NAME: &str = "fontfetcher";

/// Cache file name for a (name, style) pair; the extension is lowercased.
///
/// Name and style are used verbatim, spaces included.
pub fn cached_basename(font_name: &str, style: &str, ext: &str) -> String {
    format!("{}-{}.{}", font_name, style, ext.to_lowercase())
}

/// Maps (font name, style) to font files below a root directory.
#[derive(Debug, Clone)]
pub struct FontCache {
    root: PathBuf,
}

impl FontCache {
    /// Open a cache rooted at `root`, creating the directory if needed.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Open the cache in the platform default location.
    pub fn open_default() -> Result<Self> {
        Self::new(Self::default_dir())
    }

    /// Platform cache location.
    ///
    /// - Windows: `%LOCALAPPDATA%\fontfetcher`
    /// - macOS: `~/Library/Caches/fontfetcher`
    /// - Others: `$XDG_CACHE_HOME/fontfetcher`, usually `~/.cache/fontfetcher`
    pub fn default_dir() -> PathBuf {
        if let Some(cache_dir) = dirs::cache_dir() {
            cache_dir.join(CACHE_DIR_NAME)
        } else if let Some(home_dir) = dirs::home_dir() {
            home_dir.join(".cache").join(CACHE_DIR_NAME)
        } else {
            PathBuf::from(".").join(CACHE_DIR_NAME)
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Find a cached file for (name, style); `.ttf` is preferred over `.otf`.
    pub fn lookup(&self, font_name: &str, style: &str) -> Option<PathBuf> {
        log::debug!(
            "Looking for cached font '{}' with style '{}'",
            font_name,
            style
        );
        FONT_EXTENSIONS.iter().find_map(|ext| {
            let cached_path = self.root.join(cached_basename(font_name, style, ext));
            if cached_path.is_file() {
                log::debug!("Found cached font: {}", cached_path.display());
                Some(cached_path)
            } else {
                None
            }
        })
    }

    /// Store `source` as the cache entry for (name, style) and return its path.
    ///
    /// The file is moved, not copied. An existing entry with the same name,
    /// style and extension is replaced (logged as a warning, not an error).
    pub fn put(&self, font_name: &str, style: &str, source: &Path) -> Result<PathBuf> {
        let ext = source
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty())
            .ok_or_else(|| FetchError::InvalidFontFile(source.to_path_buf()))?;
        let cached_path = self.root.join(cached_basename(font_name, style, ext));

        if source != cached_path {
            log::debug!(
                "Moving downloaded font from {} to {}",
                source.display(),
                cached_path.display()
            );
            if cached_path.exists() {
                log::warn!(
                    "Cached font already exists, removing: {}",
                    cached_path.display()
                );
                fs::remove_file(&cached_path)?;
            }
            move_file(source, &cached_path)?;
        }

        log::debug!("Font cached to: {}", cached_path.display());
        Ok(cached_path)
    }

    /// All cached font files, sorted by file name.
    pub fn entries(&self) -> Result<Vec<PathBuf>> {
        let mut entries: Vec<PathBuf> = fs::read_dir(&self.root)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && is_font_file(path))
            .collect();
        entries.sort();
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cache() -> (TempDir, FontCache) {
        let dir = TempDir::new().unwrap();
        let cache = FontCache::new(dir.path().join("cache")).unwrap();
        (dir, cache)
    }

    #[test]
    fn test_cached_basename_lowercases_extension_only() {
        assert_eq!(
            cached_basename("Open Sans", "Bold Italic", "TTF"),
            "Open Sans-Bold Italic.ttf"
        );
    }

    #[test]
    fn test_new_creates_root() {
        let (_dir, cache) = cache();
        assert!(cache.root().is_dir());
    }

    #[test]
    fn test_lookup_miss_is_none() {
        let (_dir, cache) = cache();
        assert!(cache.lookup("Open Sans", "Regular").is_none());
    }

    #[test]
    fn test_lookup_prefers_ttf_over_otf() {
        let (_dir, cache) = cache();
        fs::write(cache.root().join("Lato-Bold.otf"), b"otf").unwrap();
        assert_eq!(
            cache.lookup("Lato", "Bold"),
            Some(cache.root().join("Lato-Bold.otf"))
        );
        fs::write(cache.root().join("Lato-Bold.ttf"), b"ttf").unwrap();
        assert_eq!(
            cache.lookup("Lato", "Bold"),
            Some(cache.root().join("Lato-Bold.ttf"))
        );
    }

    #[test]
    fn test_lookup_ignores_directories() {
        let (_dir, cache) = cache();
        fs::create_dir(cache.root().join("Lato-Bold.ttf")).unwrap();
        assert!(cache.lookup("Lato", "Bold").is_none());
    }

    #[test]
    fn test_put_then_lookup_returns_same_path() {
        let (dir, cache) = cache();
        let source = dir.path().join("OpenSans-Regular.TTF");
        fs::write(&source, b"font").unwrap();

        let put_path = cache.put("Open Sans", "Regular", &source).unwrap();
        assert_eq!(put_path, cache.root().join("Open Sans-Regular.ttf"));
        assert!(!source.exists());
        assert_eq!(cache.lookup("Open Sans", "Regular"), Some(put_path));
    }

    #[test]
    fn test_put_overwrites_existing_entry() {
        let (dir, cache) = cache();
        let existing = cache.root().join("X-Regular.ttf");
        fs::write(&existing, b"old").unwrap();
        let source = dir.path().join("new.ttf");
        fs::write(&source, b"new").unwrap();

        let put_path = cache.put("X", "Regular", &source).unwrap();
        assert_eq!(put_path, existing);
        assert_eq!(fs::read(&put_path).unwrap(), b"new");
    }

    #[test]
    fn test_put_source_already_in_place() {
        let (_dir, cache) = cache();
        let in_place = cache.root().join("X-Regular.otf");
        fs::write(&in_place, b"font").unwrap();

        let put_path = cache.put("X", "Regular", &in_place).unwrap();
        assert_eq!(put_path, in_place);
        assert_eq!(fs::read(&put_path).unwrap(), b"font");
    }

    #[test]
    fn test_put_rejects_file_without_extension() {
        let (dir, cache) = cache();
        let source = dir.path().join("noext");
        fs::write(&source, b"font").unwrap();
        let err = cache.put("X", "Regular", &source).unwrap_err();
        assert!(matches!(err, FetchError::InvalidFontFile(_)));
        assert!(source.exists());
    }

    #[test]
    fn test_entries_lists_only_fonts() {
        let (_dir, cache) = cache();
        fs::write(cache.root().join("B-Regular.ttf"), b"b").unwrap();
        fs::write(cache.root().join("A-Bold.otf"), b"a").unwrap();
        fs::write(cache.root().join("notes.txt"), b"n").unwrap();
        let entries = cache.entries().unwrap();
        assert_eq!(
            entries,
            vec![
                cache.root().join("A-Bold.otf"),
                cache.root().join("B-Regular.ttf")
            ]
        );
    }

    #[test]
    fn test_default_dir_ends_with_cache_name() {
        assert!(FontCache::default_dir().ends_with(CACHE_DIR_NAME));
    }
}
