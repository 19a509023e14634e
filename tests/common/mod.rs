//! Shared integration test helpers for font-fetcher.
//!
//! Include with `mod common;` at the top of each test file. The
//! `#[allow(dead_code)]` suppresses warnings when a file uses only a subset.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use font_fetcher::{FetchError, Font, FontCache, FontFetcher, FontRepo, Result};
use font_fetcher_repo::archive::ArchiveKind;
use font_fetcher_repo::download::install_from_archive;
use font_fetcher_repo::sort_fonts_by_name;
use tempfile::TempDir;

/// Build an in-memory zip holding `entries` (path, contents).
pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, data) in entries {
        writer
            .start_file(*name, zip::write::SimpleFileOptions::default())
            .expect("start zip entry");
        writer.write_all(data).expect("write zip entry");
    }
    writer.finish().expect("finish zip").into_inner()
}

/// A family archive with Regular, Bold and Italic styles plus a license file.
pub fn family_archive(file_prefix: &str) -> Vec<u8> {
    let regular = format!("{file_prefix}/{file_prefix}-Regular.ttf");
    let bold = format!("{file_prefix}/{file_prefix}-Bold.ttf");
    let italic = format!("{file_prefix}/{file_prefix}-Italic.ttf");
    zip_bytes(&[
        (regular.as_str(), b"regular"),
        (bold.as_str(), b"bold"),
        (italic.as_str(), b"italic"),
        ("OFL.txt", b"license"),
    ])
}

/// In-process repository serving fixed search results and one archive.
///
/// Counts calls so tests can assert that the cache short-circuits the network.
pub struct MockRepo {
    pub name: String,
    pub results: Vec<Font>,
    pub archive: Vec<u8>,
    pub fail_search: bool,
    pub fail_download: bool,
    pub searches: AtomicUsize,
    pub downloads: AtomicUsize,
}

impl MockRepo {
    pub fn new(name: &str, results: &[&str], archive: Vec<u8>) -> Self {
        Self {
            name: name.to_string(),
            results: results.iter().map(|n| Font::new(*n)).collect(),
            archive,
            fail_search: false,
            fail_download: false,
            searches: AtomicUsize::new(0),
            downloads: AtomicUsize::new(0),
        }
    }

    pub fn search_count(&self) -> usize {
        self.searches.load(Ordering::SeqCst)
    }

    pub fn download_count(&self) -> usize {
        self.downloads.load(Ordering::SeqCst)
    }
}

impl FontRepo for MockRepo {
    fn name(&self) -> &str {
        &self.name
    }

    fn search_font(&self, font_name: &str) -> Result<Vec<Font>> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        if self.fail_search {
            return Err(FetchError::Http {
                url: format!("mock://{}/search", self.name),
                message: "server responded with status 503".to_string(),
            });
        }
        Ok(sort_fonts_by_name(font_name, self.results.clone()))
    }

    fn download_font(&self, out_dir: &Path, font: &Font, style: &str) -> Result<PathBuf> {
        self.downloads.fetch_add(1, Ordering::SeqCst);
        if self.fail_download {
            return Err(FetchError::Http {
                url: format!("mock://{}/download", self.name),
                message: "server responded with status 404".to_string(),
            });
        }
        install_from_archive(&self.archive, ArchiveKind::Zip, out_dir, font, style)
    }
}

/// Lets a test keep a handle on a repository owned by the fetcher.
pub struct SharedRepo(pub std::sync::Arc<MockRepo>);

impl FontRepo for SharedRepo {
    fn name(&self) -> &str {
        self.0.name()
    }

    fn search_font(&self, font_name: &str) -> Result<Vec<Font>> {
        self.0.search_font(font_name)
    }

    fn download_font(&self, out_dir: &Path, font: &Font, style: &str) -> Result<PathBuf> {
        self.0.download_font(out_dir, font, style)
    }
}

/// A fetcher over `repos` with a fresh cache in a temp dir.
///
/// Keep the `TempDir` alive for the duration of the test.
pub fn fetcher_with(repos: Vec<std::sync::Arc<MockRepo>>) -> (TempDir, FontFetcher) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let cache = FontCache::new(temp_dir.path().join("cache")).expect("open cache");
    let repos: Vec<Box<dyn FontRepo>> = repos
        .into_iter()
        .map(|repo| Box::new(SharedRepo(repo)) as Box<dyn FontRepo>)
        .collect();
    (temp_dir, FontFetcher::new(cache, repos))
}

/// File names currently in `dir`, sorted.
pub fn dir_listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("read dir")
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
