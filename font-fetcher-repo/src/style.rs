//! Style resolution over extracted font files.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{FetchError, Result};
use crate::similarity::rank_by_similarity;

/// Font file extensions that can be cached (compared case-insensitively).
pub const FONT_EXTENSIONS: &[&str] = &["ttf", "otf"];

/// Whether `path` has a `.ttf` or `.otf` extension, any case.
pub fn is_font_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            FONT_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Recursively collect font files below `dir`, sorted by path.
pub fn find_font_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    collect_font_files(dir, &mut found)?;
    found.sort();
    Ok(found)
}

fn collect_font_files(dir: &Path, found: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_font_files(&path, found)?;
        } else if path.is_file() && is_font_file(&path) {
            found.push(path);
        }
    }
    Ok(())
}

/// Pick the candidate whose file name is closest to `style`.
///
/// Non-font files are ignored. There is no threshold: any non-empty set of
/// font files yields a match. Fails with `NotFound` when no font file is left.
pub fn closest_style_match<'a>(style: &str, candidates: &'a [PathBuf]) -> Result<&'a Path> {
    let fonts: Vec<&Path> = candidates
        .iter()
        .map(PathBuf::as_path)
        .filter(|path| is_font_file(path))
        .collect();
    if fonts.is_empty() {
        return Err(FetchError::not_found(format!(
            "No font files (.ttf/.otf) available to match style '{}'",
            style
        )));
    }

    let ranked = rank_by_similarity(style, fonts, |path| file_name_of(path));
    let chosen = ranked[0];
    log::debug!(
        "Chose '{}' for style '{}' out of: {:?}",
        file_name_of(&chosen),
        style,
        candidates.iter().map(|p| file_name_of(p)).collect::<Vec<_>>()
    );
    Ok(chosen)
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
