//! Archive-based font download shared by repositories.
//!
//! Many repositories offer one compressed file per family holding every
//! style. [`install_from_archive`] turns such an archive into the single
//! best-matching font file; [`download_font_url`] adds the HTTP step.

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use ureq::Agent;

use crate::archive::{ArchiveKind, extract_archive};
use crate::error::{FetchError, Result};
use crate::fsops::move_file;
use crate::repo::Font;
use crate::style::{closest_style_match, find_font_files};

/// Download the archive at `url` and install the style of `font` closest to
/// `style` into `out_dir`.
pub fn download_font_url(
    agent: &Agent,
    out_dir: &Path,
    font: &Font,
    style: &str,
    url: &str,
) -> Result<PathBuf> {
    let download = crate::http::download(agent, url)?;
    let kind = ArchiveKind::from_mime(download.content_type.as_deref());
    log::debug!(
        "Downloaded font '{}' ({} bytes, MIME type {:?}) from {}",
        font.name,
        download.bytes.len(),
        download.content_type,
        url
    );
    install_from_archive(&download.bytes, kind, out_dir, font, style)
}

/// Extract `data` into a scoped temporary directory, pick the file closest to
/// `style` and move it into `out_dir`.
///
/// The temporary directory is removed on every exit path, including
/// extraction failures and archives without font files.
pub fn install_from_archive(
    data: &[u8],
    kind: ArchiveKind,
    out_dir: &Path,
    font: &Font,
    style: &str,
) -> Result<PathBuf> {
    let tmp_dir = TempDir::new()?;
    let archive_name = format!("{}.{}", font.name, kind.extension());

    log::debug!("Extracting '{}' and looking for style '{}'", archive_name, style);
    extract_archive(data, kind, tmp_dir.path(), &archive_name)?;

    let font_files = find_font_files(tmp_dir.path())?;
    if font_files.is_empty() {
        return Err(FetchError::not_found(format!(
            "No font files found in the downloaded archive for '{}'.",
            font.name
        )));
    }
    let matching_file = closest_style_match(style, &font_files)?;

    let file_name = matching_file
        .file_name()
        .ok_or_else(|| FetchError::InvalidFontFile(matching_file.to_path_buf()))?;
    std::fs::create_dir_all(out_dir)?;
    let out_path = out_dir.join(file_name);
    move_file(matching_file, &out_path)?;
    Ok(out_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    fn family_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, data) in entries {
            writer
                .start_file(*name, zip::write::SimpleFileOptions::default())
                .unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_install_picks_requested_style() {
        let out = TempDir::new().unwrap();
        let data = family_zip(&[
            ("static/Poppins-Regular.ttf", b"regular"),
            ("static/Poppins-Bold.ttf", b"bold"),
            ("static/Poppins-Italic.ttf", b"italic"),
            ("OFL.txt", b"license"),
        ]);
        let font = Font::new("Poppins");

        let path =
            install_from_archive(&data, ArchiveKind::Zip, out.path(), &font, "Bold").unwrap();
        assert_eq!(path, out.path().join("Poppins-Bold.ttf"));
        assert_eq!(std::fs::read(&path).unwrap(), b"bold");
    }

    #[test]
    fn test_archive_without_fonts_is_not_found() {
        let out = TempDir::new().unwrap();
        let data = family_zip(&[("README.txt", b"no fonts here")]);
        let font = Font::new("Empty Family");

        let err = install_from_archive(&data, ArchiveKind::Zip, out.path(), &font, "Regular")
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("Empty Family"));
        assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_corrupt_archive_leaves_out_dir_untouched() {
        let out = TempDir::new().unwrap();
        let font = Font::new("Broken");
        let result =
            install_from_archive(b"garbage", ArchiveKind::Zip, out.path(), &font, "Regular");
        assert!(result.is_err());
        assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
    }
}
