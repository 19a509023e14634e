//! Archive extraction for downloaded font families.
//!
//! Repositories usually ship every style of a family in one compressed file.
//! Supported formats are zip, tar and gzip-compressed tar.

use std::io::{Cursor, Read};
use std::path::Path;

use crate::error::{FetchError, Result};

/// Archive formats that can be unpacked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    Zip,
    Tar,
    TarGz,
}

impl ArchiveKind {
    /// Guess the archive kind from an HTTP `Content-Type` value.
    ///
    /// Parameters such as `; charset=...` are ignored. Unknown or missing
    /// types are assumed to be zip, which is what font sites serve in
    /// practice.
    pub fn from_mime(mime: Option<&str>) -> Self {
        let essence = mime
            .and_then(|m| m.split(';').next())
            .map(|m| m.trim().to_ascii_lowercase());
        match essence.as_deref() {
            Some("application/x-tar") => ArchiveKind::Tar,
            Some("application/gzip") | Some("application/x-gzip") => ArchiveKind::TarGz,
            Some("application/zip") | Some("application/x-zip-compressed") => ArchiveKind::Zip,
            other => {
                if let Some(other) = other {
                    log::debug!("Unrecognized archive MIME type '{}', assuming zip", other);
                }
                ArchiveKind::Zip
            }
        }
    }

    /// File extension used when naming a downloaded archive.
    pub fn extension(&self) -> &'static str {
        match self {
            ArchiveKind::Zip => "zip",
            ArchiveKind::Tar => "tar",
            ArchiveKind::TarGz => "tar.gz",
        }
    }
}

/// Unpack `data` into `target_dir`.
///
/// `archive_name` only appears in error messages. Entries whose paths would
/// escape `target_dir` are skipped.
pub fn extract_archive(
    data: &[u8],
    kind: ArchiveKind,
    target_dir: &Path,
    archive_name: &str,
) -> Result<()> {
    let extraction_error = |message: String| FetchError::Extraction {
        archive: archive_name.to_string(),
        message,
    };
    match kind {
        ArchiveKind::Zip => extract_zip(data, target_dir).map_err(extraction_error),
        ArchiveKind::Tar => extract_tar(Cursor::new(data), target_dir).map_err(extraction_error),
        ArchiveKind::TarGz => {
            let decoder = flate2::read::GzDecoder::new(Cursor::new(data));
            extract_tar(decoder, target_dir).map_err(extraction_error)
        }
    }
}

fn extract_zip(data: &[u8], target_dir: &Path) -> std::result::Result<(), String> {
    use zip::ZipArchive;

    let mut archive =
        ZipArchive::new(Cursor::new(data)).map_err(|e| format!("Failed to open zip: {}", e))?;

    for i in 0..archive.len() {
        let mut file = archive
            .by_index(i)
            .map_err(|e| format!("Failed to read zip entry: {}", e))?;
        let relative_path = match file.enclosed_name() {
            Some(path) => path.to_owned(),
            None => {
                log::warn!("Skipping zip entry with unsafe path: {}", file.name());
                continue;
            }
        };
        if file.is_dir() || relative_path.as_os_str().is_empty() {
            continue;
        }

        let final_path = target_dir.join(relative_path);
        if let Some(parent) = final_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create directory: {}", e))?;
        }
        let mut outfile = std::fs::File::create(&final_path)
            .map_err(|e| format!("Failed to create file: {}", e))?;
        std::io::copy(&mut file, &mut outfile)
            .map_err(|e| format!("Failed to write file: {}", e))?;
    }

    Ok(())
}

fn extract_tar<R: Read>(reader: R, target_dir: &Path) -> std::result::Result<(), String> {
    let mut archive = tar::Archive::new(reader);
    let entries = archive
        .entries()
        .map_err(|e| format!("Failed to read tar: {}", e))?;

    for entry in entries {
        let mut entry = entry.map_err(|e| format!("Failed to read tar entry: {}", e))?;
        // unpack_in refuses entries that would land outside target_dir
        let unpacked = entry
            .unpack_in(target_dir)
            .map_err(|e| format!("Failed to unpack tar entry: {}", e))?;
        if !unpacked {
            let path = entry
                .path()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            log::warn!("Skipping tar entry with unsafe path: {}", path);
        }
    }

    Ok(())
}
