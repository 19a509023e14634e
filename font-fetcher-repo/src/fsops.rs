//! Filesystem helpers shared by downloads and the cache.

use std::fs;
use std::io;
use std::path::Path;

/// Move the file at `from` to `to`.
///
/// Tries a rename first. Temporary directories often live on a different
/// filesystem than the destination, where rename fails; in that case the
/// file is copied and the source removed.
pub fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(rename_err) => {
            log::debug!(
                "Rename {} -> {} failed ({}), copying instead",
                from.display(),
                to.display(),
                rename_err
            );
            fs::copy(from, to)?;
            fs::remove_file(from)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_move_file_within_directory() {
        let dir = TempDir::new().unwrap();
        let from = dir.path().join("a.ttf");
        let to = dir.path().join("b.ttf");
        fs::write(&from, b"font").unwrap();

        move_file(&from, &to).unwrap();
        assert!(!from.exists());
        assert_eq!(fs::read(&to).unwrap(), b"font");
    }

    #[test]
    fn test_move_missing_source_fails() {
        let dir = TempDir::new().unwrap();
        let result = move_file(&dir.path().join("missing"), &dir.path().join("x"));
        assert!(result.is_err());
    }
}
