//! Destination directory management.

use std::path::{Path, PathBuf};

use crate::error::Result;

/// Create `path` (and parents) if missing and return its absolute form.
///
/// An existing directory is reused as is; nothing inside it is touched.
pub fn prepare_destination(path: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(path)?;
    Ok(std::fs::canonicalize(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_creates_nested_directories() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("a").join("b");

        let resolved = prepare_destination(&target).unwrap();
        assert!(target.is_dir());
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("a/b"));
    }

    #[test]
    fn test_existing_directory_is_kept() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("keep.jpg");
        std::fs::write(&file, "data").unwrap();

        prepare_destination(dir.path()).unwrap();
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "data");
    }

    #[test]
    fn test_file_in_the_way() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("taken");
        std::fs::write(&file, "").unwrap();

        assert!(prepare_destination(&file).is_err());
    }
}
