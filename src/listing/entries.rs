use std::fs;
use std::path::Path;
use tracing::debug;

use crate::errors::ListingError;

/// Names of every entry in `dir` (hidden ones included), sorted.
pub fn read_names(dir: &Path) -> Result<Vec<String>, ListingError> {
    let read_err = |source| ListingError::ReadDir {
        dir: dir.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let name = entry.map_err(read_err)?.file_name();
        match name.into_string() {
            Ok(s) => names.push(s),
            Err(name) => {
                return Err(ListingError::NonUtf8Name {
                    dir: dir.to_path_buf(),
                    name,
                });
            }
        }
    }
    names.sort();
    debug!(dir = %dir.display(), count = names.len(), "listed directory");
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn lists_sorted_including_hidden_and_dirs() {
        let dir = assert_fs::TempDir::new().unwrap();
        dir.child("b.txt").touch().unwrap();
        dir.child(".hidden").touch().unwrap();
        dir.child("a dir").create_dir_all().unwrap();

        let names = read_names(dir.path()).unwrap();
        assert_eq!(names, vec![".hidden", "a dir", "b.txt"]);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = assert_fs::TempDir::new().unwrap();
        let err = read_names(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, ListingError::ReadDir { .. }));
    }
}
