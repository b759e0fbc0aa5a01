//! The editable listing: one name per line in a temporary file, and the
//! parser that turns the edited text back into a [`RenameMap`].

use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::engine::RenameMap;
use crate::errors::EditError;

/// Temporary file the user edits. Removed when dropped.
#[derive(Debug)]
pub struct EditBuffer {
    file: NamedTempFile,
}

impl EditBuffer {
    /// Write `names`, each followed by `\n`, to a fresh temporary file.
    pub fn create(names: &[String]) -> io::Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("bulkmv")
            .suffix(".txt")
            .tempfile()?;
        {
            let mut w = io::BufWriter::new(file.as_file_mut());
            for name in names {
                w.write_all(name.as_bytes())?;
                w.write_all(b"\n")?;
            }
            w.flush()?;
        }
        debug!(path = %file.path().display(), lines = names.len(), "created edit buffer");
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Current contents, re-read by path: editors often replace the file
    /// instead of writing through the original inode.
    pub fn read_to_string(&self) -> io::Result<String> {
        fs::read_to_string(self.path())
    }
}

/// Pair each of `sources` with the corresponding line of `text`.
pub fn parse_edit(sources: &[String], text: &str) -> Result<RenameMap, EditError> {
    let expected = sources.len();
    let mut dsts: Vec<&str> = Vec::with_capacity(expected);
    let mut seen: HashSet<&str> = HashSet::with_capacity(expected);

    for (idx, line) in text.lines().enumerate() {
        if dsts.len() >= expected {
            return Err(EditError::TooManyLines { expected });
        }
        let name = line.strip_suffix('\r').unwrap_or(line);
        if !is_valid_name(name) {
            return Err(EditError::InvalidName {
                line: idx + 1,
                name: name.to_string(),
            });
        }
        if !seen.insert(name) {
            return Err(EditError::DuplicateDestination(name.to_string()));
        }
        dsts.push(name);
    }

    if dsts.len() < expected {
        return Err(EditError::TooFewLines {
            expected,
            found: dsts.len(),
        });
    }

    Ok(RenameMap::from_pairs(
        sources.iter().map(String::as_str).zip(dsts),
    )?)
}

/// A plain entry name: renaming into another directory is not supported.
fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains(std::path::MAIN_SEPARATOR)
        && !name.contains('\0')
}
