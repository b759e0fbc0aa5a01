//! The move primitive the engine drives.
//! - `FsMover` renames entries inside one directory and never clobbers.
//! - `DryRunMover` only records what would happen.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::errors::RenameError;

/// Rename one name to another. Implementations must fail rather than partially
/// apply a rename.
pub trait Mover {
    fn rename(&mut self, src: &str, dst: &str) -> Result<(), RenameError>;

    /// Called once after the last rename of a successful batch.
    fn finish(&mut self) -> Result<(), RenameError> {
        Ok(())
    }
}

/// Renames entries of `dir` with `std::fs::rename`.
#[derive(Debug, Clone)]
pub struct FsMover {
    dir: PathBuf,
}

impl FsMover {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Mover for FsMover {
    fn rename(&mut self, src: &str, dst: &str) -> Result<(), RenameError> {
        let src_path = self.dir.join(src);
        let dst_path = self.dir.join(dst);

        // POSIX rename silently replaces the destination.
        match fs::symlink_metadata(&dst_path) {
            Ok(_) if !same_entry(&src_path, &dst_path) => {
                return Err(RenameError::DestinationExists {
                    src: src_path,
                    dst: dst_path,
                });
            }
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(RenameError::Move {
                    src: src_path,
                    dst: dst_path,
                    source: e,
                });
            }
        }

        fs::rename(&src_path, &dst_path).map_err(|source| RenameError::Move {
            src: src_path.clone(),
            dst: dst_path.clone(),
            source,
        })?;
        debug!(src = %src_path.display(), dst = %dst_path.display(), "renamed");
        Ok(())
    }

    fn finish(&mut self) -> Result<(), RenameError> {
        // Best-effort: a failed fsync does not undo the renames.
        #[cfg(unix)]
        if let Err(e) = fs::File::open(&self.dir).and_then(|f| f.sync_all()) {
            debug!(dir = %self.dir.display(), error = %e, "directory fsync failed");
        }
        Ok(())
    }
}

/// True when both paths name the same directory entry, e.g. a case-only
/// rename on a case-insensitive filesystem.
#[cfg(unix)]
fn same_entry(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;
    match (fs::symlink_metadata(a), fs::symlink_metadata(b)) {
        (Ok(ma), Ok(mb)) => ma.dev() == mb.dev() && ma.ino() == mb.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn same_entry(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(ca), Ok(cb)) => ca == cb,
        _ => false,
    }
}

/// Records renames without touching the filesystem.
#[derive(Debug, Default, Clone)]
pub struct DryRunMover {
    planned: Vec<(String, String)>,
}

impl DryRunMover {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renames in the order they would have been issued.
    pub fn planned(&self) -> &[(String, String)] {
        &self.planned
    }
}

impl Mover for DryRunMover {
    fn rename(&mut self, src: &str, dst: &str) -> Result<(), RenameError> {
        info!(src, dst, "dry-run: would rename");
        self.planned.push((src.to_string(), dst.to_string()));
        Ok(())
    }
}
