//! Typed error definitions for bulkmv.
//! Provides a small set of well-known failure modes for better logs and tests.

use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Failures of the rename engine. Any of these aborts the batch; renames that
/// were already applied stay applied.
#[derive(Debug, Error)]
pub enum RenameError {
    #[error("failed to find a temporary name for {base} after {attempts} attempts")]
    AllocationExhausted { base: String, attempts: usize },

    #[error("rename '{}' -> '{}' failed: {source}", src.display(), dst.display())]
    Move {
        src: PathBuf,
        dst: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("refusing to overwrite existing '{}' while renaming '{}'", dst.display(), src.display())]
    DestinationExists { src: PathBuf, dst: PathBuf },
}

impl RenameError {
    /// Stable numeric code for structured logs.
    pub fn code(&self) -> u16 {
        match self {
            RenameError::AllocationExhausted { .. } => 10,
            RenameError::Move { .. } => 11,
            RenameError::DestinationExists { .. } => 12,
        }
    }

    /// The path that caused the failure.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            RenameError::AllocationExhausted { .. } => None,
            RenameError::Move { src, .. } => Some(src),
            RenameError::DestinationExists { dst, .. } => Some(dst),
        }
    }
}

/// A rename mapping that violates the uniqueness rules.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MappingError {
    #[error("duplicate source \"{0}\"")]
    DuplicateSource(String),

    #[error("duplicate destination \"{0}\"")]
    DuplicateDestination(String),
}

#[derive(Debug, Error)]
pub enum ListingError {
    #[error("reading directory '{}' failed: {source}", dir.display())]
    ReadDir {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("entry {name:?} in '{}' is not valid UTF-8", dir.display())]
    NonUtf8Name { dir: PathBuf, name: OsString },
}

/// Problems with the edited listing. These are recoverable: the user is
/// asked to edit again.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("edited listing contains too many lines (expected {expected})")]
    TooManyLines { expected: usize },

    #[error("edited listing contains too few lines (expected {expected}, found {found})")]
    TooFewLines { expected: usize, found: usize },

    #[error("duplicate destination \"{0}\"")]
    DuplicateDestination(String),

    #[error("line {line}: invalid file name \"{name}\"")]
    InvalidName { line: usize, name: String },

    #[error(transparent)]
    Mapping(#[from] MappingError),
}

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("no editor found, please set $EDITOR or $VISUAL")]
    NotFound,

    #[error("running editor command '{program}' failed: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("running editor command '{program}' failed: {status}")]
    Failed { program: String, status: ExitStatus },
}

/// Top-level failure of one interactive run.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Listing(#[from] ListingError),

    #[error(transparent)]
    Editor(#[from] EditorError),

    #[error("renaming failed: {0}")]
    Rename(#[from] RenameError),

    #[error("{context}: {source}")]
    Buffer {
        context: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("user exited")]
    UserExit,

    #[error("operation interrupted by user")]
    Interrupted,
}

impl SessionError {
    pub fn code(&self) -> u16 {
        match self {
            SessionError::Listing(_) => 20,
            SessionError::Editor(_) => 30,
            SessionError::Rename(e) => e.code(),
            SessionError::Buffer { .. } => 40,
            SessionError::UserExit => 50,
            SessionError::Interrupted => 51,
        }
    }
}
