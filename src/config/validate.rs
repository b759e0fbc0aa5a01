//! Config validation logic.
//! Verifies the target directory exists, is a directory and can be listed.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;
use tracing::{debug, error, info};

use super::types::Config;

impl Config {
    /// Validate the target directory.
    pub fn validate(&self) -> Result<()> {
        let dir = &self.directory;
        ensure_dir_exists_and_is_dir(dir, "directory")?;
        ensure_readable(dir, "directory")?;

        info!(
            "Config validated: directory='{}' editor='{}' dry_run={}",
            dir.display(),
            self.editor.as_deref().unwrap_or("<env>"),
            self.dry_run
        );
        Ok(())
    }
}

/// Ensure path exists and is a directory; emit clear errors with path context.
fn ensure_dir_exists_and_is_dir(path: &Path, name: &str) -> Result<()> {
    if !path.exists() {
        error!("{name} does not exist: {}", path.display());
        bail!("{name} does not exist: {}", path.display());
    }
    if !path.is_dir() {
        error!("{name} is not a directory: {}", path.display());
        bail!("{name} is not a directory: {}", path.display());
    }
    Ok(())
}

/// Ensure directory is readable by attempting to open its entries.
fn ensure_readable(path: &Path, name: &str) -> Result<()> {
    fs::read_dir(path).with_context(|| {
        format!("Cannot read {name} '{}'; check permissions", path.display())
    })?;
    debug!("{name} readable: {}", path.display());
    Ok(())
}
