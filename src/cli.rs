//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - CLI flags override values from config.xml.
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel};

/// Rename the files of a directory by editing their names in a text editor.
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Bulk-rename files by editing their names in your $EDITOR"
)]
pub struct Args {
    /// The directory in which you want to rename files.
    #[arg(value_name = "DIRECTORY", default_value = ".", value_hint = ValueHint::DirPath)]
    pub directory: PathBuf,

    /// Editor command to use instead of $EDITOR / $VISUAL.
    #[arg(long, short = 'e', value_name = "COMMAND", help = "Editor command (overrides $EDITOR and $VISUAL)")]
    pub editor: Option<String>,

    /// Dry-run: show the renames but do not modify the filesystem.
    #[arg(
        long,
        short = 'n',
        help = "Show what would be renamed, but do not modify files"
    )]
    pub dry_run: bool,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Also write logs to this file.
    #[arg(long, value_hint = ValueHint::FilePath, help = "Append logs to this file")]
    pub log_file: Option<PathBuf>,

    /// Print where bulkmv will look for the config file, then exit.
    #[arg(
        long,
        help = "Print the config file location used by bulkmv and exit"
    )]
    pub print_config: bool,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        cfg.directory = self.directory.clone();
        if let Some(editor) = &self.editor {
            cfg.editor = Some(editor.clone());
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(lf) = &self.log_file {
            cfg.log_file = Some(lf.clone());
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
