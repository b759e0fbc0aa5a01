//! Editor discovery and invocation.
//!
//! Precedence: explicit choice (CLI or config), then `$EDITOR`, then `$VISUAL`.
//! The command is split on whitespace so values like `code --wait` work.

use std::env;
use std::path::Path;
use std::process::Command;
use tracing::debug;

use crate::errors::EditorError;

/// Pick the editor command, if any is configured.
pub fn find_editor(explicit: Option<&str>) -> Option<String> {
    let usable = |cmd: &String| !cmd.trim().is_empty();
    explicit
        .map(str::to_string)
        .filter(usable)
        .or_else(|| env::var("EDITOR").ok().filter(usable))
        .or_else(|| env::var("VISUAL").ok().filter(usable))
}

/// Lets the user change the contents of `file`.
pub trait Edit {
    fn edit(&mut self, file: &Path) -> Result<(), EditorError>;
}

/// An external editor process, e.g. `vim` or `code --wait`.
#[derive(Debug, Clone)]
pub struct CommandEditor {
    command: String,
}

impl CommandEditor {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }
}

impl Edit for CommandEditor {
    fn edit(&mut self, file: &Path) -> Result<(), EditorError> {
        run_editor(&self.command, file)
    }
}

/// Run `editor` on `file`, inheriting the terminal, and wait for it.
pub fn run_editor(editor: &str, file: &Path) -> Result<(), EditorError> {
    let mut parts = editor.split_whitespace();
    let program = parts.next().ok_or(EditorError::NotFound)?;

    debug!(editor, file = %file.display(), "launching editor");
    let status = Command::new(program)
        .args(parts)
        .arg(file)
        .status()
        .map_err(|source| EditorError::Spawn {
            program: program.to_string(),
            source,
        })?;

    if !status.success() {
        return Err(EditorError::Failed {
            program: program.to_string(),
            status,
        });
    }
    Ok(())
}
