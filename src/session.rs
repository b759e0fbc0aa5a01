//! One interactive rename session.
//! Lists the directory, lets the user edit the names until the edit is valid,
//! then hands the mapping to the rename engine.

use std::io::{BufRead, Write};
use tracing::{info, warn};

use crate::config::Config;
use crate::engine::{self, DryRunMover, FsMover, RenameMap, RunSummary, TempNameAllocator};
use crate::errors::SessionError;
use crate::listing::{Choice, Edit, EditBuffer, parse_edit, prompt, read_names};
use crate::output as out;
use crate::shutdown;

/// How a session ended successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The directory has no entries.
    Empty,
    /// Renames were applied.
    Renamed(RunSummary),
    /// Dry-run: the renames that would have been issued, in order.
    Planned {
        summary: RunSummary,
        renames: Vec<(String, String)>,
    },
}

/// Run a session for `cfg.directory`.
///
/// `input`/`prompt_out` serve the re-prompt after an invalid edit.
pub fn run_session<E, R, W>(
    cfg: &Config,
    editor: &mut E,
    input: &mut R,
    prompt_out: &mut W,
) -> Result<Outcome, SessionError>
where
    E: Edit + ?Sized,
    R: BufRead,
    W: Write,
{
    let names = read_names(&cfg.directory)?;
    if names.is_empty() {
        info!(dir = %cfg.directory.display(), "directory is empty, nothing to rename");
        return Ok(Outcome::Empty);
    }

    let map = collect_edits(&names, editor, input, prompt_out)?;
    info!(
        entries = map.len(),
        changes = map.changes().count(),
        "edit accepted"
    );

    if shutdown::is_requested() {
        return Err(SessionError::Interrupted);
    }

    let mut allocator = TempNameAllocator::default();
    if cfg.dry_run {
        let mut mover = DryRunMover::new();
        let summary = engine::run(map, &mut mover, &mut allocator)?;
        return Ok(Outcome::Planned {
            summary,
            renames: mover.planned().to_vec(),
        });
    }

    let mut mover = FsMover::new(&cfg.directory);
    let summary = engine::run(map, &mut mover, &mut allocator)?;
    Ok(Outcome::Renamed(summary))
}

/// Edit until the listing parses, or the user gives up.
fn collect_edits<E, R, W>(
    names: &[String],
    editor: &mut E,
    input: &mut R,
    prompt_out: &mut W,
) -> Result<RenameMap, SessionError>
where
    E: Edit + ?Sized,
    R: BufRead,
    W: Write,
{
    let mut buffer: Option<EditBuffer> = None;
    loop {
        let buf = match buffer.take() {
            Some(b) => b,
            None => EditBuffer::create(names).map_err(|source| SessionError::Buffer {
                context: "creating edit buffer failed",
                source,
            })?,
        };

        editor.edit(buf.path())?;
        let text = buf.read_to_string().map_err(|source| SessionError::Buffer {
            context: "reading edit buffer failed",
            source,
        })?;

        match parse_edit(names, &text) {
            Ok(map) => return Ok(map),
            Err(e) => {
                warn!(error = %e, "edited listing rejected");
                out::print_warn(&e.to_string());
            }
        }

        if shutdown::is_requested() {
            return Err(SessionError::Interrupted);
        }

        let choice = prompt::ask(input, prompt_out).map_err(|source| SessionError::Buffer {
            context: "reading selection failed",
            source,
        })?;
        // Ctrl-C at the prompt must not reopen the editor.
        if shutdown::is_requested() {
            return Err(SessionError::Interrupted);
        }
        match choice {
            Choice::EditExisting => buffer = Some(buf),
            Choice::EditNew => drop(buf),
            Choice::Quit => return Err(SessionError::UserExit),
        }
    }
}
