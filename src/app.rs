//! Application orchestrator.
//! Loads/merges config, initializes logging, installs the interrupt handler,
//! validates the directory, runs the edit session and reports the outcome.

use anyhow::{Context, Result};
use std::io;
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info};

use bulkmv::cli::Args;
use bulkmv::config::{CONFIG_ENV, default_config_path, load_config};
use bulkmv::listing::{CommandEditor, find_editor};
use bulkmv::output as out;
use bulkmv::{Config, EditorError, Outcome, RenameError, SessionError, run_session, shutdown};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle --print-config before logging init
    if args.print_config {
        print_config_location();
        return Ok(());
    }

    // Config file first, CLI flags on top.
    let mut cfg = match load_config()? {
        Some((cfg, _path)) => cfg,
        None => Config::default(),
    };
    args.apply_overrides(&mut cfg);

    // Initialize logging and capture the guard so we can drop it on signal
    let guard_opt = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {}", e));
        e
    })?;

    // Guard needs to be dropped on SIGINT to flush logs
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        ctrlc::set_handler(move || {
            shutdown::request();
            out::print_warn("Received interrupt; stopping before any further renames...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take(); // drop guard here to flush tracing_appender
            }
        })
        .expect("failed to install signal handler");
    }

    debug!("Starting bulkmv: {:?}", args);

    let result = (|| -> Result<()> {
        cfg.validate()?;

        let command = find_editor(cfg.editor.as_deref()).ok_or(EditorError::NotFound)?;
        let mut editor = CommandEditor::new(command);

        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut prompt_out = io::stderr();

        match run_session(&cfg, &mut editor, &mut input, &mut prompt_out) {
            Ok(outcome) => {
                report(&cfg, &outcome);
                Ok(())
            }
            Err(e) => {
                log_session_error(&e);
                Err(e).context(format!("renaming in '{}'", cfg.directory.display()))
            }
        }
    })();

    // Ensure logs are flushed before exit
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }

    result
}

fn print_config_location() {
    if let Ok(cfg_env) = std::env::var(CONFIG_ENV) {
        out::print_info(&format!("Using {CONFIG_ENV} (explicit):\n  {cfg_env}\n"));
        out::print_info(&format!("To override, unset {CONFIG_ENV} or set it to another file."));
        return;
    }
    match default_config_path() {
        Some(p) => {
            out::print_info(&format!("Default bulkmv config path:\n  {}\n", p.display()));
            if p.exists() {
                out::print_info("A config file exists at that location.");
            } else {
                out::print_info("No config file exists there; built-in defaults are used. Example:\n\n<config>\n  <editor>vim</editor>\n  <log_level>normal</log_level>\n  <log_file>/path/to/bulkmv.log</log_file>\n  <dry_run>false</dry_run>\n</config>\n");
            }
        }
        None => out::print_error("Could not determine a default config path"),
    }
}

fn report(cfg: &Config, outcome: &Outcome) {
    match outcome {
        Outcome::Empty => {
            out::print_info(&format!("'{}' is empty; nothing to rename", cfg.directory.display()));
        }
        Outcome::Renamed(summary) => {
            info!(
                dir = %cfg.directory.display(),
                renamed = summary.renamed,
                unchanged = summary.unchanged,
                staged = summary.staged,
                "Rename completed"
            );
            out::print_success(&format!(
                "renamed {} of {} entries",
                summary.renamed,
                summary.renamed + summary.unchanged
            ));
        }
        Outcome::Planned { summary, renames } => {
            for (src, dst) in renames {
                out::print_user(&format!("{src} -> {dst}"));
            }
            out::print_info(&format!(
                "Dry-run: {} entries would be renamed ({} temporary moves)",
                summary.renamed, summary.staged
            ));
        }
    }
}

fn log_session_error(e: &SessionError) {
    let code = e.code();
    match e {
        SessionError::UserExit => info!(code, kind = "user_exit", "User quit without renaming"),
        SessionError::Interrupted => error!(code, kind = "interrupted", "Aborted by user"),
        SessionError::Listing(inner) => error!(code, kind = "listing", error = %inner, "Listing failed"),
        SessionError::Editor(inner) => error!(code, kind = "editor", error = %inner, "Editor failed"),
        SessionError::Buffer { context, source } => {
            error!(code, kind = "buffer", %context, error = %source, "Edit buffer failed")
        }
        SessionError::Rename(inner) => match inner {
            RenameError::AllocationExhausted { base, attempts } => {
                error!(code, kind = "allocation_exhausted", %base, attempts = *attempts, "Rename aborted")
            }
            RenameError::Move { src, dst, source } => {
                error!(code, kind = "move_failed", src = %src.display(), dst = %dst.display(), error = %source, "Rename aborted")
            }
            RenameError::DestinationExists { src, dst } => {
                error!(code, kind = "destination_exists", src = %src.display(), dst = %dst.display(), "Rename aborted")
            }
        },
    }
}
