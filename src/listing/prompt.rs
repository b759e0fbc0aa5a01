//! What to do after an invalid edit.

use std::io::{self, BufRead, Write};

use owo_colors::OwoColorize;

use crate::output as out;
use crate::shutdown;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Reopen the buffer as the user left it.
    EditExisting,
    /// Start over from the original listing.
    EditNew,
    Quit,
}

impl Choice {
    /// Map one line of input to a choice (first non-blank character).
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().chars().next()?.to_ascii_lowercase() {
            'e' => Some(Choice::EditExisting),
            'n' => Some(Choice::EditNew),
            'q' => Some(Choice::Quit),
            _ => None,
        }
    }
}

pub const PROMPT: &str = "[e]dit existing/edit [n]ew/[q]uit: ";

/// The prompt with the choice letters highlighted.
fn colored_prompt() -> String {
    format!(
        "[{}]dit existing/edit [{}]ew/[{}]uit: ",
        "e".yellow().bold(),
        "n".yellow().bold(),
        "q".yellow().bold()
    )
}

/// Ask until the user picks a valid option. Highlights the choice letters
/// when stderr is a terminal.
pub fn ask<R: BufRead, W: Write>(input: &mut R, prompt_out: &mut W) -> io::Result<Choice> {
    ask_with(input, prompt_out, out::stderr_tty())
}

/// Like [`ask`], with explicit control over highlighting. End of input or a
/// pending interrupt means quit.
pub fn ask_with<R: BufRead, W: Write>(
    input: &mut R,
    prompt_out: &mut W,
    color: bool,
) -> io::Result<Choice> {
    loop {
        if shutdown::is_requested() {
            return Ok(Choice::Quit);
        }
        if color {
            write!(prompt_out, "{}", colored_prompt())?;
        } else {
            write!(prompt_out, "{PROMPT}")?;
        }
        prompt_out.flush()?;

        let mut line = String::new();
        let read = input.read_line(&mut line)?;
        if read == 0 || shutdown::is_requested() {
            writeln!(prompt_out)?;
            return Ok(Choice::Quit);
        }
        match Choice::parse(&line) {
            Some(choice) => return Ok(choice),
            None => out::print_warn(&format!("invalid selection '{}'", line.trim())),
        }
    }
}
