//! Producing the rename mapping: list the directory, let the user edit the
//! names, and validate the result.

mod buffer;
mod editor;
mod entries;
pub mod prompt;

pub use buffer::{EditBuffer, parse_edit};
pub use editor::{CommandEditor, Edit, find_editor, run_editor};
pub use entries::read_names;
pub use prompt::Choice;
