//! Core library for `bulkmv`.
//!
//! The rename engine ([`engine`]) applies a validated mapping of old names to
//! new names inside one directory, resolving chains and cycles so no file is
//! overwritten while it still has to be read. The [`listing`] and [`session`]
//! modules produce that mapping from a user-edited text listing.

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod listing;
pub mod output;
pub mod session;
pub mod shutdown;

pub use config::{Config, LogLevel, default_config_path, load_config, load_config_from_xml_path};
pub use engine::{RenameMap, RunSummary};
pub use errors::{EditError, EditorError, ListingError, MappingError, RenameError, SessionError};
pub use session::{Outcome, run_session};
