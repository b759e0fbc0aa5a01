//! Rename execution engine.
//! Applies a validated [`RenameMap`] to a directory, handling chains and cycles
//! so no file is overwritten while it still has to be read.

mod alloc;
mod batch;
mod map;
mod mover;

pub use alloc::{CandidateSource, MAX_TEMP_ATTEMPTS, NameSet, RandomSuffix, TempNameAllocator};
pub use batch::{RunSummary, run};
pub use map::RenameMap;
pub use mover::{DryRunMover, FsMover, Mover};
