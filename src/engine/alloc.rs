//! Temporary name allocation for cycle staging.
//!
//! A candidate is a randomized derivative of a base name. It is accepted only
//! if it is a member of neither of the two supplied name sets; otherwise a new
//! candidate is drawn, up to [`MAX_TEMP_ATTEMPTS`] times.

use std::collections::{HashMap, HashSet};

use rand::Rng;
use tracing::trace;

use crate::errors::RenameError;

/// Attempt budget before allocation gives up.
pub const MAX_TEMP_ATTEMPTS: usize = 10_000;

/// Anything that can answer "is this name taken?".
pub trait NameSet {
    fn contains_name(&self, name: &str) -> bool;
}

impl NameSet for HashSet<String> {
    fn contains_name(&self, name: &str) -> bool {
        self.contains(name)
    }
}

/// Maps are checked by key.
impl<V> NameSet for HashMap<String, V> {
    fn contains_name(&self, name: &str) -> bool {
        self.contains_key(name)
    }
}

/// Produces candidate temporary names derived from a base name.
pub trait CandidateSource {
    fn candidate(&mut self, base: &str) -> String;
}

/// `"<base>.tmp<n>"` with a random `n`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomSuffix;

impl CandidateSource for RandomSuffix {
    fn candidate(&mut self, base: &str) -> String {
        let n: u64 = rand::thread_rng().r#gen();
        format!("{base}.tmp{n}")
    }
}

#[derive(Debug, Clone)]
pub struct TempNameAllocator<S = RandomSuffix> {
    source: S,
    max_attempts: usize,
}

impl Default for TempNameAllocator<RandomSuffix> {
    fn default() -> Self {
        Self::new(RandomSuffix)
    }
}

impl<S: CandidateSource> TempNameAllocator<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            max_attempts: MAX_TEMP_ATTEMPTS,
        }
    }

    /// Override the attempt budget (tests only need a handful).
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Pick a name derived from `base` that is in neither `taken_a` nor `taken_b`.
    ///
    /// Nothing is touched on disk; the caller performs the move.
    pub fn allocate<A, B>(
        &mut self,
        base: &str,
        taken_a: &A,
        taken_b: &B,
    ) -> Result<String, RenameError>
    where
        A: NameSet + ?Sized,
        B: NameSet + ?Sized,
    {
        for attempt in 0..self.max_attempts {
            let candidate = self.source.candidate(base);
            if !taken_a.contains_name(&candidate) && !taken_b.contains_name(&candidate) {
                return Ok(candidate);
            }
            trace!(base, attempt, candidate = %candidate, "temporary name collision, retrying");
        }
        Err(RenameError::AllocationExhausted {
            base: base.to_string(),
            attempts: self.max_attempts,
        })
    }
}
