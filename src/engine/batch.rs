//! Batch execution: drains a worklist of pending renames, clearing whatever
//! occupies each destination before moving into it.
//!
//! A destination that equals another pending source is an obstacle: that file
//! must move first. Following obstacles yields a chain, walked with an explicit
//! stack. Destinations are unique, so the walk can only revisit a name when the
//! chain loops back on itself. The cycle is broken by staging the last file of
//! the chain under a temporary name; the staged entry goes back on the
//! worklist and is completed once its destination has been vacated.

use std::collections::{HashMap, HashSet, VecDeque};
use tracing::{debug, info};

use super::alloc::{CandidateSource, TempNameAllocator};
use super::map::RenameMap;
use super::mover::Mover;
use crate::errors::RenameError;

/// What a finished batch did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Files moved to their final name.
    pub renamed: usize,
    /// Entries whose new name equals the old one.
    pub unchanged: usize,
    /// Moves to a temporary name that broke a cycle.
    pub staged: usize,
}

/// Apply every rename in `map`.
///
/// The first error aborts the batch. Renames already applied are not rolled
/// back, and a file caught mid-cycle may be left under its temporary name.
pub fn run<M, S>(
    map: RenameMap,
    mover: &mut M,
    allocator: &mut TempNameAllocator<S>,
) -> Result<RunSummary, RenameError>
where
    M: Mover + ?Sized,
    S: CandidateSource,
{
    Batch::new(map, mover, allocator).run()
}

struct Batch<'a, M: ?Sized, S> {
    /// Files that still need to move, keyed by their current name.
    pending: HashMap<String, String>,
    /// Every destination of the original mapping.
    destinations: HashSet<String>,
    worklist: VecDeque<String>,
    mover: &'a mut M,
    allocator: &'a mut TempNameAllocator<S>,
    summary: RunSummary,
}

impl<'a, M, S> Batch<'a, M, S>
where
    M: Mover + ?Sized,
    S: CandidateSource,
{
    fn new(map: RenameMap, mover: &'a mut M, allocator: &'a mut TempNameAllocator<S>) -> Self {
        let (order, pending) = map.into_parts();
        let destinations = pending.values().cloned().collect();
        Self {
            pending,
            destinations,
            worklist: order.into(),
            mover,
            allocator,
            summary: RunSummary::default(),
        }
    }

    fn run(mut self) -> Result<RunSummary, RenameError> {
        info!(entries = self.pending.len(), "starting rename batch");

        while let Some(src) = self.worklist.pop_front() {
            // Already moved as part of an earlier chain.
            let Some(dst) = self.pending.get(&src).cloned() else {
                continue;
            };
            if src == dst {
                self.pending.remove(&src);
                self.summary.unchanged += 1;
                continue;
            }
            self.resolve(src, dst)?;
        }

        self.mover.finish()?;
        info!(
            renamed = self.summary.renamed,
            unchanged = self.summary.unchanged,
            staged = self.summary.staged,
            "rename batch complete"
        );
        Ok(self.summary)
    }

    /// Move `src` to `dst`, first clearing every obstacle along the chain.
    fn resolve(&mut self, src: String, dst: String) -> Result<(), RenameError> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut chain: Vec<(String, String)> = Vec::new();
        let (mut cur_src, mut cur_dst) = (src, dst);

        loop {
            let Some(next_dst) = self.pending.get(&cur_dst).cloned() else {
                chain.push((cur_src, cur_dst));
                break;
            };
            if seen.contains(&cur_dst) {
                self.stage(cur_src, cur_dst)?;
                break;
            }
            seen.insert(cur_src.clone());
            chain.push((cur_src, cur_dst.clone()));
            cur_src = cur_dst;
            cur_dst = next_dst;
        }

        // Innermost first: each move vacates the name the next one targets.
        while let Some((src, dst)) = chain.pop() {
            self.mover.rename(&src, &dst)?;
            self.pending.remove(&src);
            self.summary.renamed += 1;
        }
        Ok(())
    }

    /// Park `src` under a fresh temporary name and queue `temp -> dst`.
    fn stage(&mut self, src: String, dst: String) -> Result<(), RenameError> {
        let temp = self
            .allocator
            .allocate(&src, &self.pending, &self.destinations)?;
        self.mover.rename(&src, &temp)?;
        debug!(src = %src, temp = %temp, dst = %dst, "cycle detected, staged under temporary name");

        self.pending.remove(&src);
        self.pending.insert(temp.clone(), dst);
        self.worklist.push_back(temp);
        self.summary.staged += 1;
        Ok(())
    }
}
