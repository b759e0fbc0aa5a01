//! Property tests for the rename engine against an in-memory directory that
//! refuses to overwrite, so any clobber shows up as an error.

use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;

use bulkmv::engine::{self, CandidateSource, Mover, RandomSuffix, RenameMap, TempNameAllocator};
use bulkmv::RenameError;
use proptest::prelude::*;
use rand::Rng;

/// name -> original name of the content stored there.
#[derive(Default)]
struct MemDir {
    files: BTreeMap<String, String>,
    calls: usize,
    fail_at: Option<usize>,
}

impl MemDir {
    fn with<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            files: names.into_iter().map(|n| (n.to_string(), n.to_string())).collect(),
            ..Default::default()
        }
    }
}

impl Mover for MemDir {
    fn rename(&mut self, src: &str, dst: &str) -> Result<(), RenameError> {
        self.calls += 1;
        if self.fail_at == Some(self.calls) {
            return Err(RenameError::Move {
                src: PathBuf::from(src),
                dst: PathBuf::from(dst),
                source: std::io::Error::other("injected failure"),
            });
        }
        if self.files.contains_key(dst) {
            return Err(RenameError::DestinationExists {
                src: PathBuf::from(src),
                dst: PathBuf::from(dst),
            });
        }
        let content = self.files.remove(src).ok_or_else(|| RenameError::Move {
            src: PathBuf::from(src),
            dst: PathBuf::from(dst),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        })?;
        self.files.insert(dst.to_string(), content);
        Ok(())
    }
}

/// Expected directory after applying `pairs`: destination -> original name.
fn expected(pairs: &[(String, String)]) -> BTreeMap<String, String> {
    pairs.iter().map(|(s, d)| (d.clone(), s.clone())).collect()
}

fn apply(pairs: &[(String, String)]) -> (MemDir, engine::RunSummary) {
    let mut dir = MemDir::with(pairs.iter().map(|(s, _)| s.as_str()));
    let map = RenameMap::from_pairs(pairs.iter().cloned()).unwrap();
    let summary = engine::run(map, &mut dir, &mut TempNameAllocator::default()).unwrap();
    (dir, summary)
}

/// `n` sources renamed onto a shuffled pool of the sources plus `extra`
/// fresh names: mixes identities, chains, cycles and plain renames.
fn rename_plan() -> impl Strategy<Value = Vec<(String, String)>> {
    (1usize..12, 0usize..4).prop_flat_map(|(n, extra)| {
        let pool: Vec<usize> = (0..n + extra).collect();
        Just(pool).prop_shuffle().prop_map(move |shuffled| {
            (0..n)
                .map(|i| (format!("f{i}"), format!("f{}", shuffled[i])))
                .collect()
        })
    })
}

fn pairs(list: &[(&str, &str)]) -> Vec<(String, String)> {
    list.iter().map(|(s, d)| (s.to_string(), d.to_string())).collect()
}

proptest! {
    #[test]
    fn every_plan_lands_exactly(plan in rename_plan()) {
        let (dir, summary) = apply(&plan);
        prop_assert_eq!(&dir.files, &expected(&plan));

        let changes = plan.iter().filter(|(s, d)| s != d).count();
        prop_assert_eq!(summary.renamed, changes);
        prop_assert_eq!(summary.unchanged, plan.len() - changes);
        prop_assert_eq!(dir.calls, changes + summary.staged);
    }

    #[test]
    fn failure_on_nth_move_stops_the_batch(plan in rename_plan(), pick in any::<prop::sample::Index>()) {
        let (clean, _) = apply(&plan);
        prop_assume!(clean.calls > 0);
        let fail_at = pick.index(clean.calls) + 1;

        let mut dir = MemDir::with(plan.iter().map(|(s, _)| s.as_str()));
        dir.fail_at = Some(fail_at);
        let map = RenameMap::from_pairs(plan.iter().cloned()).unwrap();
        let err = engine::run(map, &mut dir, &mut TempNameAllocator::default()).unwrap_err();

        prop_assert!(matches!(err, RenameError::Move { .. }), "expected RenameError::Move, got {:?}", err);
        prop_assert_eq!(dir.calls, fail_at);
        // Nothing lost or duplicated, wherever the batch stopped.
        prop_assert_eq!(dir.files.len(), plan.len());
    }

    #[test]
    fn random_suffix_never_hits_taken_names(
        base in "[a-z]{1,8}",
        taken_a in prop::collection::hash_set("[a-z]{1,8}(\\.tmp[0-9]{1,3})?", 0..64),
        taken_b in prop::collection::hash_set("[a-z]{1,8}(\\.tmp[0-9]{1,3})?", 0..64),
    ) {
        let mut alloc = TempNameAllocator::new(RandomSuffix);
        let name = alloc.allocate(&base, &taken_a, &taken_b).unwrap();
        prop_assert!(name.starts_with(&base));
        prop_assert!(!taken_a.contains(&name));
        prop_assert!(!taken_b.contains(&name));
    }

    #[test]
    fn crowded_namespace_still_yields_a_free_name(
        taken_a in prop::collection::hash_set(0u8..16, 0..16),
        taken_b in prop::collection::hash_set(0u8..16, 0..16),
    ) {
        let a: HashSet<String> = taken_a.iter().map(|n| format!("t{n}")).collect();
        let b: HashSet<String> = taken_b.iter().map(|n| format!("t{n}")).collect();
        let all_taken = (0u8..16).all(|n| taken_a.contains(&n) || taken_b.contains(&n));

        let mut alloc = TempNameAllocator::new(SmallPool);
        match alloc.allocate("t", &a, &b) {
            Ok(name) => {
                prop_assert!(!all_taken);
                prop_assert!(!a.contains(&name) && !b.contains(&name));
            }
            Err(RenameError::AllocationExhausted { attempts, .. }) => {
                prop_assert!(all_taken);
                prop_assert_eq!(attempts, 10_000);
            }
            Err(other) => prop_assert!(false, "unexpected error {}", other),
        }
    }
}

/// Draws from only sixteen names so collisions are frequent.
struct SmallPool;

impl CandidateSource for SmallPool {
    fn candidate(&mut self, base: &str) -> String {
        format!("{base}{}", rand::thread_rng().gen_range(0u8..16))
    }
}

#[test]
fn no_op_entries_issue_no_moves() {
    let plan = pairs(&[("a", "a"), ("b", "b"), ("c", "c")]);
    let (dir, summary) = apply(&plan);
    assert_eq!(dir.calls, 0);
    assert_eq!(summary.unchanged, 3);
}

#[test]
fn chain_moves_each_file_once() {
    let plan = pairs(&[("a", "b"), ("b", "c"), ("c", "d")]);
    let (dir, summary) = apply(&plan);
    assert_eq!(dir.files, expected(&plan));
    assert_eq!(dir.calls, 3);
    assert_eq!(summary.staged, 0);
}

#[test]
fn independent_cycles_do_not_interfere() {
    let abc = pairs(&[("a", "b"), ("b", "c"), ("c", "a")]);
    let nums = pairs(&[("1", "2"), ("2", "3"), ("3", "1")]);
    let xyz = pairs(&[("x", "y"), ("y", "z"), ("z", "x")]);

    let together: Vec<_> = abc.iter().chain(&nums).chain(&xyz).cloned().collect();
    let (dir, summary) = apply(&together);

    let mut separately = BTreeMap::new();
    for plan in [&abc, &nums, &xyz] {
        separately.extend(apply(plan).0.files);
    }
    assert_eq!(dir.files, separately);
    assert_eq!(dir.files, expected(&together));
    assert_eq!(summary.staged, 3);
}

#[test]
fn temporary_names_avoid_every_destination() {
    // Destinations that look exactly like what the allocator would produce
    // for "b" on a run of unlucky draws.
    struct Replay(Vec<&'static str>);
    impl CandidateSource for Replay {
        fn candidate(&mut self, _base: &str) -> String {
            self.0.remove(0).to_string()
        }
    }

    let plan = pairs(&[("a", "b"), ("b", "a"), ("c", "b.tmp1"), ("d", "b.tmp2")]);
    let mut dir = MemDir::with(["a", "b", "c", "d"]);
    let map = RenameMap::from_pairs(plan.iter().cloned()).unwrap();
    let mut alloc = TempNameAllocator::new(Replay(vec!["b.tmp1", "b.tmp2", "b.tmp3"]));

    let summary = engine::run(map, &mut dir, &mut alloc).unwrap();
    assert_eq!(summary.staged, 1);
    assert_eq!(dir.files, expected(&plan));
}
