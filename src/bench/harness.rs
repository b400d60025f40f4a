//! Drives the workloads: random insertion, sequential traversal and the hash-set
//! copy/sort, timed per phase.
//!
//! Every variant draws from its own freshly seeded [`RandGen`], so all of them
//! see the same keys in the same order. The traversal hash is an XOR fold,
//! which does not depend on iteration order, so every variant must report the
//! same value. [`run_observed`] checks this.
//!
//! [`RandGen`]: crate::rng::RandGen

use std::collections::{BTreeSet, HashSet};
use std::hint::black_box;
use std::sync::Arc;

use crate::bench::config::{BenchConfig, SetKind};
use crate::bench::report::{phase_label, BenchReport, VariantReport};
use crate::flat_set::FlatSet;
use crate::hash::DeterministicBuildHasher;
use crate::key::{CompositeKey, KeyStream};
use crate::profiler::time;
use crate::telemetry::{InvariantChecker, ViolationKind, ViolationObserver, ViolationSeverity};
use crate::{debug_check_invariants, report_violation_to, BenchResult};

/// The ordered variant's container.
pub type OrderedSet = BTreeSet<CompositeKey>;
/// The hashed variant's container.
pub type HashedSet = HashSet<CompositeKey, DeterministicBuildHasher>;

/// A container the benchmark can fill and traverse.
pub trait BenchSet {
    /// Which variant this container is.
    const KIND: SetKind;

    /// Creates an empty container.
    fn empty() -> Self;

    /// Reserves room for `additional` more keys, where the container supports it.
    fn reserve(&mut self, additional: usize);

    /// Inserts `key`, returning `true` if it was not already present.
    fn insert(&mut self, key: CompositeKey) -> bool;

    /// Number of distinct keys held.
    fn len(&self) -> usize;

    /// Returns `true` if the container holds no keys.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Visits every key in the container's natural iteration order.
    fn for_each_key<F: FnMut(&CompositeKey)>(&self, f: F);
}

impl BenchSet for OrderedSet {
    const KIND: SetKind = SetKind::Ordered;

    fn empty() -> Self {
        Self::new()
    }

    // Trees grow per node; there is nothing to reserve.
    fn reserve(&mut self, _additional: usize) {}

    fn insert(&mut self, key: CompositeKey) -> bool {
        Self::insert(self, key)
    }

    fn len(&self) -> usize {
        Self::len(self)
    }

    fn for_each_key<F: FnMut(&CompositeKey)>(&self, f: F) {
        self.iter().for_each(f);
    }
}

impl BenchSet for HashedSet {
    const KIND: SetKind = SetKind::Hashed;

    fn empty() -> Self {
        Self::with_hasher(DeterministicBuildHasher)
    }

    fn reserve(&mut self, additional: usize) {
        Self::reserve(self, additional);
    }

    fn insert(&mut self, key: CompositeKey) -> bool {
        Self::insert(self, key)
    }

    fn len(&self) -> usize {
        Self::len(self)
    }

    fn for_each_key<F: FnMut(&CompositeKey)>(&self, f: F) {
        self.iter().for_each(f);
    }
}

impl BenchSet for FlatSet<CompositeKey> {
    const KIND: SetKind = SetKind::Flat;

    fn empty() -> Self {
        Self::new()
    }

    fn reserve(&mut self, additional: usize) {
        Self::reserve(self, additional);
    }

    fn insert(&mut self, key: CompositeKey) -> bool {
        Self::insert(self, key)
    }

    fn len(&self) -> usize {
        Self::len(self)
    }

    fn for_each_key<F: FnMut(&CompositeKey)>(&self, f: F) {
        self.iter().for_each(f);
    }
}

/// Inserts `config.num_iters` keys from a fresh generator into `set`.
///
/// Returns how many of them were new.
pub fn random_insertion<S: BenchSet>(set: &mut S, config: &BenchConfig) -> BenchResult<usize> {
    let keys = KeyStream::new(config.rand_gen()?);
    let mut inserted = 0;
    for key in keys.take(config.num_iters) {
        if set.insert(key) {
            inserted += 1;
        }
    }
    Ok(inserted)
}

/// XOR of [`CompositeKey::hash_value`] over every key in `set`.
#[must_use]
pub fn sequential_traversal<S: BenchSet>(set: &S) -> u64 {
    let mut total_hash = 0;
    set.for_each_key(|key| total_hash ^= key.hash_value());
    total_hash
}

/// Visits every key without hashing; the timed traversal when hashing is off.
fn plain_traversal<S: BenchSet>(set: &S) -> usize {
    let mut visited = 0;
    set.for_each_key(|key| {
        black_box(key);
        visited += 1;
    });
    visited
}

/// Ratio of stored keys to allocated capacity.
///
/// `HashSet` does not expose its bucket count, so capacity stands in for it.
#[must_use]
pub fn load_factor(set: &HashedSet) -> f64 {
    match set.capacity() {
        0 => 0.0,
        capacity => set.len() as f64 / capacity as f64,
    }
}

/// Fills a fresh `S` and traverses it, timing both phases.
fn insert_and_traverse<S: BenchSet>(config: &BenchConfig) -> BenchResult<(S, VariantReport)> {
    let kind = S::KIND;
    let mut set = S::empty();
    set.reserve(config.reserve_for(kind));

    let (inserted, insert_timing) =
        time(phase_label(kind, "insert"), || random_insertion(&mut set, config));
    let inserted = inserted?;
    tracing::debug!(variant = kind.as_str(), inserted, "insertion finished");

    let mut timings = vec![insert_timing];
    let traversal_hash = if config.traversal_hash {
        let (total_hash, timing) = time(phase_label(kind, "traverse"), || sequential_traversal(&set));
        timings.push(timing);
        tracing::info!(variant = kind.as_str(), "Traversal result: {}", total_hash);
        Some(total_hash)
    } else {
        let (visited, timing) = time(phase_label(kind, "traverse"), || plain_traversal(&set));
        timings.push(timing);
        tracing::debug!(variant = kind.as_str(), visited, "traversal finished");
        None
    };

    let report = VariantReport {
        kind,
        len: set.len(),
        traversal_hash,
        load_factor: None,
        timings,
    };
    Ok((set, report))
}

/// `BTreeSet`: random insertion, then sequential traversal.
pub fn run_ordered_set(config: &BenchConfig) -> BenchResult<VariantReport> {
    let (_set, report) = insert_and_traverse::<OrderedSet>(config)?;
    Ok(report)
}

/// [`FlatSet`]: optional reservation, random insertion, then sequential traversal.
pub fn run_flat_set(config: &BenchConfig) -> BenchResult<VariantReport> {
    let (set, report) = insert_and_traverse::<FlatSet<CompositeKey>>(config)?;
    debug_check_invariants!(set, "after flat_set run");
    Ok(report)
}

/// `HashSet`: optional reservation and random insertion. Then it records the
/// load factor, copies the keys into a `Vec` and sorts that copy, timing each
/// step. With traversal hashing on, the sorted copy is folded as well.
pub fn run_hash_set(config: &BenchConfig) -> BenchResult<VariantReport> {
    let kind = SetKind::Hashed;
    let mut set = HashedSet::empty();
    BenchSet::reserve(&mut set, config.reserve_for(kind));

    let (inserted, insert_timing) =
        time(phase_label(kind, "insert"), || random_insertion(&mut set, config));
    let inserted = inserted?;
    tracing::debug!(variant = kind.as_str(), inserted, "insertion finished");

    let load_factor = load_factor(&set);
    tracing::info!(variant = kind.as_str(), "Load factor: {}", load_factor);

    let mut keys: Vec<CompositeKey> = Vec::with_capacity(set.len());
    let ((), copy_timing) = time(phase_label(kind, "copy"), || keys.extend(set.iter().copied()));
    let ((), sort_timing) = time(phase_label(kind, "sort"), || keys.sort_unstable());

    let mut timings = vec![insert_timing, copy_timing, sort_timing];
    let traversal_hash = if config.traversal_hash {
        let (total_hash, timing) = time(phase_label(kind, "traverse"), || {
            keys.iter().fold(0, |acc, key| acc ^ key.hash_value())
        });
        timings.push(timing);
        tracing::info!(variant = kind.as_str(), "Traversal result: {}", total_hash);
        Some(total_hash)
    } else {
        None
    };

    Ok(VariantReport {
        kind,
        len: set.len(),
        traversal_hash,
        load_factor: Some(load_factor),
        timings,
    })
}

/// Runs a single variant.
pub fn run_variant(kind: SetKind, config: &BenchConfig) -> BenchResult<VariantReport> {
    match kind {
        SetKind::Ordered => run_ordered_set(config),
        SetKind::Hashed => run_hash_set(config),
        SetKind::Flat => run_flat_set(config),
    }
}

/// Validates `config` and runs every configured variant in order.
///
/// Disagreement between variants is reported through `tracing`.
pub fn run(config: &BenchConfig) -> BenchResult<BenchReport> {
    run_observed(config, None)
}

/// Like [`run`], but cross-variant disagreement is reported to `observer`
/// (or to `tracing` when `None`).
pub fn run_observed(
    config: &BenchConfig,
    observer: Option<&Arc<dyn ViolationObserver>>,
) -> BenchResult<BenchReport> {
    config.validate()?;
    tracing::info!(
        seed = config.seed,
        low = config.low,
        high = config.high,
        num_iters = config.num_iters,
        "starting benchmark"
    );

    let variants = config
        .variants
        .iter()
        .map(|&kind| run_variant(kind, config))
        .collect::<BenchResult<Vec<_>>>()?;

    let report = BenchReport {
        config: config.clone(),
        variants,
    };

    if let Err(violation) = report.check_invariants() {
        report_violation_to!(
            observer,
            ViolationSeverity::Critical,
            ViolationKind::Container,
            "{}",
            violation
        );
    }
    Ok(report)
}
