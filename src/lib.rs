//! # setbench
//!
//! A deterministic micro-benchmark comparing three set strategies over a
//! four-field composite key:
//!
//! - an ordered tree set (`BTreeSet`),
//! - a hash set (`HashSet` with a fixed FNV-1a hasher),
//! - a flat set ([`FlatSet`], a sorted contiguous vector).
//!
//! Every variant is fed the identical pseudo-random key sequence. The sequence
//! comes from a seeded [`RandGen`](rng::RandGen) whose output depends only on
//! its seed and range. Each phase is timed with a [`Profiler`](profiler::Profiler)
//! and logged through `tracing`.
//!
//! ```
//! use setbench::{BenchConfig, SetKind};
//!
//! let config = BenchConfig::quick().with_iterations(1_000)?;
//! let report = setbench::run(&config)?;
//!
//! let ordered = report.variant(SetKind::Ordered).map(|v| v.traversal_hash);
//! let flat = report.variant(SetKind::Flat).map(|v| v.traversal_hash);
//! assert_eq!(ordered, flat);
//! # Ok::<(), setbench::BenchError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub use bench::config::{BenchConfig, SetKind};
pub use bench::harness::{
    run, run_flat_set, run_hash_set, run_observed, run_ordered_set, run_variant, BenchSet,
};
pub use bench::report::{BenchReport, VariantReport};
pub use error::BenchError;
pub use flat_set::FlatSet;
pub use key::{CompositeKey, KeyStream};
pub use profiler::{PhaseTiming, Profiler};
pub use rng::RandGen;

#[doc(hidden)]
pub mod error;
/// Deterministic FNV-1a hashing, used for key hashes and the hash-set variant.
pub mod hash;
pub mod flat_set;
pub mod key;
pub mod prelude;
pub mod profiler;
/// Seeded PCG32 generator and the bounded [`RandGen`](rng::RandGen) built on it.
pub mod rng;
pub mod telemetry;
#[cfg(test)]
pub(crate) mod test_config;

/// The benchmark itself: configuration, workloads and reports.
pub mod bench {
    pub mod config;
    pub mod harness;
    pub mod report;
}

/// Result type used throughout the crate.
pub type BenchResult<T> = Result<T, BenchError>;
