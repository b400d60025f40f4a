//! Benchmark configuration.
//!
//! | Preset | Keys drawn | Range | Purpose |
//! |--------|-----------|-------|---------|
//! | [`BenchConfig::original`] (default) | 1,000,000 | `[1, 20]` | The reference workload |
//! | [`BenchConfig::quick`] | 10,000 | `[1, 20]` | Smoke runs and tests |
//!
//! ```
//! use setbench::{BenchConfig, SetKind};
//!
//! let config = BenchConfig::quick()
//!     .with_seed(7)
//!     .with_range(1, 8)?
//!     .with_variants(vec![SetKind::Flat, SetKind::Ordered])?
//!     .with_reserve_capacity(false);
//! assert_eq!(config.span(), 8);
//! # Ok::<(), setbench::BenchError>(())
//! ```

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::rng::RandGen;
use crate::{BenchError, BenchResult};

/// The container strategies under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum SetKind {
    /// `BTreeSet`: ordered, tree-based.
    #[serde(rename = "ordered_set")]
    Ordered,
    /// `HashSet` with a deterministic hasher.
    #[serde(rename = "hash_set")]
    Hashed,
    /// [`FlatSet`](crate::FlatSet): sorted contiguous vector.
    #[serde(rename = "flat_set")]
    Flat,
}

impl SetKind {
    /// Every variant, in the order the benchmark runs them by default.
    pub const ALL: [Self; 3] = [Self::Ordered, Self::Hashed, Self::Flat];

    /// Short name used in phase labels, logs and on the command line.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ordered => "ordered_set",
            Self::Hashed => "hash_set",
            Self::Flat => "flat_set",
        }
    }
}

impl fmt::Display for SetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SetKind {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ordered_set" | "ordered" | "btree" => Ok(Self::Ordered),
            "hash_set" | "hashed" | "hash" => Ok(Self::Hashed),
            "flat_set" | "flat" => Ok(Self::Flat),
            other => Err(BenchError::InvalidConfig {
                info: format!(
                    "unknown set kind '{}', expected one of ordered_set, hash_set, flat_set",
                    other
                ),
            }),
        }
    }
}

/// Parameters of a benchmark run.
///
/// Every variant builds its own [`RandGen`] from `seed`, `low` and `high`, so
/// all containers receive the identical key sequence.
///
/// # Forward Compatibility
///
/// New fields may be added. Construct with a preset plus `with_*` calls, or
/// use `..BenchConfig::default()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[must_use = "BenchConfig has no effect unless passed to setbench::run()"]
pub struct BenchConfig {
    /// Generator seed.
    ///
    /// Default: 1
    pub seed: u64,

    /// Inclusive lower bound of every key field.
    ///
    /// Default: 1
    pub low: u64,

    /// Inclusive upper bound of every key field.
    ///
    /// Default: 20
    pub high: u64,

    /// Number of keys drawn and inserted per variant. Duplicates collapse, so
    /// the final set size is at most `min(num_iters, span^4)`.
    ///
    /// Default: 1,000,000
    pub num_iters: usize,

    /// Pre-reserve capacity before inserting: `span` elements for the flat set
    /// and `span * 4` for the hash set, both capped at `num_iters`. The
    /// ordered set has no capacity to reserve.
    ///
    /// Default: true
    pub reserve_capacity: bool,

    /// Fold every key's hash into a running XOR while traversing. When off,
    /// traversal still visits every key but records no hash.
    ///
    /// Default: true
    pub traversal_hash: bool,

    /// Variants to run, in order.
    ///
    /// Default: ordered, hashed, flat
    pub variants: Vec<SetKind>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self::original()
    }
}

impl BenchConfig {
    /// Creates a new `BenchConfig` with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// The reference workload: one million draws in `[1, 20]` with seed 1.
    pub fn original() -> Self {
        Self {
            seed: 1,
            low: 1,
            high: 20,
            num_iters: 1_000_000,
            reserve_capacity: true,
            traversal_hash: true,
            variants: SetKind::ALL.to_vec(),
        }
    }

    /// A small workload for smoke runs: ten thousand draws, otherwise like
    /// [`original`](Self::original).
    pub fn quick() -> Self {
        Self {
            num_iters: 10_000,
            ..Self::original()
        }
    }

    /// Sets the generator seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the inclusive range of key fields.
    ///
    /// # Errors
    /// Returns [`BenchError::InvalidRange`] if `low > high`.
    pub fn with_range(mut self, low: u64, high: u64) -> BenchResult<Self> {
        if low > high {
            return Err(BenchError::InvalidRange { low, high });
        }
        self.low = low;
        self.high = high;
        Ok(self)
    }

    /// Sets the number of keys drawn per variant.
    ///
    /// # Errors
    /// Returns [`BenchError::InvalidConfig`] if `num_iters` is zero.
    pub fn with_iterations(mut self, num_iters: usize) -> BenchResult<Self> {
        if num_iters == 0 {
            return Err(BenchError::InvalidConfig {
                info: "num_iters must be greater than 0".to_owned(),
            });
        }
        self.num_iters = num_iters;
        Ok(self)
    }

    /// Enables or disables pre-reserving container capacity.
    pub fn with_reserve_capacity(mut self, reserve_capacity: bool) -> Self {
        self.reserve_capacity = reserve_capacity;
        self
    }

    /// Enables or disables hashing during traversal.
    pub fn with_traversal_hash(mut self, traversal_hash: bool) -> Self {
        self.traversal_hash = traversal_hash;
        self
    }

    /// Selects which variants run, in order.
    ///
    /// # Errors
    /// Returns [`BenchError::InvalidConfig`] if the list is empty or repeats a variant.
    pub fn with_variants(mut self, variants: Vec<SetKind>) -> BenchResult<Self> {
        validate_variants(&variants)?;
        self.variants = variants;
        Ok(self)
    }

    /// Checks all fields, including ones set directly rather than through `with_*`.
    pub fn validate(&self) -> BenchResult<()> {
        if self.low > self.high {
            return Err(BenchError::InvalidRange {
                low: self.low,
                high: self.high,
            });
        }
        if self.num_iters == 0 {
            return Err(BenchError::InvalidConfig {
                info: "num_iters must be greater than 0".to_owned(),
            });
        }
        validate_variants(&self.variants)
    }

    /// Number of distinct values a single field can take, saturating at `u64::MAX`.
    #[must_use]
    pub fn span(&self) -> u64 {
        self.high.saturating_sub(self.low).saturating_add(1)
    }

    /// A fresh generator for this configuration.
    pub fn rand_gen(&self) -> BenchResult<RandGen> {
        RandGen::new(self.seed, self.low, self.high)
    }

    /// Elements to reserve up front for `kind`, or 0 when reservation is off.
    #[must_use]
    pub fn reserve_for(&self, kind: SetKind) -> usize {
        if !self.reserve_capacity {
            return 0;
        }
        let span = usize::try_from(self.span()).unwrap_or(usize::MAX);
        let wanted = match kind {
            SetKind::Ordered => 0,
            SetKind::Hashed => span.saturating_mul(4),
            SetKind::Flat => span,
        };
        wanted.min(self.num_iters)
    }
}

fn validate_variants(variants: &[SetKind]) -> BenchResult<()> {
    if variants.is_empty() {
        return Err(BenchError::InvalidConfig {
            info: "at least one variant must be selected".to_owned(),
        });
    }
    for (idx, kind) in variants.iter().enumerate() {
        if variants[..idx].contains(kind) {
            return Err(BenchError::InvalidConfig {
                info: format!("variant {} selected more than once", kind),
            });
        }
    }
    Ok(())
}
