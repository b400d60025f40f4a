//! Convenient re-exports for common usage.
//!
//! ```rust
//! use setbench::prelude::*;
//!
//! let config = BenchConfig::quick()
//!     .with_iterations(500)?
//!     .with_variants(vec![SetKind::Flat])?;
//! let report = run(&config)?;
//! assert_eq!(report.variants.len(), 1);
//! # Ok::<(), BenchError>(())
//! ```
//!
//! # What's Included
//!
//! - **Running**: [`run`], [`run_observed`], [`run_variant`]
//! - **Configuration**: [`BenchConfig`], [`SetKind`]
//! - **Results**: [`BenchReport`], [`VariantReport`], [`PhaseTiming`]
//! - **Data**: [`CompositeKey`], [`KeyStream`], [`RandGen`], [`FlatSet`]
//! - **Error handling**: [`BenchError`], [`BenchResult`]

// Running a benchmark
pub use crate::{run, run_observed, run_variant, BenchSet};

// Configuration
pub use crate::{BenchConfig, SetKind};

// Results
pub use crate::{BenchReport, PhaseTiming, Profiler, VariantReport};

// Keys, generator and containers
pub use crate::{CompositeKey, FlatSet, KeyStream, RandGen};

// Error handling
pub use crate::{BenchError, BenchResult};
