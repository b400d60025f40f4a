//! Common test infrastructure shared across integration tests.
//!
//! ```ignore
//! mod common;
//! use common::{small_config, RANGE};
//! ```

use setbench::BenchConfig;

/// A narrow field range: 6^4 = 1296 possible keys, so a few thousand draws
/// produce plenty of duplicates.
pub const RANGE: (u64, u64) = (1, 6);

/// Draws per variant in integration tests.
pub const DRAWS: usize = 5_000;

/// All variants, a narrow range and a few thousand draws.
#[allow(clippy::unwrap_used, dead_code)]
pub fn small_config() -> BenchConfig {
    BenchConfig::quick()
        .with_range(RANGE.0, RANGE.1)
        .unwrap()
        .with_iterations(DRAWS)
        .unwrap()
}

/// Installs a test-friendly tracing subscriber once; later calls are no-ops.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
