//! Results of a benchmark run.

use std::fmt;

use serde::Serialize;
use web_time::Duration;

use crate::bench::config::{BenchConfig, SetKind};
use crate::profiler::PhaseTiming;
use crate::telemetry::{InvariantChecker, InvariantViolation};
#[cfg(feature = "json")]
use crate::{BenchError, BenchResult};

/// Outcome of running one container variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantReport {
    /// Which container was measured.
    pub kind: SetKind,
    /// Distinct keys held after insertion.
    pub len: usize,
    /// XOR of every key's hash, if traversal hashing was enabled.
    pub traversal_hash: Option<u64>,
    /// Elements per unit of capacity after insertion; hash set only.
    pub load_factor: Option<f64>,
    /// Timed phases, in execution order.
    pub timings: Vec<PhaseTiming>,
}

impl VariantReport {
    /// Finds the timing of `phase` (e.g. `"insert"`) for this variant.
    #[must_use]
    pub fn timing(&self, phase: &str) -> Option<&PhaseTiming> {
        let label = phase_label(self.kind, phase);
        self.timings.iter().find(|t| t.label == label)
    }

    /// Sum of all phase timings.
    #[must_use]
    pub fn total(&self) -> Duration {
        self.timings.iter().map(|t| t.elapsed).sum()
    }
}

/// Label of a phase in reports and logs: `"<kind>/<phase>"`.
#[must_use]
pub fn phase_label(kind: SetKind, phase: &str) -> String {
    format!("{}/{}", kind, phase)
}

/// Everything a run produced: the configuration and one report per variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchReport {
    /// The configuration the run used.
    pub config: BenchConfig,
    /// Per-variant results, in the order they ran.
    pub variants: Vec<VariantReport>,
}

impl BenchReport {
    /// The report for `kind`, if that variant ran.
    #[must_use]
    pub fn variant(&self, kind: SetKind) -> Option<&VariantReport> {
        self.variants.iter().find(|v| v.kind == kind)
    }

    /// Serializes this report to a JSON string.
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> BenchResult<String> {
        serde_json::to_string(self).map_err(|err| BenchError::SerializationError {
            context: format!("benchmark report: {}", err),
        })
    }

    /// Like [`to_json`](Self::to_json), but with indentation for readability.
    #[cfg(feature = "json")]
    pub fn to_json_pretty(&self) -> BenchResult<String> {
        serde_json::to_string_pretty(self).map_err(|err| BenchError::SerializationError {
            context: format!("benchmark report: {}", err),
        })
    }
}

/// All variants were fed the same keys, so they must agree on the number of
/// distinct keys and on every traversal hash that was computed.
impl InvariantChecker for BenchReport {
    fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let Some(first) = self.variants.first() else {
            return Ok(());
        };

        for other in &self.variants[1..] {
            if other.len != first.len {
                return Err(InvariantViolation::new(
                    "BenchReport",
                    "variants disagree on the number of distinct keys",
                )
                .with_details(format!(
                    "{}={}, {}={}",
                    first.kind, first.len, other.kind, other.len
                )));
            }
        }

        let mut hashes = self
            .variants
            .iter()
            .filter_map(|v| v.traversal_hash.map(|h| (v.kind, h)));
        if let Some((first_kind, first_hash)) = hashes.next() {
            for (kind, hash) in hashes {
                if hash != first_hash {
                    return Err(InvariantViolation::new(
                        "BenchReport",
                        "variants disagree on the traversal hash",
                    )
                    .with_details(format!(
                        "{}={:#x}, {}={:#x}",
                        first_kind, first_hash, kind, hash
                    )));
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for BenchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "seed: {}  |  range: [{}, {}]  |  draws: {}",
            self.config.seed, self.config.low, self.config.high, self.config.num_iters
        )?;
        writeln!(
            f,
            "{:<12} {:>10} {:>10} {:>10} {:>10} {:>10} {:>8} {:>18}",
            "variant", "len", "insert(s)", "trav(s)", "copy(s)", "sort(s)", "load", "traversal hash"
        )?;
        for v in &self.variants {
            let secs = |phase: &str| {
                v.timing(phase)
                    .map_or_else(|| "-".to_owned(), |t| format!("{:.4}", t.elapsed.as_secs_f64()))
            };
            let load = v
                .load_factor
                .map_or_else(|| "-".to_owned(), |lf| format!("{:.3}", lf));
            let hash = v
                .traversal_hash
                .map_or_else(|| "-".to_owned(), |h| format!("{:#018x}", h));
            writeln!(
                f,
                "{:<12} {:>10} {:>10} {:>10} {:>10} {:>10} {:>8} {:>18}",
                v.kind.as_str(),
                v.len,
                secs("insert"),
                secs("traverse"),
                secs("copy"),
                secs("sort"),
                load,
                hash
            )?;
        }
        Ok(())
    }
}
