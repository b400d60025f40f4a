//! Scoped wall-clock timing.
//!
//! A [`Profiler`] starts a clock when it is created. When it is finished or
//! dropped, it logs the elapsed time for its label at `info` level. Calling
//! [`Profiler::finish`] also returns the measurement as a [`PhaseTiming`] so it
//! can go into a report.
//!
//! ```
//! use setbench::profiler::{time, Profiler};
//!
//! let guard = Profiler::start("setup");
//! let timing = guard.finish();
//! assert_eq!(timing.label, "setup");
//!
//! let (sum, timing) = time("sum", || (1..=10u64).sum::<u64>());
//! assert_eq!(sum, 55);
//! assert_eq!(timing.label, "sum");
//! ```

use serde::Serialize;
use web_time::{Duration, Instant};

/// Serializes a `Duration` as fractional seconds.
mod duration_secs {
    use serde::Serializer;
    use web_time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(duration.as_secs_f64())
    }
}

/// One measured phase: what ran and how long it took.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseTiming {
    /// Name of the phase, e.g. `"flat_set/insert"`.
    pub label: String,
    /// Wall-clock time spent. Serialized as seconds.
    #[serde(rename = "seconds", serialize_with = "duration_secs::serialize")]
    pub elapsed: Duration,
}

impl PhaseTiming {
    /// Operations per second for `ops` operations over this phase.
    ///
    /// Returns `None` when the phase took no measurable time.
    #[must_use]
    pub fn throughput(&self, ops: usize) -> Option<f64> {
        let secs = self.elapsed.as_secs_f64();
        (secs > 0.0).then(|| ops as f64 / secs)
    }
}

/// Wall-clock timer for a labelled scope.
#[derive(Debug)]
#[must_use = "a Profiler measures until it is finished or dropped"]
pub struct Profiler {
    label: String,
    start: Instant,
    finished: bool,
}

impl Profiler {
    /// Starts timing `label`.
    pub fn start(label: impl Into<String>) -> Self {
        let label = label.into();
        tracing::debug!(phase = %label, "phase started");
        Self {
            label,
            start: Instant::now(),
            finished: false,
        }
    }

    /// The label this profiler was started with.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Time elapsed since [`start`](Self::start).
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stops timing, logs the result and returns it.
    pub fn finish(mut self) -> PhaseTiming {
        self.finished = true;
        let timing = PhaseTiming {
            label: std::mem::take(&mut self.label),
            elapsed: self.start.elapsed(),
        };
        log_timing(&timing.label, timing.elapsed);
        timing
    }
}

impl Drop for Profiler {
    fn drop(&mut self) {
        if !self.finished {
            log_timing(&self.label, self.start.elapsed());
        }
    }
}

fn log_timing(label: &str, elapsed: Duration) {
    tracing::info!(
        phase = label,
        seconds = elapsed.as_secs_f64(),
        "{}: {:.6}s",
        label,
        elapsed.as_secs_f64()
    );
}

/// Runs `f` under a [`Profiler`] labelled `label`, returning its output and timing.
pub fn time<T>(label: impl Into<String>, f: impl FnOnce() -> T) -> (T, PhaseTiming) {
    let profiler = Profiler::start(label);
    let output = f();
    (output, profiler.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::{Layer, Registry};

    /// Counts `info` events carrying a `phase` field.
    #[derive(Clone, Default)]
    struct PhaseLogCounter(Arc<AtomicUsize>);

    impl PhaseLogCounter {
        fn count(&self) -> usize {
            self.0.load(Ordering::SeqCst)
        }
    }

    impl<S: tracing::Subscriber> Layer<S> for PhaseLogCounter {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            let metadata = event.metadata();
            if *metadata.level() == tracing::Level::INFO && metadata.fields().field("phase").is_some() {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    fn count_phase_logs(f: impl FnOnce()) -> usize {
        let counter = PhaseLogCounter::default();
        let subscriber = Registry::default().with(counter.clone());
        tracing::subscriber::with_default(subscriber, f);
        counter.count()
    }

    #[test]
    fn test_finish_logs_exactly_once() {
        let logged = count_phase_logs(|| {
            let timing = Profiler::start("finished").finish();
            assert_eq!(timing.label, "finished");
        });
        assert_eq!(logged, 1);
    }

    #[test]
    fn test_drop_without_finish_logs_once() {
        let logged = count_phase_logs(|| {
            let _profiler = Profiler::start("dropped");
        });
        assert_eq!(logged, 1);
    }

    #[test]
    fn test_time_logs_once_per_call() {
        let logged = count_phase_logs(|| {
            let _ = time("a", || ());
            let _ = time("b", || ());
        });
        assert_eq!(logged, 2);
    }

    #[test]
    fn test_finish_returns_label_and_monotonic_time() {
        let profiler = Profiler::start("phase");
        assert_eq!(profiler.label(), "phase");
        let early = profiler.elapsed();
        let timing = profiler.finish();
        assert_eq!(timing.label, "phase");
        assert!(timing.elapsed >= early);
    }

    #[test]
    fn test_time_passes_output_through() {
        let (value, timing) = time("double", || 21 * 2);
        assert_eq!(value, 42);
        assert_eq!(timing.label, "double");
    }

    #[test]
    fn test_throughput() {
        let timing = PhaseTiming {
            label: "x".to_owned(),
            elapsed: Duration::from_millis(500),
        };
        assert_eq!(timing.throughput(1000), Some(2000.0));

        let instant = PhaseTiming {
            label: "y".to_owned(),
            elapsed: Duration::ZERO,
        };
        assert_eq!(instant.throughput(1000), None);
    }
}
