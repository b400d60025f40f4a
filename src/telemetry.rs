//! Structured telemetry for broken invariants and misuse.
//!
//! Library code never panics on a broken contract. Instead it builds a
//! [`Violation`] and hands it to a [`ViolationObserver`]. The default
//! observer is [`TracingObserver`], which logs through `tracing`; tests swap in
//! a [`CollectingObserver`] to assert on what was reported.
//!
//! # Example
//!
//! ```
//! use setbench::telemetry::{CollectingObserver, ViolationKind, ViolationObserver, Violation, ViolationSeverity};
//!
//! let observer = CollectingObserver::new();
//! observer.on_violation(&Violation::new(
//!     ViolationSeverity::Warning,
//!     ViolationKind::Generator,
//!     "inverted range",
//!     "rng.rs:1",
//! ));
//! assert!(observer.has_violation(ViolationKind::Generator));
//! ```

use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Severity of a reported violation, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationSeverity {
    /// Unexpected but recoverable - the operation continued with a fallback.
    Warning,
    /// The result of the operation may be degraded.
    Error,
    /// A type invariant is broken; results computed from it cannot be trusted.
    Critical,
}

impl ViolationSeverity {
    /// Returns a string representation suitable for logging labels.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        }
    }
}

impl std::fmt::Display for ViolationSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The subsystem a violation was detected in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ViolationKind {
    /// The random generator was asked for something it cannot produce,
    /// such as a value from an inverted range.
    Generator,
    /// A container-level contract failed, e.g. two variants fed identical
    /// input disagree on their contents.
    Container,
    /// A runtime invariant check failed.
    ///
    /// Only checked in debug builds or when the `paranoid` feature is enabled.
    Invariant,
}

impl ViolationKind {
    /// Returns a string representation suitable for logging labels.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Generator => "generator",
            Self::Container => "container",
            Self::Invariant => "invariant",
        }
    }
}

impl std::fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recorded violation with enough context to diagnose it.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Violation {
    /// The severity level of this violation.
    pub severity: ViolationSeverity,
    /// The subsystem where the violation occurred.
    pub kind: ViolationKind,
    /// Human-readable description of what went wrong.
    pub message: String,
    /// Source location where the violation was detected (file:line).
    pub location: &'static str,
    /// Additional structured context as key-value pairs.
    pub context: BTreeMap<String, String>,
}

impl Violation {
    /// Creates a new violation with no context.
    #[must_use]
    pub fn new(
        severity: ViolationSeverity,
        kind: ViolationKind,
        message: impl Into<String>,
        location: &'static str,
    ) -> Self {
        Self {
            severity,
            kind,
            message: message.into(),
            location,
            context: BTreeMap::new(),
        }
    }

    /// Adds a context key-value pair.
    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Serializes this violation to a JSON string.
    ///
    /// Returns `None` if serialization fails.
    #[cfg(feature = "json")]
    #[must_use]
    pub fn to_json(&self) -> Option<String> {
        serde_json::to_string(self).ok()
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}/{}] {} (at {}",
            self.severity, self.kind, self.message, self.location
        )?;
        if !self.context.is_empty() {
            write!(f, ", context={:?}", self.context)?;
        }
        write!(f, ")")
    }
}

/// Receives violations as they are detected.
///
/// Observers are shared behind an `Arc`, so implementations must be
/// `Send + Sync`.
pub trait ViolationObserver: Send + Sync {
    /// Called when a violation is detected. Should return quickly.
    fn on_violation(&self, violation: &Violation);
}

/// Default observer: logs violations via the `tracing` crate.
///
/// `Warning` maps to `tracing::warn!`; `Error` and `Critical` map to
/// `tracing::error!`. Severity, kind, location and context are emitted as
/// structured fields.
#[derive(Debug, Default, Clone)]
pub struct TracingObserver;

impl TracingObserver {
    /// Creates a new tracing observer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ViolationObserver for TracingObserver {
    fn on_violation(&self, violation: &Violation) {
        let severity = violation.severity.as_str();
        let kind = violation.kind.as_str();
        let location = violation.location;
        let context = format!("{:?}", violation.context);

        match violation.severity {
            ViolationSeverity::Warning => {
                tracing::warn!(severity, kind, location, context = %context, "{}", violation.message);
            },
            ViolationSeverity::Error | ViolationSeverity::Critical => {
                tracing::error!(severity, kind, location, context = %context, "{}", violation.message);
            },
        }
    }
}

/// Observer that stores every violation it sees, for tests.
#[derive(Debug, Default)]
pub struct CollectingObserver {
    violations: Mutex<Vec<Violation>>,
}

impl CollectingObserver {
    /// Creates a new collecting observer with an empty violation list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            violations: Mutex::new(Vec::new()),
        }
    }

    /// Returns a copy of all collected violations.
    #[must_use]
    pub fn violations(&self) -> Vec<Violation> {
        self.violations.lock().clone()
    }

    /// Returns the number of collected violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.violations.lock().len()
    }

    /// Returns true if no violations have been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.lock().is_empty()
    }

    /// Checks if any violation of the specified kind has been collected.
    #[must_use]
    pub fn has_violation(&self, kind: ViolationKind) -> bool {
        self.violations.lock().iter().any(|v| v.kind == kind)
    }

    /// Clears all collected violations.
    pub fn clear(&self) {
        self.violations.lock().clear();
    }
}

impl ViolationObserver for CollectingObserver {
    fn on_violation(&self, violation: &Violation) {
        self.violations.lock().push(violation.clone());
    }
}

/// Reports a violation to an optional observer, falling back to [`TracingObserver`] if `None`.
pub fn report_to_observer<O: ViolationObserver + ?Sized>(
    observer: Option<&Arc<O>>,
    violation: &Violation,
) {
    match observer {
        Some(obs) => obs.on_violation(violation),
        None => TracingObserver.on_violation(violation),
    }
}

/// Reports a violation with the current file and line to the [`TracingObserver`].
///
/// ```text
/// report_violation!(severity, kind, "message");
/// report_violation!(severity, kind, "message with {}", format_args);
/// ```
#[macro_export]
macro_rules! report_violation {
    ($severity:expr, $kind:expr, $msg:literal) => {{
        use $crate::telemetry::ViolationObserver as _;
        let violation = $crate::telemetry::Violation::new(
            $severity,
            $kind,
            $msg,
            concat!(file!(), ":", line!()),
        );
        $crate::telemetry::TracingObserver.on_violation(&violation);
    }};

    ($severity:expr, $kind:expr, $fmt:literal, $($arg:tt)+) => {{
        use $crate::telemetry::ViolationObserver as _;
        let violation = $crate::telemetry::Violation::new(
            $severity,
            $kind,
            format!($fmt, $($arg)+),
            concat!(file!(), ":", line!()),
        );
        $crate::telemetry::TracingObserver.on_violation(&violation);
    }};
}

/// Like [`report_violation!`], but routes through an `Option<Arc<_>>` observer.
#[macro_export]
macro_rules! report_violation_to {
    ($observer:expr, $severity:expr, $kind:expr, $msg:literal) => {{
        let violation = $crate::telemetry::Violation::new(
            $severity,
            $kind,
            $msg,
            concat!(file!(), ":", line!()),
        );
        $crate::telemetry::report_to_observer($observer, &violation);
    }};

    ($observer:expr, $severity:expr, $kind:expr, $fmt:literal, $($arg:tt)+) => {{
        let violation = $crate::telemetry::Violation::new(
            $severity,
            $kind,
            format!($fmt, $($arg)+),
            concat!(file!(), ":", line!()),
        );
        $crate::telemetry::report_to_observer($observer, &violation);
    }};
}

// ==========================================
// Runtime Invariant Checking
// ==========================================

/// Describes which invariant of which type was broken.
#[derive(Debug, Clone, serde::Serialize)]
pub struct InvariantViolation {
    /// Name of the type whose invariant was violated.
    pub type_name: &'static str,
    /// Description of the violated invariant.
    pub invariant: String,
    /// Additional diagnostic context.
    pub details: Option<String>,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    #[must_use]
    pub fn new(type_name: &'static str, invariant: impl Into<String>) -> Self {
        Self {
            type_name,
            invariant: invariant.into(),
            details: None,
        }
    }

    /// Adds additional details to the violation.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.type_name, self.invariant)?;
        if let Some(details) = &self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

/// Types that maintain internal invariants which can be checked at runtime.
pub trait InvariantChecker {
    /// Returns `Ok(())` if all invariants hold, or the first broken one.
    fn check_invariants(&self) -> Result<(), InvariantViolation>;
}

/// Checks invariants in debug builds (or with `paranoid`), reporting failures as
/// `Critical` violations. Otherwise it only borrows its arguments.
#[macro_export]
#[cfg(any(debug_assertions, feature = "paranoid"))]
macro_rules! debug_check_invariants {
    ($expr:expr) => {{
        use $crate::telemetry::InvariantChecker as _;
        if let Err(violation) = $expr.check_invariants() {
            $crate::report_violation!(
                $crate::telemetry::ViolationSeverity::Critical,
                $crate::telemetry::ViolationKind::Invariant,
                "{}",
                violation
            );
        }
    }};

    ($expr:expr, $context:expr) => {{
        use $crate::telemetry::InvariantChecker as _;
        if let Err(violation) = $expr.check_invariants() {
            $crate::report_violation!(
                $crate::telemetry::ViolationSeverity::Critical,
                $crate::telemetry::ViolationKind::Invariant,
                "{} [context: {}]",
                violation,
                $context
            );
        }
    }};
}

/// Release version without `paranoid`: borrows its arguments, checks nothing.
#[macro_export]
#[cfg(not(any(debug_assertions, feature = "paranoid")))]
macro_rules! debug_check_invariants {
    ($expr:expr) => {{
        let _ = &$expr;
    }};
    ($expr:expr, $context:expr) => {{
        let _ = &$expr;
        let _ = &$context;
    }};
}
