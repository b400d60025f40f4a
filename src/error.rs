use std::error::Error;
use std::fmt;
use std::fmt::Display;

/// This enum contains all error messages this library can return. Fallible API functions return a [`BenchResult<T>`].
///
/// [`BenchResult<T>`]: crate::BenchResult
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BenchError {
    /// A generator range was requested with a lower bound above its upper bound.
    InvalidRange {
        /// The requested lower bound.
        low: u64,
        /// The requested upper bound.
        high: u64,
    },
    /// The benchmark configuration is unusable, usually because of wrong parameters for a builder call.
    InvalidConfig {
        /// Further specifies why the configuration was invalid.
        info: String,
    },
    /// Serialization of a report failed.
    SerializationError {
        /// A description of what failed to serialize.
        context: String,
    },
}

impl Display for BenchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BenchError::InvalidRange { low, high } => {
                write!(
                    f,
                    "Invalid range [{}, {}]: lower bound exceeds upper bound",
                    low, high
                )
            }
            BenchError::InvalidConfig { info } => {
                write!(f, "Invalid configuration: {}", info)
            }
            BenchError::SerializationError { context } => {
                write!(f, "Serialization error: {}", context)
            }
        }
    }
}

impl Error for BenchError {}
