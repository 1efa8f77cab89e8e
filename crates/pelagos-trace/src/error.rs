//! Error type for ray integration.

use pelagos_env::EnvError;
use std::error::Error;
use std::fmt;

/// Errors from tracing one ray.
#[derive(Clone, Debug, PartialEq)]
pub enum TraceError {
    /// The launch angle is too close to vertical to integrate in range.
    ///
    /// Fan-level callers treat this as a skip signal, not a failure.
    DegenerateAngle {
        /// |cos θ| of the rejected angle.
        cos: f64,
    },
    /// The environment refused a query along the trajectory.
    Env(EnvError),
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateAngle { cos } => {
                write!(f, "launch angle too steep to trace, |cos| = {cos:e}")
            }
            Self::Env(e) => write!(f, "environment query failed: {e}"),
        }
    }
}

impl Error for TraceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Env(e) => Some(e),
            _ => None,
        }
    }
}

impl From<EnvError> for TraceError {
    fn from(e: EnvError) -> Self {
        Self::Env(e)
    }
}
