//! Error type for eigenray search and field synthesis.

use pelagos_trace::TraceError;
use std::error::Error;
use std::fmt;

/// Errors from the search and synthesis layer.
///
/// A failed bracket or an exhausted refinement is not an error — those
/// are normal skip signals. The variants here are the unrecoverable
/// invariant violations and propagated trace failures.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchError {
    /// A returning ray reached the regula-falsi path, which is only
    /// defined for single-valued range-to-depth trajectories.
    ReturningRay {
        /// Launch angle of the offending ray, internal radians.
        angle: f64,
    },
    /// A receiver collected more eigenray candidates than rays traced.
    CandidateOverflow {
        /// Flattened receiver index.
        receiver: usize,
        /// Number of candidates found.
        candidates: usize,
        /// Number of rays in the fan.
        rays: usize,
    },
    /// Ray integration failed underneath the search.
    Trace(TraceError),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReturningRay { angle } => {
                write!(
                    f,
                    "returning ray at launch angle {angle} rad on the regula-falsi path"
                )
            }
            Self::CandidateOverflow {
                receiver,
                candidates,
                rays,
            } => {
                write!(
                    f,
                    "receiver {receiver} has {candidates} eigenray candidates from {rays} rays"
                )
            }
            Self::Trace(e) => write!(f, "trace failed: {e}"),
        }
    }
}

impl Error for SearchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Trace(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TraceError> for SearchError {
    fn from(e: TraceError) -> Self {
        Self::Trace(e)
    }
}
