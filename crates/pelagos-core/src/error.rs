//! Configuration error type shared by the validating constructors.

use std::error::Error;
use std::fmt;

/// Errors detected while constructing run configuration.
///
/// All configuration is validated up front, before any ray is traced; the
/// tracing and synthesis layers assume these invariants hold.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Source frequency is NaN, infinite, zero, or negative.
    InvalidFrequency {
        /// The offending value in Hz.
        value: f64,
    },
    /// The launch fan contains no angles.
    EmptyFan,
    /// A launch angle is NaN or infinite.
    InvalidLaunchAngle {
        /// The offending value in degrees.
        value: f64,
    },
    /// Range box is empty or inverted.
    InvalidRangeBox {
        /// Left edge of the box in meters.
        rmin: f64,
        /// Right edge of the box in meters.
        rmax: f64,
    },
    /// The source range lies outside the range box.
    SourceOutsideBox {
        /// Source range in meters.
        range: f64,
    },
    /// A receiver axis has no points.
    EmptyAxis {
        /// Which axis was empty (`"range"` or `"depth"`).
        axis: &'static str,
    },
    /// A receiver axis is not strictly increasing.
    UnsortedAxis {
        /// Which axis was unsorted (`"range"` or `"depth"`).
        axis: &'static str,
    },
    /// A linear receiver array has mismatched coordinate counts.
    LinearArityMismatch {
        /// Number of range coordinates supplied.
        ranges: usize,
        /// Number of depth coordinates supplied.
        depths: usize,
    },
    /// An attenuation value is invalid for its unit system.
    InvalidAttenuation {
        /// Description of the violation.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFrequency { value } => {
                write!(f, "frequency must be finite and positive, got {value}")
            }
            Self::EmptyFan => write!(f, "launch fan has no angles"),
            Self::InvalidLaunchAngle { value } => {
                write!(f, "launch angle must be finite, got {value}")
            }
            Self::InvalidRangeBox { rmin, rmax } => {
                write!(f, "range box [{rmin}, {rmax}] is empty or inverted")
            }
            Self::SourceOutsideBox { range } => {
                write!(f, "source range {range} lies outside the range box")
            }
            Self::EmptyAxis { axis } => write!(f, "receiver {axis} axis has no points"),
            Self::UnsortedAxis { axis } => {
                write!(f, "receiver {axis} axis is not strictly increasing")
            }
            Self::LinearArityMismatch { ranges, depths } => {
                write!(
                    f,
                    "linear array needs equal coordinate counts, got {ranges} ranges and {depths} depths"
                )
            }
            Self::InvalidAttenuation { reason } => {
                write!(f, "invalid attenuation: {reason}")
            }
        }
    }
}

impl Error for ConfigError {}
