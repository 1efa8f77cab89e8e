//! Error types for the waveguide model.

use std::error::Error;
use std::fmt;

/// Errors from constructing or querying the environment.
///
/// Construction variants fire once, before any ray is traced; the query
/// variants (`OutOfSpan`, `OutOfProfile`) are runtime signals for
/// coordinates outside the tabulated data.
#[derive(Clone, Debug, PartialEq)]
pub enum EnvError {
    /// A boundary or profile needs more control points than were given.
    TooFewPoints {
        /// Minimum number of points for the scheme.
        needed: usize,
        /// Number of points supplied.
        got: usize,
    },
    /// Control-point ranges are not strictly increasing.
    UnsortedRanges,
    /// Profile depths are not strictly increasing.
    UnsortedDepths,
    /// An elastic surface was declared without medium properties.
    MissingElasticProps,
    /// Per-point properties do not match the control-point count.
    PropsArityMismatch {
        /// Number of control points.
        points: usize,
        /// Number of property entries supplied.
        props: usize,
    },
    /// A configuration tag names an interpolation scheme the engine does
    /// not carry. The piecewise-parabolic scheme was removed from the
    /// model; configurations that still carry its tag fail here.
    UnsupportedShape {
        /// The offending scheme tag.
        tag: char,
    },
    /// A tabulated sound speed is non-finite or non-positive.
    InvalidSpeed {
        /// The offending value in m/s.
        value: f64,
    },
    /// A surface attenuation is invalid for its unit system.
    InvalidAttenuation {
        /// The offending value, in the declared units.
        value: f64,
    },
    /// A sound-speed field row has the wrong number of columns.
    FieldArityMismatch {
        /// Row index with the mismatch.
        row: usize,
        /// Expected number of columns.
        expected: usize,
        /// Number of columns found.
        got: usize,
    },
    /// An object's upper curve dips below its lower curve.
    CurveCrossing {
        /// Control-point index where the curves cross.
        index: usize,
    },
    /// A boundary was supplied for the wrong side of the water column.
    FaceMismatch {
        /// Which slot was misconfigured (`"altimetry"` or `"bathymetry"`).
        which: &'static str,
    },
    /// A boundary does not span the run's range box.
    BoxNotCovered {
        /// Which boundary failed coverage (`"altimetry"` or `"bathymetry"`).
        which: &'static str,
    },
    /// An object extends outside the run's range box.
    ObjectOutsideBox {
        /// Index of the offending object.
        index: usize,
    },
    /// A boundary was queried outside its control-point span.
    OutOfSpan {
        /// The queried range in meters.
        range: f64,
    },
    /// The sound-speed table was queried outside its tabulated extent.
    OutOfProfile {
        /// The queried range in meters, where applicable.
        range: f64,
        /// The queried depth in meters.
        depth: f64,
    },
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewPoints { needed, got } => {
                write!(f, "scheme needs at least {needed} points, got {got}")
            }
            Self::UnsortedRanges => write!(f, "ranges must be strictly increasing"),
            Self::UnsortedDepths => write!(f, "depths must be strictly increasing"),
            Self::MissingElasticProps => {
                write!(f, "elastic surface requires medium properties")
            }
            Self::PropsArityMismatch { points, props } => {
                write!(f, "{points} control points but {props} property entries")
            }
            Self::UnsupportedShape { tag } => {
                write!(f, "interpolation scheme '{tag}' is not supported")
            }
            Self::InvalidSpeed { value } => {
                write!(f, "sound speed must be finite and positive, got {value}")
            }
            Self::InvalidAttenuation { value } => {
                write!(f, "attenuation {value} is invalid for its unit system")
            }
            Self::FieldArityMismatch { row, expected, got } => {
                write!(f, "field row {row} has {got} columns, expected {expected}")
            }
            Self::CurveCrossing { index } => {
                write!(f, "object curves cross at control point {index}")
            }
            Self::FaceMismatch { which } => {
                write!(f, "{which} boundary faces the wrong side of the water")
            }
            Self::BoxNotCovered { which } => {
                write!(f, "{which} does not span the range box")
            }
            Self::ObjectOutsideBox { index } => {
                write!(f, "object {index} extends outside the range box")
            }
            Self::OutOfSpan { range } => {
                write!(f, "range {range} is outside the boundary span")
            }
            Self::OutOfProfile { range, depth } => {
                write!(f, "({range}, {depth}) is outside the sound-speed table")
            }
        }
    }
}

impl Error for EnvError {}
