//! Interpolation, bracketing, and 2D geometry primitives for Pelagos.
//!
//! Pure, stateless leaf crate. The interpolators use barycentric
//! (weighted-difference) windows for stability near clustered samples;
//! the bracketing searches signal out-of-range queries through return
//! values, never panics.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod bracket;
mod geom;
mod interp;

pub use bracket::{bracket, bracket_all, MAX_BRACKET_MATCHES};
pub use geom::{dot, intersect, reflect, Vec2};
pub use interp::{
    cubic_1d, linear_1d, parabolic_1d, parabolic_1d_complex, Interpolated, InterpolatedComplex,
};
