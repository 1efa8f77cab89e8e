//! Ocean waveguide model for Pelagos.
//!
//! Defines the immutable per-run [`Environment`]: the sea surface and
//! seabed as [`Boundary`] values, zero or more scattering [`Object`]s,
//! and the [`SoundSpeed`] field with its derivatives. The tracer consumes
//! these through read-only references; nothing here mutates after
//! construction.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod boundary;
mod environment;
mod error;
mod object;
mod reflection;
mod soundspeed;

pub use boundary::{
    shape_from_tag, Boundary, BoundaryPoint, BoundaryShape, Face, SurfaceKind, SurfaceProps,
};
pub use environment::{Collider, Environment, HitKind};
pub use error::EnvError;
pub use object::Object;
pub use reflection::SurfaceMedium;
pub use soundspeed::{SoundSpeed, SoundSpeedSample};
