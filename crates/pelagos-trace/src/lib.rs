//! Eikonal and dynamic ray integration for Pelagos.
//!
//! [`trace_ray`] advances one trajectory through the waveguide by
//! classic Runge–Kutta steps on the eikonal equations, resolving
//! boundary and object collisions as it goes, while the dynamic
//! (paraxial) state — spreading, phase, caustics, complex amplitude —
//! is co-integrated along the same path. [`trace_fan`] runs a whole
//! launch fan in angle order.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod dynamic;
mod eikonal;
mod error;
mod ray;

pub use eikonal::{trace_fan, trace_ray, TraceOptions};
pub use error::TraceError;
pub use ray::{Ray, RayFate, RayStep};
