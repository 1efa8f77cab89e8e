//! Pelagos: an ocean-acoustic ray tracer for range/depth waveguides.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Pelagos sub-crates. For most users, adding `pelagos` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use pelagos::prelude::*;
//!
//! // A 2 km isovelocity channel: vacuum surface, rigid seabed at 200 m.
//! let range_box = RangeBox::new(0.0, 2_000.0).unwrap();
//! let surface = Boundary::new(
//!     BoundaryShape::Flat { depth: 0.0 },
//!     SurfaceKind::Vacuum,
//!     Face::Above,
//!     None,
//! )
//! .unwrap();
//! let seabed = Boundary::new(
//!     BoundaryShape::Flat { depth: 200.0 },
//!     SurfaceKind::Rigid,
//!     Face::Below,
//!     None,
//! )
//! .unwrap();
//! let env = Environment::new(
//!     surface,
//!     seabed,
//!     SoundSpeed::isovelocity(1500.0).unwrap(),
//!     vec![],
//!     range_box,
//! )
//! .unwrap();
//!
//! // A 100 Hz source at 100 m depth with an 11-ray fan, and a vertical
//! // receiver array at 1.5 km.
//! let angles: Vec<f64> = (-5..=5).map(f64::from).collect();
//! let source = Source::new(0.0, 100.0, 100.0, angles, range_box).unwrap();
//! let grid = ReceiverGrid::vertical(1_500.0, vec![50.0, 100.0, 150.0]).unwrap();
//! let opts = TraceOptions::for_box(range_box);
//!
//! let (output, summary) = pelagos::field::run(
//!     &env,
//!     &source,
//!     &opts,
//!     &grid,
//!     &SearchConfig::default(),
//!     OutputKind::CoherentPressure,
//! )
//! .unwrap();
//! assert_eq!(summary.rays_traced, 11);
//! let Output::CoherentPressure(pressure) = output else { unreachable!() };
//! assert_eq!(pressure.values().len(), 3);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`config`] | `pelagos-core` | Source, receiver grids, unit conversions, configuration errors |
//! | [`math`] | `pelagos-math` | Barycentric interpolation, bracketing, 2D geometry |
//! | [`env`] | `pelagos-env` | Boundaries, objects, sound-speed fields, the environment |
//! | [`trace`] | `pelagos-trace` | Ray records, the eikonal integrator, trace options |
//! | [`field`] | `pelagos-field` | Eigenray search, pressure/TL synthesis, particle velocity, products |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Run configuration and unit conventions (`pelagos-core`).
///
/// The [`config::Source`], [`config::ReceiverGrid`], and
/// [`config::RangeBox`] types plus the attenuation and launch-angle
/// conversions in [`config::units`].
pub use pelagos_core as config;

/// Interpolation, bracketing, and 2D geometry primitives (`pelagos-math`).
///
/// Pure leaf helpers: [`math::linear_1d`], [`math::parabolic_1d`],
/// [`math::cubic_1d`], [`math::bracket`], [`math::bracket_all`], and the
/// [`math::Vec2`] geometry operations.
pub use pelagos_math as math;

/// The ocean waveguide model (`pelagos-env`).
///
/// Build an [`env::Environment`] from [`env::Boundary`] interfaces,
/// [`env::Object`] obstacles, and a [`env::SoundSpeed`] field.
pub use pelagos_env as env;

/// Eikonal and dynamic ray integration (`pelagos-trace`).
///
/// [`trace::trace_ray`] integrates one trajectory into a [`trace::Ray`];
/// [`trace::trace_fan`] runs the whole launch fan.
pub use pelagos_trace as trace;

/// Eigenray search and field synthesis (`pelagos-field`).
///
/// The eigenray searches, the coherent [`field::PressureGrid`],
/// transmission loss, particle velocity, and the one-product
/// [`field::run`] driver.
pub use pelagos_field as field;

/// Common imports for typical Pelagos usage.
///
/// ```rust
/// use pelagos::prelude::*;
/// ```
///
/// This imports the configuration types, the environment builders, the
/// tracer entry points, and the search/synthesis surface.
pub mod prelude {
    // Run configuration
    pub use pelagos_core::units::AttenUnits;
    pub use pelagos_core::{ConfigError, RangeBox, ReceiverGrid, Source};

    // Environment
    pub use pelagos_env::{
        Boundary, BoundaryShape, EnvError, Environment, Face, Object, SoundSpeed,
        SurfaceKind, SurfaceMedium, SurfaceProps,
    };

    // Tracing
    pub use pelagos_trace::{
        trace_fan, trace_ray, Ray, RayFate, TraceError, TraceOptions,
    };

    // Search and synthesis
    pub use pelagos_field::{
        coherent_pressure, particle_velocity, proximity_search, regula_falsi_search,
        transmission_loss, Arrival, ArrivalSet, EigenraySolver, Output, OutputKind,
        PressureGrid, RunSummary, SearchConfig, SearchError, VelocityField,
    };
}
