//! Benchmark profiles for the Pelagos ray tracer.
//!
//! Provides pre-built environments and sources shared by the criterion
//! benches:
//!
//! - [`channel_profile`]: 1 km isovelocity channel over a 10 km box
//! - [`munk_profile`]: deep ocean with the canonical Munk profile over a
//!   50 km box
//! - [`fan`]: an evenly spaced launch fan at 100 Hz

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use pelagos_core::{RangeBox, Source};
use pelagos_env::{Boundary, BoundaryShape, Environment, Face, SoundSpeed, SurfaceKind};

/// 1 km-deep isovelocity channel: vacuum surface, rigid seabed, 10 km box.
pub fn channel_profile() -> Environment {
    Environment::new(
        surface(),
        seabed(1_000.0),
        SoundSpeed::isovelocity(1500.0).unwrap(),
        vec![],
        RangeBox::new(0.0, 10_000.0).unwrap(),
    )
    .unwrap()
}

/// Deep ocean with the canonical Munk profile (axis at 1300 m), 50 km box.
pub fn munk_profile() -> Environment {
    Environment::new(
        surface(),
        seabed(5_000.0),
        SoundSpeed::munk(1_300.0, 1_492.0).unwrap(),
        vec![],
        RangeBox::new(0.0, 50_000.0).unwrap(),
    )
    .unwrap()
}

/// An `n`-ray fan between ±`half_deg` degrees, 100 Hz, launched from
/// `(0, depth)` into a `[0, rmax]` box. `n` must be at least 2.
pub fn fan(n: usize, half_deg: f64, depth: f64, rmax: f64) -> Source {
    let step = 2.0 * half_deg / (n as f64 - 1.0);
    let angles = (0..n).map(|i| -half_deg + step * i as f64).collect();
    Source::new(0.0, depth, 100.0, angles, RangeBox::new(0.0, rmax).unwrap()).unwrap()
}

fn surface() -> Boundary {
    Boundary::new(
        BoundaryShape::Flat { depth: 0.0 },
        SurfaceKind::Vacuum,
        Face::Above,
        None,
    )
    .unwrap()
}

fn seabed(depth: f64) -> Boundary {
    Boundary::new(
        BoundaryShape::Flat { depth },
        SurfaceKind::Rigid,
        Face::Below,
        None,
    )
    .unwrap()
}
