//! Canonical analytic scenarios for Pelagos development.
//!
//! These environments have closed-form ray solutions, so the tracing and
//! search crates test against known travel times and eigenray angles
//! instead of regression snapshots.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use pelagos_core::{RangeBox, Source};
use pelagos_env::{
    Boundary, BoundaryShape, Environment, Face, SoundSpeed, SurfaceKind,
};

/// A flat vacuum surface at depth zero.
pub fn vacuum_surface() -> Boundary {
    Boundary::new(
        BoundaryShape::Flat { depth: 0.0 },
        SurfaceKind::Vacuum,
        Face::Above,
        None,
    )
    .unwrap()
}

/// A flat rigid surface at depth zero, for multi-bounce scenarios where
/// the pressure-release surface would kill the ray on first contact.
pub fn rigid_surface() -> Boundary {
    Boundary::new(
        BoundaryShape::Flat { depth: 0.0 },
        SurfaceKind::Rigid,
        Face::Above,
        None,
    )
    .unwrap()
}

/// A flat rigid seabed at the given depth.
pub fn rigid_bottom(depth: f64) -> Boundary {
    Boundary::new(
        BoundaryShape::Flat { depth },
        SurfaceKind::Rigid,
        Face::Below,
        None,
    )
    .unwrap()
}

/// Flat isovelocity waveguide: vacuum surface at 0, rigid bottom at
/// `depth`, constant speed `c0`, box `[0, rmax]`.
///
/// Straight-ray travel time is exactly `distance / c0`.
pub fn flat_isovelocity(depth: f64, c0: f64, rmax: f64) -> Environment {
    Environment::new(
        vacuum_surface(),
        rigid_bottom(depth),
        SoundSpeed::isovelocity(c0).unwrap(),
        vec![],
        RangeBox::new(0.0, rmax).unwrap(),
    )
    .unwrap()
}

/// Flat isovelocity waveguide with rigid boundaries on both sides, so
/// rays bounce without loss until they leave the box.
pub fn hard_waveguide(depth: f64, c0: f64, rmax: f64) -> Environment {
    Environment::new(
        rigid_surface(),
        rigid_bottom(depth),
        SoundSpeed::isovelocity(c0).unwrap(),
        vec![],
        RangeBox::new(0.0, rmax).unwrap(),
    )
    .unwrap()
}

/// Isovelocity wedge: vacuum surface at 0, rigid bottom sloping linearly
/// from `depth_at_zero` down-range to `depth_at_rmax`, constant speed.
///
/// With a flat-surface image argument the direct eigenray angle to any
/// receiver is known analytically.
pub fn isovelocity_wedge(
    depth_at_zero: f64,
    depth_at_rmax: f64,
    c0: f64,
    rmax: f64,
) -> Environment {
    let bottom = Boundary::new(
        BoundaryShape::Sloped {
            ranges: [0.0, rmax],
            depths: [depth_at_zero, depth_at_rmax],
        },
        SurfaceKind::Rigid,
        Face::Below,
        None,
    )
    .unwrap();
    Environment::new(
        vacuum_surface(),
        bottom,
        SoundSpeed::isovelocity(c0).unwrap(),
        vec![],
        RangeBox::new(0.0, rmax).unwrap(),
    )
    .unwrap()
}

/// Deep isovelocity half-space: boundaries far from the water column of
/// interest, so rays in the bulk never reflect.
pub fn open_water(c0: f64, rmax: f64) -> Environment {
    Environment::new(
        vacuum_surface(),
        rigid_bottom(50_000.0),
        SoundSpeed::isovelocity(c0).unwrap(),
        vec![],
        RangeBox::new(0.0, rmax).unwrap(),
    )
    .unwrap()
}

/// A source at `(0, depth)` with the given fan, 100 Hz, box `[0, rmax]`.
pub fn fan_source(depth: f64, angles_deg: Vec<f64>, rmax: f64) -> Source {
    Source::new(
        0.0,
        depth,
        100.0,
        angles_deg,
        RangeBox::new(0.0, rmax).unwrap(),
    )
    .unwrap()
}
