//! Coherent pressure synthesis and transmission loss.
//!
//! Each traced ray deposits a beam-weighted complex contribution at every
//! receiver inside its span; contributions add commutatively, so the grid
//! is independent of trace order. Transmission loss is a pointwise
//! transform of the finished pressure grid.

use crate::sample::{passes, sample_pass};
use crate::SearchError;
use num_complex::Complex64;
use pelagos_core::{ReceiverGrid, Source};
use pelagos_env::Environment;
use pelagos_trace::{trace_ray, Ray, TraceError, TraceOptions};

/// Complex acoustic pressure over one receiver geometry.
///
/// The flattened value order matches [`ReceiverGrid::points`]. The grid
/// captures the source's angular frequency and fan spacing at
/// construction, so rays fold in through [`add_ray`](PressureGrid::add_ray)
/// without further context.
#[derive(Clone, Debug)]
pub struct PressureGrid {
    points: Vec<(f64, f64)>,
    shape: (usize, usize),
    values: Vec<Complex64>,
    omega: f64,
    delta_theta: f64,
}

impl PressureGrid {
    /// Zero pressure over the receiver geometry.
    pub fn new(grid: &ReceiverGrid, source: &Source) -> Self {
        let points = grid.points();
        Self {
            shape: grid.shape(),
            values: vec![Complex64::new(0.0, 0.0); points.len()],
            points,
            omega: source.omega(),
            delta_theta: source.fan_spacing(),
        }
    }

    /// Fold one traced ray into every receiver it covers.
    ///
    /// A receiver farther from the ray than the local beam half-width
    /// `|q|·Δθ` receives nothing; inside the beam the contribution is the
    /// hat-weighted complex amplitude with the travel-time phase applied.
    /// Returning rays contribute once per bracketed pass.
    pub fn add_ray(&mut self, ray: &Ray) {
        accumulate_ray(
            &self.points,
            &mut self.values,
            ray,
            self.delta_theta,
            self.omega,
        );
    }

    /// The receiver coordinates in flattened order.
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Logical `(n_ranges, n_depths)` shape of the geometry.
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    /// The complex pressure values in flattened order.
    pub fn values(&self) -> &[Complex64] {
        &self.values
    }

    /// Pressure at one flattened receiver index.
    pub fn at(&self, receiver: usize) -> Complex64 {
        self.values[receiver]
    }
}

/// Deposit one ray's contribution at arbitrary field points.
///
/// Shared by the pressure grid and the particle-velocity star samples.
pub(crate) fn accumulate_ray(
    points: &[(f64, f64)],
    values: &mut [Complex64],
    ray: &Ray,
    delta_theta: f64,
    omega: f64,
) {
    if ray.len() < 2 {
        return;
    }
    for (idx, &(rr, rz)) in points.iter().enumerate() {
        for i in passes(ray, rr) {
            let s = sample_pass(ray, i, rr);
            let half_width = (s.q * delta_theta).abs();
            if half_width == 0.0 {
                continue;
            }
            let dist = (rz - s.z).abs() * s.cos_theta;
            if dist >= half_width {
                continue;
            }
            let weight = (half_width - dist) / half_width;
            values[idx] +=
                s.amplitude * weight * Complex64::from_polar(1.0, -omega * s.tau);
        }
    }
}

/// Trace the launch fan and synthesize the coherent pressure grid.
///
/// Rays are traced in angle order and consumed one at a time; degenerate
/// launch angles are skipped.
pub fn coherent_pressure(
    env: &Environment,
    source: &Source,
    opts: &TraceOptions,
    grid: &ReceiverGrid,
) -> Result<PressureGrid, SearchError> {
    let mut pressure = PressureGrid::new(grid, source);
    for angle in source.fan_radians() {
        match trace_ray(env, source, angle, opts) {
            Ok(ray) => pressure.add_ray(&ray),
            Err(TraceError::DegenerateAngle { cos }) => {
                tracing::debug!(angle, cos, "skipping degenerate launch angle");
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(pressure)
}

/// Transmission loss in dB: `−20·log10(|p|)` pointwise.
///
/// Zero pressure maps to `+∞`; the transform never fails.
pub fn transmission_loss(pressure: &PressureGrid) -> Vec<f64> {
    pressure
        .values
        .iter()
        .map(|p| -20.0 * p.norm().log10())
        .collect()
}
