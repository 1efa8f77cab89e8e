//! Particle velocity by star differencing of the pressure field.
//!
//! Pressure is synthesized at five star points per receiver — left,
//! center, right in range and top, bottom in depth — and the Euler
//! relation `v = ∇p / (iωρ₀)` turns the centered parabolic slope of each
//! axis into a velocity component. The differencing offset is a fraction
//! of the wavelength, clamped to the receiver spacing so the star never
//! straddles a grid cell.

use crate::pressure::accumulate_ray;
use crate::SearchError;
use num_complex::Complex64;
use pelagos_core::{ReceiverGrid, Source};
use pelagos_env::Environment;
use pelagos_math::parabolic_1d_complex;
use pelagos_trace::{trace_ray, Ray, TraceError, TraceOptions};

/// Reference water density in kg/m³ for the Euler relation.
const RHO0: f64 = 1000.0;

/// Differencing offset as a fraction of the wavelength at the source.
const OFFSET_FRACTION: f64 = 0.1;

/// Complex particle velocity over one receiver geometry.
///
/// Component order matches [`ReceiverGrid::points`].
#[derive(Clone, Debug)]
pub struct VelocityField {
    points: Vec<(f64, f64)>,
    shape: (usize, usize),
    vr: Vec<Complex64>,
    vz: Vec<Complex64>,
}

impl VelocityField {
    /// The receiver coordinates in flattened order.
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Logical `(n_ranges, n_depths)` shape of the geometry.
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    /// Horizontal velocity components in flattened order.
    pub fn horizontal(&self) -> &[Complex64] {
        &self.vr
    }

    /// Vertical velocity components in flattened order.
    pub fn vertical(&self) -> &[Complex64] {
        &self.vz
    }
}

/// Pressure accumulated at the five star points of every receiver.
///
/// Rays fold in through [`add_ray`](StarField::add_ray) exactly like the
/// plain pressure grid; [`finish`](StarField::finish) differences the
/// stars into the velocity field.
pub(crate) struct StarField {
    centers: Vec<(f64, f64)>,
    shape: (usize, usize),
    star: Vec<(f64, f64)>,
    values: Vec<Complex64>,
    dr: f64,
    dz: f64,
    omega: f64,
    delta_theta: f64,
}

impl StarField {
    /// Lay out the star points for the receiver geometry.
    ///
    /// The wavelength comes from the sound speed at the source position.
    pub fn new(
        grid: &ReceiverGrid,
        source: &Source,
        env: &Environment,
    ) -> Result<Self, SearchError> {
        let sample = env
            .soundspeed()
            .eval(source.range(), source.depth())
            .map_err(TraceError::from)?;
        let lambda = sample.c / source.frequency();
        let dr = clamp_offset(OFFSET_FRACTION * lambda, &grid.ranges());
        let dz = clamp_offset(OFFSET_FRACTION * lambda, &grid.depths());

        let centers = grid.points();
        let mut star = Vec::with_capacity(centers.len() * 5);
        for &(r, z) in &centers {
            star.push((r - dr, z));
            star.push((r, z));
            star.push((r + dr, z));
            star.push((r, z - dz));
            star.push((r, z + dz));
        }
        Ok(Self {
            shape: grid.shape(),
            values: vec![Complex64::new(0.0, 0.0); star.len()],
            centers,
            star,
            dr,
            dz,
            omega: source.omega(),
            delta_theta: source.fan_spacing(),
        })
    }

    /// Fold one traced ray into every star point it covers.
    pub fn add_ray(&mut self, ray: &Ray) {
        accumulate_ray(
            &self.star,
            &mut self.values,
            ray,
            self.delta_theta,
            self.omega,
        );
    }

    /// Difference the stars into velocity components.
    pub fn finish(self) -> VelocityField {
        // Euler relation with e^{-iωt} time convention: iωρ₀ v = ∇p.
        let scale = Complex64::new(0.0, self.omega * RHO0);
        let mut vr = Vec::with_capacity(self.centers.len());
        let mut vz = Vec::with_capacity(self.centers.len());
        for (k, &(r, z)) in self.centers.iter().enumerate() {
            let base = 5 * k;
            let dpdr = parabolic_1d_complex(
                &[r - self.dr, r, r + self.dr],
                &[self.values[base], self.values[base + 1], self.values[base + 2]],
                r,
            )
            .slope;
            let dpdz = parabolic_1d_complex(
                &[z - self.dz, z, z + self.dz],
                &[self.values[base + 3], self.values[base + 1], self.values[base + 4]],
                z,
            )
            .slope;
            vr.push(dpdr / scale);
            vz.push(dpdz / scale);
        }
        VelocityField {
            points: self.centers,
            shape: self.shape,
            vr,
            vz,
        }
    }
}

/// Clamp the differencing offset to the smallest receiver spacing on an
/// axis. Single-point axes leave the wavelength fraction unclamped.
fn clamp_offset(offset: f64, axis: &[f64]) -> f64 {
    let spacing = axis
        .windows(2)
        .map(|w| (w[1] - w[0]).abs())
        .filter(|d| *d > 0.0)
        .fold(f64::INFINITY, f64::min);
    if spacing.is_finite() {
        offset.min(spacing)
    } else {
        offset
    }
}

/// Trace the launch fan and synthesize the particle-velocity field.
pub fn particle_velocity(
    env: &Environment,
    source: &Source,
    opts: &TraceOptions,
    grid: &ReceiverGrid,
) -> Result<VelocityField, SearchError> {
    let mut stars = StarField::new(grid, source, env)?;
    for angle in source.fan_radians() {
        match trace_ray(env, source, angle, opts) {
            Ok(ray) => stars.add_ray(&ray),
            Err(TraceError::DegenerateAngle { cos }) => {
                tracing::debug!(angle, cos, "skipping degenerate launch angle");
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(stars.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pressure::coherent_pressure;
    use pelagos_test_utils::{fan_source, open_water};

    #[test]
    fn offset_clamps_to_grid_spacing() {
        assert_eq!(clamp_offset(1.5, &[0.0, 1.0, 2.0]), 1.0);
        assert_eq!(clamp_offset(0.5, &[0.0, 10.0]), 0.5);
        assert_eq!(clamp_offset(1.5, &[100.0]), 1.5);
    }

    #[test]
    fn horizontal_ray_moves_water_horizontally() {
        // On the axis of a near-plane wave, |v_r| ≈ |p| / (ρ₀ c) and the
        // vertical component vanishes by beam symmetry. The centered
        // difference at a tenth of a wavelength carries a small sinc
        // error, so the check is loose.
        let env = open_water(1500.0, 2_000.0);
        let source = fan_source(50.0, vec![0.0], 2_000.0);
        let grid = ReceiverGrid::linear(vec![1_000.0], vec![50.0]).unwrap();
        let opts = TraceOptions::for_box(env.range_box());

        let v = particle_velocity(&env, &source, &opts, &grid).unwrap();
        let p = coherent_pressure(&env, &source, &opts, &grid).unwrap().at(0);

        let plane = p.norm() / (RHO0 * 1500.0);
        let vr = v.horizontal()[0].norm();
        assert!(
            (vr - plane).abs() < 0.1 * plane,
            "|v_r| = {vr}, plane-wave estimate {plane}"
        );
        assert!(v.vertical()[0].norm() < 0.05 * vr);
    }

    #[test]
    fn untouched_receiver_has_zero_velocity() {
        let env = open_water(1500.0, 2_000.0);
        let source = fan_source(50.0, vec![0.0], 2_000.0);
        let grid = ReceiverGrid::linear(vec![1_000.0], vec![900.0]).unwrap();
        let opts = TraceOptions::for_box(env.range_box());
        let v = particle_velocity(&env, &source, &opts, &grid).unwrap();
        assert_eq!(v.horizontal()[0], Complex64::new(0.0, 0.0));
        assert_eq!(v.vertical()[0], Complex64::new(0.0, 0.0));
    }

    #[test]
    fn field_layout_matches_receivers() {
        let env = open_water(1500.0, 2_000.0);
        let source = fan_source(50.0, vec![-2.0, 0.0, 2.0], 2_000.0);
        let grid =
            ReceiverGrid::rectangular(vec![500.0, 1_000.0], vec![40.0, 60.0]).unwrap();
        let opts = TraceOptions::for_box(env.range_box());
        let v = particle_velocity(&env, &source, &opts, &grid).unwrap();
        assert_eq!(v.shape(), (2, 2));
        assert_eq!(v.horizontal().len(), 4);
        assert_eq!(v.vertical().len(), 4);
        assert_eq!(v.points()[2], (1_000.0, 40.0));
    }
}
