//! Dynamic (paraxial) state carried along a trajectory.
//!
//! The pair `(p, q)` obeys `dq/ds = c p`, `dp/ds = −(c_nn / c²) q` with
//! `c_nn` the second derivative of sound speed normal to the ray. A sign
//! change in `q` is a caustic crossing; the complex amplitude follows the
//! geometric-beam convention from `q`, the source-fixed reference `q0`,
//! and the accumulated reflection-coefficient product.

use num_complex::Complex64;
use pelagos_core::units::CAUSTIC_PHASE_SHIFT;
use pelagos_env::SoundSpeedSample;
use pelagos_math::{dot, Vec2};

/// A grazing contact this close to parallel leaves the paraxial pair
/// untouched rather than dividing by a vanishing normal component.
const GRAZING_EPS: f64 = 1.0e-10;

/// Paraxial state advanced alongside the eikonal integration.
#[derive(Clone, Copy, Debug)]
pub(crate) struct DynamicState {
    /// Paraxial momentum.
    pub p: f64,
    /// Paraxial spreading.
    pub q: f64,
    /// Accumulated caustic phase in radians.
    pub phase: f64,
    /// Caustic crossings so far.
    pub caustics: u32,
    /// Accumulated product of boundary reflection coefficients.
    pub refl: Complex64,
}

impl DynamicState {
    /// Point-source initial conditions: `q(0) = 0`, `p(0) = 1/c(0)`.
    pub fn at_source(c0: f64) -> Self {
        Self {
            p: 1.0 / c0,
            q: 0.0,
            phase: 0.0,
            caustics: 0,
            refl: Complex64::new(1.0, 0.0),
        }
    }

    /// Advance `(p, q)` over an arclength `h` using midpoint coefficients,
    /// and register a caustic when `q` changes sign.
    pub fn advance(&mut self, h: f64, c_mid: f64, cnn_mid: f64) {
        let p_old = self.p;
        let q_old = self.q;
        self.q = q_old + h * c_mid * p_old;
        self.p = p_old - h * (cnn_mid / (c_mid * c_mid)) * q_old;
        if q_old != 0.0 && q_old * self.q < 0.0 {
            self.caustics += 1;
            self.phase -= CAUSTIC_PHASE_SHIFT;
        }
    }

    /// Boundary-reflection transform of the paraxial pair.
    ///
    /// `incident` is the unit ray direction arriving at the hit;
    /// `tangent`/`normal` the boundary frame, `curvature` its signed
    /// curvature, and `sample` the local sound-speed derivatives. The
    /// correction mixes the tangential and normal gradient components
    /// with the boundary curvature; `q` itself is continuous.
    pub fn reflect(
        &mut self,
        incident: Vec2,
        tangent: Vec2,
        normal: Vec2,
        curvature: f64,
        sample: &SoundSpeedSample,
    ) {
        let tg = dot(incident, tangent);
        let th = dot(incident, normal);
        if th.abs() < GRAZING_EPS {
            return;
        }
        let cn = sample.cr * normal.r + sample.cz * normal.z;
        let cs = sample.cr * tangent.r + sample.cz * tangent.z;
        let rm = tg / th;
        let c2 = sample.c * sample.c;
        let rn = rm * (4.0 * cn - 2.0 * rm * cs) / c2 + 2.0 * curvature * rm * rm / th;
        self.p += self.q * rn;
    }

    /// Complex geometric-beam amplitude at the current state.
    ///
    /// `q0` is the source-fixed reference beam parameter, `c` the local
    /// speed, `c0` the speed at the source, and `cos_theta0` the cosine
    /// of the launch angle. Where the tube has zero width the amplitude
    /// is undefined; zero is stored and synthesis skips the sample.
    pub fn amplitude(&self, c: f64, c0: f64, cos_theta0: f64, q0: f64) -> Complex64 {
        if self.q == 0.0 {
            return Complex64::new(0.0, 0.0);
        }
        let arg = Complex64::new(q0 * c * cos_theta0 / (c0 * self.q), 0.0);
        arg.sqrt() * self.refl / (4.0 * std::f64::consts::PI)
    }
}

/// Second derivative of sound speed normal to a unit ray direction.
pub(crate) fn normal_curvature(sample: &SoundSpeedSample, direction: Vec2) -> f64 {
    // Normal to (tr, tz) is (−tz, tr); contract the Hessian with it.
    let nr = -direction.z;
    let nz = direction.r;
    sample.crr * nr * nr + 2.0 * sample.crz * nr * nz + sample.czz * nz * nz
}
