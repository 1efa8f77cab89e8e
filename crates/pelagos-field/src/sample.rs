//! Interpolation of ray state at a receiver range.

use num_complex::Complex64;
use pelagos_math::{bracket, bracket_all};
use pelagos_trace::Ray;

/// Ray state interpolated at one range crossing.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PassSample {
    /// Ray depth at the crossing.
    pub z: f64,
    /// Travel time at the crossing.
    pub tau: f64,
    /// Paraxial spreading at the crossing.
    pub q: f64,
    /// Complex amplitude with the caustic phase folded in.
    pub amplitude: Complex64,
    /// |cos| of the local ray inclination, for perpendicular distances.
    pub cos_theta: f64,
}

/// Every step interval in which the ray crosses range `r`.
///
/// Non-returning rays have a single-valued range axis and use the binary
/// bracket; returning rays scan every pass.
pub(crate) fn passes(ray: &Ray, r: f64) -> Vec<usize> {
    if ray.is_returning() {
        bracket_all(ray.ranges(), r).into_iter().collect()
    } else {
        bracket(ray.ranges(), r).into_iter().collect()
    }
}

/// Linearly interpolate the ray state across step interval `i` at range
/// `r`. The interval must bracket `r`.
pub(crate) fn sample_pass(ray: &Ray, i: usize, r: f64) -> PassSample {
    let r0 = ray.ranges()[i];
    let r1 = ray.ranges()[i + 1];
    let t = if r1 == r0 { 0.0 } else { (r - r0) / (r1 - r0) };
    let lerp = |a: f64, b: f64| a + (b - a) * t;

    let z0 = ray.depths()[i];
    let z1 = ray.depths()[i + 1];
    let z = lerp(z0, z1);
    let tau = lerp(ray.travel_times()[i], ray.travel_times()[i + 1]);
    let q = lerp(ray.q()[i], ray.q()[i + 1]);
    let phase = lerp(ray.phases()[i], ray.phases()[i + 1]);

    let a0 = ray.amplitudes()[i];
    let a1 = ray.amplitudes()[i + 1];
    let amplitude = (a0 + (a1 - a0) * t) * Complex64::from_polar(1.0, phase);

    let dr = (r1 - r0).abs();
    let chord = (r1 - r0).hypot(z1 - z0);
    let cos_theta = if chord == 0.0 { 1.0 } else { dr / chord };

    PassSample {
        z,
        tau,
        q,
        amplitude,
        cos_theta,
    }
}

/// Ray depth at range `r` for single-valued trajectories, NaN out of
/// span. The regula-falsi tabulation leans on the NaN signal.
pub(crate) fn depth_at(ray: &Ray, r: f64) -> f64 {
    match bracket(ray.ranges(), r) {
        Some(i) => sample_pass(ray, i, r).z,
        None => f64::NAN,
    }
}
