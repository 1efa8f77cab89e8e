//! Reflection physics at elastic boundaries.
//!
//! Uses the effective-impedance form with complex sound speeds: the
//! medium attenuations (already normalized to dB per wavelength) become
//! loss tangents on the compressional and shear speeds, and shear
//! conversion enters through the classic `cos²2γ / sin²2γ` impedance mix.

use crate::EnvError;
use num_complex::Complex64;
use pelagos_core::units::{to_db_per_lambda, AttenUnits};

/// dB-per-wavelength to loss-tangent divisor: `40 π log10(e)`.
const DB_LAMBDA_TO_TANGENT: f64 = 54.575_054_160_778_44;

/// Acoustic properties of the medium on the far side of an interface.
///
/// Density is the ratio of the medium density to the water density.
/// Attenuations are stored in `atten_units` and normalized on use.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceMedium {
    /// Compressional wave speed in m/s.
    pub compressional_speed: f64,
    /// Shear wave speed in m/s; zero for a fluid medium.
    pub shear_speed: f64,
    /// Medium density over water density.
    pub density_ratio: f64,
    /// Compressional attenuation in `atten_units`.
    pub compressional_atten: f64,
    /// Shear attenuation in `atten_units`.
    pub shear_atten: f64,
    /// Unit system of the attenuation values.
    pub atten_units: AttenUnits,
}

impl SurfaceMedium {
    /// Linear interpolation between two media, `t` in `[0, 1]`.
    ///
    /// Both endpoints must share the same attenuation unit system; the
    /// per-point property constructor enforces that upstream.
    pub fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        let mix = |x: f64, y: f64| x + (y - x) * t;
        Self {
            compressional_speed: mix(a.compressional_speed, b.compressional_speed),
            shear_speed: mix(a.shear_speed, b.shear_speed),
            density_ratio: mix(a.density_ratio, b.density_ratio),
            compressional_atten: mix(a.compressional_atten, b.compressional_atten),
            shear_atten: mix(a.shear_atten, b.shear_atten),
            atten_units: a.atten_units,
        }
    }
}

/// Attenuated complex sound speed: `c / (1 + i δ)` with `δ` the loss
/// tangent from the dB-per-wavelength attenuation.
fn complex_speed(c: f64, atten_db_lambda: f64) -> Complex64 {
    if c == 0.0 {
        return Complex64::new(0.0, 0.0);
    }
    let delta = atten_db_lambda / DB_LAMBDA_TO_TANGENT;
    Complex64::new(c, 0.0) / Complex64::new(1.0, delta)
}

/// Complex reflection coefficient of an elastic half-space.
///
/// `incidence` is measured from the inward normal; internally the
/// formula works with the grazing angle `γ = π/2 − incidence`. The
/// shear-free case reduces to the fluid–fluid Rayleigh coefficient.
///
/// # Errors
///
/// Propagates [`EnvError`] wrapping the attenuation normalization when a
/// property value is invalid for its unit system.
pub fn elastic_coefficient(
    medium: &SurfaceMedium,
    incidence: f64,
    c_water: f64,
    frequency: f64,
) -> Result<Complex64, EnvError> {
    let grazing = std::f64::consts::FRAC_PI_2 - incidence.abs();
    let sin_g = grazing.sin();
    let cos_g = grazing.cos();

    // A ray sliding along the interface carries no normal momentum.
    if sin_g.abs() < 1.0e-12 {
        return Ok(Complex64::new(-1.0, 0.0));
    }

    let alpha_p = normalize_atten(
        medium.compressional_atten,
        medium.atten_units,
        frequency,
        medium.compressional_speed,
    )?;
    let cp = complex_speed(medium.compressional_speed, alpha_p);

    let z_water = Complex64::new(c_water / sin_g, 0.0);

    // Snell: cos γ2 / c2 = cos γ1 / c1, complex in the lossy medium.
    let cos_p = cp * (cos_g / c_water);
    let sin_p = (Complex64::new(1.0, 0.0) - cos_p * cos_p).sqrt();
    let z_p = medium.density_ratio * cp / sin_p;

    let z_total = if medium.shear_speed > 0.0 {
        let alpha_s = normalize_atten(
            medium.shear_atten,
            medium.atten_units,
            frequency,
            medium.shear_speed,
        )?;
        let cs = complex_speed(medium.shear_speed, alpha_s);
        let cos_s = cs * (cos_g / c_water);
        let sin_s = (Complex64::new(1.0, 0.0) - cos_s * cos_s).sqrt();
        let z_s = medium.density_ratio * cs / sin_s;

        let sin2 = 2.0 * sin_s * cos_s;
        let cos2 = Complex64::new(1.0, 0.0) - 2.0 * sin_s * sin_s;
        z_p * cos2 * cos2 + z_s * sin2 * sin2
    } else {
        z_p
    };

    Ok((z_total - z_water) / (z_total + z_water))
}

fn normalize_atten(
    value: f64,
    units: AttenUnits,
    frequency: f64,
    speed: f64,
) -> Result<f64, EnvError> {
    to_db_per_lambda(value, units, frequency, speed)
        .map_err(|_| EnvError::InvalidAttenuation { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fluid_bottom(cp: f64, rho: f64) -> SurfaceMedium {
        SurfaceMedium {
            compressional_speed: cp,
            shear_speed: 0.0,
            density_ratio: rho,
            compressional_atten: 0.0,
            shear_atten: 0.0,
            atten_units: AttenUnits::DbPerLambda,
        }
    }

    #[test]
    fn normal_incidence_matches_rayleigh() {
        // R = (ρ2 c2 − ρ1 c1) / (ρ2 c2 + ρ1 c1) at normal incidence.
        let m = fluid_bottom(1600.0, 1.5);
        let r = elastic_coefficient(&m, 0.0, 1500.0, 100.0).unwrap();
        let expected = (1.5 * 1600.0 - 1500.0) / (1.5 * 1600.0 + 1500.0);
        assert!((r.re - expected).abs() < 1e-10, "got {r}");
        assert!(r.im.abs() < 1e-10);
    }

    #[test]
    fn lossless_below_critical_in_unit_interval() {
        // Transmitting regime: steep incidence on a faster lossless bottom.
        let m = fluid_bottom(1700.0, 1.8);
        for inc_deg in [0.0, 10.0, 20.0, 30.0] {
            let r = elastic_coefficient(&m, (inc_deg as f64).to_radians(), 1500.0, 100.0)
                .unwrap();
            let mag = r.norm();
            assert!(
                (0.0..=1.0 + 1e-12).contains(&mag),
                "|R| = {mag} at {inc_deg} deg"
            );
        }
    }

    #[test]
    fn total_reflection_past_critical() {
        // Shallow grazing on a fast lossless bottom reflects totally.
        let m = fluid_bottom(1700.0, 1.8);
        let critical_grazing = (1500.0_f64 / 1700.0).acos();
        let grazing = critical_grazing * 0.5;
        let incidence = std::f64::consts::FRAC_PI_2 - grazing;
        let r = elastic_coefficient(&m, incidence, 1500.0, 100.0).unwrap();
        assert!((r.norm() - 1.0).abs() < 1e-9, "|R| = {}", r.norm());
    }

    #[test]
    fn attenuation_reduces_magnitude() {
        let lossless = fluid_bottom(1700.0, 1.8);
        let mut lossy = lossless.clone();
        lossy.compressional_atten = 0.5;
        let inc = 40.0_f64.to_radians();
        let r0 = elastic_coefficient(&lossless, inc, 1500.0, 100.0).unwrap();
        let r1 = elastic_coefficient(&lossy, inc, 1500.0, 100.0).unwrap();
        assert!(r1.norm() < r0.norm() + 1e-12);
    }

    #[test]
    fn shear_conversion_changes_coefficient() {
        let fluid = fluid_bottom(1700.0, 1.8);
        let mut solid = fluid.clone();
        solid.shear_speed = 600.0;
        let inc = 30.0_f64.to_radians();
        let rf = elastic_coefficient(&fluid, inc, 1500.0, 100.0).unwrap();
        let rs = elastic_coefficient(&solid, inc, 1500.0, 100.0).unwrap();
        assert!((rf - rs).norm() > 1e-6, "shear should shift R");
    }

    #[test]
    fn sliding_incidence_is_minus_one() {
        let m = fluid_bottom(1700.0, 1.8);
        let r = elastic_coefficient(&m, std::f64::consts::FRAC_PI_2, 1500.0, 100.0).unwrap();
        assert_eq!(r, Complex64::new(-1.0, 0.0));
    }
}
