//! Unit conventions applied at the engine boundary.
//!
//! Launch angles arrive in degrees with positive values aimed toward the
//! surface; internally the tracer works in radians with depth increasing
//! downward, so conversion flips the sign. Boundary attenuation may arrive
//! in any of five unit systems and is normalized to dB per wavelength
//! before it enters the reflection physics.

use crate::ConfigError;

/// Launch angles with |cos θ| below this are rejected before integration.
pub const MIN_COS_LAUNCH: f64 = 1.0e-7;

/// Phase advance applied per caustic crossing, in radians.
pub const CAUSTIC_PHASE_SHIFT: f64 = std::f64::consts::FRAC_PI_2;

/// Nepers to decibels: `20 / ln(10)`.
const NEPER_TO_DB: f64 = 8.685_889_638_065_035;

/// Q-factor numerator for the dB/λ conversion: `40 π log10(e)`.
const Q_TO_DB_LAMBDA: f64 = 27.287_527_080_389_22;

/// Convert a launch angle in degrees to the internal radian convention.
///
/// The input convention has downward launches negative; the sign flip
/// aligns the internal angle's sine with depth increasing downward, so a
/// positive internal angle descends.
pub fn launch_angle_rad(degrees: f64) -> f64 {
    -degrees.to_radians()
}

/// Unit systems in which boundary attenuation may be specified.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttenUnits {
    /// Decibels per kilohertz of frequency (dB/kHz).
    DbPerKhz,
    /// Decibels per meter of path (dB/m).
    DbPerMeter,
    /// Nepers per wavelength.
    Nepers,
    /// Quality factor (dimensionless; larger Q means less loss).
    QFactor,
    /// Decibels per wavelength. The common basis; passes through unchanged.
    DbPerLambda,
}

/// Normalize an attenuation value to dB per wavelength.
///
/// `frequency` is in Hz and `speed` is the medium sound speed in m/s; both
/// are only consulted for the unit systems that need them.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidAttenuation`] for negative attenuation,
/// a non-positive Q factor, or a non-finite input.
pub fn to_db_per_lambda(
    value: f64,
    units: AttenUnits,
    frequency: f64,
    speed: f64,
) -> Result<f64, ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::InvalidAttenuation {
            reason: format!("value must be finite, got {value}"),
        });
    }
    match units {
        AttenUnits::QFactor => {
            if value <= 0.0 {
                return Err(ConfigError::InvalidAttenuation {
                    reason: format!("Q factor must be positive, got {value}"),
                });
            }
        }
        _ => {
            if value < 0.0 {
                return Err(ConfigError::InvalidAttenuation {
                    reason: format!("attenuation must be non-negative, got {value}"),
                });
            }
        }
    }

    let lambda = speed / frequency;
    Ok(match units {
        AttenUnits::DbPerKhz => value * lambda * frequency * 1.0e-3,
        AttenUnits::DbPerMeter => value * lambda,
        AttenUnits::Nepers => value * NEPER_TO_DB,
        AttenUnits::QFactor => Q_TO_DB_LAMBDA / value,
        AttenUnits::DbPerLambda => value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn launch_angle_flips_sign() {
        let rad = launch_angle_rad(30.0);
        assert!((rad + 30.0_f64.to_radians()).abs() < 1e-15);
        assert_eq!(launch_angle_rad(0.0), -0.0);
    }

    #[test]
    fn db_per_lambda_is_identity() {
        let a = to_db_per_lambda(0.5, AttenUnits::DbPerLambda, 100.0, 1500.0).unwrap();
        assert_eq!(a, 0.5);
    }

    #[test]
    fn db_per_meter_scales_by_wavelength() {
        // λ = 1500/100 = 15 m, so 0.1 dB/m = 1.5 dB/λ.
        let a = to_db_per_lambda(0.1, AttenUnits::DbPerMeter, 100.0, 1500.0).unwrap();
        assert!((a - 1.5).abs() < 1e-12);
    }

    #[test]
    fn db_per_khz_scales_by_wavelength_and_frequency() {
        // λ·f = c, so α dB/kHz → α·c/1000 dB/λ.
        let a = to_db_per_lambda(2.0, AttenUnits::DbPerKhz, 100.0, 1500.0).unwrap();
        assert!((a - 3.0).abs() < 1e-12);
    }

    #[test]
    fn nepers_convert_via_ln10() {
        let a = to_db_per_lambda(1.0, AttenUnits::Nepers, 100.0, 1500.0).unwrap();
        assert!((a - 8.685889638065035).abs() < 1e-12);
    }

    #[test]
    fn q_factor_inverts() {
        let a = to_db_per_lambda(100.0, AttenUnits::QFactor, 100.0, 1500.0).unwrap();
        assert!((a - 0.2728752708038922).abs() < 1e-12);
    }

    #[test]
    fn zero_q_rejected() {
        match to_db_per_lambda(0.0, AttenUnits::QFactor, 100.0, 1500.0) {
            Err(ConfigError::InvalidAttenuation { .. }) => {}
            other => panic!("expected InvalidAttenuation, got {other:?}"),
        }
    }

    #[test]
    fn negative_attenuation_rejected() {
        match to_db_per_lambda(-0.1, AttenUnits::DbPerMeter, 100.0, 1500.0) {
            Err(ConfigError::InvalidAttenuation { .. }) => {}
            other => panic!("expected InvalidAttenuation, got {other:?}"),
        }
    }

    #[test]
    fn nan_attenuation_rejected() {
        match to_db_per_lambda(f64::NAN, AttenUnits::DbPerLambda, 100.0, 1500.0) {
            Err(ConfigError::InvalidAttenuation { .. }) => {}
            other => panic!("expected InvalidAttenuation, got {other:?}"),
        }
    }

    proptest! {
        #[test]
        fn launch_angle_is_odd(deg in -89.0_f64..89.0) {
            prop_assert!((launch_angle_rad(deg) + launch_angle_rad(-deg)).abs() < 1e-15);
            prop_assert!((launch_angle_rad(deg) + deg.to_radians()).abs() < 1e-12);
        }

        #[test]
        fn normalized_attenuation_is_nonnegative(
            value in 0.0_f64..100.0,
            freq in 10.0_f64..10_000.0,
            speed in 200.0_f64..6_000.0,
        ) {
            for units in [
                AttenUnits::DbPerKhz,
                AttenUnits::DbPerMeter,
                AttenUnits::Nepers,
                AttenUnits::DbPerLambda,
            ] {
                let a = to_db_per_lambda(value, units, freq, speed).unwrap();
                prop_assert!(a >= 0.0 && a.is_finite());
            }
        }
    }
}
