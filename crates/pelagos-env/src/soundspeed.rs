//! The sound-speed field and its derivatives.
//!
//! Every integrator step queries [`SoundSpeed::eval`] for the local speed
//! and its first and second derivatives; the analytic variants return
//! closed-form derivatives, the tabulated variants differentiate their
//! interpolation windows.

use crate::EnvError;
use pelagos_math::{bracket, cubic_1d, linear_1d, parabolic_1d, Interpolated};

/// Munk canonical-profile perturbation scale.
const MUNK_EPSILON: f64 = 7.37e-3;
/// Munk canonical-profile depth scale in meters.
const MUNK_SCALE: f64 = 1300.0;

/// Sound speed and derivatives at one point of the water column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SoundSpeedSample {
    /// Sound speed in m/s.
    pub c: f64,
    /// ∂c/∂r in 1/s.
    pub cr: f64,
    /// ∂c/∂z in 1/s.
    pub cz: f64,
    /// ∂²c/∂r² in 1/(m·s).
    pub crr: f64,
    /// ∂²c/∂z² in 1/(m·s).
    pub czz: f64,
    /// ∂²c/∂r∂z in 1/(m·s).
    pub crz: f64,
}

/// The sound-speed field of the waveguide.
#[derive(Clone, Debug, PartialEq)]
pub enum SoundSpeed {
    /// Constant speed everywhere.
    Isovelocity {
        /// Sound speed in m/s.
        c0: f64,
    },
    /// Linear depth gradient: `c = c0 + g (z − z0)`.
    LinearGradient {
        /// Speed at the reference depth, m/s.
        c0: f64,
        /// Reference depth in meters.
        z0: f64,
        /// Gradient in 1/s.
        gradient: f64,
    },
    /// Munk canonical deep-water profile around a sound channel axis.
    Munk {
        /// Channel axis depth in meters.
        z_axis: f64,
        /// Speed at the axis in m/s.
        c_axis: f64,
    },
    /// Tabulated depth profile `c(z)`, range independent.
    ProfileZ {
        /// Strictly increasing depths in meters.
        depths: Vec<f64>,
        /// Speeds at the tabulated depths, m/s.
        speeds: Vec<f64>,
    },
    /// Tabulated field `c(r, z)` interpolated by nested 1D passes.
    FieldRz {
        /// Strictly increasing ranges in meters.
        ranges: Vec<f64>,
        /// Strictly increasing depths in meters.
        depths: Vec<f64>,
        /// Speeds indexed `[range][depth]`, m/s.
        speeds: Vec<Vec<f64>>,
    },
}

impl SoundSpeed {
    /// Constant-speed field.
    pub fn isovelocity(c0: f64) -> Result<Self, EnvError> {
        check_speed(c0)?;
        Ok(Self::Isovelocity { c0 })
    }

    /// Linear depth-gradient field.
    pub fn linear_gradient(c0: f64, z0: f64, gradient: f64) -> Result<Self, EnvError> {
        check_speed(c0)?;
        Ok(Self::LinearGradient { c0, z0, gradient })
    }

    /// Munk canonical profile.
    pub fn munk(z_axis: f64, c_axis: f64) -> Result<Self, EnvError> {
        check_speed(c_axis)?;
        Ok(Self::Munk { z_axis, c_axis })
    }

    /// Tabulated depth profile. Needs at least two points.
    pub fn profile_z(depths: Vec<f64>, speeds: Vec<f64>) -> Result<Self, EnvError> {
        if depths.len() < 2 || depths.len() != speeds.len() {
            return Err(EnvError::TooFewPoints {
                needed: 2,
                got: depths.len().min(speeds.len()),
            });
        }
        if depths.windows(2).any(|w| w[1] <= w[0]) {
            return Err(EnvError::UnsortedDepths);
        }
        for &c in &speeds {
            check_speed(c)?;
        }
        Ok(Self::ProfileZ { depths, speeds })
    }

    /// Tabulated range/depth field. Needs at least a 2×2 table.
    pub fn field_rz(
        ranges: Vec<f64>,
        depths: Vec<f64>,
        speeds: Vec<Vec<f64>>,
    ) -> Result<Self, EnvError> {
        if ranges.len() < 2 {
            return Err(EnvError::TooFewPoints {
                needed: 2,
                got: ranges.len(),
            });
        }
        if depths.len() < 2 {
            return Err(EnvError::TooFewPoints {
                needed: 2,
                got: depths.len(),
            });
        }
        if ranges.windows(2).any(|w| w[1] <= w[0]) {
            return Err(EnvError::UnsortedRanges);
        }
        if depths.windows(2).any(|w| w[1] <= w[0]) {
            return Err(EnvError::UnsortedDepths);
        }
        if speeds.len() != ranges.len() {
            return Err(EnvError::FieldArityMismatch {
                row: speeds.len(),
                expected: ranges.len(),
                got: speeds.len(),
            });
        }
        for (row, col) in speeds.iter().enumerate() {
            if col.len() != depths.len() {
                return Err(EnvError::FieldArityMismatch {
                    row,
                    expected: depths.len(),
                    got: col.len(),
                });
            }
            for &c in col {
                check_speed(c)?;
            }
        }
        Ok(Self::FieldRz {
            ranges,
            depths,
            speeds,
        })
    }

    /// Evaluate speed and derivatives at `(r, z)`.
    ///
    /// # Errors
    ///
    /// [`EnvError::OutOfProfile`] when a tabulated variant is queried
    /// outside its table.
    pub fn eval(&self, r: f64, z: f64) -> Result<SoundSpeedSample, EnvError> {
        match self {
            Self::Isovelocity { c0 } => Ok(SoundSpeedSample {
                c: *c0,
                cr: 0.0,
                cz: 0.0,
                crr: 0.0,
                czz: 0.0,
                crz: 0.0,
            }),
            Self::LinearGradient { c0, z0, gradient } => Ok(SoundSpeedSample {
                c: c0 + gradient * (z - z0),
                cr: 0.0,
                cz: *gradient,
                crr: 0.0,
                czz: 0.0,
                crz: 0.0,
            }),
            Self::Munk { z_axis, c_axis } => {
                let eta = 2.0 * (z - z_axis) / MUNK_SCALE;
                let decay = (-eta).exp();
                let scale = 2.0 / MUNK_SCALE;
                Ok(SoundSpeedSample {
                    c: c_axis * (1.0 + MUNK_EPSILON * (eta + decay - 1.0)),
                    cr: 0.0,
                    cz: c_axis * MUNK_EPSILON * scale * (1.0 - decay),
                    crr: 0.0,
                    czz: c_axis * MUNK_EPSILON * scale * scale * decay,
                    crz: 0.0,
                })
            }
            Self::ProfileZ { depths, speeds } => {
                let out = interp_window(depths, speeds, z)
                    .ok_or(EnvError::OutOfProfile { range: r, depth: z })?;
                Ok(SoundSpeedSample {
                    c: out.value,
                    cr: 0.0,
                    cz: out.slope,
                    crr: 0.0,
                    czz: out.curvature,
                    crz: 0.0,
                })
            }
            Self::FieldRz {
                ranges,
                depths,
                speeds,
            } => field_eval(ranges, depths, speeds, r, z),
        }
    }

    /// Evaluate with the query clamped into the tabulated extent.
    ///
    /// Runge–Kutta stages probe slightly past an interface before the
    /// collision is resolved; the integrator clamps those transient
    /// queries instead of failing mid-step. Analytic variants evaluate
    /// directly.
    pub fn eval_clamped(&self, r: f64, z: f64) -> SoundSpeedSample {
        let (rq, zq) = match self {
            Self::ProfileZ { depths, .. } => {
                (r, z.clamp(depths[0], depths[depths.len() - 1]))
            }
            Self::FieldRz { ranges, depths, .. } => (
                r.clamp(ranges[0], ranges[ranges.len() - 1]),
                z.clamp(depths[0], depths[depths.len() - 1]),
            ),
            _ => (r, z),
        };
        self.eval(rq, zq).expect("clamped query is inside the table")
    }
}

fn check_speed(c: f64) -> Result<(), EnvError> {
    if !c.is_finite() || c <= 0.0 {
        return Err(EnvError::InvalidSpeed { value: c });
    }
    Ok(())
}

/// 1D interpolation with window order chosen by table size: linear for 2
/// points, parabolic for 3, a sliding 4-point cubic window otherwise.
fn interp_window(xs: &[f64], ys: &[f64], x: f64) -> Option<Interpolated> {
    let i = bracket(xs, x)?;
    Some(match xs.len() {
        2 => linear_1d(&[xs[0], xs[1]], &[ys[0], ys[1]], x),
        3 => parabolic_1d(&[xs[0], xs[1], xs[2]], &[ys[0], ys[1], ys[2]], x),
        n => {
            let i0 = i.saturating_sub(1).min(n - 4);
            cubic_1d(
                &[xs[i0], xs[i0 + 1], xs[i0 + 2], xs[i0 + 3]],
                &[ys[i0], ys[i0 + 1], ys[i0 + 2], ys[i0 + 3]],
                x,
            )
        }
    })
}

fn field_eval(
    ranges: &[f64],
    depths: &[f64],
    speeds: &[Vec<f64>],
    r: f64,
    z: f64,
) -> Result<SoundSpeedSample, EnvError> {
    let ir = bracket(ranges, r).ok_or(EnvError::OutOfProfile { range: r, depth: z })?;

    // Up to four range columns around the bracket, matching the window
    // order used along each axis.
    let (i0, width) = match ranges.len() {
        2 => (0, 2),
        3 => (0, 3),
        n => (ir.saturating_sub(1).min(n - 4), 4),
    };

    let mut col_r = [0.0; 4];
    let mut col_c = [0.0; 4];
    let mut col_cz = [0.0; 4];
    let mut col_czz = [0.0; 4];
    for k in 0..width {
        let out = interp_window(depths, &speeds[i0 + k], z)
            .ok_or(EnvError::OutOfProfile { range: r, depth: z })?;
        col_r[k] = ranges[i0 + k];
        col_c[k] = out.value;
        col_cz[k] = out.slope;
        col_czz[k] = out.curvature;
    }

    let along = |ys: &[f64; 4]| -> Interpolated {
        match width {
            2 => linear_1d(&[col_r[0], col_r[1]], &[ys[0], ys[1]], r),
            3 => parabolic_1d(
                &[col_r[0], col_r[1], col_r[2]],
                &[ys[0], ys[1], ys[2]],
                r,
            ),
            _ => cubic_1d(&col_r, ys, r),
        }
    };

    let c_out = along(&col_c);
    let cz_out = along(&col_cz);
    let czz_out = along(&col_czz);

    Ok(SoundSpeedSample {
        c: c_out.value,
        cr: c_out.slope,
        cz: cz_out.value,
        crr: c_out.curvature,
        czz: czz_out.value,
        crz: cz_out.slope,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn isovelocity_has_no_gradients() {
        let ss = SoundSpeed::isovelocity(1500.0).unwrap();
        let s = ss.eval(1234.0, 56.0).unwrap();
        assert_eq!(s.c, 1500.0);
        assert_eq!((s.cr, s.cz, s.crr, s.czz, s.crz), (0.0, 0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn linear_gradient_derivative() {
        let ss = SoundSpeed::linear_gradient(1500.0, 0.0, 0.017).unwrap();
        let s = ss.eval(0.0, 1000.0).unwrap();
        assert!((s.c - 1517.0).abs() < 1e-12);
        assert_eq!(s.cz, 0.017);
        assert_eq!(s.czz, 0.0);
    }

    #[test]
    fn munk_axis_is_a_minimum() {
        let ss = SoundSpeed::munk(1300.0, 1480.0).unwrap();
        let at_axis = ss.eval(0.0, 1300.0).unwrap();
        assert!((at_axis.c - 1480.0).abs() < 1e-9);
        assert!(at_axis.cz.abs() < 1e-12);
        assert!(at_axis.czz > 0.0);
        // Speed grows away from the axis in both directions.
        assert!(ss.eval(0.0, 300.0).unwrap().c > 1480.0);
        assert!(ss.eval(0.0, 3000.0).unwrap().c > 1480.0);
    }

    #[test]
    fn profile_reproduces_table_and_errors_outside() {
        let depths = vec![0.0, 100.0, 200.0, 300.0, 400.0];
        let speeds = vec![1500.0, 1490.0, 1485.0, 1490.0, 1500.0];
        let ss = SoundSpeed::profile_z(depths.clone(), speeds.clone()).unwrap();
        for (z, c) in depths.iter().zip(speeds.iter()) {
            let s = ss.eval(0.0, *z).unwrap();
            assert!((s.c - c).abs() < 1e-9, "c({z}) = {}, want {c}", s.c);
        }
        match ss.eval(0.0, 401.0) {
            Err(EnvError::OutOfProfile { .. }) => {}
            other => panic!("expected OutOfProfile, got {other:?}"),
        }
    }

    #[test]
    fn two_point_profile_is_linear() {
        let ss = SoundSpeed::profile_z(vec![0.0, 100.0], vec![1500.0, 1520.0]).unwrap();
        let s = ss.eval(0.0, 50.0).unwrap();
        assert!((s.c - 1510.0).abs() < 1e-12);
        assert!((s.cz - 0.2).abs() < 1e-12);
    }

    #[test]
    fn field_interpolates_both_axes() {
        // c(r, z) = 1500 + 0.01 r + 0.05 z is reproduced exactly by the
        // nested linear windows of a 2×2 table.
        let ss = SoundSpeed::field_rz(
            vec![0.0, 1000.0],
            vec![0.0, 100.0],
            vec![vec![1500.0, 1505.0], vec![1510.0, 1515.0]],
        )
        .unwrap();
        let s = ss.eval(500.0, 50.0).unwrap();
        assert!((s.c - 1507.5).abs() < 1e-9);
        assert!((s.cr - 0.01).abs() < 1e-12);
        assert!((s.cz - 0.05).abs() < 1e-12);
        assert!(s.crz.abs() < 1e-12);
    }

    #[test]
    fn field_row_arity_checked() {
        match SoundSpeed::field_rz(
            vec![0.0, 1000.0],
            vec![0.0, 100.0],
            vec![vec![1500.0, 1505.0], vec![1510.0]],
        ) {
            Err(EnvError::FieldArityMismatch { row: 1, .. }) => {}
            other => panic!("expected FieldArityMismatch, got {other:?}"),
        }
    }

    #[test]
    fn nonpositive_speed_rejected() {
        match SoundSpeed::isovelocity(0.0) {
            Err(EnvError::InvalidSpeed { value }) => assert_eq!(value, 0.0),
            other => panic!("expected InvalidSpeed, got {other:?}"),
        }
        match SoundSpeed::profile_z(vec![0.0, 10.0], vec![1500.0, -1.0]) {
            Err(EnvError::InvalidSpeed { .. }) => {}
            other => panic!("expected InvalidSpeed, got {other:?}"),
        }
    }
}
