//! Barycentric interpolation windows over 2, 3, and 4 samples.
//!
//! Each interpolator returns the value together with its first (and where
//! defined second) derivative at the query point. The windows reproduce
//! their control points exactly and are exact for polynomials up to their
//! own order.

use num_complex::Complex64;

/// Value and derivatives of a real interpolation window at a query point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interpolated {
    /// Interpolated value.
    pub value: f64,
    /// First derivative with respect to the abscissa.
    pub slope: f64,
    /// Second derivative with respect to the abscissa.
    pub curvature: f64,
}

/// Value and derivatives of a complex interpolation window at a query point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InterpolatedComplex {
    /// Interpolated value.
    pub value: Complex64,
    /// First derivative with respect to the abscissa.
    pub slope: Complex64,
    /// Second derivative with respect to the abscissa.
    pub curvature: Complex64,
}

/// Two-point linear interpolation.
///
/// Exact for degree ≤ 1. Curvature is identically zero.
pub fn linear_1d(x: &[f64; 2], y: &[f64; 2], xi: f64) -> Interpolated {
    let slope = (y[1] - y[0]) / (x[1] - x[0]);
    Interpolated {
        value: y[0] + slope * (xi - x[0]),
        slope,
        curvature: 0.0,
    }
}

/// Three-point barycentric parabolic interpolation.
///
/// Exact for degree ≤ 2.
pub fn parabolic_1d(x: &[f64; 3], y: &[f64; 3], xi: f64) -> Interpolated {
    let d0 = (x[0] - x[1]) * (x[0] - x[2]);
    let d1 = (x[1] - x[0]) * (x[1] - x[2]);
    let d2 = (x[2] - x[0]) * (x[2] - x[1]);

    let l0 = (xi - x[1]) * (xi - x[2]) / d0;
    let l1 = (xi - x[0]) * (xi - x[2]) / d1;
    let l2 = (xi - x[0]) * (xi - x[1]) / d2;

    let l0p = (2.0 * xi - x[1] - x[2]) / d0;
    let l1p = (2.0 * xi - x[0] - x[2]) / d1;
    let l2p = (2.0 * xi - x[0] - x[1]) / d2;

    Interpolated {
        value: y[0] * l0 + y[1] * l1 + y[2] * l2,
        slope: y[0] * l0p + y[1] * l1p + y[2] * l2p,
        curvature: 2.0 * (y[0] / d0 + y[1] / d1 + y[2] / d2),
    }
}

/// Three-point barycentric parabolic interpolation over complex samples.
///
/// Same weights as [`parabolic_1d`]; only the ordinates are complex.
pub fn parabolic_1d_complex(x: &[f64; 3], y: &[Complex64; 3], xi: f64) -> InterpolatedComplex {
    let d0 = (x[0] - x[1]) * (x[0] - x[2]);
    let d1 = (x[1] - x[0]) * (x[1] - x[2]);
    let d2 = (x[2] - x[0]) * (x[2] - x[1]);

    let l0 = (xi - x[1]) * (xi - x[2]) / d0;
    let l1 = (xi - x[0]) * (xi - x[2]) / d1;
    let l2 = (xi - x[0]) * (xi - x[1]) / d2;

    let l0p = (2.0 * xi - x[1] - x[2]) / d0;
    let l1p = (2.0 * xi - x[0] - x[2]) / d1;
    let l2p = (2.0 * xi - x[0] - x[1]) / d2;

    InterpolatedComplex {
        value: y[0] * l0 + y[1] * l1 + y[2] * l2,
        slope: y[0] * l0p + y[1] * l1p + y[2] * l2p,
        curvature: 2.0 * (y[0] / d0 + y[1] / d1 + y[2] / d2),
    }
}

/// Four-point barycentric cubic interpolation.
///
/// Exact for degree ≤ 3. Callers pass the bracketing points and their
/// immediate neighbours.
pub fn cubic_1d(x: &[f64; 4], y: &[f64; 4], xi: f64) -> Interpolated {
    let mut value = 0.0;
    let mut slope = 0.0;
    let mut curvature = 0.0;

    for i in 0..4 {
        // The three nodes other than x[i].
        let mut others = [0.0; 3];
        let mut k = 0;
        for (j, &xj) in x.iter().enumerate() {
            if j != i {
                others[k] = xj;
                k += 1;
            }
        }
        let [a, b, c] = others;
        let denom = (x[i] - a) * (x[i] - b) * (x[i] - c);

        let l = (xi - a) * (xi - b) * (xi - c) / denom;
        let lp = ((xi - b) * (xi - c) + (xi - a) * (xi - c) + (xi - a) * (xi - b)) / denom;
        let lpp = 2.0 * ((xi - a) + (xi - b) + (xi - c)) / denom;

        value += y[i] * l;
        slope += y[i] * lp;
        curvature += y[i] * lpp;
    }

    Interpolated {
        value,
        slope,
        curvature,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol * (1.0 + a.abs().max(b.abs()))
    }

    #[test]
    fn linear_reproduces_control_points() {
        let x = [1.0, 3.0];
        let y = [2.0, -4.0];
        assert_eq!(linear_1d(&x, &y, 1.0).value, 2.0);
        assert_eq!(linear_1d(&x, &y, 3.0).value, -4.0);
    }

    #[test]
    fn parabolic_exact_on_quadratic() {
        // y = 2x² − 3x + 1
        let f = |x: f64| 2.0 * x * x - 3.0 * x + 1.0;
        let x = [0.0, 1.0, 2.5];
        let y = [f(x[0]), f(x[1]), f(x[2])];
        let out = parabolic_1d(&x, &y, 1.7);
        assert!(close(out.value, f(1.7), 1e-12));
        assert!(close(out.slope, 4.0 * 1.7 - 3.0, 1e-12));
        assert!(close(out.curvature, 4.0, 1e-12));
    }

    #[test]
    fn cubic_exact_on_cubic() {
        // y = x³ − 2x² + x − 5
        let f = |x: f64| x * x * x - 2.0 * x * x + x - 5.0;
        let fp = |x: f64| 3.0 * x * x - 4.0 * x + 1.0;
        let fpp = |x: f64| 6.0 * x - 4.0;
        let x = [-1.0, 0.5, 2.0, 3.5];
        let y = [f(x[0]), f(x[1]), f(x[2]), f(x[3])];
        let out = cubic_1d(&x, &y, 1.2);
        assert!(close(out.value, f(1.2), 1e-12));
        assert!(close(out.slope, fp(1.2), 1e-12));
        assert!(close(out.curvature, fpp(1.2), 1e-12));
    }

    #[test]
    fn complex_parabolic_matches_real_parts() {
        let x = [0.0, 1.0, 2.0];
        let yr = [1.0, 4.0, 9.0];
        let yc = [
            Complex64::new(1.0, -1.0),
            Complex64::new(4.0, -4.0),
            Complex64::new(9.0, -9.0),
        ];
        let real = parabolic_1d(&x, &yr, 1.5);
        let cplx = parabolic_1d_complex(&x, &yc, 1.5);
        assert!(close(cplx.value.re, real.value, 1e-12));
        assert!(close(cplx.value.im, -real.value, 1e-12));
        assert!(close(cplx.slope.re, real.slope, 1e-12));
    }

    proptest! {
        #[test]
        fn linear_exact_on_lines(
            a in -10.0_f64..10.0,
            b in -10.0_f64..10.0,
            xi in -5.0_f64..5.0,
        ) {
            let f = |x: f64| a * x + b;
            let x = [-5.0, 5.0];
            let y = [f(x[0]), f(x[1])];
            let out = linear_1d(&x, &y, xi);
            prop_assert!(close(out.value, f(xi), 1e-10));
            prop_assert!(close(out.slope, a, 1e-10));
        }

        #[test]
        fn parabolic_reproduces_control_points(
            y0 in -10.0_f64..10.0,
            y1 in -10.0_f64..10.0,
            y2 in -10.0_f64..10.0,
        ) {
            let x = [0.0, 1.0, 2.0];
            let y = [y0, y1, y2];
            for (xi, yi) in x.iter().zip(y.iter()) {
                let out = parabolic_1d(&x, &y, *xi);
                prop_assert!(close(out.value, *yi, 1e-12));
            }
        }

        #[test]
        fn cubic_reproduces_control_points(
            y0 in -10.0_f64..10.0,
            y1 in -10.0_f64..10.0,
            y2 in -10.0_f64..10.0,
            y3 in -10.0_f64..10.0,
        ) {
            let x = [0.0, 1.0, 2.0, 3.0];
            let y = [y0, y1, y2, y3];
            for (xi, yi) in x.iter().zip(y.iter()) {
                let out = cubic_1d(&x, &y, *xi);
                prop_assert!(close(out.value, *yi, 1e-11));
            }
        }

        #[test]
        fn cubic_exact_on_random_cubics(
            c0 in -5.0_f64..5.0,
            c1 in -5.0_f64..5.0,
            c2 in -5.0_f64..5.0,
            c3 in -5.0_f64..5.0,
            xi in 0.0_f64..3.0,
        ) {
            let f = |x: f64| c3 * x * x * x + c2 * x * x + c1 * x + c0;
            let x = [0.0, 1.0, 2.0, 3.0];
            let y = [f(x[0]), f(x[1]), f(x[2]), f(x[3])];
            let out = cubic_1d(&x, &y, xi);
            prop_assert!(close(out.value, f(xi), 1e-9));
        }
    }
}
