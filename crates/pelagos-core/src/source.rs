//! Acoustic source position, launch fan, and the horizontal range box.

use crate::units::launch_angle_rad;
use crate::ConfigError;

/// Horizontal extent of the computation, in meters.
///
/// Rays terminate when they leave the box; every boundary is required to
/// span it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangeBox {
    /// Left edge in meters.
    pub rmin: f64,
    /// Right edge in meters.
    pub rmax: f64,
}

impl RangeBox {
    /// Create a range box, rejecting empty or inverted extents.
    pub fn new(rmin: f64, rmax: f64) -> Result<Self, ConfigError> {
        if !rmin.is_finite() || !rmax.is_finite() || rmin >= rmax {
            return Err(ConfigError::InvalidRangeBox { rmin, rmax });
        }
        Ok(Self { rmin, rmax })
    }

    /// Whether a range coordinate lies inside the box (edges inclusive).
    pub fn contains(&self, r: f64) -> bool {
        r >= self.rmin && r <= self.rmax
    }

    /// Box width in meters.
    pub fn span(&self) -> f64 {
        self.rmax - self.rmin
    }
}

/// The acoustic source: position, frequency, and launch-angle fan.
///
/// Launch angles are supplied in degrees with positive values aimed toward
/// the surface; [`fan_radians`](Source::fan_radians) applies the internal
/// sign-flipped radian convention.
#[derive(Clone, Debug, PartialEq)]
pub struct Source {
    range: f64,
    depth: f64,
    frequency: f64,
    angles_deg: Vec<f64>,
    range_box: RangeBox,
}

impl Source {
    /// Create a source, validating frequency, fan, and box placement.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidFrequency`] for a non-finite or non-positive
    ///   frequency.
    /// - [`ConfigError::EmptyFan`] when no launch angles are given.
    /// - [`ConfigError::InvalidLaunchAngle`] for a non-finite angle.
    /// - [`ConfigError::SourceOutsideBox`] when the source range is not in
    ///   the range box.
    pub fn new(
        range: f64,
        depth: f64,
        frequency: f64,
        angles_deg: Vec<f64>,
        range_box: RangeBox,
    ) -> Result<Self, ConfigError> {
        if !frequency.is_finite() || frequency <= 0.0 {
            return Err(ConfigError::InvalidFrequency { value: frequency });
        }
        if angles_deg.is_empty() {
            return Err(ConfigError::EmptyFan);
        }
        if let Some(&bad) = angles_deg.iter().find(|a| !a.is_finite()) {
            return Err(ConfigError::InvalidLaunchAngle { value: bad });
        }
        if !range_box.contains(range) {
            return Err(ConfigError::SourceOutsideBox { range });
        }
        Ok(Self {
            range,
            depth,
            frequency,
            angles_deg,
            range_box,
        })
    }

    /// Source range in meters.
    pub fn range(&self) -> f64 {
        self.range
    }

    /// Source depth in meters (positive downward).
    pub fn depth(&self) -> f64 {
        self.depth
    }

    /// Source frequency in Hz.
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Angular frequency ω = 2πf in rad/s.
    pub fn omega(&self) -> f64 {
        2.0 * std::f64::consts::PI * self.frequency
    }

    /// The launch fan as supplied, in degrees.
    pub fn angles_deg(&self) -> &[f64] {
        &self.angles_deg
    }

    /// The launch fan in internal radians (sign-flipped, downward positive).
    pub fn fan_radians(&self) -> Vec<f64> {
        self.angles_deg.iter().map(|&a| launch_angle_rad(a)).collect()
    }

    /// Angular spacing between adjacent fan rays, in radians.
    ///
    /// A single-ray fan falls back to one degree; the spacing only feeds
    /// the reference beam parameter, never indexing.
    pub fn fan_spacing(&self) -> f64 {
        let n = self.angles_deg.len();
        if n < 2 {
            return 1.0_f64.to_radians();
        }
        let lo = self.angles_deg.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = self
            .angles_deg
            .iter()
            .cloned()
            .fold(f64::NEG_INFINITY, f64::max);
        ((hi - lo).to_radians() / (n as f64 - 1.0)).abs()
    }

    /// The horizontal range box for this run.
    pub fn range_box(&self) -> RangeBox {
        self.range_box
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_box() -> RangeBox {
        RangeBox::new(0.0, 1000.0).unwrap()
    }

    #[test]
    fn range_box_rejects_inverted() {
        match RangeBox::new(10.0, 10.0) {
            Err(ConfigError::InvalidRangeBox { .. }) => {}
            other => panic!("expected InvalidRangeBox, got {other:?}"),
        }
        match RangeBox::new(f64::NAN, 10.0) {
            Err(ConfigError::InvalidRangeBox { .. }) => {}
            other => panic!("expected InvalidRangeBox, got {other:?}"),
        }
    }

    #[test]
    fn range_box_contains_edges() {
        let b = test_box();
        assert!(b.contains(0.0));
        assert!(b.contains(1000.0));
        assert!(!b.contains(-0.001));
        assert!(!b.contains(1000.001));
    }

    #[test]
    fn source_validates_frequency() {
        match Source::new(0.0, 50.0, 0.0, vec![0.0], test_box()) {
            Err(ConfigError::InvalidFrequency { value }) => assert_eq!(value, 0.0),
            other => panic!("expected InvalidFrequency, got {other:?}"),
        }
    }

    #[test]
    fn source_rejects_empty_fan() {
        match Source::new(0.0, 50.0, 100.0, vec![], test_box()) {
            Err(ConfigError::EmptyFan) => {}
            other => panic!("expected EmptyFan, got {other:?}"),
        }
    }

    #[test]
    fn source_rejects_offbox_range() {
        match Source::new(-5.0, 50.0, 100.0, vec![0.0], test_box()) {
            Err(ConfigError::SourceOutsideBox { range }) => assert_eq!(range, -5.0),
            other => panic!("expected SourceOutsideBox, got {other:?}"),
        }
    }

    #[test]
    fn fan_radians_flips_sign() {
        let src = Source::new(0.0, 50.0, 100.0, vec![-10.0, 0.0, 10.0], test_box()).unwrap();
        let fan = src.fan_radians();
        assert!((fan[0] - 10.0_f64.to_radians()).abs() < 1e-15);
        assert!((fan[2] + 10.0_f64.to_radians()).abs() < 1e-15);
    }

    #[test]
    fn fan_spacing_uniform() {
        let src = Source::new(0.0, 50.0, 100.0, vec![-10.0, 0.0, 10.0], test_box()).unwrap();
        assert!((src.fan_spacing() - 10.0_f64.to_radians()).abs() < 1e-12);
    }

    #[test]
    fn fan_spacing_single_ray_fallback() {
        let src = Source::new(0.0, 50.0, 100.0, vec![5.0], test_box()).unwrap();
        assert!((src.fan_spacing() - 1.0_f64.to_radians()).abs() < 1e-15);
    }
}
