//! Scattering objects inside the water column.

use crate::boundary::{Boundary, BoundaryShape, Face, SurfaceProps};
use crate::reflection::SurfaceMedium;
use crate::{EnvError, SurfaceKind};

/// A local obstacle bounded by two depth curves over a common range span.
///
/// The upper curve (shallower) reflects rays arriving from above and
/// behaves like a seabed; the lower curve reflects rays arriving from
/// below and behaves like a surface. Both faces share the object's
/// surface kind and medium. Outside its range span the object does not
/// exist for the tracer.
#[derive(Clone, Debug, PartialEq)]
pub struct Object {
    upper: Boundary,
    lower: Boundary,
    span: (f64, f64),
}

impl Object {
    /// Create an object from its two depth curves.
    ///
    /// `upper_depths` is the shallower curve; it must stay at or above
    /// `lower_depths` at every control point.
    ///
    /// # Errors
    ///
    /// - [`EnvError::CurveCrossing`] when the curves cross.
    /// - Boundary validation errors for short or unsorted control points,
    ///   or a missing elastic medium.
    pub fn new(
        kind: SurfaceKind,
        medium: Option<SurfaceMedium>,
        ranges: Vec<f64>,
        upper_depths: Vec<f64>,
        lower_depths: Vec<f64>,
    ) -> Result<Self, EnvError> {
        if upper_depths.len() == lower_depths.len() {
            if let Some(i) = upper_depths
                .iter()
                .zip(lower_depths.iter())
                .position(|(u, l)| u > l)
            {
                return Err(EnvError::CurveCrossing { index: i });
            }
        }
        let props = medium.map(SurfaceProps::Homogeneous);
        let upper = Boundary::new(
            BoundaryShape::PiecewiseLinear {
                ranges: ranges.clone(),
                depths: upper_depths,
            },
            kind,
            Face::Below,
            props.clone(),
        )?;
        let lower = Boundary::new(
            BoundaryShape::PiecewiseLinear {
                ranges: ranges.clone(),
                depths: lower_depths,
            },
            kind,
            Face::Above,
            props,
        )?;
        let span = (ranges[0], ranges[ranges.len() - 1]);
        Ok(Self { upper, lower, span })
    }

    /// The face struck by rays arriving from above.
    pub fn upper(&self) -> &Boundary {
        &self.upper
    }

    /// The face struck by rays arriving from below.
    pub fn lower(&self) -> &Boundary {
        &self.lower
    }

    /// The object's range span in meters.
    pub fn span(&self) -> (f64, f64) {
        self.span
    }

    /// Whether a range coordinate falls inside the object's span.
    pub fn contains_range(&self, r: f64) -> bool {
        r >= self.span.0 && r <= self.span.1
    }

    /// The surface kind shared by both faces.
    pub fn kind(&self) -> SurfaceKind {
        self.upper.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn box_object() -> Object {
        Object::new(
            SurfaceKind::Rigid,
            None,
            vec![100.0, 200.0, 300.0],
            vec![40.0, 30.0, 40.0],
            vec![60.0, 70.0, 60.0],
        )
        .unwrap()
    }

    #[test]
    fn span_follows_control_points() {
        let o = box_object();
        assert_eq!(o.span(), (100.0, 300.0));
        assert!(o.contains_range(100.0));
        assert!(o.contains_range(250.0));
        assert!(!o.contains_range(99.9));
    }

    #[test]
    fn faces_point_into_the_water() {
        let o = box_object();
        let up = o.upper().interpolate(200.0).unwrap();
        let lo = o.lower().interpolate(200.0).unwrap();
        // Upper face repels rays upward, lower face downward.
        assert!(up.normal.z < 0.0);
        assert!(lo.normal.z > 0.0);
        assert_eq!(up.depth, 30.0);
        assert_eq!(lo.depth, 70.0);
    }

    #[test]
    fn crossing_curves_rejected() {
        match Object::new(
            SurfaceKind::Rigid,
            None,
            vec![0.0, 100.0],
            vec![50.0, 80.0],
            vec![60.0, 70.0],
        ) {
            Err(EnvError::CurveCrossing { index: 1 }) => {}
            other => panic!("expected CurveCrossing, got {other:?}"),
        }
    }

    #[test]
    fn elastic_object_needs_medium() {
        match Object::new(
            SurfaceKind::Elastic,
            None,
            vec![0.0, 100.0],
            vec![40.0, 40.0],
            vec![60.0, 60.0],
        ) {
            Err(EnvError::MissingElasticProps) => {}
            other => panic!("expected MissingElasticProps, got {other:?}"),
        }
    }
}
