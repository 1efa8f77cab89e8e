//! Boundary geometry: interface depth, tangent, and normal.
//!
//! A [`Boundary`] is one interface of the waveguide — the sea surface
//! (altimetry) or the seabed (bathymetry) — or one face of a scattering
//! object. Geometry is interpolated per query from the control points
//! according to the configured [`BoundaryShape`]; reflection physics lives
//! in the `reflection` module and is reached through
//! [`Boundary::reflection_coefficient`].

use crate::reflection::{elastic_coefficient, SurfaceMedium};
use crate::EnvError;
use num_complex::Complex64;
use pelagos_math::{bracket, cubic_1d, linear_1d, Vec2};

/// Components smaller than this snap to exactly zero in tangents and
/// normals, so near-flat and near-vertical interfaces do not accumulate
/// drift through repeated reflections.
const ALIGN_EPS: f64 = 1.0e-12;

/// Acoustic character of a boundary surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceKind {
    /// Fully absorbing: reflection coefficient 0, the ray is killed.
    Absorbent,
    /// Elastic medium: complex coefficient from the medium properties.
    Elastic,
    /// Perfectly rigid: reflection coefficient 1.
    Rigid,
    /// Vacuum (pressure release): reflection coefficient 0.
    Vacuum,
}

/// Which side of the water column the boundary medium occupies.
///
/// Determines the inward-normal orientation: an `Above` boundary's normal
/// points down into the water, a `Below` boundary's points up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Face {
    /// Medium above the water (sea surface, underside of an object).
    Above,
    /// Medium below the water (seabed, top of an object).
    Below,
}

/// Interpolation scheme and control points of one boundary.
#[derive(Clone, Debug, PartialEq)]
pub enum BoundaryShape {
    /// Horizontal interface at a fixed depth, unbounded in range.
    Flat {
        /// Interface depth in meters.
        depth: f64,
    },
    /// Straight sloped interface through two points, extended unbounded.
    Sloped {
        /// Control-point ranges in meters, strictly increasing.
        ranges: [f64; 2],
        /// Control-point depths in meters.
        depths: [f64; 2],
    },
    /// Piecewise-linear interface over its control points.
    PiecewiseLinear {
        /// Control-point ranges in meters, strictly increasing.
        ranges: Vec<f64>,
        /// Control-point depths in meters.
        depths: Vec<f64>,
    },
    /// Piecewise-cubic interface using 4-point barycentric windows.
    PiecewiseCubic {
        /// Control-point ranges in meters, strictly increasing.
        ranges: Vec<f64>,
        /// Control-point depths in meters.
        depths: Vec<f64>,
    },
}

/// Surface property distribution along a boundary.
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceProps {
    /// One medium for the whole boundary.
    Homogeneous(SurfaceMedium),
    /// One medium per control point, interpolated at the hit range.
    PerPoint(Vec<SurfaceMedium>),
}

/// Interpolated boundary geometry at one range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundaryPoint {
    /// Interface depth in meters.
    pub depth: f64,
    /// Unit tangent, range component positive.
    pub tangent: Vec2,
    /// Unit inward normal (into the water).
    pub normal: Vec2,
    /// Signed curvature of the interface; zero for straight schemes.
    pub curvature: f64,
}

/// Map a configuration scheme tag to a [`BoundaryShape`].
///
/// Tags follow the input-file schema: `'F'` flat, `'S'` sloped, `'L'`
/// piecewise linear, `'C'` piecewise cubic. The piecewise-parabolic tag
/// `'P'` still appears in configuration schemas but the scheme was
/// removed from the model; it fails fast here.
pub fn shape_from_tag(
    tag: char,
    ranges: Vec<f64>,
    depths: Vec<f64>,
) -> Result<BoundaryShape, EnvError> {
    match tag {
        'F' => {
            if depths.is_empty() {
                return Err(EnvError::TooFewPoints { needed: 1, got: 0 });
            }
            Ok(BoundaryShape::Flat { depth: depths[0] })
        }
        'S' => {
            if ranges.len() < 2 || depths.len() < 2 {
                return Err(EnvError::TooFewPoints {
                    needed: 2,
                    got: ranges.len().min(depths.len()),
                });
            }
            Ok(BoundaryShape::Sloped {
                ranges: [ranges[0], ranges[1]],
                depths: [depths[0], depths[1]],
            })
        }
        'L' => Ok(BoundaryShape::PiecewiseLinear { ranges, depths }),
        'C' => Ok(BoundaryShape::PiecewiseCubic { ranges, depths }),
        other => Err(EnvError::UnsupportedShape { tag: other }),
    }
}

/// One interface of the waveguide.
#[derive(Clone, Debug, PartialEq)]
pub struct Boundary {
    shape: BoundaryShape,
    kind: SurfaceKind,
    face: Face,
    props: Option<SurfaceProps>,
}

impl Boundary {
    /// Create a boundary, validating the shape and property distribution.
    ///
    /// # Errors
    ///
    /// - [`EnvError::TooFewPoints`]: fewer than 2 points for a piecewise
    ///   linear scheme, fewer than 4 for piecewise cubic.
    /// - [`EnvError::UnsortedRanges`]: control ranges not strictly
    ///   increasing.
    /// - [`EnvError::MissingElasticProps`]: elastic kind without
    ///   properties.
    /// - [`EnvError::PropsArityMismatch`]: per-point properties not
    ///   matching the control-point count.
    pub fn new(
        shape: BoundaryShape,
        kind: SurfaceKind,
        face: Face,
        props: Option<SurfaceProps>,
    ) -> Result<Self, EnvError> {
        let n_points = match &shape {
            BoundaryShape::Flat { .. } => 1,
            BoundaryShape::Sloped { ranges, .. } => {
                if ranges[1] <= ranges[0] {
                    return Err(EnvError::UnsortedRanges);
                }
                2
            }
            BoundaryShape::PiecewiseLinear { ranges, depths } => {
                check_curve(ranges, depths, 2)?;
                ranges.len()
            }
            BoundaryShape::PiecewiseCubic { ranges, depths } => {
                check_curve(ranges, depths, 4)?;
                ranges.len()
            }
        };

        if kind == SurfaceKind::Elastic && props.is_none() {
            return Err(EnvError::MissingElasticProps);
        }
        if let Some(SurfaceProps::PerPoint(list)) = &props {
            if list.len() != n_points {
                return Err(EnvError::PropsArityMismatch {
                    points: n_points,
                    props: list.len(),
                });
            }
        }

        Ok(Self {
            shape,
            kind,
            face,
            props,
        })
    }

    /// The surface kind of this boundary.
    pub fn kind(&self) -> SurfaceKind {
        self.kind
    }

    /// Which side of the water the boundary medium occupies.
    pub fn face(&self) -> Face {
        self.face
    }

    /// The control-point span, or `None` for unbounded schemes.
    pub fn span(&self) -> Option<(f64, f64)> {
        match &self.shape {
            BoundaryShape::Flat { .. } | BoundaryShape::Sloped { .. } => None,
            BoundaryShape::PiecewiseLinear { ranges, .. }
            | BoundaryShape::PiecewiseCubic { ranges, .. } => {
                Some((ranges[0], ranges[ranges.len() - 1]))
            }
        }
    }

    /// Whether the boundary's geometry is defined over `[rmin, rmax]`.
    pub fn covers(&self, rmin: f64, rmax: f64) -> bool {
        match self.span() {
            None => true,
            Some((lo, hi)) => lo <= rmin && hi >= rmax,
        }
    }

    /// Interpolate depth, tangent, normal, and curvature at a range.
    ///
    /// # Errors
    ///
    /// [`EnvError::OutOfSpan`] when `r` falls outside a piecewise scheme's
    /// control points.
    pub fn interpolate(&self, r: f64) -> Result<BoundaryPoint, EnvError> {
        let (depth, slope, second) = match &self.shape {
            BoundaryShape::Flat { depth } => (*depth, 0.0, 0.0),
            BoundaryShape::Sloped { ranges, depths } => {
                let out = linear_1d(ranges, depths, r);
                (out.value, out.slope, 0.0)
            }
            BoundaryShape::PiecewiseLinear { ranges, depths } => {
                let i = bracket(ranges, r).ok_or(EnvError::OutOfSpan { range: r })?;
                let out = linear_1d(
                    &[ranges[i], ranges[i + 1]],
                    &[depths[i], depths[i + 1]],
                    r,
                );
                (out.value, out.slope, 0.0)
            }
            BoundaryShape::PiecewiseCubic { ranges, depths } => {
                let i = bracket(ranges, r).ok_or(EnvError::OutOfSpan { range: r })?;
                let i0 = i.saturating_sub(1).min(ranges.len() - 4);
                let xw = [ranges[i0], ranges[i0 + 1], ranges[i0 + 2], ranges[i0 + 3]];
                let yw = [depths[i0], depths[i0 + 1], depths[i0 + 2], depths[i0 + 3]];
                let out = cubic_1d(&xw, &yw, r);
                (out.value, out.slope, out.curvature)
            }
        };

        let angle = slope.atan();
        let tangent = snap(Vec2::new(angle.cos(), angle.sin()));
        let normal = snap(match self.face {
            Face::Above => Vec2::new(-tangent.z, tangent.r),
            Face::Below => Vec2::new(tangent.z, -tangent.r),
        });
        let curvature = second / (1.0 + slope * slope).powf(1.5);

        Ok(BoundaryPoint {
            depth,
            tangent,
            normal,
            curvature,
        })
    }

    /// The surface medium at a range, for elastic boundaries.
    ///
    /// Homogeneous distributions return their single medium; per-point
    /// distributions interpolate each property linearly between the
    /// bracketing control points.
    pub fn medium_at(&self, r: f64) -> Result<Option<SurfaceMedium>, EnvError> {
        match &self.props {
            None => Ok(None),
            Some(SurfaceProps::Homogeneous(m)) => Ok(Some(m.clone())),
            Some(SurfaceProps::PerPoint(list)) => {
                let ranges: Vec<f64> = match &self.shape {
                    BoundaryShape::Flat { .. } => return Ok(Some(list[0].clone())),
                    BoundaryShape::Sloped { ranges, .. } => ranges.to_vec(),
                    BoundaryShape::PiecewiseLinear { ranges, .. }
                    | BoundaryShape::PiecewiseCubic { ranges, .. } => ranges.clone(),
                };
                let i = bracket(&ranges, r).ok_or(EnvError::OutOfSpan { range: r })?;
                let t = (r - ranges[i]) / (ranges[i + 1] - ranges[i]);
                Ok(Some(SurfaceMedium::lerp(&list[i], &list[i + 1], t)))
            }
        }
    }

    /// Complex reflection coefficient at a hit.
    ///
    /// `incidence` is the angle between the incoming ray and the inward
    /// normal, in radians; `c_water` is the water sound speed at the hit
    /// and `frequency` the source frequency in Hz.
    pub fn reflection_coefficient(
        &self,
        r: f64,
        incidence: f64,
        c_water: f64,
        frequency: f64,
    ) -> Result<Complex64, EnvError> {
        match self.kind {
            SurfaceKind::Rigid => Ok(Complex64::new(1.0, 0.0)),
            SurfaceKind::Vacuum | SurfaceKind::Absorbent => Ok(Complex64::new(0.0, 0.0)),
            SurfaceKind::Elastic => {
                let medium = self
                    .medium_at(r)?
                    .ok_or(EnvError::MissingElasticProps)?;
                elastic_coefficient(&medium, incidence, c_water, frequency)
            }
        }
    }
}

fn check_curve(ranges: &[f64], depths: &[f64], needed: usize) -> Result<(), EnvError> {
    let got = ranges.len().min(depths.len());
    if got < needed || ranges.len() != depths.len() {
        return Err(EnvError::TooFewPoints { needed, got });
    }
    if ranges.windows(2).any(|w| w[1] <= w[0]) {
        return Err(EnvError::UnsortedRanges);
    }
    Ok(())
}

/// Snap near-zero components to exactly zero and renormalize the axis
/// component to unit magnitude.
fn snap(v: Vec2) -> Vec2 {
    if v.z.abs() < ALIGN_EPS {
        Vec2::new(v.r.signum(), 0.0)
    } else if v.r.abs() < ALIGN_EPS {
        Vec2::new(0.0, v.z.signum())
    } else {
        v
    }
}
