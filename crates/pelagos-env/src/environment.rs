//! The immutable per-run environment and its collision targets.

use crate::boundary::{Boundary, Face};
use crate::object::Object;
use crate::soundspeed::SoundSpeed;
use crate::EnvError;
use pelagos_core::RangeBox;

/// Which counter a boundary hit increments on the ray.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitKind {
    /// The sea surface (altimetry).
    Surface,
    /// The seabed (bathymetry).
    Bottom,
    /// A scattering object face.
    Object,
}

/// One collision target: a boundary together with its hit classification
/// and the range span over which it exists.
///
/// The surface and bottom span the whole box; object faces are live only
/// inside their own span. The tracer iterates the collider set uniformly
/// instead of switching on boundary identity.
#[derive(Clone, Copy, Debug)]
pub struct Collider<'a> {
    kind: HitKind,
    boundary: &'a Boundary,
    span: Option<(f64, f64)>,
}

impl<'a> Collider<'a> {
    /// The hit classification for reflection bookkeeping.
    pub fn kind(&self) -> HitKind {
        self.kind
    }

    /// The underlying boundary geometry and physics.
    pub fn boundary(&self) -> &'a Boundary {
        self.boundary
    }

    /// Whether the collider exists at the given range.
    pub fn in_span(&self, r: f64) -> bool {
        match self.span {
            None => true,
            Some((lo, hi)) => r >= lo && r <= hi,
        }
    }
}

/// Immutable per-run configuration of the waveguide.
///
/// Created once by [`Environment::new`] and shared read-only by every
/// ray; nothing here mutates during a run.
#[derive(Clone, Debug)]
pub struct Environment {
    altimetry: Boundary,
    bathymetry: Boundary,
    soundspeed: SoundSpeed,
    objects: Vec<Object>,
    range_box: RangeBox,
}

impl Environment {
    /// Assemble and validate an environment.
    ///
    /// # Errors
    ///
    /// - [`EnvError::FaceMismatch`] when the altimetry is not an `Above`
    ///   boundary or the bathymetry not a `Below` one.
    /// - [`EnvError::BoxNotCovered`] when a boundary's control points do
    ///   not span the range box.
    /// - [`EnvError::ObjectOutsideBox`] when an object leaves the box.
    pub fn new(
        altimetry: Boundary,
        bathymetry: Boundary,
        soundspeed: SoundSpeed,
        objects: Vec<Object>,
        range_box: RangeBox,
    ) -> Result<Self, EnvError> {
        if altimetry.face() != Face::Above {
            return Err(EnvError::FaceMismatch {
                which: "altimetry",
            });
        }
        if bathymetry.face() != Face::Below {
            return Err(EnvError::FaceMismatch {
                which: "bathymetry",
            });
        }
        if !altimetry.covers(range_box.rmin, range_box.rmax) {
            return Err(EnvError::BoxNotCovered {
                which: "altimetry",
            });
        }
        if !bathymetry.covers(range_box.rmin, range_box.rmax) {
            return Err(EnvError::BoxNotCovered {
                which: "bathymetry",
            });
        }
        for (index, obj) in objects.iter().enumerate() {
            let (lo, hi) = obj.span();
            if lo < range_box.rmin || hi > range_box.rmax {
                return Err(EnvError::ObjectOutsideBox { index });
            }
        }
        Ok(Self {
            altimetry,
            bathymetry,
            soundspeed,
            objects,
            range_box,
        })
    }

    /// The sea surface.
    pub fn altimetry(&self) -> &Boundary {
        &self.altimetry
    }

    /// The seabed.
    pub fn bathymetry(&self) -> &Boundary {
        &self.bathymetry
    }

    /// The sound-speed field.
    pub fn soundspeed(&self) -> &SoundSpeed {
        &self.soundspeed
    }

    /// The scattering objects.
    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    /// The horizontal range box.
    pub fn range_box(&self) -> RangeBox {
        self.range_box
    }

    /// The full collision-target set: surface, bottom, then both faces of
    /// each object in declaration order.
    pub fn colliders(&self) -> Vec<Collider<'_>> {
        let mut out = Vec::with_capacity(2 + 2 * self.objects.len());
        out.push(Collider {
            kind: HitKind::Surface,
            boundary: &self.altimetry,
            span: self.altimetry.span(),
        });
        out.push(Collider {
            kind: HitKind::Bottom,
            boundary: &self.bathymetry,
            span: self.bathymetry.span(),
        });
        for obj in &self.objects {
            out.push(Collider {
                kind: HitKind::Object,
                boundary: obj.upper(),
                span: Some(obj.span()),
            });
            out.push(Collider {
                kind: HitKind::Object,
                boundary: obj.lower(),
                span: Some(obj.span()),
            });
        }
        out
    }
}
