//! Arrival records and their per-receiver grouping.

use indexmap::IndexMap;
use num_complex::Complex64;
use pelagos_core::ReceiverGrid;
use pelagos_trace::Ray;

/// One ray's contribution at one receiver. Immutable once recorded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arrival {
    /// Launch angle of the contributing ray, internal radians.
    pub angle: f64,
    /// Receiver range in meters.
    pub range: f64,
    /// Receiver depth in meters.
    pub depth: f64,
    /// Travel time to the receiver in seconds.
    pub travel_time: f64,
    /// Complex amplitude at the receiver, caustic phase folded in.
    pub amplitude: Complex64,
    /// Surface reflections along the contributing ray.
    pub surface_reflections: u32,
    /// Bottom reflections along the contributing ray.
    pub bottom_reflections: u32,
    /// Object reflections along the contributing ray.
    pub object_reflections: u32,
    /// Refraction points along the contributing ray.
    pub refraction_points: u32,
}

impl Arrival {
    /// Build an arrival by copying the ray's reflection bookkeeping.
    pub(crate) fn from_ray(
        ray: &Ray,
        range: f64,
        depth: f64,
        travel_time: f64,
        amplitude: Complex64,
    ) -> Self {
        Self {
            angle: ray.launch_angle(),
            range,
            depth,
            travel_time,
            amplitude,
            surface_reflections: ray.surface_reflections(),
            bottom_reflections: ray.bottom_reflections(),
            object_reflections: ray.object_reflections(),
            refraction_points: ray.refraction_points(),
        }
    }
}

/// Arrivals grouped by receiver, in receiver-declaration order.
#[derive(Clone, Debug, Default)]
pub struct ArrivalSet {
    points: Vec<(f64, f64)>,
    by_receiver: IndexMap<usize, Vec<Arrival>>,
}

impl ArrivalSet {
    /// Empty set over the given receiver geometry.
    pub fn new(grid: &ReceiverGrid) -> Self {
        Self {
            points: grid.points(),
            by_receiver: IndexMap::new(),
        }
    }

    /// Record an arrival at a flattened receiver index.
    pub(crate) fn push(&mut self, receiver: usize, arrival: Arrival) {
        self.by_receiver.entry(receiver).or_default().push(arrival);
    }

    /// The receiver coordinates this set was built over.
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Arrivals recorded at a flattened receiver index.
    pub fn at(&self, receiver: usize) -> &[Arrival] {
        self.by_receiver
            .get(&receiver)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Total arrivals across all receivers.
    pub fn total(&self) -> usize {
        self.by_receiver.values().map(|v| v.len()).sum()
    }

    /// Iterate `(receiver_index, arrivals)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[Arrival])> {
        self.by_receiver.iter().map(|(k, v)| (*k, v.as_slice()))
    }
}
