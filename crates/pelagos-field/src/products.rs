//! The output-product driver: one run, one product.
//!
//! [`run`] traces the launch fan, folds each trajectory into the
//! requested product, and returns the product together with a
//! [`RunSummary`] of the fan bookkeeping. Trajectories are consumed one
//! at a time, so memory stays bounded by a single ray plus the output
//! grids.

use crate::arrivals::ArrivalSet;
use crate::eigenray::{
    proximity_search_counted, regula_falsi_search_counted, SearchConfig,
};
use crate::pressure::{transmission_loss, PressureGrid};
use crate::velocity::{StarField, VelocityField};
use crate::{Arrival, SearchError};
use num_complex::Complex64;
use pelagos_core::{ReceiverGrid, Source};
use pelagos_env::Environment;
use pelagos_trace::{trace_ray, Ray, RayFate, TraceError, TraceOptions};

/// Which eigenray algorithm a search product uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EigenraySolver {
    /// Accept fan rays passing within tolerance of each receiver.
    Proximity,
    /// Bracket and refine launch angles by false position.
    RegulaFalsi,
}

/// The output product requested for one run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputKind {
    /// Per-ray coordinate polylines.
    RayCoords,
    /// Per-ray coordinates, travel times, amplitudes, and counters.
    AllRayInfo,
    /// Eigenray trajectories per receiver.
    Eigenrays(EigenraySolver),
    /// Arrival amplitudes and delays per receiver.
    Arrivals(EigenraySolver),
    /// Coherent complex pressure at every receiver.
    CoherentPressure,
    /// Transmission loss in dB at every receiver.
    TransmissionLoss,
    /// Complex particle velocity at every receiver.
    ParticleVelocity,
}

/// One traced ray's retained record.
///
/// The coordinate product keeps only the polyline; the state sequences
/// stay empty there and are filled by the full-info product.
#[derive(Clone, Debug)]
pub struct RayInfo {
    /// Launch angle in internal radians.
    pub angle: f64,
    /// Range samples in meters.
    pub ranges: Vec<f64>,
    /// Depth samples in meters.
    pub depths: Vec<f64>,
    /// Accumulated travel times in seconds.
    pub travel_times: Vec<f64>,
    /// Complex amplitudes along the trajectory.
    pub amplitudes: Vec<Complex64>,
    /// Surface reflection count.
    pub surface_reflections: u32,
    /// Bottom reflection count.
    pub bottom_reflections: u32,
    /// Object reflection count.
    pub object_reflections: u32,
    /// Refraction-point count.
    pub refraction_points: u32,
    /// Whether range ever decreased along the trajectory.
    pub returning: bool,
}

impl RayInfo {
    fn coordinates(ray: &Ray) -> Self {
        Self {
            angle: ray.launch_angle(),
            ranges: ray.ranges().to_vec(),
            depths: ray.depths().to_vec(),
            travel_times: Vec::new(),
            amplitudes: Vec::new(),
            surface_reflections: ray.surface_reflections(),
            bottom_reflections: ray.bottom_reflections(),
            object_reflections: ray.object_reflections(),
            refraction_points: ray.refraction_points(),
            returning: ray.is_returning(),
        }
    }

    fn full(ray: &Ray) -> Self {
        Self {
            angle: ray.launch_angle(),
            ranges: ray.ranges().to_vec(),
            depths: ray.depths().to_vec(),
            travel_times: ray.travel_times().to_vec(),
            amplitudes: ray.amplitudes().to_vec(),
            surface_reflections: ray.surface_reflections(),
            bottom_reflections: ray.bottom_reflections(),
            object_reflections: ray.object_reflections(),
            refraction_points: ray.refraction_points(),
            returning: ray.is_returning(),
        }
    }
}

/// One eigenray's trajectory and its arrival record.
#[derive(Clone, Debug)]
pub struct EigenrayPath {
    /// Flattened receiver index the eigenray reaches.
    pub receiver: usize,
    /// The arrival recorded at that receiver.
    pub arrival: Arrival,
    /// Range samples of the eigenray trajectory.
    pub ranges: Vec<f64>,
    /// Depth samples of the eigenray trajectory.
    pub depths: Vec<f64>,
}

/// The product of one run.
#[derive(Clone, Debug)]
pub enum Output {
    /// Per-ray coordinate polylines.
    RayCoords(Vec<RayInfo>),
    /// Full per-ray records.
    AllRayInfo(Vec<RayInfo>),
    /// Eigenray trajectories per receiver.
    Eigenrays(Vec<EigenrayPath>),
    /// Arrival collections per receiver.
    Arrivals(ArrivalSet),
    /// Coherent pressure grid.
    CoherentPressure(PressureGrid),
    /// Transmission loss in flattened receiver order.
    TransmissionLoss(Vec<f64>),
    /// Particle-velocity field.
    ParticleVelocity(VelocityField),
}

/// Fan bookkeeping for one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Rays integrated to completion.
    pub rays_traced: usize,
    /// Launch angles rejected as degenerate before integration.
    pub rays_skipped: usize,
    /// Rays killed by the low-reflectivity threshold.
    pub rays_killed: usize,
    /// Rays whose range decreased at least once.
    pub returning_rays: usize,
    /// Arrivals recorded, for the eigenray and arrival products.
    pub arrivals: usize,
}

impl RunSummary {
    pub(crate) fn note_ray(&mut self, ray: &Ray) {
        self.rays_traced += 1;
        if ray.fate() == RayFate::LowReflectivity {
            self.rays_killed += 1;
        }
        if ray.is_returning() {
            self.returning_rays += 1;
        }
    }

    pub(crate) fn note_skip(&mut self) {
        self.rays_skipped += 1;
    }
}

/// Trace the fan in angle order, feeding each completed ray to `each`.
fn fold_fan<F>(
    env: &Environment,
    source: &Source,
    opts: &TraceOptions,
    summary: &mut RunSummary,
    mut each: F,
) -> Result<(), SearchError>
where
    F: FnMut(Ray),
{
    for angle in source.fan_radians() {
        match trace_ray(env, source, angle, opts) {
            Ok(ray) => {
                summary.note_ray(&ray);
                each(ray);
            }
            Err(TraceError::DegenerateAngle { cos }) => {
                summary.note_skip();
                tracing::debug!(angle, cos, "skipping degenerate launch angle");
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

fn search(
    env: &Environment,
    source: &Source,
    opts: &TraceOptions,
    grid: &ReceiverGrid,
    cfg: &SearchConfig,
    solver: EigenraySolver,
    summary: &mut RunSummary,
) -> Result<ArrivalSet, SearchError> {
    match solver {
        EigenraySolver::Proximity => {
            proximity_search_counted(env, source, opts, grid, cfg, summary)
        }
        EigenraySolver::RegulaFalsi => {
            regula_falsi_search_counted(env, source, opts, grid, cfg, summary)
        }
    }
}

/// Run one product over the environment, source, and receiver geometry.
///
/// The summary counts the fan work and, for the arrival-bearing
/// products, the arrivals recorded; it is also logged at info level.
///
/// # Errors
///
/// Propagates trace failures and the search invariant violations
/// ([`SearchError::ReturningRay`], [`SearchError::CandidateOverflow`]).
pub fn run(
    env: &Environment,
    source: &Source,
    opts: &TraceOptions,
    grid: &ReceiverGrid,
    cfg: &SearchConfig,
    kind: OutputKind,
) -> Result<(Output, RunSummary), SearchError> {
    let mut summary = RunSummary::default();
    let output = match kind {
        OutputKind::RayCoords => {
            let mut rays = Vec::new();
            fold_fan(env, source, opts, &mut summary, |ray| {
                rays.push(RayInfo::coordinates(&ray));
            })?;
            Output::RayCoords(rays)
        }
        OutputKind::AllRayInfo => {
            let mut rays = Vec::new();
            fold_fan(env, source, opts, &mut summary, |ray| {
                rays.push(RayInfo::full(&ray));
            })?;
            Output::AllRayInfo(rays)
        }
        OutputKind::Eigenrays(solver) => {
            let set = search(env, source, opts, grid, cfg, solver, &mut summary)?;
            summary.arrivals = set.total();
            let mut paths = Vec::with_capacity(set.total());
            for (receiver, arrivals) in set.iter() {
                for arrival in arrivals {
                    // The angle already traced once, so this cannot be
                    // degenerate; capture the polyline for the product.
                    let ray = trace_ray(env, source, arrival.angle, opts)?;
                    paths.push(EigenrayPath {
                        receiver,
                        arrival: *arrival,
                        ranges: ray.ranges().to_vec(),
                        depths: ray.depths().to_vec(),
                    });
                }
            }
            Output::Eigenrays(paths)
        }
        OutputKind::Arrivals(solver) => {
            let set = search(env, source, opts, grid, cfg, solver, &mut summary)?;
            summary.arrivals = set.total();
            Output::Arrivals(set)
        }
        OutputKind::CoherentPressure => {
            let mut pressure = PressureGrid::new(grid, source);
            fold_fan(env, source, opts, &mut summary, |ray| {
                pressure.add_ray(&ray);
            })?;
            Output::CoherentPressure(pressure)
        }
        OutputKind::TransmissionLoss => {
            let mut pressure = PressureGrid::new(grid, source);
            fold_fan(env, source, opts, &mut summary, |ray| {
                pressure.add_ray(&ray);
            })?;
            Output::TransmissionLoss(transmission_loss(&pressure))
        }
        OutputKind::ParticleVelocity => {
            let mut stars = StarField::new(grid, source, env)?;
            fold_fan(env, source, opts, &mut summary, |ray| {
                stars.add_ray(&ray);
            })?;
            Output::ParticleVelocity(stars.finish())
        }
    };

    tracing::info!(
        product = ?kind,
        rays_traced = summary.rays_traced,
        rays_skipped = summary.rays_skipped,
        rays_killed = summary.rays_killed,
        returning_rays = summary.returning_rays,
        arrivals = summary.arrivals,
        "run complete"
    );
    Ok((output, summary))
}
