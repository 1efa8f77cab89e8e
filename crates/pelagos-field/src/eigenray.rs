//! Eigenray search: proximity and regula-falsi.

use crate::arrivals::{Arrival, ArrivalSet};
use crate::products::RunSummary;
use crate::sample::{depth_at, passes, sample_pass};
use crate::SearchError;
use pelagos_core::{ReceiverGrid, Source};
use pelagos_env::Environment;
use pelagos_math::bracket;
use pelagos_trace::{trace_ray, Ray, TraceError, TraceOptions};

/// Iteration cap for one regula-falsi candidate. Exceeding it abandons
/// the candidate, never the run.
pub const MAX_REGULA_ITERS: usize = 21;

/// Acceptance controls shared by both search algorithms.
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Maximum |depth residual| in meters for an accepted eigenray.
    pub miss_tolerance: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            miss_tolerance: 1.0,
        }
    }
}

impl SearchConfig {
    /// Half-wavelength tolerance for a given frequency and sound speed.
    pub fn for_wavelength(frequency: f64, c: f64) -> Self {
        Self {
            miss_tolerance: 0.5 * c / frequency,
        }
    }
}

/// Proximity search: accept every fan ray passing within tolerance of a
/// receiver, including every pass of a returning ray.
///
/// Rays are traced and consumed one at a time, so memory stays bounded
/// by a single trajectory.
pub fn proximity_search(
    env: &Environment,
    source: &Source,
    opts: &TraceOptions,
    grid: &ReceiverGrid,
    cfg: &SearchConfig,
) -> Result<ArrivalSet, SearchError> {
    proximity_search_counted(env, source, opts, grid, cfg, &mut RunSummary::default())
}

pub(crate) fn proximity_search_counted(
    env: &Environment,
    source: &Source,
    opts: &TraceOptions,
    grid: &ReceiverGrid,
    cfg: &SearchConfig,
    summary: &mut RunSummary,
) -> Result<ArrivalSet, SearchError> {
    let mut set = ArrivalSet::new(grid);
    let points = grid.points();

    for angle in source.fan_radians() {
        let ray = match trace_ray(env, source, angle, opts) {
            Ok(ray) => {
                summary.note_ray(&ray);
                ray
            }
            Err(TraceError::DegenerateAngle { cos }) => {
                summary.note_skip();
                tracing::debug!(angle, cos, "skipping degenerate launch angle");
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        for (idx, &(rr, rz)) in points.iter().enumerate() {
            for i in passes(&ray, rr) {
                let s = sample_pass(&ray, i, rr);
                if (s.z - rz).abs() <= cfg.miss_tolerance {
                    set.push(idx, Arrival::from_ray(&ray, rr, rz, s.tau, s.amplitude));
                }
            }
        }
    }
    Ok(set)
}

/// Regula-falsi search: bracket eigenray launch angles between adjacent
/// fan rays and refine each bracket by false position.
///
/// Only valid for non-returning rays; a returning trajectory anywhere on
/// this path aborts with [`SearchError::ReturningRay`]. A receiver with
/// more candidates than traced rays aborts with
/// [`SearchError::CandidateOverflow`]. An exhausted refinement is logged
/// and skipped.
pub fn regula_falsi_search(
    env: &Environment,
    source: &Source,
    opts: &TraceOptions,
    grid: &ReceiverGrid,
    cfg: &SearchConfig,
) -> Result<ArrivalSet, SearchError> {
    regula_falsi_search_counted(env, source, opts, grid, cfg, &mut RunSummary::default())
}

pub(crate) fn regula_falsi_search_counted(
    env: &Environment,
    source: &Source,
    opts: &TraceOptions,
    grid: &ReceiverGrid,
    cfg: &SearchConfig,
    summary: &mut RunSummary,
) -> Result<ArrivalSet, SearchError> {
    let points = grid.points();
    let ranges = grid.ranges();

    // Tabulate each fan ray's depth at every receiver range, then drop
    // the trajectory; refinement re-traces the bounding rays it needs.
    let mut angles = Vec::new();
    let mut table: Vec<Vec<f64>> = Vec::new();
    for angle in source.fan_radians() {
        match trace_ray(env, source, angle, opts) {
            Ok(ray) => {
                summary.note_ray(&ray);
                if ray.is_returning() {
                    return Err(SearchError::ReturningRay { angle });
                }
                table.push(ranges.iter().map(|&r| depth_at(&ray, r)).collect());
                angles.push(angle);
            }
            Err(TraceError::DegenerateAngle { cos }) => {
                summary.note_skip();
                tracing::debug!(angle, cos, "skipping degenerate launch angle");
            }
            Err(e) => return Err(e.into()),
        }
    }
    let n_rays = angles.len();

    let mut set = ArrivalSet::new(grid);
    for (idx, &(rr, rz)) in points.iter().enumerate() {
        let Some(k) = ranges.iter().position(|&x| x == rr) else {
            continue;
        };

        // Collect brackets first so the candidate-count invariant is
        // checked before any refinement work.
        let mut exact: Vec<usize> = Vec::new();
        let mut brackets: Vec<(usize, usize)> = Vec::new();
        for j in 0..n_rays.saturating_sub(1) {
            let fl = rz - table[j][k];
            let fr = rz - table[j + 1][k];
            if fl.is_nan() || fr.is_nan() {
                continue;
            }
            if fl == 0.0 {
                exact.push(j);
            } else if fr == 0.0 && j == n_rays - 2 {
                exact.push(j + 1);
            } else if fl * fr < 0.0 {
                brackets.push((j, j + 1));
            }
        }
        let candidates = exact.len() + brackets.len();
        if candidates > n_rays {
            return Err(SearchError::CandidateOverflow {
                receiver: idx,
                candidates,
                rays: n_rays,
            });
        }

        for j in exact {
            if let Some(arrival) =
                arrival_at(env, source, opts, angles[j], rr, rz, summary)?
            {
                set.push(idx, arrival);
            }
        }
        for (jl, jr) in brackets {
            if let Some(arrival) =
                refine(env, source, opts, cfg, angles[jl], angles[jr], rr, rz, summary)?
            {
                set.push(idx, arrival);
            }
        }
    }
    Ok(set)
}

/// Re-trace one launch angle and build its arrival at `(rr, rz)`.
#[allow(clippy::too_many_arguments)]
fn arrival_at(
    env: &Environment,
    source: &Source,
    opts: &TraceOptions,
    angle: f64,
    rr: f64,
    rz: f64,
    summary: &mut RunSummary,
) -> Result<Option<Arrival>, SearchError> {
    let ray = match checked_trace(env, source, opts, angle, summary)? {
        Some(ray) => ray,
        None => return Ok(None),
    };
    let Some(i) = bracket(ray.ranges(), rr) else {
        return Ok(None);
    };
    let s = sample_pass(&ray, i, rr);
    Ok(Some(Arrival::from_ray(&ray, rr, rz, s.tau, s.amplitude)))
}

/// False-position refinement of one bracketed candidate.
#[allow(clippy::too_many_arguments)]
fn refine(
    env: &Environment,
    source: &Source,
    opts: &TraceOptions,
    cfg: &SearchConfig,
    mut theta_l: f64,
    mut theta_r: f64,
    rr: f64,
    rz: f64,
    summary: &mut RunSummary,
) -> Result<Option<Arrival>, SearchError> {
    let residual = |ray: &Ray| rz - depth_at(ray, rr);

    let Some(ray_l) = checked_trace(env, source, opts, theta_l, summary)? else {
        return Ok(None);
    };
    let mut fl = residual(&ray_l);
    if fl.abs() <= cfg.miss_tolerance {
        return finish(&ray_l, rr, rz);
    }
    let Some(ray_r) = checked_trace(env, source, opts, theta_r, summary)? else {
        return Ok(None);
    };
    let mut fr = residual(&ray_r);
    if fr.abs() <= cfg.miss_tolerance {
        return finish(&ray_r, rr, rz);
    }
    drop(ray_l);
    drop(ray_r);

    for _ in 0..MAX_REGULA_ITERS {
        let theta0 = theta_r - fr * (theta_l - theta_r) / (fl - fr);
        if !theta0.is_finite() {
            tracing::warn!(theta_l, theta_r, "degenerate false-position step, candidate abandoned");
            return Ok(None);
        }
        let Some(ray0) = checked_trace(env, source, opts, theta0, summary)? else {
            return Ok(None);
        };
        let f0 = residual(&ray0);
        if f0.is_nan() {
            tracing::warn!(theta0, "trial ray left the receiver range, candidate abandoned");
            return Ok(None);
        }
        if f0.abs() <= cfg.miss_tolerance {
            return finish(&ray0, rr, rz);
        }
        if f0.signum() == fl.signum() {
            theta_l = theta0;
            fl = f0;
        } else {
            theta_r = theta0;
            fr = f0;
        }
    }
    tracing::warn!(
        theta_l,
        theta_r,
        rr,
        rz,
        "false position exhausted {MAX_REGULA_ITERS} iterations, candidate abandoned"
    );
    Ok(None)
}

fn finish(ray: &Ray, rr: f64, rz: f64) -> Result<Option<Arrival>, SearchError> {
    let Some(i) = bracket(ray.ranges(), rr) else {
        return Ok(None);
    };
    let s = sample_pass(ray, i, rr);
    Ok(Some(Arrival::from_ray(ray, rr, rz, s.tau, s.amplitude)))
}

/// Trace with the regula-falsi preconditions applied: degenerate angles
/// abandon the candidate, returning rays abort the search.
fn checked_trace(
    env: &Environment,
    source: &Source,
    opts: &TraceOptions,
    angle: f64,
    summary: &mut RunSummary,
) -> Result<Option<Ray>, SearchError> {
    match trace_ray(env, source, angle, opts) {
        Ok(ray) => {
            summary.note_ray(&ray);
            if ray.is_returning() {
                return Err(SearchError::ReturningRay { angle });
            }
            Ok(Some(ray))
        }
        Err(TraceError::DegenerateAngle { cos }) => {
            tracing::warn!(angle, cos, "refinement reached a degenerate angle, candidate abandoned");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}
