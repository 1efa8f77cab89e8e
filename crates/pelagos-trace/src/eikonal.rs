//! The eikonal trajectory integrator.
//!
//! Advances `(r, z, σr, σz, τ)` by classic fourth-order Runge–Kutta in
//! arclength, with the slowness vector `σ` driven by the local sound-speed
//! gradient: `dσ/ds = −∇c/c²`, `d(r,z)/ds = c σ`, `dτ/ds = 1/c`. After
//! each step the segment is tested against every live collision target;
//! a crossing is resolved to the chord intersection, the direction is
//! specularly reflected, and the reflection coefficient folds into the
//! ray's accumulated product.

use crate::dynamic::{normal_curvature, DynamicState};
use crate::ray::{Ray, RayFate, RayStep};
use crate::TraceError;
use pelagos_core::units::MIN_COS_LAUNCH;
use pelagos_core::{RangeBox, Source};
use pelagos_env::{Collider, Environment, HitKind, SoundSpeed};
use pelagos_math::{dot, intersect, reflect, Vec2};

/// A pre-step sample closer to a boundary than this is treated as sitting
/// on it, so the sample pushed at a hit does not re-trigger the crossing
/// test on the next step.
const HIT_EPS: f64 = 1.0e-9;

/// Integration controls for one trace.
///
/// Kill behavior is explicit per-call configuration, not engine state.
#[derive(Clone, Debug)]
pub struct TraceOptions {
    /// Arclength step in meters.
    pub step: f64,
    /// Step budget; integration stops when it runs out.
    pub max_steps: usize,
    /// Kill the ray when the accumulated |reflection product| falls
    /// below this.
    pub min_reflectivity: f64,
    /// Kill the ray the first time range decreases.
    pub kill_on_return: bool,
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self {
            step: 1.0,
            max_steps: 100_000,
            min_reflectivity: 1.0e-5,
            kill_on_return: false,
        }
    }
}

impl TraceOptions {
    /// Step size scaled to the range box: 5000 steps across the box,
    /// clamped to `[0.01, 100]` meters.
    pub fn for_box(range_box: RangeBox) -> Self {
        Self {
            step: (range_box.span() / 5000.0).clamp(0.01, 100.0),
            ..Self::default()
        }
    }
}

/// Derivatives of the eikonal state at one point.
struct Slope {
    dpos: Vec2,
    dsigma: Vec2,
    dtau: f64,
}

fn slope(ss: &SoundSpeed, pos: Vec2, sigma: Vec2) -> Slope {
    let s = ss.eval_clamped(pos.r, pos.z);
    let c2 = s.c * s.c;
    Slope {
        dpos: Vec2::new(s.c * sigma.r, s.c * sigma.z),
        dsigma: Vec2::new(-s.cr / c2, -s.cz / c2),
        dtau: 1.0 / s.c,
    }
}

/// The first boundary crossing along a trajectory segment.
struct Crossing<'a> {
    frac: f64,
    point: Vec2,
    collider: Collider<'a>,
}

fn first_crossing<'a>(
    colliders: &[Collider<'a>],
    old_pos: Vec2,
    new_pos: Vec2,
) -> Result<Option<Crossing<'a>>, TraceError> {
    let mut best: Option<Crossing<'a>> = None;
    let seg_len = (new_pos - old_pos).norm();
    if seg_len == 0.0 {
        return Ok(None);
    }
    for col in colliders {
        if !col.in_span(old_pos.r) || !col.in_span(new_pos.r) {
            continue;
        }
        let b_old = col.boundary().interpolate(old_pos.r)?;
        let b_new = col.boundary().interpolate(new_pos.r)?;
        let d_old = old_pos.z - b_old.depth;
        let d_new = new_pos.z - b_new.depth;
        if d_old.abs() < HIT_EPS || d_old * d_new > 0.0 {
            continue;
        }
        let hit = intersect(
            old_pos,
            new_pos,
            Vec2::new(old_pos.r, b_old.depth),
            Vec2::new(new_pos.r, b_new.depth),
        )
        .unwrap_or(Vec2::new(new_pos.r, b_new.depth));
        let frac = (hit - old_pos).norm() / seg_len;
        if best.as_ref().map_or(true, |b| frac < b.frac) {
            best = Some(Crossing {
                frac,
                point: hit,
                collider: *col,
            });
        }
    }
    Ok(best)
}

/// Trace one ray through the environment.
///
/// `angle` is the launch angle in internal radians (downward positive).
/// Returns the completed [`Ray`]; the caller owns it exclusively.
///
/// # Errors
///
/// - [`TraceError::DegenerateAngle`] when |cos θ| is below the fixed
///   epsilon; fan-level callers skip such angles.
/// - [`TraceError::Env`] when an environment query fails.
pub fn trace_ray(
    env: &Environment,
    source: &Source,
    angle: f64,
    opts: &TraceOptions,
) -> Result<Ray, TraceError> {
    let cos0 = angle.cos();
    if cos0.abs() < MIN_COS_LAUNCH {
        return Err(TraceError::DegenerateAngle { cos: cos0.abs() });
    }

    let ss = env.soundspeed();
    let range_box = env.range_box();
    let colliders = env.colliders();
    let frequency = source.frequency();

    let s0 = ss.eval(source.range(), source.depth())?;
    let c0 = s0.c;
    let q0 = c0 / source.fan_spacing();

    let mut ray = Ray::new(angle);
    let mut state = DynamicState::at_source(c0);
    let mut pos = Vec2::new(source.range(), source.depth());
    let mut sigma = Vec2::new(cos0 / c0, angle.sin() / c0);
    let mut tau = 0.0;
    let mut prev_cz = s0.cz;
    let mut prev_r = pos.r;

    ray.push(RayStep {
        r: pos.r,
        z: pos.z,
        c: c0,
        tau,
        phase: state.phase,
        caustics: state.caustics,
        p: state.p,
        q: state.q,
        amplitude: state.amplitude(c0, c0, cos0.abs(), q0),
        boundary_hit: false,
    });

    let h = opts.step;
    for _ in 1..opts.max_steps {
        // Classic RK4 on (pos, sigma, tau).
        let k1 = slope(ss, pos, sigma);
        let k2 = slope(
            ss,
            pos + k1.dpos * (h / 2.0),
            sigma + k1.dsigma * (h / 2.0),
        );
        let k3 = slope(
            ss,
            pos + k2.dpos * (h / 2.0),
            sigma + k2.dsigma * (h / 2.0),
        );
        let k4 = slope(ss, pos + k3.dpos * h, sigma + k3.dsigma * h);

        let sixth = h / 6.0;
        let mut cand_pos = pos
            + (k1.dpos + k2.dpos * 2.0 + k3.dpos * 2.0 + k4.dpos) * sixth;
        let cand_sigma = sigma
            + (k1.dsigma + k2.dsigma * 2.0 + k3.dsigma * 2.0 + k4.dsigma) * sixth;
        let mut cand_tau =
            tau + (k1.dtau + 2.0 * k2.dtau + 2.0 * k3.dtau + k4.dtau) * sixth;
        let mut h_eff = h;
        let mut exited = false;

        // Truncate at the range-box edge so the last sample sits on it.
        if cand_pos.r < range_box.rmin || cand_pos.r > range_box.rmax {
            let edge = if cand_pos.r < range_box.rmin {
                range_box.rmin
            } else {
                range_box.rmax
            };
            let frac = (edge - pos.r) / (cand_pos.r - pos.r);
            if frac <= 0.0 {
                ray.set_fate(RayFate::ExitedBox);
                return Ok(ray);
            }
            cand_pos = pos + (cand_pos - pos) * frac;
            cand_tau = tau + (cand_tau - tau) * frac;
            h_eff *= frac;
            exited = true;
        }

        match first_crossing(&colliders, pos, cand_pos)? {
            Some(hit) => {
                let h_hit = h_eff * hit.frac;
                let incident = {
                    let seg = hit.point - pos;
                    let n = seg.norm();
                    if n == 0.0 {
                        Vec2::new(sigma.r, sigma.z) * (1.0 / sigma.norm())
                    } else {
                        seg * (1.0 / n)
                    }
                };

                // Advance the paraxial pair to the hit, then apply the
                // boundary transform and the reflection coefficient.
                let mid = (pos + hit.point) * 0.5;
                let mid_sample = ss.eval_clamped(mid.r, mid.z);
                state.advance(h_hit, mid_sample.c, normal_curvature(&mid_sample, incident));

                let geometry = hit.collider.boundary().interpolate(hit.point.r)?;
                let hit_sample = ss.eval_clamped(hit.point.r, hit.point.z);
                let cos_inc = dot(incident, geometry.normal).abs().min(1.0);
                let incidence = cos_inc.acos();
                let coefficient = hit.collider.boundary().reflection_coefficient(
                    hit.point.r,
                    incidence,
                    hit_sample.c,
                    frequency,
                )?;
                state.refl *= coefficient;
                state.reflect(
                    incident,
                    geometry.tangent,
                    geometry.normal,
                    geometry.curvature,
                    &hit_sample,
                );

                match hit.collider.kind() {
                    HitKind::Surface => ray.count_surface(),
                    HitKind::Bottom => ray.count_bottom(),
                    HitKind::Object => ray.count_object(),
                }

                pos = hit.point;
                tau += (cand_tau - tau) * hit.frac;
                ray.push(RayStep {
                    r: pos.r,
                    z: pos.z,
                    c: hit_sample.c,
                    tau,
                    phase: state.phase,
                    caustics: state.caustics,
                    p: state.p,
                    q: state.q,
                    amplitude: state.amplitude(hit_sample.c, c0, cos0.abs(), q0),
                    boundary_hit: true,
                });

                if state.refl.norm() < opts.min_reflectivity {
                    ray.set_fate(RayFate::LowReflectivity);
                    return Ok(ray);
                }

                let outgoing = reflect(incident, geometry.normal);
                sigma = outgoing * (1.0 / hit_sample.c);
                prev_cz = hit_sample.cz;
            }
            None => {
                let mid = (pos + cand_pos) * 0.5;
                let seg = cand_pos - pos;
                let seg_len = seg.norm();
                if seg_len > 0.0 {
                    let mid_sample = ss.eval_clamped(mid.r, mid.z);
                    let direction = seg * (1.0 / seg_len);
                    state.advance(
                        h_eff,
                        mid_sample.c,
                        normal_curvature(&mid_sample, direction),
                    );
                }

                pos = cand_pos;
                tau = cand_tau;
                let sample = ss.eval_clamped(pos.r, pos.z);

                // Keep sigma on the eikonal shell |σ| = 1/c.
                let mag = cand_sigma.norm();
                sigma = if mag > 0.0 {
                    cand_sigma * (1.0 / (sample.c * mag))
                } else {
                    cand_sigma
                };

                if prev_cz * sample.cz < 0.0 {
                    ray.count_refraction();
                }
                prev_cz = sample.cz;

                ray.push(RayStep {
                    r: pos.r,
                    z: pos.z,
                    c: sample.c,
                    tau,
                    phase: state.phase,
                    caustics: state.caustics,
                    p: state.p,
                    q: state.q,
                    amplitude: state.amplitude(sample.c, c0, cos0.abs(), q0),
                    boundary_hit: false,
                });

                if exited {
                    ray.set_fate(RayFate::ExitedBox);
                    return Ok(ray);
                }
            }
        }

        if pos.r < prev_r {
            ray.set_returning();
            if opts.kill_on_return {
                ray.set_fate(RayFate::Returned);
                return Ok(ray);
            }
        }
        prev_r = pos.r;
    }

    ray.set_fate(RayFate::StepBudget);
    Ok(ray)
}

/// Trace the whole launch fan in angle order.
///
/// Degenerate launch angles are skipped with a debug log entry, matching
/// the single-ray contract that they are rejected before integration.
pub fn trace_fan(
    env: &Environment,
    source: &Source,
    opts: &TraceOptions,
) -> Result<Vec<Ray>, TraceError> {
    let fan = source.fan_radians();
    let mut rays = Vec::with_capacity(fan.len());
    for angle in fan {
        match trace_ray(env, source, angle, opts) {
            Ok(ray) => rays.push(ray),
            Err(TraceError::DegenerateAngle { cos }) => {
                tracing::debug!(angle, cos, "skipping degenerate launch angle");
            }
            Err(e) => return Err(e),
        }
    }
    Ok(rays)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pelagos_test_utils::{fan_source, flat_isovelocity, hard_waveguide};
    use proptest::prelude::*;

    #[test]
    fn degenerate_angle_rejected() {
        let env = flat_isovelocity(1000.0, 1500.0, 10_000.0);
        let source = fan_source(500.0, vec![0.0], 10_000.0);
        match trace_ray(&env, &source, std::f64::consts::FRAC_PI_2, &TraceOptions::default()) {
            Err(TraceError::DegenerateAngle { .. }) => {}
            other => panic!("expected DegenerateAngle, got {other:?}"),
        }
    }

    #[test]
    fn horizontal_ray_stays_level() {
        let env = flat_isovelocity(1000.0, 1500.0, 2_000.0);
        let source = fan_source(500.0, vec![0.0], 2_000.0);
        let opts = TraceOptions::for_box(env.range_box());
        let ray = trace_ray(&env, &source, 0.0, &opts).unwrap();
        assert_eq!(ray.fate(), RayFate::ExitedBox);
        for &z in ray.depths() {
            assert!((z - 500.0).abs() < 1e-6, "depth drifted to {z}");
        }
        // Straight-ray travel time: distance / c.
        let tau_end = *ray.travel_times().last().unwrap();
        assert!((tau_end - 2_000.0 / 1500.0).abs() < 1e-6);
        assert!(ray.rmax() <= 2_000.0 + 1e-9);
        assert_eq!(ray.total_reflections(), 0);
        assert!(!ray.is_returning());
    }

    #[test]
    fn step_counts_grow_monotonically() {
        let env = flat_isovelocity(200.0, 1500.0, 3_000.0);
        let source = fan_source(100.0, vec![-8.0], 3_000.0);
        let opts = TraceOptions::for_box(env.range_box());
        let ray = trace_ray(&env, &source, -8.0_f64.to_radians(), &opts).unwrap();
        assert!(ray.len() > 2);
        for w in ray.ranges().windows(2) {
            assert!(w[1] >= w[0], "range went backwards in a flat duct");
        }
    }

    #[test]
    fn reflections_match_direction_reversals() {
        let env = hard_waveguide(200.0, 1500.0, 5_000.0);
        let source = fan_source(100.0, vec![-10.0], 5_000.0);
        let opts = TraceOptions::for_box(env.range_box());
        // Positive internal radians descend; the ray bounces between the
        // rigid boundaries until it leaves the box.
        let ray = trace_ray(&env, &source, 10.0_f64.to_radians(), &opts).unwrap();
        assert!(ray.total_reflections() > 2);

        let z = ray.depths();
        let mut reversals = 0u32;
        let mut last_sign = 0.0_f64;
        for w in z.windows(2) {
            let dz = w[1] - w[0];
            if dz == 0.0 {
                continue;
            }
            let sign = dz.signum();
            if last_sign != 0.0 && sign != last_sign {
                reversals += 1;
            }
            last_sign = sign;
        }
        assert_eq!(
            ray.total_reflections(),
            reversals,
            "sRefl+bRefl+oRefl must equal direction reversals"
        );
    }

    #[test]
    fn vacuum_surface_kills_on_contact() {
        // The surface reflects with coefficient 0: one hit ends the ray.
        let env = flat_isovelocity(200.0, 1500.0, 5_000.0);
        let source = fan_source(100.0, vec![10.0], 5_000.0);
        let opts = TraceOptions::for_box(env.range_box());
        // Negative internal radians head upward, into the vacuum surface.
        let ray = trace_ray(&env, &source, -10.0_f64.to_radians(), &opts).unwrap();
        assert_eq!(ray.fate(), RayFate::LowReflectivity);
        assert_eq!(ray.surface_reflections(), 1);
        assert_eq!(ray.bottom_reflections(), 0);
        assert!(*ray.boundary_hits().last().unwrap());
    }

    #[test]
    fn amplitude_decays_along_a_clean_ray() {
        let env = flat_isovelocity(2_000.0, 1500.0, 4_000.0);
        let source = fan_source(1_000.0, vec![0.0], 4_000.0);
        let opts = TraceOptions::for_box(env.range_box());
        let ray = trace_ray(&env, &source, 0.0, &opts).unwrap();
        let amps = ray.amplitudes();
        let early = amps[10].norm();
        let late = amps[ray.len() - 1].norm();
        assert!(early > late, "spreading must reduce amplitude");
        assert_eq!(ray.caustics().last(), Some(&0));
    }

    #[test]
    fn fan_skips_degenerate_angles() {
        let env = flat_isovelocity(1000.0, 1500.0, 2_000.0);
        let source = fan_source(500.0, vec![-90.0, 0.0, 5.0], 2_000.0);
        let opts = TraceOptions::for_box(env.range_box());
        let rays = trace_fan(&env, &source, &opts).unwrap();
        assert_eq!(rays.len(), 2, "the vertical launch must be skipped");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]
        #[test]
        fn flat_duct_rays_stay_inside_the_box(angle_deg in -20.0_f64..20.0) {
            let env = flat_isovelocity(500.0, 1500.0, 1_000.0);
            let source = fan_source(250.0, vec![angle_deg], 1_000.0);
            let opts = TraceOptions::for_box(env.range_box());
            let ray = trace_ray(&env, &source, source.fan_radians()[0], &opts).unwrap();
            prop_assert!(ray.len() >= 2);
            prop_assert!(ray.rmax() <= 1_000.0 + 1e-9);
            prop_assert!(ray.rmin() >= 0.0 - 1e-9);
            // A flat duct never turns a ray back in range.
            for w in ray.ranges().windows(2) {
                prop_assert!(w[1] >= w[0] - 1e-12);
            }
            prop_assert!(!ray.is_returning());
        }
    }
}
