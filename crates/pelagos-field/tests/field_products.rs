//! Scenario tests for eigenray search and the product driver: multipath
//! arrivals, returning-ray passes, wedge convergence, and run summaries.

use pelagos_core::{RangeBox, ReceiverGrid};
use pelagos_env::{Boundary, BoundaryShape, Environment, Face, SoundSpeed, SurfaceKind};
use pelagos_field::{
    proximity_search, run, EigenraySolver, Output, OutputKind, SearchConfig,
};
use pelagos_test_utils::{
    fan_source, flat_isovelocity, hard_waveguide, isovelocity_wedge, vacuum_surface,
};
use pelagos_trace::TraceOptions;

#[test]
fn three_paths_reach_a_midwater_receiver() {
    // Rigid 200 m channel, source and receiver both at 100 m. The direct
    // path and the two single-bounce paths all pass exactly through the
    // receiver when the fan carries atan(200/2000) on both sides.
    let env = hard_waveguide(200.0, 1500.0, 2_500.0);
    let bounce_deg = (200.0_f64 / 2_000.0).atan().to_degrees();
    let source = fan_source(100.0, vec![-bounce_deg, 0.0, bounce_deg], 2_500.0);
    let grid = ReceiverGrid::linear(vec![2_000.0], vec![100.0]).unwrap();
    let opts = TraceOptions::for_box(env.range_box());

    let set = proximity_search(&env, &source, &opts, &grid, &SearchConfig::default())
        .unwrap();
    let arrivals = set.at(0);
    assert_eq!(arrivals.len(), 3, "direct plus two single-bounce paths");

    let direct_tau = 2_000.0 / 1500.0;
    let bounce_tau = (2_000.0_f64.powi(2) + 200.0_f64.powi(2)).sqrt() / 1500.0;
    let mut taus: Vec<f64> = arrivals.iter().map(|a| a.travel_time).collect();
    taus.sort_by(f64::total_cmp);
    assert!((taus[0] - direct_tau).abs() < 1e-5);
    assert!((taus[1] - bounce_tau).abs() < 1e-5);
    assert!((taus[2] - bounce_tau).abs() < 1e-5);

    let surface_bounces: u32 = arrivals.iter().map(|a| a.surface_reflections).sum();
    let bottom_bounces: u32 = arrivals.iter().map(|a| a.bottom_reflections).sum();
    assert_eq!(surface_bounces, 1);
    assert_eq!(bottom_bounces, 1);
}

#[test]
fn returning_ray_contributes_every_pass() {
    // A bottom face steeper than 45 degrees turns the horizontal ray
    // around; the receiver sits under both the outbound and the return
    // pass.
    let bottom = Boundary::new(
        BoundaryShape::PiecewiseLinear {
            ranges: vec![0.0, 50.0, 5_000.0],
            depths: vec![100.0, 1.0, 1.0],
        },
        SurfaceKind::Rigid,
        Face::Below,
        None,
    )
    .unwrap();
    let env = Environment::new(
        vacuum_surface(),
        bottom,
        SoundSpeed::isovelocity(1500.0).unwrap(),
        vec![],
        RangeBox::new(0.0, 5_000.0).unwrap(),
    )
    .unwrap();
    let source = fan_source(50.0, vec![0.0], 5_000.0);
    let grid = ReceiverGrid::linear(vec![25.0], vec![50.0]).unwrap();
    let opts = TraceOptions {
        step: 0.5,
        ..TraceOptions::default()
    };

    let set = proximity_search(&env, &source, &opts, &grid, &SearchConfig::default())
        .unwrap();
    let arrivals = set.at(0);
    assert_eq!(arrivals.len(), 2, "one arrival per pass over the receiver");
    assert_eq!(arrivals[0].bottom_reflections, 1);
    assert_eq!(arrivals[1].bottom_reflections, 1);
    assert!(
        arrivals[1].travel_time > arrivals[0].travel_time,
        "the return pass arrives later"
    );
}

#[test]
fn regula_falsi_converges_in_the_wedge() {
    // Isovelocity wedge, direct eigenray to (1500, 80) from 50 m: the
    // known angle is atan(30/1500) downward. The 4-degree fan ray
    // bottom-bounces, so the bracket is genuinely nonlinear and takes a
    // few false-position rounds.
    let env = isovelocity_wedge(200.0, 100.0, 1500.0, 2_000.0);
    let source = fan_source(50.0, vec![-4.0, 0.0], 2_000.0);
    let grid = ReceiverGrid::linear(vec![1_500.0], vec![80.0]).unwrap();
    let opts = TraceOptions::for_box(env.range_box());
    let cfg = SearchConfig {
        miss_tolerance: 0.05,
    };

    let (out, summary) = run(
        &env,
        &source,
        &opts,
        &grid,
        &cfg,
        OutputKind::Arrivals(EigenraySolver::RegulaFalsi),
    )
    .unwrap();
    let Output::Arrivals(set) = out else {
        panic!("wrong product");
    };
    assert_eq!(summary.arrivals, 1);
    let arr = set.at(0)[0];
    let expected = (30.0_f64 / 1_500.0).atan();
    assert!(
        (arr.angle - expected).abs() < 1e-3,
        "angle {} rad, want {expected}",
        arr.angle
    );
    let expected_tau = (1_500.0_f64.powi(2) + 30.0_f64.powi(2)).sqrt() / 1500.0;
    assert!((arr.travel_time - expected_tau).abs() < 1e-4);
}

#[test]
fn killed_rays_are_counted_in_the_summary() {
    // Both steep rays end on the vacuum surface; only the horizontal
    // one survives to the far edge.
    let env = flat_isovelocity(200.0, 1500.0, 3_000.0);
    let source = fan_source(100.0, vec![10.0, 0.0, -10.0], 3_000.0);
    let grid = ReceiverGrid::vertical(2_500.0, vec![100.0, 190.0]).unwrap();
    let opts = TraceOptions::for_box(env.range_box());

    let (out, summary) = run(
        &env,
        &source,
        &opts,
        &grid,
        &SearchConfig::default(),
        OutputKind::TransmissionLoss,
    )
    .unwrap();
    assert_eq!(summary.rays_traced, 3);
    assert_eq!(summary.rays_killed, 2);
    assert_eq!(summary.rays_skipped, 0);

    let Output::TransmissionLoss(tl) = out else {
        panic!("wrong product");
    };
    assert_eq!(tl.len(), 2);
    assert!(tl[0].is_finite(), "the surviving beam covers the receiver");
}
