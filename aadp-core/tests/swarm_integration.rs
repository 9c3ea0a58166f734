//! End-to-end runs of the optimisation engine.

use aadp_core::antenna::{INFEASIBLE_COST, NO_SIDE_LOBE_COST};
use aadp_core::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn run_seeded(n: usize, steering: f64, iterations: u64, seed: u64) -> RunReport {
    let problem = AntennaArray::new(n, steering).unwrap();
    let mut swarm = Swarm::for_problem(problem, StdRng::seed_from_u64(seed)).unwrap();
    swarm
        .run(Termination::fixed_iterations(iterations).unwrap())
        .unwrap()
}

#[test]
fn seeded_runs_are_reproducible() {
    let a = run_seeded(3, 90.0, 100, 2024);
    let b = run_seeded(3, 90.0, 100, 2024);
    assert_eq!(a.design, b.design);
    assert_eq!(a.cost, b.cost);
    assert_eq!(a.sweeps, b.sweeps);
}

#[test]
fn default_problem_matches_recorded_baseline() {
    let report = run_seeded(3, 90.0, 100, 2024);

    let expected_design = [0.26067310394986071, 0.84697551246335478, 1.5];
    let expected_cost = -12.122735518480347;

    assert_eq!(report.sweeps, 99);
    assert_eq!(report.design.len(), expected_design.len());
    for (got, want) in report.design.iter().zip(expected_design) {
        assert!((got - want).abs() < 1e-12, "design {:?}", report.design);
    }
    assert!(
        (report.cost - expected_cost).abs() < 1e-12,
        "cost {}",
        report.cost
    );
}

#[test]
fn default_problem_finds_a_feasible_low_side_lobe_design() {
    let report = run_seeded(3, 90.0, 100, 7);
    let problem = AntennaArray::new(3, 90.0).unwrap();

    assert_eq!(report.sweeps, 99);
    assert!(problem.is_valid(&report.design));
    assert!(report.cost < INFEASIBLE_COST);
    assert!(report.cost > NO_SIDE_LOBE_COST);
    // a side lobe can never beat the main beam's full gain
    assert!(report.cost <= 20.0 * 3.0f64.ln() + 1e-9);
    assert_eq!(problem.evaluate(&report.design).unwrap(), report.cost);
}

#[test]
fn longer_runs_never_do_worse() {
    let problem = AntennaArray::new(4, 60.0).unwrap();
    let mut swarm = Swarm::for_problem(problem, StdRng::seed_from_u64(99)).unwrap();

    let mut history = vec![swarm.global_best().cost()];
    for _ in 0..40 {
        swarm.step().unwrap();
        history.push(swarm.global_best().cost());
    }
    assert!(history.windows(2).all(|w| w[1] <= w[0]));
    assert_eq!(swarm.sweeps(), 40);
}

#[test]
fn gaussian_coefficients_are_a_working_variant() {
    let problem = AntennaArray::new(3, 45.0).unwrap();
    let coefficients = PsoCoefficients::default().with_sampling(CoefficientSampling::Gaussian);
    let mut swarm = Swarm::new(problem, coefficients, 22, StdRng::seed_from_u64(5)).unwrap();
    let report = swarm
        .run(Termination::fixed_iterations(20).unwrap())
        .unwrap();
    assert!(swarm.problem().is_valid(&report.design));
}

#[test]
fn timed_run_terminates() {
    let problem = AntennaArray::new(3, 90.0).unwrap();
    let mut swarm = Swarm::for_problem(problem, StdRng::seed_from_u64(1)).unwrap();
    let report = swarm.run(Termination::timeout_ms(50.0).unwrap()).unwrap();
    assert!(report.elapsed_ms >= 40.0);
    assert!(report.sweeps >= 1);
}

#[test]
fn single_antenna_run_keeps_the_element_at_half() {
    let report = run_seeded(1, 90.0, 5, 3);
    assert_eq!(report.design, vec![0.5]);
}

#[test]
fn report_serializes_to_json() {
    let report = run_seeded(3, 90.0, 3, 11);
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["sweeps"], 2);
    assert_eq!(json["design"].as_array().unwrap().len(), 3);
}
