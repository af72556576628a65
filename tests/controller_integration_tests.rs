//! Integration tests for the simulation controller
//!
//! These tests drive the public boundary operations end to end: ticking,
//! scheduling, recommendation lifecycle, disruptions and state snapshots.

use railoptic::network::{default_roster, Train};
use railoptic::simulation::SimulationController;
use railoptic::types::{RecommendationKind, SimulationConfig, TrainStatus};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};

fn junction_pair() -> Vec<Train> {
    vec![
        Train::new("A", "Alpha", 1, 9).with_positions(72.0, 95.0),
        Train::new("B", "Bravo", 1, 5).with_positions(78.0, 95.0),
    ]
}

/// Test the full conflict flow: request, accept, then the halted train stays put
#[test]
fn test_conflict_accept_flow() {
    let mut controller = SimulationController::with_roster(junction_pair())
        .unwrap()
        .with_rng(StdRng::seed_from_u64(11));

    let recommendation = controller.request_recommendation().cloned().unwrap();
    assert_eq!(recommendation.kind, RecommendationKind::Conflict);
    assert_eq!(recommendation.proceed[0].as_str(), "A");
    assert_eq!(recommendation.halt[0].as_str(), "B");

    let applied = controller.accept_recommendation().unwrap();
    assert_eq!((applied.halted, applied.proceeded, applied.skipped), (1, 1, 0));

    for _ in 0..30 {
        controller.tick();
    }

    let state = controller.get_state();
    let bravo = state.train("B").unwrap();
    assert_eq!(bravo.status, TrainStatus::Halted);
    assert_eq!(bravo.position, 78.0);
    assert_eq!(bravo.speed, 0.0);

    let alpha = state.train("A").unwrap();
    assert_eq!(alpha.position, 95.0);
    assert_eq!(state.metrics.total_throughput, 1);
    assert_eq!(state.metrics.conflicts_averted, 1);
}

/// Test that rejection discards the recommendation without touching trains
#[test]
fn test_reject_leaves_trains_alone() {
    let mut controller = SimulationController::with_roster(junction_pair()).unwrap();
    let before = controller.get_state();

    controller.request_recommendation();
    let rejected = controller.reject_recommendation();
    assert!(rejected.is_some());

    let after = controller.get_state();
    assert_eq!(after.trains, before.trains);
    assert_eq!(after.metrics, before.metrics);
    assert!(after.pending_recommendation.is_none());
}

/// Test that reject after accept has no additional effect
#[test]
fn test_reject_after_accept_is_a_no_op() {
    let mut controller = SimulationController::with_roster(junction_pair()).unwrap();
    controller.request_recommendation();
    controller.accept_recommendation();
    let accepted = controller.get_state();

    assert!(controller.reject_recommendation().is_none());
    assert_eq!(controller.get_state(), accepted);
}

/// Test that a second request while one is pending does not replace it
#[test]
fn test_single_pending_recommendation() {
    let mut controller = SimulationController::with_roster(default_roster()).unwrap();

    let first = controller.request_recommendation().map(|r| r.id).unwrap();
    controller.tick();
    assert!(controller.request_recommendation().is_none());

    let state = controller.get_state();
    assert_eq!(state.pending_recommendation.unwrap().id, first);
}

/// Test that an empty roster never produces a recommendation
#[test]
fn test_empty_roster() {
    let mut controller = SimulationController::with_roster(Vec::new()).unwrap();
    assert!(controller.request_recommendation().is_none());
    assert!(controller.accept_recommendation().is_none());

    controller.tick();
    let state = controller.get_state();
    assert_eq!(state.tick, 1);
    assert_eq!(state.metrics.average_delay, 0);
    assert_eq!(state.metrics.conflicts_averted, 0);
}

/// Test disruption scenarios through the controller boundary
#[test]
fn test_disruption_scenarios() {
    let mut controller = SimulationController::with_roster(default_roster()).unwrap();

    assert!(controller.inject_disruption("F205", 5));
    let state = controller.get_state();
    let freight = state.train("F205").unwrap();
    assert_eq!(freight.delay, 10);
    assert_eq!(freight.status, TrainStatus::Delayed);

    // Metrics catch up with the new delay on the next tick
    assert_eq!(state.metrics.efficiency_score, 93);
    controller.tick();
    assert_eq!(controller.metrics().efficiency_score, 88);
    assert_eq!(controller.metrics().average_delay, 3);

    let before = controller.get_state();
    assert!(!controller.inject_disruption("F205", 0));
    assert!(!controller.inject_disruption("X999", 5));
    assert!(!controller.inject_disruption("", 5));
    assert!(!controller.inject_disruption(" F205 ", 5));
    assert_eq!(controller.get_state().trains, before.trains);
}

/// Test that a delayed train stops advancing until a recommendation lets it proceed
#[test]
fn test_delayed_train_resumes_on_proceed() {
    let mut controller = SimulationController::with_roster(vec![
        Train::new("D", "Delta", 2, 5).with_positions(10.0, 90.0),
    ])
    .unwrap();

    controller.inject_disruption("D", 3);
    controller.tick();
    assert_eq!(controller.trains()[0].position, 10.0);

    // A lone train always gets an advisory; keep asking until it is a proceed
    let mut seed = 0;
    loop {
        let mut probe = SimulationController::with_roster(controller.trains().to_vec())
            .unwrap()
            .with_rng(StdRng::seed_from_u64(seed));
        if !probe.request_recommendation().unwrap().proceed.is_empty() {
            break;
        }
        seed += 1;
    }

    let mut controller = controller.with_rng(StdRng::seed_from_u64(seed));
    controller.request_recommendation();
    controller.accept_recommendation();

    let delta = &controller.trains()[0];
    assert_eq!(delta.status, TrainStatus::Moving);
    assert!((delta.speed - 1.2).abs() < 1e-9);
    assert_eq!(delta.delay, 3);

    controller.tick();
    assert!((controller.trains()[0].position - 11.2).abs() < 1e-9);
}

/// Test scheduler driven advancement through start and stop
#[test]
fn test_scheduler_driven_run() {
    let config = SimulationConfig { tick_interval_ms: 200, seed: Some(1), ..Default::default() };
    let mut controller = SimulationController::new(config).unwrap();
    let start = Instant::now();

    assert!(controller.start_at(start));
    assert!(controller.get_state().running);
    assert!(!controller.start_at(start));

    assert_eq!(controller.advance(start + Duration::from_millis(199)), 0);
    assert_eq!(controller.advance(start + Duration::from_millis(1_000)), 5);
    assert_eq!(controller.get_state().elapsed, "00:01");

    // On-demand operations keep working while stopped
    assert!(controller.stop_simulation());
    assert!(!controller.get_state().running);
    assert_eq!(controller.advance(start + Duration::from_secs(60)), 0);
    assert!(controller.request_recommendation().is_some());
    assert!(controller.inject_disruption("P302", 1));

    controller.tick();
    assert_eq!(controller.current_tick(), 6);
}

/// Test that identical seeds produce identical runs
#[test]
fn test_seeded_runs_are_reproducible() {
    let run = |seed| {
        let config = SimulationConfig { seed: Some(seed), ..Default::default() };
        let mut controller = SimulationController::new(config).unwrap();
        for tick in 1..=40 {
            controller.tick();
            if tick % 4 == 0 {
                controller.request_recommendation();
                controller.accept_recommendation();
            }
        }
        controller.get_state()
    };

    let first = run(42);
    let second = run(42);
    assert_eq!(first.trains, second.trains);
    assert_eq!(first.metrics, second.metrics);
    assert_eq!(first.metrics.conflicts_averted, 10);
}

/// Test that identical seeds produce identical recommendation snapshots
#[test]
fn test_seeded_recommendations_are_reproducible() {
    let snapshot = |seed| {
        let config = SimulationConfig { seed: Some(seed), ..Default::default() };
        let mut controller = SimulationController::new(config).unwrap();
        controller.tick();
        controller.request_recommendation();
        controller.get_state().to_json().unwrap()
    };

    assert_eq!(snapshot(7), snapshot(7));
    assert_ne!(snapshot(7), snapshot(8));
}

/// Test that a realtime run that fell behind never overshoots its tick budget
#[test]
fn test_capped_advance_after_stall() {
    let config = SimulationConfig { ticks: 4, tick_interval_ms: 100, ..Default::default() };
    let mut controller = SimulationController::new(config.clone()).unwrap();
    let start = Instant::now();
    controller.start_at(start);

    let remaining = config.ticks - controller.current_tick();
    assert_eq!(controller.advance_at_most(start + Duration::from_secs(5), remaining), 4);
    assert_eq!(controller.current_tick(), config.ticks);
}

/// Test the JSON snapshot consumers read
#[test]
fn test_state_snapshot_json() {
    let mut controller = SimulationController::with_roster(junction_pair()).unwrap();
    controller.request_recommendation();

    let json = controller.get_state().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["tick"], 0);
    assert_eq!(value["running"], false);
    assert_eq!(value["trains"].as_array().unwrap().len(), 2);
    assert_eq!(value["pending_recommendation"]["kind"], "conflict");
    assert_eq!(value["pending_recommendation"]["proceed"][0], "A");
    assert!(value["pending_recommendation"]["id"].as_str().unwrap().starts_with("REC_"));

    let text = controller.get_state().to_string();
    assert!(text.contains("Pending Recommendation"));
    assert!(text.contains("Proceed: A"));
    assert!(text.contains("Halt: B"));
}
