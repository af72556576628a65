//! Tests for disruption injection
//!
//! These tests verify that disruptions only ever add delay to the named
//! train and that malformed or unmatched disruptions leave the registry as is.

use railoptic::dispatch::{Disruption, DisruptionInjector};
use railoptic::network::{default_roster, TrainRegistry};
use railoptic::simulation::SimulationError;
use railoptic::types::TrainStatus;

fn registry() -> TrainRegistry {
    TrainRegistry::new(default_roster()).unwrap()
}

/// Test the freight delay scenario
#[test]
fn test_freight_delay_scenario() {
    let mut registry = registry();
    let injector = DisruptionInjector::new();

    injector.inject(&mut registry, &Disruption::try_new("F205", 5).unwrap()).unwrap();

    let freight = registry.get_train("F205").unwrap();
    assert_eq!(freight.delay, 10);
    assert_eq!(freight.status, TrainStatus::Delayed);
    assert_eq!(freight.speed, 1.0);
    assert_eq!(freight.position, 30.0);

    // Other trains untouched
    let untouched: Vec<_> = registry.trains().iter().filter(|t| t.id.as_str() != "F205").cloned().collect();
    let original: Vec<_> = default_roster().into_iter().filter(|t| t.id.as_str() != "F205").collect();
    assert_eq!(untouched, original);
}

/// Test that zero or negative minutes are rejected before reaching the registry
#[test]
fn test_zero_minutes_is_rejected() {
    assert!(matches!(Disruption::try_new("F205", 0), Err(SimulationError::InvalidDisruption(_))));
    assert!(matches!(Disruption::try_new("F205", -10), Err(SimulationError::InvalidDisruption(_))));
    assert!(matches!(Disruption::try_new("  ", 5), Err(SimulationError::InvalidDisruption(_))));
}

/// Test that an unknown train leaves the registry unchanged
#[test]
fn test_unknown_train_is_a_no_op() {
    let mut registry = registry();
    let before = registry.get();

    let result = DisruptionInjector::new().inject(&mut registry, &Disruption::try_new("X999", 5).unwrap());

    assert!(matches!(result, Err(SimulationError::UnknownTrain(ref id)) if id == "X999"));
    assert_eq!(registry.get(), before);
}

/// Test that repeated disruptions accumulate
#[test]
fn test_delay_accumulates() {
    let mut registry = registry();
    let injector = DisruptionInjector::new();

    for minutes in [3, 4, 8] {
        injector.inject(&mut registry, &Disruption::try_new("E404", minutes).unwrap()).unwrap();
    }

    assert_eq!(registry.get_train("E404").unwrap().delay, 15);
}

/// Test parsing of the TRAIN_ID:MINUTES form
#[test]
fn test_disruption_parsing() {
    let disruption: Disruption = " P302 : 7".parse().unwrap();
    assert_eq!(disruption.train_id.as_str(), "P302");
    assert_eq!(disruption.minutes, 7);

    for bad in ["", "P302", "P302:", "P302:-1", "P302:x", ":3"] {
        assert!(bad.parse::<Disruption>().is_err(), "{:?} should not parse", bad);
    }
}

/// Test that disrupting a halted train keeps it stopped and marks it delayed
#[test]
fn test_disruption_on_halted_train() {
    let mut registry = registry();
    registry.upsert_by_id("R101", |t| t.halted());

    DisruptionInjector::new()
        .inject(&mut registry, &Disruption::try_new("R101", 2).unwrap())
        .unwrap();

    let express = registry.get_train("R101").unwrap();
    assert_eq!(express.status, TrainStatus::Delayed);
    assert_eq!(express.speed, 0.0);
    assert_eq!(express.delay, 2);
}
