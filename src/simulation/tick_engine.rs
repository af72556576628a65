//! Per-tick state advancement
//!
//! One tick: clock += 1, every moving train steps toward its target, then
//! metrics are recomputed. Status is never touched here.

use crate::network::{Train, TrainRegistry};
use crate::simulation::{Metrics, SimulationClock};
use tracing::{debug, instrument, trace};

/// Applies the movement rule to the whole registry
#[derive(Debug, Clone, Copy, Default)]
pub struct TickEngine;

impl TickEngine {
    /// Create a new tick engine
    pub fn new() -> Self {
        Self
    }

    /// Run one tick and return the new tick number
    #[instrument(skip_all, fields(tick = clock.tick() + 1))]
    pub fn tick(&self, clock: &mut SimulationClock, registry: &mut TrainRegistry, metrics: &mut Metrics) -> u64 {
        let tick = clock.advance();

        let mut moved = 0usize;
        registry.upsert_all(|train: Train| {
            let before = train.position;
            let train = train.advanced();
            if train.position != before {
                moved += 1;
                trace!(train_id = %train.id, position = train.position, "Train advanced");
            }
            train
        });

        metrics.recompute(registry.trains());
        debug!(
            moved,
            throughput = metrics.total_throughput,
            efficiency = metrics.efficiency_score,
            "Tick complete"
        );
        tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::default_roster;
    use crate::types::TrainStatus;

    fn setup(trains: Vec<Train>) -> (SimulationClock, TrainRegistry, Metrics) {
        let registry = TrainRegistry::new(trains).unwrap();
        let metrics = Metrics::from_trains(registry.trains());
        (SimulationClock::default(), registry, metrics)
    }

    #[test]
    fn test_tick_advances_clock_and_positions() {
        let (mut clock, mut registry, mut metrics) = setup(default_roster());

        assert_eq!(TickEngine::new().tick(&mut clock, &mut registry, &mut metrics), 1);

        assert_eq!(registry.get_train("R101").unwrap().position, 12.0);
        assert_eq!(registry.get_train("F205").unwrap().position, 31.0);
        assert_eq!(registry.get_train("P302").unwrap().position, 66.5);
        assert!((registry.get_train("E404").unwrap().position - 47.2).abs() < 1e-9);
    }

    #[test]
    fn test_position_clamps_at_target() {
        let (mut clock, mut registry, mut metrics) =
            setup(vec![Train::new("A", "Alpha", 1, 5).with_positions(89.0, 90.0).with_speed(2.5)]);
        let engine = TickEngine::new();

        engine.tick(&mut clock, &mut registry, &mut metrics);
        assert_eq!(registry.get_train("A").unwrap().position, 90.0);
        assert_eq!(metrics.total_throughput, 1);

        engine.tick(&mut clock, &mut registry, &mut metrics);
        assert_eq!(registry.get_train("A").unwrap().position, 90.0);
        assert_eq!(clock.tick(), 2);
    }

    #[test]
    fn test_non_moving_trains_stay_put() {
        let (mut clock, mut registry, mut metrics) = setup(vec![
            Train::new("H", "Halted", 1, 5).with_positions(40.0, 90.0).with_status(TrainStatus::Halted),
            Train::new("D", "Delayed", 2, 5).with_positions(20.0, 90.0).with_status(TrainStatus::Delayed),
        ]);

        for _ in 0..10 {
            TickEngine::new().tick(&mut clock, &mut registry, &mut metrics);
        }

        let halted = registry.get_train("H").unwrap();
        assert_eq!(halted.position, 40.0);
        assert_eq!(halted.status, TrainStatus::Halted);
        let delayed = registry.get_train("D").unwrap();
        assert_eq!(delayed.position, 20.0);
        assert_eq!(delayed.status, TrainStatus::Delayed);
    }

    #[test]
    fn test_tick_on_empty_registry() {
        let (mut clock, mut registry, mut metrics) = setup(Vec::new());
        TickEngine::new().tick(&mut clock, &mut registry, &mut metrics);
        assert_eq!(clock.tick(), 1);
        assert_eq!(metrics.average_delay, 0);
    }
}
