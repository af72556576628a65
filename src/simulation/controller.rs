//! Simulation controller
//!
//! This module contains the SimulationController, the single owner of all
//! mutable simulation state and the boundary a driver or presentation layer
//! talks to. Boundary operations never fail: rejected input and unmet
//! preconditions are logged and reported as `false` / `None`.

use crate::dispatch::{
    AppliedRecommendation, Disruption, DisruptionInjector, Recommendation, RecommendationDesk,
};
use crate::network::{Train, TrainRegistry};
use crate::simulation::{
    Metrics, SimulationClock, SimulationError, SimulationResult, StateSnapshot, TickEngine,
    TickScheduler,
};
use crate::types::SimulationConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Owns the registry, clock, metrics and pending recommendation
#[derive(Debug)]
pub struct SimulationController {
    /// Configuration for the simulation
    config: SimulationConfig,
    /// Tick counter
    clock: SimulationClock,
    /// Wall-clock pacing, running only between start and stop
    scheduler: TickScheduler,
    /// Authoritative train store
    registry: TrainRegistry,
    /// Derived network metrics
    metrics: Metrics,
    tick_engine: TickEngine,
    desk: RecommendationDesk,
    injector: DisruptionInjector,
    /// Random number generator with optional seed
    rng: StdRng,
}

impl SimulationController {
    /// Create a controller from a configuration
    ///
    /// Fails only if the configuration or its roster is invalid.
    #[instrument(skip(config), fields(train_count = config.trains.len(), seed = ?config.seed))]
    pub fn new(config: SimulationConfig) -> SimulationResult<Self> {
        config
            .validate()
            .map_err(|e| SimulationError::configuration_error(e.to_string()))?;

        let rng: StdRng = if let Some(seed) = config.seed {
            info!("Using deterministic seed: {}", seed);
            StdRng::seed_from_u64(seed)
        } else {
            debug!("Using entropy-based random seed");
            StdRng::from_entropy()
        };

        let registry = TrainRegistry::new(config.trains.clone())?;
        let metrics = Metrics::from_trains(registry.trains());

        info!(
            "Simulation controller initialized with {} trains, tick interval {} ms",
            registry.len(),
            config.tick_interval_ms
        );

        Ok(Self {
            clock: SimulationClock::new(config.tick_interval()),
            scheduler: TickScheduler::new(config.tick_interval()),
            registry,
            metrics,
            tick_engine: TickEngine::new(),
            desk: RecommendationDesk::default(),
            injector: DisruptionInjector::new(),
            rng,
            config,
        })
    }

    /// Create a controller with default settings and the given roster
    pub fn with_roster(trains: Vec<Train>) -> SimulationResult<Self> {
        Self::new(SimulationConfig { trains, ..Default::default() })
    }

    /// Replace the random number generator
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// The configuration this controller was built from
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Current tick
    pub fn current_tick(&self) -> u64 {
        self.clock.tick()
    }

    /// Start the tick scheduler now
    pub fn start_simulation(&mut self) -> bool {
        self.start_at(Instant::now())
    }

    /// Start the tick scheduler as of `now`; false if already running
    pub fn start_at(&mut self, now: Instant) -> bool {
        self.scheduler.start(now)
    }

    /// Stop the tick scheduler; false if already stopped
    pub fn stop_simulation(&mut self) -> bool {
        self.scheduler.stop()
    }

    /// Whether the tick scheduler is running
    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    /// When the scheduler wants the next tick
    pub fn next_tick_due(&self) -> Option<Instant> {
        self.scheduler.next_due()
    }

    /// Run every tick the scheduler reports as due at `now`
    ///
    /// Returns the number of ticks run; zero while stopped.
    pub fn advance(&mut self, now: Instant) -> u64 {
        self.advance_at_most(now, u64::MAX)
    }

    /// Like [`advance`](Self::advance), but run no more than `limit` ticks
    ///
    /// Due ticks beyond the limit are consumed without running.
    pub fn advance_at_most(&mut self, now: Instant, limit: u64) -> u64 {
        let due = self.scheduler.due_ticks(now).min(limit);
        for _ in 0..due {
            self.tick();
        }
        due
    }

    /// Run exactly one tick, independent of the scheduler
    pub fn tick(&mut self) -> u64 {
        self.tick_engine
            .tick(&mut self.clock, &mut self.registry, &mut self.metrics)
    }

    /// Owned snapshot of the current state
    pub fn get_state(&self) -> StateSnapshot {
        StateSnapshot {
            tick: self.clock.tick(),
            elapsed: self.clock.format_elapsed(),
            trains: self.registry.get(),
            metrics: self.metrics,
            pending_recommendation: self.desk.pending().cloned(),
            running: self.scheduler.is_running(),
        }
    }

    /// Borrow the trains without copying
    pub fn trains(&self) -> &[Train] {
        self.registry.trains()
    }

    /// Current metrics
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// The recommendation awaiting a decision
    pub fn pending_recommendation(&self) -> Option<&Recommendation> {
        self.desk.pending()
    }

    /// Generate a recommendation from the current trains
    ///
    /// No-op (returns `None`) while one is pending or when there are no trains.
    pub fn request_recommendation(&mut self) -> Option<&Recommendation> {
        let tick = self.clock.tick();
        match self.desk.request(self.registry.trains(), tick, &mut self.rng) {
            Ok(recommendation) => Some(recommendation),
            Err(error) => {
                error.log_ignored("request_recommendation");
                None
            }
        }
    }

    /// Apply the pending recommendation and count it as an averted conflict
    #[instrument(skip(self))]
    pub fn accept_recommendation(&mut self) -> Option<AppliedRecommendation> {
        let recommendation = match self.desk.take_for_acceptance() {
            Ok(recommendation) => recommendation,
            Err(error) => {
                error.log_ignored("accept_recommendation");
                return None;
            }
        };

        let applied = recommendation.apply_to(&mut self.registry);
        self.metrics.record_conflict_averted();
        self.metrics.recompute(self.registry.trains());

        info!(
            recommendation_id = %recommendation.id,
            halted = applied.halted,
            proceeded = applied.proceeded,
            skipped = applied.skipped,
            conflicts_averted = self.metrics.conflicts_averted,
            "Recommendation accepted"
        );
        Some(applied)
    }

    /// Discard the pending recommendation without touching any train
    pub fn reject_recommendation(&mut self) -> Option<Recommendation> {
        match self.desk.reject() {
            Ok(recommendation) => Some(recommendation),
            Err(error) => {
                error.log_ignored("reject_recommendation");
                None
            }
        }
    }

    /// Add `minutes` of delay to a train and mark it delayed
    ///
    /// Empty ids, non-positive minutes and unknown trains change nothing.
    pub fn inject_disruption(&mut self, train_id: &str, minutes: i64) -> bool {
        match Disruption::try_new(train_id, minutes) {
            Ok(disruption) => self.apply_disruption(&disruption),
            Err(error) => {
                error.log_ignored("inject_disruption");
                false
            }
        }
    }

    /// Apply an already parsed disruption
    pub fn apply_disruption(&mut self, disruption: &Disruption) -> bool {
        match self.injector.inject(&mut self.registry, disruption) {
            Ok(()) => true,
            Err(error) => {
                error.log_ignored("inject_disruption");
                false
            }
        }
    }

    /// Apply every disruption listed in the configuration
    ///
    /// Returns how many had an effect.
    pub fn apply_configured_disruptions(&mut self) -> usize {
        let disruptions = self.config.disruptions.clone();
        disruptions.iter().filter(|d| self.apply_disruption(d)).count()
    }
}
