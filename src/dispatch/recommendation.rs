//! Arbitration recommendations
//!
//! This module contains the Recommendation value, the generator that derives
//! one from the current trains, and the RecommendationDesk that enforces the
//! single-pending lifecycle (request, then accept or reject).

use crate::dispatch::conflict::ConflictDetector;
use crate::network::{Train, TrainRegistry};
use crate::simulation::{SimulationError, SimulationResult};
use crate::types::config::policy;
use crate::types::{RecommendationId, RecommendationKind, TrainId};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, instrument};

/// An arbitration decision awaiting the operator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Unique identifier of this recommendation
    pub id: RecommendationId,
    /// Branch that produced the recommendation
    pub kind: RecommendationKind,
    /// Trains granted right-of-way
    pub proceed: Vec<TrainId>,
    /// Trains ordered to stop
    pub halt: Vec<TrainId>,
    /// Human-readable rationale
    pub reason: String,
    /// Estimated minutes of network delay avoided
    pub projected_delay_saved: u32,
    /// Confidence in (0, 1]
    pub confidence: f64,
    /// Simulation tick at which the recommendation was generated
    pub generated_at_tick: u64,
}

impl Recommendation {
    /// Confidence as a whole percentage
    pub fn confidence_percent(&self) -> u32 {
        (self.confidence * 100.0).round() as u32
    }

    /// Whether the recommendation resolves an actual junction conflict
    pub fn is_conflict_resolution(&self) -> bool {
        self.kind == RecommendationKind::Conflict
    }

    /// Apply the decision to the registry
    ///
    /// Halted trains stop with zero speed; proceeding trains resume with boosted
    /// speed. Ids that are no longer registered are skipped.
    pub fn apply_to(&self, registry: &mut TrainRegistry) -> AppliedRecommendation {
        let mut applied = AppliedRecommendation::default();

        for id in &self.halt {
            if registry.upsert_by_id(id.as_str(), Train::halted) {
                applied.halted += 1;
            } else {
                applied.skipped += 1;
            }
        }

        for id in &self.proceed {
            if registry.upsert_by_id(id.as_str(), |t| t.proceeding(policy::PROCEED_SPEED_FACTOR)) {
                applied.proceeded += 1;
            } else {
                applied.skipped += 1;
            }
        }

        applied
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({}% confidence)", self.kind, self.confidence_percent())?;
        if !self.proceed.is_empty() {
            writeln!(f, "  Proceed: {}", join_ids(&self.proceed))?;
        }
        if !self.halt.is_empty() {
            writeln!(f, "  Halt: {}", join_ids(&self.halt))?;
        }
        writeln!(f, "  Projected Time Saved: {} minutes", self.projected_delay_saved)?;
        write!(f, "  Why: {}", self.reason)
    }
}

fn join_ids(ids: &[TrainId]) -> String {
    ids.iter().map(TrainId::as_str).collect::<Vec<_>>().join(", ")
}

/// Counts of what an accepted recommendation changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppliedRecommendation {
    /// Trains that were halted
    pub halted: usize,
    /// Trains that were granted right-of-way
    pub proceeded: usize,
    /// Ids that matched no registered train
    pub skipped: usize,
}

/// Derives recommendations from train state
#[derive(Debug, Clone, Default)]
pub struct RecommendationGenerator {
    detector: ConflictDetector,
}

impl RecommendationGenerator {
    /// Create a generator using the given conflict detector
    pub fn new(detector: ConflictDetector) -> Self {
        Self { detector }
    }

    /// The detector used to find contention
    pub fn detector(&self) -> &ConflictDetector {
        &self.detector
    }

    /// Produce a recommendation for the current trains
    ///
    /// With two or more contenders the highest priority train proceeds (ties
    /// go to the lowest id) and the rest halt. Otherwise one random train gets
    /// a proceed or halt advisory.
    #[instrument(skip(self, trains, rng), fields(train_count = trains.len()))]
    pub fn generate<R>(&self, trains: &[Train], tick: u64, rng: &mut R) -> SimulationResult<Recommendation>
    where
        R: Rng + ?Sized,
    {
        if trains.is_empty() {
            return Err(SimulationError::EmptyRegistry);
        }

        let contenders = self.detector.detect(trains);
        let recommendation = match Self::junction_winner(&contenders) {
            Some(winner) => Self::resolve_conflict(winner, &contenders, tick, rng),
            None => Self::advise(trains, tick, rng),
        };

        debug!(
            "Generated {} {}: proceed=[{}] halt=[{}]",
            recommendation.kind,
            recommendation.id,
            join_ids(&recommendation.proceed),
            join_ids(&recommendation.halt)
        );
        Ok(recommendation)
    }

    /// Highest priority contender, ties to the lowest id; `None` without a conflict
    fn junction_winner(contenders: &[Train]) -> Option<&Train> {
        if contenders.len() <= 1 {
            return None;
        }
        contenders
            .iter()
            .max_by(|a, b| a.priority.cmp(&b.priority).then_with(|| b.id.cmp(&a.id)))
    }

    fn resolve_conflict<R>(winner: &Train, contenders: &[Train], tick: u64, rng: &mut R) -> Recommendation
    where
        R: Rng + ?Sized,
    {
        let halt = contenders
            .iter()
            .filter(|t| t.id != winner.id)
            .map(|t| t.id.clone())
            .collect();
        let projected_delay_saved = rng.gen_range(policy::CONFLICT_DELAY_SAVED_MINUTES);

        Recommendation {
            id: RecommendationId::from_rng(rng),
            kind: RecommendationKind::Conflict,
            proceed: vec![winner.id.clone()],
            halt,
            reason: format!(
                "Prioritizing {} (Priority: {}) to minimize junction congestion and reduce total network delay.",
                winner.name, winner.priority
            ),
            projected_delay_saved,
            confidence: policy::CONFLICT_CONFIDENCE,
            generated_at_tick: tick,
        }
    }

    fn advise<R>(trains: &[Train], tick: u64, rng: &mut R) -> Recommendation
    where
        R: Rng + ?Sized,
    {
        let chosen = &trains[rng.gen_range(0..trains.len())];
        let (proceed, halt) = if rng.gen_bool(policy::ADVISORY_PROCEED_PROBABILITY) {
            (vec![chosen.id.clone()], Vec::new())
        } else {
            (Vec::new(), vec![chosen.id.clone()])
        };
        let projected_delay_saved = rng.gen_range(policy::ADVISORY_DELAY_SAVED_MINUTES);

        Recommendation {
            id: RecommendationId::from_rng(rng),
            kind: RecommendationKind::Advisory,
            proceed,
            halt,
            reason: format!(
                "Current traffic flow is optimal. Suggested minor adjustment to {} to maintain efficiency.",
                chosen.name
            ),
            projected_delay_saved,
            confidence: policy::ADVISORY_CONFIDENCE,
            generated_at_tick: tick,
        }
    }
}

/// Holds at most one pending recommendation
#[derive(Debug, Clone, Default)]
pub struct RecommendationDesk {
    generator: RecommendationGenerator,
    pending: Option<Recommendation>,
}

impl RecommendationDesk {
    /// Create a desk around a generator
    pub fn new(generator: RecommendationGenerator) -> Self {
        Self { generator, pending: None }
    }

    /// The recommendation awaiting a decision, if any
    pub fn pending(&self) -> Option<&Recommendation> {
        self.pending.as_ref()
    }

    /// The generator used by this desk
    pub fn generator(&self) -> &RecommendationGenerator {
        &self.generator
    }

    /// Generate a new recommendation unless one is already pending
    pub fn request<R>(&mut self, trains: &[Train], tick: u64, rng: &mut R) -> SimulationResult<&Recommendation>
    where
        R: Rng + ?Sized,
    {
        if let Some(existing) = &self.pending {
            return Err(SimulationError::recommendation_pending(existing.id));
        }

        let recommendation = self.generator.generate(trains, tick, rng)?;
        info!(
            recommendation_id = %recommendation.id,
            kind = %recommendation.kind,
            "Recommendation ready for operator"
        );
        Ok(&*self.pending.insert(recommendation))
    }

    /// Remove the pending recommendation so it can be applied
    pub fn take_for_acceptance(&mut self) -> SimulationResult<Recommendation> {
        self.pending.take().ok_or(SimulationError::NoPendingRecommendation)
    }

    /// Discard the pending recommendation
    pub fn reject(&mut self) -> SimulationResult<Recommendation> {
        let rejected = self.pending.take().ok_or(SimulationError::NoPendingRecommendation)?;
        info!(recommendation_id = %rejected.id, "Recommendation rejected");
        Ok(rejected)
    }
}
