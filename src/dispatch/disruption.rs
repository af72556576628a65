//! Disruption injection
//!
//! A disruption adds delay minutes to one train and marks it delayed. Input is
//! validated before the registry is touched.

use crate::network::{Train, TrainRegistry};
use crate::simulation::{SimulationError, SimulationResult};
use crate::types::TrainId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::info;

/// An exogenous delay event for a named train
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disruption {
    /// Target train
    pub train_id: TrainId,
    /// Extra delay in minutes (must be positive)
    pub minutes: u32,
}

impl Disruption {
    /// Build a disruption from raw operator input
    ///
    /// Rejects an empty train id and non-positive (or out of range) minutes.
    /// The id is kept verbatim and must match a registered train exactly.
    pub fn try_new(train_id: &str, minutes: i64) -> SimulationResult<Self> {
        let disruption = Self {
            train_id: TrainId::new(train_id),
            minutes: u32::try_from(minutes).map_err(|_| {
                SimulationError::invalid_disruption(format!("delay of {} minutes is out of range", minutes))
            })?,
        };
        disruption.validate()?;
        Ok(disruption)
    }

    /// Validate the disruption fields
    pub fn validate(&self) -> SimulationResult<()> {
        if self.train_id.is_empty() {
            return Err(SimulationError::invalid_disruption("train id must not be empty"));
        }
        if self.minutes == 0 {
            return Err(SimulationError::invalid_disruption(format!(
                "delay for {} must be greater than 0 minutes",
                self.train_id
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Disruption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.train_id, self.minutes)
    }
}

/// Parses `TRAIN_ID:MINUTES`, e.g. `F205:5`
impl FromStr for Disruption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (train_id, minutes) = s
            .rsplit_once(':')
            .ok_or_else(|| format!("Expected TRAIN_ID:MINUTES, got '{}'", s))?;
        let minutes: i64 = minutes
            .trim()
            .parse()
            .map_err(|e| format!("Invalid minutes in '{}': {}", s, e))?;
        Disruption::try_new(train_id.trim(), minutes).map_err(|e| e.to_string())
    }
}

/// Applies disruptions to the registry
#[derive(Debug, Clone, Copy, Default)]
pub struct DisruptionInjector;

impl DisruptionInjector {
    /// Create a new injector
    pub fn new() -> Self {
        Self
    }

    /// Apply a disruption; unknown trains leave the registry unchanged
    pub fn inject(&self, registry: &mut TrainRegistry, disruption: &Disruption) -> SimulationResult<()> {
        disruption.validate()?;

        let minutes = disruption.minutes;
        if !registry.upsert_by_id(disruption.train_id.as_str(), |t: Train| t.disrupted(minutes)) {
            return Err(SimulationError::unknown_train(disruption.train_id.as_str()));
        }

        info!(train_id = %disruption.train_id, minutes, "Disruption injected");
        Ok(())
    }
}
