//! Network metrics
//!
//! Throughput, average delay and efficiency are derived from the trains on
//! every recompute. Only `conflicts_averted` carries state between recomputes.

use crate::network::Train;
use crate::types::config::policy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Aggregate network performance figures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Metrics {
    /// Trains that have reached their target
    pub total_throughput: usize,
    /// Mean delay in whole minutes, rounded half away from zero
    pub average_delay: u32,
    /// `max(85, 100 - total delay)`
    pub efficiency_score: u32,
    /// Accepted recommendations so far
    pub conflicts_averted: u64,
}

impl Metrics {
    /// Derive metrics for a fresh simulation
    pub fn from_trains(trains: &[Train]) -> Self {
        let mut metrics = Self::default();
        metrics.recompute(trains);
        metrics
    }

    /// Recompute the derived figures, keeping the conflicts counter
    pub fn recompute(&mut self, trains: &[Train]) {
        let total_delay: u32 = trains.iter().fold(0u32, |acc, t| acc.saturating_add(t.delay));

        self.total_throughput = trains.iter().filter(|t| t.has_arrived()).count();
        self.average_delay = if trains.is_empty() {
            0
        } else {
            (f64::from(total_delay) / trains.len() as f64).round() as u32
        };
        self.efficiency_score = policy::EFFICIENCY_CEILING
            .saturating_sub(total_delay)
            .max(policy::EFFICIENCY_FLOOR);
    }

    /// Count one accepted recommendation
    pub fn record_conflict_averted(&mut self) {
        self.conflicts_averted += 1;
    }
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Network Metrics:")?;
        writeln!(f, "  Throughput: {} trains", self.total_throughput)?;
        writeln!(f, "  Average Delay: {} min", self.average_delay)?;
        writeln!(f, "  Efficiency: {}%", self.efficiency_score)?;
        write!(f, "  Conflicts Averted: {}", self.conflicts_averted)
    }
}
