//! Read-only view of the simulation for consumers
//!
//! A snapshot is an owned copy; mutating it has no effect on the controller.

use crate::dispatch::Recommendation;
use crate::network::Train;
use crate::simulation::{Metrics, SimulationResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Everything a presentation layer needs to render one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Current tick
    pub tick: u64,
    /// Simulated elapsed time as `MM:SS`
    pub elapsed: String,
    /// Trains in registry order
    pub trains: Vec<Train>,
    /// Network metrics as of the last recompute
    pub metrics: Metrics,
    /// Recommendation awaiting a decision
    pub pending_recommendation: Option<Recommendation>,
    /// Whether the tick scheduler is running
    pub running: bool,
}

impl StateSnapshot {
    /// Look up a train by id
    pub fn train(&self, id: &str) -> Option<&Train> {
        self.trains.iter().find(|t| t.id.as_str() == id)
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> SimulationResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for StateSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.running { "RUNNING" } else { "STOPPED" };
        writeln!(f, "=== RailOptic [{}] tick {} ({}) ===", state, self.tick, self.elapsed)?;
        writeln!(f)?;

        writeln!(f, "Trains:")?;
        for train in &self.trains {
            writeln!(
                f,
                "  {:<6} {:<18} {:<9} {:<8} P{:<2} {:>3}% -> {:>3}  delay {:>3} min  {}",
                train.id.as_str(),
                train.name,
                train.kind.to_string(),
                train.status.to_string(),
                train.priority,
                train.progress_percent(),
                train.target_position.round() as u32,
                train.delay,
                train.track,
            )?;
        }
        writeln!(f)?;

        writeln!(f, "{}", self.metrics)?;

        match &self.pending_recommendation {
            Some(recommendation) => {
                writeln!(f)?;
                writeln!(f, "Pending Recommendation {}:", recommendation.id)?;
                write!(f, "{}", recommendation)
            }
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::default_roster;

    fn snapshot() -> StateSnapshot {
        let trains = default_roster();
        StateSnapshot {
            tick: 75,
            elapsed: "01:15".to_string(),
            metrics: Metrics::from_trains(&trains),
            trains,
            pending_recommendation: None,
            running: false,
        }
    }

    #[test]
    fn test_text_report() {
        let report = snapshot().to_string();
        assert!(report.contains("STOPPED"));
        assert!(report.contains("tick 75 (01:15)"));
        assert!(report.contains("Rajdhani Express"));
        assert!(report.contains("Efficiency: 93%"));
        assert!(!report.contains("Pending Recommendation"));
    }

    #[test]
    fn test_json_snapshot() {
        let json = snapshot().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["tick"], 75);
        assert_eq!(value["trains"][1]["id"], "F205");
        assert_eq!(value["trains"][1]["status"], "moving");
        assert_eq!(value["metrics"]["efficiency_score"], 93);
        assert!(value["pending_recommendation"].is_null());
    }

    #[test]
    fn test_train_lookup() {
        let snapshot = snapshot();
        assert_eq!(snapshot.train("E404").unwrap().name, "Express Mail");
        assert!(snapshot.train("X999").is_none());
    }
}
