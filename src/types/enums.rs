//! Enumeration types for the rail traffic simulator
//!
//! This module contains the enumerations used throughout the simulation:
//! train status and service kind, recommendation kind, operator policy and
//! report output format.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Operational status of a train
///
/// Transitions are driven by recommendation acceptance and disruption
/// injection only; the tick engine never changes status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TrainStatus {
    /// Advancing toward its target on every tick
    #[default]
    Moving,
    /// Stopped by an accepted recommendation
    Halted,
    /// Held back by an injected disruption
    Delayed,
}

impl TrainStatus {
    /// Whether the tick engine advances a train in this status
    pub fn is_moving(self) -> bool {
        matches!(self, TrainStatus::Moving)
    }
}

impl fmt::Display for TrainStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrainStatus::Moving => write!(f, "moving"),
            TrainStatus::Halted => write!(f, "halted"),
            TrainStatus::Delayed => write!(f, "delayed"),
        }
    }
}

impl FromStr for TrainStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "moving" => Ok(TrainStatus::Moving),
            "halted" => Ok(TrainStatus::Halted),
            "delayed" => Ok(TrainStatus::Delayed),
            _ => Err(format!("Unknown train status: {}", s)),
        }
    }
}

/// Service category of a train (descriptive, not used in arbitration)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TrainKind {
    /// Long-distance express service
    Express,
    /// Goods train
    Freight,
    /// Local passenger service
    #[default]
    Passenger,
}

impl fmt::Display for TrainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrainKind::Express => write!(f, "Express"),
            TrainKind::Freight => write!(f, "Freight"),
            TrainKind::Passenger => write!(f, "Passenger"),
        }
    }
}

impl FromStr for TrainKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "express" => Ok(TrainKind::Express),
            "freight" | "goods" => Ok(TrainKind::Freight),
            "passenger" | "local" => Ok(TrainKind::Passenger),
            _ => Err(format!("Unknown train kind: {}", s)),
        }
    }
}

/// Which arbitration branch produced a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    /// Two or more trains contend for the junction
    Conflict,
    /// No contention; a minor flow adjustment was suggested
    Advisory,
}

impl fmt::Display for RecommendationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecommendationKind::Conflict => write!(f, "Conflict Resolution"),
            RecommendationKind::Advisory => write!(f, "Flow Advisory"),
        }
    }
}

/// How the headless driver answers pending recommendations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OperatorPolicy {
    /// Accept every recommendation
    #[default]
    Accept,
    /// Reject every recommendation
    Reject,
    /// Leave recommendations pending
    Hold,
}

impl fmt::Display for OperatorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperatorPolicy::Accept => write!(f, "accept"),
            OperatorPolicy::Reject => write!(f, "reject"),
            OperatorPolicy::Hold => write!(f, "hold"),
        }
    }
}

impl FromStr for OperatorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "accept" => Ok(OperatorPolicy::Accept),
            "reject" => Ok(OperatorPolicy::Reject),
            "hold" | "none" => Ok(OperatorPolicy::Hold),
            _ => Err(format!("Unknown operator policy: {}", s)),
        }
    }
}

/// Output format for the final state report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable dashboard text
    #[default]
    Text,
    /// JSON snapshot for downstream consumers
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "TEXT"),
            OutputFormat::Json => write!(f, "JSON"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}
