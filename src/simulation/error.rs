//! Error types and handling
//!
//! This module contains error types for the simulation. Operator-facing
//! failures (bad disruption input, unknown trains, recommendation lifecycle
//! misuse) are recoverable: the controller logs them and leaves state
//! untouched. Roster and configuration failures abort start-up.

use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur during simulation
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Disruption request with an empty train id or non-positive delay
    #[error("Invalid disruption: {0}")]
    InvalidDisruption(String),

    /// Operation referenced a train that is not registered
    #[error("Unknown train: {0}")]
    UnknownTrain(String),

    /// A recommendation was requested while another is awaiting a decision
    #[error("Recommendation {0} is still pending")]
    RecommendationPending(String),

    /// Accept or reject was issued with nothing pending
    #[error("No recommendation is pending")]
    NoPendingRecommendation,

    /// Recommendation requested against an empty registry
    #[error("Train registry is empty")]
    EmptyRegistry,

    /// Roster failed validation at construction time
    #[error("Invalid train roster: {0}")]
    InvalidRoster(String),

    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ConfigurationError(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl From<anyhow::Error> for SimulationError {
    fn from(error: anyhow::Error) -> Self {
        SimulationError::ConfigurationError(error.to_string())
    }
}

impl SimulationError {
    /// Create an invalid disruption error
    pub fn invalid_disruption(msg: impl Into<String>) -> Self {
        Self::InvalidDisruption(msg.into())
    }

    /// Create an unknown train error
    pub fn unknown_train(id: impl Into<String>) -> Self {
        Self::UnknownTrain(id.into())
    }

    /// Create a recommendation pending error
    pub fn recommendation_pending(id: impl ToString) -> Self {
        Self::RecommendationPending(id.to_string())
    }

    /// Create an invalid roster error
    pub fn invalid_roster(msg: impl Into<String>) -> Self {
        Self::InvalidRoster(msg.into())
    }

    /// Create a configuration error
    pub fn configuration_error(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Check if this error leaves the simulation in a usable state
    pub fn is_recoverable(&self) -> bool {
        match self {
            SimulationError::InvalidDisruption(_) => true,
            SimulationError::UnknownTrain(_) => true,
            SimulationError::RecommendationPending(_) => true,
            SimulationError::NoPendingRecommendation => true,
            SimulationError::EmptyRegistry => true,
            SimulationError::InvalidRoster(_) => false,
            SimulationError::ConfigurationError(_) => false,
            SimulationError::IoError(_) => false,
            SimulationError::SerializationError(_) => false,
        }
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            SimulationError::InvalidDisruption(_) => "Invalid Input",
            SimulationError::UnknownTrain(_) => "Referential",
            SimulationError::RecommendationPending(_) => "Precondition",
            SimulationError::NoPendingRecommendation => "Precondition",
            SimulationError::EmptyRegistry => "Precondition",
            SimulationError::InvalidRoster(_) => "Roster",
            SimulationError::ConfigurationError(_) => "Configuration",
            SimulationError::IoError(_) => "IO",
            SimulationError::SerializationError(_) => "Serialization",
        }
    }

    /// Log an error that is being absorbed as a no-op
    pub fn log_ignored(&self, operation: &str) {
        if self.is_recoverable() {
            debug!(operation, category = self.category(), "Ignoring operator request: {}", self);
        } else {
            warn!(operation, category = self.category(), "Unexpected failure ignored: {}", self);
        }
    }
}

/// Result type for simulation operations
pub type SimulationResult<T> = Result<T, SimulationError>;
