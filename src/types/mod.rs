//! Core types and identifiers for the rail traffic simulator
//!
//! This module contains fundamental types, identifiers, and configuration structures
//! used throughout the simulation system.
//!
//! # Overview
//!
//! The types module provides the foundational data types for the simulation:
//!
//! - **Identifiers**: train, track and recommendation identifiers
//! - **Enums**: Type-safe enumerations for train status, service kind, operator policy, etc.
//! - **Configuration**: Simulation configuration with validation, CLI support and
//!   the fixed arbitration `policy` constants
//!
//! # Usage Example
//!
//! ```rust
//! use railoptic::types::*;
//!
//! // Identifiers
//! let train_id = TrainId::from("R101");
//! let track = TrackId(1);
//! let recommendation_id = RecommendationId::new();
//!
//! // Use enums for type safety
//! let status = TrainStatus::Moving;
//! let policy = OperatorPolicy::Accept;
//!
//! // Configure simulation
//! let config = SimulationConfig {
//!     ticks: 30,
//!     seed: Some(42),
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

pub mod config;
pub mod enums;
pub mod identifiers;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
pub use identifiers::*;
