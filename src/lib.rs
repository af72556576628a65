//! RailOptic
//!
//! A discrete-time rail traffic simulation and junction conflict arbitration engine.
//!
//! # Overview
//!
//! Trains advance along a small set of shared tracks one tick at a time. When
//! several trains converge on the monitored junction the engine produces a
//! prioritized proceed/halt recommendation; an operator accepts or rejects it.
//! Exogenous delays can be injected at any moment, and network metrics are
//! derived from the train state after every change.
//!
//! ## Key Features
//!
//! - **Deterministic Ticks**: correctness depends only on the tick count, never on wall time
//! - **Junction Arbitration**: highest priority proceeds, remaining contenders halt
//! - **Flow Advisories**: randomized advice when there is no conflict, from a seedable RNG
//! - **Disruption Injection**: typed, validated delay events
//! - **Configurable Runs**: JSON configuration files layered under CLI flags
//!
//! ## Quick Start
//!
//! ```rust
//! use railoptic::*;
//!
//! let config = SimulationConfig { seed: Some(42), ..Default::default() };
//! let mut controller = SimulationController::new(config)?;
//!
//! for _ in 0..10 {
//!     controller.tick();
//! }
//!
//! if controller.request_recommendation().is_some() {
//!     controller.accept_recommendation();
//! }
//!
//! let state = controller.get_state();
//! assert_eq!(state.metrics.conflicts_averted, 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: Core types, identifiers, configuration and policy constants
//! - [`network`]: Trains and the train registry
//! - [`dispatch`]: Conflict detection, recommendations and disruptions
//! - [`simulation`]: Controller, tick engine, clock, metrics and logging
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Types     │    │   Network   │    │  Dispatch   │
//! │             │    │             │    │             │
//! │ Identifiers │◄───┤ Train       │◄───┤ Conflict    │
//! │ Enums       │    │ Registry    │    │ Recommend.  │
//! │ Config      │    │ Roster      │    │ Disruption  │
//! └─────────────┘    └─────────────┘    └─────────────┘
//!                           ▲                   ▲
//!                           │                   │
//!                    ┌─────────────────────────────────┐
//!                    │           Simulation            │
//!                    │                                 │
//!                    │ Controller  TickEngine  Clock   │
//!                    │ Metrics     Snapshot    Logging │
//!                    └─────────────────────────────────┘
//! ```
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

// Module declarations
pub mod dispatch;
pub mod network;
pub mod simulation;
pub mod types;

// Core types and identifiers
pub use types::{
    ConfigValidationError,
    OperatorPolicy,
    OutputFormat,
    RecommendationId,
    RecommendationKind,
    // Configuration
    SimulationConfig,
    TrackId,
    // Identifiers
    TrainId,
    TrainKind,
    // Enums
    TrainStatus,
};

// Trains
pub use network::{default_roster, Train, TrainRegistry};

// Arbitration
pub use dispatch::{
    ConflictDetector, Disruption, DisruptionInjector, Recommendation, RecommendationDesk,
    RecommendationGenerator,
};

// Simulation types and functionality
pub use simulation::{
    LoggingConfig, Metrics, SimulationController, SimulationError, SimulationResult, StateSnapshot,
    TickEngine,
};
