//! Simulation control
//!
//! This module contains the simulation controller, the tick engine, clock and
//! scheduling, metrics, state snapshots, logging setup and error handling.
//!
//! # Overview
//!
//! - **SimulationController**: owns all mutable state and exposes the boundary operations
//! - **TickEngine**: advances the clock and every moving train by one tick
//! - **SimulationClock / TickScheduler**: tick counter and wall-clock pacing
//! - **Metrics**: throughput, average delay, efficiency and averted conflicts
//! - **StateSnapshot**: owned, serializable view for consumers
//! - **SimulationError**: typed errors behind the never-failing boundary
//!
//! # Usage Example
//!
//! ```rust
//! use railoptic::simulation::*;
//! use railoptic::types::*;
//!
//! let config = SimulationConfig { seed: Some(7), ..Default::default() };
//! let mut controller = SimulationController::new(config).unwrap();
//!
//! controller.tick();
//! controller.inject_disruption("F205", 5);
//!
//! let state = controller.get_state();
//! assert_eq!(state.tick, 1);
//! assert_eq!(state.train("F205").unwrap().delay, 10);
//! ```

pub mod clock;
pub mod controller;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod snapshot;
pub mod tick_engine;

// Re-export all public types for convenience
pub use clock::*;
pub use controller::*;
pub use error::*;
pub use logging::*;
pub use metrics::*;
pub use snapshot::*;
pub use tick_engine::*;
