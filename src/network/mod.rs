//! Trains and the train registry
//!
//! This module models the rolling stock on the shared tracks.
//!
//! # Overview
//!
//! - **Train**: identity, kinematics and priority of one train, with pure
//!   state transitions (`advanced`, `halted`, `proceeding`, `disrupted`)
//! - **TrainRegistry**: the authoritative, ordered store of trains with
//!   snapshot reads and per-id mutation
//! - **Roster**: the default four-train scenario
//!
//! # Usage Example
//!
//! ```rust
//! use railoptic::network::*;
//!
//! let mut registry = TrainRegistry::new(default_roster()).unwrap();
//! registry.upsert_by_id("F205", |train| train.disrupted(5));
//!
//! assert_eq!(registry.get_train("F205").unwrap().delay, 10);
//! ```

pub mod registry;
pub mod roster;
pub mod train;

// Re-export all public types for convenience
pub use registry::TrainRegistry;
pub use roster::default_roster;
pub use train::Train;
