//! Junction arbitration and operator interventions
//!
//! This module contains everything the operator triggers on demand:
//!
//! - **ConflictDetector**: finds trains contending for the monitored junction
//! - **RecommendationGenerator**: turns contention (or its absence) into an
//!   accept/halt recommendation
//! - **RecommendationDesk**: keeps at most one recommendation pending
//! - **DisruptionInjector**: applies exogenous delay events
//!
//! # Usage Example
//!
//! ```rust
//! use railoptic::dispatch::*;
//! use railoptic::network::Train;
//! use rand::SeedableRng;
//!
//! let trains = vec![
//!     Train::new("A", "Alpha", 1, 9).with_positions(72.0, 95.0),
//!     Train::new("B", "Bravo", 1, 5).with_positions(78.0, 95.0),
//! ];
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let recommendation = RecommendationGenerator::default()
//!     .generate(&trains, 0, &mut rng)
//!     .unwrap();
//!
//! assert_eq!(recommendation.proceed[0].as_str(), "A");
//! assert_eq!(recommendation.halt[0].as_str(), "B");
//! ```

pub mod conflict;
pub mod disruption;
pub mod recommendation;

// Re-export all public types for convenience
pub use conflict::*;
pub use disruption::*;
pub use recommendation::*;
