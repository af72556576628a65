//! Train registry
//!
//! This module contains the TrainRegistry, the single owned store of train
//! state. Reads are snapshots; writes replace one train by a pure function of
//! itself and leave every other train untouched.

use crate::network::train::Train;
use crate::simulation::{SimulationError, SimulationResult};
use crate::types::{TrackId, TrainId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Ordered collection of trains with id lookup
///
/// Serializes as the plain train list; deserializing goes through
/// [`TrainRegistry::new`], so the index is rebuilt and invalid rosters are
/// rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Train>", into = "Vec<Train>")]
pub struct TrainRegistry {
    /// Trains in roster order
    trains: Vec<Train>,
    /// Quick lookup map from train ID to index
    index: HashMap<TrainId, usize>,
}

impl TrainRegistry {
    /// Build a registry from a roster, rejecting invalid or duplicate trains
    pub fn new(trains: Vec<Train>) -> SimulationResult<Self> {
        let mut index = HashMap::with_capacity(trains.len());

        for (idx, train) in trains.iter().enumerate() {
            train
                .validate()
                .map_err(|e| SimulationError::invalid_roster(format!("train {}: {}", train.id, e)))?;

            if index.insert(train.id.clone(), idx).is_some() {
                return Err(SimulationError::invalid_roster(format!(
                    "duplicate train id {}",
                    train.id
                )));
            }
        }

        debug!("Registered {} trains", trains.len());
        Ok(Self { trains, index })
    }

    /// Snapshot of all trains in roster order
    pub fn get(&self) -> Vec<Train> {
        self.trains.clone()
    }

    /// Borrowed view of all trains in roster order
    pub fn trains(&self) -> &[Train] {
        &self.trains
    }

    /// Get a train by ID
    pub fn get_train(&self, id: &str) -> Option<&Train> {
        self.index.get(id).and_then(|&idx| self.trains.get(idx))
    }

    /// Whether a train with this ID is registered
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Number of registered trains
    pub fn len(&self) -> usize {
        self.trains.len()
    }

    /// Whether the registry holds no trains
    pub fn is_empty(&self) -> bool {
        self.trains.is_empty()
    }

    /// Trains running on a given track
    pub fn on_track(&self, track: TrackId) -> impl Iterator<Item = &Train> {
        self.trains.iter().filter(move |t| t.track == track)
    }

    /// Replace the train with `id` by `mutation(train)`
    ///
    /// Returns `false` (and changes nothing) when no train matches.
    pub fn upsert_by_id<F>(&mut self, id: &str, mutation: F) -> bool
    where
        F: FnOnce(Train) -> Train,
    {
        let Some(&idx) = self.index.get(id) else {
            trace!(train_id = id, "Upsert skipped, train not registered");
            return false;
        };

        let updated = mutation(self.trains[idx].clone());
        debug_assert_eq!(updated.id.as_str(), id, "mutation must preserve train id");
        debug_assert_eq!(updated.track, self.trains[idx].track, "mutation must preserve track");
        self.trains[idx] = updated;
        true
    }

    /// Replace every train by `mutation(train)`
    pub fn upsert_all<F>(&mut self, mut mutation: F)
    where
        F: FnMut(Train) -> Train,
    {
        for slot in self.trains.iter_mut() {
            let updated = mutation(slot.clone());
            *slot = updated;
        }
    }
}

impl TryFrom<Vec<Train>> for TrainRegistry {
    type Error = SimulationError;

    fn try_from(trains: Vec<Train>) -> SimulationResult<Self> {
        Self::new(trains)
    }
}

impl From<TrainRegistry> for Vec<Train> {
    fn from(registry: TrainRegistry) -> Self {
        registry.trains
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TrainStatus;

    fn sample_registry() -> TrainRegistry {
        TrainRegistry::new(vec![
            Train::new("A", "Alpha", 1, 9).with_positions(72.0, 90.0),
            Train::new("B", "Bravo", 1, 5).with_positions(78.0, 95.0),
            Train::new("C", "Charlie", 2, 3).with_positions(30.0, 85.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_registry_preserves_order() {
        let registry = sample_registry();
        let ids: Vec<_> = registry.get().into_iter().map(|t| t.id.to_string()).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
        assert_eq!(registry.len(), 3);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_registry_rejects_duplicates() {
        let result = TrainRegistry::new(vec![
            Train::new("A", "Alpha", 1, 9),
            Train::new("A", "Alpha Again", 2, 4),
        ]);
        assert!(matches!(result, Err(SimulationError::InvalidRoster(_))));
    }

    #[test]
    fn test_registry_rejects_invalid_train() {
        let result = TrainRegistry::new(vec![Train::new("A", "Alpha", 1, 42)]);
        assert!(matches!(result, Err(SimulationError::InvalidRoster(_))));
    }

    #[test]
    fn test_upsert_by_id_touches_only_target() {
        let mut registry = sample_registry();
        let before = registry.get();

        assert!(registry.upsert_by_id("B", |t| t.halted()));

        let after = registry.get();
        assert_eq!(after[0], before[0]);
        assert_eq!(after[2], before[2]);
        assert_eq!(after[1].status, TrainStatus::Halted);
    }

    #[test]
    fn test_upsert_unknown_id_is_noop() {
        let mut registry = sample_registry();
        let before = registry.clone();

        assert!(!registry.upsert_by_id("X999", |t| t.disrupted(5)));
        assert_eq!(registry, before);
    }

    #[test]
    fn test_lookup_and_track_filter() {
        let registry = sample_registry();
        assert_eq!(registry.get_train("C").map(|t| t.priority), Some(3));
        assert!(registry.get_train("Z").is_none());
        assert!(registry.contains("A"));
        assert_eq!(registry.on_track(TrackId(1)).count(), 2);
    }

    #[test]
    fn test_deserialized_registry_is_indexed() {
        let registry = sample_registry();
        let json = serde_json::to_string(&registry).unwrap();
        let mut restored: TrainRegistry = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, registry);
        assert_eq!(restored.get_train("A").map(|t| t.priority), Some(9));

        assert!(restored.upsert_by_id("B", |t| t.halted()));
        assert_eq!(restored.get_train("B").map(|t| t.speed), Some(0.0));
    }

    #[test]
    fn test_deserialize_rejects_invalid_roster() {
        let mut trains = sample_registry().get();
        trains.push(trains[0].clone());
        let json = serde_json::to_string(&trains).unwrap();
        assert!(serde_json::from_str::<TrainRegistry>(&json).is_err());

        let out_of_range = vec![Train::new("Z", "Zulu", 1, 11)];
        let json = serde_json::to_string(&out_of_range).unwrap();
        assert!(serde_json::from_str::<TrainRegistry>(&json).is_err());
    }
}
