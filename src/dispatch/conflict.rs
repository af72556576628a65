//! Junction conflict detection
//!
//! A train is in contention when it is on the monitored track and strictly
//! inside the junction approach zone. Fewer than two such trains is not a
//! conflict.

use crate::network::Train;
use crate::types::config::policy;
use crate::types::TrackId;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Approach zone in front of a junction, an open interval on the track axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JunctionZone {
    /// Track whose junction is monitored
    pub track: TrackId,
    /// Exclusive lower bound of the approach zone
    pub start: f64,
    /// Exclusive upper bound of the approach zone
    pub end: f64,
}

impl Default for JunctionZone {
    fn default() -> Self {
        Self {
            track: policy::MONITORED_TRACK,
            start: policy::JUNCTION_ZONE_START,
            end: policy::JUNCTION_ZONE_END,
        }
    }
}

impl JunctionZone {
    /// Whether the train is on this zone's track and strictly inside it
    pub fn contains(&self, train: &Train) -> bool {
        train.track == self.track && train.position > self.start && train.position < self.end
    }
}

/// Scans trains for contention at the monitored junction
#[derive(Debug, Clone, Default)]
pub struct ConflictDetector {
    zone: JunctionZone,
}

impl ConflictDetector {
    /// Create a detector for the standard junction zone
    pub fn new() -> Self {
        Self::default()
    }

    /// The zone this detector watches
    pub fn zone(&self) -> &JunctionZone {
        &self.zone
    }

    /// Trains inside the approach zone, regardless of how many there are
    pub fn approaching<'a>(&self, trains: &'a [Train]) -> Vec<&'a Train> {
        trains.iter().filter(|t| self.zone.contains(t)).collect()
    }

    /// The contention set: empty unless at least two trains share the zone
    #[instrument(skip(self, trains), fields(train_count = trains.len()))]
    pub fn detect(&self, trains: &[Train]) -> Vec<Train> {
        let approaching = self.approaching(trains);
        if approaching.len() <= 1 {
            return Vec::new();
        }

        debug!(
            "Junction conflict on {}: {}",
            self.zone.track,
            approaching.iter().map(|t| t.id.as_str()).collect::<Vec<_>>().join(", ")
        );
        approaching.into_iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn train(id: &str, track: u32, position: f64, priority: u8) -> Train {
        Train::new(id, id, track, priority).with_positions(position, 95.0)
    }

    #[test]
    fn test_two_trains_in_zone_conflict() {
        let trains = vec![train("A", 1, 72.0, 9), train("B", 1, 78.0, 5)];
        let detected = ConflictDetector::new().detect(&trains);
        let ids: Vec<_> = detected.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
    }

    #[test]
    fn test_single_train_is_not_a_conflict() {
        let trains = vec![train("A", 1, 72.0, 9), train("B", 1, 40.0, 5)];
        let detector = ConflictDetector::new();
        assert!(detector.detect(&trains).is_empty());
        assert_eq!(detector.approaching(&trains).len(), 1);
    }

    #[test]
    fn test_zone_bounds_are_exclusive() {
        let trains = vec![train("A", 1, 70.0, 9), train("B", 1, 85.0, 5)];
        assert!(ConflictDetector::new().detect(&trains).is_empty());

        let trains = vec![train("A", 1, 70.001, 9), train("B", 1, 84.999, 5)];
        assert_eq!(ConflictDetector::new().detect(&trains).len(), 2);
    }

    #[test]
    fn test_only_track_one_is_monitored() {
        let trains = vec![train("A", 2, 72.0, 9), train("B", 2, 78.0, 5)];
        assert!(ConflictDetector::new().detect(&trains).is_empty());

        let trains = vec![train("A", 1, 72.0, 9), train("B", 2, 78.0, 5)];
        assert!(ConflictDetector::new().detect(&trains).is_empty());
    }

    #[test]
    fn test_default_zone() {
        let zone = JunctionZone::default();
        assert_eq!(zone.track, TrackId(1));
        assert_eq!(zone.start, 70.0);
        assert_eq!(zone.end, 85.0);
    }
}
