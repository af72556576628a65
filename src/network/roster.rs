//! Default train roster
//!
//! The standard scenario: two tracks, two trains per track, one junction at
//! the 75% mark of each track.

use crate::network::train::Train;
use crate::types::TrainKind;

/// The four-train scenario the simulator starts with unless a roster is configured
pub fn default_roster() -> Vec<Train> {
    vec![
        Train::new("R101", "Rajdhani Express", 1, 9)
            .with_kind(TrainKind::Express)
            .with_positions(10.0, 90.0)
            .with_speed(2.0),
        Train::new("F205", "Freight Train", 2, 3)
            .with_kind(TrainKind::Freight)
            .with_positions(30.0, 85.0)
            .with_speed(1.0)
            .with_delay(5),
        Train::new("P302", "Passenger Local", 1, 6)
            .with_kind(TrainKind::Passenger)
            .with_positions(65.0, 95.0)
            .with_speed(1.5)
            .with_delay(2),
        Train::new("E404", "Express Mail", 2, 8)
            .with_kind(TrainKind::Express)
            .with_positions(45.0, 88.0)
            .with_speed(2.2),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::TrainRegistry;
    use crate::types::{TrackId, TrainStatus};

    #[test]
    fn test_default_roster_is_valid() {
        let registry = TrainRegistry::new(default_roster()).unwrap();
        assert_eq!(registry.len(), 4);
        assert!(registry.trains().iter().all(|t| t.status == TrainStatus::Moving));
    }

    #[test]
    fn test_default_roster_layout() {
        let roster = default_roster();
        let on_track_one: Vec<_> =
            roster.iter().filter(|t| t.track == TrackId(1)).map(|t| t.id.as_str()).collect();
        assert_eq!(on_track_one, vec!["R101", "P302"]);

        let total_delay: u32 = roster.iter().map(|t| t.delay).sum();
        assert_eq!(total_delay, 7);
    }
}
