//! Train entity and its pure state transitions
//!
//! Every mutation of a train is expressed as a consuming transformation
//! `Train -> Train`, so the registry can apply it as "replace train X by f(X)".

use crate::types::config::policy;
use crate::types::{TrackId, TrainId, TrainKind, TrainStatus};
use serde::{Deserialize, Serialize};

/// A train running on one of the shared tracks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Train {
    /// Unique identifier (stable key)
    pub id: TrainId,
    /// Display label
    pub name: String,
    /// Service category
    #[serde(default)]
    pub kind: TrainKind,
    /// Arbitration priority in [1, 10]; higher wins
    pub priority: u8,
    /// Progress on the normalized [0, 100] track axis
    pub position: f64,
    /// Position at which the train has arrived
    pub target_position: f64,
    /// Position units advanced per tick while moving
    pub speed: f64,
    /// Accumulated delay in minutes
    #[serde(default)]
    pub delay: u32,
    /// Current operational status
    #[serde(default)]
    pub status: TrainStatus,
    /// Track the train runs on (fixed for its lifetime)
    pub track: TrackId,
}

impl Train {
    /// Create a moving train at the start of its track with no delay
    pub fn new(
        id: impl Into<TrainId>,
        name: impl Into<String>,
        track: u32,
        priority: u8,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: TrainKind::default(),
            priority,
            position: 0.0,
            target_position: policy::TRACK_LENGTH,
            speed: 1.0,
            delay: 0,
            status: TrainStatus::Moving,
            track: TrackId(track),
        }
    }

    /// Set the service kind
    pub fn with_kind(mut self, kind: TrainKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the current and target positions
    pub fn with_positions(mut self, position: f64, target_position: f64) -> Self {
        self.position = position;
        self.target_position = target_position;
        self
    }

    /// Set the speed in position units per tick
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    /// Set the accumulated delay
    pub fn with_delay(mut self, delay: u32) -> Self {
        self.delay = delay;
        self
    }

    /// Set the initial status
    pub fn with_status(mut self, status: TrainStatus) -> Self {
        self.status = status;
        self
    }

    /// Whether the train has reached its target
    pub fn has_arrived(&self) -> bool {
        self.position >= self.target_position
    }

    /// Progress shown to the operator, rounded to a whole percent
    pub fn progress_percent(&self) -> u32 {
        self.position.round().max(0.0) as u32
    }

    /// Advance one tick: moving trains step toward their target and clamp on it
    pub fn advanced(self) -> Self {
        if self.status.is_moving() && self.position < self.target_position {
            let position = (self.position + self.speed).min(self.target_position);
            Self { position, ..self }
        } else {
            self
        }
    }

    /// Stop the train in place
    pub fn halted(self) -> Self {
        Self { status: TrainStatus::Halted, speed: 0.0, ..self }
    }

    /// Grant right-of-way: resume movement with boosted speed
    pub fn proceeding(self, speed_factor: f64) -> Self {
        let speed = self.speed * speed_factor;
        Self { status: TrainStatus::Moving, speed, ..self }
    }

    /// Apply an exogenous delay of `minutes`
    pub fn disrupted(self, minutes: u32) -> Self {
        Self {
            delay: self.delay.saturating_add(minutes),
            status: TrainStatus::Delayed,
            ..self
        }
    }

    /// Validate the train attributes
    pub fn validate(&self) -> Result<(), String> {
        if self.id.is_empty() {
            return Err("Train id must not be empty".to_string());
        }

        if !(policy::MIN_PRIORITY..=policy::MAX_PRIORITY).contains(&self.priority) {
            return Err(format!(
                "Priority {} out of range [{}, {}]",
                self.priority,
                policy::MIN_PRIORITY,
                policy::MAX_PRIORITY
            ));
        }

        let axis = 0.0..=policy::TRACK_LENGTH;
        if !axis.contains(&self.position) || !axis.contains(&self.target_position) {
            return Err(format!(
                "Positions must lie on [0, {}], got {} -> {}",
                policy::TRACK_LENGTH,
                self.position,
                self.target_position
            ));
        }

        if self.position > self.target_position {
            return Err(format!(
                "Position {} is beyond target {}",
                self.position, self.target_position
            ));
        }

        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err(format!("Speed must be a non-negative number, got {}", self.speed));
        }

        Ok(())
    }
}
