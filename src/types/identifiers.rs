//! Identifier types for the rail traffic simulator
//!
//! This module contains the identifier types for trains, tracks and
//! recommendations used throughout the simulation system.

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;
use uuid::Uuid;

/// Operator-facing identifier of a train (e.g. `R101`)
///
/// Train ids are assigned by the roster and never change. Ordering is
/// lexicographic, which is what arbitration tie-breaks rely on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrainId(String);

impl TrainId {
    /// Create a train ID from any string-like value
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier is empty (never valid for a registered train)
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for TrainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TrainId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TrainId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for TrainId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for TrainId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Identifier of a physical track; every track owns exactly one junction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(pub u32);

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Track {}", self.0)
    }
}

impl From<u32> for TrackId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Unique identifier for a generated recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecommendationId(pub Uuid);

impl RecommendationId {
    /// Create a new random recommendation ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a version 4 recommendation ID from the given random source
    ///
    /// Seeded sources yield the same sequence of ids on every run.
    pub fn from_rng<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self(uuid::Builder::from_random_bytes(rng.gen()).into_uuid())
    }
}

impl Default for RecommendationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecommendationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "REC_{}", self.0.simple())
    }
}

impl Serialize for RecommendationId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("REC_{}", self.0.simple()))
    }
}

impl<'de> Deserialize<'de> for RecommendationId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let raw = s.strip_prefix("REC_").unwrap_or(&s);
        let uuid = Uuid::parse_str(raw).map_err(serde::de::Error::custom)?;
        Ok(RecommendationId(uuid))
    }
}
