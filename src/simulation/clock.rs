//! Simulation clock and tick scheduling
//!
//! The clock is a plain tick counter; correctness never depends on wall time.
//! The scheduler converts wall-clock instants into a number of due ticks so a
//! driver can pace the simulation without owning a timer thread.

use chrono::Duration as ChronoDuration;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Monotonic tick counter, reset only at (re)initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationClock {
    tick: u64,
    tick_interval_ms: u64,
}

impl SimulationClock {
    /// Create a clock at tick 0
    pub fn new(tick_interval: Duration) -> Self {
        Self { tick: 0, tick_interval_ms: tick_interval.as_millis() as u64 }
    }

    /// Current tick
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Advance by one tick and return the new tick
    pub fn advance(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    /// Back to tick 0
    pub fn reset(&mut self) {
        self.tick = 0;
    }

    /// Simulated time elapsed, `tick × tick interval`
    pub fn elapsed(&self) -> ChronoDuration {
        ChronoDuration::milliseconds(self.tick.saturating_mul(self.tick_interval_ms) as i64)
    }

    /// Elapsed time as `MM:SS`; minutes keep counting past 59
    pub fn format_elapsed(&self) -> String {
        let elapsed = self.elapsed();
        format!("{:02}:{:02}", elapsed.num_minutes(), elapsed.num_seconds() % 60)
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(Duration::from_millis(crate::types::config::policy::DEFAULT_TICK_INTERVAL_MS))
    }
}

/// Fixed-period tick scheduler driven by caller-supplied instants
#[derive(Debug, Clone)]
pub struct TickScheduler {
    interval: Duration,
    next_due: Option<Instant>,
}

impl TickScheduler {
    /// Create a stopped scheduler
    pub fn new(interval: Duration) -> Self {
        Self { interval, next_due: None }
    }

    /// Tick period
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start scheduling; the first tick is due one interval after `now`.
    /// Starting a running scheduler keeps its current phase.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.next_due.is_some() {
            return false;
        }
        self.next_due = Some(now + self.interval);
        info!(interval_ms = self.interval.as_millis() as u64, "Tick scheduler started");
        true
    }

    /// Stop scheduling; returns false if already stopped
    pub fn stop(&mut self) -> bool {
        if self.next_due.take().is_none() {
            return false;
        }
        info!("Tick scheduler stopped");
        true
    }

    /// Whether ticks are being scheduled
    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// When the next tick falls due, if running
    pub fn next_due(&self) -> Option<Instant> {
        self.next_due
    }

    /// Number of ticks that fell due up to `now`; consumes them
    pub fn due_ticks(&mut self, now: Instant) -> u64 {
        let Some(next) = self.next_due else {
            return 0;
        };
        if now < next || self.interval.is_zero() {
            return 0;
        }

        let overdue = now.duration_since(next).as_nanos() / self.interval.as_nanos();
        let due = u64::try_from(overdue).unwrap_or(u64::MAX - 1) + 1;
        self.next_due = Some(next + self.interval * u32::try_from(due).unwrap_or(u32::MAX));

        if due > 1 {
            debug!(due, "Scheduler fell behind, catching up");
        }
        due
    }
}
