//! Simulation clock: owns tick state, cadence, and stop.

use crate::types::Tick;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimClock {
    pub current_tick: Tick,
    pub started_at:   DateTime<Utc>,
    /// Timestamp of the most recent tick; `started_at` before the first.
    pub now:          DateTime<Utc>,
    pub stopped:      bool,
}

impl SimClock {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            current_tick: 0,
            started_at,
            now: started_at,
            stopped: false,
        }
    }

    /// Advance one tick by `cadence`. Returns the new tick and its timestamp.
    /// Timestamps strictly increase as long as cadence is non-zero.
    pub fn advance(&mut self, cadence: Duration) -> (Tick, DateTime<Utc>) {
        let step = chrono::Duration::from_std(cadence)
            .unwrap_or_else(|_| chrono::Duration::milliseconds(1));
        self.current_tick += 1;
        self.now += step.max(chrono::Duration::milliseconds(1));
        (self.current_tick, self.now)
    }

    pub fn stop(&mut self) { self.stopped = true; }

    pub fn elapsed(&self) -> chrono::Duration {
        self.now - self.started_at
    }
}
