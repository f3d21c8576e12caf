//! Pipeline animator: drives the per-feed progress indicator.
//!
//! Purely presentational. Each new event restarts the animator at
//! stage 0; it then steps one stage per PIPELINE_STEP until FINAL_STAGE.

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const PIPELINE_STEP: Duration = Duration::from_millis(300);
pub const FINAL_STAGE: u8 = 5;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipelineState {
    pub active_stage:    u8,
    pub confidence:      u32,
    pub resolution_time: f64,
    pub outcome:         String,
}

#[derive(Debug, Clone)]
pub struct PipelineAnimator {
    state:     PipelineState,
    elapsed:   Duration,
    animating: bool,
}

impl PipelineAnimator {
    /// Idle animator showing a resting label until the first event.
    pub fn idle(confidence: u32, resolution_time: f64, outcome: &str) -> Self {
        Self {
            state: PipelineState {
                active_stage: 0,
                confidence,
                resolution_time,
                outcome: outcome.to_string(),
            },
            elapsed: Duration::ZERO,
            animating: false,
        }
    }

    /// Restart at stage 0 with labels copied from the triggering event.
    pub fn trigger(&mut self, confidence: u32, resolution_time: f64, outcome: &str) {
        self.state = PipelineState {
            active_stage: 0,
            confidence,
            resolution_time: round_tenth(resolution_time),
            outcome: outcome.to_string(),
        };
        self.elapsed = Duration::ZERO;
        self.animating = true;
    }

    /// Advance wall time. Returns true while stages remain.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if !self.animating {
            return false;
        }
        self.elapsed += dt;
        let steps = self.elapsed.as_millis() / PIPELINE_STEP.as_millis();
        self.state.active_stage = steps.min(FINAL_STAGE as u128) as u8;
        self.animating = self.state.active_stage < FINAL_STAGE;
        self.animating
    }

    /// Jump to the final stage; used on teardown.
    pub fn settle(&mut self) {
        self.state.active_stage = FINAL_STAGE;
        self.animating = false;
    }

    /// False while idle (before the first event) and once settled.
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn state(&self) -> &PipelineState {
        &self.state
    }
}

fn round_tenth(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
