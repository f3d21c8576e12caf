//! Dashboard controller: sole owner and writer of the parameter set.
//!
//! Data flows one way: the controller replaces parameter groups
//! wholesale, recomputes the ROI results synchronously, and hands the
//! engine a shared reference on every tick. The engine never writes back.

use crate::{
    config::DemoConfig,
    engine::SimEngine,
    error::SimResult,
    event::SimEvent,
    kpi::{savings_projection, LiveKpis, MonthlyProjection},
    roi::{calculate_roi, CallCenterParams, ClaimsParams, PlatformParams, RoiResults, VolumePreset},
    types::Tick,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct DashboardParams {
    pub preset:   VolumePreset,
    pub call:     CallCenterParams,
    pub claims:   ClaimsParams,
    pub platform: PlatformParams,
}

impl DashboardParams {
    pub fn results(&self) -> RoiResults {
        calculate_roi(&self.call, &self.claims, &self.platform)
    }
}

pub struct Dashboard {
    params:       DashboardParams,
    results:      RoiResults,
    last_updated: DateTime<Utc>,
    pub engine:   SimEngine,
}

impl Dashboard {
    pub fn new(params: DashboardParams, seed: u64, now: DateTime<Utc>) -> Self {
        Self {
            results: params.results(),
            params,
            last_updated: now,
            engine: SimEngine::build(seed, now),
        }
    }

    pub fn from_config(config: &DemoConfig, now: DateTime<Utc>) -> Self {
        Self::new(config.dashboard, config.simulation.seed, now)
    }

    pub fn params(&self) -> &DashboardParams {
        &self.params
    }

    pub fn results(&self) -> &RoiResults {
        &self.results
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    // ── Writers ────────────────────────────────────────────

    pub fn set_call_params(&mut self, call: CallCenterParams) {
        self.params.call = call;
        self.recompute();
    }

    pub fn set_claims_params(&mut self, claims: ClaimsParams) {
        self.params.claims = claims;
        self.recompute();
    }

    pub fn set_platform_params(&mut self, platform: PlatformParams) {
        self.params.platform = platform;
        self.recompute();
    }

    /// Atomically replace volumes and platform cost. Idempotent.
    pub fn apply_preset(&mut self, preset: VolumePreset) {
        let (call, claims, platform) = preset.apply(&self.params.call, &self.params.claims);
        self.params = DashboardParams { preset, call, claims, platform };
        self.recompute();
        log::info!(
            "preset {} applied: calls={} claims={} platform=${:.0}",
            preset.name(),
            call.monthly_calls,
            claims.monthly_claims,
            platform.annual_platform_cost
        );
    }

    /// Stamped with the session clock.
    fn recompute(&mut self) {
        self.results = self.params.results();
        self.last_updated = self.engine.clock.now;
    }

    // ── Simulation ─────────────────────────────────────────

    /// Time until the next tick under the current preset.
    pub fn tick_interval(&self) -> Duration {
        self.params.preset.tick_interval()
    }

    pub fn tick(&mut self) -> SimResult<Vec<SimEvent>> {
        self.engine.tick(&self.params)
    }

    pub fn run_ticks(&mut self, n: u64) -> SimResult<Vec<SimEvent>> {
        self.engine.run_ticks(n, &self.params)
    }

    /// Fast-forward `n` ticks without keeping the emitted events.
    /// Returns the tick reached.
    pub fn advance(&mut self, n: u64) -> SimResult<Tick> {
        for _ in 0..n {
            self.engine.tick(&self.params)?;
        }
        Ok(self.engine.current_tick())
    }

    pub fn stop(&mut self) {
        self.engine.stop();
    }

    // ── Derived views ──────────────────────────────────────

    pub fn live_kpis(&self) -> LiveKpis {
        let call = self.engine.call_feed().map(|f| f.counters).unwrap_or_default();
        let claims = self.engine.claims_feed().map(|f| f.counters).unwrap_or_default();
        LiveKpis::blend(&self.results, &self.params.platform, &call, &claims)
    }

    pub fn projection(&self, sensitivity_accuracy: f64) -> Vec<MonthlyProjection> {
        savings_projection(&self.results, &self.params.call, sensitivity_accuracy)
    }
}
