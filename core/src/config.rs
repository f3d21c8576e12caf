use crate::{
    dashboard::DashboardParams,
    error::{SimError, SimResult},
    roi::{CallCenterParams, ClaimsParams, PlatformParams, VolumePreset},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const FUNCTIONS_URL_ENV: &str = "DEMO_FUNCTIONS_URL";
pub const FUNCTIONS_KEY_ENV: &str = "DEMO_FUNCTIONS_KEY";

// ── Dashboard defaults ─────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DashboardFile {
    #[serde(default)]
    preset: VolumePreset,
    #[serde(default)]
    call: CallCenterParams,
    #[serde(default)]
    claims: ClaimsParams,
    #[serde(default)]
    platform: PlatformParams,
    #[serde(default)]
    simulation: SimulationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

// ── Batch analysis ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BatchConfig {
    /// Base URL of the hosted edge functions, no trailing slash.
    pub functions_url:        String,
    /// Publishable key sent as both `apikey` and bearer token.
    pub api_key:              String,
    /// Courtesy pause between files, in milliseconds.
    pub inter_file_delay_ms:  u64,
    /// Call volume the batch savings estimate is spread across.
    pub monthly_call_volume:  f64,
    /// Fully loaded cost of one handled call.
    pub unit_cost_per_call:   f64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            functions_url:       "http://localhost:54321".into(),
            api_key:             String::new(),
            inter_file_delay_ms: 200,
            monthly_call_volume: 5_000.0,
            unit_cost_per_call:  4.50,
        }
    }
}

impl BatchConfig {
    pub fn inter_file_delay(&self) -> Duration {
        Duration::from_millis(self.inter_file_delay_ms)
    }

    /// Defaults with no inter-file pause, for tests.
    pub fn default_test() -> Self {
        Self {
            inter_file_delay_ms: 0,
            ..Self::default()
        }
    }
}

// ── Top level ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct DemoConfig {
    pub dashboard:  DashboardParams,
    pub simulation: SimulationConfig,
    pub batch:      BatchConfig,
}

impl DemoConfig {
    /// Load `{data_dir}/dashboard.json` and `{data_dir}/batch.json`.
    /// Endpoint and key may be overridden from the environment.
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/dashboard.json");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let file: DashboardFile = serde_json::from_str(&content)?;

        let batch_path = format!("{data_dir}/batch.json");
        let batch_content = std::fs::read_to_string(&batch_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {batch_path}: {e}"))?;
        let mut batch: BatchConfig = serde_json::from_str(&batch_content)?;
        batch.apply_env_overrides();

        let config = Self {
            dashboard: DashboardParams {
                preset:   file.preset,
                call:     file.call,
                claims:   file.claims,
                platform: file.platform,
            },
            simulation: file.simulation,
            batch,
        };
        config.validate()?;

        log::info!(
            "config loaded from {data_dir}: preset={} seed={} functions={}",
            config.dashboard.preset.name(),
            config.simulation.seed,
            config.batch.functions_url
        );
        Ok(config)
    }

    /// Reject values no slider can produce.
    pub fn validate(&self) -> SimResult<()> {
        let call = &self.dashboard.call;
        let claims = &self.dashboard.claims;
        let fractions = [
            ("call.provider_pct", call.provider_pct),
            ("call.eligible_pct", call.eligible_pct),
            ("call.accuracy_pct", call.accuracy_pct),
            ("call.ai_process_savings_pct", call.ai_process_savings_pct),
            ("claims.manual_review_pct", claims.manual_review_pct),
            ("claims.ai_labor_reduction_pct", claims.ai_labor_reduction_pct),
        ];
        for (name, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(SimError::Config(format!("{name} must be within [0, 1], got {value}")));
            }
        }
        if self.dashboard.platform.annual_platform_cost < 0.0 {
            return Err(SimError::Config(
                "platform.annual_platform_cost must not be negative".into(),
            ));
        }
        Ok(())
    }
}

impl BatchConfig {
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(FUNCTIONS_URL_ENV) {
            self.functions_url = url;
        }
        if let Ok(key) = std::env::var(FUNCTIONS_KEY_ENV) {
            self.api_key = key;
        }
    }
}
