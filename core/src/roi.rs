//! ROI calculator: call center + claims savings against platform cost.
//!
//! PURE. No I/O, no state, no errors. Safe to call on every slider edit.
//! Division guards return 0: "no savings yet" and "no cost configured"
//! are valid zero states, not failures.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Standard paid hours in a work year.
pub const ANNUAL_WORK_HOURS: f64 = 2080.0;

/// Platform cost used when a preset does not carry its own.
pub const DEFAULT_PLATFORM_COST: f64 = 350_000.0;

// ── Inputs ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CallCenterParams {
    pub monthly_calls:          f64,
    pub handle_time_min:        f64,
    pub agent_cost_hr:          f64,
    pub provider_pct:           f64,
    pub eligible_pct:           f64,
    pub accuracy_pct:           f64,
    pub ai_process_savings_pct: f64,
}

impl Default for CallCenterParams {
    fn default() -> Self {
        Self {
            monthly_calls:          29_000.0,
            handle_time_min:        6.0,
            agent_cost_hr:          23.0,
            provider_pct:           0.75,
            eligible_pct:           0.705,
            accuracy_pct:           0.85,
            ai_process_savings_pct: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ClaimsParams {
    pub monthly_claims:         f64,
    pub manual_review_pct:      f64,
    pub manual_time_min:        f64,
    pub fte_hourly_cost:        f64,
    pub ai_labor_reduction_pct: f64,
}

impl Default for ClaimsParams {
    fn default() -> Self {
        Self {
            monthly_claims:         30_000.0,
            manual_review_pct:      0.25,
            manual_time_min:        15.0,
            fte_hourly_cost:        50.0,
            ai_labor_reduction_pct: 0.50,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PlatformParams {
    pub annual_platform_cost: f64,
}

impl Default for PlatformParams {
    fn default() -> Self {
        Self { annual_platform_cost: DEFAULT_PLATFORM_COST }
    }
}

// ── Outputs ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CallCenterResults {
    pub annual_manual_cost: f64,
    pub annual_savings:     f64,
    pub fte_saved:          f64,
    pub annual_hours_saved: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ClaimsResults {
    pub annual_claims:        f64,
    pub manual_review_claims: f64,
    pub annual_manual_hours:  f64,
    pub annual_manual_cost:   f64,
    pub annual_savings:       f64,
    pub fte_saved:            f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CombinedResults {
    pub total_annual_savings: f64,
    pub roi:                  f64,
    pub payback_months:       f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RoiResults {
    pub call_center: CallCenterResults,
    pub claims:      ClaimsResults,
    pub combined:    CombinedResults,
}

/// `numerator / denominator`, or 0 when the denominator is not positive.
fn guarded_div(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

pub fn calculate_roi(
    call: &CallCenterParams,
    claims: &ClaimsParams,
    platform: &PlatformParams,
) -> RoiResults {
    // ── Call center ────────────────────────────────────────
    // Savings apply only to provider-originated, eligibility-related,
    // correctly handled volume; the fractions compose multiplicatively.
    let call_manual_cost =
        call.monthly_calls * 12.0 * (call.handle_time_min / 60.0) * call.agent_cost_hr;
    let call_savings = call_manual_cost
        * call.provider_pct
        * call.eligible_pct
        * call.accuracy_pct
        * call.ai_process_savings_pct;
    let call_hours_saved = guarded_div(call_savings, call.agent_cost_hr);
    let call_fte_saved = call_hours_saved / ANNUAL_WORK_HOURS;

    // ── Claims ─────────────────────────────────────────────
    let annual_claims = claims.monthly_claims * 12.0;
    let manual_review_claims = annual_claims * claims.manual_review_pct;
    let claims_manual_hours = manual_review_claims * (claims.manual_time_min / 60.0);
    let claims_manual_cost = claims_manual_hours * claims.fte_hourly_cost;
    let claims_savings = claims_manual_cost * claims.ai_labor_reduction_pct;
    let claims_fte_saved = guarded_div(claims_savings, claims.fte_hourly_cost) / ANNUAL_WORK_HOURS;

    // ── Combined ───────────────────────────────────────────
    let total_annual_savings = call_savings + claims_savings;
    let roi = guarded_div(total_annual_savings, platform.annual_platform_cost);
    let payback_months = guarded_div(platform.annual_platform_cost, total_annual_savings) * 12.0;

    RoiResults {
        call_center: CallCenterResults {
            annual_manual_cost: call_manual_cost,
            annual_savings:     call_savings,
            fte_saved:          call_fte_saved,
            annual_hours_saved: call_hours_saved,
        },
        claims: ClaimsResults {
            annual_claims,
            manual_review_claims,
            annual_manual_hours: claims_manual_hours,
            annual_manual_cost:  claims_manual_cost,
            annual_savings:      claims_savings,
            fte_saved:           claims_fte_saved,
        },
        combined: CombinedResults {
            total_annual_savings,
            roi,
            payback_months,
        },
    }
}

// ── Volume presets ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum VolumePreset {
    Low,
    #[default]
    Medium,
    High,
}

/// Alternate volume bundle that replaces the current parameter set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PresetVolumes {
    pub monthly_calls:  f64,
    pub monthly_claims: f64,
    #[serde(default)]
    pub platform_cost:  Option<f64>,
}

pub const VOLUME_PRESETS: [(VolumePreset, PresetVolumes); 3] = [
    (
        VolumePreset::Low,
        PresetVolumes { monthly_calls: 15_000.0, monthly_claims: 20_000.0, platform_cost: None },
    ),
    (
        VolumePreset::Medium,
        PresetVolumes { monthly_calls: 29_000.0, monthly_claims: 30_000.0, platform_cost: None },
    ),
    (
        VolumePreset::High,
        PresetVolumes {
            monthly_calls:  50_000.0,
            monthly_claims: 45_000.0,
            platform_cost:  Some(420_000.0),
        },
    ),
];

impl VolumePreset {
    pub const ALL: [VolumePreset; 3] = [Self::Low, Self::Medium, Self::High];

    pub fn volumes(&self) -> PresetVolumes {
        VOLUME_PRESETS
            .iter()
            .find(|(preset, _)| preset == self)
            .map(|(_, volumes)| *volumes)
            .unwrap_or(VOLUME_PRESETS[1].1)
    }

    /// Time between simulation ticks. Busier presets tick faster.
    pub fn tick_interval(&self) -> Duration {
        match self {
            Self::Low    => Duration::from_millis(7000),
            Self::Medium => Duration::from_millis(5000),
            Self::High   => Duration::from_millis(3000),
        }
    }

    /// Replace the preset-controlled fields wholesale.
    pub fn apply(
        &self,
        call: &CallCenterParams,
        claims: &ClaimsParams,
    ) -> (CallCenterParams, ClaimsParams, PlatformParams) {
        let v = self.volumes();
        (
            CallCenterParams { monthly_calls: v.monthly_calls, ..*call },
            ClaimsParams { monthly_claims: v.monthly_claims, ..*claims },
            PlatformParams {
                annual_platform_cost: v.platform_cost.unwrap_or(DEFAULT_PLATFORM_COST),
            },
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Low    => "low",
            Self::Medium => "medium",
            Self::High   => "high",
        }
    }
}

impl std::str::FromStr for VolumePreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low"    => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high"   => Ok(Self::High),
            other    => Err(format!("unknown volume preset '{other}'")),
        }
    }
}
