//! Live KPIs: the static ROI projection blended with live counters,
//! plus the 12-month cumulative savings projection.

use crate::{
    call_feed::CallCounters,
    claims_feed::ClaimsCounters,
    roi::{CallCenterParams, PlatformParams, RoiResults},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LiveKpis {
    pub total_savings:   f64,
    pub call_savings:    f64,
    pub claims_savings:  f64,
    pub roi:             f64,
    pub payback_months:  f64,
    pub call_fte:        f64,
    pub claims_fte:      f64,
}

impl LiveKpis {
    pub fn blend(
        results: &RoiResults,
        platform: &PlatformParams,
        call: &CallCounters,
        claims: &ClaimsCounters,
    ) -> Self {
        let combined = &results.combined;
        let total_savings = combined.total_annual_savings + call.cost_avoided + claims.cost_avoided;
        let cost = platform.annual_platform_cost;

        let roi = if cost > 0.0 { total_savings / cost } else { combined.roi };
        let payback_months = if total_savings > 0.0 {
            (cost / total_savings) * 12.0
        } else {
            combined.payback_months
        };

        Self {
            total_savings,
            call_savings: results.call_center.annual_savings + call.cost_avoided,
            claims_savings: results.claims.annual_savings + claims.cost_avoided,
            roi,
            payback_months,
            call_fte: results.call_center.fte_saved + call.fte_equivalent,
            claims_fte: results.claims.fte_saved + claims.fte_impact,
        }
    }
}

pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MonthlyProjection {
    pub month:    &'static str,
    /// Cumulative savings at the configured accuracy.
    pub savings:  f64,
    /// Cumulative savings had accuracy been `sensitivity_accuracy` instead.
    pub adjusted: f64,
}

/// Twelve cumulative months of savings, with an accuracy sensitivity line.
pub fn savings_projection(
    results: &RoiResults,
    call: &CallCenterParams,
    sensitivity_accuracy: f64,
) -> Vec<MonthlyProjection> {
    let monthly = results.combined.total_annual_savings / 12.0;
    let ratio = if call.accuracy_pct > 0.0 {
        sensitivity_accuracy / call.accuracy_pct
    } else {
        1.0
    };

    MONTHS
        .iter()
        .enumerate()
        .map(|(i, month)| {
            let months_elapsed = (i + 1) as f64;
            MonthlyProjection {
                month,
                savings: (monthly * months_elapsed).round(),
                adjusted: (monthly * ratio * months_elapsed).round(),
            }
        })
        .collect()
}
