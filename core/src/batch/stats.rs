use super::scoring::AutomationTier;
use super::BatchResult;
use serde::Serialize;

pub const FULLY_AUTOMATABLE_SAVINGS_PCT: f64 = 0.856;
pub const AI_PREP_SAVINGS_PCT: f64 = 0.30;
pub const HUMAN_REQUIRED_SAVINGS_PCT: f64 = 0.0;
pub const TOP_CANDIDATES: usize = 10;

/// Annual cost of one agent: $23/h × 8h × 260 working days.
pub const HEADCOUNT_COST_DIVISOR: f64 = 23.0 * 8.0 * 260.0;

impl AutomationTier {
    /// Per-call savings fraction a result of this tier contributes.
    /// Only Hybrid defers to the result's own estimate.
    pub fn savings_pct(&self, result: &BatchResult) -> f64 {
        match self {
            Self::FullyAutomatable => FULLY_AUTOMATABLE_SAVINGS_PCT,
            Self::Hybrid           => result.cost_reduction_pct / 100.0,
            Self::AiPrepHuman      => AI_PREP_SAVINGS_PCT,
            Self::HumanRequired    => HUMAN_REQUIRED_SAVINGS_PCT,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct BatchStats {
    pub avg_score:         f64,
    pub fully_automatable: usize,
    pub hybrid:            usize,
    pub ai_prep_human:     usize,
    pub human_required:    usize,
    pub annual_savings:    f64,
    pub top_candidates:    Vec<BatchResult>,
    pub fte_equivalent:    f64,
}

impl BatchStats {
    pub fn total(&self) -> usize {
        self.fully_automatable + self.hybrid + self.ai_prep_human + self.human_required
    }

    pub fn count(&self, tier: AutomationTier) -> usize {
        match tier {
            AutomationTier::FullyAutomatable => self.fully_automatable,
            AutomationTier::Hybrid           => self.hybrid,
            AutomationTier::AiPrepHuman      => self.ai_prep_human,
            AutomationTier::HumanRequired    => self.human_required,
        }
    }

    /// Share of results in `tier`, as a percentage. 0 for an empty batch.
    pub fn tier_share(&self, tier: AutomationTier) -> f64 {
        match self.total() {
            0 => 0.0,
            n => self.count(tier) as f64 / n as f64 * 100.0,
        }
    }
}

pub fn compute_stats(
    results: &[BatchResult],
    monthly_call_volume: f64,
    unit_cost_per_call: f64,
) -> BatchStats {
    if results.is_empty() {
        return BatchStats::default();
    }
    let n = results.len() as f64;

    let mut stats = BatchStats {
        avg_score: results.iter().map(|r| r.score as f64).sum::<f64>() / n,
        ..BatchStats::default()
    };
    for r in results {
        match r.tier {
            AutomationTier::FullyAutomatable => stats.fully_automatable += 1,
            AutomationTier::Hybrid           => stats.hybrid += 1,
            AutomationTier::AiPrepHuman      => stats.ai_prep_human += 1,
            AutomationTier::HumanRequired    => stats.human_required += 1,
        }
    }

    let calls_per_result = monthly_call_volume / n;
    stats.annual_savings = results
        .iter()
        .map(|r| unit_cost_per_call * r.tier.savings_pct(r) * calls_per_result * 12.0)
        .sum();
    stats.fte_equivalent = (stats.annual_savings / HEADCOUNT_COST_DIVISOR).round();

    // sort_by is stable: equal scores keep submission order
    let mut ranked = results.to_vec();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked.truncate(TOP_CANDIDATES);
    stats.top_candidates = ranked;

    stats
}
