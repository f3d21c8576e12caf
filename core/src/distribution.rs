//! Discrete distributions for weighted categorical draws.
//!
//! Every weighted branch in the simulation is a table of
//! (category, cumulative probability) rather than a chain of
//! threshold comparisons, so each branch probability can be read
//! back and tested on its own.

use crate::rng::FeedRng;

#[derive(Debug, Clone)]
pub struct WeightedTable<T> {
    /// Cumulative upper bounds, normalised so the last entry is 1.0.
    entries: Vec<(T, f64)>,
}

impl<T: Copy + PartialEq> WeightedTable<T> {
    /// Build from (category, weight) pairs. Weights need not sum to 1.
    /// Negative weights count as 0; an all-zero table is uniform.
    pub fn new(weights: &[(T, f64)]) -> Self {
        assert!(!weights.is_empty(), "weighted table needs at least one entry");

        let total: f64 = weights.iter().map(|(_, w)| w.max(0.0)).sum();
        let n = weights.len() as f64;

        let mut running = 0.0;
        let entries = weights
            .iter()
            .map(|(category, w)| {
                let share = if total > 0.0 { w.max(0.0) / total } else { 1.0 / n };
                running += share;
                (*category, running)
            })
            .collect::<Vec<_>>();

        Self { entries }
    }

    /// Two-way gate: `yes` with probability `p` (clamped to [0,1]).
    pub fn gate(p: f64, yes: T, no: T) -> Self {
        let p = if p.is_finite() { p.clamp(0.0, 1.0) } else { 0.0 };
        Self::new(&[(yes, p), (no, 1.0 - p)])
    }

    pub fn sample(&self, rng: &mut FeedRng) -> T {
        let roll = rng.next_f64();
        self.entries
            .iter()
            .find(|(_, upper)| roll < *upper)
            .or_else(|| self.entries.iter().rev().find(|(_, upper)| *upper > 0.0))
            .map(|(category, _)| *category)
            .unwrap_or(self.entries[0].0)
    }

    /// Probability mass assigned to `category`.
    pub fn probability(&self, category: T) -> f64 {
        let mut lower = 0.0;
        let mut mass = 0.0;
        for (c, upper) in &self.entries {
            if *c == category {
                mass += upper - lower;
            }
            lower = *upper;
        }
        mass
    }

    pub fn categories(&self) -> impl Iterator<Item = T> + '_ {
        self.entries.iter().map(|(c, _)| *c)
    }
}
