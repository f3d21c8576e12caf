//! ROI attribution feed: REACTIVE.
//!
//! Generates nothing of its own volume. Observes the SavingsRecorded
//! events emitted earlier in the tick by the call, claims and network
//! feeds, and on roughly 60% of ticks attributes the cumulative total
//! as an annualised ROI figure.
//!
//! Depends on: call, claims, network feeds (must run after them).

use crate::{
    distribution::WeightedTable,
    error::SimResult,
    event::{RoiEvent, SimEvent},
    format::fmt_thousands,
    pipeline::PipelineAnimator,
    rng::{FeedRng, FeedSlot},
    roi::DEFAULT_PLATFORM_COST,
    subsystem::{event_id, FeedSubsystem, TickContext},
    vocab::ROI_EVENT_TYPES,
    window::RecentWindow,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Probability that a tick produces an attribution event.
pub const ATTRIBUTION_RATE: f64 = 0.6;

/// Live savings are treated as one week's worth when annualising.
pub const WEEKS_PER_YEAR: f64 = 52.0;

/// Revenue base used for the margin-expansion figure.
pub const MARGIN_REVENUE_BASE: f64 = 5_000_000.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RoiCounters {
    pub total_annualized_savings: f64,
    pub roi_multiple:             f64,
    pub payback_months:           f64,
    pub productivity_lift_pct:    f64,
    pub margin_expansion_pct:     f64,
}

impl Default for RoiCounters {
    fn default() -> Self {
        Self {
            total_annualized_savings: 0.0,
            roi_multiple:             0.0,
            payback_months:           8.2,
            productivity_lift_pct:    34.0,
            margin_expansion_pct:     0.0,
        }
    }
}

impl RoiCounters {
    /// Recompute from the cumulative live total. The multiple is taken
    /// against the reference platform cost, not the slider value. Every
    /// figure is non-decreasing.
    pub fn attribute(&self, cumulative_total: f64) -> Self {
        let annualized = (cumulative_total * WEEKS_PER_YEAR).max(self.total_annualized_savings);
        let roi_multiple = if annualized > 0.0 {
            round_to(annualized / DEFAULT_PLATFORM_COST, 1)
        } else {
            0.0
        };
        Self {
            total_annualized_savings: annualized,
            roi_multiple: roi_multiple.max(self.roi_multiple),
            margin_expansion_pct: round_to(annualized / MARGIN_REVENUE_BASE * 100.0, 2)
                .max(self.margin_expansion_pct),
            ..*self
        }
    }
}

fn round_to(x: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    (x * scale).round() / scale
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attribution {
    Attribute,
    Skip,
}

pub struct RoiFeed {
    gate:          WeightedTable<Attribution>,
    /// Latest cumulative total per source feed; BTreeMap keeps the sum order stable.
    feed_totals:   BTreeMap<String, f64>,
    pub window:    RecentWindow<RoiEvent>,
    pub counters:  RoiCounters,
    pipeline:      PipelineAnimator,
}

impl RoiFeed {
    pub fn new() -> Self {
        Self {
            gate: WeightedTable::gate(ATTRIBUTION_RATE, Attribution::Attribute, Attribution::Skip),
            feed_totals: BTreeMap::new(),
            window: RecentWindow::default(),
            counters: RoiCounters::default(),
            pipeline: PipelineAnimator::idle(96, 0.5, "Attributed"),
        }
    }

    pub fn pipeline(&self) -> &PipelineAnimator {
        &self.pipeline
    }

    /// Sum of the latest totals reported by every source feed.
    pub fn cumulative_total(&self) -> f64 {
        self.feed_totals.values().sum()
    }
}

impl Default for RoiFeed {
    fn default() -> Self { Self::new() }
}

impl FeedSubsystem for RoiFeed {
    fn name(&self) -> &'static str { "roi" }

    fn slot(&self) -> FeedSlot { FeedSlot::Roi }

    fn update(
        &mut self,
        ctx: &TickContext<'_>,
        events_in: &[SimEvent],
        rng: &mut FeedRng,
    ) -> SimResult<Vec<SimEvent>> {
        for event in events_in {
            if let SimEvent::SavingsRecorded { feed, total, .. } = event {
                let slot = self.feed_totals.entry(feed.clone()).or_insert(0.0);
                *slot = slot.max(*total);
            }
        }

        if self.gate.sample(rng) == Attribution::Skip {
            return Ok(vec![]);
        }

        let total = self.cumulative_total();
        let event = RoiEvent {
            id: event_id("roi", ctx.tick, rng),
            timestamp: ctx.timestamp,
            event_type: rng.pick(ROI_EVENT_TYPES).to_string(),
            value: rng.uniform(100.0, 2000.0).round() as u32,
            detail: format!("Cumulative: ${}", fmt_thousands(total.round() as u64)),
        };

        self.pipeline.trigger(96, 0.5, "Attributed");
        self.counters = self.counters.attribute(total);

        log::debug!(
            "tick={} roi: {} annualized=${:.0} roi={:.1}x",
            ctx.tick,
            event.event_type,
            self.counters.total_annualized_savings,
            self.counters.roi_multiple
        );

        self.window.push_front(event.clone());
        Ok(vec![SimEvent::RoiAttributed(event)])
    }

    fn advance_pipeline(&mut self, dt: Duration) -> bool {
        self.pipeline.advance(dt)
    }

    fn settle(&mut self) {
        self.pipeline.settle();
    }

    fn as_any(&self) -> &dyn std::any::Any { self }
}
