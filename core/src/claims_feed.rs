//! Claims feed: synthetic adjudication events.
//!
//! Status is a fixed three-way split: 60% auto, 30% manual, 10% exception.
//! Only auto-adjudicated claims avoid a manual review and fold into the
//! counters, priced at the claims FTE hourly cost. FTE impact is derived
//! from the cumulative manual minutes avoided.

use crate::{
    call_feed::FTE_DAY_MINUTES,
    distribution::WeightedTable,
    error::SimResult,
    event::{ClaimStatus, ClaimsEvent, SimEvent},
    pipeline::PipelineAnimator,
    rng::{FeedRng, FeedSlot},
    roi::ClaimsParams,
    subsystem::{event_id, FeedSubsystem, TickContext},
    vocab::CLAIMS_EVENT_TYPES,
    window::RecentWindow,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ClaimsCounters {
    pub auto_adjudicated:         u64,
    pub manual_reviews_avoided:   u64,
    pub manual_minutes_avoided:   f64,
    pub cycle_time_reduction_pct: f64,
    pub error_rate_reduction_pct: f64,
    pub cost_avoided:             f64,
    pub fte_impact:               f64,
}

impl Default for ClaimsCounters {
    fn default() -> Self {
        Self {
            auto_adjudicated:         0,
            manual_reviews_avoided:   0,
            manual_minutes_avoided:   0.0,
            cycle_time_reduction_pct: 42.0,
            error_rate_reduction_pct: 67.0,
            cost_avoided:             0.0,
            fte_impact:               0.0,
        }
    }
}

impl ClaimsCounters {
    pub fn fold(&self, event: &ClaimsEvent, params: &ClaimsParams) -> Self {
        if !event.manual_review_avoided {
            return *self;
        }
        let cost = ((event.adjudication_time_sec / 60.0) * params.fte_hourly_cost).max(0.0);
        let manual_minutes_avoided = self.manual_minutes_avoided + params.manual_time_min.max(0.0);
        Self {
            auto_adjudicated: self.auto_adjudicated + 1,
            manual_reviews_avoided: self.manual_reviews_avoided + 1,
            manual_minutes_avoided,
            cost_avoided: self.cost_avoided + cost,
            fte_impact: manual_minutes_avoided / FTE_DAY_MINUTES,
            ..*self
        }
    }
}

pub struct ClaimsFeed {
    statuses:     WeightedTable<ClaimStatus>,
    pub window:   RecentWindow<ClaimsEvent>,
    pub counters: ClaimsCounters,
    pipeline:     PipelineAnimator,
}

impl ClaimsFeed {
    pub fn new() -> Self {
        Self {
            statuses: WeightedTable::new(&[
                (ClaimStatus::Auto, 0.6),
                (ClaimStatus::Manual, 0.3),
                (ClaimStatus::Exception, 0.1),
            ]),
            window: RecentWindow::default(),
            counters: ClaimsCounters::default(),
            pipeline: PipelineAnimator::idle(94, 2.1, "Auto-Adjudicated"),
        }
    }

    pub fn statuses(&self) -> &WeightedTable<ClaimStatus> {
        &self.statuses
    }

    pub fn pipeline(&self) -> &PipelineAnimator {
        &self.pipeline
    }

    pub fn generate(&self, ctx: &TickContext<'_>, rng: &mut FeedRng) -> ClaimsEvent {
        let status = self.statuses.sample(rng);
        let is_auto = status == ClaimStatus::Auto;

        let claim_id = format!("CLM-{}", 1000 + rng.next_u64_below(9000));
        let event_type = *rng.pick(CLAIMS_EVENT_TYPES);
        let (confidence, adjudication_time_sec) = if is_auto {
            (rng.uniform(88.0, 10.0), rng.uniform(1.0, 4.0))
        } else {
            (rng.uniform(85.0, 10.0), rng.uniform(15.0, 45.0))
        };

        ClaimsEvent {
            id: event_id("clm", ctx.tick, rng),
            timestamp: ctx.timestamp,
            claim_id,
            event_type: event_type.to_string(),
            confidence,
            adjudication_time_sec,
            manual_review_avoided: is_auto,
            status,
        }
    }
}

impl Default for ClaimsFeed {
    fn default() -> Self { Self::new() }
}

impl FeedSubsystem for ClaimsFeed {
    fn name(&self) -> &'static str { "claims" }

    fn slot(&self) -> FeedSlot { FeedSlot::Claims }

    fn update(
        &mut self,
        ctx: &TickContext<'_>,
        _events_in: &[SimEvent],
        rng: &mut FeedRng,
    ) -> SimResult<Vec<SimEvent>> {
        let event = self.generate(ctx, rng);

        self.pipeline.trigger(
            event.confidence.round() as u32,
            event.adjudication_time_sec,
            event.status.outcome_label(),
        );
        self.counters = self.counters.fold(&event, &ctx.params.claims);

        log::debug!(
            "tick={} claims: {} {} -> {:?}",
            ctx.tick,
            event.claim_id,
            event.event_type,
            event.status
        );

        self.window.push_front(event.clone());

        Ok(vec![
            SimEvent::ClaimProcessed(event),
            SimEvent::SavingsRecorded {
                tick: ctx.tick,
                feed: self.name().to_string(),
                total: self.counters.cost_avoided,
            },
        ])
    }

    fn advance_pipeline(&mut self, dt: Duration) -> bool {
        self.pipeline.advance(dt)
    }

    fn settle(&mut self) {
        self.pipeline.settle();
    }

    fn as_any(&self) -> &dyn std::any::Any { self }
}
