//! Network feed: routing optimisations with a per-event savings amount.
//! Every event counts; there is no failure outcome.

use crate::{
    error::SimResult,
    event::{NetworkEvent, SimEvent},
    pipeline::PipelineAnimator,
    rng::{FeedRng, FeedSlot},
    subsystem::{event_id, FeedSubsystem, TickContext},
    vocab::{MEMBER_IMPACTS, NETWORKS, NETWORK_EVENT_TYPES, PLAN_IMPACTS},
    window::RecentWindow,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Savings per PMPM point.
const PMPM_DIVISOR: f64 = 10_000.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct NetworkCounters {
    pub savings_generated:               f64,
    pub oon_avoidance_rate:              f64,
    pub marketplace_util_lift:           f64,
    pub pmpm_reduction:                  f64,
    pub member_disruption_reduction_pct: f64,
}

impl Default for NetworkCounters {
    fn default() -> Self {
        Self {
            savings_generated:               0.0,
            oon_avoidance_rate:              78.0,
            marketplace_util_lift:           23.0,
            pmpm_reduction:                  0.0,
            member_disruption_reduction_pct: 91.0,
        }
    }
}

impl NetworkCounters {
    pub fn fold(&self, event: &NetworkEvent) -> Self {
        let savings_generated = self.savings_generated + event.savings as f64;
        Self {
            savings_generated,
            pmpm_reduction: (savings_generated / PMPM_DIVISOR * 100.0).round() / 100.0,
            ..*self
        }
    }
}

pub struct NetworkFeed {
    pub window:   RecentWindow<NetworkEvent>,
    pub counters: NetworkCounters,
    pipeline:     PipelineAnimator,
}

impl NetworkFeed {
    pub fn new() -> Self {
        Self {
            window: RecentWindow::default(),
            counters: NetworkCounters::default(),
            pipeline: PipelineAnimator::idle(89, 1.8, "Optimized"),
        }
    }

    pub fn pipeline(&self) -> &PipelineAnimator {
        &self.pipeline
    }

    pub fn generate(&self, ctx: &TickContext<'_>, rng: &mut FeedRng) -> NetworkEvent {
        NetworkEvent {
            id: event_id("net", ctx.tick, rng),
            timestamp: ctx.timestamp,
            event_type: rng.pick(NETWORK_EVENT_TYPES).to_string(),
            savings: rng.uniform(50.0, 500.0).round() as u32,
            network: rng.pick(NETWORKS).to_string(),
            plan_impact: rng.pick(PLAN_IMPACTS).to_string(),
            member_impact: rng.pick(MEMBER_IMPACTS).to_string(),
        }
    }
}

impl Default for NetworkFeed {
    fn default() -> Self { Self::new() }
}

impl FeedSubsystem for NetworkFeed {
    fn name(&self) -> &'static str { "network" }

    fn slot(&self) -> FeedSlot { FeedSlot::Network }

    fn update(
        &mut self,
        ctx: &TickContext<'_>,
        _events_in: &[SimEvent],
        rng: &mut FeedRng,
    ) -> SimResult<Vec<SimEvent>> {
        let event = self.generate(ctx, rng);

        // The network pipeline carries its own confidence and timing.
        let confidence = 85 + (rng.next_f64() * 12.0).round() as u32;
        let resolution_time = rng.uniform(1.0, 3.0);
        self.pipeline.trigger(confidence, resolution_time, "Optimized");
        self.counters = self.counters.fold(&event);

        log::debug!(
            "tick={} network: {} on {} saved ${}",
            ctx.tick,
            event.event_type,
            event.network,
            event.savings
        );

        self.window.push_front(event.clone());

        Ok(vec![
            SimEvent::NetworkOptimized(event),
            SimEvent::SavingsRecorded {
                tick: ctx.tick,
                feed: self.name().to_string(),
                total: self.counters.savings_generated,
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
