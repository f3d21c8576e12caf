//! Call feed: synthetic inbound calls and deflection counters.
//!
//! Generator: caller type → reason → payer → resolution gate → status.
//! The resolution gate is seeded by eligible_pct × accuracy_pct, so the
//! live deflection rate follows the ROI sliders.
//!
//! Reducer: deflected calls (ai-routed | resolved) add the share of a
//! handled call's time and cost the AI saves. FTE equivalent is derived
//! from cumulative minutes, never incremented on its own.

use crate::{
    distribution::WeightedTable,
    error::SimResult,
    event::{CallEvent, CallStatus, CallerType, SimEvent},
    pipeline::PipelineAnimator,
    rng::{FeedRng, FeedSlot},
    roi::CallCenterParams,
    subsystem::{event_id, FeedSubsystem, TickContext},
    vocab::{MEMBER_REASONS, PAYERS, PROVIDER_REASONS},
    window::RecentWindow,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Share of a handled call's time (and cost) saved per deflected call.
pub const DEFLECTION_TIME_SHARE: f64 = 0.75;

/// Minutes in one FTE working day.
pub const FTE_DAY_MINUTES: f64 = 8.0 * 60.0;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct CallCounters {
    pub calls_deflected:      u64,
    pub manual_minutes_saved: f64,
    pub cost_avoided:         f64,
    pub fte_equivalent:       f64,
}

impl CallCounters {
    /// Fold one event into the running totals.
    pub fn fold(&self, event: &CallEvent, params: &CallCenterParams) -> Self {
        if !event.status.is_deflected() {
            return *self;
        }
        let minutes = (params.handle_time_min * DEFLECTION_TIME_SHARE).max(0.0);
        let cost = ((params.handle_time_min / 60.0) * params.agent_cost_hr * DEFLECTION_TIME_SHARE)
            .max(0.0);
        let manual_minutes_saved = self.manual_minutes_saved + minutes;
        Self {
            calls_deflected: self.calls_deflected + 1,
            manual_minutes_saved,
            cost_avoided: self.cost_avoided + cost,
            fte_equivalent: manual_minutes_saved / FTE_DAY_MINUTES,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resolution {
    AiResolved,
    Unresolved,
}

pub struct CallFeed {
    caller_types: WeightedTable<CallerType>,
    resolved:     WeightedTable<CallStatus>,
    unresolved:   WeightedTable<CallStatus>,
    pub window:   RecentWindow<CallEvent>,
    pub counters: CallCounters,
    pipeline:     PipelineAnimator,
}

impl CallFeed {
    pub fn new() -> Self {
        Self {
            caller_types: WeightedTable::new(&[
                (CallerType::Provider, 0.75),
                (CallerType::Member, 0.25),
            ]),
            resolved: WeightedTable::new(&[
                (CallStatus::AiRouted, 0.7),
                (CallStatus::Resolved, 0.3),
            ]),
            unresolved: WeightedTable::new(&[
                (CallStatus::Escalated, 0.5),
                (CallStatus::InProgress, 0.5),
            ]),
            window: RecentWindow::default(),
            counters: CallCounters::default(),
            pipeline: PipelineAnimator::idle(92, 4.2, "Deflected"),
        }
    }

    pub fn caller_types(&self) -> &WeightedTable<CallerType> {
        &self.caller_types
    }

    pub fn pipeline(&self) -> &PipelineAnimator {
        &self.pipeline
    }

    /// Draw one synthetic call.
    pub fn generate(&self, ctx: &TickContext<'_>, rng: &mut FeedRng) -> CallEvent {
        let call = &ctx.params.call;
        let caller_type = self.caller_types.sample(rng);
        let reason = match caller_type {
            CallerType::Provider => *rng.pick(PROVIDER_REASONS),
            CallerType::Member   => *rng.pick(MEMBER_REASONS),
        };
        let payer = *rng.pick(PAYERS);

        let gate = WeightedTable::gate(
            call.eligible_pct * call.accuracy_pct,
            Resolution::AiResolved,
            Resolution::Unresolved,
        );
        let ai_resolved = gate.sample(rng) == Resolution::AiResolved;

        let (status, confidence, resolution_time_sec) = if ai_resolved {
            (
                self.resolved.sample(rng),
                rng.uniform(85.0, 13.0),
                rng.uniform(2.0, 5.0),
            )
        } else {
            (
                self.unresolved.sample(rng),
                rng.uniform(85.0, 10.0),
                rng.uniform(30.0, 60.0),
            )
        };

        CallEvent {
            id: event_id("evt", ctx.tick, rng),
            timestamp: ctx.timestamp,
            caller_type,
            reason: reason.to_string(),
            payer: payer.to_string(),
            status,
            ai_confidence: confidence.round() as u32,
            resolution_time_sec,
        }
    }
}

impl Default for CallFeed {
    fn default() -> Self { Self::new() }
}

impl FeedSubsystem for CallFeed {
    fn name(&self) -> &'static str { "call" }

    fn slot(&self) -> FeedSlot { FeedSlot::Call }

    fn update(
        &mut self,
        ctx: &TickContext<'_>,
        _events_in: &[SimEvent],
        rng: &mut FeedRng,
    ) -> SimResult<Vec<SimEvent>> {
        let event = self.generate(ctx, rng);

        let outcome = if event.status.is_deflected() { "Deflected" } else { "Escalated" };
        self.pipeline.trigger(event.ai_confidence, event.resolution_time_sec, outcome);
        self.counters = self.counters.fold(&event, &ctx.params.call);

        log::debug!(
            "tick={} call: {:?} {} via {} -> {:?} ({}%)",
            ctx.tick,
            event.caller_type,
            event.reason,
            event.payer,
            event.status,
            event.ai_confidence
        );

        self.window.push_front(event.clone());

        Ok(vec![
            SimEvent::CallHandled(event),
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
