//! Feed trait and per-tick context.
//!
//! RULE: Every feed implements FeedSubsystem.
//! The engine calls update() on each registered feed
//! in registration order, every tick.
//! Execution order is fixed and documented in engine.rs.

use crate::{
    dashboard::DashboardParams,
    error::SimResult,
    event::SimEvent,
    rng::{FeedRng, FeedSlot},
    types::Tick,
};
use chrono::{DateTime, Utc};
use std::any::Any;
use std::time::Duration;

/// Read-only view handed to every feed for one tick.
pub struct TickContext<'a> {
    pub tick:      Tick,
    pub timestamp: DateTime<Utc>,
    /// Owned by the dashboard controller. Feeds read, never write.
    pub params:    &'a DashboardParams,
}

/// The contract every feed must fulfill.
pub trait FeedSubsystem: Send {
    /// Unique stable name for this feed.
    fn name(&self) -> &'static str;

    /// RNG slot this feed draws from.
    fn slot(&self) -> FeedSlot;

    /// Called once per tick by the engine.
    ///
    /// - `ctx`:       tick number, timestamp and current parameters
    /// - `events_in`: events emitted by earlier feeds this tick
    /// - `rng`:       this feed's deterministic RNG stream
    ///
    /// Returns a vec of new events to add to the tick's event log.
    fn update(
        &mut self,
        ctx: &TickContext<'_>,
        events_in: &[SimEvent],
        rng: &mut FeedRng,
    ) -> SimResult<Vec<SimEvent>>;

    /// Step the feed's pipeline animator. Returns true while animating.
    fn advance_pipeline(&mut self, dt: Duration) -> bool;

    /// Finish any in-flight animation; called when the session stops.
    fn settle(&mut self);

    /// For downcasting in the engine's typed accessors and in tests.
    fn as_any(&self) -> &dyn Any;
}

/// Short pseudo-random event id, e.g. `evt-12-03af`.
pub(crate) fn event_id(prefix: &str, tick: Tick, rng: &mut FeedRng) -> String {
    format!("{prefix}-{tick}-{:04x}", rng.next_u64_below(0x1_0000))
}
