//! The live simulation engine: the heart of the demo dashboard.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   1. Call feed
//!   2. Claims feed
//!   3. Network feed
//!   4. ROI feed        (reads savings totals from 1–3)
//!
//! RULES:
//!   - Feeds execute in registration order, every tick.
//!   - Feeds read parameters through TickContext and never write them.
//!   - No feed calls another feed's functions directly.
//!   - All randomness flows through the RngBank.
//!   - Tick timestamps advance by the preset cadence, so every feed's
//!     window is strictly newest-first.

use crate::{
    call_feed::CallFeed,
    claims_feed::ClaimsFeed,
    clock::SimClock,
    dashboard::DashboardParams,
    error::{SimError, SimResult},
    event::SimEvent,
    network_feed::NetworkFeed,
    rng::{FeedRng, RngBank},
    roi_feed::RoiFeed,
    subsystem::{FeedSubsystem, TickContext},
    types::Tick,
};
use chrono::{DateTime, Utc};
use std::time::Duration;

pub struct SimEngine {
    pub clock:  SimClock,
    rng_bank:   RngBank,
    feeds:      Vec<(FeedRng, Box<dyn FeedSubsystem>)>,
}

impl SimEngine {
    pub fn new(seed: u64, started_at: DateTime<Utc>) -> Self {
        Self {
            clock:    SimClock::new(started_at),
            rng_bank: RngBank::new(seed),
            feeds:    Vec::new(),
        }
    }

    /// Build a fully wired engine with all feeds registered.
    /// Call this instead of new() + manual register() calls.
    pub fn build(seed: u64, started_at: DateTime<Utc>) -> Self {
        let mut engine = SimEngine::new(seed, started_at);

        // EXECUTION ORDER is fixed. See module docs.
        engine.register(Box::new(CallFeed::new()));
        engine.register(Box::new(ClaimsFeed::new()));
        engine.register(Box::new(NetworkFeed::new()));
        engine.register(Box::new(RoiFeed::new()));
        engine
    }

    /// Register a feed. Call in the documented execution order.
    /// The feed's RNG stream is opened here and lives for the session.
    pub fn register(&mut self, feed: Box<dyn FeedSubsystem>) {
        let rng = self.rng_bank.for_feed(feed.slot());
        self.feeds.push((rng, feed));
    }

    pub fn seed(&self) -> u64 {
        self.rng_bank.master_seed()
    }

    /// Advance one tick. This is the core simulation step.
    pub fn tick(&mut self, params: &DashboardParams) -> SimResult<Vec<SimEvent>> {
        if self.clock.stopped {
            return Err(SimError::EngineStopped);
        }

        let (current_tick, timestamp) = self.clock.advance(params.preset.tick_interval());
        let ctx = TickContext { tick: current_tick, timestamp, params };

        let mut tick_events: Vec<SimEvent> = vec![
            SimEvent::TickStarted { tick: current_tick }
        ];

        // Each feed sees all events emitted so far this tick.
        for (rng, feed) in &mut self.feeds {
            let new_events = feed.update(&ctx, &tick_events, rng)?;
            tick_events.extend(new_events);
        }

        tick_events.push(SimEvent::TickCompleted { tick: current_tick });
        Ok(tick_events)
    }

    /// Run n ticks in a loop. Used for testing and fast-forward.
    pub fn run_ticks(&mut self, n: u64, params: &DashboardParams) -> SimResult<Vec<SimEvent>> {
        let mut events = Vec::new();
        // Emit SessionInitialized before tick 1 so seed differences are observable.
        if self.clock.current_tick == 0 {
            events.push(SimEvent::SessionInitialized { seed: self.seed() });
        }
        for _ in 0..n {
            events.extend(self.tick(params)?);
        }
        log::debug!("ran {n} ticks, now at tick {}", self.clock.current_tick);
        Ok(events)
    }

    /// Step every feed's pipeline animator. Returns true while any animates.
    pub fn advance_animations(&mut self, dt: Duration) -> bool {
        let mut animating = false;
        for (_, feed) in &mut self.feeds {
            animating |= feed.advance_pipeline(dt);
        }
        animating
    }

    /// Tear down: settle animations and refuse further ticks.
    pub fn stop(&mut self) {
        for (_, feed) in &mut self.feeds {
            feed.settle();
        }
        self.clock.stop();
        log::info!("simulation stopped at tick {}", self.clock.current_tick);
    }

    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick
    }

    pub fn feed_names(&self) -> Vec<&'static str> {
        self.feeds.iter().map(|(_, f)| f.name()).collect()
    }

    fn feed<T: 'static>(&self) -> Option<&T> {
        self.feeds
            .iter()
            .find_map(|(_, feed)| feed.as_any().downcast_ref::<T>())
    }

    pub fn call_feed(&self) -> Option<&CallFeed> {
        self.feed::<CallFeed>()
    }

    pub fn claims_feed(&self) -> Option<&ClaimsFeed> {
        self.feed::<ClaimsFeed>()
    }

    pub fn network_feed(&self) -> Option<&NetworkFeed> {
        self.feed::<NetworkFeed>()
    }

    pub fn roi_feed(&self) -> Option<&RoiFeed> {
        self.feed::<RoiFeed>()
    }
}
