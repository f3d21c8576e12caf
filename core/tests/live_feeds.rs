use callsim_core::{
    call_feed::{CallCounters, FTE_DAY_MINUTES},
    claims_feed::ClaimsCounters,
    dashboard::{Dashboard, DashboardParams},
    engine::SimEngine,
    error::SimError,
    event::{ClaimStatus, ClaimsEvent, SimEvent},
    network_feed::NetworkCounters,
    roi::{CallCenterParams, ClaimsParams, PlatformParams, VolumePreset, DEFAULT_PLATFORM_COST},
    roi_feed::RoiCounters,
    window::FEED_WINDOW_CAPACITY,
};
use chrono::{TimeZone, Utc};
use std::time::Duration;

fn build_engine(seed: u64) -> SimEngine {
    SimEngine::build(seed, Utc.with_ymd_and_hms(2026, 3, 2, 8, 30, 0).unwrap())
}

#[test]
fn feeds_run_in_documented_order() {
    let engine = build_engine(1);
    assert_eq!(engine.feed_names(), vec!["call", "claims", "network", "roi"]);
}

#[test]
fn windows_cap_at_fifty_and_stay_newest_first() {
    let mut engine = build_engine(42);
    engine.run_ticks(120, &DashboardParams::default()).unwrap();

    let call = engine.call_feed().unwrap();
    let claims = engine.claims_feed().unwrap();
    let network = engine.network_feed().unwrap();
    let roi = engine.roi_feed().unwrap();

    assert_eq!(call.window.len(), FEED_WINDOW_CAPACITY);
    assert_eq!(claims.window.len(), FEED_WINDOW_CAPACITY);
    assert_eq!(network.window.len(), FEED_WINDOW_CAPACITY);
    assert!(roi.window.len() <= FEED_WINDOW_CAPACITY);

    let stamps: Vec<_> = call.window.iter().map(|e| e.timestamp).collect();
    for pair in stamps.windows(2) {
        assert!(pair[0] > pair[1], "window not strictly newest-first: {pair:?}");
    }
    assert_eq!(call.window.newest().map(|e| e.timestamp), Some(engine.clock.now));
}

/// Every counter field of every feed, in one place for monotonicity checks.
#[derive(Clone, Copy)]
struct Snapshot {
    call:    CallCounters,
    claims:  ClaimsCounters,
    network: NetworkCounters,
    roi:     RoiCounters,
}

impl Snapshot {
    fn of(engine: &SimEngine) -> Self {
        Self {
            call:    engine.call_feed().unwrap().counters,
            claims:  engine.claims_feed().unwrap().counters,
            network: engine.network_feed().unwrap().counters,
            roi:     engine.roi_feed().unwrap().counters,
        }
    }

    fn fields(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("call.calls_deflected", self.call.calls_deflected as f64),
            ("call.manual_minutes_saved", self.call.manual_minutes_saved),
            ("call.cost_avoided", self.call.cost_avoided),
            ("call.fte_equivalent", self.call.fte_equivalent),
            ("claims.auto_adjudicated", self.claims.auto_adjudicated as f64),
            ("claims.manual_reviews_avoided", self.claims.manual_reviews_avoided as f64),
            ("claims.manual_minutes_avoided", self.claims.manual_minutes_avoided),
            ("claims.cycle_time_reduction_pct", self.claims.cycle_time_reduction_pct),
            ("claims.error_rate_reduction_pct", self.claims.error_rate_reduction_pct),
            ("claims.cost_avoided", self.claims.cost_avoided),
            ("claims.fte_impact", self.claims.fte_impact),
            ("network.savings_generated", self.network.savings_generated),
            ("network.oon_avoidance_rate", self.network.oon_avoidance_rate),
            ("network.marketplace_util_lift", self.network.marketplace_util_lift),
            ("network.pmpm_reduction", self.network.pmpm_reduction),
            ("network.member_disruption_reduction_pct", self.network.member_disruption_reduction_pct),
            ("roi.total_annualized_savings", self.roi.total_annualized_savings),
            ("roi.roi_multiple", self.roi.roi_multiple),
            ("roi.payback_months", self.roi.payback_months),
            ("roi.productivity_lift_pct", self.roi.productivity_lift_pct),
            ("roi.margin_expansion_pct", self.roi.margin_expansion_pct),
        ]
    }

    fn assert_none_below(&self, prev: &Snapshot, tick: u64) {
        for ((name, now), (_, before)) in self.fields().into_iter().zip(prev.fields()) {
            assert!(now >= before, "{name} decreased at tick {tick}: {before} -> {now}");
        }
    }
}

#[test]
fn counters_never_decrease() {
    let mut engine = build_engine(9);
    let params = DashboardParams::default();
    let mut prev = Snapshot::of(&engine);

    for _ in 0..150 {
        engine.tick(&params).unwrap();
        let next = Snapshot::of(&engine);
        next.assert_none_below(&prev, engine.current_tick());
        prev = next;
    }
}

#[test]
fn counters_never_decrease_across_parameter_edits() {
    let mut dashboard = Dashboard::new(
        DashboardParams::default(),
        9,
        Utc.with_ymd_and_hms(2026, 3, 2, 8, 30, 0).unwrap(),
    );
    let mut prev = Snapshot::of(&dashboard.engine);

    for step in 0..240u64 {
        match step {
            40 => {
                let claims = ClaimsParams { manual_time_min: 5.0, ..dashboard.params().claims };
                dashboard.set_claims_params(claims);
            }
            70 => dashboard.apply_preset(VolumePreset::High),
            100 => {
                let call = CallCenterParams {
                    handle_time_min: 2.0,
                    agent_cost_hr: 10.0,
                    ..dashboard.params().call
                };
                dashboard.set_call_params(call);
            }
            130 => dashboard.set_platform_params(PlatformParams { annual_platform_cost: 2_000_000.0 }),
            160 => dashboard.apply_preset(VolumePreset::Low),
            190 => {
                let claims = ClaimsParams { manual_time_min: 0.0, fte_hourly_cost: 0.0, ..dashboard.params().claims };
                dashboard.set_claims_params(claims);
            }
            _ => {}
        }

        dashboard.tick().unwrap();
        let next = Snapshot::of(&dashboard.engine);
        next.assert_none_below(&prev, dashboard.engine.current_tick());
        prev = next;
    }

    assert!(prev.roi.roi_multiple > 0.0, "no ROI attribution in 240 ticks");
}

#[test]
fn lowering_manual_review_time_keeps_claims_fte() {
    let feed_params = ClaimsParams::default();
    let auto = |n: u64| ClaimsEvent {
        id: format!("clm-{n}"),
        timestamp: Utc.with_ymd_and_hms(2026, 3, 2, 8, 30, 0).unwrap(),
        claim_id: format!("CLM-{}", 1000 + n),
        event_type: "Prior Auth".into(),
        confidence: 92.0,
        adjudication_time_sec: 2.0,
        manual_review_avoided: true,
        status: ClaimStatus::Auto,
    };

    let mut counters = ClaimsCounters::default();
    for n in 0..4 {
        counters = counters.fold(&auto(n), &feed_params);
    }
    assert_eq!(counters.manual_minutes_avoided, 60.0);
    assert_eq!(counters.fte_impact, 60.0 / FTE_DAY_MINUTES);

    let shorter = ClaimsParams { manual_time_min: 5.0, ..feed_params };
    let after = counters.fold(&auto(4), &shorter);
    assert_eq!(after.manual_minutes_avoided, 65.0);
    assert!(after.fte_impact > counters.fte_impact);
}

#[test]
fn roi_multiple_ignores_platform_cost_slider() {
    let counters = RoiCounters::default().attribute(10_000.0);
    assert_eq!(counters.total_annualized_savings, 520_000.0);
    assert_eq!(counters.roi_multiple, (520_000.0 / DEFAULT_PLATFORM_COST * 10.0).round() / 10.0);
    assert_eq!(counters.margin_expansion_pct, 10.4);

    let mut low = DashboardParams::default();
    low.platform.annual_platform_cost = 100_000.0;
    let mut high = DashboardParams::default();
    high.platform.annual_platform_cost = 900_000.0;

    let mut a = build_engine(31);
    let mut b = build_engine(31);
    a.run_ticks(60, &low).unwrap();
    b.run_ticks(60, &high).unwrap();
    assert_eq!(a.roi_feed().unwrap().counters, b.roi_feed().unwrap().counters);
}

#[test]
fn deflection_rate_follows_eligibility_and_accuracy() {
    let mut none = DashboardParams::default();
    none.call = CallCenterParams { eligible_pct: 0.0, ..none.call };
    let mut all = DashboardParams::default();
    all.call = CallCenterParams { eligible_pct: 1.0, accuracy_pct: 1.0, ..all.call };

    let mut engine = build_engine(5);
    engine.run_ticks(60, &none).unwrap();
    assert_eq!(engine.call_feed().unwrap().counters.calls_deflected, 0);

    let mut engine = build_engine(5);
    engine.run_ticks(60, &all).unwrap();
    assert_eq!(engine.call_feed().unwrap().counters.calls_deflected, 60);
}

#[test]
fn roi_feed_sums_latest_totals_from_every_source() {
    let mut engine = build_engine(77);
    engine.run_ticks(80, &DashboardParams::default()).unwrap();

    let expected = engine.call_feed().unwrap().counters.cost_avoided
        + engine.claims_feed().unwrap().counters.cost_avoided
        + engine.network_feed().unwrap().counters.savings_generated;
    let roi = engine.roi_feed().unwrap();

    assert!((roi.cumulative_total() - expected).abs() < 1e-6);
    assert!(!roi.window.is_empty(), "no attribution in 80 ticks");
    assert!(roi.counters.roi_multiple >= 0.0);
}

#[test]
fn every_tick_is_bracketed_and_records_savings() {
    let mut engine = build_engine(3);
    let events = engine.tick(&DashboardParams::default()).unwrap();

    assert!(matches!(events.first(), Some(SimEvent::TickStarted { tick: 1 })));
    assert!(matches!(events.last(), Some(SimEvent::TickCompleted { tick: 1 })));

    let savings_feeds: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            SimEvent::SavingsRecorded { feed, .. } => Some(feed.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(savings_feeds, vec!["call", "claims", "network"]);
}

#[test]
fn tick_after_stop_is_rejected() {
    let mut engine = build_engine(11);
    let params = DashboardParams::default();
    engine.run_ticks(3, &params).unwrap();
    engine.stop();

    assert!(matches!(engine.tick(&params), Err(SimError::EngineStopped)));
    assert_eq!(engine.current_tick(), 3);
    assert!(!engine.advance_animations(Duration::from_millis(10)));
}

#[test]
fn pipelines_animate_after_each_event() {
    let mut engine = build_engine(21);
    engine.tick(&DashboardParams::default()).unwrap();

    assert!(engine.call_feed().unwrap().pipeline().is_animating());
    assert!(engine.advance_animations(Duration::from_millis(600)));
    assert_eq!(engine.call_feed().unwrap().pipeline().state().active_stage, 2);
    assert!(!engine.advance_animations(Duration::from_secs(2)));
}
