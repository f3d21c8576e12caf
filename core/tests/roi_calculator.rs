use callsim_core::roi::{
    calculate_roi, CallCenterParams, ClaimsParams, PlatformParams, VolumePreset,
    DEFAULT_PLATFORM_COST,
};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * b.abs().max(1.0)
}

#[test]
fn reference_call_center_figures() {
    let call = CallCenterParams {
        monthly_calls:          29_000.0,
        handle_time_min:        6.0,
        agent_cost_hr:          23.0,
        provider_pct:           0.75,
        eligible_pct:           0.705,
        accuracy_pct:           0.85,
        ai_process_savings_pct: 1.0,
    };
    let r = calculate_roi(&call, &ClaimsParams::default(), &PlatformParams::default());

    // 29000 × 12 × 0.1h × $23
    assert!(approx(r.call_center.annual_manual_cost, 800_400.0),
        "manual cost {}", r.call_center.annual_manual_cost);

    // 800,400 × 0.75 × 0.705 × 0.85 × 1.0
    let expected = 800_400.0 * 0.75 * 0.705 * 0.85;
    assert!(approx(r.call_center.annual_savings, expected),
        "savings {} vs {expected}", r.call_center.annual_savings);
    assert!(approx(r.call_center.annual_hours_saved, expected / 23.0));
    assert!(approx(r.call_center.fte_saved, expected / 23.0 / 2080.0));
}

#[test]
fn reference_claims_figures() {
    let r = calculate_roi(
        &CallCenterParams::default(),
        &ClaimsParams::default(),
        &PlatformParams::default(),
    );

    assert!(approx(r.claims.annual_claims, 360_000.0));
    assert!(approx(r.claims.manual_review_claims, 90_000.0));
    assert!(approx(r.claims.annual_manual_hours, 22_500.0));
    assert!(approx(r.claims.annual_manual_cost, 1_125_000.0));
    assert!(approx(r.claims.annual_savings, 562_500.0));
}

#[test]
fn combined_totals_are_exact_sums() {
    let r = calculate_roi(
        &CallCenterParams::default(),
        &ClaimsParams::default(),
        &PlatformParams::default(),
    );
    assert_eq!(
        r.combined.total_annual_savings,
        r.call_center.annual_savings + r.claims.annual_savings
    );
    assert!(approx(r.combined.roi, r.combined.total_annual_savings / DEFAULT_PLATFORM_COST));
    assert!(approx(
        r.combined.payback_months,
        DEFAULT_PLATFORM_COST / r.combined.total_annual_savings * 12.0
    ));
}

#[test]
fn savings_never_exceed_manual_cost() {
    for preset in VolumePreset::ALL {
        let (call, claims, platform) =
            preset.apply(&CallCenterParams::default(), &ClaimsParams::default());
        for pct in [0.0, 0.25, 0.5, 0.75, 1.0] {
            let call = CallCenterParams { eligible_pct: pct, accuracy_pct: pct, ..call };
            let claims = ClaimsParams { ai_labor_reduction_pct: pct, ..claims };
            let r = calculate_roi(&call, &claims, &platform);
            assert!(r.call_center.annual_savings <= r.call_center.annual_manual_cost);
            assert!(r.claims.annual_savings <= r.claims.annual_manual_cost);
        }
    }
}

#[test]
fn zero_denominators_yield_zero_not_nan() {
    let call = CallCenterParams { agent_cost_hr: 0.0, ..CallCenterParams::default() };
    let claims = ClaimsParams { fte_hourly_cost: 0.0, ..ClaimsParams::default() };
    let platform = PlatformParams { annual_platform_cost: 0.0 };
    let r = calculate_roi(&call, &claims, &platform);

    assert_eq!(r.call_center.annual_hours_saved, 0.0);
    assert_eq!(r.call_center.fte_saved, 0.0);
    assert_eq!(r.claims.fte_saved, 0.0);
    assert_eq!(r.combined.roi, 0.0);
    assert!(!r.combined.payback_months.is_nan());

    let idle = calculate_roi(
        &CallCenterParams { monthly_calls: 0.0, ..CallCenterParams::default() },
        &ClaimsParams { monthly_claims: 0.0, ..ClaimsParams::default() },
        &PlatformParams::default(),
    );
    assert_eq!(idle.combined.total_annual_savings, 0.0);
    assert_eq!(idle.combined.payback_months, 0.0);
}

#[test]
fn presets_replace_volumes_and_platform_cost() {
    let call = CallCenterParams { handle_time_min: 9.0, ..CallCenterParams::default() };
    let claims = ClaimsParams::default();

    let (c, k, p) = VolumePreset::High.apply(&call, &claims);
    assert_eq!(c.monthly_calls, 50_000.0);
    assert_eq!(k.monthly_claims, 45_000.0);
    assert_eq!(p.annual_platform_cost, 420_000.0);
    assert_eq!(c.handle_time_min, 9.0, "non-volume fields survive a preset");

    let (c, k, p) = VolumePreset::Low.apply(&c, &k);
    assert_eq!(c.monthly_calls, 15_000.0);
    assert_eq!(k.monthly_claims, 20_000.0);
    assert_eq!(p.annual_platform_cost, DEFAULT_PLATFORM_COST);
}

#[test]
fn applying_a_preset_twice_is_idempotent() {
    for preset in VolumePreset::ALL {
        let once = preset.apply(&CallCenterParams::default(), &ClaimsParams::default());
        let twice = preset.apply(&once.0, &once.1);
        assert_eq!(once, twice, "preset {} not idempotent", preset.name());
    }
}

#[test]
fn preset_names_parse() {
    assert_eq!("HIGH".parse::<VolumePreset>(), Ok(VolumePreset::High));
    assert!("extreme".parse::<VolumePreset>().is_err());
    assert!(VolumePreset::High.tick_interval() < VolumePreset::Low.tick_interval());
}
