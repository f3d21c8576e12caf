//! demo-runner: headless driver for the call-center orchestration demo.
//!
//! Usage:
//!   demo-runner --data-dir ./data                        ROI summary
//!   demo-runner sim --seed 42 --ticks 20 --preset high   live feed run
//!   demo-runner sim --ticks 5 --realtime                 paced at the preset cadence
//!   demo-runner --ipc-mode                               JSON-lines loop on stdin/stdout
//!   demo-runner batch --dir ./recordings                 batch automation analysis

use anyhow::Result;
use callsim_core::{
    batch::{compute_stats, AutomationTier, BatchOrchestrator, BatchQueue, CancelToken, EdgeFunctionClient},
    call_feed::CallCounters,
    claims_feed::ClaimsCounters,
    config::DemoConfig,
    dashboard::Dashboard,
    event::{CallEvent, ClaimsEvent, NetworkEvent, RoiEvent},
    format::{fmt_currency, fmt_decimal, fmt_pct, fmt_thousands},
    kpi::LiveKpis,
    network_feed::NetworkCounters,
    pipeline::{PipelineState, PIPELINE_STEP},
    roi::{CallCenterParams, ClaimsParams, PlatformParams, RoiResults, VolumePreset},
    roi_feed::RoiCounters,
    types::Tick,
};
use chrono::{DateTime, Utc};
use std::env;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::Duration;

/// Newest events per feed included in each UI state.
const UI_RECENT_EVENTS: usize = 5;

/// Upper bound on ticks a single IPC `tick` command may request.
const MAX_TICKS_PER_COMMAND: u64 = 10_000;

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Tick {
        count: u64,
    },
    SetPreset {
        preset: VolumePreset,
    },
    SetCallParams {
        params: CallCenterParams,
    },
    SetClaimsParams {
        params: ClaimsParams,
    },
    SetPlatformParams {
        params: PlatformParams,
    },
    Quit,
}

#[derive(serde::Serialize)]
struct FeedPipeline {
    feed:  &'static str,
    state: PipelineState,
}

#[derive(serde::Serialize)]
struct UiState {
    tick:            Tick,
    preset:          VolumePreset,
    last_updated:    DateTime<Utc>,
    results:         RoiResults,
    kpis:            LiveKpis,
    call_counters:   CallCounters,
    claims_counters: ClaimsCounters,
    network_counters: NetworkCounters,
    roi_counters:    RoiCounters,
    pipelines:       Vec<FeedPipeline>,
    recent_calls:    Vec<CallEvent>,
    recent_claims:   Vec<ClaimsEvent>,
    recent_network:  Vec<NetworkEvent>,
    recent_roi:      Vec<RoiEvent>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mode = args.get(1).map(String::as_str).unwrap_or("");
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let data_dir = parse_str_arg(&args, "--data-dir").unwrap_or("./data");

    let config = match DemoConfig::load(data_dir) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("{e}; using built-in defaults");
            DemoConfig::default()
        }
    };

    if ipc_mode {
        let seed = parse_arg(&args, "--seed", config.simulation.seed);
        let mut dashboard = Dashboard::new(config.dashboard, seed, Utc::now());
        return run_ipc_loop(&mut dashboard);
    }

    match mode {
        "sim" => run_sim(&args, &config),
        "batch" => run_batch(&args, &config),
        _ => {
            let dashboard = Dashboard::from_config(&config, Utc::now());
            print_roi_summary(&dashboard);
            Ok(())
        }
    }
}

// ── Simulation ──────────────────────────────────────────────────────────────

fn run_sim(args: &[String], config: &DemoConfig) -> Result<()> {
    let seed = parse_arg(args, "--seed", config.simulation.seed);
    let ticks = parse_arg(args, "--ticks", 20u64);
    let preset = parse_arg(args, "--preset", config.dashboard.preset);
    let realtime = args.iter().any(|a| a == "--realtime");

    println!("Call-Center AI Orchestration Demo: live feeds");
    println!("  seed:      {seed}");
    println!("  ticks:     {ticks}");
    println!("  preset:    {}", preset.name());
    println!("  realtime:  {realtime}");
    println!();

    let mut dashboard = Dashboard::new(config.dashboard, seed, Utc::now());
    if preset != dashboard.params().preset {
        dashboard.apply_preset(preset);
    }

    if realtime {
        for _ in 0..ticks {
            let events = dashboard.tick()?;
            for event in &events {
                println!("  {}", event.to_log_line()?);
            }
            let cadence = dashboard.tick_interval();
            animate_for(&mut dashboard, cadence);
        }
    } else {
        let events = dashboard.run_ticks(ticks)?;
        log::info!("{} events over {ticks} ticks", events.len());
    }
    dashboard.stop();

    print_sim_summary(&dashboard);
    Ok(())
}

/// Sleep through one cadence, stepping pipeline animations as we go.
fn animate_for(dashboard: &mut Dashboard, cadence: Duration) {
    let mut waited = Duration::ZERO;
    while waited < cadence {
        let step = PIPELINE_STEP.min(cadence - waited);
        std::thread::sleep(step);
        dashboard.engine.advance_animations(step);
        waited += step;
    }
}

fn print_sim_summary(dashboard: &Dashboard) {
    let engine = &dashboard.engine;
    let kpis = dashboard.live_kpis();

    println!("=== LIVE FEED SUMMARY ===");
    println!("  final tick:          {}", engine.current_tick());
    println!("  simulated elapsed:   {}s", engine.clock.elapsed().num_seconds());
    if let Some(call) = engine.call_feed() {
        println!("  calls deflected:     {}", fmt_thousands(call.counters.calls_deflected));
        println!("  minutes saved:       {}", fmt_decimal(call.counters.manual_minutes_saved, 1));
        println!("  call cost avoided:   {}", fmt_currency(call.counters.cost_avoided));
    }
    if let Some(claims) = engine.claims_feed() {
        println!("  claims auto-adjud.:  {}", fmt_thousands(claims.counters.auto_adjudicated));
        println!("  claims cost avoided: {}", fmt_currency(claims.counters.cost_avoided));
    }
    if let Some(network) = engine.network_feed() {
        println!("  network savings:     {}", fmt_currency(network.counters.savings_generated));
        println!("  PMPM reduction:      ${}", fmt_decimal(network.counters.pmpm_reduction, 2));
    }
    if let Some(roi) = engine.roi_feed() {
        println!("  annualized savings:  {}", fmt_currency(roi.counters.total_annualized_savings));
        println!("  live ROI multiple:   {}x", fmt_decimal(roi.counters.roi_multiple, 1));
    }

    println!();
    println!("=== BLENDED KPIs ===");
    println!("  total savings:       {}", fmt_currency(kpis.total_savings));
    println!("  ROI:                 {}x", fmt_decimal(kpis.roi, 1));
    println!("  payback:             {} months", fmt_decimal(kpis.payback_months, 1));
    println!("  FTE (call/claims):   {} / {}", fmt_decimal(kpis.call_fte, 1), fmt_decimal(kpis.claims_fte, 1));
}

// ── IPC loop ────────────────────────────────────────────────────────────────

fn run_ipc_loop(dashboard: &mut Dashboard) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                write_error(&mut stdout, &e.to_string())?;
                continue;
            }
        };

        match cmd {
            IpcCommand::Quit => break,
            IpcCommand::GetState => {}
            IpcCommand::Tick { count } => {
                if count > MAX_TICKS_PER_COMMAND {
                    write_error(
                        &mut stdout,
                        &format!("tick count {count} exceeds limit of {MAX_TICKS_PER_COMMAND}"),
                    )?;
                    continue;
                }
                if let Err(e) = dashboard.advance(count) {
                    write_error(&mut stdout, &e.to_string())?;
                    continue;
                }
            }
            IpcCommand::SetPreset { preset } => dashboard.apply_preset(preset),
            IpcCommand::SetCallParams { params } => dashboard.set_call_params(params),
            IpcCommand::SetClaimsParams { params } => dashboard.set_claims_params(params),
            IpcCommand::SetPlatformParams { params } => dashboard.set_platform_params(params),
        }

        let state = build_ui_state(dashboard);
        writeln!(stdout, "{}", serde_json::to_string(&state)?)?;
        stdout.flush()?;
    }

    dashboard.stop();
    Ok(())
}

fn write_error(stdout: &mut io::Stdout, message: &str) -> Result<()> {
    let err_json = serde_json::json!({ "error": message });
    writeln!(stdout, "{err_json}")?;
    stdout.flush()?;
    Ok(())
}

fn build_ui_state(dashboard: &Dashboard) -> UiState {
    let engine = &dashboard.engine;
    let mut pipelines = Vec::new();

    let (call_counters, recent_calls) = match engine.call_feed() {
        Some(f) => {
            pipelines.push(FeedPipeline { feed: "call", state: f.pipeline().state().clone() });
            (f.counters, f.window.iter().take(UI_RECENT_EVENTS).cloned().collect())
        }
        None => (CallCounters::default(), Vec::new()),
    };
    let (claims_counters, recent_claims) = match engine.claims_feed() {
        Some(f) => {
            pipelines.push(FeedPipeline { feed: "claims", state: f.pipeline().state().clone() });
            (f.counters, f.window.iter().take(UI_RECENT_EVENTS).cloned().collect())
        }
        None => (ClaimsCounters::default(), Vec::new()),
    };
    let (network_counters, recent_network) = match engine.network_feed() {
        Some(f) => {
            pipelines.push(FeedPipeline { feed: "network", state: f.pipeline().state().clone() });
            (f.counters, f.window.iter().take(UI_RECENT_EVENTS).cloned().collect())
        }
        None => (NetworkCounters::default(), Vec::new()),
    };
    let (roi_counters, recent_roi) = match engine.roi_feed() {
        Some(f) => {
            pipelines.push(FeedPipeline { feed: "roi", state: f.pipeline().state().clone() });
            (f.counters, f.window.iter().take(UI_RECENT_EVENTS).cloned().collect())
        }
        None => (RoiCounters::default(), Vec::new()),
    };

    UiState {
        tick: engine.current_tick(),
        preset: dashboard.params().preset,
        last_updated: dashboard.last_updated(),
        results: *dashboard.results(),
        kpis: dashboard.live_kpis(),
        call_counters,
        claims_counters,
        network_counters,
        roi_counters,
        pipelines,
        recent_calls,
        recent_claims,
        recent_network,
        recent_roi,
    }
}

// ── ROI summary ─────────────────────────────────────────────────────────────

fn print_roi_summary(dashboard: &Dashboard) {
    let params = dashboard.params();
    let results = dashboard.results();

    println!("=== ROI SUMMARY ({} volume) ===", params.preset.name());
    println!("  monthly calls:       {}", fmt_thousands(params.call.monthly_calls.round() as u64));
    println!("  eligible / accuracy: {} / {}", fmt_pct(params.call.eligible_pct), fmt_pct(params.call.accuracy_pct));
    println!("  call manual cost:    {}", fmt_currency(results.call_center.annual_manual_cost));
    println!("  call savings:        {}", fmt_currency(results.call_center.annual_savings));
    println!("  call FTE saved:      {}", fmt_decimal(results.call_center.fte_saved, 1));
    println!();
    println!("  monthly claims:      {}", fmt_thousands(params.claims.monthly_claims.round() as u64));
    println!("  claims manual cost:  {}", fmt_currency(results.claims.annual_manual_cost));
    println!("  claims savings:      {}", fmt_currency(results.claims.annual_savings));
    println!("  claims FTE saved:    {}", fmt_decimal(results.claims.fte_saved, 1));
    println!();
    println!("  platform cost:       {}", fmt_currency(params.platform.annual_platform_cost));
    println!("  total savings:       {}", fmt_currency(results.combined.total_annual_savings));
    println!("  ROI:                 {}x", fmt_decimal(results.combined.roi, 1));
    println!("  payback:             {} months", fmt_decimal(results.combined.payback_months, 1));

    println!();
    println!("=== 12-MONTH PROJECTION (accuracy sensitivity 70%) ===");
    for point in dashboard.projection(0.70) {
        println!(
            "  {} | {:>8} | {:>8}",
            point.month,
            fmt_currency(point.savings),
            fmt_currency(point.adjusted)
        );
    }
}

// ── Batch analysis ──────────────────────────────────────────────────────────

fn run_batch(args: &[String], config: &DemoConfig) -> Result<()> {
    let dir = parse_str_arg(args, "--dir").unwrap_or("./recordings");

    let mut queue = BatchQueue::new();
    let accepted = queue
        .add_dir(Path::new(dir))
        .map_err(|e| anyhow::anyhow!("Cannot read {dir}: {e}"))?;
    if queue.is_empty() {
        println!("No audio files found in {dir}");
        return Ok(());
    }

    println!("Batch automation analysis");
    println!("  dir:        {dir}");
    println!("  files:      {accepted}");
    println!("  functions:  {}", config.batch.functions_url);
    println!();

    let runtime = tokio::runtime::Runtime::new()?;
    let outcome = runtime.block_on(async {
        let cancel = CancelToken::new();
        let on_ctrl_c = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                log::info!("ctrl-c received; stopping after the current file");
                on_ctrl_c.cancel();
            }
        });

        let orchestrator = BatchOrchestrator::new(
            EdgeFunctionClient::from_config(&config.batch),
            EdgeFunctionClient::from_config(&config.batch),
            config.batch.inter_file_delay(),
        );
        orchestrator
            .run(queue.files(), &cancel, |p| {
                println!("  [{}/{}] analyzed: {}", p.index + 1, p.total, p.completed);
            })
            .await
    });

    let stats = compute_stats(
        &outcome.results,
        config.batch.monthly_call_volume,
        config.batch.unit_cost_per_call,
    );

    println!();
    println!("=== BATCH SUMMARY ===");
    println!("  run_id:          {}", outcome.run_id);
    println!("  attempted:       {}", outcome.attempted);
    println!("  analyzed:        {}", outcome.results.len());
    println!("  cancelled:       {}", outcome.cancelled);
    println!("  avg score:       {}", fmt_decimal(stats.avg_score, 1));
    for tier in AutomationTier::ALL {
        println!(
            "  {:<27} {:>3} ({}%)",
            tier.label(),
            stats.count(tier),
            fmt_decimal(stats.tier_share(tier), 0)
        );
    }
    println!("  annual savings:  {}", fmt_currency(stats.annual_savings));
    println!("  FTE equivalent:  {}", fmt_decimal(stats.fte_equivalent, 0));

    if !stats.top_candidates.is_empty() {
        println!();
        println!("=== TOP AUTOMATION CANDIDATES ===");
        for (rank, r) in stats.top_candidates.iter().enumerate() {
            println!(
                "  {:>2}. {:<32} {:>3} | {} | {}",
                rank + 1,
                r.file_name,
                r.score,
                r.tier.label(),
                r.call_type
            );
        }
    }
    Ok(())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn parse_str_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
