//! Replays scripted tick/interrupt scenarios through the action tracker and
//! prints every lifecycle signal, to check timing estimates against what
//! the game actually did.

mod scenario;

use std::path::PathBuf;

use action_progress_core::{ActionProgressConfig, ActionSignal, SignalHandler, config};
use action_progress_types::formatting::{format_fraction_pct, format_remaining_ms, format_steps};
use clap::Parser;
use tracing_subscriber::filter::EnvFilter;

use scenario::{Replay, Scenario, TickReport};

#[derive(Parser)]
#[command(version, about = "Replay an action progress scenario")]
struct Cli {
    /// Scenario TOML file
    #[arg(short, long)]
    scenario: PathBuf,

    /// Settings file (overrides the scenario's inline [config])
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Use the stored user settings when no other config is given
    #[arg(long)]
    user_config: bool,

    /// Print signals as JSON lines instead of text
    #[arg(long)]
    json: bool,
}

/// Prints signals as they are published.
struct SignalPrinter {
    json: bool,
}

impl SignalHandler for SignalPrinter {
    fn handle_signal(&mut self, signal: &ActionSignal) {
        if self.json {
            match serde_json::to_string(signal) {
                Ok(line) => println!("{line}"),
                Err(e) => tracing::error!(error = %e, "Failed to serialize signal"),
            }
            return;
        }
        println!("{}", describe(signal));
    }
}

fn describe(signal: &ActionSignal) -> String {
    match signal {
        ActionSignal::ActionStarted {
            action,
            product_id,
            count,
            start_tick,
            end_tick,
        } => format!(
            "started  {action} x{count} (product {product_id}) ticks {start_tick} -> {end_tick}"
        ),
        ActionSignal::ActionStopped {
            action,
            product_id,
            count,
            start_tick,
            end_tick,
            completed,
        } => format!(
            "stopped  {action} x{count} (product {product_id}) ticks {start_tick} -> {end_tick} completed={completed}"
        ),
    }
}

fn print_progress(report: &TickReport) {
    let Some(progress) = &report.progress else {
        println!("tick {:>6}  idle", report.tick);
        return;
    };
    println!(
        "tick {:>6}  {}  {}  {:>4}  {}",
        report.tick,
        progress.action,
        format_steps(progress.processed, progress.count),
        format_fraction_pct(progress.fraction),
        format_remaining_ms(progress.remaining_ms, "due"),
    );
}

fn resolve_config(cli: &Cli, scenario: &Scenario) -> ActionProgressConfig {
    if let Some(path) = &cli.config {
        return config::load_or_default(Some(path));
    }
    if let Some(inline) = &scenario.config {
        return inline.clone();
    }
    if cli.user_config {
        return config::load_or_default(None);
    }
    ActionProgressConfig::default()
}

/// Initialize logging, writing to ACTION_PROGRESS_LOG_PATH if set, otherwise stderr.
fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    if let Ok(path) = std::env::var("ACTION_PROGRESS_LOG_PATH")
        && let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
    {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_ansi(false)
            .with_writer(file)
            .init();
        return;
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), String> {
    init_logging();
    let cli = Cli::parse();

    let scenario = Scenario::load(&cli.scenario).map_err(|e| e.to_string())?;
    let config = resolve_config(&cli, &scenario);
    let start_ms = scenario
        .start_ms
        .unwrap_or_else(|| chrono::Utc::now().timestamp_millis());

    tracing::info!(
        scenario = %cli.scenario.display(),
        steps = scenario.steps.len(),
        start_tick = scenario.start_tick,
        "Replaying scenario"
    );

    let mut replay = Replay::new(config, scenario.start_tick, start_ms);
    replay.add_handler(Box::new(SignalPrinter { json: cli.json }));

    let json = cli.json;
    let signals = replay.run(&scenario.steps, |report| {
        if !json {
            print_progress(report);
        }
    });

    let started = signals
        .iter()
        .filter(|s| matches!(s, ActionSignal::ActionStarted { .. }))
        .count();
    tracing::info!(
        started,
        stopped = signals.len() - started,
        still_active = replay.tracker().is_active(),
        "Replay finished"
    );

    Ok(())
}
