use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, NaiveTime};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use hearth_cli::commands::click::ClickTarget;
use hearth_cli::commands::watch::WatchOptions;
use hearth_cli::commands::{click, month, navigate, timeline, util, watch};
use hearth_cli::events::load_events;
use hearth_cli::{Cli, Commands, Config};
use hearth_core::{Event, Key};

/// Load config and the events it points at.
fn load(cli: &Cli) -> Result<(Config, Arc<[Event]>)> {
    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let path = cli.events.as_deref().unwrap_or(config.events_path.as_path());
    let events = load_events(path)?;
    Ok((config, events))
}

fn resolve_date(arg: Option<&str>, today: NaiveDate) -> Result<NaiveDate> {
    arg.map_or(Ok(today), |s| util::parse_date(s, today))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so command output stays parseable
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let clock = Local::now().naive_local();
    let today = match cli.today.as_deref() {
        Some(s) => util::parse_date(s, clock.date()).context("invalid --today")?,
        None => clock.date(),
    };
    let now = today.and_time(clock.time());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Some(Commands::Month { date, json }) => {
            let (_config, events) = load(&cli)?;
            let date = resolve_date(date.as_deref(), today)?;
            month::run(&mut out, events, date, today, *json)?;
        }
        Some(Commands::Week { date, json }) => {
            let (config, events) = load(&cli)?;
            let date = resolve_date(date.as_deref(), today)?;
            timeline::run_week(&mut out, events, date, now, config.week_scale(), *json)?;
        }
        Some(Commands::Day { date, json }) => {
            let (config, events) = load(&cli)?;
            let date = resolve_date(date.as_deref(), today)?;
            timeline::run_day(&mut out, events, date, now, config.day_scale(), *json)?;
        }
        Some(Commands::Navigate { keys, date }) => {
            let keys = keys
                .iter()
                .map(|k| k.parse::<Key>())
                .collect::<Result<Vec<_>, _>>()?;
            let (_config, events) = load(&cli)?;
            let date = resolve_date(date.as_deref(), today)?;
            navigate::run(&mut out, events, date, today, &keys)?;
        }
        Some(Commands::Click {
            view,
            column,
            y,
            at,
            date,
        }) => {
            let target = match (y, at) {
                (Some(y), _) => ClickTarget::Offset(*y),
                (None, Some(at)) => ClickTarget::At(
                    NaiveTime::parse_from_str(at, "%H:%M")
                        .with_context(|| format!("invalid --at {at}, expected HH:MM"))?,
                ),
                (None, None) => anyhow::bail!("either --y or --at is required"),
            };
            let (config, events) = load(&cli)?;
            let date = resolve_date(date.as_deref(), today)?;
            let scale = config.timeline_scale(*view);
            click::run(&mut out, events, *view, date, today, *column, target, scale)?;
        }
        Some(Commands::Watch { view, ticks }) => {
            let (config, events) = load(&cli)?;
            let options = WatchOptions {
                kind: *view,
                scale: config.timeline_scale(*view),
                period: config.refresh_period(),
                ticks: *ticks,
            };
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .context("failed to start runtime")?;
            runtime.block_on(watch::run(&mut out, events, &options, || {
                Local::now().naive_local()
            }))?;
        }
        None => {
            let (_config, events) = load(&cli)?;
            month::run(&mut out, events, today, today, false)?;
        }
    }

    out.flush()?;
    Ok(())
}
