// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/homeward

//! Homeward - Return-to-Home Safety Monitor
//!
//! Receives battery, GPS distance and wind readings over HTTP and decides
//! whether the aircraft must switch into emergency return-to-home.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use homeward::core::{EngineEventKind, EventBus};
use homeward::{AppState, Config, DecisionEngine, FieldEncoding, VERSION};

/// Homeward - Return-to-Home Safety Monitor
#[derive(Parser, Debug)]
#[command(name = "homeward")]
#[command(author = "Homeward Project")]
#[command(version = VERSION)]
#[command(about = "Rule-based emergency return-to-home controller")]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// HTTP server port (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Address to bind (overrides config)
    #[arg(long)]
    bind: Option<String>,

    /// Treat zero or negative sensor fields as "not sent", like older sensor clients
    #[arg(long)]
    legacy_zero_sentinel: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable trace-level logging
    #[arg(long)]
    trace: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logging is not up yet, so load the config first
    let config_path = args.config.unwrap_or_else(Config::default_path);
    let mut config = Config::load_or_create(&config_path)?;

    // Override with command line args
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(bind) = args.bind {
        config.server.bind_address = bind;
    }
    if args.legacy_zero_sentinel {
        config.server.field_encoding = FieldEncoding::ZeroSentinel;
    }
    config.validate()?;

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(config.log_filter(args.debug, args.trace)?)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(args.debug)
        .with_line_number(args.debug)
        .with_ansi(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("{} v{} - Emergency Return Controller starting...", config.app_name, VERSION);
    info!("Configuration loaded from {:?}", config_path);
    info!(
        "Thresholds: battery < {:.1}%, distance > {:.1}km, wind > {:.1}km/h",
        config.thresholds.critical_battery, config.thresholds.max_distance, config.thresholds.max_wind
    );

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run(config))
}

async fn run(config: Config) -> Result<()> {
    let event_bus = Arc::new(EventBus::default());
    let engine = Arc::new(DecisionEngine::new(config.thresholds).with_event_bus(event_bus.clone()));

    tokio::spawn(log_transitions(event_bus.clone()));

    info!("Waiting for sensor data...");
    let state = AppState::new(engine, config.server.field_encoding);
    homeward::server::serve(&config.server, state, shutdown_signal()).await?;

    info!("Homeward shutdown complete");
    Ok(())
}

async fn log_transitions(event_bus: Arc<EventBus>) {
    let mut rx = event_bus.subscribe();
    loop {
        match rx.recv().await {
            Ok(event) => match event.kind {
                EngineEventKind::ModeChanged { from, to } if to.is_emergency() => {
                    warn!("Flight mode {} -> {} at {}", from, to, event.timestamp);
                }
                EngineEventKind::ModeChanged { from, to } => {
                    info!("Flight mode {} -> {} at {}", from, to, event.timestamp);
                }
                EngineEventKind::Reset => {
                    info!("Controller reset at {}", event.timestamp);
                }
                EngineEventKind::Reading(_) => {}
            },
            Err(RecvError::Lagged(skipped)) => {
                warn!("Transition logger lagged, {} events skipped", skipped);
            }
            Err(RecvError::Closed) => break,
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, cleaning up...");
}
