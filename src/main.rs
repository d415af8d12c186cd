// =============================================================================
// Option Sentinel — Main Entry Point
// =============================================================================
//
// Polls the NSE option chain for each configured index, derives
// support/resistance, PCR/ΔPCR and OI-spike signals, and fans the resulting
// BUY/SELL/WAIT out to the notification channels.
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
mod app_state;
mod chain;
mod engine;
mod notify;
mod nse;
mod runtime_config;
mod signals;
mod types;

use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::app_state::EngineState;
use crate::notify::{ConsoleNotifier, Notifier, NotifierStack, WebhookNotifier};
use crate::nse::{ChainSource, NseClient, SnapshotCache};
use crate::runtime_config::RuntimeConfig;

const CONFIG_PATH: &str = "sentinel_config.json";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("╔══════════════════════════════════════════════════════════╗");
    info!("║        Option Sentinel — Starting Up                    ║");
    info!("╚══════════════════════════════════════════════════════════╝");

    let mut config = RuntimeConfig::load(CONFIG_PATH).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        RuntimeConfig::default()
    });

    // Restrict the index set from env if requested. Symbols without a
    // configured strike step cannot be polled and are skipped.
    if let Ok(syms) = std::env::var("SENTINEL_SYMBOLS") {
        let requested: Vec<String> = syms
            .split(',')
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .collect();

        for sym in &requested {
            if !config.indices.contains_key(sym) {
                warn!(symbol = %sym, "no strike step configured for symbol, skipping");
            }
        }
        config.indices.retain(|sym, _| requested.contains(sym));
    }

    if let Ok(url) = std::env::var("SENTINEL_WEBHOOK_URL") {
        config.webhook_url = url;
    }

    anyhow::ensure!(
        !config.indices.is_empty(),
        "no indices configured — nothing to poll"
    );

    info!(
        indices = ?config.indices,
        refresh_secs = config.refresh_secs,
        "Configured indices"
    );

    // ── 2. Build shared state ────────────────────────────────────────────
    let state = Arc::new(EngineState::new(config));

    // ── 3. Build data source ─────────────────────────────────────────────
    let cache_dir = state.runtime_config.read().cache_dir.clone();
    let source = ChainSource::new(NseClient::new(), SnapshotCache::new(cache_dir));

    // ── 4. Build notification stack ──────────────────────────────────────
    let webhook_url = state.runtime_config.read().webhook_url.clone();
    let mut channels: Vec<Box<dyn Notifier>> = Vec::new();
    if !webhook_url.is_empty() {
        info!(url = %webhook_url, "webhook channel enabled");
        channels.push(Box::new(WebhookNotifier::new(webhook_url)));
    }
    channels.push(Box::new(ConsoleNotifier));
    let notifier: Arc<dyn Notifier> = Arc::new(NotifierStack::new(channels));

    // ── 5. Spawn one polling loop per index ──────────────────────────────
    let indices = state.runtime_config.read().indices.clone();
    for (symbol, step) in indices {
        let state = state.clone();
        let source = source.clone();
        let notifier = notifier.clone();
        tokio::spawn(async move {
            engine::run_index_loop(state, source, notifier, symbol, step).await;
        });
    }

    info!("All polling loops running. Press Ctrl+C to stop.");

    // ── 6. Graceful shutdown ─────────────────────────────────────────────
    tokio::signal::ctrl_c().await?;
    warn!(
        uptime_secs = state.uptime_secs(),
        "Shutdown signal received — stopping gracefully"
    );

    if let Err(e) = state.runtime_config.read().save(CONFIG_PATH) {
        warn!(error = %e, "Failed to save runtime config on shutdown");
    }

    info!("Option Sentinel shut down complete.");
    Ok(())
}
