// =============================================================================
// Polling Orchestrator — One loop per index
// =============================================================================
//
// Each index gets its own task: fetch the chain, run the signal pipeline,
// record the result, notify.  Every failure is logged and the loop moves on
// to the next tick; nothing here can take the engine down.
// =============================================================================

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::app_state::{EngineState, SignalRecord};
use crate::notify::Notifier;
use crate::nse::ChainSource;
use crate::signals;
use crate::types::DataOrigin;

/// Run the polling loop for one index. Never returns.
pub async fn run_index_loop(
    state: Arc<EngineState>,
    source: ChainSource,
    notifier: Arc<dyn Notifier>,
    symbol: String,
    step: u32,
) {
    let refresh_secs = state.runtime_config.read().refresh_secs;
    let mut interval = tokio::time::interval(tokio::time::Duration::from_secs(refresh_secs));
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    info!(symbol = %symbol, step, refresh_secs, "polling loop started");

    loop {
        interval.tick().await;
        run_cycle(&state, &source, notifier.as_ref(), &symbol, step).await;
    }
}

/// One polling cycle for one index.
async fn run_cycle(
    state: &Arc<EngineState>,
    source: &ChainSource,
    notifier: &dyn Notifier,
    symbol: &str,
    step: u32,
) {
    let (chain, origin) = match source.fetch(symbol).await.into_chain() {
        Some(fetched) => fetched,
        None => {
            error!(symbol, "no chain data this cycle (live and cache both failed)");
            state.push_error(format!("{symbol}: no chain data available"));
            return;
        }
    };

    let params = state.runtime_config.read().analysis.clone();
    let result = signals::evaluate(&chain.records, step, &params);

    info!(
        symbol,
        origin = %origin,
        spot = result.spot,
        atm = result.atm,
        pcr = result.pcr,
        dpcr = result.dpcr,
        level = %result.level,
        signal = %result.signal,
        "cycle complete"
    );

    if result.is_actionable() {
        info!(symbol, signal = %result.signal, "actionable signal generated");
    }

    let title = notification_title(symbol, origin);
    let message = result.to_message(symbol);

    state.push_signal(SignalRecord::new(symbol, origin, result));

    if let Err(e) = notifier.send(&title, &message).await {
        warn!(symbol, error = %e, "notification delivery failed");
        state.push_error(format!("{symbol}: notification failed: {e}"));
    }
}

/// Degraded data is visible in the title so a stale feed is never mistaken
/// for a live one.
fn notification_title(symbol: &str, origin: DataOrigin) -> String {
    match origin {
        DataOrigin::Live => format!("{symbol} SIGNAL"),
        DataOrigin::Cached => format!("{symbol} SIGNAL [CACHED]"),
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn live_title_is_plain() {
        assert_eq!(notification_title("NIFTY", DataOrigin::Live), "NIFTY SIGNAL");
    }

    #[test]
    fn cached_title_is_marked() {
        assert_eq!(
            notification_title("BANKNIFTY", DataOrigin::Cached),
            "BANKNIFTY SIGNAL [CACHED]"
        );
    }
}
