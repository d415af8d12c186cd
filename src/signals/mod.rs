// =============================================================================
// Signals Module — Chain snapshot to trade signal
// =============================================================================
//
// Pipeline over one snapshot, run once per polling cycle per index:
//   1. Strike window around the ATM anchor        (chain::window)
//   2. Walls, PCR/ΔPCR, spike flags               (levels, ratios, spike)
//   3. Level classification                        (levels)
//   4. Decision table                              (policy)
//
// The whole pipeline is synchronous, pure, and total: malformed or sparse
// snapshots degrade to a WAIT/MID result instead of erroring.

pub mod levels;
pub mod policy;
pub mod ratios;
pub mod spike;

use serde::Serialize;

use crate::chain::snapshot::ChainRecords;
use crate::chain::window::StrikeWindow;
use crate::runtime_config::AnalysisParams;
use crate::types::{Level, Signal};

pub use spike::SpikeFlags;

/// Everything the pipeline derives from one snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct SignalResult {
    pub spot: f64,
    pub atm: f64,
    /// Strike of the put wall; `None` when no strikes fell in the window.
    pub support: Option<f64>,
    /// Strike of the call wall; `None` when no strikes fell in the window.
    pub resistance: Option<f64>,
    pub pcr: f64,
    pub dpcr: f64,
    pub spike_pe: bool,
    pub spike_ce: bool,
    pub level: Level,
    pub signal: Signal,
}

/// Run the full pipeline for one index snapshot.
pub fn evaluate(records: &ChainRecords, step: u32, params: &AnalysisParams) -> SignalResult {
    let window = StrikeWindow::build(records, step, params.strike_range);

    let walls = levels::walls(&window);
    let pcr = ratios::pcr(&window);
    let dpcr = ratios::delta_pcr(&window);
    let spikes = spike::detect(&window, params.spike_factor);

    let level = levels::classify(window.spot, walls, window.step, params.level_tol);
    let signal = policy::decide(level, spikes, pcr, dpcr);

    SignalResult {
        spot: window.spot,
        atm: window.atm,
        support: walls.support,
        resistance: walls.resistance,
        pcr,
        dpcr,
        spike_pe: spikes.pe,
        spike_ce: spikes.ce,
        level,
        signal,
    }
}

impl SignalResult {
    /// Human-readable notification body for this result.
    pub fn to_message(&self, symbol: &str) -> String {
        format!(
            "{}\nSpot: {:.2}\nSupport: {} | Resistance: {}\nPCR: {} | dPCR: {}\nSIGNAL: {}",
            symbol,
            self.spot,
            fmt_strike(self.support),
            fmt_strike(self.resistance),
            self.pcr,
            self.dpcr,
            self.signal,
        )
    }

    /// True for BUY and SELL, false for WAIT.
    pub fn is_actionable(&self) -> bool {
        self.signal != Signal::Wait
    }
}

fn fmt_strike(strike: Option<f64>) -> String {
    match strike {
        Some(s) => format!("{s:.0}"),
        None => "n/a".to_string(),
    }
}
