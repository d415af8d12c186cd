// =============================================================================
// OI Spike Detection — Localised ΔOI bursts near the ATM anchor
// =============================================================================
//
// A spike is a single strike whose absolute ΔOI is at least `spike_factor`
// times the mean absolute ΔOI across the near window (ATM ± one step),
// computed independently for the put and call sides.
//
// Guard: an empty near window or an all-zero side never flags.  Without the
// zero-mean guard a row value of 0 would satisfy `0 >= factor * 0` and flag
// spuriously.

use crate::chain::window::StrikeWindow;

/// Spike flags for the two option sides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpikeFlags {
    pub pe: bool,
    pub ce: bool,
}

/// Detect ΔOI spikes in the rows within one step of the ATM anchor.
pub fn detect(window: &StrikeWindow, spike_factor: f64) -> SpikeFlags {
    let pe_dois: Vec<f64> = window.near_rows().map(|r| (r.pe_doi as f64).abs()).collect();
    let ce_dois: Vec<f64> = window.near_rows().map(|r| (r.ce_doi as f64).abs()).collect();

    SpikeFlags {
        pe: side_spikes(&pe_dois, spike_factor),
        ce: side_spikes(&ce_dois, spike_factor),
    }
}

/// True iff any value is at least `factor` times the mean of the values.
fn side_spikes(abs_dois: &[f64], factor: f64) -> bool {
    if abs_dois.is_empty() {
        return false;
    }
    let mean = abs_dois.iter().sum::<f64>() / abs_dois.len() as f64;
    if mean == 0.0 {
        return false;
    }
    abs_dois.iter().any(|&v| v >= factor * mean)
}
