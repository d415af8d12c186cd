// =============================================================================
// Signal Policy — Fixed decision table over level, spikes, and ratios
// =============================================================================
//
//   BUY   level == SUPPORT    && (spike_pe || ΔPCR > 1)  && PCR >= 1
//   SELL  level == RESISTANCE && (spike_ce || ΔPCR < 0)  && PCR <= 0.9
//   WAIT  otherwise
//
// BUY and SELL are mutually exclusive because a level is never both SUPPORT
// and RESISTANCE.  No hidden state; the same inputs always produce the same
// signal.

use crate::signals::spike::SpikeFlags;
use crate::types::{Level, Signal};

/// Apply the decision table.
pub fn decide(level: Level, spikes: SpikeFlags, pcr: f64, dpcr: f64) -> Signal {
    match level {
        Level::Support if (spikes.pe || dpcr > 1.0) && pcr >= 1.0 => Signal::Buy,
        Level::Resistance if (spikes.ce || dpcr < 0.0) && pcr <= 0.9 => Signal::Sell,
        _ => Signal::Wait,
    }
}
