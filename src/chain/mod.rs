// =============================================================================
// Option Chain Module
// =============================================================================
//
// Typed model of the exchange's option-chain payload and the strike-window
// builder that turns a raw snapshot into the bounded, ordered view the signal
// pipeline operates on.

pub mod snapshot;
pub mod window;

pub use snapshot::{ChainRecords, OptionChain, SideQuote, StrikeEntry};
pub use window::{StrikeRow, StrikeWindow};
