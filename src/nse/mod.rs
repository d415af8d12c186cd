// =============================================================================
// NSE Market Data Module
// =============================================================================
//
// Everything that talks to the exchange or the disk lives here, behind the
// `ChainSource` facade.  The signal pipeline never sees an error from this
// module: a cycle yields a live chain, a cached chain, or nothing.

pub mod cache;
pub mod client;
pub mod source;

pub use cache::SnapshotCache;
pub use client::NseClient;
pub use source::{ChainData, ChainSource};
