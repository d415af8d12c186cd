// =============================================================================
// Chain Source — Live fetch with cache fallback, as a tagged result
// =============================================================================
//
// One polling cycle asks this facade for a chain and gets exactly one of:
//
//   Live(chain)     — fresh payload, cache updated
//   Cached(chain)   — live retrieval failed, last good payload served
//   Unavailable     — nothing fetchable and nothing cached
//
// The caller never sees an Err: every failure path collapses into the
// variant, and the signal core is simply not invoked on Unavailable.

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::chain::snapshot::OptionChain;
use crate::nse::cache::SnapshotCache;
use crate::nse::client::NseClient;
use crate::types::DataOrigin;

/// Outcome of one chain retrieval.
#[derive(Debug, Clone)]
pub enum ChainData {
    Live(OptionChain),
    Cached(OptionChain),
    Unavailable,
}

impl ChainData {
    /// The chain and its origin, if this cycle produced one.
    pub fn into_chain(self) -> Option<(OptionChain, DataOrigin)> {
        match self {
            Self::Live(chain) => Some((chain, DataOrigin::Live)),
            Self::Cached(chain) => Some((chain, DataOrigin::Cached)),
            Self::Unavailable => None,
        }
    }
}

/// Market data source: NSE client plus the per-symbol snapshot cache.
#[derive(Debug, Clone)]
pub struct ChainSource {
    client: NseClient,
    cache: SnapshotCache,
}

impl ChainSource {
    pub fn new(client: NseClient, cache: SnapshotCache) -> Self {
        Self { client, cache }
    }

    /// Fetch the current chain for `symbol`.
    pub async fn fetch(&self, symbol: &str) -> ChainData {
        let expiry = match self.resolve_expiry(symbol).await {
            Some(expiry) => expiry,
            None => {
                // No expiry from either the live endpoint or the cache;
                // the best we can do is serve the cached chain as-is.
                warn!(symbol, "no expiry date available, trying cache");
                return self.cached_chain(symbol);
            }
        };

        match self.client.fetch_chain(symbol, &expiry).await {
            Ok(payload) => {
                if let Err(e) = self.cache.store(symbol, &payload) {
                    warn!(symbol, error = %e, "failed to cache snapshot");
                }
                match parse_chain(payload) {
                    Ok(chain) => {
                        debug!(symbol, expiry = %expiry, "live chain retrieved");
                        ChainData::Live(chain)
                    }
                    Err(e) => {
                        warn!(symbol, error = %e, "live payload malformed, trying cache");
                        self.cached_chain(symbol)
                    }
                }
            }
            Err(e) => {
                warn!(symbol, error = %e, "live fetch failed, trying cache");
                self.cached_chain(symbol)
            }
        }
    }

    /// Nearest expiry for `symbol`: primes the session and asks the live
    /// endpoint, falling back to the expiry list inside the cached payload.
    async fn resolve_expiry(&self, symbol: &str) -> Option<String> {
        let live = async {
            self.client.prime().await?;
            let expiries = self.client.fetch_expiries(symbol).await?;
            expiries
                .into_iter()
                .next()
                .context("expiry list is empty")
        };

        match live.await {
            Ok(expiry) => Some(expiry),
            Err(e) => {
                warn!(symbol, error = %e, "live expiry lookup failed, trying cache");
                self.cache
                    .load(symbol)
                    .and_then(parse_chain)
                    .ok()
                    .and_then(|chain| chain.records.nearest_expiry().map(str::to_string))
            }
        }
    }

    fn cached_chain(&self, symbol: &str) -> ChainData {
        match self.cache.load(symbol).and_then(parse_chain) {
            Ok(chain) => {
                debug!(symbol, "serving cached chain");
                ChainData::Cached(chain)
            }
            Err(e) => {
                warn!(symbol, error = %e, "no usable cached chain");
                ChainData::Unavailable
            }
        }
    }
}

fn parse_chain(payload: serde_json::Value) -> Result<OptionChain> {
    serde_json::from_value(payload).context("failed to deserialise option chain payload")
}
