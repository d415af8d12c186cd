// =============================================================================
// Snapshot Cache — Last good chain payload per index, on disk
// =============================================================================
//
// When the live endpoint misbehaves (rate limits, session resets, outages)
// the engine keeps running on the most recent successful payload.  The raw
// JSON is cached exactly as fetched, so a cached cycle sees the same document
// a live cycle saw, expiry dates included.
//
// Writes are atomic (tmp + rename) so a crash mid-write never corrupts the
// fallback.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

/// On-disk cache of the last successfully fetched chain payload per symbol.
#[derive(Debug, Clone)]
pub struct SnapshotCache {
    dir: PathBuf,
}

impl SnapshotCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Cache file for `symbol`, e.g. `nifty_chain.json`.
    pub fn path_for(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{}_chain.json", symbol.to_lowercase()))
    }

    /// Load the cached payload for `symbol`.
    pub fn load(&self, symbol: &str) -> Result<serde_json::Value> {
        let path = self.path_for(symbol);

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read snapshot cache {}", path.display()))?;

        let value: serde_json::Value = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse snapshot cache {}", path.display()))?;

        debug!(symbol, path = %path.display(), "snapshot cache loaded");
        Ok(value)
    }

    /// Persist `payload` as the last good snapshot for `symbol` using an
    /// atomic write (write to `.tmp`, then rename).
    pub fn store(&self, symbol: &str, payload: &serde_json::Value) -> Result<()> {
        if !self.dir.as_os_str().is_empty() && !self.dir.exists() {
            std::fs::create_dir_all(&self.dir).with_context(|| {
                format!("failed to create cache directory {}", self.dir.display())
            })?;
        }

        let path = self.path_for(symbol);
        let tmp_path = path.with_extension("json.tmp");

        let content = serde_json::to_string(payload)
            .context("failed to serialise snapshot payload")?;

        std::fs::write(&tmp_path, &content)
            .with_context(|| format!("failed to write tmp snapshot to {}", tmp_path.display()))?;

        std::fs::rename(&tmp_path, &path)
            .with_context(|| format!("failed to rename tmp snapshot to {}", path.display()))?;

        debug!(symbol, path = %path.display(), "snapshot cached (atomic)");
        Ok(())
    }
}
