// =============================================================================
// Runtime Configuration — Engine settings with atomic save
// =============================================================================
//
// Central configuration hub for the option-sentinel engine.  Every tunable
// parameter lives here so a deployment can be re-tuned by editing one JSON
// file.
//
// Persistence uses an atomic tmp + rename pattern to prevent corruption on
// crash.  All fields carry `#[serde(default)]` so that adding new fields
// never breaks loading an older config file.
//
// =============================================================================

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_indices() -> BTreeMap<String, u32> {
    let mut indices = BTreeMap::new();
    indices.insert("NIFTY".to_string(), 50);
    indices.insert("BANKNIFTY".to_string(), 100);
    indices
}

fn default_refresh_secs() -> u64 {
    60
}

fn default_strike_range() -> u32 {
    5
}

fn default_level_tol() -> u32 {
    1
}

fn default_spike_factor() -> f64 {
    2.0
}

fn default_cache_dir() -> String {
    ".".to_string()
}

// =============================================================================
// AnalysisParams
// =============================================================================

/// Tunable parameters for the signal-derivation pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisParams {
    /// Number of strike steps retained either side of the ATM anchor.
    #[serde(default = "default_strike_range")]
    pub strike_range: u32,

    /// Tolerance (in strike steps) for classifying spot as sitting at a wall.
    #[serde(default = "default_level_tol")]
    pub level_tol: u32,

    /// A ΔOI reading at least this many times the local mean flags a spike.
    #[serde(default = "default_spike_factor")]
    pub spike_factor: f64,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            strike_range: default_strike_range(),
            level_tol: default_level_tol(),
            spike_factor: default_spike_factor(),
        }
    }
}

// =============================================================================
// RuntimeConfig
// =============================================================================

/// Top-level runtime configuration for the option-sentinel engine.
///
/// Every field has a serde default so that older JSON files missing new fields
/// will still deserialise correctly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Indices to watch, mapped to their strike spacing (NIFTY trades in
    /// 50-point strikes, BANKNIFTY in 100-point strikes).
    #[serde(default = "default_indices")]
    pub indices: BTreeMap<String, u32>,

    /// Seconds between polling cycles.
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,

    /// Directory holding the per-index snapshot cache files.
    #[serde(default = "default_cache_dir")]
    pub cache_dir: String,

    /// Optional webhook URL for signal notifications.  Empty disables the
    /// webhook channel; the console channel is always active.
    #[serde(default)]
    pub webhook_url: String,

    /// Signal-pipeline parameters (window size, wall tolerance, spike factor).
    #[serde(default)]
    pub analysis: AnalysisParams,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            indices: default_indices(),
            refresh_secs: default_refresh_secs(),
            cache_dir: default_cache_dir(),
            webhook_url: String::new(),
            analysis: AnalysisParams::default(),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read runtime config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse runtime config from {}", path.display()))?;

        info!(
            path = %path.display(),
            indices = ?config.indices.keys().collect::<Vec<_>>(),
            refresh_secs = config.refresh_secs,
            "runtime config loaded"
        );

        Ok(config)
    }

    /// Persist the current configuration to `path` using an atomic write
    /// (write to `.tmp`, then rename).
    ///
    /// This prevents corruption if the process crashes mid-write.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = serde_json::to_string_pretty(self)
            .context("failed to serialise runtime config to JSON")?;

        let tmp_path = path.with_extension("json.tmp");

        std::fs::write(&tmp_path, &content)
            .with_context(|| format!("failed to write tmp config to {}", tmp_path.display()))?;

        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("failed to rename tmp config to {}", path.display()))?;

        info!(path = %path.display(), "runtime config saved (atomic)");
        Ok(())
    }
}
