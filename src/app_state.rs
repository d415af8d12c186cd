// =============================================================================
// Central Engine State — option-sentinel
// =============================================================================
//
// Shared observability state for the polling tasks: the runtime config, an
// auditable trail of recent signal evaluations, the latest record per index,
// and a bounded error log.
//
// Thread safety:
//   - An atomic counter for lock-free version tracking.
//   - parking_lot::RwLock for all mutable shared collections.
// =============================================================================

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use serde::Serialize;

use crate::runtime_config::RuntimeConfig;
use crate::signals::SignalResult;
use crate::types::DataOrigin;

/// Maximum number of recent signal records to retain.
const MAX_RECENT_SIGNALS: usize = 100;
/// Maximum number of recent errors to retain.
const MAX_RECENT_ERRORS: usize = 50;

// =============================================================================
// Records
// =============================================================================

/// Auditable record of one signal evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct SignalRecord {
    /// Unique identifier for this evaluation (UUID v4).
    pub id: String,

    /// Index the evaluation pertains to.
    pub symbol: String,

    /// Whether the underlying chain came from the live endpoint or cache.
    pub origin: DataOrigin,

    /// The derived signal fields.
    #[serde(flatten)]
    pub result: SignalResult,

    /// ISO 8601 timestamp of when this record was created.
    pub created_at: String,
}

impl SignalRecord {
    pub fn new(symbol: impl Into<String>, origin: DataOrigin, result: SignalResult) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            symbol: symbol.into(),
            origin,
            result,
            created_at: Utc::now().to_rfc3339(),
        }
    }
}

/// A recorded error event.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorRecord {
    pub message: String,
    /// ISO 8601 timestamp.
    pub at: String,
}

// =============================================================================
// EngineState
// =============================================================================

/// Shared state across all polling tasks via `Arc<EngineState>`.
pub struct EngineState {
    /// Monotonically increasing version counter, incremented on every
    /// meaningful state mutation.
    pub state_version: AtomicU64,

    pub runtime_config: Arc<RwLock<RuntimeConfig>>,

    /// Ring buffer of recent signal evaluations, newest last.
    pub recent_signals: RwLock<Vec<SignalRecord>>,

    /// Latest record per index.
    pub last_signals: RwLock<HashMap<String, SignalRecord>>,

    /// Ring buffer of recent errors, newest last.
    pub recent_errors: RwLock<Vec<ErrorRecord>>,

    /// Instant when the engine was started. Used for uptime reporting.
    pub start_time: std::time::Instant,
}

impl EngineState {
    pub fn new(config: RuntimeConfig) -> Self {
        Self {
            state_version: AtomicU64::new(1),
            runtime_config: Arc::new(RwLock::new(config)),
            recent_signals: RwLock::new(Vec::new()),
            last_signals: RwLock::new(HashMap::new()),
            recent_errors: RwLock::new(Vec::new()),
            start_time: std::time::Instant::now(),
        }
    }

    // ── Version Management ──────────────────────────────────────────────

    /// Atomically increment the state version after a meaningful mutation.
    pub fn increment_version(&self) -> u64 {
        self.state_version.fetch_add(1, Ordering::SeqCst)
    }

    pub fn current_state_version(&self) -> u64 {
        self.state_version.load(Ordering::SeqCst)
    }

    // ── Signal Trail ────────────────────────────────────────────────────

    /// Record a signal evaluation. The ring buffer is capped at
    /// [`MAX_RECENT_SIGNALS`]; oldest entries are evicted first.
    pub fn push_signal(&self, record: SignalRecord) {
        {
            let mut last = self.last_signals.write();
            last.insert(record.symbol.clone(), record.clone());
        }
        {
            let mut recent = self.recent_signals.write();
            recent.push(record);
            let len = recent.len();
            if len > MAX_RECENT_SIGNALS {
                recent.drain(0..len - MAX_RECENT_SIGNALS);
            }
        }
        self.increment_version();
    }

    /// Latest record for `symbol`, if any cycle has completed.
    pub fn last_signal(&self, symbol: &str) -> Option<SignalRecord> {
        self.last_signals.read().get(symbol).cloned()
    }

    // ── Error Logging ───────────────────────────────────────────────────

    /// Record an error message. Capped at [`MAX_RECENT_ERRORS`].
    pub fn push_error(&self, message: impl Into<String>) {
        let mut recent = self.recent_errors.write();
        recent.push(ErrorRecord {
            message: message.into(),
            at: Utc::now().to_rfc3339(),
        });
        let len = recent.len();
        if len > MAX_RECENT_ERRORS {
            recent.drain(0..len - MAX_RECENT_ERRORS);
        }
        drop(recent);
        self.increment_version();
    }

    // ── Timing ──────────────────────────────────────────────────────────

    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
