// =============================================================================
// Shared types used across the option-sentinel engine
// =============================================================================

use serde::{Deserialize, Serialize};

/// The discrete trade signal produced at the end of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    Buy,
    Sell,
    Wait,
}

impl Default for Signal {
    fn default() -> Self {
        Self::Wait
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
            Self::Wait => write!(f, "WAIT"),
        }
    }
}

/// Where the spot price sits relative to the put and call walls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    Support,
    Resistance,
    Mid,
}

impl Default for Level {
    fn default() -> Self {
        Self::Mid
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Support => write!(f, "SUPPORT"),
            Self::Resistance => write!(f, "RESISTANCE"),
            Self::Mid => write!(f, "MID"),
        }
    }
}

/// Whether a chain snapshot came from the live endpoint or the disk cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataOrigin {
    Live,
    Cached,
}

impl std::fmt::Display for DataOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Live => write!(f, "LIVE"),
            Self::Cached => write!(f, "CACHED"),
        }
    }
}
