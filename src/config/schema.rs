//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay
//! server. All types derive Serde traits for deserialization from config
//! files. Everything here is fixed at startup; there is no runtime
//! renegotiation.

use serde::{Deserialize, Serialize};

/// Hard ceiling on the relay count; two decimal digits of index at most.
pub const MAX_RELAYS: usize = 16;

/// Root configuration for the relay server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Relay bank layout.
    pub relays: RelayBankConfig,

    /// Request size limits.
    pub limits: LimitConfig,

    /// Transport deadlines.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:80").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:80".to_string(),
        }
    }
}

/// Relay bank layout.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RelayBankConfig {
    /// Number of relays served.
    pub count: usize,

    /// Hardware output line for each relay index, in index order.
    pub lines: Vec<u8>,
}

impl Default for RelayBankConfig {
    fn default() -> Self {
        Self {
            count: 8,
            lines: (0..8).collect(),
        }
    }
}

/// Request size limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitConfig {
    /// Maximum accepted request size in bytes; anything larger is
    /// rejected before parsing.
    pub max_request_bytes: usize,
}

impl Default for LimitConfig {
    fn default() -> Self {
        Self {
            max_request_bytes: 512,
        }
    }
}

/// Transport deadlines, in milliseconds.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// How long to wait for the first request bytes.
    pub read_ms: u64,

    /// How long to wait for each further chunk before treating the
    /// request as complete.
    pub drain_ms: u64,

    /// How long a response write may take.
    pub write_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            read_ms: 5_000,
            drain_ms: 100,
            write_ms: 5_000,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
