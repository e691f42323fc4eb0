//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind address, port, limits).
    pub listener: ListenerConfig,

    /// Fallback tunnel target for clients that send no routing header.
    pub target: TargetConfig,

    /// Per-session relay settings.
    pub session: SessionConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0").
    pub bind_address: String,

    /// Listening port.
    pub port: u16,

    /// Listen backlog passed to the OS.
    pub backlog: u32,

    /// Maximum concurrent sessions (backpressure).
    pub max_connections: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 700,
            backlog: 128,
            max_connections: 1024,
        }
    }
}

/// Default tunnel target, used when a client sends no `X-Real-Host` header.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Host to connect to when the routing header is absent.
    pub default_host: String,

    /// Port applied when the routing header (or the default host) carries
    /// no `:port` suffix.
    pub default_port: u16,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            default_host: "127.0.0.1".to_string(),
            default_port: 109,
        }
    }
}

/// Per-session relay settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Size of the per-direction copy buffer in bytes.
    pub buffer_bytes: usize,

    /// Session is torn down after this many seconds without traffic on
    /// either side.
    pub idle_timeout_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            buffer_bytes: 16 * 1024,
            idle_timeout_secs: 60,
        }
    }
}
