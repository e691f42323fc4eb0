//! wsrelay — single-hop TCP relay behind an HTTP/WebSocket-upgrade handshake.
//!
//! Inbound clients send an HTTP-looking preamble whose `X-Real-Host` header
//! names a `host[:port]` target. The relay connects to that target, answers
//! the client with a fixed 101 upgrade response, and shuttles bytes in both
//! directions until either side closes or the idle timeout elapses.
//!
//! ```text
//!     Client ──▶ net::listener ──▶ tunnel::session ──▶ target host
//!                    │                   │
//!                    │             tunnel::handshake / tunnel::target
//!                    │                   │
//!                    └── one task ──▶ tunnel::relay (duplex copy) ◀──┘
//! ```

// Core subsystems
pub mod config;
pub mod net;
pub mod tunnel;

// Cross-cutting concerns
pub mod lifecycle;

pub use config::RelayConfig;
pub use lifecycle::Shutdown;
pub use tunnel::TunnelServer;
