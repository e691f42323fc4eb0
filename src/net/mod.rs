//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → listener.rs (accept loop, connection limits)
//!     → connection.rs (session ID, lifetime tracking)
//!     → Hand off to the tunnel layer
//! ```
//!
//! # Design Decisions
//! - Bounded accept queue prevents resource exhaustion
//! - Each session tracked so shutdown can report in-flight work
//! - SO_REUSEADDR/SO_REUSEPORT set at bind so restarts don't fail

pub mod connection;
pub mod listener;
