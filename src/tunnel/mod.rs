//! Tunnel subsystem: handshake, target resolution, session, relay.
//!
//! # Data Flow
//! ```text
//! Accepted client connection
//!     → session.rs (one bounded first read)
//!     → handshake.rs (scan for X-Real-Host, pick canned response)
//!     → target.rs (host[:port] → TargetAddr, default port applied)
//!     → TcpStream::connect (target connection, session-local)
//!     → relay.rs (duplex byte copy until EOF/error/idle timeout)
//! ```
//!
//! # Design Decisions
//! - The handshake is a single read; fragmented headers fall back to the
//!   default target (documented limitation)
//! - Target state lives on the session task's stack, never shared
//! - Relay termination is a normal outcome, not an error

pub mod handshake;
pub mod relay;
pub mod server;
pub mod session;
pub mod target;

pub use server::TunnelServer;
pub use session::SessionError;
pub use target::TargetAddr;
