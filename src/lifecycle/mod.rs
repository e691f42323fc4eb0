//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Parse args → Load config → Bind listener → Start accept loop
//!
//! Shutdown (shutdown.rs):
//!     Ctrl-C received → Stop accepting → In-flight sessions finish on
//!     their own (EOF/error/idle timeout) → Exit
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Shutdown only closes the listening socket; sessions are never
//!   force-terminated

pub mod shutdown;

pub use shutdown::Shutdown;
