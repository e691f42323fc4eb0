//! Accept loop for the relay.
//!
//! # Responsibilities
//! - Accept inbound connections and spawn one detached session task each
//! - Treat accept failures as transient (log and continue)
//! - Stop accepting on the shutdown signal without touching live sessions

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::config::RelayConfig;
use crate::net::connection::ConnectionTracker;
use crate::net::listener::Listener;
use crate::tunnel::session;

/// The relay server: owns the configuration and the session tracker.
pub struct TunnelServer {
    config: Arc<RelayConfig>,
    sessions: ConnectionTracker,
}

impl TunnelServer {
    /// Create a new server with the given configuration.
    pub fn new(config: RelayConfig) -> Self {
        Self {
            config: Arc::new(config),
            sessions: ConnectionTracker::new(),
        }
    }

    /// Number of sessions currently relaying.
    pub fn active_sessions(&self) -> u64 {
        self.sessions.active_count()
    }

    /// Run the accept loop until the shutdown signal fires.
    ///
    /// Each accepted connection runs as an independent task holding its
    /// connection permit for its whole lifetime. Shutdown closes the
    /// listening socket (it is dropped here) and returns; in-flight
    /// sessions are left to finish on their own — there is no forced
    /// teardown of live tunnels.
    pub async fn run(&self, listener: Listener, mut shutdown: broadcast::Receiver<()>) {
        if let Ok(addr) = listener.local_addr() {
            tracing::info!(address = %addr, "Relay accepting connections");
        }

        loop {
            tokio::select! {
                _ = shutdown.recv() => {
                    break;
                }
                accepted = listener.accept() => match accepted {
                    Ok((stream, peer, permit)) => {
                        let guard = self.sessions.track();
                        let config = Arc::clone(&self.config);
                        tokio::spawn(async move {
                            session::run(stream, peer, guard.id(), config).await;
                            drop(guard);
                            drop(permit);
                        });
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Accept failed");
                        continue;
                    }
                },
            }
        }

        tracing::info!(
            active_sessions = self.sessions.active_count(),
            "Accept loop stopped, in-flight sessions left to finish"
        );
    }
}
