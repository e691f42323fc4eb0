//! Per-connection session pipeline.
//!
//! A session owns exactly two sockets: the accepted client connection and,
//! once resolution succeeds, the target connection. Both live on this
//! task's stack and are closed when the session routine returns, on every
//! path. Nothing is shared across sessions.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::config::RelayConfig;
use crate::net::connection::ConnectionId;
use crate::tunnel::handshake::{
    find_header, BAD_REQUEST_RESPONSE, ROUTING_HEADER, UPGRADE_RESPONSE,
};
use crate::tunnel::relay::copy_duplex;
use crate::tunnel::target::TargetAddr;

/// Errors that end a session before the relay starts.
///
/// Both variants are session-local and surface to the client as the fixed
/// 400 response; neither affects the acceptor or any other session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Routing header present but its port is not a valid integer.
    #[error("malformed target address {0:?}")]
    MalformedAddress(String),

    /// Socket creation or connect to the resolved target failed.
    #[error("target {target} unreachable: {source}")]
    TargetUnreachable {
        target: String,
        source: std::io::Error,
    },
}

/// Handle one accepted client connection from first read to teardown.
///
/// The routing header is only honored within the very first read of the
/// client socket; a header fragmented across reads is not seen and the
/// session falls back to the configured default target.
pub async fn run(
    mut client: TcpStream,
    peer: SocketAddr,
    id: ConnectionId,
    config: Arc<RelayConfig>,
) {
    let mut preamble = vec![0u8; config.session.buffer_bytes];
    let len = match client.read(&mut preamble).await {
        // Peer closed (or errored) before sending anything: an empty
        // session, not an error.
        Ok(0) => {
            tracing::debug!(connection_id = %id, peer = %peer, "Client sent no data");
            return;
        }
        Err(e) => {
            tracing::debug!(connection_id = %id, peer = %peer, error = %e, "Client read failed");
            return;
        }
        Ok(n) => n,
    };

    let route = find_header(&preamble[..len], ROUTING_HEADER)
        .unwrap_or(&config.target.default_host);

    match establish(route, config.target.default_port).await {
        Ok((addr, target)) => {
            if let Err(e) = client.write_all(UPGRADE_RESPONSE).await {
                tracing::debug!(connection_id = %id, peer = %peer, error = %e, "Upgrade response write failed");
                return;
            }

            tracing::info!(connection_id = %id, peer = %peer, target = %addr, "Tunnel established");

            let outcome = copy_duplex(
                client,
                target,
                config.session.buffer_bytes,
                Duration::from_secs(config.session.idle_timeout_secs),
            )
            .await;

            tracing::info!(
                connection_id = %id,
                target = %addr,
                end = %outcome.end,
                client_to_target = outcome.client_to_target,
                target_to_client = outcome.target_to_client,
                "Tunnel closed"
            );
        }
        Err(e) => {
            tracing::warn!(connection_id = %id, peer = %peer, error = %e, "Session failed");
            let _ = client.write_all(BAD_REQUEST_RESPONSE).await;
        }
    }
}

/// Resolve a `host[:port]` route and open the target connection.
async fn establish(route: &str, default_port: u16) -> Result<(TargetAddr, TcpStream), SessionError> {
    let addr = TargetAddr::parse(route, default_port)?;

    let stream = TcpStream::connect((addr.host.as_str(), addr.port))
        .await
        .map_err(|source| SessionError::TargetUnreachable {
            target: addr.to_string(),
            source,
        })?;

    Ok((addr, stream))
}
