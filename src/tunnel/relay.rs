//! Bidirectional byte relay between an established client/target pair.
//!
//! One loop per session multiplexes both sockets: a bounded read per side
//! races against an idle-timeout sleep, and whichever side becomes readable
//! first has its chunk forwarded to the opposite side before any further
//! read is issued. That single in-flight chunk per direction is the only
//! buffering; backpressure is implicit. Bytes are opaque — no protocol
//! interpretation happens here.

use std::time::Duration;

use tokio::io::{self, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Why a relay loop ended. All of these are normal end-of-session
/// conditions, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayEnd {
    /// Client reached EOF, or a read/write on the client side failed.
    ClientClosed,
    /// Target reached EOF, or a read/write on the target side failed.
    TargetClosed,
    /// Neither side became readable within the idle window.
    IdleTimeout,
}

impl std::fmt::Display for RelayEnd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelayEnd::ClientClosed => write!(f, "client closed"),
            RelayEnd::TargetClosed => write!(f, "target closed"),
            RelayEnd::IdleTimeout => write!(f, "idle timeout"),
        }
    }
}

/// Final accounting for one relay run.
#[derive(Debug)]
pub struct RelayOutcome {
    pub end: RelayEnd,
    /// Bytes forwarded client → target.
    pub client_to_target: u64,
    /// Bytes forwarded target → client.
    pub target_to_client: u64,
}

/// Copy bytes between `client` and `target` in both directions until one
/// side closes, a read/write fails, or `idle_timeout` passes without a
/// readiness event on either side.
///
/// The idle window restarts after every event. Forwarded chunks are written
/// in full (`write_all` loops on partial writes) before the next read on
/// that side. Both write halves get a best-effort shutdown before return,
/// so by the time the caller drops the streams each socket has been closed
/// exactly once.
pub async fn copy_duplex<C, T>(
    client: C,
    target: T,
    buffer_bytes: usize,
    idle_timeout: Duration,
) -> RelayOutcome
where
    C: AsyncRead + AsyncWrite + Unpin,
    T: AsyncRead + AsyncWrite + Unpin,
{
    let (mut client_rd, mut client_wr) = io::split(client);
    let (mut target_rd, mut target_wr) = io::split(target);

    let mut inbound = vec![0u8; buffer_bytes];
    let mut outbound = vec![0u8; buffer_bytes];

    let mut client_to_target = 0u64;
    let mut target_to_client = 0u64;

    let end = loop {
        tokio::select! {
            read = client_rd.read(&mut inbound) => match read {
                Ok(0) | Err(_) => break RelayEnd::ClientClosed,
                Ok(n) => {
                    if target_wr.write_all(&inbound[..n]).await.is_err() {
                        break RelayEnd::TargetClosed;
                    }
                    client_to_target += n as u64;
                }
            },
            read = target_rd.read(&mut outbound) => match read {
                Ok(0) | Err(_) => break RelayEnd::TargetClosed,
                Ok(n) => {
                    if client_wr.write_all(&outbound[..n]).await.is_err() {
                        break RelayEnd::ClientClosed;
                    }
                    target_to_client += n as u64;
                }
            },
            _ = tokio::time::sleep(idle_timeout) => break RelayEnd::IdleTimeout,
        }
    };

    // Half-open tunnels are not supported: one side ending tears down both.
    let _ = client_wr.shutdown().await;
    let _ = target_wr.shutdown().await;

    RelayOutcome {
        end,
        client_to_target,
        target_to_client,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::duplex;

    #[tokio::test]
    async fn forwards_both_directions_in_order() {
        let (mut client, client_side) = duplex(256);
        let (mut target, target_side) = duplex(256);

        let relay = tokio::spawn(copy_duplex(
            client_side,
            target_side,
            1024,
            Duration::from_secs(60),
        ));

        client.write_all(b"c1 ").await.unwrap();
        client.write_all(b"c2").await.unwrap();
        let mut buf = [0u8; 5];
        target.read_exact(&mut buf).await.unwrap();
        assert_eq!(&buf, b"c1 c2");

        target.write_all(b"t1 ").await.unwrap();
        target.write_all(b"t2").await.unwrap();
        let mut buf = [0u8; 5];
        client.read_exact(&mut buf).await.unwrap();
        assert_eq!(&buf, b"t1 t2");

        drop(client);
        let outcome = relay.await.unwrap();
        assert_eq!(outcome.end, RelayEnd::ClientClosed);
        assert_eq!(outcome.client_to_target, 5);
        assert_eq!(outcome.target_to_client, 5);
    }

    #[tokio::test]
    async fn client_eof_propagates_to_target() {
        let (client, client_side) = duplex(64);
        let (mut target, target_side) = duplex(64);

        let relay = tokio::spawn(copy_duplex(
            client_side,
            target_side,
            64,
            Duration::from_secs(60),
        ));

        drop(client);
        let outcome = relay.await.unwrap();
        assert_eq!(outcome.end, RelayEnd::ClientClosed);

        // The relay shuts its target write half down, so the target sees EOF.
        let mut buf = [0u8; 8];
        assert_eq!(target.read(&mut buf).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn target_eof_propagates_to_client() {
        let (mut client, client_side) = duplex(64);
        let (target, target_side) = duplex(64);

        let relay = tokio::spawn(copy_duplex(
            client_side,
            target_side,
            64,
            Duration::from_secs(60),
        ));

        drop(target);
        let outcome = relay.await.unwrap();
        assert_eq!(outcome.end, RelayEnd::TargetClosed);

        let mut buf = [0u8; 8];
        assert_eq!(client.read(&mut buf).await.unwrap(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn idle_window_terminates_quiet_sessions() {
        let (_client, client_side) = duplex(64);
        let (_target, target_side) = duplex(64);

        let outcome =
            copy_duplex(client_side, target_side, 64, Duration::from_secs(60)).await;
        assert_eq!(outcome.end, RelayEnd::IdleTimeout);
        assert_eq!(outcome.client_to_target, 0);
        assert_eq!(outcome.target_to_client, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn traffic_restarts_the_idle_window() {
        let (mut client, client_side) = duplex(256);
        let (mut target, target_side) = duplex(256);

        let relay = tokio::spawn(copy_duplex(
            client_side,
            target_side,
            64,
            Duration::from_secs(60),
        ));

        // Keep the session alive past several idle windows' worth of time.
        for _ in 0..5 {
            tokio::time::sleep(Duration::from_secs(40)).await;
            client.write_all(b"keepalive").await.unwrap();
            let mut buf = [0u8; 9];
            target.read_exact(&mut buf).await.unwrap();
        }

        tokio::time::sleep(Duration::from_secs(61)).await;
        let outcome = relay.await.unwrap();
        assert_eq!(outcome.end, RelayEnd::IdleTimeout);
        assert_eq!(outcome.client_to_target, 45);
    }

    #[tokio::test]
    async fn chunks_larger_than_the_pipe_are_written_in_full() {
        // A 4-byte pipe forces write_all to loop on partial writes.
        let (mut client, client_side) = duplex(4);
        let (mut target, target_side) = duplex(4);

        let relay = tokio::spawn(copy_duplex(
            client_side,
            target_side,
            1024,
            Duration::from_secs(60),
        ));

        let payload: Vec<u8> = (0..64u8).collect();
        let expected = payload.clone();
        tokio::spawn(async move {
            client.write_all(&payload).await.unwrap();
            drop(client);
        });

        let mut received = Vec::new();
        target.read_to_end(&mut received).await.unwrap();
        assert_eq!(received, expected);

        let outcome = relay.await.unwrap();
        assert_eq!(outcome.end, RelayEnd::ClientClosed);
        assert_eq!(outcome.client_to_target, 64);
    }
}
