//! Upgrade-handshake parsing and the fixed wire responses.
//!
//! The handshake is a disguise, not a negotiation: whatever the client
//! sends in its first read is scanned for the routing header, and the
//! server answers with one of two canned responses. In particular the
//! `Sec-WebSocket-Accept` value below is a fixed placeholder, NOT the
//! SHA-1/base64 accept key RFC 6455 requires. Downstream clients depend on
//! this loose behavior, so it is preserved as-is.

/// Header a client uses to pick the tunnel target.
pub const ROUTING_HEADER: &str = "X-Real-Host";

/// Canned reply for an accepted tunnel.
pub const UPGRADE_RESPONSE: &[u8] = b"HTTP/1.1 101 Switching Protocols\r\n\
Upgrade: websocket\r\n\
Connection: Upgrade\r\n\
Sec-WebSocket-Accept: foo\r\n\r\n";

/// Canned reply when the target cannot be reached.
pub const BAD_REQUEST_RESPONSE: &[u8] = b"HTTP/1.1 400 Bad Request\r\n\r\n";

/// Extract a header value from a raw request preamble.
///
/// Scans `preamble` for `"<name>: "` and returns the text up to the next
/// CRLF, or up to the end of the buffer when no CRLF follows. Matching is
/// case-sensitive and byte-exact; never reads past the buffer. Returns
/// `None` when the header is absent or its value is not UTF-8.
pub fn find_header<'a>(preamble: &'a [u8], name: &str) -> Option<&'a str> {
    let mut pattern = Vec::with_capacity(name.len() + 2);
    pattern.extend_from_slice(name.as_bytes());
    pattern.extend_from_slice(b": ");

    let start = preamble
        .windows(pattern.len())
        .position(|window| window == pattern.as_slice())?
        + pattern.len();

    let rest = &preamble[start..];
    let end = rest
        .windows(2)
        .position(|window| window == b"\r\n")
        .unwrap_or(rest.len());

    std::str::from_utf8(&rest[..end]).ok()
}
