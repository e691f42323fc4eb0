//! Target address resolution.

use crate::tunnel::session::SessionError;

/// The upstream endpoint a session tunnels to.
///
/// Derived once per session from the routing header or the configured
/// default; immutable after resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetAddr {
    pub host: String,
    pub port: u16,
}

impl TargetAddr {
    /// Parse a `host` or `host:port` string, applying `default_port` when
    /// no port suffix is present.
    ///
    /// The host is passed through as-is; name resolution is left to the
    /// connect call. A port that is not a valid u16 is a
    /// [`SessionError::MalformedAddress`].
    pub fn parse(raw: &str, default_port: u16) -> Result<Self, SessionError> {
        match raw.split_once(':') {
            None => Ok(Self {
                host: raw.to_string(),
                port: default_port,
            }),
            Some((host, port)) => {
                let port = port
                    .parse::<u16>()
                    .map_err(|_| SessionError::MalformedAddress(raw.to_string()))?;
                Ok(Self {
                    host: host.to_string(),
                    port,
                })
            }
        }
    }
}

impl std::fmt::Display for TargetAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
