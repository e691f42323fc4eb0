//! Configuration validation.
//!
//! Semantic checks on top of what serde already guarantees syntactically.
//! Returns all validation errors, not just the first, so a bad config file
//! can be fixed in one pass.

use std::net::IpAddr;

use crate::config::schema::RelayConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. `listener.bind_address`.
    pub field: String,
    /// Human-readable description of the problem.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<IpAddr>().is_err() {
        errors.push(ValidationError {
            field: "listener.bind_address".into(),
            message: format!("not an IP address: {:?}", config.listener.bind_address),
        });
    }
    if config.listener.backlog == 0 {
        errors.push(ValidationError {
            field: "listener.backlog".into(),
            message: "must be at least 1".into(),
        });
    }
    if config.listener.max_connections == 0 {
        errors.push(ValidationError {
            field: "listener.max_connections".into(),
            message: "must be at least 1".into(),
        });
    }
    if config.target.default_host.is_empty() {
        errors.push(ValidationError {
            field: "target.default_host".into(),
            message: "must not be empty".into(),
        });
    }
    if config.session.buffer_bytes == 0 {
        errors.push(ValidationError {
            field: "session.buffer_bytes".into(),
            message: "must be at least 1".into(),
        });
    }
    if config.session.idle_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "session.idle_timeout_secs".into(),
            message: "must be at least 1".into(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
