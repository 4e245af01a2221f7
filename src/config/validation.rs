//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the relay count against the supported ceiling
//! - Check the line mapping covers the bank exactly once
//! - Validate value ranges (limits and deadlines nonzero, address parseable)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before the config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use crate::config::schema::{RelayConfig, MAX_RELAYS};

/// One semantic violation in a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Bind address does not parse as `host:port`.
    BadBindAddress(String),
    /// Relay count outside `1..=MAX_RELAYS`.
    BadRelayCount(usize),
    /// Line mapping length disagrees with the relay count.
    LineMapMismatch { count: usize, lines: usize },
    /// The same hardware line mapped to two relays.
    DuplicateLine(u8),
    /// Request size cap of zero would reject every request.
    ZeroRequestLimit,
    /// A transport deadline of zero would time out immediately.
    ZeroTimeout(&'static str),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::BadBindAddress(addr) => {
                write!(f, "bind address '{}' is not host:port", addr)
            }
            ValidationError::BadRelayCount(count) => {
                write!(f, "relay count {} not in 1..={}", count, MAX_RELAYS)
            }
            ValidationError::LineMapMismatch { count, lines } => {
                write!(f, "{} relays but {} mapped lines", count, lines)
            }
            ValidationError::DuplicateLine(line) => {
                write!(f, "hardware line {} mapped twice", line)
            }
            ValidationError::ZeroRequestLimit => write!(f, "max_request_bytes must be nonzero"),
            ValidationError::ZeroTimeout(name) => write!(f, "timeout '{}' must be nonzero", name),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a loaded configuration, collecting every violation.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BadBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    let count = config.relays.count;
    if count == 0 || count > MAX_RELAYS {
        errors.push(ValidationError::BadRelayCount(count));
    }
    if config.relays.lines.len() != count {
        errors.push(ValidationError::LineMapMismatch {
            count,
            lines: config.relays.lines.len(),
        });
    }
    let mut seen = HashSet::new();
    for &line in &config.relays.lines {
        if !seen.insert(line) {
            errors.push(ValidationError::DuplicateLine(line));
        }
    }

    if config.limits.max_request_bytes == 0 {
        errors.push(ValidationError::ZeroRequestLimit);
    }

    for (name, value) in [
        ("read_ms", config.timeouts.read_ms),
        ("drain_ms", config.timeouts.drain_ms),
        ("write_ms", config.timeouts.write_ms),
    ] {
        if value == 0 {
            errors.push(ValidationError::ZeroTimeout(name));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&RelayConfig::default()).is_ok());
    }

    #[test]
    fn rejects_zero_and_oversized_relay_counts() {
        let mut config = RelayConfig::default();
        config.relays.count = 0;
        config.relays.lines = vec![];
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::BadRelayCount(0)));

        config.relays.count = MAX_RELAYS + 1;
        config.relays.lines = (0..=MAX_RELAYS as u8).collect();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::BadRelayCount(MAX_RELAYS + 1)));
    }

    #[test]
    fn rejects_mismatched_line_map() {
        let mut config = RelayConfig::default();
        config.relays.lines = vec![0, 1, 2];
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::LineMapMismatch { count: 8, lines: 3 }));
    }

    #[test]
    fn rejects_duplicate_lines() {
        let mut config = RelayConfig::default();
        config.relays.count = 3;
        config.relays.lines = vec![5, 5, 6];
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::DuplicateLine(5)));
    }

    #[test]
    fn collects_every_violation() {
        let mut config = RelayConfig::default();
        config.listener.bind_address = "nonsense".into();
        config.limits.max_request_bytes = 0;
        config.timeouts.read_ms = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
