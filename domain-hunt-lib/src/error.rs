//! Error handling for search orchestration.
//!
//! This module defines a comprehensive error type that covers all the different
//! ways a domain hunt can fail, from configuration mistakes to probe failures.

use std::fmt;

/// Main error type for domain hunt operations.
///
/// Configuration-mutation errors (`Duplicate*`, `Invalid*`, `Unknown*`) are
/// synchronous and surfaced directly to the caller with no partial mutation.
/// Probe failures are always recovered locally into a `CheckResult` row and
/// never abort a batch; the variants here exist so probes can describe what
/// went wrong before the checker flattens them.
#[derive(Debug, Clone)]
pub enum DomainHuntError {
    /// Extension token is not a valid TLD suffix (must start with `.`)
    InvalidExtension {
        extension: String,
        reason: String,
    },

    /// Extension is already in the configured set
    DuplicateExtension {
        extension: String,
    },

    /// Extension is not in the configured set
    UnknownExtension {
        extension: String,
    },

    /// A provider with this name is already registered
    DuplicateProvider {
        name: String,
    },

    /// No provider with this name is registered
    UnknownProvider {
        name: String,
    },

    /// Candidate name is empty or malformed
    InvalidCandidate {
        candidate: String,
        reason: String,
    },

    /// Requested more distinct candidates than the alphabet can produce
    CapacityExceeded {
        requested: usize,
        capacity: u128,
    },

    /// A state-machine operation was called from a state that forbids it
    InvalidTransition {
        from: String,
        operation: String,
    },

    /// A provider probe failed (network/auth/parse); captured per-result
    ProbeFailure {
        domain: String,
        provider: String,
        message: String,
    },

    /// Network-related errors (connection, DNS, TLS)
    NetworkError {
        message: String,
        source: Option<String>,
    },

    /// Timeout errors when operations take too long
    Timeout {
        operation: String,
        duration: std::time::Duration,
    },

    /// Response parsing errors (JSON or provider-specific formats)
    ParseError {
        message: String,
    },

    /// Configuration errors (invalid settings, bad generation request, etc.)
    ConfigError {
        message: String,
    },

    /// Persistence collaborator failures (read/write of config documents)
    StoreError {
        key: String,
        message: String,
    },

    /// Generic internal errors that don't fit other categories
    Internal {
        message: String,
    },
}

impl DomainHuntError {
    /// Create a new invalid extension error.
    pub fn invalid_extension<E: Into<String>, R: Into<String>>(extension: E, reason: R) -> Self {
        Self::InvalidExtension {
            extension: extension.into(),
            reason: reason.into(),
        }
    }

    /// Create a new duplicate extension error.
    pub fn duplicate_extension<E: Into<String>>(extension: E) -> Self {
        Self::DuplicateExtension {
            extension: extension.into(),
        }
    }

    /// Create a new unknown extension error.
    pub fn unknown_extension<E: Into<String>>(extension: E) -> Self {
        Self::UnknownExtension {
            extension: extension.into(),
        }
    }

    /// Create a new duplicate provider error.
    pub fn duplicate_provider<N: Into<String>>(name: N) -> Self {
        Self::DuplicateProvider { name: name.into() }
    }

    /// Create a new unknown provider error.
    pub fn unknown_provider<N: Into<String>>(name: N) -> Self {
        Self::UnknownProvider { name: name.into() }
    }

    /// Create a new invalid candidate error.
    pub fn invalid_candidate<C: Into<String>, R: Into<String>>(candidate: C, reason: R) -> Self {
        Self::InvalidCandidate {
            candidate: candidate.into(),
            reason: reason.into(),
        }
    }

    /// Create a new capacity exceeded error.
    pub fn capacity_exceeded(requested: usize, capacity: u128) -> Self {
        Self::CapacityExceeded {
            requested,
            capacity,
        }
    }

    /// Create a new invalid transition error.
    pub fn invalid_transition<F: Into<String>, O: Into<String>>(from: F, operation: O) -> Self {
        Self::InvalidTransition {
            from: from.into(),
            operation: operation.into(),
        }
    }

    /// Create a new probe failure error.
    pub fn probe_failure<D: Into<String>, P: Into<String>, M: Into<String>>(
        domain: D,
        provider: P,
        message: M,
    ) -> Self {
        Self::ProbeFailure {
            domain: domain.into(),
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a new network error.
    pub fn network<M: Into<String>>(message: M) -> Self {
        Self::NetworkError {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new network error with source information.
    pub fn network_with_source<M: Into<String>, S: Into<String>>(message: M, source: S) -> Self {
        Self::NetworkError {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a new timeout error.
    pub fn timeout<O: Into<String>>(operation: O, duration: std::time::Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Create a new parse error.
    pub fn parse<M: Into<String>>(message: M) -> Self {
        Self::ParseError {
            message: message.into(),
        }
    }

    /// Create a new configuration error.
    pub fn config<M: Into<String>>(message: M) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a new store error.
    pub fn store<K: Into<String>, M: Into<String>>(key: K, message: M) -> Self {
        Self::StoreError {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create a new internal error.
    pub fn internal<M: Into<String>>(message: M) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl fmt::Display for DomainHuntError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidExtension { extension, reason } => {
                write!(f, "Invalid extension '{}': {}", extension, reason)
            }
            Self::DuplicateExtension { extension } => {
                write!(f, "Extension '{}' is already configured", extension)
            }
            Self::UnknownExtension { extension } => {
                write!(f, "Extension '{}' is not configured", extension)
            }
            Self::DuplicateProvider { name } => {
                write!(f, "Provider '{}' is already registered", name)
            }
            Self::UnknownProvider { name } => {
                write!(f, "Provider '{}' is not registered", name)
            }
            Self::InvalidCandidate { candidate, reason } => {
                write!(f, "Invalid candidate '{}': {}", candidate, reason)
            }
            Self::CapacityExceeded {
                requested,
                capacity,
            } => {
                write!(
                    f,
                    "Cannot generate {} distinct candidates: alphabet/length only allows {}",
                    requested, capacity
                )
            }
            Self::InvalidTransition { from, operation } => {
                write!(f, "Cannot {} while the search is {}", operation, from)
            }
            Self::ProbeFailure {
                domain,
                provider,
                message,
            } => {
                write!(f, "Probe for '{}' via {} failed: {}", domain, provider, message)
            }
            Self::NetworkError { message, source } => {
                if let Some(source) = source {
                    write!(f, "Network error: {} (source: {})", message, source)
                } else {
                    write!(f, "Network error: {}", message)
                }
            }
            Self::Timeout {
                operation,
                duration,
            } => {
                write!(f, "Timeout after {:?} during: {}", duration, operation)
            }
            Self::ParseError { message } => {
                write!(f, "Parse error: {}", message)
            }
            Self::ConfigError { message } => {
                write!(f, "Configuration error: {}", message)
            }
            Self::StoreError { key, message } => {
                write!(f, "Store error for document '{}': {}", key, message)
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for DomainHuntError {}

// Implement From conversions for common error types
impl From<reqwest::Error> for DomainHuntError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::timeout("HTTP request", std::time::Duration::from_secs(30))
        } else if err.is_connect() {
            Self::network_with_source("Connection failed", err.to_string())
        } else {
            Self::network_with_source("HTTP request failed", err.to_string())
        }
    }
}

impl From<serde_json::Error> for DomainHuntError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError {
            message: format!("JSON parsing failed: {}", err),
        }
    }
}

impl From<std::io::Error> for DomainHuntError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal {
            message: format!("I/O error: {}", err),
        }
    }
}
