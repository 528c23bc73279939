//! Core data types for the domain hunt engine.
//!
//! This module defines the main data structures used throughout the library:
//! check results, the running summary, the search state machine states, and
//! the observer events the orchestrator emits.

use serde::{Deserialize, Serialize};

/// Result of one availability probe for one (extension, provider) pair.
///
/// `available` and `error` are mutually exclusive: a settled probe either
/// produced a definitive availability verdict or an error description, never
/// both. The checker guarantees one `CheckResult` per requested pair, so
/// partial failure is always visible in the result log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    /// The full domain that was probed (candidate + extension, e.g. "abc.com")
    pub domain: String,

    /// Name of the provider that produced this result
    pub provider: String,

    /// Whether the domain is available for registration.
    /// - `Some(true)`: available
    /// - `Some(false)`: taken
    /// - `None`: the probe failed; see `error`
    pub available: Option<bool>,

    /// Registration price quoted by the provider, when it offers one.
    /// Only meaningful when `available` is `Some(true)`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    /// Error description when the probe failed (network/auth/parse)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckResult {
    /// Build a settled result with a definitive availability verdict.
    pub fn settled(domain: impl Into<String>, provider: impl Into<String>, outcome: ProbeOutcome) -> Self {
        Self {
            domain: domain.into(),
            provider: provider.into(),
            available: Some(outcome.available),
            price: outcome.price,
            error: None,
        }
    }

    /// Build a failed result carrying the probe error, never a verdict.
    pub fn failed(
        domain: impl Into<String>,
        provider: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            domain: domain.into(),
            provider: provider.into(),
            available: None,
            price: None,
            error: Some(error.into()),
        }
    }

    /// True when the probe settled with `available == Some(true)`.
    pub fn is_available(&self) -> bool {
        self.available == Some(true)
    }
}

/// Outcome of a single provider probe, before it is attached to a domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeOutcome {
    /// Whether the provider reports the domain as registrable
    pub available: bool,
    /// Registration price, when the provider quotes one
    pub price: Option<f64>,
}

/// Running counters over the result log.
///
/// Error rows count toward neither field, so at every point
/// `available + unavailable` equals the number of settled (non-error) rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSummary {
    /// Number of results with `available == Some(true)`
    pub available: u64,
    /// Number of results with `available == Some(false)`
    pub unavailable: u64,
}

impl SearchSummary {
    /// Fold one result batch into the counters.
    pub fn absorb(&mut self, results: &[CheckResult]) {
        for result in results {
            match result.available {
                Some(true) => self.available += 1,
                Some(false) => self.unavailable += 1,
                None => {}
            }
        }
    }
}

/// Why a search run reached its terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// A candidate's batch contained at least one available result
    #[serde(rename = "found_available")]
    FoundAvailable,

    /// The generated candidate list ran out without a hit
    #[serde(rename = "exhausted")]
    Exhausted,

    /// The user cancelled the run
    #[serde(rename = "cancelled")]
    Cancelled,

    /// Candidate generation could not satisfy the request
    #[serde(rename = "capacity_exceeded")]
    CapacityExceeded,
}

/// State of the search orchestrator's state machine.
///
/// `Idle` is initial; `Stopped` is terminal for a run. Starting a new run
/// from `Stopped` resets the log and summary rather than resurrecting the
/// finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SearchState {
    Idle,
    Running,
    Paused,
    Stopped { reason: StopReason },
}

impl SearchState {
    /// True for the two states a new run may be started from.
    pub fn can_start(&self) -> bool {
        matches!(self, SearchState::Idle | SearchState::Stopped { .. })
    }
}

/// Discrete events emitted by the orchestrator for any subscribed observer
/// (console printer, network endpoint, terminal UI).
#[derive(Debug, Clone)]
pub enum SearchEvent {
    /// The state machine moved to a new state
    StateChanged(SearchState),

    /// The orchestrator began checking a candidate
    CandidateStarted(String),

    /// One candidate's full result batch was appended to the log
    ResultsAppended(Vec<CheckResult>),
}

/// Parameters for one auto-search run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Length of each generated candidate, in characters
    pub length: usize,

    /// How many distinct candidates to generate
    pub count: usize,

    /// Alphabet candidates are drawn from
    pub alphabet: Vec<char>,
}

impl SearchRequest {
    /// Request `count` candidates of `length` lowercase ASCII letters.
    pub fn lowercase(length: usize, count: usize) -> Self {
        Self {
            length,
            count,
            alphabet: ('a'..='z').collect(),
        }
    }
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopReason::FoundAvailable => write!(f, "found available"),
            StopReason::Exhausted => write!(f, "exhausted"),
            StopReason::Cancelled => write!(f, "cancelled"),
            StopReason::CapacityExceeded => write!(f, "capacity exceeded"),
        }
    }
}

impl std::fmt::Display for SearchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchState::Idle => write!(f, "idle"),
            SearchState::Running => write!(f, "running"),
            SearchState::Paused => write!(f, "paused"),
            SearchState::Stopped { reason } => write!(f, "stopped ({})", reason),
        }
    }
}
