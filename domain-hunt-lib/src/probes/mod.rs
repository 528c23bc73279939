//! Provider probe backends.
//!
//! Each module implements [`ProviderProbe`](crate::checker::ProviderProbe)
//! against one registrar/WHOIS availability API. Probes own their HTTP
//! transport and timeout; failures are returned as errors and flattened into
//! `CheckResult` rows by the checker, never raised into the orchestrator.

/// WhoisXML API domain availability implementation
pub mod whoisxml;

/// GoDaddy availability API implementation
pub mod godaddy;

/// Namecheap `domains.check` implementation
pub mod namecheap;

// Re-export probe types for convenience
pub use godaddy::GoDaddyProbe;
pub use namecheap::NamecheapProbe;
pub use whoisxml::WhoisXmlProbe;

use std::collections::HashMap;
use std::sync::Arc;

use crate::checker::AvailabilityChecker;
use crate::error::DomainHuntError;

/// Fetch a required credential field, erroring when missing or empty.
///
/// The registry only hands usable (credential-complete) providers to the
/// checker, so this firing means the probe was invoked outside that path.
pub(crate) fn require_credential<'a>(
    credentials: &'a HashMap<String, String>,
    field: &str,
) -> Result<&'a str, DomainHuntError> {
    match credentials.get(field) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(DomainHuntError::config(format!(
            "missing credential field '{}'",
            field
        ))),
    }
}

/// Build a checker with every bundled probe backend registered.
pub fn default_checker() -> Result<AvailabilityChecker, DomainHuntError> {
    Ok(AvailabilityChecker::new()
        .with_probe(Arc::new(WhoisXmlProbe::new()?))
        .with_probe(Arc::new(GoDaddyProbe::new()?))
        .with_probe(Arc::new(NamecheapProbe::new()?)))
}
