//! Availability checking: the provider/extension fan-out.
//!
//! For one candidate, the checker probes every (extension, provider) pair
//! concurrently and waits for all of them to settle before returning, so a
//! batch's latency is bounded by its slowest probe rather than their sum.
//! Probe failures never abort the batch — every requested pair gets exactly
//! one `CheckResult` row, failed ones carrying `error` instead of a verdict.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::join_all;
use tracing::{debug, warn};

use crate::error::DomainHuntError;
use crate::registry::Provider;
use crate::types::{CheckResult, ProbeOutcome};
use crate::utils::join_domain;

/// One registration-availability probe backend.
///
/// Implementations own their HTTP transport and per-call timeout; a timeout
/// surfaces as an `Err`, never a hang. Credentials arrive per call so the
/// probe itself stays stateless with respect to configuration.
#[async_trait]
pub trait ProviderProbe: Send + Sync {
    /// Registry name this probe answers for.
    fn name(&self) -> &str;

    /// Credential fields this provider requires.
    fn required_fields(&self) -> &[&str];

    /// Query availability of one full domain.
    async fn probe(
        &self,
        domain: &str,
        credentials: &HashMap<String, String>,
    ) -> Result<ProbeOutcome, DomainHuntError>;
}

/// Stateless fan-out checker over a fixed set of probe backends.
///
/// Holds no memory between `check` calls; the extension and provider lists
/// are passed explicitly every time (the orchestrator passes its run
/// snapshot, `search_once` passes the live configuration).
#[derive(Clone, Default)]
pub struct AvailabilityChecker {
    probes: HashMap<String, Arc<dyn ProviderProbe>>,
}

impl AvailabilityChecker {
    /// Create a checker with no probe backends registered.
    pub fn new() -> Self {
        Self {
            probes: HashMap::new(),
        }
    }

    /// Register a probe backend under its provider name. Replaces any
    /// previous backend with the same name.
    pub fn register_probe(&mut self, probe: Arc<dyn ProviderProbe>) {
        self.probes.insert(probe.name().to_string(), probe);
    }

    /// Builder-style variant of [`register_probe`](Self::register_probe).
    pub fn with_probe(mut self, probe: Arc<dyn ProviderProbe>) -> Self {
        self.register_probe(probe);
        self
    }

    /// Probe every (extension, provider) pair for one candidate.
    ///
    /// Returns exactly `extensions.len() * providers.len()` results in
    /// extension-major order: all providers for the first extension, then all
    /// providers for the second, and so on. Dispatch is concurrent; the
    /// returned future resolves only once every probe has settled.
    pub async fn check(
        &self,
        candidate: &str,
        extensions: &[String],
        providers: &[Provider],
    ) -> Vec<CheckResult> {
        let mut probes = Vec::with_capacity(extensions.len() * providers.len());
        for extension in extensions {
            for provider in providers {
                probes.push(self.probe_one(join_domain(candidate, extension), provider));
            }
        }

        debug!(
            candidate,
            pairs = probes.len(),
            "dispatching availability fan-out"
        );

        // join_all preserves input order, which keeps the result list in the
        // extension-major order the contract requires.
        join_all(probes).await
    }

    async fn probe_one(&self, domain: String, provider: &Provider) -> CheckResult {
        let backend = match self.probes.get(&provider.name) {
            Some(backend) => backend,
            None => {
                return CheckResult::failed(
                    domain,
                    &provider.name,
                    format!("no probe backend registered for '{}'", provider.name),
                );
            }
        };

        match backend.probe(&domain, &provider.credentials).await {
            Ok(outcome) => CheckResult::settled(domain, &provider.name, outcome),
            Err(err) => {
                warn!(domain, provider = %provider.name, error = %err, "probe failed");
                CheckResult::failed(domain, &provider.name, err.to_string())
            }
        }
    }
}
