//! GoDaddy availability probe.
//!
//! Uses the `/v1/domains/available` endpoint with `sso-key` header
//! authentication. GoDaddy quotes registration prices in micro-units
//! (1/1,000,000 of the currency), converted here to whole currency units.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::checker::ProviderProbe;
use crate::error::DomainHuntError;
use crate::probes::require_credential;
use crate::types::ProbeOutcome;

const ENDPOINT: &str = "https://api.godaddy.com/v1/domains/available";

const REQUIRED_FIELDS: &[&str] = &["api_key", "api_secret"];

/// Availability payload returned by GoDaddy.
#[derive(Debug, Deserialize)]
struct AvailableResponse {
    available: bool,
    /// Price in micro-units, present for available domains
    price: Option<u64>,
}

/// Probe backed by the GoDaddy availability API.
#[derive(Clone)]
pub struct GoDaddyProbe {
    http_client: reqwest::Client,
    timeout: Duration,
}

impl GoDaddyProbe {
    /// Create a probe with the default 5 second timeout.
    pub fn new() -> Result<Self, DomainHuntError> {
        Self::with_timeout(Duration::from_secs(5))
    }

    /// Create a probe with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, DomainHuntError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                DomainHuntError::network_with_source(
                    "Failed to create GoDaddy HTTP client",
                    e.to_string(),
                )
            })?;

        Ok(Self {
            http_client,
            timeout,
        })
    }
}

/// Convert a parsed response into an outcome.
fn into_outcome(response: AvailableResponse) -> ProbeOutcome {
    ProbeOutcome {
        available: response.available,
        // only meaningful for available domains
        price: match (response.available, response.price) {
            (true, Some(micros)) => Some(micros as f64 / 1_000_000.0),
            _ => None,
        },
    }
}

#[async_trait]
impl ProviderProbe for GoDaddyProbe {
    fn name(&self) -> &str {
        "godaddy"
    }

    fn required_fields(&self) -> &[&str] {
        REQUIRED_FIELDS
    }

    async fn probe(
        &self,
        domain: &str,
        credentials: &HashMap<String, String>,
    ) -> Result<ProbeOutcome, DomainHuntError> {
        let api_key = require_credential(credentials, "api_key")?;
        let api_secret = require_credential(credentials, "api_secret")?;

        let response = self
            .http_client
            .get(ENDPOINT)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("sso-key {}:{}", api_key, api_secret),
            )
            .query(&[("domain", domain)])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DomainHuntError::timeout("GoDaddy request", self.timeout)
                } else {
                    e.into()
                }
            })?;

        let status = response.status();
        match status.as_u16() {
            200 => {
                let body: AvailableResponse = response
                    .json()
                    .await
                    .map_err(|e| DomainHuntError::parse(format!("GoDaddy response: {}", e)))?;
                Ok(into_outcome(body))
            }
            401 | 403 => Err(DomainHuntError::probe_failure(
                domain,
                "godaddy",
                "authentication rejected (check api_key/api_secret)",
            )),
            422 => Err(DomainHuntError::probe_failure(
                domain,
                "godaddy",
                "domain not eligible for an availability check",
            )),
            429 => Err(DomainHuntError::probe_failure(
                domain,
                "godaddy",
                "rate limited",
            )),
            code => Err(DomainHuntError::probe_failure(
                domain,
                "godaddy",
                format!("HTTP {}", code),
            )),
        }
    }
}
