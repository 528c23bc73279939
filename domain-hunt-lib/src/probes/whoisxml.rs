//! WhoisXML API probe.
//!
//! Uses the Domain Availability endpoint (`da=2` mode), which returns a
//! small JSON document with a definitive `AVAILABLE`/`UNAVAILABLE` verdict.
//! WhoisXML does not quote prices.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use crate::checker::ProviderProbe;
use crate::error::DomainHuntError;
use crate::probes::require_credential;
use crate::types::ProbeOutcome;

const ENDPOINT: &str = "https://www.whoisxmlapi.com/whoisserver/WhoisService";

const REQUIRED_FIELDS: &[&str] = &["api_key"];

/// Probe backed by the WhoisXML availability API.
#[derive(Clone)]
pub struct WhoisXmlProbe {
    http_client: reqwest::Client,
    timeout: Duration,
}

impl WhoisXmlProbe {
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
                    "Failed to create WhoisXML HTTP client",
                    e.to_string(),
                )
            })?;

        Ok(Self {
            http_client,
            timeout,
        })
    }
}

/// Interpret a WhoisXML availability response body.
fn parse_availability(body: &serde_json::Value) -> Result<ProbeOutcome, DomainHuntError> {
    if let Some(message) = body
        .get("ErrorMessage")
        .and_then(|e| e.get("msg"))
        .and_then(|m| m.as_str())
    {
        return Err(DomainHuntError::parse(format!(
            "WhoisXML rejected the request: {}",
            message
        )));
    }

    let verdict = body
        .get("DomainInfo")
        .and_then(|info| info.get("domainAvailability"))
        .and_then(|a| a.as_str())
        .ok_or_else(|| {
            DomainHuntError::parse("WhoisXML response missing DomainInfo.domainAvailability")
        })?;

    match verdict {
        "AVAILABLE" => Ok(ProbeOutcome {
            available: true,
            price: None,
        }),
        "UNAVAILABLE" => Ok(ProbeOutcome {
            available: false,
            price: None,
        }),
        other => Err(DomainHuntError::parse(format!(
            "WhoisXML returned unknown availability verdict '{}'",
            other
        ))),
    }
}

#[async_trait]
impl ProviderProbe for WhoisXmlProbe {
    fn name(&self) -> &str {
        "whoisxml"
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

        let response = self
            .http_client
            .get(ENDPOINT)
            .query(&[
                ("apiKey", api_key),
                ("domainName", domain),
                ("credits", "DA"),
                ("da", "2"),
                ("outputFormat", "JSON"),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DomainHuntError::timeout("WhoisXML request", self.timeout)
                } else {
                    e.into()
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainHuntError::probe_failure(
                domain,
                "whoisxml",
                format!("HTTP {}", status.as_u16()),
            ));
        }

        let body: serde_json::Value = response.json().await?;
        parse_availability(&body)
    }
}
