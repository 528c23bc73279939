//! Namecheap availability probe.
//!
//! Uses the `namecheap.domains.check` command, which answers in XML. The
//! response shape is small and stable, so it is read with a tolerant
//! attribute scan rather than pulling in an XML parser — the same approach
//! the WHOIS world forces for its free-text responses.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use crate::checker::ProviderProbe;
use crate::error::DomainHuntError;
use crate::probes::require_credential;
use crate::types::ProbeOutcome;

const ENDPOINT: &str = "https://api.namecheap.com/xml.response";

const REQUIRED_FIELDS: &[&str] = &["api_user", "api_key", "username", "client_ip"];

/// Probe backed by the Namecheap API.
#[derive(Clone)]
pub struct NamecheapProbe {
    http_client: reqwest::Client,
    timeout: Duration,
}

impl NamecheapProbe {
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
                    "Failed to create Namecheap HTTP client",
                    e.to_string(),
                )
            })?;

        Ok(Self {
            http_client,
            timeout,
        })
    }
}

/// Pull a double-quoted attribute value out of an XML tag by name.
fn extract_attribute<'a>(tag: &'a str, attribute: &str) -> Option<&'a str> {
    let marker = format!("{}=\"", attribute);
    let start = tag.find(&marker)? + marker.len();
    let end = tag[start..].find('"')? + start;
    Some(&tag[start..end])
}

/// Interpret a `namecheap.domains.check` XML response for one domain.
fn parse_check_response(body: &str) -> Result<ProbeOutcome, DomainHuntError> {
    if body.contains("Status=\"ERROR\"") {
        // Error text sits between <Error ...> and </Error>
        let message = body
            .find("</Error>")
            .and_then(|end| {
                let upto = &body[..end];
                upto.rfind('>').map(|start| upto[start + 1..].trim())
            })
            .filter(|m| !m.is_empty())
            .unwrap_or("unspecified API error");
        return Err(DomainHuntError::parse(format!(
            "Namecheap rejected the request: {}",
            message
        )));
    }

    let tag_start = body
        .find("<DomainCheckResult")
        .ok_or_else(|| DomainHuntError::parse("Namecheap response missing DomainCheckResult"))?;
    let tag = &body[tag_start..];
    let tag_end = tag
        .find('>')
        .ok_or_else(|| DomainHuntError::parse("Namecheap response truncated"))?;
    let tag = &tag[..tag_end];

    let available = match extract_attribute(tag, "Available") {
        Some("true") => true,
        Some("false") => false,
        _ => {
            return Err(DomainHuntError::parse(
                "Namecheap response missing Available attribute",
            ))
        }
    };

    // Premium names carry their registration price on the same tag
    let price = if available && extract_attribute(tag, "IsPremiumName") == Some("true") {
        extract_attribute(tag, "PremiumRegistrationPrice").and_then(|p| p.parse::<f64>().ok())
    } else {
        None
    };

    Ok(ProbeOutcome { available, price })
}

#[async_trait]
impl ProviderProbe for NamecheapProbe {
    fn name(&self) -> &str {
        "namecheap"
    }

    fn required_fields(&self) -> &[&str] {
        REQUIRED_FIELDS
    }

    async fn probe(
        &self,
        domain: &str,
        credentials: &HashMap<String, String>,
    ) -> Result<ProbeOutcome, DomainHuntError> {
        let api_user = require_credential(credentials, "api_user")?;
        let api_key = require_credential(credentials, "api_key")?;
        let username = require_credential(credentials, "username")?;
        let client_ip = require_credential(credentials, "client_ip")?;

        let response = self
            .http_client
            .get(ENDPOINT)
            .query(&[
                ("ApiUser", api_user),
                ("ApiKey", api_key),
                ("UserName", username),
                ("ClientIp", client_ip),
                ("Command", "namecheap.domains.check"),
                ("DomainList", domain),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DomainHuntError::timeout("Namecheap request", self.timeout)
                } else {
                    e.into()
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainHuntError::probe_failure(
                domain,
                "namecheap",
                format!("HTTP {}", status.as_u16()),
            ));
        }

        let body = response.text().await?;
        parse_check_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OK_AVAILABLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<ApiResponse Status="OK" xmlns="http://api.namecheap.com/xml.response">
  <CommandResponse Type="namecheap.domains.check">
    <DomainCheckResult Domain="abc.com" Available="true" ErrorNo="0" IsPremiumName="false" />
  </CommandResponse>
</ApiResponse>"#;

    const OK_TAKEN: &str = r#"<ApiResponse Status="OK">
  <CommandResponse Type="namecheap.domains.check">
    <DomainCheckResult Domain="google.com" Available="false" ErrorNo="0" />
  </CommandResponse>
</ApiResponse>"#;

    const OK_PREMIUM: &str = r#"<ApiResponse Status="OK">
  <CommandResponse>
    <DomainCheckResult Domain="xy.com" Available="true" IsPremiumName="true" PremiumRegistrationPrice="3499.50" />
  </CommandResponse>
</ApiResponse>"#;

    const API_ERROR: &str = r#"<ApiResponse Status="ERROR">
  <Errors>
    <Error Number="1011102">API Key is invalid or API access has not been enabled</Error>
  </Errors>
</ApiResponse>"#;

    #[test]
    fn test_parse_available() {
        let outcome = parse_check_response(OK_AVAILABLE).unwrap();
        assert!(outcome.available);
        assert!(outcome.price.is_none());
    }

    #[test]
    fn test_parse_taken() {
        let outcome = parse_check_response(OK_TAKEN).unwrap();
        assert!(!outcome.available);
    }

    #[test]
    fn test_parse_premium_price() {
        let outcome = parse_check_response(OK_PREMIUM).unwrap();
        assert!(outcome.available);
        assert_eq!(outcome.price, Some(3499.50));
    }

    #[test]
    fn test_parse_api_error() {
        let err = parse_check_response(API_ERROR).unwrap_err();
        assert!(err.to_string().contains("API Key is invalid"));
    }

    #[test]
    fn test_parse_garbage_is_an_error() {
        assert!(parse_check_response("<html>busy</html>").is_err());
        assert!(parse_check_response("").is_err());
    }

    #[test]
    fn test_extract_attribute() {
        let tag = r#"<DomainCheckResult Domain="abc.com" Available="true""#;
        assert_eq!(extract_attribute(tag, "Domain"), Some("abc.com"));
        assert_eq!(extract_attribute(tag, "Available"), Some("true"));
        assert_eq!(extract_attribute(tag, "Missing"), None);
    }
}
