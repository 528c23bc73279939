//! Provider registry: which availability providers exist, whether they are
//! enabled, and the credentials they need.
//!
//! Each provider declares a fixed list of named credential fields. The
//! registry validates completeness generically — a provider is *usable* iff
//! it is enabled and every required field is non-empty. Only usable providers
//! are handed to the checker.

use std::collections::HashMap;
use std::env;

use serde::{Deserialize, Serialize};

use crate::error::DomainHuntError;

/// Environment variable prefix for credential overrides,
/// e.g. `DOMAIN_HUNT_WHOISXML_API_KEY`.
const ENV_PREFIX: &str = "DOMAIN_HUNT";

/// One configured availability provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provider {
    /// Unique display identifier (e.g. "whoisxml")
    pub name: String,

    /// Whether the user has switched this provider on
    pub enabled: bool,

    /// Credential fields the provider requires, by name
    pub required_fields: Vec<String>,

    /// Provider-specific credential values, keyed by field name
    pub credentials: HashMap<String, String>,
}

impl Provider {
    /// Create a disabled provider with empty credentials for every
    /// required field.
    pub fn new(name: impl Into<String>, required_fields: &[&str]) -> Self {
        Self {
            name: name.into(),
            enabled: false,
            required_fields: required_fields.iter().map(|f| f.to_string()).collect(),
            credentials: required_fields
                .iter()
                .map(|f| (f.to_string(), String::new()))
                .collect(),
        }
    }

    /// Whether every required credential field has a non-empty value.
    pub fn credentials_complete(&self) -> bool {
        self.required_fields
            .iter()
            .all(|field| self.credentials.get(field).is_some_and(|v| !v.is_empty()))
    }

    /// Usable means enabled AND credential-complete.
    pub fn is_usable(&self) -> bool {
        self.enabled && self.credentials_complete()
    }
}

/// Ordered collection of configured providers.
///
/// Registration order is preserved; `list_usable()` filters without
/// reordering so fan-out order stays deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderRegistry {
    providers: Vec<Provider>,
}

impl ProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Registry pre-populated with the known availability providers, all
    /// disabled until credentials are supplied.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for provider in [
            Provider::new("whoisxml", &["api_key"]),
            Provider::new("godaddy", &["api_key", "api_secret"]),
            Provider::new("namecheap", &["api_user", "api_key", "username", "client_ip"]),
        ] {
            registry.add(provider).expect("default providers are unique");
        }
        registry
    }

    /// Register a provider. Names must be unique.
    pub fn add(&mut self, provider: Provider) -> Result<(), DomainHuntError> {
        if self.providers.iter().any(|p| p.name == provider.name) {
            return Err(DomainHuntError::duplicate_provider(&provider.name));
        }
        self.providers.push(provider);
        Ok(())
    }

    /// Enable or disable a provider by name.
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> Result<(), DomainHuntError> {
        let provider = self
            .providers
            .iter_mut()
            .find(|p| p.name == name)
            .ok_or_else(|| DomainHuntError::unknown_provider(name))?;
        provider.enabled = enabled;
        Ok(())
    }

    /// Set one credential field on a provider.
    ///
    /// Fields outside the declared required list are accepted and stored —
    /// some providers take optional extras — but only required fields count
    /// toward completeness.
    pub fn set_credential(
        &mut self,
        name: &str,
        field: &str,
        value: &str,
    ) -> Result<(), DomainHuntError> {
        let provider = self
            .providers
            .iter_mut()
            .find(|p| p.name == name)
            .ok_or_else(|| DomainHuntError::unknown_provider(name))?;
        provider
            .credentials
            .insert(field.to_string(), value.to_string());
        Ok(())
    }

    /// Look up a provider by name.
    pub fn get(&self, name: &str) -> Option<&Provider> {
        self.providers.iter().find(|p| p.name == name)
    }

    /// All configured providers, in registration order.
    pub fn list(&self) -> &[Provider] {
        &self.providers
    }

    /// Providers that are enabled and credential-complete, in registration
    /// order. This is the snapshot the orchestrator takes at search start.
    pub fn list_usable(&self) -> Vec<Provider> {
        self.providers
            .iter()
            .filter(|p| p.is_usable())
            .cloned()
            .collect()
    }

    /// Fill credentials from `DOMAIN_HUNT_<PROVIDER>_<FIELD>` environment
    /// variables. A provider that becomes credential-complete through an
    /// override is enabled automatically.
    pub fn apply_env_overrides(&mut self) {
        for provider in &mut self.providers {
            let mut touched = false;
            for field in provider.required_fields.clone() {
                let var = format!(
                    "{}_{}_{}",
                    ENV_PREFIX,
                    provider.name.to_uppercase(),
                    field.to_uppercase()
                );
                if let Ok(value) = env::var(&var) {
                    if !value.is_empty() {
                        provider.credentials.insert(field, value);
                        touched = true;
                    }
                }
            }
            if touched && provider.credentials_complete() {
                provider.enabled = true;
            }
        }
    }
}
