//! Persistence of the two configuration documents.
//!
//! The core persists exactly two logical JSON documents: the configured
//! extension list and the provider registry (credentials included). The
//! [`ConfigStore`] trait is the collaborator seam — the bundled [`FileStore`]
//! keeps one JSON file per document under a config directory, but anything
//! that can load and save JSON values by key works. Schema migration is the
//! collaborator's problem, not the core's.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::DomainHuntError;
use crate::extensions::ExtensionSet;
use crate::registry::ProviderRegistry;

/// Document key for the configured/selected extension list.
pub const EXTENSIONS_KEY: &str = "extensions";

/// Document key for the provider registry.
pub const PROVIDERS_KEY: &str = "providers";

/// Key/value persistence collaborator for JSON documents.
pub trait ConfigStore {
    /// Load a document, `Ok(None)` when it has never been saved.
    fn load(&self, key: &str) -> Result<Option<serde_json::Value>, DomainHuntError>;

    /// Save a document, replacing any previous value.
    fn save(&self, key: &str, value: &serde_json::Value) -> Result<(), DomainHuntError>;
}

/// File-backed store: one pretty-printed JSON file per document.
#[derive(Debug, Clone)]
pub struct FileStore {
    directory: PathBuf,
}

impl FileStore {
    /// Store documents under an explicit directory.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Discover the default config directory:
    /// `$XDG_CONFIG_HOME/domain-hunt`, falling back to
    /// `$HOME/.config/domain-hunt`.
    pub fn discover() -> Result<Self, DomainHuntError> {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            if !xdg.is_empty() {
                return Ok(Self::new(Path::new(&xdg).join("domain-hunt")));
            }
        }
        match std::env::var("HOME") {
            Ok(home) if !home.is_empty() => {
                Ok(Self::new(Path::new(&home).join(".config").join("domain-hunt")))
            }
            _ => Err(DomainHuntError::config(
                "cannot locate a config directory: neither XDG_CONFIG_HOME nor HOME is set",
            )),
        }
    }

    /// The directory documents are stored in.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.directory.join(format!("{}.json", key))
    }
}

impl ConfigStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<serde_json::Value>, DomainHuntError> {
        let path = self.path_for(key);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(DomainHuntError::store(
                    key,
                    format!("failed to read {}: {}", path.display(), err),
                ))
            }
        };

        let value = serde_json::from_str(&content).map_err(|err| {
            DomainHuntError::store(key, format!("invalid JSON in {}: {}", path.display(), err))
        })?;
        Ok(Some(value))
    }

    fn save(&self, key: &str, value: &serde_json::Value) -> Result<(), DomainHuntError> {
        fs::create_dir_all(&self.directory).map_err(|err| {
            DomainHuntError::store(
                key,
                format!("failed to create {}: {}", self.directory.display(), err),
            )
        })?;

        let path = self.path_for(key);
        let content = serde_json::to_string_pretty(value)
            .map_err(|err| DomainHuntError::store(key, err.to_string()))?;
        fs::write(&path, content).map_err(|err| {
            DomainHuntError::store(key, format!("failed to write {}: {}", path.display(), err))
        })
    }
}

/// Load the persisted extension set, if any.
pub fn load_extensions(store: &dyn ConfigStore) -> Result<Option<ExtensionSet>, DomainHuntError> {
    match store.load(EXTENSIONS_KEY)? {
        Some(value) => {
            let set = serde_json::from_value(value)
                .map_err(|err| DomainHuntError::store(EXTENSIONS_KEY, err.to_string()))?;
            Ok(Some(set))
        }
        None => Ok(None),
    }
}

/// Persist the extension set.
pub fn save_extensions(
    store: &dyn ConfigStore,
    extensions: &ExtensionSet,
) -> Result<(), DomainHuntError> {
    let value = serde_json::to_value(extensions)
        .map_err(|err| DomainHuntError::store(EXTENSIONS_KEY, err.to_string()))?;
    store.save(EXTENSIONS_KEY, &value)
}

/// Load the persisted provider registry, if any.
pub fn load_providers(store: &dyn ConfigStore) -> Result<Option<ProviderRegistry>, DomainHuntError> {
    match store.load(PROVIDERS_KEY)? {
        Some(value) => {
            let registry = serde_json::from_value(value)
                .map_err(|err| DomainHuntError::store(PROVIDERS_KEY, err.to_string()))?;
            Ok(Some(registry))
        }
        None => Ok(None),
    }
}

/// Persist the provider registry.
pub fn save_providers(
    store: &dyn ConfigStore,
    registry: &ProviderRegistry,
) -> Result<(), DomainHuntError> {
    let value = serde_json::to_value(registry)
        .map_err(|err| DomainHuntError::store(PROVIDERS_KEY, err.to_string()))?;
    store.save(PROVIDERS_KEY, &value)
}
