//! Configured and selected TLD extensions.
//!
//! An [`ExtensionSet`] tracks two layers: the *configured* master list (what
//! the user has set up, order-preserving) and the *selected* subset (what the
//! current search should test). Selected is always a subset of configured.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::DomainHuntError;

lazy_static::lazy_static! {
    // A dot, then one or more dot-separated labels of letters/digits/hyphens.
    // Accepts multi-level suffixes like ".co.uk".
    static ref EXTENSION_RE: regex::Regex =
        regex::Regex::new(r"^\.[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*$").unwrap();
}

/// Extensions shipped as the default configured list.
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    ".com", ".net", ".org", ".co", ".info", ".me", ".store", ".online", ".ai", ".sa",
];

/// The set of TLD extensions available for searching.
///
/// Membership is case-sensitive. Configured order is preserved and determines
/// the fan-out order of checks, so results stay deterministic for a given
/// configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtensionSet {
    /// Master list, in the order extensions were configured
    configured: Vec<String>,
    /// Subset of `configured` active for searches
    selected: HashSet<String>,
}

impl ExtensionSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self {
            configured: Vec::new(),
            selected: HashSet::new(),
        }
    }

    /// Create the default set, with every extension selected.
    pub fn with_defaults() -> Self {
        let mut set = Self::new();
        for ext in DEFAULT_EXTENSIONS {
            // Static defaults are valid and unique
            set.add(ext).expect("default extension list is valid");
        }
        set
    }

    fn validate(extension: &str) -> Result<(), DomainHuntError> {
        if !extension.starts_with('.') {
            return Err(DomainHuntError::invalid_extension(
                extension,
                "must start with '.'",
            ));
        }
        if extension.len() == 1 {
            return Err(DomainHuntError::invalid_extension(
                extension,
                "must not be empty after the dot",
            ));
        }
        if !EXTENSION_RE.is_match(extension) {
            return Err(DomainHuntError::invalid_extension(
                extension,
                "labels may only contain letters, digits, and hyphens",
            ));
        }
        Ok(())
    }

    /// Add an extension to the configured list and select it.
    ///
    /// Fails with `InvalidExtension` for malformed tokens and
    /// `DuplicateExtension` if already configured. No partial mutation on
    /// failure.
    pub fn add(&mut self, extension: &str) -> Result<(), DomainHuntError> {
        Self::validate(extension)?;
        if self.configured.iter().any(|e| e == extension) {
            return Err(DomainHuntError::duplicate_extension(extension));
        }
        self.configured.push(extension.to_string());
        self.selected.insert(extension.to_string());
        Ok(())
    }

    /// Remove an extension from both the configured and selected sets.
    pub fn remove(&mut self, extension: &str) -> Result<(), DomainHuntError> {
        let index = self
            .configured
            .iter()
            .position(|e| e == extension)
            .ok_or_else(|| DomainHuntError::unknown_extension(extension))?;
        self.configured.remove(index);
        self.selected.remove(extension);
        Ok(())
    }

    /// Replace a configured extension in place, keeping its position and
    /// selection status. Fails if `new` is malformed or already configured.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<(), DomainHuntError> {
        if old == new {
            return Ok(());
        }
        Self::validate(new)?;
        let index = self
            .configured
            .iter()
            .position(|e| e == old)
            .ok_or_else(|| DomainHuntError::unknown_extension(old))?;
        if self.configured.iter().any(|e| e == new) {
            return Err(DomainHuntError::duplicate_extension(new));
        }
        self.configured[index] = new.to_string();
        if self.selected.remove(old) {
            self.selected.insert(new.to_string());
        }
        Ok(())
    }

    /// Select a configured extension for searching. Idempotent.
    pub fn select(&mut self, extension: &str) -> Result<(), DomainHuntError> {
        if !self.configured.iter().any(|e| e == extension) {
            return Err(DomainHuntError::unknown_extension(extension));
        }
        self.selected.insert(extension.to_string());
        Ok(())
    }

    /// Deselect an extension. Idempotent.
    pub fn deselect(&mut self, extension: &str) -> Result<(), DomainHuntError> {
        if !self.configured.iter().any(|e| e == extension) {
            return Err(DomainHuntError::unknown_extension(extension));
        }
        self.selected.remove(extension);
        Ok(())
    }

    /// Select every configured extension.
    pub fn select_all(&mut self) {
        self.selected = self.configured.iter().cloned().collect();
    }

    /// Deselect everything.
    pub fn select_none(&mut self) {
        self.selected.clear();
    }

    /// The configured master list, in configuration order.
    pub fn configured(&self) -> &[String] {
        &self.configured
    }

    /// The selected extensions, in configured order.
    pub fn selected(&self) -> Vec<String> {
        self.configured
            .iter()
            .filter(|e| self.selected.contains(*e))
            .cloned()
            .collect()
    }

    /// Whether an extension is currently selected.
    pub fn is_selected(&self, extension: &str) -> bool {
        self.selected.contains(extension)
    }
}

impl Default for ExtensionSet {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_all_selected() {
        let set = ExtensionSet::with_defaults();
        assert_eq!(set.configured().len(), DEFAULT_EXTENSIONS.len());
        assert_eq!(set.selected().len(), DEFAULT_EXTENSIONS.len());
        assert!(set.is_selected(".com"));
        assert!(set.is_selected(".sa"));
    }

    #[test]
    fn test_add_validates_token() {
        let mut set = ExtensionSet::new();
        assert!(set.add("com").is_err()); // no dot
        assert!(set.add(".").is_err()); // empty after dot
        assert!(set.add(".c om").is_err()); // whitespace
        assert!(set.add("").is_err());
        assert!(set.add(".tech").is_ok());
        assert!(set.add(".co.uk").is_ok()); // multi-level allowed
    }

    #[test]
    fn test_add_duplicate_rejected() {
        let mut set = ExtensionSet::new();
        set.add(".com").unwrap();
        let result = set.add(".com");
        assert!(matches!(
            result,
            Err(DomainHuntError::DuplicateExtension { .. })
        ));
        // membership is case-sensitive: ".COM" is a distinct token
        assert!(set.add(".COM").is_ok());
    }

    #[test]
    fn test_new_extension_is_selected() {
        let mut set = ExtensionSet::new();
        set.add(".io").unwrap();
        assert!(set.is_selected(".io"));
    }

    #[test]
    fn test_remove_clears_both_sets() {
        let mut set = ExtensionSet::with_defaults();
        set.remove(".com").unwrap();
        assert!(!set.configured().contains(&".com".to_string()));
        assert!(!set.is_selected(".com"));
        assert!(matches!(
            set.remove(".com"),
            Err(DomainHuntError::UnknownExtension { .. })
        ));
    }

    #[test]
    fn test_select_deselect_idempotent() {
        let mut set = ExtensionSet::with_defaults();
        set.deselect(".com").unwrap();
        set.deselect(".com").unwrap(); // no-op, no error
        assert!(!set.is_selected(".com"));
        set.select(".com").unwrap();
        set.select(".com").unwrap(); // no-op, no error
        assert!(set.is_selected(".com"));
    }

    #[test]
    fn test_select_unknown_errors() {
        let mut set = ExtensionSet::new();
        assert!(matches!(
            set.select(".zz"),
            Err(DomainHuntError::UnknownExtension { .. })
        ));
        assert!(matches!(
            set.deselect(".zz"),
            Err(DomainHuntError::UnknownExtension { .. })
        ));
    }

    #[test]
    fn test_select_all_and_none() {
        let mut set = ExtensionSet::with_defaults();
        set.select_none();
        assert!(set.selected().is_empty());
        set.select_all();
        assert_eq!(set.selected().len(), set.configured().len());
    }

    #[test]
    fn test_selected_preserves_configured_order() {
        let mut set = ExtensionSet::new();
        set.add(".net").unwrap();
        set.add(".com").unwrap();
        set.add(".org").unwrap();
        set.deselect(".com").unwrap();
        set.select(".com").unwrap();
        // re-selecting must not move .com to the back
        assert_eq!(set.selected(), vec![".net", ".com", ".org"]);
    }

    #[test]
    fn test_rename_keeps_position_and_selection() {
        let mut set = ExtensionSet::new();
        set.add(".net").unwrap();
        set.add(".com").unwrap();
        set.deselect(".net").unwrap();
        set.rename(".net", ".tech").unwrap();
        assert_eq!(set.configured(), &[".tech".to_string(), ".com".to_string()]);
        assert!(!set.is_selected(".tech")); // selection status carried over
        set.rename(".com", ".dev").unwrap();
        assert!(set.is_selected(".dev"));
    }

    #[test]
    fn test_rename_rejects_duplicate_and_invalid() {
        let mut set = ExtensionSet::new();
        set.add(".net").unwrap();
        set.add(".com").unwrap();
        assert!(matches!(
            set.rename(".net", ".com"),
            Err(DomainHuntError::DuplicateExtension { .. })
        ));
        assert!(matches!(
            set.rename(".net", "bad"),
            Err(DomainHuntError::InvalidExtension { .. })
        ));
        // failed rename leaves the set untouched
        assert_eq!(set.configured(), &[".net".to_string(), ".com".to_string()]);
        // renaming to itself is a no-op
        set.rename(".net", ".net").unwrap();
    }

    #[test]
    fn test_serde_round_trip() {
        let mut set = ExtensionSet::with_defaults();
        set.deselect(".ai").unwrap();
        let json = serde_json::to_value(&set).unwrap();
        let restored: ExtensionSet = serde_json::from_value(json).unwrap();
        assert_eq!(restored.configured(), set.configured());
        assert!(!restored.is_selected(".ai"));
        assert!(restored.is_selected(".com"));
    }
}
