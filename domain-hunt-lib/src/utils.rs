//! Small helpers for candidate handling.

use crate::error::DomainHuntError;

/// Validate a candidate base name (no extension attached).
///
/// Candidates must be non-empty and contain only alphanumerics or hyphens,
/// with no leading or trailing hyphen.
pub fn validate_candidate(candidate: &str) -> Result<(), DomainHuntError> {
    let candidate = candidate.trim();

    if candidate.is_empty() {
        return Err(DomainHuntError::invalid_candidate(
            candidate,
            "candidate cannot be empty",
        ));
    }
    if candidate.contains('.') {
        return Err(DomainHuntError::invalid_candidate(
            candidate,
            "candidate must not include an extension",
        ));
    }
    if candidate.starts_with('-') || candidate.ends_with('-') {
        return Err(DomainHuntError::invalid_candidate(
            candidate,
            "candidate cannot start or end with a hyphen",
        ));
    }
    if !candidate.chars().all(|c| c.is_alphanumeric() || c == '-') {
        return Err(DomainHuntError::invalid_candidate(
            candidate,
            "only alphanumerics and hyphens are allowed",
        ));
    }

    Ok(())
}

/// Join a candidate and an extension into the full domain string.
///
/// Extensions carry their leading dot, so this is plain concatenation.
pub fn join_domain(candidate: &str, extension: &str) -> String {
    format!("{}{}", candidate, extension)
}
