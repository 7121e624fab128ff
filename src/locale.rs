use std::collections::BTreeSet;

use crate::error::ApiError;

/// Pick the effective locale for an entity: the requested one if the entity
/// carries it, else the configured default, else `LocaleNotFound`.
pub fn resolve<'a>(
    available: &'a BTreeSet<String>,
    requested: &'a str,
    default: &'a str,
) -> Result<&'a str, ApiError> {
    if available.contains(requested) {
        return Ok(requested);
    }
    if available.contains(default) {
        return Ok(default);
    }
    Err(ApiError::LocaleNotFound(format!(
        "neither locale '{requested}' nor default '{default}' is available"
    )))
}

/// ISO 639-1 style code: exactly two lowercase ASCII letters.
pub fn is_valid_locale(locale: &str) -> bool {
    locale.len() == 2 && locale.chars().all(|c| c.is_ascii_lowercase())
}
