//! Config validation: collection names must be safe MongoDB collection names.

use crate::error::ConfigError;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    /// Letters, digits, `_`, `-` and `.`; must start with a letter or `_`.
    static ref COLLECTION_NAME: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_.\-]{0,119}$").unwrap(/* known good */);
}

pub fn validate_collection_name(name: &str) -> Result<(), ConfigError> {
    if !COLLECTION_NAME.is_match(name) || name.starts_with("system.") || name.ends_with('.') || name.contains("..") {
        return Err(ConfigError::InvalidCollectionName(name.to_string()));
    }
    Ok(())
}

pub fn validate_collections(names: &[String]) -> Result<(), ConfigError> {
    if names.is_empty() {
        return Err(ConfigError::InvalidValue {
            key: "COLLECTIONS",
            value: String::new(),
        });
    }
    let mut seen = HashSet::new();
    for name in names {
        validate_collection_name(name)?;
        if !seen.insert(name.as_str()) {
            return Err(ConfigError::DuplicateCollection(name.clone()));
        }
    }
    Ok(())
}
