//! Process-wide configuration properties.
//!
//! The equivalent of `-Dkey=value` launch properties: values set once (usually
//! by the CLI from `--define` flags) and read by the override lookup. The store
//! is created lazily and lives for the rest of the process.

use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

use crate::error::HostError;

static PROPERTIES: OnceLock<RwLock<HashMap<String, String>>> = OnceLock::new();

fn store() -> &'static RwLock<HashMap<String, String>> {
    PROPERTIES.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Set a property, returning the previous value.
pub fn set_property(key: &str, value: &str) -> Result<Option<String>, HostError> {
    let mut props = store()
        .write()
        .map_err(|_| HostError::Unavailable("property store lock poisoned".to_string()))?;
    Ok(props.insert(key.to_string(), value.to_string()))
}

/// Remove a property, returning its value.
pub fn remove_property(key: &str) -> Result<Option<String>, HostError> {
    let mut props = store()
        .write()
        .map_err(|_| HostError::Unavailable("property store lock poisoned".to_string()))?;
    Ok(props.remove(key))
}

/// Read a property.
pub fn property(key: &str) -> Result<Option<String>, HostError> {
    let props = store()
        .read()
        .map_err(|_| HostError::Unavailable("property store lock poisoned".to_string()))?;
    Ok(props.get(key).cloned())
}

/// Parse a `KEY=VALUE` definition as given on a command line.
///
/// The key must be non-empty; the value may be empty or contain further `=`.
pub fn parse_definition(definition: &str) -> Option<(&str, &str)> {
    let (key, value) = definition.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, value))
}
