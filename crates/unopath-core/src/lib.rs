#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod config;
pub mod discovery;
pub mod error;
pub mod host;
pub mod properties;
pub mod report;
mod strategies;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::{
    DEFAULT_ENV_VAR, DEFAULT_EXECUTABLE_NAME, DEFAULT_LEGACY_FILE_NAME, DEFAULT_LEGACY_SECTION,
    DEFAULT_LOCATOR_PROGRAM, DEFAULT_LOCATOR_TIMEOUT, DEFAULT_POLL_INTERVAL, DEFAULT_PROPERTY_KEY,
    DEFAULT_REGISTRY_SUBKEY, DEFAULT_SEARCH_PATH_VAR, DiscoveryConfig,
};
pub use discovery::{InstallationFinder, find_installation_path};
pub use error::{ConfigError, DiscoveryError, HostError, RegistryError, UrlDecodeError};
pub use host::{HostEnvironment, OsFamily, StaticHost, SystemHost};
pub use properties::{parse_definition, property, remove_property, set_property};
pub use report::{AttemptOutcome, Discovery, DiscoveryReport, DiscoverySource, StrategyAttempt};
pub use strategies::file_url::{decode_file_url, to_local_path};
pub use strategies::registry::{NativeRegistry, RegistryReader, RegistryRoot, RegistryView};
