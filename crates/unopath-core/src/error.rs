//! Error types for installation discovery.
//!
//! Almost every failure during discovery is contained inside the strategy
//! that hit it and shows up only as a log line. The types here exist so each
//! strategy can name what went wrong before deciding to swallow it; only
//! [`DiscoveryError`] ever reaches the caller of the coordinator.

use thiserror::Error;

/// Errors that escape the discovery chain.
///
/// "Not found" is never an error: the coordinator returns `Ok(None)` for it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DiscoveryError {
    /// Discovery was cancelled before a strategy ran or while the locator
    /// subprocess was running.
    #[error("Installation discovery was cancelled")]
    Cancelled,
}

/// Invalid [`DiscoveryConfig`](crate::DiscoveryConfig) values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The target executable name is empty.
    #[error("Executable name cannot be empty")]
    EmptyExecutableName,

    /// The target executable name contains a path separator.
    #[error("Executable name must be a bare file name, got {0:?}")]
    ExecutableNameHasSeparator(String),

    /// The locator program is empty.
    #[error("Locator program cannot be empty")]
    EmptyLocatorProgram,

    /// The locator timeout or poll interval is zero.
    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),
}

/// Failures reading host state (properties, environment variables).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The value exists but access to it was denied.
    #[error("Access to {name} was denied")]
    PermissionDenied { name: String },

    /// The backing store is unusable (e.g. a poisoned lock).
    #[error("Host state unavailable: {0}")]
    Unavailable(String),
}

/// Failures reading the native configuration store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The subkey or its default value does not exist.
    #[error("Registry key not found: {0}")]
    NotFound(String),

    /// The key exists but could not be opened.
    #[error("Access denied reading registry key: {0}")]
    AccessDenied(String),

    /// Any other status returned by the operating system.
    #[error("Registry read of {key} failed with status {code}")]
    Os { key: String, code: u32 },

    /// No native registry exists on this platform.
    #[error("Registry is not available on this platform")]
    Unsupported,
}

/// Reasons a legacy location URL fails to decode.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UrlDecodeError {
    /// The string does not start with `file://` (ignoring case).
    #[error("Not a file URL")]
    NotFileScheme,

    /// The host component is neither empty nor `localhost`.
    #[error("Non-local host {0:?}")]
    ForeignHost(String),

    /// A percent-escape decoded to a path separator.
    #[error("Encoded path separator at byte {0}")]
    EncodedSeparator(usize),

    /// A `%` was not followed by two hex digits.
    #[error("Malformed percent-escape at byte {0}")]
    MalformedEscape(usize),

    /// A run of percent-escapes did not decode as UTF-8.
    #[error("Percent-escapes at byte {0} are not valid UTF-8")]
    InvalidUtf8(usize),
}
