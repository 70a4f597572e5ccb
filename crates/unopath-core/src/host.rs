//! Host environment port.
//!
//! Strategies never touch `std::env` or the property store directly; they go
//! through [`HostEnvironment`] so the chain can run against a fabricated host.
//!
//! # Design
//!
//! - [`SystemHost`] reads the live process state
//! - [`StaticHost`] is a map-backed host for embedding and tests
//! - OS family identity is computed once per process and memoized

use std::collections::HashMap;
use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::PathBuf;
use std::sync::OnceLock;

use serde::Serialize;

use crate::error::HostError;
use crate::properties;

/// Operating-system family, which selects the platform branch of the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OsFamily {
    /// Windows: registry lookup only.
    Windows,
    /// Unix-like: PATH scan, locator subprocess, legacy dotfile.
    Unix,
}

impl OsFamily {
    /// Map a `std::env::consts::FAMILY`-style name to a family.
    pub fn from_family_name(name: &str) -> Option<Self> {
        match name {
            "windows" => Some(Self::Windows),
            "unix" => Some(Self::Unix),
            _ => None,
        }
    }

    /// Family of the running process, computed once.
    pub fn current() -> Option<Self> {
        static CURRENT: OnceLock<Option<OsFamily>> = OnceLock::new();
        *CURRENT.get_or_init(|| Self::from_family_name(env::consts::FAMILY))
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Windows => write!(f, "windows"),
            Self::Unix => write!(f, "unix"),
        }
    }
}

/// Read access to the parts of the host the discovery chain depends on.
pub trait HostEnvironment: Send + Sync {
    /// Read a process configuration property.
    fn property(&self, key: &str) -> Result<Option<String>, HostError>;

    /// Read an environment variable. Values need not be valid Unicode.
    fn env_var(&self, name: &str) -> Result<Option<OsString>, HostError>;

    /// The current user's home directory.
    fn home_dir(&self) -> Option<PathBuf>;

    /// The host OS family, or `None` when it cannot be determined.
    fn os_family(&self) -> Option<OsFamily>;
}

/// The live process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHost;

impl SystemHost {
    /// Create a handle on the live process environment.
    pub const fn new() -> Self {
        Self
    }
}

impl HostEnvironment for SystemHost {
    fn property(&self, key: &str) -> Result<Option<String>, HostError> {
        properties::property(key)
    }

    fn env_var(&self, name: &str) -> Result<Option<OsString>, HostError> {
        Ok(env::var_os(name))
    }

    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }

    fn os_family(&self) -> Option<OsFamily> {
        OsFamily::current()
    }
}

/// A fixed, map-backed host.
///
/// Values that are not set read as absent. Reads can be made to fail with
/// [`StaticHost::deny_property`] and [`StaticHost::deny_env`].
#[derive(Debug, Clone, Default)]
pub struct StaticHost {
    properties: HashMap<String, Result<String, HostError>>,
    env: HashMap<String, Result<OsString, HostError>>,
    home: Option<PathBuf>,
    os_family: Option<OsFamily>,
}

impl StaticHost {
    /// An empty host with no OS family.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty host of the given family.
    pub fn with_family(os_family: OsFamily) -> Self {
        Self {
            os_family: Some(os_family),
            ..Self::default()
        }
    }

    /// Set a property.
    #[must_use]
    pub fn with_property(mut self, key: &str, value: &str) -> Self {
        self.properties
            .insert(key.to_string(), Ok(value.to_string()));
        self
    }

    /// Make reads of a property fail with `PermissionDenied`.
    #[must_use]
    pub fn deny_property(mut self, key: &str) -> Self {
        self.properties.insert(
            key.to_string(),
            Err(HostError::PermissionDenied {
                name: key.to_string(),
            }),
        );
        self
    }

    /// Set an environment variable.
    #[must_use]
    pub fn with_env(mut self, name: &str, value: impl AsRef<OsStr>) -> Self {
        self.env
            .insert(name.to_string(), Ok(value.as_ref().to_os_string()));
        self
    }

    /// Make reads of an environment variable fail with `PermissionDenied`.
    #[must_use]
    pub fn deny_env(mut self, name: &str) -> Self {
        self.env.insert(
            name.to_string(),
            Err(HostError::PermissionDenied {
                name: name.to_string(),
            }),
        );
        self
    }

    /// Set the home directory.
    #[must_use]
    pub fn home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }

    /// Set or clear the OS family.
    #[must_use]
    pub const fn os(mut self, os_family: Option<OsFamily>) -> Self {
        self.os_family = os_family;
        self
    }
}

impl HostEnvironment for StaticHost {
    fn property(&self, key: &str) -> Result<Option<String>, HostError> {
        self.properties.get(key).cloned().transpose()
    }

    fn env_var(&self, name: &str) -> Result<Option<OsString>, HostError> {
        self.env.get(name).cloned().transpose()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home.clone()
    }

    fn os_family(&self) -> Option<OsFamily> {
        self.os_family
    }
}
