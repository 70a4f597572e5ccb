//! Discovery configuration.
//!
//! Every name the strategies look up (property key, environment variables,
//! registry subkey, legacy dotfile) lives here so embedders can point the
//! chain at a different application. [`DiscoveryConfig::default`] targets
//! LibreOffice's UNO runtime.

use std::time::Duration;

use crate::error::ConfigError;

/// Process property naming an explicit installation directory.
pub const DEFAULT_PROPERTY_KEY: &str = "com.sun.star.lib.loader.unopath";

/// Environment variable naming an explicit installation directory.
pub const DEFAULT_ENV_VAR: &str = "UNO_PATH";

/// Platform search-path variable scanned for the executable.
pub const DEFAULT_SEARCH_PATH_VAR: &str = "PATH";

/// Executable looked for on Unix-like hosts.
pub const DEFAULT_EXECUTABLE_NAME: &str = "libreoffice";

/// Registry subkey whose default value holds the install path.
pub const DEFAULT_REGISTRY_SUBKEY: &str = r"Software\LibreOffice\UNO\InstallPath";

/// Legacy version-registry dotfile in the user's home directory.
pub const DEFAULT_LEGACY_FILE_NAME: &str = ".sversionrc";

/// Section header that precedes version entries in the legacy file.
pub const DEFAULT_LEGACY_SECTION: &str = "[Versions]";

/// External "find executable on PATH" utility.
pub const DEFAULT_LOCATOR_PROGRAM: &str = "which";

/// Upper bound on how long the locator subprocess may run.
pub const DEFAULT_LOCATOR_TIMEOUT: Duration = Duration::from_secs(10);

/// How often the locator wait loop checks for cancellation.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Names and limits used by the discovery chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryConfig {
    /// Process property consulted first.
    pub property_key: String,
    /// Environment variable consulted second.
    pub env_var: String,
    /// Search-path variable split by the PATH scan.
    pub search_path_var: String,
    /// Base name of the executable that marks an installation.
    pub executable_name: String,
    /// Registry subkey read under the per-user and system-wide roots.
    pub registry_subkey: String,
    /// Legacy dotfile name, relative to the home directory.
    pub legacy_file_name: String,
    /// Section header line in the legacy dotfile.
    pub legacy_section: String,
    /// Program run by the subprocess lookup.
    pub locator_program: String,
    /// Arguments placed before the executable name on the locator command line.
    pub locator_args: Vec<String>,
    /// Deadline for the locator subprocess.
    pub locator_timeout: Duration,
    /// Poll interval of the locator wait loop.
    pub poll_interval: Duration,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            property_key: DEFAULT_PROPERTY_KEY.to_string(),
            env_var: DEFAULT_ENV_VAR.to_string(),
            search_path_var: DEFAULT_SEARCH_PATH_VAR.to_string(),
            executable_name: DEFAULT_EXECUTABLE_NAME.to_string(),
            registry_subkey: DEFAULT_REGISTRY_SUBKEY.to_string(),
            legacy_file_name: DEFAULT_LEGACY_FILE_NAME.to_string(),
            legacy_section: DEFAULT_LEGACY_SECTION.to_string(),
            locator_program: DEFAULT_LOCATOR_PROGRAM.to_string(),
            locator_args: Vec::new(),
            locator_timeout: DEFAULT_LOCATOR_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl DiscoveryConfig {
    /// Set the process property key.
    #[must_use]
    pub fn with_property_key(mut self, key: impl Into<String>) -> Self {
        self.property_key = key.into();
        self
    }

    /// Set the override environment variable.
    #[must_use]
    pub fn with_env_var(mut self, var: impl Into<String>) -> Self {
        self.env_var = var.into();
        self
    }

    /// Set the search-path variable.
    #[must_use]
    pub fn with_search_path_var(mut self, var: impl Into<String>) -> Self {
        self.search_path_var = var.into();
        self
    }

    /// Set the executable base name.
    #[must_use]
    pub fn with_executable_name(mut self, name: impl Into<String>) -> Self {
        self.executable_name = name.into();
        self
    }

    /// Set the registry subkey.
    #[must_use]
    pub fn with_registry_subkey(mut self, subkey: impl Into<String>) -> Self {
        self.registry_subkey = subkey.into();
        self
    }

    /// Set the legacy dotfile name.
    #[must_use]
    pub fn with_legacy_file_name(mut self, name: impl Into<String>) -> Self {
        self.legacy_file_name = name.into();
        self
    }

    /// Set the locator program.
    #[must_use]
    pub fn with_locator_program(mut self, program: impl Into<String>) -> Self {
        self.locator_program = program.into();
        self
    }

    /// Set the arguments passed ahead of the executable name.
    #[must_use]
    pub fn with_locator_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.locator_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Set the locator deadline.
    #[must_use]
    pub const fn with_locator_timeout(mut self, timeout: Duration) -> Self {
        self.locator_timeout = timeout;
        self
    }

    /// Set the locator poll interval.
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Check the configuration for values the strategies cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.executable_name.is_empty() {
            return Err(ConfigError::EmptyExecutableName);
        }
        if self.executable_name.contains('/') || self.executable_name.contains('\\') {
            return Err(ConfigError::ExecutableNameHasSeparator(
                self.executable_name.clone(),
            ));
        }
        if self.locator_program.trim().is_empty() {
            return Err(ConfigError::EmptyLocatorProgram);
        }
        if self.locator_timeout.is_zero() {
            return Err(ConfigError::ZeroDuration("locator timeout"));
        }
        if self.poll_interval.is_zero() {
            return Err(ConfigError::ZeroDuration("poll interval"));
        }
        Ok(())
    }
}
