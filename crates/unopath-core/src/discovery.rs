//! The discovery chain coordinator.
//!
//! Strategies run in fixed priority order and the first success wins:
//!
//! 1. process property override
//! 2. environment variable override
//! 3. Windows: registry lookup, and nothing after it
//! 4. Unix-like: search-path scan, then locator subprocess, then legacy dotfile
//!
//! When the OS family cannot be determined the chain stops after the overrides.
//! The cancellation token is checked before every strategy, so a cancelled
//! finder returns [`DiscoveryError::Cancelled`] whichever strategy was next.

use std::path::PathBuf;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::DiscoveryConfig;
use crate::error::{ConfigError, DiscoveryError};
use crate::host::{HostEnvironment, OsFamily, SystemHost};
use crate::report::{DiscoveryReport, DiscoverySource};
use crate::strategies::registry::{NativeRegistry, RegistryReader};
use crate::strategies::{Context, legacy, locator, overrides, path_scan, registry};

/// Locates an installation directory.
///
/// Every call re-reads the host; nothing is cached between calls.
pub struct InstallationFinder {
    config: DiscoveryConfig,
    host: Box<dyn HostEnvironment>,
    registry: Box<dyn RegistryReader>,
    cancel: CancellationToken,
}

impl std::fmt::Debug for InstallationFinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstallationFinder")
            .field("config", &self.config)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}

impl InstallationFinder {
    /// Create a finder over the live process environment.
    pub fn new(config: DiscoveryConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            host: Box::new(SystemHost::new()),
            registry: Box::new(NativeRegistry),
            cancel: CancellationToken::new(),
        })
    }

    /// Replace the host environment.
    #[must_use]
    pub fn with_host(mut self, host: impl HostEnvironment + 'static) -> Self {
        self.host = Box::new(host);
        self
    }

    /// Replace the registry reader.
    #[must_use]
    pub fn with_registry(mut self, registry: impl RegistryReader + 'static) -> Self {
        self.registry = Box::new(registry);
        self
    }

    /// Use `cancel` to abort an in-flight locator subprocess.
    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub const fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// A clone of the token that cancels this finder.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Run the chain and return the first directory found.
    ///
    /// `Ok(None)` means every applicable strategy came up empty. The only
    /// error is cancellation.
    pub fn find(&self) -> Result<Option<PathBuf>, DiscoveryError> {
        Ok(self.find_with_report()?.discovery.map(|d| d.path))
    }

    /// Run the chain and report what every strategy did.
    pub fn find_with_report(&self) -> Result<DiscoveryReport, DiscoveryError> {
        let ctx = Context {
            config: &self.config,
            host: self.host.as_ref(),
            registry: self.registry.as_ref(),
            cancel: &self.cancel,
        };

        let os_family = ctx.host.os_family();
        let mut report = DiscoveryReport::new(os_family);

        if run(&ctx, &mut report, DiscoverySource::Property, || {
            Ok(overrides::from_property(&ctx))
        })? || run(&ctx, &mut report, DiscoverySource::Environment, || {
            Ok(overrides::from_env(&ctx))
        })? {
            return Ok(finish(report));
        }

        let Some(os_family) = os_family else {
            debug!("Operating system family is unknown; stopping after overrides");
            return Ok(finish(report));
        };

        match os_family {
            OsFamily::Windows => {
                run(&ctx, &mut report, DiscoverySource::Registry, || {
                    Ok(registry::lookup(&ctx))
                })?;
            }
            OsFamily::Unix => {
                if !run(&ctx, &mut report, DiscoverySource::SearchPath, || {
                    Ok(path_scan::lookup(&ctx))
                })? && !run(&ctx, &mut report, DiscoverySource::Locator, || {
                    locator::lookup(&ctx)
                })? {
                    run(&ctx, &mut report, DiscoverySource::LegacyConfig, || {
                        Ok(legacy::lookup(&ctx))
                    })?;
                }
            }
        }

        Ok(finish(report))
    }
}

/// Run one strategy, record it, and report whether it found something.
fn run(
    ctx: &Context<'_>,
    report: &mut DiscoveryReport,
    source: DiscoverySource,
    strategy: impl FnOnce() -> Result<Option<PathBuf>, DiscoveryError>,
) -> Result<bool, DiscoveryError> {
    if ctx.cancel.is_cancelled() {
        debug!(%source, "Discovery cancelled before strategy");
        return Err(DiscoveryError::Cancelled);
    }
    debug!(%source, "Trying discovery strategy");
    let found = strategy().inspect_err(|e| debug!(%source, error = %e, "Discovery aborted"))?;
    report.record(source, found.as_ref());
    Ok(found.is_some())
}

fn finish(report: DiscoveryReport) -> DiscoveryReport {
    match &report.discovery {
        Some(found) => info!(
            path = %found.path.display(),
            source = %found.source,
            "Installation found"
        ),
        None => debug!("No installation found"),
    }
    report
}

/// Locate the default installation with the live process environment.
pub fn find_installation_path() -> Result<Option<PathBuf>, DiscoveryError> {
    InstallationFinder {
        config: DiscoveryConfig::default(),
        host: Box::new(SystemHost::new()),
        registry: Box::new(NativeRegistry),
        cancel: CancellationToken::new(),
    }
    .find()
}
