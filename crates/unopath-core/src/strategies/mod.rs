//! Discovery strategies, one module per lookup method.
//!
//! Each strategy is a plain function over a [`Context`]. A strategy contains its
//! own failures: anything short of cancellation comes back as "not found" and
//! leaves a log line behind. The fixed ordering lives in `discovery`.

pub(crate) mod file_url;
pub(crate) mod legacy;
pub(crate) mod locator;
pub(crate) mod overrides;
pub(crate) mod path_scan;
pub(crate) mod registry;
mod resolve;

use tokio_util::sync::CancellationToken;

use crate::config::DiscoveryConfig;
use crate::host::HostEnvironment;
use registry::RegistryReader;

/// Everything a strategy may consult during one discovery call.
pub(crate) struct Context<'a> {
    pub config: &'a DiscoveryConfig,
    pub host: &'a dyn HostEnvironment,
    pub registry: &'a dyn RegistryReader,
    pub cancel: &'a CancellationToken,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::host::StaticHost;
    use registry::NativeRegistry;

    /// Run `f` with the default config against `host`.
    pub(crate) fn with_context<R>(host: &StaticHost, f: impl FnOnce(&Context<'_>) -> R) -> R {
        with_config_context(&DiscoveryConfig::default(), host, f)
    }

    /// Run `f` with `config` against `host`.
    pub(crate) fn with_config_context<R>(
        config: &DiscoveryConfig,
        host: &StaticHost,
        f: impl FnOnce(&Context<'_>) -> R,
    ) -> R {
        let cancel = CancellationToken::new();
        let ctx = Context {
            config,
            host,
            registry: &NativeRegistry,
            cancel: &cancel,
        };
        f(&ctx)
    }

    /// Run `f` with the default config, `host`, and a custom registry reader.
    pub(crate) fn with_registry_context<R>(
        host: &StaticHost,
        registry: &dyn RegistryReader,
        f: impl FnOnce(&Context<'_>) -> R,
    ) -> R {
        let config = DiscoveryConfig::default();
        let cancel = CancellationToken::new();
        let ctx = Context {
            config: &config,
            host,
            registry,
            cancel: &cancel,
        };
        f(&ctx)
    }
}
