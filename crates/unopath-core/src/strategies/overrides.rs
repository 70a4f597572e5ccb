//! Explicit overrides: a process property, then an environment variable.
//!
//! Overrides are trusted as given. The value is returned unmodified and is not
//! checked against the filesystem.

use std::ffi::OsString;
use std::path::PathBuf;

use tracing::{debug, warn};

use super::Context;

/// Read the override property.
pub(crate) fn from_property(ctx: &Context<'_>) -> Option<PathBuf> {
    let key = &ctx.config.property_key;
    match ctx.host.property(key) {
        Ok(value) => non_empty(value.map(Into::into)).inspect(|path| {
            debug!(property = %key, path = %path.display(), "Installation path set by property");
        }),
        Err(e) => {
            warn!(property = %key, error = %e, "Cannot read override property");
            None
        }
    }
}

/// Read the override environment variable.
pub(crate) fn from_env(ctx: &Context<'_>) -> Option<PathBuf> {
    let var = &ctx.config.env_var;
    match ctx.host.env_var(var) {
        Ok(value) => non_empty(value).inspect(|path| {
            debug!(var = %var, path = %path.display(), "Installation path set by environment");
        }),
        Err(e) => {
            warn!(var = %var, error = %e, "Cannot read override environment variable");
            None
        }
    }
}

fn non_empty(value: Option<OsString>) -> Option<PathBuf> {
    value.filter(|v| !v.is_empty()).map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{OsFamily, StaticHost};
    use crate::strategies::tests::with_context;

    #[test]
    fn test_property_value_is_returned_verbatim() {
        let host = StaticHost::with_family(OsFamily::Unix)
            .with_property("com.sun.star.lib.loader.unopath", " relative/../dir ");
        with_context(&host, |ctx| {
            assert_eq!(from_property(ctx), Some(PathBuf::from(" relative/../dir ")));
        });
    }

    #[test]
    fn test_env_value_is_returned_verbatim() {
        let host = StaticHost::with_family(OsFamily::Unix).with_env("UNO_PATH", "/does/not/exist");
        with_context(&host, |ctx| {
            assert_eq!(from_env(ctx), Some(PathBuf::from("/does/not/exist")));
        });
    }

    #[test]
    fn test_denied_reads_are_absent() {
        let host = StaticHost::with_family(OsFamily::Unix)
            .deny_property("com.sun.star.lib.loader.unopath")
            .deny_env("UNO_PATH");
        with_context(&host, |ctx| {
            assert_eq!(from_property(ctx), None);
            assert_eq!(from_env(ctx), None);
        });
    }

    #[test]
    fn test_empty_values_are_absent() {
        let host = StaticHost::with_family(OsFamily::Unix)
            .with_property("com.sun.star.lib.loader.unopath", "")
            .with_env("UNO_PATH", "");
        with_context(&host, |ctx| {
            assert_eq!(from_property(ctx), None);
            assert_eq!(from_env(ctx), None);
        });
    }

    #[cfg(unix)]
    #[test]
    fn test_non_unicode_env_value_is_returned_verbatim() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let raw = OsStr::from_bytes(b"/opt/caf\xe9/program");
        let host = StaticHost::with_family(OsFamily::Unix).with_env("UNO_PATH", raw);
        with_context(&host, |ctx| {
            assert_eq!(from_env(ctx), Some(PathBuf::from(raw)));
        });
    }
}
