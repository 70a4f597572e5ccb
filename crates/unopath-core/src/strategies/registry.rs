//! Windows registry lookup.
//!
//! Reads the default (unnamed) value of a fixed subkey, trying the per-user
//! root before the system-wide root. Within each root the 32-bit
//! (`WOW6432Node`) view is read before the 64-bit one.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, warn};

use super::Context;
use crate::error::RegistryError;

/// Registry root scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RegistryRoot {
    /// `HKEY_CURRENT_USER`
    CurrentUser,
    /// `HKEY_LOCAL_MACHINE`
    LocalMachine,
}

impl RegistryRoot {
    /// Roots in lookup order.
    pub const SEARCH_ORDER: [Self; 2] = [Self::CurrentUser, Self::LocalMachine];
}

impl fmt::Display for RegistryRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CurrentUser => write!(f, "HKEY_CURRENT_USER"),
            Self::LocalMachine => write!(f, "HKEY_LOCAL_MACHINE"),
        }
    }
}

/// Registry view for WOW64 redirection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RegistryView {
    /// The 64-bit registry view.
    Bits64,
    /// The 32-bit (`WOW6432Node`) registry view.
    Bits32,
}

impl RegistryView {
    /// Views in lookup order.
    pub const SEARCH_ORDER: [Self; 2] = [Self::Bits32, Self::Bits64];
}

/// Port for reading string values from the native configuration store.
#[cfg_attr(test, mockall::automock)]
pub trait RegistryReader: Send + Sync {
    /// Read the default value of `subkey` under `root` in the given view.
    fn default_value(
        &self,
        root: RegistryRoot,
        view: RegistryView,
        subkey: &str,
    ) -> Result<String, RegistryError>;
}

/// Reads the real Windows registry; reports `Unsupported` elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeRegistry;

impl RegistryReader for NativeRegistry {
    fn default_value(
        &self,
        root: RegistryRoot,
        view: RegistryView,
        subkey: &str,
    ) -> Result<String, RegistryError> {
        #[cfg(windows)]
        {
            native::read_default_value(root, view, subkey)
        }

        #[cfg(not(windows))]
        {
            let _ = (root, view, subkey);
            Err(RegistryError::Unsupported)
        }
    }
}

/// Query both roots for the installation path.
pub(crate) fn lookup(ctx: &Context<'_>) -> Option<PathBuf> {
    let subkey = &ctx.config.registry_subkey;

    for root in RegistryRoot::SEARCH_ORDER {
        for view in RegistryView::SEARCH_ORDER {
            match ctx.registry.default_value(root, view, subkey) {
                Ok(value) if !value.is_empty() => {
                    debug!(%root, ?view, path = %value, "Installation path found in registry");
                    return Some(PathBuf::from(value));
                }
                Ok(_) => debug!(%root, ?view, "Registry value is empty"),
                Err(e @ RegistryError::NotFound(_)) => debug!(%root, ?view, error = %e),
                Err(e) => warn!(%root, ?view, error = %e, "Reading registry failed"),
            }
        }
    }

    debug!(subkey = %subkey, "No installation path under either registry root");
    None
}

#[cfg(windows)]
mod native {
    use windows::Win32::Foundation::{
        ERROR_ACCESS_DENIED, ERROR_FILE_NOT_FOUND, ERROR_SUCCESS, WIN32_ERROR,
    };
    use windows::Win32::System::Registry::{
        HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE, RRF_RT_REG_SZ, RRF_SUBKEY_WOW6432KEY,
        RRF_SUBKEY_WOW6464KEY, RegGetValueW,
    };
    use windows::core::PCWSTR;

    use super::{RegistryRoot, RegistryView};
    use crate::error::RegistryError;

    fn check(status: WIN32_ERROR, key: &str) -> Result<(), RegistryError> {
        match status {
            ERROR_SUCCESS => Ok(()),
            ERROR_FILE_NOT_FOUND => Err(RegistryError::NotFound(key.to_string())),
            ERROR_ACCESS_DENIED => Err(RegistryError::AccessDenied(key.to_string())),
            other => Err(RegistryError::Os {
                key: key.to_string(),
                code: other.0,
            }),
        }
    }

    #[allow(unsafe_code)]
    pub(super) fn read_default_value(
        root: RegistryRoot,
        view: RegistryView,
        subkey: &str,
    ) -> Result<String, RegistryError> {
        let hkey = match root {
            RegistryRoot::CurrentUser => HKEY_CURRENT_USER,
            RegistryRoot::LocalMachine => HKEY_LOCAL_MACHINE,
        };
        let flags = RRF_RT_REG_SZ
            | match view {
                RegistryView::Bits64 => RRF_SUBKEY_WOW6464KEY,
                RegistryView::Bits32 => RRF_SUBKEY_WOW6432KEY,
            };
        let key_name = format!("{root}\\{subkey}");
        let wide: Vec<u16> = subkey.encode_utf16().chain(std::iter::once(0)).collect();

        // First call sizes the buffer, second call fills it.
        let mut size: u32 = 0;
        // SAFETY: `wide` is NUL-terminated and outlives the call; `size` is a valid out pointer.
        let status = unsafe {
            RegGetValueW(
                hkey,
                PCWSTR(wide.as_ptr()),
                PCWSTR::null(),
                flags,
                None,
                None,
                Some(&raw mut size),
            )
        };
        check(status, &key_name)?;

        let mut buffer = vec![0u16; (size as usize).div_ceil(2)];
        // SAFETY: `buffer` holds at least `size` bytes and `size` reports its capacity.
        let status = unsafe {
            RegGetValueW(
                hkey,
                PCWSTR(wide.as_ptr()),
                PCWSTR::null(),
                flags,
                None,
                Some(buffer.as_mut_ptr().cast()),
                Some(&raw mut size),
            )
        };
        check(status, &key_name)?;

        let len = buffer.iter().position(|&c| c == 0).unwrap_or(buffer.len());
        Ok(String::from_utf16_lossy(&buffer[..len]))
    }
}
