//! Search-path scan for the target executable (Unix-like hosts).

use std::env;
use std::ffi::OsStr;
use std::path::PathBuf;

use tracing::{debug, warn};

use super::Context;
use super::resolve::installation_dir_of;

/// Scan the configured search-path variable.
///
/// An unreadable variable ends the lookup before any directory is touched.
/// Values that are not valid Unicode are still scanned entry by entry.
pub(crate) fn lookup(ctx: &Context<'_>) -> Option<PathBuf> {
    let var = &ctx.config.search_path_var;
    let search_path = match ctx.host.env_var(var) {
        Ok(Some(value)) => value,
        Ok(None) => {
            debug!(var = %var, "Search path variable is not set");
            return None;
        }
        Err(e) => {
            warn!(var = %var, error = %e, "Cannot read search path variable");
            return None;
        }
    };

    scan(&search_path, &ctx.config.executable_name)
}

/// Return the canonical directory of the first `<entry>/<executable>` that exists.
///
/// Entries are tried in declared order; empty entries are ignored. A failure on
/// one entry is logged and the scan moves on.
pub(crate) fn scan(search_path: &OsStr, executable: &str) -> Option<PathBuf> {
    for dir in env::split_paths(search_path).filter(|d| !d.as_os_str().is_empty()) {
        let candidate = dir.join(executable);
        match installation_dir_of(&candidate) {
            Ok(Some(found)) => {
                debug!(
                    candidate = %candidate.display(),
                    path = %found.display(),
                    "Executable found on search path"
                );
                return Some(found);
            }
            Ok(None) => {}
            Err(e) => {
                warn!(candidate = %candidate.display(), error = %e, "Skipping search path entry");
            }
        }
    }
    None
}
