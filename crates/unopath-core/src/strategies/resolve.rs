//! "Exists, then canonical parent" resolution shared by the filesystem strategies.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Resolve an executable candidate to the directory that really contains it.
///
/// Returns `Ok(None)` when the candidate does not exist. When it does, symlinks
/// are dereferenced and the parent of the canonical path is returned, so a
/// `/usr/bin/app -> /opt/app-1.2/bin/app` link yields `/opt/app-1.2/bin`.
pub(crate) fn installation_dir_of(candidate: &Path) -> io::Result<Option<PathBuf>> {
    if !candidate.try_exists()? {
        return Ok(None);
    }
    let canonical = fs::canonicalize(candidate)?;
    Ok(canonical.parent().map(Path::to_path_buf))
}
