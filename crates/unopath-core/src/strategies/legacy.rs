//! Legacy version-registry dotfile lookup.
//!
//! Old installations recorded themselves in `~/.sversionrc`:
//!
//! ```text
//! [Versions]
//! ; comment
//! OpenOffice.org 1.1=file:///opt/openoffice.org1.1/
//! LibreOffice 3=file:///opt/libreoffice3/program/
//!
//! [Other]
//! ```
//!
//! Later entries are newer, so entries are tried last to first.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::Context;
use super::file_url::{decode_file_url, to_local_path};
use super::resolve::installation_dir_of;

/// Resolve the most recent usable entry of the legacy dotfile.
pub(crate) fn lookup(ctx: &Context<'_>) -> Option<PathBuf> {
    let Some(home) = ctx.host.home_dir() else {
        debug!("No home directory; skipping legacy version file");
        return None;
    };
    let path = home.join(&ctx.config.legacy_file_name);
    let file = match File::open(&path) {
        Ok(file) => file,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Legacy version file not readable");
            return None;
        }
    };

    let entries = read_section(BufReader::new(file), &ctx.config.legacy_section, &path);
    resolve_newest(&entries, &ctx.config.executable_name)
}

/// Collect the entry lines of `section`.
///
/// Lines are skipped up to a line equal to the header, then lines not starting
/// with `;` are kept until the first empty line. Whitespace is significant in
/// both checks. A read error ends collection but keeps what was read so far.
pub(crate) fn read_section(reader: impl BufRead, section: &str, origin: &Path) -> Vec<String> {
    let lines = reader.lines().map_while(|line| match line {
        Ok(line) => Some(line),
        Err(e) => {
            warn!(path = %origin.display(), error = %e, "Reading legacy version file failed");
            None
        }
    });

    let mut entries = Vec::new();
    let mut in_section = false;
    for line in lines {
        if !in_section {
            in_section = line == section;
            continue;
        }
        if line.is_empty() {
            break;
        }
        if !line.starts_with(';') {
            entries.push(line);
        }
    }

    if !in_section {
        debug!(path = %origin.display(), section, "Section header not found");
    }
    entries
}

/// Split a `key=value` line; anything other than exactly one `=` with both
/// sides non-empty is rejected. Neither side is trimmed.
pub(crate) fn parse_entry(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    if value.contains('=') || key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

/// Try entries newest first; the first that decodes and resolves wins.
pub(crate) fn resolve_newest(entries: &[String], executable: &str) -> Option<PathBuf> {
    for line in entries.iter().rev() {
        let Some((version, url)) = parse_entry(line) else {
            debug!(line = %line, "Skipping malformed legacy entry");
            continue;
        };

        let decoded = match decode_file_url(url) {
            Ok(decoded) => decoded,
            Err(e) => {
                debug!(version, url, error = %e, "Skipping undecodable legacy entry");
                continue;
            }
        };

        let dir = to_local_path(&decoded);
        if !dir.is_absolute() {
            debug!(version, path = %dir.display(), "Skipping relative legacy entry");
            continue;
        }

        match installation_dir_of(&dir.join(executable)) {
            Ok(Some(found)) => {
                debug!(version, path = %found.display(), "Installation found in legacy version file");
                return Some(found);
            }
            Ok(None) => debug!(version, path = %dir.display(), "Legacy entry has no executable"),
            Err(e) => warn!(version, path = %dir.display(), error = %e, "Cannot resolve legacy entry"),
        }
    }
    None
}
