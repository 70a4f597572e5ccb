//! Shared helpers for unopath-core integration tests.

#![allow(dead_code)]

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Placeholder in fixture files replaced by the test's temporary root.
pub const ROOT_PLACEHOLDER: &str = "@ROOT@";

/// Read a bundled fixture from `tests/fixtures/`.
pub fn fixture(name: &str) -> io::Result<Vec<u8>> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    match fs::read(&path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("fixture {name} not found at {}", path.display()),
        )),
        other => other,
    }
}

/// Read a fixture as text with `@ROOT@` replaced by `root`.
pub fn fixture_text(name: &str, root: &Path) -> String {
    let bytes = fixture(name).unwrap();
    String::from_utf8(bytes)
        .unwrap()
        .replace(ROOT_PLACEHOLDER, &root.display().to_string())
}

/// Create `<dir>/<name>` as an executable stub, creating `dir` as needed.
///
/// Integration tests cannot reach the crate's `cfg(test)` helpers, so this
/// mirrors `test_utils::install_executable`.
pub fn install_executable(dir: &Path, name: &str) -> PathBuf {
    fs::create_dir_all(dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, b"#!/bin/sh\nexit 0\n").unwrap();

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    path
}
