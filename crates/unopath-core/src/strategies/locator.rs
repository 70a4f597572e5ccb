//! Subprocess lookup through an external "which"-style locator.
//!
//! The locator's stderr is drained on its own thread before stdout is read;
//! otherwise a locator that fills its stderr pipe would block forever while we
//! wait on stdout. Stdout lines are forwarded over a channel so the calling
//! thread can keep checking for cancellation and the deadline between lines.

use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStderr, ChildStdout, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Instant;

use tracing::{debug, warn};

use super::Context;
use super::resolve::installation_dir_of;
use crate::error::DiscoveryError;

/// Run the locator and resolve the first usable path it prints.
///
/// Launch, read, and encoding failures yield `Ok(None)`. Cancellation kills
/// the locator and yields `Err(DiscoveryError::Cancelled)`.
pub(crate) fn lookup(ctx: &Context<'_>) -> Result<Option<PathBuf>, DiscoveryError> {
    let program = &ctx.config.locator_program;
    let executable = &ctx.config.executable_name;

    let mut child = match Command::new(program)
        .args(&ctx.config.locator_args)
        .arg(executable)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
    {
        Ok(child) => child,
        Err(e) => {
            warn!(program = %program, error = %e, "Failed to start locator");
            return Ok(None);
        }
    };

    if let Some(stderr) = child.stderr.take() {
        if let Err(e) = spawn_drain(stderr) {
            warn!(error = %e, "Failed to start locator stderr drain");
            terminate(&mut child);
            return Ok(None);
        }
    }

    let Some(stdout) = child.stdout.take() else {
        terminate(&mut child);
        return Ok(None);
    };
    let lines = match spawn_line_reader(stdout) {
        Ok(lines) => lines,
        Err(e) => {
            warn!(error = %e, "Failed to start locator output reader");
            terminate(&mut child);
            return Ok(None);
        }
    };

    let deadline = Instant::now() + ctx.config.locator_timeout;
    let mut found = None;

    loop {
        if ctx.cancel.is_cancelled() {
            terminate(&mut child);
            return Err(DiscoveryError::Cancelled);
        }

        match lines.recv_timeout(ctx.config.poll_interval) {
            Ok(Ok(line)) => {
                // Keep draining after a match so the locator can exit cleanly.
                if found.is_none() {
                    found = candidate_in_line(&line, executable);
                }
            }
            Ok(Err(e)) => {
                warn!(program = %program, error = %e, "Reading locator output failed");
                terminate(&mut child);
                return Ok(None);
            }
            Err(RecvTimeoutError::Timeout) => {
                if Instant::now() >= deadline {
                    warn!(program = %program, timeout = ?ctx.config.locator_timeout, "Locator timed out");
                    terminate(&mut child);
                    return Ok(found);
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    wait_for_exit(&mut child, deadline, ctx)?;
    Ok(found)
}

/// Resolve the installation directory named in one line of locator output.
///
/// Finds the rightmost occurrence of `executable`, then tries every substring
/// that ends with it, starting from offset 0 and moving right, as a filesystem
/// path. The first one that exists wins.
///
/// A line such as `app: /opt/app/bin/app` is handled by the later offsets, but
/// a shorter prefix that happens to exist (including a relative one, which is
/// resolved against the working directory) is accepted first.
pub(crate) fn candidate_in_line(line: &str, executable: &str) -> Option<PathBuf> {
    let index = line.rfind(executable)?;
    let end = index + executable.len();

    for start in (0..=index).filter(|&i| line.is_char_boundary(i)) {
        let candidate = Path::new(&line[start..end]);
        match installation_dir_of(candidate) {
            Ok(Some(dir)) => {
                debug!(candidate = %candidate.display(), path = %dir.display(), "Locator output resolved");
                return Some(dir);
            }
            Ok(None) => {}
            Err(e) => debug!(candidate = %candidate.display(), error = %e, "Skipping locator candidate"),
        }
    }
    None
}

fn spawn_drain(stderr: ChildStderr) -> io::Result<()> {
    thread::Builder::new()
        .name("locator-stderr".to_string())
        .spawn(move || {
            let mut stderr = stderr;
            if let Err(e) = io::copy(&mut stderr, &mut io::sink()) {
                debug!(error = %e, "Locator stderr drain stopped");
            }
        })?;
    Ok(())
}

fn spawn_line_reader(stdout: ChildStdout) -> io::Result<Receiver<io::Result<String>>> {
    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name("locator-stdout".to_string())
        .spawn(move || {
            for line in BufReader::new(stdout).lines() {
                let failed = line.is_err();
                if tx.send(line).is_err() || failed {
                    break;
                }
            }
        })?;
    Ok(rx)
}

fn wait_for_exit(
    child: &mut Child,
    deadline: Instant,
    ctx: &Context<'_>,
) -> Result<(), DiscoveryError> {
    loop {
        if ctx.cancel.is_cancelled() {
            terminate(child);
            return Err(DiscoveryError::Cancelled);
        }
        match child.try_wait() {
            Ok(Some(status)) => {
                debug!(%status, "Locator exited");
                return Ok(());
            }
            Ok(None) if Instant::now() >= deadline => {
                warn!("Locator did not exit before the deadline");
                terminate(child);
                return Ok(());
            }
            Ok(None) => thread::sleep(ctx.config.poll_interval),
            Err(e) => {
                warn!(error = %e, "Waiting for locator failed");
                terminate(child);
                return Ok(());
            }
        }
    }
}

/// Kill and reap the locator.
fn terminate(child: &mut Child) {
    if let Err(e) = child.kill() {
        debug!(error = %e, "Killing locator failed");
    }
    if let Err(e) = child.wait() {
        debug!(error = %e, "Reaping locator failed");
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::config::DiscoveryConfig;
    use crate::host::{OsFamily, StaticHost};
    use crate::strategies::registry::NativeRegistry;
    use crate::strategies::tests::with_config_context;
    use crate::test_utils::install_executable;
    use std::fs;
    use std::time::Duration;
    use tempfile::tempdir;
    use tokio_util::sync::CancellationToken;

    /// A locator that runs `script` through `sh`, with the executable name as `$1`.
    fn shell_locator(script: &str) -> DiscoveryConfig {
        DiscoveryConfig::default()
            .with_locator_program("/bin/sh")
            .with_locator_args(["-c", script, "locator"])
            .with_locator_timeout(Duration::from_secs(5))
            .with_poll_interval(Duration::from_millis(10))
    }

    fn run(config: &DiscoveryConfig) -> Result<Option<PathBuf>, DiscoveryError> {
        let host = StaticHost::with_family(OsFamily::Unix);
        with_config_context(config, &host, lookup)
    }

    #[test]
    fn test_rightmost_token_with_leading_noise() {
        let temp = tempdir().unwrap();
        let exe = install_executable(&temp.path().join("program"), "libreoffice");
        let line = format!("libreoffice: {}", exe.display());

        assert_eq!(
            candidate_in_line(&line, "libreoffice"),
            Some(fs::canonicalize(temp.path().join("program")).unwrap())
        );
    }

    #[test]
    fn test_line_without_token_is_none() {
        assert_eq!(candidate_in_line("no match here", "libreoffice"), None);
        assert_eq!(candidate_in_line("", "libreoffice"), None);
    }

    #[test]
    fn test_locator_output_is_resolved() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("office/program");
        install_executable(&dir, "libreoffice");

        let config = shell_locator(&format!("echo \"{}/$1\"", dir.display()));
        assert_eq!(run(&config).unwrap(), Some(fs::canonicalize(&dir).unwrap()));
    }

    #[test]
    fn test_first_resolvable_line_wins() {
        let temp = tempdir().unwrap();
        let first = temp.path().join("a");
        let second = temp.path().join("b");
        install_executable(&first, "libreoffice");
        install_executable(&second, "libreoffice");

        let config = shell_locator(&format!(
            "echo /nowhere/$1; echo \"{}/$1\"; echo \"{}/$1\"",
            first.display(),
            second.display()
        ));
        assert_eq!(run(&config).unwrap(), Some(fs::canonicalize(&first).unwrap()));
    }

    #[test]
    fn test_flooded_stderr_does_not_deadlock() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("program");
        install_executable(&dir, "libreoffice");

        // Well past any pipe buffer, written before a single stdout byte.
        let config = shell_locator(&format!(
            "head -c 1048576 /dev/zero >&2; echo \"{}/$1\"",
            dir.display()
        ));
        assert_eq!(run(&config).unwrap(), Some(fs::canonicalize(&dir).unwrap()));
    }

    #[test]
    fn test_missing_locator_is_absent() {
        let config = DiscoveryConfig::default().with_locator_program("/nonexistent/locator");
        assert_eq!(run(&config).unwrap(), None);
    }

    #[test]
    fn test_non_utf8_output_aborts_lookup() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("program");
        install_executable(&dir, "libreoffice");

        let config = shell_locator(&format!(
            "printf '\\377\\n'; echo \"{}/$1\"",
            dir.display()
        ));
        assert_eq!(run(&config).unwrap(), None);
    }

    #[test]
    fn test_deadline_kills_a_hung_locator() {
        let config = shell_locator("sleep 30").with_locator_timeout(Duration::from_millis(200));

        let started = Instant::now();
        assert_eq!(run(&config).unwrap(), None);
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn test_cancellation_propagates() {
        let config = shell_locator("sleep 30");
        let host = StaticHost::with_family(OsFamily::Unix);
        let cancel = CancellationToken::new();
        let ctx = Context {
            config: &config,
            host: &host,
            registry: &NativeRegistry,
            cancel: &cancel,
        };

        let trigger = cancel.clone();
        let canceller = thread::spawn(move || {
            thread::sleep(Duration::from_millis(100));
            trigger.cancel();
        });

        let started = Instant::now();
        assert_eq!(lookup(&ctx), Err(DiscoveryError::Cancelled));
        assert!(started.elapsed() < Duration::from_secs(5));
        canceller.join().unwrap();
    }

    #[test]
    fn test_nonexistent_output_path_is_absent() {
        let temp = tempdir().unwrap();
        let config = shell_locator(&format!("echo \"{}/$1\"", temp.path().display()));
        assert_eq!(run(&config).unwrap(), None);
    }
}
