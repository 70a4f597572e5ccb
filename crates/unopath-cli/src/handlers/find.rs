//! Find command handler.

use std::path::PathBuf;

use unopath_core::InstallationFinder;

use crate::error::CliError;

/// Execute the find command.
///
/// Prints the installation directory, or fails with [`CliError::NotFound`].
pub fn execute(finder: &InstallationFinder) -> Result<(), CliError> {
    let path = locate(finder)?;
    println!("{}", path.display());
    Ok(())
}

fn locate(finder: &InstallationFinder) -> Result<PathBuf, CliError> {
    finder.find()?.ok_or(CliError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use unopath_core::{DiscoveryConfig, OsFamily, StaticHost};

    fn finder(host: StaticHost) -> InstallationFinder {
        InstallationFinder::new(
            DiscoveryConfig::default().with_locator_program("/nonexistent/locator"),
        )
        .unwrap()
        .with_host(host)
    }

    #[test]
    fn test_override_is_printed_path() {
        let host = StaticHost::with_family(OsFamily::Unix).with_env("UNO_PATH", "/opt/lo/program");
        assert_eq!(
            locate(&finder(host)).unwrap(),
            PathBuf::from("/opt/lo/program")
        );
    }

    #[test]
    fn test_absence_maps_to_not_found() {
        let err = locate(&finder(StaticHost::new())).unwrap_err();
        assert!(matches!(err, CliError::NotFound));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_interrupt_before_any_strategy_exits_130() {
        let cancel = tokio_util::sync::CancellationToken::new();
        cancel.cancel();
        let host = StaticHost::with_family(OsFamily::Unix).with_env("UNO_PATH", "/opt/lo/program");

        let err = locate(&finder(host).with_cancellation(cancel)).unwrap_err();
        assert!(matches!(err, CliError::Cancelled));
        assert_eq!(err.exit_code(), 130);
    }
}
