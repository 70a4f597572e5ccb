//! Decode-url command handler.

use std::path::PathBuf;

use tracing::debug;
use unopath_core::{decode_file_url, to_local_path};

use crate::error::CliError;

/// Execute the decode-url command.
pub fn execute(url: &str) -> Result<(), CliError> {
    let path = decode(url)?;
    println!("{}", path.display());
    Ok(())
}

fn decode(url: &str) -> Result<PathBuf, CliError> {
    let decoded = decode_file_url(url)?;
    debug!(url, decoded = %decoded, "Decoded legacy location URL");
    Ok(to_local_path(&decoded))
}

#[cfg(test)]
mod tests {
    use super::*;
    use unopath_core::UrlDecodeError;

    #[test]
    fn test_escaped_space() {
        assert_eq!(
            decode("file://localhost/opt/app%20x/").unwrap(),
            PathBuf::from("/opt/app x/")
        );
    }

    #[test]
    fn test_foreign_host_is_rejected() {
        let err = decode("file://otherhost/path").unwrap_err();
        assert!(matches!(
            err,
            CliError::Decode(UrlDecodeError::ForeignHost(_))
        ));
        assert_eq!(err.exit_code(), 65);
    }
}
