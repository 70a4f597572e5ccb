//! Runs a blocking handler while listening for Ctrl-C.

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::CliError;

/// Run `job` on the blocking pool; Ctrl-C trips `cancel`.
pub async fn run_cancellable<F>(cancel: CancellationToken, job: F) -> Result<(), CliError>
where
    F: FnOnce() -> Result<(), CliError> + Send + 'static,
{
    let watcher = tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                debug!("Interrupt received; cancelling discovery");
                cancel.cancel();
            }
            Err(e) => warn!(error = %e, "Cannot listen for Ctrl-C"),
        }
    });

    let result = tokio::task::spawn_blocking(job).await;
    watcher.abort();
    result.map_err(|e| CliError::Internal(e.to_string()))?
}
