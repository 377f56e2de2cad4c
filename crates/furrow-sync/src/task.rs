use std::sync::Arc;

use furrow_core::models::CoverageSessionSummary;
use tokio::task::JoinHandle;

use crate::ports::SyncClient;

/// Submit a finished session in the background.
///
/// Fire and forget: the session is already settled locally, so a failed
/// submission is logged and dropped rather than surfaced. Await the handle
/// only when shutdown needs to drain in-flight work.
pub fn spawn_submit(
    client: Arc<dyn SyncClient>,
    summary: CoverageSessionSummary,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        match client.submit_session(&summary).await {
            Ok(()) => {
                tracing::info!(session_id = %summary.session_id, "Session sync finished");
            }
            Err(err) => {
                tracing::warn!(
                    session_id = %summary.session_id,
                    error = %err,
                    "Session sync failed; summary dropped"
                );
            }
        }
    })
}
