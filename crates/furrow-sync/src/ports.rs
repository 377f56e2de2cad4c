//! Sync port definition

use async_trait::async_trait;
use furrow_core::error::Result;
use furrow_core::models::CoverageSessionSummary;

use crate::payload::BoundaryRegistration;

/// Port for delivering finished work to a remote endpoint.
///
/// Implementations report failure through `SyncFailure`; they never block
/// or corrupt engine state, and callers are free to retry.
#[async_trait]
pub trait SyncClient: Send + Sync {
    /// Register a freshly captured boundary
    async fn submit_boundary(&self, registration: &BoundaryRegistration) -> Result<()>;

    /// Deliver a finished coverage session
    async fn submit_session(&self, summary: &CoverageSessionSummary) -> Result<()>;
}
