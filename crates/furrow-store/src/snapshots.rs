//! Typed snapshot helpers layered over the raw byte store.
//!
//! Serialization faults map to `FurrowError::Serialization` so callers can
//! tell a corrupt snapshot apart from a missing one.

use furrow_core::error::{FurrowError, Result};
use furrow_core::models::{BoundaryDraft, CoverageSnapshot};

use crate::ports::{SessionStore, LAST_BOUNDARY_KEY, LAST_SESSION_KEY};

/// Persist the in-progress boundary draft
pub async fn save_boundary_draft<S>(store: &S, draft: &BoundaryDraft) -> Result<()>
where
    S: SessionStore + ?Sized,
{
    let bytes =
        serde_json::to_vec(draft).map_err(|e| FurrowError::Serialization(e.to_string()))?;
    store.set(LAST_BOUNDARY_KEY, &bytes).await
}

/// Load the last boundary draft, if one was saved
pub async fn load_boundary_draft<S>(store: &S) -> Result<Option<BoundaryDraft>>
where
    S: SessionStore + ?Sized,
{
    match store.get(LAST_BOUNDARY_KEY).await? {
        Some(bytes) => {
            let draft = serde_json::from_slice(&bytes)
                .map_err(|e| FurrowError::Serialization(e.to_string()))?;
            Ok(Some(draft))
        }
        None => Ok(None),
    }
}

/// Drop the stored boundary draft
pub async fn clear_boundary_draft<S>(store: &S) -> Result<()>
where
    S: SessionStore + ?Sized,
{
    store.remove(LAST_BOUNDARY_KEY).await
}

/// Persist the running coverage session snapshot
pub async fn save_session_snapshot<S>(store: &S, snapshot: &CoverageSnapshot) -> Result<()>
where
    S: SessionStore + ?Sized,
{
    let bytes =
        serde_json::to_vec(snapshot).map_err(|e| FurrowError::Serialization(e.to_string()))?;
    store.set(LAST_SESSION_KEY, &bytes).await
}

/// Load the last coverage session snapshot, if one was saved
pub async fn load_session_snapshot<S>(store: &S) -> Result<Option<CoverageSnapshot>>
where
    S: SessionStore + ?Sized,
{
    match store.get(LAST_SESSION_KEY).await? {
        Some(bytes) => {
            let snapshot = serde_json::from_slice(&bytes)
                .map_err(|e| FurrowError::Serialization(e.to_string()))?;
            Ok(Some(snapshot))
        }
        None => Ok(None),
    }
}

/// Drop the stored coverage session snapshot
pub async fn clear_session_snapshot<S>(store: &S) -> Result<()>
where
    S: SessionStore + ?Sized,
{
    store.remove(LAST_SESSION_KEY).await
}
