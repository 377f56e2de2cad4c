use async_trait::async_trait;
use furrow_core::error::Result;

/// Key under which the in-progress boundary draft is kept
pub const LAST_BOUNDARY_KEY: &str = "lastBoundary";

/// Key under which the running coverage session snapshot is kept
pub const LAST_SESSION_KEY: &str = "lastPloughSession";

/// Port for durable session key-value storage
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Fetch the bytes stored under a key
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store bytes under a key, replacing any previous value
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Remove a key; removing an absent key is not an error
    async fn remove(&self, key: &str) -> Result<()>;
}
