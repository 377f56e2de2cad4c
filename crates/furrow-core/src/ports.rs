//! Ports implemented by the host platform

use async_trait::async_trait;
use futures::stream::Stream;
use serde::{Deserialize, Serialize};
use std::pin::Pin;

use crate::error::Result;
use crate::models::GpsFix;

/// A live stream of raw fixes, delivered one at a time in arrival order.
///
/// Dropping the stream is the unsubscribe: implementations must release
/// their platform listener when the stream goes away.
pub type FixStream = Pin<Box<dyn Stream<Item = GpsFix> + Send>>;

/// Tuning passed to the location source when subscribing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionOptions {
    /// Minimum time between delivered fixes, in milliseconds
    pub min_interval_ms: u64,

    /// Minimum movement between delivered fixes, in meters
    pub min_distance_m: f64,
}

impl Default for SubscriptionOptions {
    fn default() -> Self {
        Self {
            min_interval_ms: 1000,
            min_distance_m: 1.0,
        }
    }
}

/// Port for the platform location service
#[async_trait]
pub trait LocationSource: Send + Sync {
    /// One-shot current position at the most accurate available mode
    async fn current_position(&self) -> Result<GpsFix>;

    /// Subscribe to a fix stream with the given delivery intervals
    async fn subscribe(&self, options: &SubscriptionOptions) -> Result<FixStream>;
}
