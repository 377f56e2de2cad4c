//! Furrow Sync - Remote boundary and session submission
//!
//! This crate defines the port for delivering captured boundaries and
//! finished coverage sessions to a remote endpoint, along with the HTTP
//! adapter and the payload builders.

pub mod ports;
pub mod http;
pub mod payload;
pub mod task;

// Re-export main types
pub use ports::SyncClient;
pub use http::HttpSyncClient;
pub use payload::{boundary_registration, BoundaryRegistration};
pub use task::spawn_submit;
