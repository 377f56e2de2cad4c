//! Furrow Store - Session persistence ports and adapters
//!
//! This crate defines the session storage port and provides adapter
//! implementations, plus typed snapshot helpers layered over the raw byte
//! API.

pub mod file;
pub mod memory;
pub mod ports;
pub mod snapshots;
