//! Furrow Core - Domain models, configuration, and platform ports
//!
//! This crate contains the core domain types and port definitions for the
//! furrow coverage-tracking engine.

pub mod config;
pub mod error;
pub mod models;
pub mod ports;

pub use error::{FurrowError, Result};
