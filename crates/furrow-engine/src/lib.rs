//! Furrow Engine - Boundary capture, fix filtering, and coverage tracking
//!
//! This crate implements the field workflows: walking or drawing a plot
//! boundary, tessellating the finalized plot into a coverage grid, and
//! accounting per-cell visits from a filtered GPS stream. Both phases
//! persist through the session store so a crash resumes where it left off.

pub mod capture;
pub mod filter;
pub mod grid;
pub mod tracker;
pub mod stream;

pub use capture::{BoundaryBuilder, BoundaryState};
pub use filter::{circular_delta_deg, FixFilter};
pub use grid::{CoverageGrid, GridCell};
pub use stream::{acquire_fix, run_auto_capture, run_tracking, stop_channel, StopHandle, StopSignal};
pub use tracker::{CoverageTracker, FixOutcome, TrackerState};
