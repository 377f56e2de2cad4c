use std::collections::BTreeMap;
use std::time::Instant;

use chrono::Utc;
use furrow_core::error::Result;
use furrow_core::models::{
    square_meters_to_acres, CellId, CoverageSessionSummary, CoverageSnapshot, GpsFix, PlotIdentity,
};
use furrow_geo::spatial::haversine_m;
use furrow_store::ports::SessionStore;
use furrow_store::snapshots;
use uuid::Uuid;

use crate::grid::CoverageGrid;

/// Tracking-phase lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerState {
    Idle,
    Active,
}

/// What the tracker did with one fix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixOutcome {
    /// Dropped: tracker idle or fix beyond the accuracy limit
    Ignored,
    /// Accurate fix, but no grid cell contains it
    OutsideGrid,
    /// Fix landed in an already-covered cell
    Revisit { cell: CellId, visits: u32 },
    /// Fix covered a new cell
    FirstVisit { cell: CellId },
}

/// Per-cell visit accounting over a coverage grid.
///
/// Owns the whole session state; all mutation goes through explicit
/// methods. The session snapshot is persisted on first-visit events, so a
/// crash mid-session loses at most the revisit counts and speed since the
/// last new cell.
pub struct CoverageTracker<S: SessionStore> {
    grid: CoverageGrid,
    store: S,
    identity: PlotIdentity,
    accuracy_limit_m: f64,
    state: TrackerState,
    visits: BTreeMap<CellId, u32>,
    covered_sq_m: f64,
    progress: f64,
    speed_mps: f64,
    previous_fix: Option<GpsFix>,
    base_elapsed_secs: u64,
    started_at: Option<Instant>,
}

impl<S: SessionStore> CoverageTracker<S> {
    /// Create a tracker over a grid, adopting a persisted session snapshot
    /// when one exists so a crash mid-session resumes where it left off.
    pub async fn new(grid: CoverageGrid, store: S, identity: PlotIdentity) -> Result<Self> {
        let mut tracker = Self {
            grid,
            store,
            identity,
            accuracy_limit_m: 12.0,
            state: TrackerState::Idle,
            visits: BTreeMap::new(),
            covered_sq_m: 0.0,
            progress: 0.0,
            speed_mps: 0.0,
            previous_fix: None,
            base_elapsed_secs: 0,
            started_at: None,
        };

        if let Some(snapshot) = snapshots::load_session_snapshot(&tracker.store).await? {
            tracker.visits = snapshot.visits.iter().copied().collect();
            tracker.covered_sq_m = snapshot.covered_sq_m;
            tracker.progress = snapshot.progress;
            tracker.base_elapsed_secs = snapshot.elapsed_secs;
            tracker.started_at = Some(Instant::now());
            tracker.state = TrackerState::Active;

            tracing::info!(
                cells = tracker.visits.len(),
                progress = tracker.progress,
                elapsed_secs = tracker.base_elapsed_secs,
                "Resumed coverage session from snapshot"
            );
        }

        Ok(tracker)
    }

    /// Override the accuracy gate (default 12m)
    pub fn with_accuracy_limit(mut self, limit_m: f64) -> Self {
        self.accuracy_limit_m = limit_m;
        self
    }

    /// Begin a fresh session, discarding any previous counts and any stored
    /// snapshot
    pub async fn start(&mut self) -> Result<()> {
        self.visits.clear();
        self.covered_sq_m = 0.0;
        self.progress = 0.0;
        self.speed_mps = 0.0;
        self.previous_fix = None;
        self.base_elapsed_secs = 0;
        self.started_at = Some(Instant::now());
        self.state = TrackerState::Active;

        snapshots::clear_session_snapshot(&self.store).await?;
        tracing::info!(cells = self.grid.len(), "Coverage session started");
        Ok(())
    }

    /// Account one fix against the grid.
    ///
    /// Covered area moves only on the first visit to a cell; revisits bump
    /// the per-cell count for presentation without double-counting area.
    /// A fix outside every cell is normal and only feeds the speed figure.
    pub async fn on_fix(&mut self, fix: &GpsFix) -> Result<FixOutcome> {
        if self.state != TrackerState::Active {
            return Ok(FixOutcome::Ignored);
        }

        if fix.accuracy_m > self.accuracy_limit_m {
            tracing::debug!(accuracy_m = fix.accuracy_m, "Fix dropped: accuracy beyond limit");
            return Ok(FixOutcome::Ignored);
        }

        self.update_speed(fix);

        let Some(cell) = self.grid.locate(fix.point()) else {
            return Ok(FixOutcome::OutsideGrid);
        };

        let count = self.visits.entry(cell).or_insert(0);
        *count += 1;
        let visits = *count;

        if visits > 1 {
            tracing::debug!(cell = cell.0, visits, "Cell revisited");
            return Ok(FixOutcome::Revisit { cell, visits });
        }

        self.covered_sq_m += self.grid.cell_area_sq_m();
        let field = self.grid.field_area_sq_m();
        self.progress = if field > 0.0 { (self.covered_sq_m / field).min(1.0) } else { 1.0 };

        self.persist().await?;
        tracing::debug!(cell = cell.0, progress = self.progress, "New cell covered");

        Ok(FixOutcome::FirstVisit { cell })
    }

    /// Finish the session: idle the tracker, clear the stored snapshot, and
    /// return the summary. Delivering the summary to a sync endpoint is the
    /// caller's job.
    pub async fn stop(&mut self) -> Result<CoverageSessionSummary> {
        let elapsed_secs = self.elapsed_secs();
        self.state = TrackerState::Idle;
        self.started_at = None;
        self.base_elapsed_secs = elapsed_secs;

        snapshots::clear_session_snapshot(&self.store).await?;

        let summary = CoverageSessionSummary {
            session_id: Uuid::new_v4(),
            identity: self.identity.clone(),
            covered_acres: square_meters_to_acres(self.covered_sq_m),
            field_acres: square_meters_to_acres(self.grid.field_area_sq_m()),
            progress: self.progress,
            elapsed_secs,
            finished_at: Utc::now(),
        };

        tracing::info!(
            progress = summary.progress,
            covered_acres = summary.covered_acres,
            elapsed_secs = summary.elapsed_secs,
            "Coverage session stopped"
        );

        Ok(summary)
    }

    /// Current lifecycle state
    pub fn state(&self) -> TrackerState {
        self.state
    }

    /// Fraction of the field covered, capped at 1
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Ground area covered so far
    pub fn covered_sq_m(&self) -> f64 {
        self.covered_sq_m
    }

    /// Instantaneous speed from the last two accepted fixes
    pub fn speed_mps(&self) -> f64 {
        self.speed_mps
    }

    /// Instantaneous speed in km/h
    pub fn speed_kmh(&self) -> f64 {
        self.speed_mps * 3.6
    }

    /// Seconds since the session started, surviving restore
    pub fn elapsed_secs(&self) -> u64 {
        let running = self.started_at.map(|t| t.elapsed().as_secs()).unwrap_or(0);
        self.base_elapsed_secs + running
    }

    /// Times a cell has been visited; 0 when never
    pub fn visit_count(&self, cell: CellId) -> u32 {
        self.visits.get(&cell).copied().unwrap_or(0)
    }

    /// All visited cells with their counts, in id order
    pub fn visit_counts(&self) -> &BTreeMap<CellId, u32> {
        &self.visits
    }

    /// The grid this tracker accounts against
    pub fn grid(&self) -> &CoverageGrid {
        &self.grid
    }

    /// Maintain instantaneous speed from fix timestamps. The first fix and
    /// fixes with a non-positive time delta leave the speed as it was.
    fn update_speed(&mut self, fix: &GpsFix) {
        if let Some(previous) = &self.previous_fix {
            let dt = (fix.timestamp_ms - previous.timestamp_ms) as f64 / 1000.0;
            if dt > 0.0 {
                self.speed_mps = haversine_m(previous.point(), fix.point()) / dt;
            }
        }
        self.previous_fix = Some(*fix);
    }

    async fn persist(&self) -> Result<()> {
        let snapshot = CoverageSnapshot {
            visits: self.visits.iter().map(|(id, count)| (*id, *count)).collect(),
            covered_sq_m: self.covered_sq_m,
            progress: self.progress,
            elapsed_secs: self.elapsed_secs(),
        };
        snapshots::save_session_snapshot(&self.store, &snapshot).await
    }
}
