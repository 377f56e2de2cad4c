use furrow_core::error::{FurrowError, Result};
use furrow_core::models::{square_meters_to_acres, BoundaryDraft, FinalizedBoundary, GeoPoint, Ring};
use furrow_geo::area::ring_area_sq_m;
use furrow_geo::validation::find_kink;
use furrow_store::ports::SessionStore;
use furrow_store::snapshots;

/// Capture-phase lifecycle of the boundary ring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryState {
    /// No points yet
    Empty,
    /// Fewer than 3 points; not yet a polygon
    Capturing,
    /// The ring's edges cross somewhere
    Invalid,
    /// A finalizable simple polygon
    Complete,
}

/// State machine over the operator-confirmed boundary ring.
///
/// Every mutation persists a draft snapshot through the session store, so
/// an interrupted capture can be resumed with [`BoundaryBuilder::resume`].
pub struct BoundaryBuilder<S: SessionStore> {
    store: S,
    ring: Ring,
    state: BoundaryState,
    area_sq_m: f64,
    kink: Option<(usize, usize)>,
}

impl<S: SessionStore> BoundaryBuilder<S> {
    /// Create an empty builder
    pub fn new(store: S) -> Self {
        Self {
            store,
            ring: Ring::new(),
            state: BoundaryState::Empty,
            area_sq_m: 0.0,
            kink: None,
        }
    }

    /// Create a builder, re-adopting a persisted draft when one exists
    pub async fn resume(store: S) -> Result<Self> {
        let mut builder = Self::new(store);

        if let Some(draft) = snapshots::load_boundary_draft(&builder.store).await? {
            builder.ring = Ring::from_points(draft.points);
            builder.recompute();
            tracing::info!(
                points = builder.ring.len(),
                state = ?builder.state,
                "Resumed boundary draft"
            );
        }

        Ok(builder)
    }

    /// Append a confirmed point and re-evaluate the ring.
    ///
    /// Points are never rejected here; a ring that crosses itself simply
    /// reports `Invalid` so the operator can undo. The updated draft is
    /// persisted before returning.
    pub async fn add_point(&mut self, point: GeoPoint) -> Result<BoundaryState> {
        self.ring.push(point);
        self.recompute();
        self.persist().await?;

        tracing::debug!(points = self.ring.len(), state = ?self.state, "Boundary point added");
        Ok(self.state)
    }

    /// Remove the most recent point and re-evaluate, exactly as `add_point`
    /// does. Undoing an empty ring changes nothing.
    pub async fn undo(&mut self) -> Result<BoundaryState> {
        if self.ring.pop().is_none() {
            return Ok(self.state);
        }

        self.recompute();
        self.persist().await?;

        tracing::debug!(points = self.ring.len(), state = ?self.state, "Boundary point undone");
        Ok(self.state)
    }

    /// Discard all points and the persisted draft
    pub async fn reset(&mut self) -> Result<()> {
        self.ring.clear();
        self.state = BoundaryState::Empty;
        self.area_sq_m = 0.0;
        self.kink = None;

        snapshots::clear_boundary_draft(&self.store).await?;
        tracing::debug!("Boundary capture reset");
        Ok(())
    }

    /// Freeze the ring into an immutable boundary.
    ///
    /// Only a `Complete` ring finalizes; an `Invalid` ring surfaces the
    /// offending edge pair and is never silently repaired.
    pub fn finalize(&self) -> Result<FinalizedBoundary> {
        match self.state {
            BoundaryState::Complete => {
                tracing::info!(
                    points = self.ring.len(),
                    area_sq_m = self.area_sq_m,
                    "Boundary finalized"
                );
                Ok(FinalizedBoundary::new(self.ring.clone(), self.area_sq_m))
            }
            BoundaryState::Invalid => {
                let (first_edge, second_edge) = self.kink.unwrap_or_default();
                Err(FurrowError::SelfIntersectingBoundary { first_edge, second_edge })
            }
            _ => Err(FurrowError::IncompleteBoundary { points: self.ring.len() }),
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> BoundaryState {
        self.state
    }

    /// Confirmed points in insertion order
    pub fn points(&self) -> &[GeoPoint] {
        self.ring.points()
    }

    /// Enclosed area; 0 unless the ring is `Complete`
    pub fn area_sq_m(&self) -> f64 {
        self.area_sq_m
    }

    /// Enclosed area in acres
    pub fn area_acres(&self) -> f64 {
        square_meters_to_acres(self.area_sq_m)
    }

    /// Re-derive state, area, and the kink record from the current points.
    /// Deterministic: the same points always produce the same result.
    fn recompute(&mut self) {
        if self.ring.is_empty() {
            self.state = BoundaryState::Empty;
            self.area_sq_m = 0.0;
            self.kink = None;
            return;
        }

        if self.ring.len() < 3 {
            self.state = BoundaryState::Capturing;
            self.area_sq_m = 0.0;
            self.kink = None;
            return;
        }

        match find_kink(&self.ring) {
            Some(pair) => {
                self.state = BoundaryState::Invalid;
                self.area_sq_m = 0.0;
                self.kink = Some(pair);
            }
            None => {
                self.state = BoundaryState::Complete;
                self.area_sq_m = ring_area_sq_m(&self.ring);
                self.kink = None;
            }
        }
    }

    async fn persist(&self) -> Result<()> {
        let draft =
            BoundaryDraft { points: self.ring.points().to_vec(), area_sq_m: self.area_sq_m };
        snapshots::save_boundary_draft(&self.store, &draft).await
    }
}
