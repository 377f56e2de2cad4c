//! End-to-end lifecycle tests: capture, finalize, track, crash, resume

use furrow_core::error::FurrowError;
use furrow_core::models::{GeoPoint, GpsFix, PlotIdentity};
use furrow_engine::{
    BoundaryBuilder, BoundaryState, CoverageGrid, CoverageTracker, FixOutcome, TrackerState,
};
use furrow_store::memory::MemorySessionStore;
use furrow_store::snapshots;

fn corner(i: usize) -> GeoPoint {
    match i {
        0 => GeoPoint::new(0.0, 0.0),
        1 => GeoPoint::new(0.0, 0.001),
        2 => GeoPoint::new(0.001, 0.001),
        _ => GeoPoint::new(0.001, 0.0),
    }
}

fn fix(latitude: f64, longitude: f64, timestamp_ms: i64) -> GpsFix {
    GpsFix { latitude, longitude, accuracy_m: 5.0, heading_deg: None, timestamp_ms }
}

fn identity() -> PlotIdentity {
    PlotIdentity { farmer_name: "Ramesh".to_string(), plot_name: "north-field".to_string() }
}

#[tokio::test]
async fn test_capture_track_crash_resume_stop() {
    let store = MemorySessionStore::new();

    // Capture a ~111m square, point by point
    let mut builder = BoundaryBuilder::new(store.clone());
    for i in 0..4 {
        builder.add_point(corner(i)).await.unwrap();
    }
    assert_eq!(builder.state(), BoundaryState::Complete);
    assert!(builder.area_sq_m() > 12_240.0 && builder.area_sq_m() < 12_490.0);
    assert!(builder.area_acres() > 3.02 && builder.area_acres() < 3.09);

    // Finalize and tessellate for a 4m implement
    let boundary = builder.finalize().unwrap();
    let field_sq_m = boundary.area_sq_m();
    let grid = CoverageGrid::build(&boundary, 4.0);
    assert_eq!(grid.len(), 56 * 56);

    // Track three cells along one pass, then revisit the first
    let mut tracker =
        CoverageTracker::new(grid, store.clone(), identity()).await.unwrap();
    tracker.start().await.unwrap();

    let mut cells = Vec::new();
    for (i, lon) in [0.0005, 0.00054, 0.00058].into_iter().enumerate() {
        let outcome = tracker.on_fix(&fix(0.0005, lon, (i as i64 + 1) * 1_000)).await.unwrap();
        let FixOutcome::FirstVisit { cell } = outcome else {
            panic!("expected a first visit, got {:?}", outcome)
        };
        cells.push(cell);
    }
    let first_cell = cells[0];

    let outcome = tracker.on_fix(&fix(0.0005, 0.0005, 4_000)).await.unwrap();
    assert_eq!(outcome, FixOutcome::Revisit { cell: first_cell, visits: 2 });
    assert_eq!(tracker.covered_sq_m(), 12.0);

    // Crash: drop everything and rebuild over the same store. The snapshot
    // is written on first visits, so the revisit count rolls back to 1.
    drop(tracker);

    let boundary = builder.finalize().unwrap();
    let grid = CoverageGrid::build(&boundary, 4.0);
    let mut tracker = CoverageTracker::new(grid, store.clone(), identity()).await.unwrap();

    assert_eq!(tracker.state(), TrackerState::Active);
    assert_eq!(tracker.covered_sq_m(), 12.0);
    assert_eq!(tracker.visit_count(first_cell), 1);
    assert_eq!(tracker.visit_counts().len(), 3);

    // Keep working after the resume
    let outcome = tracker.on_fix(&fix(0.0005, 0.00062, 5_000)).await.unwrap();
    assert!(matches!(outcome, FixOutcome::FirstVisit { .. }));
    assert_eq!(tracker.covered_sq_m(), 16.0);

    // Stop: summary reflects the whole session and the snapshot is gone
    let summary = tracker.stop().await.unwrap();
    assert_eq!(summary.identity.farmer_name, "Ramesh");
    assert_eq!(summary.identity.plot_name, "north-field");
    assert!((summary.progress - 16.0 / field_sq_m).abs() < 1e-12);
    assert!(summary.covered_acres > 0.0);

    assert!(snapshots::load_session_snapshot(&store).await.unwrap().is_none());

    // The boundary draft is a separate record and survives the session
    let draft = snapshots::load_boundary_draft(&store).await.unwrap().unwrap();
    assert_eq!(draft.points.len(), 4);
}

#[tokio::test]
async fn test_capture_resumes_from_draft() {
    let store = MemorySessionStore::new();

    let mut builder = BoundaryBuilder::new(store.clone());
    builder.add_point(corner(0)).await.unwrap();
    builder.add_point(corner(1)).await.unwrap();
    assert_eq!(builder.state(), BoundaryState::Capturing);
    drop(builder);

    let resumed = BoundaryBuilder::resume(store).await.unwrap();
    assert_eq!(resumed.state(), BoundaryState::Capturing);
    assert_eq!(resumed.points(), &[corner(0), corner(1)]);
}

#[tokio::test]
async fn test_invalid_ring_blocks_finalize_until_undo() {
    let store = MemorySessionStore::new();

    let mut builder = BoundaryBuilder::new(store);
    for i in 0..4 {
        builder.add_point(corner(i)).await.unwrap();
    }
    let area_before = builder.area_sq_m();

    // A stray point east of the square drags the closing edges across the
    // ring
    let state = builder.add_point(GeoPoint::new(0.0005, 0.0015)).await.unwrap();
    assert_eq!(state, BoundaryState::Invalid);

    match builder.finalize().unwrap_err() {
        FurrowError::SelfIntersectingBoundary { first_edge, second_edge } => {
            assert_eq!((first_edge, second_edge), (1, 3));
        }
        other => panic!("expected SelfIntersectingBoundary, got {:?}", other),
    }

    // Undo restores the valid square exactly
    let state = builder.undo().await.unwrap();
    assert_eq!(state, BoundaryState::Complete);
    assert_eq!(builder.area_sq_m(), area_before);
    assert!(builder.finalize().is_ok());
}
