//! Example walking a full field session end to end
//!
//! Captures a ~111m square plot near Nashik, finalizes it, then simulates a
//! tractor ploughing three passes and submits the results.
//!
//! Note: boundary registration and session submission expect a sync endpoint
//! at localhost:8080 and print a hint when none is running.
//! To run: cargo run --example simulated_session

use futures::StreamExt;
use furrow_core::config::EngineConfig;
use furrow_core::error::Result;
use furrow_core::models::{GeoPoint, GpsFix, PlotIdentity};
use furrow_engine::{run_tracking, stop_channel, BoundaryBuilder, CoverageGrid, CoverageTracker};
use furrow_store::memory::MemorySessionStore;
use furrow_sync::{boundary_registration, spawn_submit, HttpSyncClient, SyncClient};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!("Furrow - Simulated Field Session");
    println!("================================\n");

    let config = EngineConfig::with_defaults();
    config.validate()?;
    println!("Engine Configuration:");
    println!("  Accuracy limit: {}m", config.accuracy_limit_m.value);
    println!("  Implement width: {}m", config.implement_width_m.value);
    println!();

    // Capture: the operator confirms the four corners of the plot
    let store = MemorySessionStore::new();
    let mut builder = BoundaryBuilder::new(store.clone());

    let corners = [
        GeoPoint::new(20.011, 73.790),
        GeoPoint::new(20.011, 73.791),
        GeoPoint::new(20.012, 73.791),
        GeoPoint::new(20.012, 73.790),
    ];

    println!("Capturing boundary...");
    for corner in corners {
        let state = builder.add_point(corner).await?;
        println!("  Point {} confirmed, state: {:?}", builder.points().len(), state);
    }

    let boundary = builder.finalize()?;
    println!("✓ Boundary finalized: {:.2} acres\n", boundary.area_acres());

    // Register the plot; a missing endpoint is not fatal
    let identity = PlotIdentity {
        farmer_name: "Ramesh Patil".to_string(),
        plot_name: "north-field".to_string(),
    };
    let registration = boundary_registration(&boundary, &identity);

    let sync = Arc::new(HttpSyncClient::localhost());
    println!("Registering boundary at localhost:8080...");
    match sync.submit_boundary(&registration).await {
        Ok(()) => println!("✓ Boundary registered\n"),
        Err(e) => {
            println!("✗ Registration failed: {}", e);
            println!("  Start a sync endpoint on localhost:8080 to collect results.");
            println!("  The session continues without it.\n");
        }
    }

    // Tessellate and track three serpentine passes
    let grid = CoverageGrid::build(&boundary, config.implement_width_m.value);
    println!("Coverage grid: {} cells of {:.1} sq m", grid.len(), grid.cell_area_sq_m());

    let mut tracker = CoverageTracker::new(grid, store, identity).await?;
    tracker.start().await?;

    let (_stop, signal) = stop_channel();
    let fixes = futures::stream::iter(plough_passes()).boxed();
    run_tracking(fixes, signal, &mut tracker).await?;

    println!("Tracking finished:");
    println!("  Progress: {:.1}%", tracker.progress() * 100.0);
    println!("  Covered: {:.0} sq m", tracker.covered_sq_m());
    println!("  Speed: {:.1} km/h", tracker.speed_kmh());
    println!();

    // Stop and hand the summary to the background submitter
    let summary = tracker.stop().await?;
    println!("Session {} finished at {}", summary.session_id, summary.finished_at);

    let handle = spawn_submit(sync, summary);
    match handle.await {
        Ok(()) => println!("Submission task finished (see log for outcome)"),
        Err(e) => println!("Submission task panicked: {}", e),
    }

    Ok(())
}

/// Three eastbound/westbound passes across the south end of the plot, one
/// fix every ~4m at one fix per second
fn plough_passes() -> Vec<GpsFix> {
    let mut fixes = Vec::new();
    let mut timestamp_ms = 0;

    for pass in 0..3 {
        let latitude = 20.0111 + pass as f64 * 0.00004;
        let eastbound = pass % 2 == 0;

        for step in 0..25 {
            let offset = step as f64 * 0.00004;
            let longitude =
                if eastbound { 73.7901 + offset } else { 73.7911 - offset };

            timestamp_ms += 1_000;
            fixes.push(GpsFix {
                latitude,
                longitude,
                accuracy_m: 5.0,
                heading_deg: Some(if eastbound { 90.0 } else { 270.0 }),
                timestamp_ms,
            });
        }
    }

    fixes
}
