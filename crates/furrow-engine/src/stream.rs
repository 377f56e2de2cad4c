use futures::StreamExt;
use furrow_core::error::{FurrowError, Result};
use furrow_core::models::GpsFix;
use furrow_core::ports::{FixStream, LocationSource};
use furrow_store::ports::SessionStore;
use tokio::sync::watch;

use crate::capture::{BoundaryBuilder, BoundaryState};
use crate::filter::FixFilter;
use crate::tracker::CoverageTracker;

/// Requests a stop of a running capture or tracking loop
#[derive(Debug)]
pub struct StopHandle {
    tx: watch::Sender<bool>,
}

impl StopHandle {
    /// Signal the loop to finish. Idempotent; a stop with no live loop is
    /// a no-op.
    pub fn stop(&self) {
        let _ = self.tx.send(true);
    }
}

/// Receiving side of a stop request
#[derive(Debug, Clone)]
pub struct StopSignal {
    rx: watch::Receiver<bool>,
}

impl StopSignal {
    /// Resolves once a stop has been requested. A dropped handle counts as
    /// a stop request, so loops never outlive their controller.
    pub async fn stopped(&mut self) {
        loop {
            if *self.rx.borrow() {
                return;
            }
            if self.rx.changed().await.is_err() {
                return;
            }
        }
    }
}

/// Create a stop handle and the signal a driver loop waits on
pub fn stop_channel() -> (StopHandle, StopSignal) {
    let (tx, rx) = watch::channel(false);
    (StopHandle { tx }, StopSignal { rx })
}

/// Await a single position and apply the accuracy gate
pub async fn acquire_fix(source: &dyn LocationSource, accuracy_limit_m: f64) -> Result<GpsFix> {
    let fix = source.current_position().await?;
    if fix.accuracy_m > accuracy_limit_m {
        return Err(FurrowError::GpsUnreliable {
            accuracy_m: fix.accuracy_m,
            limit_m: accuracy_limit_m,
        });
    }
    Ok(fix)
}

/// Drive auto capture: forward each fix the filter accepts into the
/// builder until the stream ends or a stop is requested.
///
/// The stop branch wins over a ready fix, so cancellation is deterministic.
/// Dropping the stream is the unsubscribe.
pub async fn run_auto_capture<S: SessionStore>(
    mut fixes: FixStream,
    mut stop: StopSignal,
    filter: &mut FixFilter,
    builder: &mut BoundaryBuilder<S>,
) -> Result<BoundaryState> {
    loop {
        tokio::select! {
            biased;
            _ = stop.stopped() => break,
            fix = fixes.next() => {
                let Some(fix) = fix else { break };
                if filter.accept_auto(&fix) {
                    builder.add_point(fix.point()).await?;
                }
            }
        }
    }

    tracing::info!(points = builder.points().len(), "Auto capture loop finished");
    Ok(builder.state())
}

/// Drive tracking: forward each fix into the tracker until the stream ends
/// or a stop is requested. The caller stops the tracker afterwards to get
/// the session summary.
pub async fn run_tracking<S: SessionStore>(
    mut fixes: FixStream,
    mut stop: StopSignal,
    tracker: &mut CoverageTracker<S>,
) -> Result<()> {
    loop {
        tokio::select! {
            biased;
            _ = stop.stopped() => break,
            fix = fixes.next() => {
                let Some(fix) = fix else { break };
                tracker.on_fix(&fix).await?;
            }
        }
    }

    tracing::info!(progress = tracker.progress(), "Tracking loop finished");
    Ok(())
}
