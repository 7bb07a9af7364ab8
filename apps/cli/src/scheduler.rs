//! Background scheduler for periodic quote sync.
//!
//! The first tick fires immediately; each tick runs its cycle on its own task
//! so a slow endpoint never delays the clock. A tick that lands while the
//! previous cycle is still in flight is skipped by the service.

use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use quotebook_core::{
    quotes::{QuoteServiceTrait, SyncOutcome},
    Error,
};

/// Starts the background sync scheduler. Abort the handle to stop it.
pub fn start_sync_scheduler(
    service: Arc<dyn QuoteServiceTrait>,
    every: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Quote sync scheduler started ({}s interval)", every.as_secs());

        let mut sync_interval = interval(every);
        sync_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            sync_interval.tick().await;
            let service = service.clone();
            tokio::spawn(async move {
                run_scheduled_sync(service.as_ref()).await;
            });
        }
    })
}

/// Runs a single scheduled sync cycle.
///
/// Failures are logged and never surfaced to the user; the next tick retries.
pub async fn run_scheduled_sync(service: &dyn QuoteServiceTrait) {
    debug!("Running scheduled quote sync...");

    match service.sync_with_remote().await {
        Ok(SyncOutcome::Completed(report)) => {
            info!("Scheduled quote sync completed: {}", report.summary());
        }
        Ok(SyncOutcome::AlreadyRunning) => {
            debug!("Scheduled sync skipped: previous cycle still running");
        }
        Err(Error::Fetch(e)) if e.is_transient() => {
            warn!("Scheduled quote sync failed, will retry next tick: {}", e);
        }
        Err(Error::Fetch(e)) => {
            warn!("Scheduled quote sync rejected by the endpoint: {}", e);
        }
        Err(e) => {
            error!("Scheduled quote sync failed: {}", e);
        }
    }
}
