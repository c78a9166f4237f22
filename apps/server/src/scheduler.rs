//! Background scheduler for periodic country refreshes.

use std::sync::Arc;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{info, warn};

use crate::api::perform_refresh;
use crate::main_lib::AppState;

/// Delay before the first scheduled run, so startup is not slowed by it.
const INITIAL_DELAY_SECS: u64 = 60;

/// Starts refreshing every `every`, beginning after a short delay.
pub fn start_refresh_scheduler(state: Arc<AppState>, every: Duration) {
    tokio::spawn(async move {
        info!("Refresh scheduler started ({}s interval)", every.as_secs());

        tokio::time::sleep(Duration::from_secs(INITIAL_DELAY_SECS)).await;

        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            run_scheduled_refresh(&state).await;
        }
    });
}

async fn run_scheduled_refresh(state: &Arc<AppState>) {
    info!("Running scheduled country refresh...");
    match perform_refresh(state).await {
        Ok(report) => info!(
            "Scheduled refresh completed: {} countries, {} skipped, chart {}",
            report.outcome.inserted,
            report.outcome.skipped,
            report.chart_path.as_deref().unwrap_or("not generated")
        ),
        Err(e) => warn!("Scheduled refresh failed: {}", e),
    }
}
