//! Periodic refresh of flight data on still-mutable requests.
//!
//! Best-effort: a failed pass is logged and the loop carries on with the
//! next tick. Published requests are never touched.

use std::time::Duration;

use pickup_scheduler::FlightSyncService;
use tokio_util::sync::CancellationToken;

/// Run the flight sync loop until `cancel` is triggered.
///
/// The first pass runs immediately on start.
pub async fn run(service: FlightSyncService, every: Duration, cancel: CancellationToken) {
    if !service.is_enabled() {
        tracing::info!("Flight sync disabled: FLIGHT_API_URL is not set");
        return;
    }

    tracing::info!(interval_secs = every.as_secs(), "Flight sync job started");

    let mut interval = tokio::time::interval(every);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Flight sync job stopping");
                break;
            }
            _ = interval.tick() => {
                match service.sync_today().await {
                    Ok(report) if report.requests_updated > 0 || report.flights_failed > 0 => {
                        tracing::info!(
                            flights_checked = report.flights_checked,
                            flights_failed = report.flights_failed,
                            requests_updated = report.requests_updated,
                            "Flight sync: pass complete"
                        );
                    }
                    Ok(_) => tracing::debug!("Flight sync: nothing to refresh"),
                    Err(e) => tracing::error!(error = %e, "Flight sync: pass failed"),
                }
            }
        }
    }
}
