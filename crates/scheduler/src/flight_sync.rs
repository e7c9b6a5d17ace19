//! Best-effort refresh of arrival times from an external flight provider.
//!
//! For every flight number with a still-mutable request arriving on the
//! target date, the provider is queried at
//! `GET {base_url}/flights/{flight_no}?date=YYYY-MM-DD` and the returned
//! terminal and arrival time are written back, with the pickup buffer and
//! pickup time recomputed. A failed lookup is logged and skipped.

use std::time::Duration;

use pickup_core::buffer::{buffer_for, compute_pickup_time};
use pickup_core::error::CoreError;
use pickup_core::time_input::{parse_date_time, DATE_FORMAT};
use pickup_core::types::LocalDate;
use pickup_db::models::request::FlightRefresh;
use pickup_db::repositories::RequestRepo;
use pickup_db::DbPool;
use serde::Deserialize;

use crate::error::SchedulerResult;

/// Upper bound on a single provider call.
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Provider response body.
#[derive(Debug, Clone, Deserialize)]
pub struct FlightInfo {
    #[serde(default)]
    pub flight_no: Option<String>,
    pub terminal: String,
    pub arrival_time: String,
}

#[derive(Debug, thiserror::Error)]
pub enum FlightLookupError {
    #[error("Flight API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Flight API returned unusable data: {0}")]
    Data(#[from] CoreError),
}

/// Counters for one sync pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlightSyncReport {
    pub skipped: bool,
    pub flights_checked: usize,
    pub flights_failed: usize,
    pub requests_updated: u64,
}

#[derive(Clone)]
pub struct FlightSyncService {
    pool: DbPool,
    http: reqwest::Client,
    base_url: Option<String>,
}

impl FlightSyncService {
    /// `base_url = None` disables the provider; every pass is then skipped.
    pub fn new(pool: DbPool, base_url: Option<String>) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()?;
        Ok(Self {
            pool,
            http,
            base_url: base_url
                .map(|url| url.trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty()),
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.base_url.is_some()
    }

    /// Sync requests arriving today, in server-local time.
    pub async fn sync_today(&self) -> SchedulerResult<FlightSyncReport> {
        self.sync_date(chrono::Local::now().date_naive()).await
    }

    pub async fn sync_date(&self, date: LocalDate) -> SchedulerResult<FlightSyncReport> {
        let Some(base_url) = self.base_url.as_deref() else {
            tracing::debug!("Flight API URL not configured, skipping flight sync");
            return Ok(FlightSyncReport {
                skipped: true,
                ..FlightSyncReport::default()
            });
        };

        let flights = RequestRepo::unpublished_flights_on(&self.pool, date).await?;
        let mut report = FlightSyncReport {
            flights_checked: flights.len(),
            ..FlightSyncReport::default()
        };

        let mut refreshes = Vec::with_capacity(flights.len());
        for flight_no in flights {
            match self.lookup(base_url, &flight_no, date).await {
                Ok(refresh) => refreshes.push(refresh),
                Err(e) => {
                    report.flights_failed += 1;
                    tracing::warn!(%flight_no, error = %e, "Flight lookup failed");
                }
            }
        }

        if !refreshes.is_empty() {
            let mut tx = self.pool.begin().await?;
            for refresh in &refreshes {
                report.requests_updated +=
                    RequestRepo::apply_flight_refresh(&mut tx, refresh).await?;
            }
            tx.commit().await?;
        }

        tracing::info!(
            %date,
            flights_checked = report.flights_checked,
            flights_failed = report.flights_failed,
            requests_updated = report.requests_updated,
            "Flight sync finished",
        );
        Ok(report)
    }

    async fn lookup(
        &self,
        base_url: &str,
        flight_no: &str,
        date: LocalDate,
    ) -> Result<FlightRefresh, FlightLookupError> {
        let info = self
            .http
            .get(format!("{base_url}/flights/{flight_no}"))
            .query(&[("date", date.format(DATE_FORMAT).to_string())])
            .send()
            .await?
            .error_for_status()?
            .json::<FlightInfo>()
            .await?;
        Ok(resolve_refresh(flight_no, date, &info)?)
    }
}

/// Turn provider data into the values written onto matching requests.
pub fn resolve_refresh(
    flight_no: &str,
    arrival_date: LocalDate,
    info: &FlightInfo,
) -> Result<FlightRefresh, CoreError> {
    let terminal = info.terminal.trim();
    if terminal.is_empty() {
        return Err(CoreError::Validation("terminal must not be empty".into()));
    }
    let arrival_time = parse_date_time("arrival_time", &info.arrival_time)?;
    let pickup_buffer = buffer_for(terminal);
    Ok(FlightRefresh {
        flight_no: flight_no.to_string(),
        arrival_date,
        terminal: terminal.to_string(),
        arrival_time,
        pickup_buffer,
        calc_pickup_time: compute_pickup_time(arrival_time, pickup_buffer),
    })
}
