//! Rider-facing request lifecycle: create, list, edit while pending.

use std::collections::HashMap;

use pickup_core::buffer::{buffer_for, compute_pickup_time};
use pickup_core::time_input::{parse_date, parse_date_time};
use pickup_core::types::DbId;
use pickup_db::models::request::{NewRequest, Request, RiderRequest};
use pickup_db::models::shift::ShiftSummary;
use pickup_db::models::status::RequestStatus;
use pickup_db::repositories::{RequestRepo, ShiftRepo};
use pickup_db::{set_lock_timeout, DbPool};
use serde::Deserialize;
use validator::Validate;

use crate::error::{SchedulerError, SchedulerResult};
use crate::DEFAULT_LOCK_TIMEOUT_MS;

/// Body of a new pickup request. Dates are `YYYY-MM-DD`, date-times are
/// `YYYY-MM-DD HH:MM:SS` in airport-local time.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRequestInput {
    #[validate(length(min = 1, max = 20))]
    pub flight_no: String,
    pub arrival_date: String,
    #[validate(length(min = 1, max = 10))]
    pub terminal: String,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub checked_bags: i32,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub carry_on_bags: i32,
    pub expected_arrival_time: String,
}

/// Partial edit of a pending request. Absent fields stay unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateRequestInput {
    #[validate(length(min = 1, max = 20))]
    pub flight_no: Option<String>,
    pub arrival_date: Option<String>,
    #[validate(length(min = 1, max = 10))]
    pub terminal: Option<String>,
    #[validate(range(min = 0))]
    pub checked_bags: Option<i32>,
    #[validate(range(min = 0))]
    pub carry_on_bags: Option<i32>,
    pub expected_arrival_time: Option<String>,
}

#[derive(Clone)]
pub struct RequestService {
    pool: DbPool,
    lock_timeout_ms: u64,
}

impl RequestService {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            lock_timeout_ms: DEFAULT_LOCK_TIMEOUT_MS,
        }
    }

    pub fn with_lock_timeout(mut self, millis: u64) -> Self {
        self.lock_timeout_ms = millis;
        self
    }

    /// Create the rider's single request.
    ///
    /// The one-request-per-rider rule is a count check, not a constraint:
    /// two concurrent creations by the same rider can both pass it.
    pub async fn create_request(
        &self,
        rider_id: DbId,
        input: &CreateRequestInput,
    ) -> SchedulerResult<Request> {
        if RequestRepo::count_by_user(&self.pool, rider_id).await? > 0 {
            return Err(SchedulerError::AlreadyHasRequest);
        }

        input.validate()?;
        let arrival_date = parse_date("arrival_date", &input.arrival_date)?;
        let expected_arrival =
            parse_date_time("expected_arrival_time", &input.expected_arrival_time)?;

        let pickup_buffer = buffer_for(&input.terminal);
        let new_request = NewRequest {
            flight_no: input.flight_no.clone(),
            arrival_date,
            terminal: input.terminal.clone(),
            checked_bags: input.checked_bags,
            carry_on_bags: input.carry_on_bags,
            arrival_time_api: Some(expected_arrival),
            pickup_buffer,
            calc_pickup_time: Some(compute_pickup_time(expected_arrival, pickup_buffer)),
        };

        let request = RequestRepo::create(&self.pool, rider_id, &new_request).await?;
        tracing::info!(
            request_id = request.id,
            rider_id,
            flight_no = %request.flight_no,
            pickup_buffer,
            "Request created",
        );
        Ok(request)
    }

    /// Every request the rider owns. Shift and driver identity are only
    /// attached once the request is published.
    pub async fn list_my_requests(&self, rider_id: DbId) -> SchedulerResult<Vec<RiderRequest>> {
        let requests = RequestRepo::list_by_user(&self.pool, rider_id).await?;

        let published: Vec<DbId> = requests
            .iter()
            .filter(|r| r.status == RequestStatus::Published)
            .map(|r| r.id)
            .collect();
        let mut summaries: HashMap<DbId, ShiftSummary> = if published.is_empty() {
            HashMap::new()
        } else {
            ShiftRepo::find_summaries_for_requests(&self.pool, &published)
                .await?
                .into_iter()
                .map(|bound| (bound.request_id, bound.summary))
                .collect()
        };

        Ok(requests
            .into_iter()
            .map(|request| {
                let shift = summaries.remove(&request.id);
                RiderRequest { request, shift }
            })
            .collect())
    }

    /// Apply a partial edit to a pending request owned by `rider_id`.
    ///
    /// All fields are parsed before anything is written, so a bad date leaves
    /// the stored row as it was.
    pub async fn update_pending_request(
        &self,
        rider_id: DbId,
        request_id: DbId,
        input: &UpdateRequestInput,
    ) -> SchedulerResult<Request> {
        let mut tx = self.pool.begin().await?;
        set_lock_timeout(&mut tx, self.lock_timeout_ms).await?;

        let mut request = RequestRepo::lock_owned(&mut tx, request_id, rider_id)
            .await?
            .ok_or(SchedulerError::NotFound(request_id))?;

        if !request.status.is_mutable() {
            return Err(SchedulerError::InvalidState(format!(
                "request {request_id} is {}, only pending requests can be edited",
                request.status.as_str()
            )));
        }

        input.validate()?;
        let arrival_date = input
            .arrival_date
            .as_deref()
            .map(|raw| parse_date("arrival_date", raw))
            .transpose()?;
        let expected_arrival = input
            .expected_arrival_time
            .as_deref()
            .map(|raw| parse_date_time("expected_arrival_time", raw))
            .transpose()?;

        if let Some(flight_no) = &input.flight_no {
            request.flight_no = flight_no.clone();
        }
        if let Some(date) = arrival_date {
            request.arrival_date = date;
        }
        if let Some(checked) = input.checked_bags {
            request.checked_bags = checked;
        }
        if let Some(carry_on) = input.carry_on_bags {
            request.carry_on_bags = carry_on;
        }

        let mut timing_changed = false;
        if let Some(terminal) = &input.terminal {
            let buffer = buffer_for(terminal);
            timing_changed |= buffer != request.pickup_buffer;
            request.terminal = terminal.clone();
            request.pickup_buffer = buffer;
        }
        if let Some(arrival) = expected_arrival {
            timing_changed = true;
            request.arrival_time_api = Some(arrival);
        }
        if timing_changed {
            if let Some(arrival) = request.arrival_time_api {
                request.calc_pickup_time =
                    Some(compute_pickup_time(arrival, request.pickup_buffer));
            }
        }

        let updated = RequestRepo::save_details(&mut tx, &request).await?;
        tx.commit().await?;

        tracing::info!(request_id, rider_id, "Pending request updated");
        Ok(updated)
    }
}
