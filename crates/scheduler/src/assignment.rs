//! Binding requests to shifts.
//!
//! [`AssignmentEngine::assign`] runs as a single transaction:
//!
//! 1. lock the shift row and read its driver's limits,
//! 2. lock the request row,
//! 3. require the request to be `pending`,
//! 4. aggregate the load already bound to the shift,
//! 5. add this request to get prospective totals,
//! 6. compare against the driver's limits (advisory only),
//! 7. insert the bridge row and mark the request `assigned`,
//! 8. commit.
//!
//! Locks are always taken shift first, then request. Over-capacity is not an
//! error: the write goes through and the result carries a warning.

use pickup_core::capacity::{CapacityWarning, ShiftLoad};
use pickup_core::types::DbId;
use pickup_db::models::status::RequestStatus;
use pickup_db::repositories::shift_request_repo::REQUEST_UNIQUE_CONSTRAINT;
use pickup_db::repositories::{RequestRepo, ShiftRepo, ShiftRequestRepo};
use pickup_db::{set_lock_timeout, DbPool};
use serde::Serialize;

use crate::error::{SchedulerError, SchedulerResult};
use crate::DEFAULT_LOCK_TIMEOUT_MS;

/// Outcome of a successful assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssignmentResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<CapacityWarning>,
}

#[derive(Clone)]
pub struct AssignmentEngine {
    pool: DbPool,
    lock_timeout_ms: u64,
}

impl AssignmentEngine {
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

    /// Bind `request_id` to `shift_id` and move the request to `assigned`.
    pub async fn assign(
        &self,
        shift_id: DbId,
        request_id: DbId,
    ) -> SchedulerResult<AssignmentResult> {
        let mut tx = self.pool.begin().await?;
        set_lock_timeout(&mut tx, self.lock_timeout_ms).await?;

        let shift = ShiftRepo::lock_with_capacity(&mut tx, shift_id)
            .await?
            .ok_or(SchedulerError::ShiftNotFound(shift_id))?;

        let request = RequestRepo::lock_by_id(&mut tx, request_id)
            .await?
            .ok_or(SchedulerError::RequestNotFound(request_id))?;

        if request.status != RequestStatus::Pending {
            return Err(SchedulerError::RequestNotPending(request_id));
        }

        let load: ShiftLoad = ShiftRepo::current_load(&mut tx, shift_id).await?.into();
        let totals = load.with_request(request.checked_bags, request.carry_on_bags);
        let warning = totals.check(&shift.capacity());

        ShiftRequestRepo::insert(&mut tx, shift_id, request_id)
            .await
            .map_err(|e| bridge_insert_error(e, request_id))?;
        RequestRepo::set_status(&mut tx, request_id, RequestStatus::Assigned).await?;

        tx.commit().await?;

        match warning {
            Some(w) => tracing::warn!(
                shift_id,
                request_id,
                seats = totals.seats,
                checked_bags = totals.checked_bags,
                carry_on_bags = totals.carry_on_bags,
                max_seats = shift.max_seats,
                max_checked = shift.max_checked,
                max_carry_on = shift.max_carry_on,
                warning = w.as_str(),
                "Request assigned over capacity",
            ),
            None => tracing::info!(
                shift_id,
                request_id,
                seats = totals.seats,
                "Request assigned",
            ),
        }

        Ok(AssignmentResult { warning })
    }

    /// Remove the binding between `shift_id` and `request_id` and return the
    /// request to `pending`.
    ///
    /// Published requests are frozen and cannot be unbound.
    pub async fn unassign(&self, shift_id: DbId, request_id: DbId) -> SchedulerResult<()> {
        let mut tx = self.pool.begin().await?;
        set_lock_timeout(&mut tx, self.lock_timeout_ms).await?;

        ShiftRepo::lock_by_id(&mut tx, shift_id)
            .await?
            .ok_or(SchedulerError::ShiftNotFound(shift_id))?;

        let request = RequestRepo::lock_by_id(&mut tx, request_id)
            .await?
            .ok_or(SchedulerError::RequestNotFound(request_id))?;

        if request.status == RequestStatus::Published {
            return Err(SchedulerError::InvalidState(format!(
                "request {request_id} is {} and can no longer be unassigned",
                request.status.as_str()
            )));
        }

        if !ShiftRequestRepo::delete(&mut tx, shift_id, request_id).await? {
            return Err(SchedulerError::BindingNotFound {
                shift_id,
                request_id,
            });
        }
        RequestRepo::set_status(&mut tx, request_id, RequestStatus::Pending).await?;

        tx.commit().await?;

        tracing::info!(shift_id, request_id, "Request unassigned");
        Ok(())
    }
}

/// A unique violation on the request column means another transaction bound
/// this request first.
fn bridge_insert_error(err: sqlx::Error, request_id: DbId) -> SchedulerError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() && db_err.constraint() == Some(REQUEST_UNIQUE_CONSTRAINT) {
            return SchedulerError::RequestAlreadyBound(request_id);
        }
    }
    SchedulerError::from(err)
}
