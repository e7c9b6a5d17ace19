//! Operator-side administration: shifts, staff chaperones, drivers, user
//! roles, and publication.
//!
//! Binding riders to shifts is delegated to [`AssignmentEngine`]; everything
//! that touches a shift's bridge tables locks the shift row first so it
//! serializes with concurrent assignments.

use pickup_core::types::{DbId, LocalDateTime};
use pickup_db::models::driver::{Driver, DriverInput};
use pickup_db::models::request::Request;
use pickup_db::models::shift::{Shift, ShiftDetail, ShiftPatch};
use pickup_db::models::status::{RequestStatus, ShiftStatus, UserRole};
use pickup_db::models::user::User;
use pickup_db::repositories::{DriverRepo, RequestRepo, ShiftRepo, ShiftStaffRepo, UserRepo};
use pickup_db::{set_lock_timeout, DbPool};

use crate::assignment::{AssignmentEngine, AssignmentResult};
use crate::error::{SchedulerError, SchedulerResult};
use crate::DEFAULT_LOCK_TIMEOUT_MS;

#[derive(Clone)]
pub struct ShiftAdminService {
    pool: DbPool,
    engine: AssignmentEngine,
    lock_timeout_ms: u64,
}

impl ShiftAdminService {
    pub fn new(pool: DbPool) -> Self {
        Self {
            engine: AssignmentEngine::new(pool.clone()),
            pool,
            lock_timeout_ms: DEFAULT_LOCK_TIMEOUT_MS,
        }
    }

    pub fn with_lock_timeout(mut self, millis: u64) -> Self {
        self.engine = self.engine.with_lock_timeout(millis);
        self.lock_timeout_ms = millis;
        self
    }

    // -----------------------------------------------------------------------
    // Shifts
    // -----------------------------------------------------------------------

    /// Create a `draft` shift for an existing driver.
    pub async fn create_shift(
        &self,
        driver_id: DbId,
        departure_time: LocalDateTime,
    ) -> SchedulerResult<Shift> {
        self.ensure_driver(driver_id).await?;
        let shift = ShiftRepo::create(&self.pool, driver_id, departure_time).await?;
        tracing::info!(shift_id = shift.id, driver_id, %departure_time, "Shift created");
        Ok(shift)
    }

    pub async fn update_shift(&self, shift_id: DbId, patch: &ShiftPatch) -> SchedulerResult<Shift> {
        if patch.is_empty() {
            return Err(SchedulerError::NoFieldsToUpdate);
        }
        if let Some(driver_id) = patch.driver_id {
            self.ensure_driver(driver_id).await?;
        }
        let shift = ShiftRepo::update(&self.pool, shift_id, patch)
            .await?
            .ok_or(SchedulerError::ShiftNotFound(shift_id))?;
        tracing::info!(shift_id, "Shift updated");
        Ok(shift)
    }

    /// Publish a shift and every request bound to it, in one transaction.
    ///
    /// Publishing an already published shift is a no-op apart from
    /// re-publishing any requests bound since. Returns the number of requests
    /// touched.
    pub async fn publish_shift(&self, shift_id: DbId) -> SchedulerResult<u64> {
        let mut tx = self.pool.begin().await?;
        set_lock_timeout(&mut tx, self.lock_timeout_ms).await?;

        ShiftRepo::lock_by_id(&mut tx, shift_id)
            .await?
            .ok_or(SchedulerError::ShiftNotFound(shift_id))?;

        ShiftRepo::set_status(&mut tx, shift_id, ShiftStatus::Published).await?;
        let published = RequestRepo::publish_bound_to_shift(&mut tx, shift_id).await?;

        tx.commit().await?;

        tracing::info!(shift_id, published_requests = published, "Shift published");
        Ok(published)
    }

    /// Every shift with its driver, bound requests and bound staff.
    pub async fn dashboard(&self) -> SchedulerResult<Vec<ShiftDetail>> {
        let shifts = ShiftRepo::list(&self.pool).await?;
        let mut details = Vec::with_capacity(shifts.len());
        for shift in shifts {
            let driver = DriverRepo::find_by_id(&self.pool, shift.driver_id).await?;
            let requests = RequestRepo::list_by_shift(&self.pool, shift.id).await?;
            let staffs = ShiftStaffRepo::list_staff(&self.pool, shift.id).await?;
            details.push(ShiftDetail {
                shift,
                driver,
                requests,
                staffs,
            });
        }
        Ok(details)
    }

    pub async fn pending_requests(&self) -> SchedulerResult<Vec<Request>> {
        Ok(RequestRepo::list_by_status(&self.pool, RequestStatus::Pending).await?)
    }

    // -----------------------------------------------------------------------
    // Riders on a shift
    // -----------------------------------------------------------------------

    pub async fn assign_student(
        &self,
        shift_id: DbId,
        request_id: DbId,
    ) -> SchedulerResult<AssignmentResult> {
        self.engine.assign(shift_id, request_id).await
    }

    pub async fn remove_student(&self, shift_id: DbId, request_id: DbId) -> SchedulerResult<()> {
        self.engine.unassign(shift_id, request_id).await
    }

    // -----------------------------------------------------------------------
    // Staff on a shift
    // -----------------------------------------------------------------------

    /// Bind a staff-or-admin user to a shift. Binding twice is a no-op.
    pub async fn assign_staff(&self, shift_id: DbId, user_id: DbId) -> SchedulerResult<()> {
        let user = self.ensure_user(user_id).await?;
        if !user.role.is_staff_equivalent() {
            return Err(SchedulerError::NotStaffRole(user_id));
        }

        let mut tx = self.pool.begin().await?;
        set_lock_timeout(&mut tx, self.lock_timeout_ms).await?;
        ShiftRepo::lock_by_id(&mut tx, shift_id)
            .await?
            .ok_or(SchedulerError::ShiftNotFound(shift_id))?;
        let inserted = ShiftStaffRepo::insert(&mut tx, shift_id, user_id).await?;
        tx.commit().await?;

        tracing::info!(shift_id, staff_id = user_id, inserted, "Staff assigned");
        Ok(())
    }

    /// Unbind a user from a shift's staff. Removing someone who is not bound
    /// succeeds without change.
    pub async fn remove_staff(&self, shift_id: DbId, user_id: DbId) -> SchedulerResult<()> {
        let mut tx = self.pool.begin().await?;
        set_lock_timeout(&mut tx, self.lock_timeout_ms).await?;
        ShiftRepo::lock_by_id(&mut tx, shift_id)
            .await?
            .ok_or(SchedulerError::ShiftNotFound(shift_id))?;
        let removed = ShiftStaffRepo::delete(&mut tx, shift_id, user_id).await?;
        tx.commit().await?;

        tracing::info!(shift_id, staff_id = user_id, removed, "Staff removed");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Drivers
    // -----------------------------------------------------------------------

    pub async fn list_drivers(&self) -> SchedulerResult<Vec<Driver>> {
        Ok(DriverRepo::list(&self.pool).await?)
    }

    pub async fn create_driver(&self, input: &DriverInput) -> SchedulerResult<Driver> {
        validate_driver_input(input)?;
        let driver = DriverRepo::create(&self.pool, input).await?;
        tracing::info!(driver_id = driver.id, name = %driver.name, "Driver created");
        Ok(driver)
    }

    pub async fn update_driver(
        &self,
        driver_id: DbId,
        input: &DriverInput,
    ) -> SchedulerResult<Driver> {
        validate_driver_input(input)?;
        let driver = DriverRepo::update(&self.pool, driver_id, input)
            .await?
            .ok_or(SchedulerError::DriverNotFound(driver_id))?;
        tracing::info!(driver_id, "Driver updated");
        Ok(driver)
    }

    // -----------------------------------------------------------------------
    // Users
    // -----------------------------------------------------------------------

    pub async fn list_users(&self) -> SchedulerResult<Vec<User>> {
        Ok(UserRepo::list(&self.pool).await?)
    }

    pub async fn set_user_staff(&self, user_id: DbId) -> SchedulerResult<User> {
        self.change_role(user_id, UserRole::Staff).await
    }

    pub async fn unset_user_staff(&self, user_id: DbId) -> SchedulerResult<User> {
        self.change_role(user_id, UserRole::Student).await
    }

    async fn change_role(&self, user_id: DbId, role: UserRole) -> SchedulerResult<User> {
        let user = self.ensure_user(user_id).await?;
        if user.role == UserRole::Admin {
            return Err(SchedulerError::CannotChangeAdmin(user_id));
        }
        let updated = UserRepo::set_role(&self.pool, user_id, role)
            .await?
            .ok_or(SchedulerError::UserNotFound(user_id))?;
        tracing::info!(user_id, role = role.as_str(), "User role changed");
        Ok(updated)
    }

    async fn ensure_driver(&self, driver_id: DbId) -> SchedulerResult<Driver> {
        DriverRepo::find_by_id(&self.pool, driver_id)
            .await?
            .ok_or(SchedulerError::DriverNotFound(driver_id))
    }

    async fn ensure_user(&self, user_id: DbId) -> SchedulerResult<User> {
        UserRepo::find_by_id(&self.pool, user_id)
            .await?
            .ok_or(SchedulerError::UserNotFound(user_id))
    }
}

fn validate_driver_input(input: &DriverInput) -> SchedulerResult<()> {
    if input.name.trim().is_empty() {
        return Err(SchedulerError::InvalidInput("name must not be empty".into()));
    }
    if input.car_model.trim().is_empty() {
        return Err(SchedulerError::InvalidInput("car_model must not be empty".into()));
    }
    input.capacity().validate()?;
    Ok(())
}
