//! Operator routes, mounted at `/admin`.
//!
//! Role gates live on the handlers' extractors: most actions take
//! `RequireStaff`, user management and staff assignment take `RequireAdmin`.
//!
//! ```text
//! GET    /drivers                          list_drivers
//! POST   /drivers                          create_driver
//! PUT    /drivers/{id}                     update_driver
//!
//! GET    /users                            list_users
//! POST   /users/{id}/set-staff             set_staff
//! POST   /users/{id}/unset-staff           unset_staff
//!
//! GET    /requests/pending                 pending_requests
//!
//! POST   /shifts                           create_shift
//! GET    /shifts/dashboard                 dashboard
//! PUT    /shifts/{id}                      update_shift
//! POST   /shifts/{id}/assign-student       assign_student
//! POST   /shifts/{id}/remove-student       remove_student
//! POST   /shifts/{id}/assign-staff         assign_staff
//! POST   /shifts/{id}/remove-staff         remove_staff
//! POST   /shifts/{id}/publish              publish_shift
//! ```

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{drivers, shifts, users};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/drivers",
            get(drivers::list_drivers).post(drivers::create_driver),
        )
        .route("/drivers/{id}", put(drivers::update_driver))
        .route("/users", get(users::list_users))
        .route("/users/{id}/set-staff", post(users::set_staff))
        .route("/users/{id}/unset-staff", post(users::unset_staff))
        .route("/requests/pending", get(shifts::pending_requests))
        .route("/shifts", post(shifts::create_shift))
        .route("/shifts/dashboard", get(shifts::dashboard))
        .route("/shifts/{id}", put(shifts::update_shift))
        .route("/shifts/{id}/assign-student", post(shifts::assign_student))
        .route("/shifts/{id}/remove-student", post(shifts::remove_student))
        .route("/shifts/{id}/assign-staff", post(shifts::assign_staff))
        .route("/shifts/{id}/remove-staff", post(shifts::remove_staff))
        .route("/shifts/{id}/publish", post(shifts::publish_shift))
}
