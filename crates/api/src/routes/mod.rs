pub mod admin;
pub mod health;
pub mod student;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /student/requests                         create (student)
/// /student/requests/my                      list own (student)
/// /student/requests/{id}                    edit while mutable (student)
///
/// /admin/drivers                            list, create (staff)
/// /admin/drivers/{id}                       replace profile (staff)
/// /admin/users                              list (admin)
/// /admin/users/{id}/set-staff               promote (admin)
/// /admin/users/{id}/unset-staff             demote (admin)
/// /admin/requests/pending                   unassigned requests (staff)
/// /admin/shifts                             create (staff)
/// /admin/shifts/dashboard                   shifts with bindings (staff)
/// /admin/shifts/{id}                        edit (staff)
/// /admin/shifts/{id}/assign-student         bind rider (staff)
/// /admin/shifts/{id}/remove-student         unbind rider (staff)
/// /admin/shifts/{id}/assign-staff           bind chaperone (admin)
/// /admin/shifts/{id}/remove-staff           unbind chaperone (staff)
/// /admin/shifts/{id}/publish                publish (staff)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/student", student::router())
        .nest("/admin", admin::router())
}
