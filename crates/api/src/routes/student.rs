//! Rider routes, mounted at `/student`.
//!
//! ```text
//! POST   /requests          create_request
//! GET    /requests/my       list_my_requests
//! PUT    /requests/{id}     update_request
//! ```

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::requests;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/requests", post(requests::create_request))
        .route("/requests/my", get(requests::list_my_requests))
        .route("/requests/{id}", put(requests::update_request))
}
