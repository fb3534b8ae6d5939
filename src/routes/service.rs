//! Operational endpoints, mounted next to the problem routes.

use crate::handlers::service::{build_info, live, ready};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn service_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(live))
        .route("/ready", get(ready))
        .route("/version", get(build_info))
        .with_state(state)
}
