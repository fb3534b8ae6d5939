//! Router assembly.

mod problem;
mod service;

pub use problem::problem_routes;
pub use service::service_routes;

use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Full application: problem and service routes, traced, with request bodies
/// capped at `max_body_bytes`. Over-limit bodies surface as a rejection in the
/// body extractor so the JSON error shape is kept.
pub fn app(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .merge(service_routes(state.clone()))
        .merge(problem_routes(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(max_body_bytes)),
        )
}
