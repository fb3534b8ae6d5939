//! Problem routes. Paths are fixed; ids are parsed by the handlers.

use crate::handlers::problem::{create, delete as delete_handler, list, read, update_status};
use crate::state::AppState;
use axum::{
    routing::{delete, get, post, put},
    Router,
};

pub fn problem_routes(state: AppState) -> Router {
    Router::new()
        .route("/problems", get(list))
        .route("/problems/problemid/:id", get(read))
        .route("/problems/add", post(create))
        .route("/problems/delete/:id", delete(delete_handler))
        .route("/problems/updatestatus/:id", put(update_status))
        .with_state(state)
}
