//! Shared application state for all routes.

use crate::service::ProblemStore;

/// Handed to every handler through axum's `State`; tests build their own
/// instance over an isolated pool.
#[derive(Clone)]
pub struct AppState {
    pub store: ProblemStore,
}

impl AppState {
    pub fn new(store: ProblemStore) -> Self {
        Self { store }
    }
}
