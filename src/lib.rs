//! Problem tracker: REST backend for coding-practice problems.

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod model;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::Settings;
pub use error::{AppError, ConfigError};
pub use model::{NewProblem, Problem, Status};
pub use routes::{app, problem_routes, service_routes};
pub use service::{ProblemStore, RequestValidator};
pub use state::AppState;
pub use store::{connect, ensure_tables, seed_examples};
