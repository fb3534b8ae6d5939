//! ProblemStore (storage adapter) and request validation.

mod crud;
mod validation;
pub use crud::ProblemStore;
pub use validation::{parse_deadline, RequestValidator};
