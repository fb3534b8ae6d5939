//! HTTP handlers: problem CRUD and service status.

pub mod problem;
pub mod service;
pub use problem::*;
