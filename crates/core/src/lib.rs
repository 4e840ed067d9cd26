//! Contoso University records core library.
//!
//! This crate holds the decision logic behind department and instructor
//! editing: optimistic concurrency checks for departments, course
//! assignment reconciliation for instructors, the SQLite persistence layer
//! both are written against, and the services that combine them.

pub mod assignment;
pub mod concurrency;
pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod services;
pub mod store;
pub mod telemetry;

// Re-exports for convenience.
pub use assignment::{AssignmentDelta, CourseAssignmentReconciler};
pub use concurrency::{ConcurrencyResolver, ConflictReport, Outcome};
pub use config::AppConfig;
pub use db::Database;
pub use errors::CoreError;
pub use services::{DepartmentService, InstructorService};
pub use store::SchoolStore;
