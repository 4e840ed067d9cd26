//! Optimistic concurrency handling for department edits.
//!
//! The subsystem is responsible for:
//! 1. **Resolution** -- deciding whether a submitted edit may be written,
//!    given the version token the client last saw and the current row.
//! 2. **Reporting** -- describing, field by field, how a stale submission
//!    differs from what is stored now, so the client can retry safely.
//!
//! Both parts are pure. The write itself, including the atomic re-check of
//! the token, belongs to the persistence layer.

pub mod report;
pub mod resolver;

pub use report::{ConflictReport, DepartmentField, FieldConflict, FieldValue};
pub use resolver::{ConcurrencyResolver, Outcome};
