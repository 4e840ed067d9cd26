//! Conflict resolution for concurrent department edits.
//!
//! [`ConcurrencyResolver::resolve`] is the decision step of an optimistic
//! concurrency check. It never writes: a [`Outcome::NoConflict`] only clears
//! the caller to attempt a conditional update, which re-checks the token
//! atomically at write time.

use serde::{Deserialize, Serialize};

use super::report::ConflictReport;
use crate::models::{Department, DepartmentValues, VersionToken};

/// Decision for a submitted department edit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// The client's token matches the stored row; the write may proceed.
    NoConflict,
    /// Someone else wrote the row since the client loaded it.
    Conflicting(ConflictReport),
    /// The row no longer exists.
    DeletedByOther,
}

impl Outcome {
    pub fn is_no_conflict(&self) -> bool {
        matches!(self, Self::NoConflict)
    }
}

/// Stateless resolver for department edit conflicts.
pub struct ConcurrencyResolver;

impl ConcurrencyResolver {
    /// Decide whether an edit built on `client_version` may be written over
    /// `current`.
    ///
    /// Tokens are compared by byte equality only. A mismatch is always a
    /// conflict, even if every submitted value equals the stored one.
    pub fn resolve(
        client_version: &VersionToken,
        client_values: &DepartmentValues,
        current: Option<&Department>,
    ) -> Outcome {
        let Some(current) = current else {
            return Outcome::DeletedByOther;
        };

        if client_version.as_bytes() == current.version.as_bytes() {
            return Outcome::NoConflict;
        }

        Outcome::Conflicting(ConflictReport::build(
            client_values,
            current.values(),
            current.version.clone(),
        ))
    }
}
