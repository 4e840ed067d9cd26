//! The [`SchoolStore`] trait: the persistence interface the services use.
//!
//! [`Database`](crate::db::Database) is the SQLite implementation. The
//! conditional department writes must be atomic in every implementation:
//! two writers holding the same stale token may both lose, but at most one
//! may win.

use std::collections::BTreeSet;

use crate::assignment::AssignmentDelta;
use crate::errors::DatabaseError;
use crate::models::{
    Course, Department, DepartmentValues, Instructor, InstructorFields, VersionToken,
};

/// Result of a conditional department update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateResult {
    /// The row matched the expected token and now carries this new token.
    Updated(VersionToken),
    /// No row with that ID and token exists: either someone else wrote it,
    /// or it was deleted.
    VersionMismatch,
}

/// Result of a conditional department delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteResult {
    Deleted,
    VersionMismatch,
}

/// Everything written when an instructor edit is saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructorChanges {
    pub instructor_id: i64,
    pub fields: InstructorFields,
    pub delta: AssignmentDelta,
}

/// Storage backend for the records the services operate on.
pub trait SchoolStore: Send + Sync {
    /// Returns `Ok(None)` if the department does not exist.
    fn find_department_by_id(&self, id: i64) -> Result<Option<Department>, DatabaseError>;

    /// Load an instructor with course assignments and office.
    fn find_instructor_with_courses(&self, id: i64) -> Result<Option<Instructor>, DatabaseError>;

    fn find_course_by_id(&self, id: i64) -> Result<Option<Course>, DatabaseError>;

    /// All courses, ordered by ID.
    fn list_courses(&self) -> Result<Vec<Course>, DatabaseError>;

    /// IDs of every course the system knows about.
    fn known_course_ids(&self) -> Result<BTreeSet<i64>, DatabaseError> {
        Ok(self.list_courses()?.into_iter().map(|c| c.id).collect())
    }

    /// `"Last, First"` for an instructor, if one exists with that ID.
    fn instructor_name(&self, id: i64) -> Result<Option<String>, DatabaseError> {
        Ok(self
            .find_instructor_with_courses(id)?
            .map(|i| i.name.full_name()))
    }

    /// Create a department with a fresh version token.
    fn insert_department(&self, values: &DepartmentValues) -> Result<Department, DatabaseError>;

    /// Write `values` only if the row still carries `expected`. A new token
    /// is assigned in the same atomic step.
    fn conditional_update_department(
        &self,
        id: i64,
        values: &DepartmentValues,
        expected: &VersionToken,
    ) -> Result<UpdateResult, DatabaseError>;

    /// Delete the row only if it still carries `expected`.
    fn conditional_delete_department(
        &self,
        id: i64,
        expected: &VersionToken,
    ) -> Result<DeleteResult, DatabaseError>;

    /// IDs of the departments administered by an instructor.
    fn departments_administered_by(&self, instructor_id: i64) -> Result<Vec<i64>, DatabaseError>;

    /// Create an instructor with an optional office and initial courses.
    fn insert_instructor(
        &self,
        fields: &InstructorFields,
        course_ids: &BTreeSet<i64>,
    ) -> Result<i64, DatabaseError>;

    /// Persist instructor fields, office and course delta as one unit.
    fn save_instructor(&self, changes: &InstructorChanges) -> Result<(), DatabaseError>;

    /// Delete an instructor, first clearing the administrator of
    /// `clear_department` if given. One unit.
    fn delete_instructor(
        &self,
        instructor_id: i64,
        clear_department: Option<i64>,
    ) -> Result<(), DatabaseError>;
}
