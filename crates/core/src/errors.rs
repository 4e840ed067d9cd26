//! Error types for the Contoso University core library.
//!
//! Each subsystem has its own error type derived with `thiserror`, and a
//! top-level [`CoreError`] enum unifies them all for callers that want a
//! single error type.
//!
//! Concurrency conflicts are *not* errors: a stale edit or a record deleted
//! by another user is reported through
//! [`Outcome`](crate::concurrency::Outcome) so callers can re-render and let
//! the user retry.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Unified error type for the entire core library.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Assignment(#[from] AssignmentError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

// ---------------------------------------------------------------------------
// Course assignment errors
// ---------------------------------------------------------------------------

/// Errors from the course-assignment reconciler.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AssignmentError {
    /// A submitted course selection entry is not an integer course ID.
    #[error("invalid course identifier: '{value}'")]
    InvalidCourseIdentifier { value: String },
}

// ---------------------------------------------------------------------------
// Department validation errors
// ---------------------------------------------------------------------------

/// A submitted department value that breaks a field rule.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DepartmentValidationError {
    #[error("name must be between {min} and {max} characters, got {len}")]
    NameLength { len: usize, min: usize, max: usize },

    /// The administrator ID does not name an existing instructor.
    #[error("person {0} is not an instructor")]
    AdministratorNotInstructor(i64),
}

impl DepartmentValidationError {
    /// The form field the error belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::NameLength { .. } => "name",
            Self::AdministratorNotInstructor(_) => "administrator",
        }
    }
}

// ---------------------------------------------------------------------------
// Service errors
// ---------------------------------------------------------------------------

/// Errors from the orchestration services that wire decisions to writes.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The course selection submitted with an instructor edit was malformed.
    #[error("invalid course selection: {0}")]
    Assignment(#[from] AssignmentError),

    /// The instructor being edited or deleted does not exist.
    #[error("instructor {0} not found")]
    InstructorNotFound(i64),

    /// The instructor administers several departments; deleting them would
    /// leave the intended reassignment policy undefined.
    #[error("instructor {instructor_id} administers {count} departments")]
    AdministersMultipleDepartments { instructor_id: i64, count: usize },

    /// Submitted department values failed validation.
    #[error("invalid department value for '{field}': {detail}")]
    InvalidDepartment { field: String, detail: String },

    /// The persistence layer failed while performing the write.
    #[error("persistence failure: {0}")]
    Database(#[from] DatabaseError),
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Errors from configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file not found.
    #[error("configuration file not found: {0}")]
    FileNotFound(String),

    /// TOML parse error.
    #[error("configuration parse error: {0}")]
    ParseError(String),

    /// A config value is invalid.
    #[error("invalid configuration value for '{field}': {detail}")]
    InvalidValue { field: String, detail: String },

    /// Generic I/O error reading the config file.
    #[error("configuration I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Database errors
// ---------------------------------------------------------------------------

/// Errors from the SQLite persistence layer.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Underlying rusqlite error.
    #[error("database error: {0}")]
    SqliteError(#[from] rusqlite::Error),

    /// A migration failed.
    #[error("database migration failed (version {version}): {detail}")]
    MigrationFailed { version: u32, detail: String },

    /// A record was not found.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A stored value could not be decoded into its domain type.
    #[error("corrupt {entity} row: {detail}")]
    CorruptRow { entity: String, detail: String },

    /// Generic I/O error (e.g. file permissions).
    #[error("database I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<DepartmentValidationError> for ServiceError {
    fn from(err: DepartmentValidationError) -> Self {
        Self::InvalidDepartment {
            field: err.field().to_string(),
            detail: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = AssignmentError::InvalidCourseIdentifier { value: "x".into() };
        assert_eq!(err.to_string(), "invalid course identifier: 'x'");

        let err = ServiceError::AdministersMultipleDepartments {
            instructor_id: 7,
            count: 2,
        };
        assert_eq!(err.to_string(), "instructor 7 administers 2 departments");

        let err = ConfigError::InvalidValue {
            field: "database.path".into(),
            detail: "must not be empty".into(),
        };
        assert!(err.to_string().contains("database.path"));

        let err = DatabaseError::NotFound {
            entity: "department".into(),
            id: "3".into(),
        };
        assert_eq!(err.to_string(), "department not found: 3");
    }

    #[test]
    fn test_core_error_from_subsystem() {
        let err = AssignmentError::InvalidCourseIdentifier { value: "abc".into() };
        let core_err: CoreError = err.into();
        assert!(matches!(core_err, CoreError::Assignment(_)));

        let db_err = DatabaseError::NotFound {
            entity: "course".into(),
            id: "1050".into(),
        };
        let service_err: ServiceError = db_err.into();
        assert!(matches!(service_err, ServiceError::Database(_)));
        let core_err: CoreError = service_err.into();
        assert!(matches!(core_err, CoreError::Service(_)));
    }

    #[test]
    fn test_validation_error_maps_to_field() {
        let err: ServiceError = DepartmentValidationError::AdministratorNotInstructor(7).into();
        assert!(matches!(
            err,
            ServiceError::InvalidDepartment { ref field, ref detail }
                if field == "administrator" && detail == "person 7 is not an instructor"
        ));
    }
}
