//! Department create, edit and delete under optimistic concurrency.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::concurrency::report::DELETED_NOTICE;
use crate::concurrency::{
    ConcurrencyResolver, ConflictReport, DepartmentField, FieldValue, Outcome,
};
use crate::errors::{DepartmentValidationError, ServiceError};
use crate::models::{Department, DepartmentValues, VersionToken};
use crate::store::{DeleteResult, SchoolStore, UpdateResult};

/// A conflict message ready to attach to one form field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldMessage {
    pub field: DepartmentField,
    pub message: String,
}

/// Result of [`DepartmentService::edit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// The edit was written; the row now carries this token.
    Saved(VersionToken),
    /// Someone else wrote the row first. Nothing was written.
    Conflicting {
        report: ConflictReport,
        messages: Vec<FieldMessage>,
    },
    /// The row was deleted. Nothing was written.
    DeletedByOther,
}

impl EditOutcome {
    /// The page-level message for an edit that was not saved.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            Self::Saved(_) => None,
            Self::Conflicting { report, .. } => Some(report.notice()),
            Self::DeletedByOther => Some(DELETED_NOTICE),
        }
    }
}

/// Result of [`DepartmentService::delete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// Nothing to delete; someone else already removed it.
    AlreadyGone,
    /// The row changed since the client loaded it. It was kept, and its
    /// current state is returned for confirmation.
    Conflicting(Department),
}

pub struct DepartmentService<'a, S: SchoolStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: SchoolStore + ?Sized> DepartmentService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Create a department after validating its values.
    pub fn create(&self, values: &DepartmentValues) -> Result<Department, ServiceError> {
        self.validate(values)?;
        let department = self.store.insert_department(values)?;
        info!(id = department.id, name = %department.name, "department created");
        Ok(department)
    }

    /// Apply an edit the client built on top of `client_version`.
    ///
    /// The resolver decides first; a clean decision is then written with a
    /// conditional update. If that write loses a race the row is read again
    /// and the client gets the conflict against what is stored now.
    pub fn edit(
        &self,
        id: i64,
        client_version: &VersionToken,
        values: &DepartmentValues,
    ) -> Result<EditOutcome, ServiceError> {
        self.validate(values)?;

        let current = self.store.find_department_by_id(id)?;
        match ConcurrencyResolver::resolve(client_version, values, current.as_ref()) {
            Outcome::NoConflict => {}
            Outcome::Conflicting(report) => return self.refuse(id, Some(report)),
            Outcome::DeletedByOther => return self.refuse(id, None),
        }

        match self
            .store
            .conditional_update_department(id, values, client_version)?
        {
            UpdateResult::Updated(version) => {
                info!(id, version = %version, "department saved");
                Ok(EditOutcome::Saved(version))
            }
            UpdateResult::VersionMismatch => {
                warn!(id, "department changed between read and write");
                let report = self
                    .store
                    .find_department_by_id(id)?
                    .map(|current| ConflictReport::build(values, current.values(), current.version));
                self.refuse(id, report)
            }
        }
    }

    /// Delete a department, but only the version the client confirmed.
    pub fn delete(&self, id: i64, client_version: &VersionToken) -> Result<DeleteOutcome, ServiceError> {
        match self.store.conditional_delete_department(id, client_version)? {
            DeleteResult::Deleted => {
                info!(id, "department deleted");
                Ok(DeleteOutcome::Deleted)
            }
            DeleteResult::VersionMismatch => match self.store.find_department_by_id(id)? {
                None => {
                    info!(id, "department already deleted");
                    Ok(DeleteOutcome::AlreadyGone)
                }
                Some(current) => {
                    warn!(id, "department delete refused, row changed");
                    Ok(DeleteOutcome::Conflicting(current))
                }
            },
        }
    }

    /// Render field messages for a conflict, resolving administrator names.
    pub fn field_messages(&self, report: &ConflictReport) -> Result<Vec<FieldMessage>, ServiceError> {
        let mut names = HashMap::new();
        for conflict in &report.fields {
            if let FieldValue::Instructor(Some(instructor_id)) = conflict.current_value {
                if let Some(name) = self.store.instructor_name(instructor_id)? {
                    names.insert(instructor_id, name);
                }
            }
        }

        Ok(report
            .fields
            .iter()
            .map(|conflict| FieldMessage {
                field: conflict.field,
                message: conflict.message(|id| names.get(&id).cloned()),
            })
            .collect())
    }

    /// Field rules, plus a lookup that the administrator is an instructor.
    fn validate(&self, values: &DepartmentValues) -> Result<(), ServiceError> {
        values.validate()?;
        if let Some(administrator_id) = values.administrator_id {
            if self
                .store
                .find_instructor_with_courses(administrator_id)?
                .is_none()
            {
                return Err(DepartmentValidationError::AdministratorNotInstructor(administrator_id).into());
            }
        }
        Ok(())
    }

    /// Turn a refused edit into its outcome. `None` means the row is gone.
    fn refuse(&self, id: i64, report: Option<ConflictReport>) -> Result<EditOutcome, ServiceError> {
        let Some(report) = report else {
            warn!(id, "edit target was deleted");
            return Ok(EditOutcome::DeletedByOther);
        };
        warn!(id, fields = report.fields.len(), "stale department edit");
        let messages = self.field_messages(&report)?;
        Ok(EditOutcome::Conflicting { report, messages })
    }
}
