//! Instructor create, edit and delete, including course assignment.

use std::collections::BTreeSet;

use tracing::{info, warn};

use crate::assignment::{assigned_courses, AssignedCourse, AssignmentDelta, CourseAssignmentReconciler};
use crate::errors::ServiceError;
use crate::models::{Instructor, InstructorFields};
use crate::store::{InstructorChanges, SchoolStore};

pub struct InstructorService<'a, S: SchoolStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: SchoolStore + ?Sized> InstructorService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    fn load(&self, id: i64) -> Result<Instructor, ServiceError> {
        self.store
            .find_instructor_with_courses(id)?
            .ok_or(ServiceError::InstructorNotFound(id))
    }

    /// Create an instructor with the courses checked on the form. Unknown
    /// course IDs are dropped; malformed ones reject the request.
    pub fn create<T: AsRef<str>>(
        &self,
        fields: &InstructorFields,
        selected_raw: &[T],
    ) -> Result<i64, ServiceError> {
        let known = self.store.known_course_ids()?;
        let delta = CourseAssignmentReconciler::reconcile(&BTreeSet::new(), selected_raw, &known)?;
        let id = self.store.insert_instructor(fields, &delta.to_add)?;
        info!(id, courses = delta.to_add.len(), "instructor created");
        Ok(id)
    }

    /// Save an instructor edit together with the submitted course selection.
    ///
    /// An empty selection unassigns every course. A blank office location
    /// removes the office assignment. Returns the applied delta.
    pub fn edit<T: AsRef<str>>(
        &self,
        id: i64,
        fields: &InstructorFields,
        selected_raw: &[T],
    ) -> Result<AssignmentDelta, ServiceError> {
        let instructor = self.load(id)?;
        let known = self.store.known_course_ids()?;
        let delta = CourseAssignmentReconciler::reconcile(&instructor.course_ids, selected_raw, &known)?;

        self.store.save_instructor(&InstructorChanges {
            instructor_id: id,
            fields: fields.clone(),
            delta: delta.clone(),
        })?;
        info!(
            id,
            added = delta.to_add.len(),
            removed = delta.to_remove.len(),
            "instructor saved"
        );
        Ok(delta)
    }

    /// Delete an instructor. A department they administer is left without
    /// an administrator. Instructors administering several departments are
    /// refused.
    pub fn delete(&self, id: i64) -> Result<(), ServiceError> {
        self.load(id)?;

        let departments = self.store.departments_administered_by(id)?;
        let clear = match departments.as_slice() {
            [] => None,
            [department_id] => Some(*department_id),
            many => {
                warn!(id, count = many.len(), "refusing to delete multi-department administrator");
                return Err(ServiceError::AdministersMultipleDepartments {
                    instructor_id: id,
                    count: many.len(),
                });
            }
        };

        self.store.delete_instructor(id, clear)?;
        info!(id, cleared_department = ?clear, "instructor deleted");
        Ok(())
    }

    /// Every course, marked with whether this instructor teaches it.
    pub fn course_checklist(&self, id: i64) -> Result<Vec<AssignedCourse>, ServiceError> {
        let instructor = self.load(id)?;
        let courses = self.store.list_courses()?;
        Ok(assigned_courses(&courses, &instructor.course_ids))
    }
}
