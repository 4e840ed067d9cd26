//! Course checklist rows for the instructor edit form.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::Course;

/// One checkbox in the course list: every course is listed, and `assigned`
/// marks the ones the instructor currently teaches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssignedCourse {
    pub course_id: i64,
    pub title: String,
    pub assigned: bool,
}

/// Build checklist rows for `all_courses`, preserving their order.
pub fn assigned_courses(all_courses: &[Course], instructor_courses: &BTreeSet<i64>) -> Vec<AssignedCourse> {
    all_courses
        .iter()
        .map(|course| AssignedCourse {
            course_id: course.id,
            title: course.title.clone(),
            assigned: instructor_courses.contains(&course.id),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(id: i64, title: &str) -> Course {
        Course {
            id,
            title: title.into(),
            credits: 3,
            department_id: 1,
        }
    }

    #[test]
    fn test_marks_assigned_courses() {
        let all = vec![course(1045, "Calculus"), course(1050, "Chemistry"), course(2021, "Composition")];
        let assigned: BTreeSet<i64> = [1050].into_iter().collect();

        let rows = assigned_courses(&all, &assigned);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].course_id, 1045);
        assert!(!rows[0].assigned);
        assert!(rows[1].assigned);
        assert_eq!(rows[1].title, "Chemistry");
        assert!(!rows[2].assigned);
    }

    #[test]
    fn test_new_instructor_has_nothing_checked() {
        let all = vec![course(1, "Literature")];
        let rows = assigned_courses(&all, &BTreeSet::new());
        assert!(rows.iter().all(|r| !r.assigned));
    }
}
