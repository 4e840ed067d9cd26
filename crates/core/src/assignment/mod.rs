//! Instructor course assignment.
//!
//! Editing an instructor submits the full list of checked course IDs. The
//! reconciler turns that list into the minimal set of associations to add
//! and remove; the checklist builds the rows the edit form is rendered from.

pub mod checklist;
pub mod reconciler;

pub use checklist::{assigned_courses, AssignedCourse};
pub use reconciler::{parse_selection, AssignmentDelta, CourseAssignmentReconciler};
