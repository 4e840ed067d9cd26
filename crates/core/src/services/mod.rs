//! Services that turn resolver and reconciler decisions into writes.
//!
//! Both services borrow a [`SchoolStore`](crate::store::SchoolStore) and hold
//! no state of their own, so they are cheap to build per request.

pub mod department;
pub mod instructor;

pub use department::{DeleteOutcome, DepartmentService, EditOutcome, FieldMessage};
pub use instructor::InstructorService;
