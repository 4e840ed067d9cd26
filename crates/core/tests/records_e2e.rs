//! End-to-end tests for department and instructor editing against a real
//! SQLite file database.
//!
//! `RacingStore` wraps the database and lets another writer slip in between
//! the service's read and its conditional write, which is the window the
//! atomic update exists to close.

use std::collections::BTreeSet;
use std::sync::Mutex;

use chrono::NaiveDate;
use tempfile::TempDir;

use contoso_core::concurrency::report::STALE_EDIT_NOTICE;
use contoso_core::concurrency::DepartmentField;
use contoso_core::config::AppConfig;
use contoso_core::db::Database;
use contoso_core::errors::DatabaseError;
use contoso_core::models::{
    Course, Department, DepartmentValues, Instructor, InstructorFields, Money, PersonName,
    VersionToken,
};
use contoso_core::services::{DeleteOutcome, DepartmentService, EditOutcome, InstructorService};
use contoso_core::store::{DeleteResult, InstructorChanges, SchoolStore, UpdateResult};

// ===========================================================================
// Helpers
// ===========================================================================

fn open_db(dir: &TempDir) -> Database {
    let toml_str = format!(
        "[database]\npath = {:?}\nbusy_timeout_ms = 1000\n",
        dir.path().join("school.db").display().to_string()
    );
    let config = AppConfig::from_toml(&toml_str).unwrap();
    config.validate().unwrap();
    let db = Database::open(&config.database).unwrap();
    db.initialize().unwrap();
    db
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn values(name: &str, dollars: i64) -> DepartmentValues {
    DepartmentValues {
        name: name.into(),
        budget: Money::from_dollars(dollars),
        start_date: date(2007, 9, 1),
        administrator_id: None,
    }
}

/// What the interloping writer does before the service's write lands.
enum Interloper {
    Update(DepartmentValues),
    Delete,
}

struct RacingStore<'a> {
    db: &'a Database,
    interloper: Mutex<Option<Interloper>>,
}

impl<'a> RacingStore<'a> {
    fn new(db: &'a Database, interloper: Interloper) -> Self {
        Self {
            db,
            interloper: Mutex::new(Some(interloper)),
        }
    }

    fn interfere(&self, id: i64) {
        let Some(action) = self.interloper.lock().unwrap().take() else {
            return;
        };
        let current = self.db.get_department(id).unwrap().unwrap();
        match action {
            Interloper::Update(values) => {
                let result = self
                    .db
                    .update_department_if_version(id, &values, &current.version)
                    .unwrap();
                assert!(matches!(result, UpdateResult::Updated(_)));
            }
            Interloper::Delete => {
                let result = self
                    .db
                    .delete_department_if_version(id, &current.version)
                    .unwrap();
                assert_eq!(result, DeleteResult::Deleted);
            }
        }
    }
}

impl SchoolStore for RacingStore<'_> {
    fn find_department_by_id(&self, id: i64) -> Result<Option<Department>, DatabaseError> {
        self.db.find_department_by_id(id)
    }

    fn find_instructor_with_courses(&self, id: i64) -> Result<Option<Instructor>, DatabaseError> {
        self.db.find_instructor_with_courses(id)
    }

    fn find_course_by_id(&self, id: i64) -> Result<Option<Course>, DatabaseError> {
        self.db.find_course_by_id(id)
    }

    fn list_courses(&self) -> Result<Vec<Course>, DatabaseError> {
        self.db.list_courses()
    }

    fn insert_department(&self, values: &DepartmentValues) -> Result<Department, DatabaseError> {
        SchoolStore::insert_department(self.db, values)
    }

    fn conditional_update_department(
        &self,
        id: i64,
        values: &DepartmentValues,
        expected: &VersionToken,
    ) -> Result<UpdateResult, DatabaseError> {
        self.interfere(id);
        self.db.conditional_update_department(id, values, expected)
    }

    fn conditional_delete_department(
        &self,
        id: i64,
        expected: &VersionToken,
    ) -> Result<DeleteResult, DatabaseError> {
        self.interfere(id);
        self.db.conditional_delete_department(id, expected)
    }

    fn departments_administered_by(&self, instructor_id: i64) -> Result<Vec<i64>, DatabaseError> {
        self.db.departments_administered_by(instructor_id)
    }

    fn insert_instructor(
        &self,
        fields: &InstructorFields,
        course_ids: &BTreeSet<i64>,
    ) -> Result<i64, DatabaseError> {
        self.db.insert_instructor(fields, course_ids)
    }

    fn save_instructor(&self, changes: &InstructorChanges) -> Result<(), DatabaseError> {
        self.db.save_instructor(changes)
    }

    fn delete_instructor(
        &self,
        instructor_id: i64,
        clear_department: Option<i64>,
    ) -> Result<(), DatabaseError> {
        self.db.delete_instructor(instructor_id, clear_department)
    }
}

// ===========================================================================
// Departments
// ===========================================================================

#[test]
fn test_physics_scenario() {
    let dir = TempDir::new().unwrap();
    let db = open_db(&dir);
    let service = DepartmentService::new(&db);

    let v1 = service.create(&values("Physics", 1000)).unwrap();
    // Another user saves without changing any value; only the token moves.
    let EditOutcome::Saved(v2) = service.edit(v1.id, &v1.version, &values("Physics", 1000)).unwrap() else {
        panic!("first edit should save");
    };

    let outcome = service
        .edit(v1.id, &v1.version, &values("Physik", 1000))
        .unwrap();
    let EditOutcome::Conflicting { report, messages } = outcome else {
        panic!("expected conflict, got {outcome:?}");
    };
    assert_eq!(report.current_version, v2);
    assert_eq!(report.fields.len(), 1);
    assert_eq!(report.fields[0].field, DepartmentField::Name);
    assert!(report.field(DepartmentField::Budget).is_none());
    assert_eq!(messages[0].message, "Current value: Physics");
    assert_eq!(report.notice(), STALE_EDIT_NOTICE);

    // Resubmitting with the refreshed token goes through.
    let retry = service
        .edit(v1.id, &report.current_version, &values("Physik", 1000))
        .unwrap();
    assert!(matches!(retry, EditOutcome::Saved(_)));
    assert_eq!(db.get_department(v1.id).unwrap().unwrap().name, "Physik");
}

#[test]
fn test_write_lost_to_racing_update_reports_conflict() {
    let dir = TempDir::new().unwrap();
    let db = open_db(&dir);
    let dept = DepartmentService::new(&db)
        .create(&values("History", 200_000))
        .unwrap();

    let store = RacingStore::new(&db, Interloper::Update(values("History", 250_000)));
    let outcome = DepartmentService::new(&store)
        .edit(dept.id, &dept.version, &values("History", 180_000))
        .unwrap();

    let EditOutcome::Conflicting { report, messages } = outcome else {
        panic!("expected conflict, got {outcome:?}");
    };
    assert_eq!(report.fields.len(), 1);
    assert_eq!(messages[0].field, DepartmentField::Budget);
    assert_eq!(messages[0].message, "Current value: $250,000.00");

    let stored = db.get_department(dept.id).unwrap().unwrap();
    assert_eq!(stored.budget, Money::from_dollars(250_000));
    assert_eq!(stored.version, report.current_version);
}

#[test]
fn test_write_lost_to_racing_delete_reports_deleted() {
    let dir = TempDir::new().unwrap();
    let db = open_db(&dir);
    let dept = DepartmentService::new(&db)
        .create(&values("Geology", 10_000))
        .unwrap();

    let store = RacingStore::new(&db, Interloper::Delete);
    let outcome = DepartmentService::new(&store)
        .edit(dept.id, &dept.version, &values("Geology", 20_000))
        .unwrap();
    assert_eq!(outcome, EditOutcome::DeletedByOther);
}

#[test]
fn test_delete_lost_to_racing_update_returns_current() {
    let dir = TempDir::new().unwrap();
    let db = open_db(&dir);
    let dept = DepartmentService::new(&db)
        .create(&values("Music", 5_000))
        .unwrap();

    let store = RacingStore::new(&db, Interloper::Update(values("Music", 6_000)));
    let outcome = DepartmentService::new(&store)
        .delete(dept.id, &dept.version)
        .unwrap();
    let DeleteOutcome::Conflicting(current) = outcome else {
        panic!("expected conflict, got {outcome:?}");
    };
    assert_eq!(current.budget, Money::from_dollars(6_000));
}

#[test]
fn test_concurrent_writers_with_same_token_at_most_one_wins() {
    let dir = TempDir::new().unwrap();
    let db = open_db(&dir);
    let dept = DepartmentService::new(&db)
        .create(&values("Philosophy", 1_000))
        .unwrap();

    let outcomes: Vec<EditOutcome> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let db = &db;
                let dept = &dept;
                s.spawn(move || {
                    DepartmentService::new(db)
                        .edit(dept.id, &dept.version, &values("Philosophy", 2_000 + i))
                        .unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let saved = outcomes
        .iter()
        .filter(|o| matches!(o, EditOutcome::Saved(_)))
        .count();
    assert_eq!(saved, 1);
    assert!(outcomes
        .iter()
        .all(|o| matches!(o, EditOutcome::Saved(_) | EditOutcome::Conflicting { .. })));
}

// ===========================================================================
// Instructors
// ===========================================================================

#[test]
fn test_instructor_course_scenario() {
    let dir = TempDir::new().unwrap();
    let db = open_db(&dir);
    let dept = db.insert_department(&values("Economics", 100_000)).unwrap();
    for id in 1..=4 {
        db.insert_course(&Course {
            id,
            title: format!("Economics {id}"),
            credits: 3,
            department_id: dept.id,
        })
        .unwrap();
    }

    let service = InstructorService::new(&db);
    let fields = InstructorFields {
        name: PersonName::new("Kapoor", "Candace"),
        hire_date: date(2001, 1, 15),
        office_location: Some("Thompson 304".into()),
    };
    let id = service.create(&fields, &["1", "2", "3"]).unwrap();

    let delta = service.edit(id, &fields, &["2", "3", "4"]).unwrap();
    assert_eq!(delta.to_add, [4].into_iter().collect());
    assert_eq!(delta.to_remove, [1].into_iter().collect());

    let checklist = service.course_checklist(id).unwrap();
    let assigned: Vec<i64> = checklist
        .iter()
        .filter(|c| c.assigned)
        .map(|c| c.course_id)
        .collect();
    assert_eq!(assigned, vec![2, 3, 4]);

    // A malformed selection is refused and leaves the assignment untouched.
    assert!(service.edit(id, &fields, &["2", "x"]).is_err());
    assert_eq!(
        db.get_instructor(id).unwrap().unwrap().course_ids,
        [2, 3, 4].into_iter().collect()
    );

    // Deleting the course removes it from the instructor too.
    db.delete_course(4).unwrap();
    assert_eq!(
        db.get_instructor(id).unwrap().unwrap().course_ids,
        [2, 3].into_iter().collect()
    );
}

#[test]
fn test_data_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let version = {
        let db = open_db(&dir);
        let dept = db.insert_department(&values("Astronomy", 42)).unwrap();
        dept.version
    };

    let db = open_db(&dir);
    let departments = db.list_departments().unwrap();
    assert_eq!(departments.len(), 1);
    assert_eq!(departments[0].version, version);
}
