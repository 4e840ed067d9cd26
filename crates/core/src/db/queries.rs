//! Typed query helpers for every table in the school database.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

use super::Database;
use crate::assignment::AssignmentDelta;
use crate::errors::DatabaseError;
use crate::models::{
    Course, Department, DepartmentValues, Enrollment, Grade, Instructor, InstructorFields, Money,
    OfficeAssignment, Person, PersonKind, PersonName, Student, VersionToken,
};
use crate::store::{DeleteResult, InstructorChanges, SchoolStore, UpdateResult};

const DATE_FORMAT: &str = "%Y-%m-%d";

const DEPARTMENT_COLUMNS: &str =
    "id, name, budget_cents, start_date, instructor_id, row_version";

const PERSON_COLUMNS: &str =
    "id, last_name, first_mid_name, hire_date, enrollment_date, email_address, discriminator";

// ---------------------------------------------------------------------------
// Raw rows
// ---------------------------------------------------------------------------

/// A row from the `departments` table, before date decoding.
#[derive(Debug, Clone)]
struct DepartmentRow {
    id: i64,
    name: String,
    budget_cents: i64,
    start_date: String,
    instructor_id: Option<i64>,
    row_version: Vec<u8>,
}

impl DepartmentRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            budget_cents: row.get(2)?,
            start_date: row.get(3)?,
            instructor_id: row.get(4)?,
            row_version: row.get(5)?,
        })
    }

    fn into_department(self) -> Result<Department, DatabaseError> {
        Ok(Department {
            id: self.id,
            name: self.name,
            budget: Money::from_cents(self.budget_cents),
            start_date: parse_date("department", &self.start_date)?,
            administrator_id: self.instructor_id,
            version: VersionToken::from_bytes(self.row_version),
        })
    }
}

/// A row from the `people` table, before it is split by discriminator.
#[derive(Debug, Clone)]
struct PersonRow {
    id: i64,
    last_name: String,
    first_mid_name: String,
    hire_date: Option<String>,
    enrollment_date: Option<String>,
    email_address: Option<String>,
    discriminator: String,
}

impl PersonRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            last_name: row.get(1)?,
            first_mid_name: row.get(2)?,
            hire_date: row.get(3)?,
            enrollment_date: row.get(4)?,
            email_address: row.get(5)?,
            discriminator: row.get(6)?,
        })
    }

    fn kind(&self) -> Result<PersonKind, DatabaseError> {
        PersonKind::from_str_val(&self.discriminator).ok_or_else(|| DatabaseError::CorruptRow {
            entity: "person".into(),
            detail: format!("unknown discriminator '{}'", self.discriminator),
        })
    }

    fn name(&self) -> PersonName {
        PersonName::new(&self.last_name, &self.first_mid_name)
    }

    fn into_student(self) -> Result<Student, DatabaseError> {
        let enrollment_date = required_date("student", self.enrollment_date.as_deref())?;
        Ok(Student {
            id: self.id,
            name: self.name(),
            email_address: self.email_address,
            enrollment_date,
        })
    }

    /// Build an instructor, loading courses and office through `conn`.
    fn into_instructor(self, conn: &Connection) -> Result<Instructor, DatabaseError> {
        let hire_date = required_date("instructor", self.hire_date.as_deref())?;
        Ok(Instructor {
            id: self.id,
            name: self.name(),
            hire_date,
            course_ids: instructor_course_ids(conn, self.id)?,
            office: office_for(conn, self.id)?,
        })
    }
}

/// An enrollment joined with the enrolled student's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseEnrollment {
    pub enrollment: Enrollment,
    pub student_name: PersonName,
}

fn course_from_row(row: &Row<'_>) -> rusqlite::Result<Course> {
    Ok(Course {
        id: row.get(0)?,
        title: row.get(1)?,
        credits: row.get(2)?,
        department_id: row.get(3)?,
    })
}

// ---------------------------------------------------------------------------
// Connection-level helpers (usable inside transactions)
// ---------------------------------------------------------------------------

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn parse_date(entity: &str, s: &str) -> Result<NaiveDate, DatabaseError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|e| DatabaseError::CorruptRow {
        entity: entity.to_string(),
        detail: format!("invalid date '{s}': {e}"),
    })
}

fn required_date(entity: &str, s: Option<&str>) -> Result<NaiveDate, DatabaseError> {
    match s {
        Some(s) => parse_date(entity, s),
        None => Err(DatabaseError::CorruptRow {
            entity: entity.to_string(),
            detail: "missing date".into(),
        }),
    }
}

fn parse_grade(s: Option<String>) -> Result<Option<Grade>, DatabaseError> {
    s.map(|g| {
        Grade::from_str_val(&g).ok_or_else(|| DatabaseError::CorruptRow {
            entity: "enrollment".into(),
            detail: format!("invalid grade '{g}'"),
        })
    })
    .transpose()
}

fn load_person_row(conn: &Connection, id: i64) -> Result<Option<PersonRow>, DatabaseError> {
    let row = conn
        .query_row(
            &format!("SELECT {PERSON_COLUMNS} FROM people WHERE id = ?1"),
            params![id],
            PersonRow::from_row,
        )
        .optional()?;
    Ok(row)
}

fn load_instructor(conn: &Connection, id: i64) -> Result<Option<Instructor>, DatabaseError> {
    match load_person_row(conn, id)? {
        Some(row) if row.kind()? == PersonKind::Instructor => Ok(Some(row.into_instructor(conn)?)),
        _ => Ok(None),
    }
}

fn instructor_course_ids(conn: &Connection, instructor_id: i64) -> Result<BTreeSet<i64>, DatabaseError> {
    let mut stmt =
        conn.prepare("SELECT course_id FROM course_instructor WHERE instructor_id = ?1")?;
    let ids = stmt
        .query_map(params![instructor_id], |row| row.get(0))?
        .collect::<Result<BTreeSet<i64>, _>>()?;
    Ok(ids)
}

fn office_for(conn: &Connection, instructor_id: i64) -> Result<Option<OfficeAssignment>, DatabaseError> {
    let office = conn
        .query_row(
            "SELECT instructor_id, location FROM office_assignments WHERE instructor_id = ?1",
            params![instructor_id],
            |row| {
                Ok(OfficeAssignment {
                    instructor_id: row.get(0)?,
                    location: row.get(1)?,
                })
            },
        )
        .optional()?;
    Ok(office)
}

/// Upsert or remove the office row. `None` deletes any existing office.
fn write_office(conn: &Connection, instructor_id: i64, location: Option<&str>) -> Result<(), DatabaseError> {
    match location {
        Some(location) => {
            conn.execute(
                "INSERT INTO office_assignments (instructor_id, location) VALUES (?1, ?2)
                 ON CONFLICT (instructor_id) DO UPDATE SET location = excluded.location",
                params![instructor_id, location],
            )?;
        }
        None => {
            conn.execute(
                "DELETE FROM office_assignments WHERE instructor_id = ?1",
                params![instructor_id],
            )?;
        }
    }
    Ok(())
}

fn apply_course_delta(
    conn: &Connection,
    instructor_id: i64,
    delta: &AssignmentDelta,
) -> Result<(), DatabaseError> {
    for course_id in &delta.to_remove {
        conn.execute(
            "DELETE FROM course_instructor WHERE course_id = ?1 AND instructor_id = ?2",
            params![course_id, instructor_id],
        )?;
    }
    for course_id in &delta.to_add {
        conn.execute(
            "INSERT OR IGNORE INTO course_instructor (course_id, instructor_id) VALUES (?1, ?2)",
            params![course_id, instructor_id],
        )?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Query implementations
// ---------------------------------------------------------------------------

impl Database {
    // -- departments --------------------------------------------------------

    /// Insert a department with a freshly generated version token.
    pub fn insert_department(&self, values: &DepartmentValues) -> Result<Department, DatabaseError> {
        let version = VersionToken::generate();
        let conn = self.conn();
        conn.execute(
            "INSERT INTO departments (name, budget_cents, start_date, instructor_id, row_version)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                values.name,
                values.budget.cents(),
                format_date(values.start_date),
                values.administrator_id,
                version.as_bytes()
            ],
        )?;
        let id = conn.last_insert_rowid();
        debug!(id, name = %values.name, "inserted department");
        Ok(Department {
            id,
            name: values.name.clone(),
            budget: values.budget,
            start_date: values.start_date,
            administrator_id: values.administrator_id,
            version,
        })
    }

    /// Get a department by ID.
    pub fn get_department(&self, id: i64) -> Result<Option<Department>, DatabaseError> {
        let conn = self.conn();
        let row = conn
            .query_row(
                &format!("SELECT {DEPARTMENT_COLUMNS} FROM departments WHERE id = ?1"),
                params![id],
                DepartmentRow::from_row,
            )
            .optional()?;
        row.map(DepartmentRow::into_department).transpose()
    }

    /// List all departments ordered by name.
    pub fn list_departments(&self) -> Result<Vec<Department>, DatabaseError> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {DEPARTMENT_COLUMNS} FROM departments ORDER BY name"
        ))?;
        let rows = stmt
            .query_map([], DepartmentRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(DepartmentRow::into_department).collect()
    }

    /// Update a department only if its stored token still equals `expected`.
    ///
    /// The check and the write are one `UPDATE` statement, so a concurrent
    /// writer that slipped in after the caller's read is always detected.
    pub fn update_department_if_version(
        &self,
        id: i64,
        values: &DepartmentValues,
        expected: &VersionToken,
    ) -> Result<UpdateResult, DatabaseError> {
        let new_version = VersionToken::generate();
        let conn = self.conn();
        let changed = conn.execute(
            "UPDATE departments
             SET name = ?1, budget_cents = ?2, start_date = ?3, instructor_id = ?4, row_version = ?5
             WHERE id = ?6 AND row_version = ?7",
            params![
                values.name,
                values.budget.cents(),
                format_date(values.start_date),
                values.administrator_id,
                new_version.as_bytes(),
                id,
                expected.as_bytes()
            ],
        )?;
        if changed == 0 {
            debug!(id, expected = %expected, "department update lost version check");
            return Ok(UpdateResult::VersionMismatch);
        }
        debug!(id, version = %new_version, "updated department");
        Ok(UpdateResult::Updated(new_version))
    }

    /// Delete a department only if its stored token still equals `expected`.
    pub fn delete_department_if_version(
        &self,
        id: i64,
        expected: &VersionToken,
    ) -> Result<DeleteResult, DatabaseError> {
        let conn = self.conn();
        let changed = conn.execute(
            "DELETE FROM departments WHERE id = ?1 AND row_version = ?2",
            params![id, expected.as_bytes()],
        )?;
        if changed == 0 {
            debug!(id, "department delete lost version check");
            return Ok(DeleteResult::VersionMismatch);
        }
        debug!(id, "deleted department");
        Ok(DeleteResult::Deleted)
    }

    /// IDs of departments whose administrator is `instructor_id`.
    pub fn list_departments_administered_by(
        &self,
        instructor_id: i64,
    ) -> Result<Vec<i64>, DatabaseError> {
        let conn = self.conn();
        let mut stmt =
            conn.prepare("SELECT id FROM departments WHERE instructor_id = ?1 ORDER BY id")?;
        let ids = stmt
            .query_map(params![instructor_id], |row| row.get(0))?
            .collect::<Result<Vec<i64>, _>>()?;
        Ok(ids)
    }

    // -- people -------------------------------------------------------------

    /// Insert an instructor, their office and initial course links in one
    /// transaction. Returns the new instructor ID.
    pub fn create_instructor(
        &self,
        fields: &InstructorFields,
        course_ids: &BTreeSet<i64>,
    ) -> Result<i64, DatabaseError> {
        self.transaction(|conn| {
            conn.execute(
                "INSERT INTO people (last_name, first_mid_name, hire_date, discriminator)
                 VALUES (?1, ?2, ?3, 'Instructor')",
                params![
                    fields.name.last_name,
                    fields.name.first_mid_name,
                    format_date(fields.hire_date)
                ],
            )?;
            let id = conn.last_insert_rowid();
            write_office(conn, id, fields.normalized_office().as_deref())?;
            let delta = AssignmentDelta {
                to_add: course_ids.clone(),
                to_remove: BTreeSet::new(),
            };
            apply_course_delta(conn, id, &delta)?;
            debug!(id, courses = course_ids.len(), "inserted instructor");
            Ok(id)
        })
    }

    /// Insert a student. Returns the new student ID.
    pub fn insert_student(
        &self,
        name: &PersonName,
        email_address: Option<&str>,
        enrollment_date: NaiveDate,
    ) -> Result<i64, DatabaseError> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO people (last_name, first_mid_name, enrollment_date, email_address, discriminator)
             VALUES (?1, ?2, ?3, ?4, 'Student')",
            params![
                name.last_name,
                name.first_mid_name,
                format_date(enrollment_date),
                email_address
            ],
        )?;
        let id = conn.last_insert_rowid();
        debug!(id, "inserted student");
        Ok(id)
    }

    /// Get any person by ID, as the variant their discriminator names.
    pub fn get_person(&self, id: i64) -> Result<Option<Person>, DatabaseError> {
        let conn = self.conn();
        let Some(row) = load_person_row(&conn, id)? else {
            return Ok(None);
        };
        let person = match row.kind()? {
            PersonKind::Student => Person::Student(row.into_student()?),
            PersonKind::Instructor => Person::Instructor(row.into_instructor(&conn)?),
        };
        Ok(Some(person))
    }

    /// Get a student by ID; `None` if absent or not a student.
    pub fn get_student(&self, id: i64) -> Result<Option<Student>, DatabaseError> {
        match self.get_person(id)? {
            Some(Person::Student(s)) => Ok(Some(s)),
            _ => Ok(None),
        }
    }

    /// Get an instructor by ID with courses and office loaded.
    pub fn get_instructor(&self, id: i64) -> Result<Option<Instructor>, DatabaseError> {
        let conn = self.conn();
        load_instructor(&conn, id)
    }

    /// List all instructors ordered by last name.
    pub fn list_instructors(&self) -> Result<Vec<Instructor>, DatabaseError> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {PERSON_COLUMNS} FROM people WHERE discriminator = 'Instructor'
             ORDER BY last_name, first_mid_name"
        ))?;
        let rows = stmt
            .query_map([], PersonRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(|row| row.into_instructor(&conn)).collect()
    }

    /// Write instructor fields, office and course delta in one transaction.
    pub fn update_instructor(&self, changes: &InstructorChanges) -> Result<(), DatabaseError> {
        let id = changes.instructor_id;
        self.transaction(|conn| {
            let changed = conn.execute(
                "UPDATE people SET last_name = ?1, first_mid_name = ?2, hire_date = ?3
                 WHERE id = ?4 AND discriminator = 'Instructor'",
                params![
                    changes.fields.name.last_name,
                    changes.fields.name.first_mid_name,
                    format_date(changes.fields.hire_date),
                    id
                ],
            )?;
            if changed == 0 {
                return Err(DatabaseError::NotFound {
                    entity: "instructor".into(),
                    id: id.to_string(),
                });
            }
            write_office(conn, id, changes.fields.normalized_office().as_deref())?;
            apply_course_delta(conn, id, &changes.delta)?;
            debug!(
                id,
                added = changes.delta.to_add.len(),
                removed = changes.delta.to_remove.len(),
                "updated instructor"
            );
            Ok(())
        })
    }

    /// Delete an instructor in one transaction. If `clear_department` is
    /// given, that department's administrator is cleared first and it gets a
    /// new version token. Office and course links go with the instructor.
    pub fn remove_instructor(
        &self,
        instructor_id: i64,
        clear_department: Option<i64>,
    ) -> Result<(), DatabaseError> {
        self.transaction(|conn| {
            if let Some(department_id) = clear_department {
                conn.execute(
                    "UPDATE departments SET instructor_id = NULL, row_version = ?1
                     WHERE id = ?2 AND instructor_id = ?3",
                    params![
                        VersionToken::generate().as_bytes(),
                        department_id,
                        instructor_id
                    ],
                )?;
            }
            let changed = conn.execute(
                "DELETE FROM people WHERE id = ?1 AND discriminator = 'Instructor'",
                params![instructor_id],
            )?;
            if changed == 0 {
                return Err(DatabaseError::NotFound {
                    entity: "instructor".into(),
                    id: instructor_id.to_string(),
                });
            }
            debug!(instructor_id, ?clear_department, "deleted instructor");
            Ok(())
        })
    }

    // -- courses ------------------------------------------------------------

    /// Insert a course with its caller-assigned ID.
    pub fn insert_course(&self, course: &Course) -> Result<(), DatabaseError> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO courses (id, title, credits, department_id) VALUES (?1, ?2, ?3, ?4)",
            params![course.id, course.title, course.credits, course.department_id],
        )?;
        debug!(id = course.id, title = %course.title, "inserted course");
        Ok(())
    }

    /// Get a course by ID.
    pub fn get_course(&self, id: i64) -> Result<Option<Course>, DatabaseError> {
        let conn = self.conn();
        let course = conn
            .query_row(
                "SELECT id, title, credits, department_id FROM courses WHERE id = ?1",
                params![id],
                course_from_row,
            )
            .optional()?;
        Ok(course)
    }

    /// List all courses ordered by ID.
    pub fn list_all_courses(&self) -> Result<Vec<Course>, DatabaseError> {
        let conn = self.conn();
        let mut stmt =
            conn.prepare("SELECT id, title, credits, department_id FROM courses ORDER BY id")?;
        let courses = stmt
            .query_map([], course_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(courses)
    }

    /// Update title, credits and department of an existing course.
    pub fn update_course(&self, course: &Course) -> Result<(), DatabaseError> {
        let conn = self.conn();
        let changed = conn.execute(
            "UPDATE courses SET title = ?1, credits = ?2, department_id = ?3 WHERE id = ?4",
            params![course.title, course.credits, course.department_id, course.id],
        )?;
        if changed == 0 {
            return Err(DatabaseError::NotFound {
                entity: "course".into(),
                id: course.id.to_string(),
            });
        }
        debug!(id = course.id, "updated course");
        Ok(())
    }

    /// Delete a course; its instructor links and enrollments go with it.
    pub fn delete_course(&self, id: i64) -> Result<(), DatabaseError> {
        let conn = self.conn();
        let changed = conn.execute("DELETE FROM courses WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(DatabaseError::NotFound {
                entity: "course".into(),
                id: id.to_string(),
            });
        }
        debug!(id, "deleted course");
        Ok(())
    }

    // -- enrollments --------------------------------------------------------

    /// Enroll a student in a course. Returns the enrollment ID.
    ///
    /// `student_id` must name a student; any other person is `NotFound`.
    pub fn insert_enrollment(
        &self,
        course_id: i64,
        student_id: i64,
        grade: Option<Grade>,
    ) -> Result<i64, DatabaseError> {
        self.transaction(|conn| {
            let is_student: bool = conn.query_row(
                "SELECT EXISTS (SELECT 1 FROM people WHERE id = ?1 AND discriminator = 'Student')",
                params![student_id],
                |row| row.get(0),
            )?;
            if !is_student {
                return Err(DatabaseError::NotFound {
                    entity: "student".into(),
                    id: student_id.to_string(),
                });
            }

            conn.execute(
                "INSERT INTO enrollments (course_id, student_id, grade) VALUES (?1, ?2, ?3)",
                params![course_id, student_id, grade.map(|g| g.to_string())],
            )?;
            let id = conn.last_insert_rowid();
            debug!(id, course_id, student_id, "inserted enrollment");
            Ok(id)
        })
    }

    /// Enrollments in a course with student names, ordered by last name.
    pub fn list_course_enrollments(&self, course_id: i64) -> Result<Vec<CourseEnrollment>, DatabaseError> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT e.id, e.course_id, e.student_id, e.grade, p.last_name, p.first_mid_name
             FROM enrollments e JOIN people p ON p.id = e.student_id
             WHERE e.course_id = ?1
             ORDER BY p.last_name, p.first_mid_name",
        )?;
        let rows = stmt
            .query_map(params![course_id], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, Option<String>>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, String>(5)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, course_id, student_id, grade, last, first)| {
                Ok(CourseEnrollment {
                    enrollment: Enrollment {
                        id,
                        course_id,
                        student_id,
                        grade: parse_grade(grade)?,
                    },
                    student_name: PersonName::new(last, first),
                })
            })
            .collect()
    }

    /// Enrollments of one student, ordered by course.
    pub fn list_student_enrollments(&self, student_id: i64) -> Result<Vec<Enrollment>, DatabaseError> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, course_id, student_id, grade FROM enrollments
             WHERE student_id = ?1 ORDER BY course_id",
        )?;
        let rows = stmt
            .query_map(params![student_id], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, Option<String>>(3)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, course_id, student_id, grade)| {
                Ok(Enrollment {
                    id,
                    course_id,
                    student_id,
                    grade: parse_grade(grade)?,
                })
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// SchoolStore
// ---------------------------------------------------------------------------

impl SchoolStore for Database {
    fn find_department_by_id(&self, id: i64) -> Result<Option<Department>, DatabaseError> {
        self.get_department(id)
    }

    fn find_instructor_with_courses(&self, id: i64) -> Result<Option<Instructor>, DatabaseError> {
        self.get_instructor(id)
    }

    fn find_course_by_id(&self, id: i64) -> Result<Option<Course>, DatabaseError> {
        self.get_course(id)
    }

    fn list_courses(&self) -> Result<Vec<Course>, DatabaseError> {
        self.list_all_courses()
    }

    fn known_course_ids(&self) -> Result<BTreeSet<i64>, DatabaseError> {
        let conn = self.conn();
        let mut stmt = conn.prepare("SELECT id FROM courses")?;
        let ids = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<BTreeSet<i64>, _>>()?;
        Ok(ids)
    }

    fn insert_department(&self, values: &DepartmentValues) -> Result<Department, DatabaseError> {
        Database::insert_department(self, values)
    }

    fn conditional_update_department(
        &self,
        id: i64,
        values: &DepartmentValues,
        expected: &VersionToken,
    ) -> Result<UpdateResult, DatabaseError> {
        self.update_department_if_version(id, values, expected)
    }

    fn conditional_delete_department(
        &self,
        id: i64,
        expected: &VersionToken,
    ) -> Result<DeleteResult, DatabaseError> {
        self.delete_department_if_version(id, expected)
    }

    fn departments_administered_by(&self, instructor_id: i64) -> Result<Vec<i64>, DatabaseError> {
        self.list_departments_administered_by(instructor_id)
    }

    fn insert_instructor(
        &self,
        fields: &InstructorFields,
        course_ids: &BTreeSet<i64>,
    ) -> Result<i64, DatabaseError> {
        self.create_instructor(fields, course_ids)
    }

    fn save_instructor(&self, changes: &InstructorChanges) -> Result<(), DatabaseError> {
        self.update_instructor(changes)
    }

    fn delete_instructor(
        &self,
        instructor_id: i64,
        clear_department: Option<i64>,
    ) -> Result<(), DatabaseError> {
        self.remove_instructor(instructor_id, clear_department)
    }
}
