//! Schema migrations for the school database.
//!
//! Each migration is a batch of SQL with a version number. The highest
//! applied version is kept in SQLite's `user_version` pragma.

use rusqlite::Connection;
use tracing::{debug, info};

use crate::errors::DatabaseError;

/// `(version, description, sql)`, strictly increasing from 1.
static MIGRATIONS: &[(u32, &str, &str)] = &[
    (
        1,
        "initial schema",
        r#"
        CREATE TABLE IF NOT EXISTS people (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            last_name       TEXT    NOT NULL,
            first_mid_name  TEXT    NOT NULL,
            hire_date       TEXT,
            enrollment_date TEXT,
            discriminator   TEXT    NOT NULL DEFAULT 'Instructor'
                            CHECK (discriminator IN ('Student', 'Instructor'))
        );

        CREATE INDEX IF NOT EXISTS idx_people_discriminator ON people (discriminator);
        CREATE INDEX IF NOT EXISTS idx_people_last_name ON people (last_name);

        CREATE TABLE IF NOT EXISTS departments (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            name            TEXT    NOT NULL,
            budget_cents    INTEGER NOT NULL,
            start_date      TEXT    NOT NULL,
            instructor_id   INTEGER REFERENCES people (id),
            row_version     BLOB    NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_departments_instructor ON departments (instructor_id);

        CREATE TABLE IF NOT EXISTS courses (
            id              INTEGER PRIMARY KEY,
            title           TEXT    NOT NULL,
            credits         INTEGER NOT NULL CHECK (credits BETWEEN 0 AND 5),
            department_id   INTEGER NOT NULL REFERENCES departments (id) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS course_instructor (
            course_id       INTEGER NOT NULL REFERENCES courses (id) ON DELETE CASCADE,
            instructor_id   INTEGER NOT NULL REFERENCES people (id) ON DELETE CASCADE,
            PRIMARY KEY (course_id, instructor_id)
        );

        CREATE INDEX IF NOT EXISTS idx_course_instructor_instructor
            ON course_instructor (instructor_id);

        CREATE TABLE IF NOT EXISTS office_assignments (
            instructor_id   INTEGER PRIMARY KEY REFERENCES people (id) ON DELETE CASCADE,
            location        TEXT    NOT NULL
        );

        CREATE TABLE IF NOT EXISTS enrollments (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            course_id       INTEGER NOT NULL REFERENCES courses (id) ON DELETE CASCADE,
            student_id      INTEGER NOT NULL REFERENCES people (id) ON DELETE CASCADE,
            grade           TEXT    CHECK (grade IS NULL OR grade IN ('A', 'B', 'C', 'D', 'F'))
        );

        CREATE INDEX IF NOT EXISTS idx_enrollments_course ON enrollments (course_id);
        CREATE INDEX IF NOT EXISTS idx_enrollments_student ON enrollments (student_id);
        "#,
    ),
    (
        2,
        "add student email address",
        r#"
        ALTER TABLE people ADD COLUMN email_address TEXT;
        "#,
    ),
];

/// Apply every migration newer than the stored version.
pub fn run_migrations(conn: &Connection) -> Result<(), DatabaseError> {
    let current_version = get_schema_version(conn)?;
    let pending = MIGRATIONS.iter().filter(|(version, _, _)| *version > current_version);

    for &(version, description, sql) in pending {
        info!(version, description, "migrating school schema");
        conn.execute_batch(sql)
            .map_err(|e| DatabaseError::MigrationFailed {
                version,
                detail: e.to_string(),
            })?;
        set_schema_version(conn, version)?;
    }

    debug!(from = current_version, to = get_schema_version(conn)?, "schema current");
    Ok(())
}

fn get_schema_version(conn: &Connection) -> Result<u32, DatabaseError> {
    let version: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    Ok(version)
}

fn set_schema_version(conn: &Connection, version: u32) -> Result<(), DatabaseError> {
    conn.pragma_update(None, "user_version", version)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn migrated() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    #[test]
    fn test_rerun_is_a_no_op() {
        let conn = migrated();
        run_migrations(&conn).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), 2);
    }

    #[test]
    fn test_every_table_exists() {
        let conn = migrated();
        for table in [
            "people",
            "departments",
            "courses",
            "course_instructor",
            "office_assignments",
            "enrollments",
        ] {
            let found: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                    [table],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(found, 1, "missing table {table}");
        }
    }

    #[test]
    fn test_email_column_added_by_second_migration() {
        let conn = migrated();
        conn.execute(
            "INSERT INTO people (last_name, first_mid_name, enrollment_date, email_address, discriminator)
             VALUES ('Li', 'Yan', '2002-09-01', 'yan.li@contoso.edu', 'Student')",
            [],
        )
        .unwrap();
    }

    #[test]
    fn test_discriminator_is_constrained() {
        let conn = migrated();
        let result = conn.execute(
            "INSERT INTO people (last_name, first_mid_name, discriminator) VALUES ('a', 'b', 'Staff')",
            [],
        );
        assert!(result.is_err());
    }
}
