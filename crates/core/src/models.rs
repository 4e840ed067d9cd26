//! Domain model types for the university records core.
//!
//! These types bridge the pure decision components, the database layer and
//! whatever presentation layer renders them.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::DepartmentValidationError;

// ---------------------------------------------------------------------------
// Version token
// ---------------------------------------------------------------------------

/// Opaque row-version value that changes on every successful department
/// write.
///
/// Tokens are only ever compared for equality; their bytes carry no ordering
/// or meaning.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct VersionToken(Vec<u8>);

impl VersionToken {
    /// Wrap raw bytes read from storage or a client form.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Generate a fresh token for a new row version.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().as_bytes().to_vec())
    }

    /// Decode a token from its hex form (as stored in a hidden form field).
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        hex::decode(s).map(Self)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl fmt::Display for VersionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<VersionToken> for String {
    fn from(token: VersionToken) -> Self {
        token.to_hex()
    }
}

impl TryFrom<String> for VersionToken {
    type Error = hex::FromHexError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

// ---------------------------------------------------------------------------
// Money
// ---------------------------------------------------------------------------

/// A currency amount held in minor units (cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Whole dollars. Saturates at the `i64` cent range; use
    /// [`checked_from_dollars`](Self::checked_from_dollars) to detect that.
    pub fn from_dollars(dollars: i64) -> Self {
        Self(dollars.saturating_mul(100))
    }

    /// Whole dollars, or `None` if the amount does not fit in `i64` cents.
    pub fn checked_from_dollars(dollars: i64) -> Option<Self> {
        dollars.checked_mul(100).map(Self)
    }

    pub fn cents(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Money {
    /// Formats as US currency, e.g. `$350,000.00` or `-$12.50`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let whole = (abs / 100).to_string();
        let frac = abs % 100;

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        write!(f, "{sign}${grouped}.{frac:02}")
    }
}

// ---------------------------------------------------------------------------
// Department
// ---------------------------------------------------------------------------

/// Minimum and maximum department name length, in characters.
pub const DEPARTMENT_NAME_MIN: usize = 3;
pub const DEPARTMENT_NAME_MAX: usize = 50;

/// A department row together with its current version token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: i64,
    pub name: String,
    pub budget: Money,
    pub start_date: NaiveDate,
    /// Instructor ID of the administrator, if any.
    pub administrator_id: Option<i64>,
    pub version: VersionToken,
}

impl Department {
    /// The client-editable portion of this record.
    pub fn values(&self) -> DepartmentValues {
        DepartmentValues {
            name: self.name.clone(),
            budget: self.budget,
            start_date: self.start_date,
            administrator_id: self.administrator_id,
        }
    }
}

/// The fields a client may edit on a department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentValues {
    pub name: String,
    pub budget: Money,
    pub start_date: NaiveDate,
    pub administrator_id: Option<i64>,
}

impl DepartmentValues {
    /// Check the rules that need no lookup. Whether `administrator_id`
    /// names an instructor is checked against the store by the service.
    pub fn validate(&self) -> Result<(), DepartmentValidationError> {
        let len = self.name.chars().count();
        if !(DEPARTMENT_NAME_MIN..=DEPARTMENT_NAME_MAX).contains(&len) {
            return Err(DepartmentValidationError::NameLength {
                len,
                min: DEPARTMENT_NAME_MIN,
                max: DEPARTMENT_NAME_MAX,
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// People
// ---------------------------------------------------------------------------

/// Name fields shared by every person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName {
    pub last_name: String,
    pub first_mid_name: String,
}

impl PersonName {
    pub fn new(last_name: impl Into<String>, first_mid_name: impl Into<String>) -> Self {
        Self {
            last_name: last_name.into(),
            first_mid_name: first_mid_name.into(),
        }
    }

    /// `"Last, First"`, the form used in pick lists and conflict messages.
    pub fn full_name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_mid_name)
    }
}

/// A student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub name: PersonName,
    pub email_address: Option<String>,
    pub enrollment_date: NaiveDate,
}

/// An instructor with their course assignments and office.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instructor {
    pub id: i64,
    pub name: PersonName,
    pub hire_date: NaiveDate,
    /// IDs of the courses this instructor teaches.
    pub course_ids: BTreeSet<i64>,
    pub office: Option<OfficeAssignment>,
}

/// An instructor's office; at most one per instructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficeAssignment {
    pub instructor_id: i64,
    pub location: String,
}

/// Any person on record. Stored in a single table keyed by a discriminator
/// column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Person {
    Student(Student),
    Instructor(Instructor),
}

impl Person {
    pub fn id(&self) -> i64 {
        match self {
            Self::Student(s) => s.id,
            Self::Instructor(i) => i.id,
        }
    }

    pub fn name(&self) -> &PersonName {
        match self {
            Self::Student(s) => &s.name,
            Self::Instructor(i) => &i.name,
        }
    }

    /// Value of the `discriminator` column for this variant.
    pub fn discriminator(&self) -> PersonKind {
        match self {
            Self::Student(_) => PersonKind::Student,
            Self::Instructor(_) => PersonKind::Instructor,
        }
    }
}

/// Discriminator for the `people` table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PersonKind {
    Student,
    Instructor,
}

impl PersonKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "Student",
            Self::Instructor => "Instructor",
        }
    }

    /// Parse a discriminator column value.
    pub fn from_str_val(s: &str) -> Option<Self> {
        match s {
            "Student" => Some(Self::Student),
            "Instructor" => Some(Self::Instructor),
            _ => None,
        }
    }
}

impl fmt::Display for PersonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Editable instructor fields, used for both create and edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructorFields {
    pub name: PersonName,
    pub hire_date: NaiveDate,
    /// Office location as typed by the user; blank means "no office".
    pub office_location: Option<String>,
}

impl InstructorFields {
    /// The office location with surrounding whitespace removed, or `None`
    /// when blank.
    pub fn normalized_office(&self) -> Option<String> {
        self.office_location
            .as_deref()
            .map(str::trim)
            .filter(|loc| !loc.is_empty())
            .map(str::to_string)
    }
}

// ---------------------------------------------------------------------------
// Courses & enrollments
// ---------------------------------------------------------------------------

/// A course. Course IDs are assigned by the registrar, not generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub credits: i32,
    pub department_id: i64,
}

/// Letter grade for an enrollment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_str_val(s: &str) -> Option<Self> {
        match s {
            "A" => Some(Self::A),
            "B" => Some(Self::B),
            "C" => Some(Self::C),
            "D" => Some(Self::D),
            "F" => Some(Self::F),
            _ => None,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        };
        f.write_str(s)
    }
}

/// A student's enrollment in a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: i64,
    pub course_id: i64,
    pub student_id: i64,
    pub grade: Option<Grade>,
}
