//! Conflict reports produced for stale department edits.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{DepartmentValues, Money, VersionToken};

/// Notice shown alongside every stale-edit report.
pub const STALE_EDIT_NOTICE: &str = "The record you attempted to edit was modified by another \
user after you got the original value. The edit operation was cancelled and the current \
values in the database have been displayed. If you still want to edit this record, click \
the Save button again. Otherwise click the Back to List hyperlink.";

/// Notice shown when the department no longer exists.
pub const DELETED_NOTICE: &str =
    "Unable to save changes. The department was deleted by another user.";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The client-editable department fields, in comparison order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum DepartmentField {
    Name,
    Budget,
    StartDate,
    Administrator,
}

impl DepartmentField {
    /// Every editable field, in the order conflicts are reported.
    pub const ALL: [DepartmentField; 4] = [
        Self::Name,
        Self::Budget,
        Self::StartDate,
        Self::Administrator,
    ];

    /// Read this field's value out of a set of department values.
    pub fn value_of(self, values: &DepartmentValues) -> FieldValue {
        match self {
            Self::Name => FieldValue::Text(values.name.clone()),
            Self::Budget => FieldValue::Money(values.budget),
            Self::StartDate => FieldValue::Date(values.start_date),
            Self::Administrator => FieldValue::Instructor(values.administrator_id),
        }
    }
}

impl std::fmt::Display for DepartmentField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::Budget => write!(f, "budget"),
            Self::StartDate => write!(f, "start_date"),
            Self::Administrator => write!(f, "administrator"),
        }
    }
}

/// A single department field value, typed so it can be formatted for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Text(String),
    Money(Money),
    Date(NaiveDate),
    /// Administrator instructor ID; `None` when the department has none.
    Instructor(Option<i64>),
}

impl FieldValue {
    /// Human-readable form. Instructor IDs are turned into names through
    /// `instructor_name`. An ID with no name renders as `"Instructor <id>"`
    /// and a missing administrator as `"None"`.
    pub fn display_with<F>(&self, instructor_name: F) -> String
    where
        F: Fn(i64) -> Option<String>,
    {
        match self {
            Self::Text(s) => s.clone(),
            Self::Money(m) => m.to_string(),
            Self::Date(d) => d.format("%Y-%m-%d").to_string(),
            Self::Instructor(None) => "None".to_string(),
            Self::Instructor(Some(id)) => {
                instructor_name(*id).unwrap_or_else(|| format!("Instructor {id}"))
            }
        }
    }
}

/// One field whose submitted value differs from the stored value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldConflict {
    pub field: DepartmentField,
    /// What the client submitted.
    pub client_value: FieldValue,
    /// What is stored now.
    pub current_value: FieldValue,
}

impl FieldConflict {
    /// `"Current value: …"` message attached to the field on re-display.
    pub fn message<F>(&self, instructor_name: F) -> String
    where
        F: Fn(i64) -> Option<String>,
    {
        format!(
            "Current value: {}",
            self.current_value.display_with(instructor_name)
        )
    }
}

/// Field-by-field description of a stale edit, plus the token that re-arms
/// the client for its next attempt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConflictReport {
    /// Fields whose values differ. May be empty: a token mismatch is a
    /// conflict even when every value happens to match.
    pub fields: Vec<FieldConflict>,
    /// The stored values, for re-rendering the edit form.
    pub current_values: DepartmentValues,
    /// The stored row's current version token.
    pub current_version: VersionToken,
}

impl ConflictReport {
    /// Compare submitted values against the stored ones.
    pub fn build(
        client_values: &DepartmentValues,
        current_values: DepartmentValues,
        current_version: VersionToken,
    ) -> Self {
        let fields = DepartmentField::ALL
            .iter()
            .filter_map(|&field| {
                let client_value = field.value_of(client_values);
                let current_value = field.value_of(&current_values);
                (client_value != current_value).then_some(FieldConflict {
                    field,
                    client_value,
                    current_value,
                })
            })
            .collect();

        Self {
            fields,
            current_values,
            current_version,
        }
    }

    /// Look up the conflict entry for one field.
    pub fn field(&self, field: DepartmentField) -> Option<&FieldConflict> {
        self.fields.iter().find(|c| c.field == field)
    }

    pub fn notice(&self) -> &'static str {
        STALE_EDIT_NOTICE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(name: &str, dollars: i64, admin: Option<i64>) -> DepartmentValues {
        DepartmentValues {
            name: name.into(),
            budget: Money::from_dollars(dollars),
            start_date: NaiveDate::from_ymd_opt(2007, 9, 1).unwrap(),
            administrator_id: admin,
        }
    }

    #[test]
    fn test_build_lists_only_differing_fields_in_order() {
        let client = values("Physik", 1000, Some(2));
        let current = values("Physics", 1000, Some(3));
        let report = ConflictReport::build(&client, current, VersionToken::from_bytes(vec![2]));

        let fields: Vec<_> = report.fields.iter().map(|c| c.field).collect();
        assert_eq!(fields, vec![DepartmentField::Name, DepartmentField::Administrator]);
        assert!(report.field(DepartmentField::Budget).is_none());
    }

    #[test]
    fn test_messages() {
        let client = values("Physik", 1000, Some(2));
        let mut current = values("Physics", 250_000, None);
        current.start_date = NaiveDate::from_ymd_opt(2010, 1, 15).unwrap();
        let report = ConflictReport::build(&client, current, VersionToken::from_bytes(vec![9]));
        let no_names = |_: i64| None;

        let msg = |field| report.field(field).unwrap().message(no_names);
        assert_eq!(msg(DepartmentField::Name), "Current value: Physics");
        assert_eq!(msg(DepartmentField::Budget), "Current value: $250,000.00");
        assert_eq!(msg(DepartmentField::StartDate), "Current value: 2010-01-15");
        assert_eq!(msg(DepartmentField::Administrator), "Current value: None");
    }

    #[test]
    fn test_unnamed_administrator_renders_its_id() {
        let client = values("Physics", 1000, None);
        let current = values("Physics", 1000, Some(7));
        let report = ConflictReport::build(&client, current, VersionToken::from_bytes(vec![1]));

        let conflict = report.field(DepartmentField::Administrator).unwrap();
        assert_eq!(conflict.message(|_| None), "Current value: Instructor 7");
    }

    #[test]
    fn test_administrator_message_uses_name_lookup() {
        let client = values("Physics", 1000, None);
        let current = values("Physics", 1000, Some(4));
        let report = ConflictReport::build(&client, current, VersionToken::from_bytes(vec![1]));

        let conflict = report.field(DepartmentField::Administrator).unwrap();
        let msg = conflict.message(|id| (id == 4).then(|| "Kapoor, Candace".to_string()));
        assert_eq!(msg, "Current value: Kapoor, Candace");
    }

    #[test]
    fn test_report_serializes_token_as_hex() {
        let v = values("Physics", 1000, None);
        let report = ConflictReport::build(&v, v.clone(), VersionToken::from_bytes(vec![0xab, 0x01]));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["current_version"], "ab01");
        assert_eq!(json["fields"].as_array().unwrap().len(), 0);
    }
}
