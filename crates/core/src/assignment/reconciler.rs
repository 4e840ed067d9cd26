//! Many-to-many reconciliation of an instructor's courses.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::errors::AssignmentError;

/// Course associations to add and remove, relative to the current set.
///
/// The two sets are always disjoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssignmentDelta {
    pub to_add: BTreeSet<i64>,
    pub to_remove: BTreeSet<i64>,
}

impl AssignmentDelta {
    /// True when the submission changes nothing.
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }

    /// The course set that results from applying this delta to `current`.
    pub fn apply(&self, current: &BTreeSet<i64>) -> BTreeSet<i64> {
        current
            .difference(&self.to_remove)
            .chain(self.to_add.iter())
            .copied()
            .collect()
    }
}

/// Parse raw form values into a deduplicated set of course IDs.
///
/// Surrounding whitespace is ignored. The first entry that is not an integer
/// fails the whole selection.
pub fn parse_selection<S: AsRef<str>>(raw: &[S]) -> Result<BTreeSet<i64>, AssignmentError> {
    raw.iter()
        .map(|entry| {
            let entry = entry.as_ref();
            entry
                .trim()
                .parse::<i64>()
                .map_err(|_| AssignmentError::InvalidCourseIdentifier {
                    value: entry.to_string(),
                })
        })
        .collect()
}

/// Stateless reconciler for instructor course assignments.
pub struct CourseAssignmentReconciler;

impl CourseAssignmentReconciler {
    /// Compute the delta that takes `current` to the submitted selection.
    ///
    /// An empty selection means every course was unchecked. Selected IDs that
    /// are not in `known` are ignored; the reconciler never introduces a
    /// course the system does not know about.
    pub fn reconcile<S: AsRef<str>>(
        current: &BTreeSet<i64>,
        selected_raw: &[S],
        known: &BTreeSet<i64>,
    ) -> Result<AssignmentDelta, AssignmentError> {
        if selected_raw.is_empty() {
            return Ok(AssignmentDelta {
                to_add: BTreeSet::new(),
                to_remove: current.clone(),
            });
        }

        let selected = parse_selection(selected_raw)?;
        Ok(Self::reconcile_ids(current, &selected, known))
    }

    /// Set arithmetic over already-parsed IDs.
    pub fn reconcile_ids(
        current: &BTreeSet<i64>,
        selected: &BTreeSet<i64>,
        known: &BTreeSet<i64>,
    ) -> AssignmentDelta {
        let wanted: BTreeSet<i64> = selected.intersection(known).copied().collect();

        AssignmentDelta {
            to_add: wanted.difference(current).copied().collect(),
            to_remove: current.difference(selected).copied().collect(),
        }
    }
}
