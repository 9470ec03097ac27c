//! Weekly routine: which subjects meet on which days.
//!
//! The committed [`Routine`] is only ever replaced wholesale, through a
//! [`RoutineEditor`] draft.

mod editor;

pub use editor::RoutineEditor;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::day::Weekday;

/// One subject and the days it meets.
///
/// Field names are camelCase on the wire to stay readable by data written
/// by the web portal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectSchedule {
    pub subject_name: String,
    pub days: BTreeSet<Weekday>,
}

impl SubjectSchedule {
    pub fn new(subject_name: impl Into<String>, days: BTreeSet<Weekday>) -> Self {
        Self {
            subject_name: subject_name.into(),
            days,
        }
    }

    /// Comma-separated day names in editor order.
    pub fn days_label(&self) -> String {
        self.days
            .iter()
            .map(|d| d.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// The committed weekly schedule, in the order subjects were added.
///
/// Entries sharing a subject name are independent; nothing here dedups them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Routine(Vec<SubjectSchedule>);

impl Routine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SubjectSchedule> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[SubjectSchedule] {
        &self.0
    }
}

impl From<Vec<SubjectSchedule>> for Routine {
    fn from(entries: Vec<SubjectSchedule>) -> Self {
        Self(entries)
    }
}

impl<'a> IntoIterator for &'a Routine {
    type Item = &'a SubjectSchedule;
    type IntoIter = std::slice::Iter<'a, SubjectSchedule>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
