//! Attendance ledger and derived statistics.
//!
//! The ledger holds at most one [`AttendanceRecord`] per `(subject, date)`.
//! [`Ledger::mark`] enforces this by replacing, never by rejecting.
//!
//! Percentages are whole numbers in `0..=100`, rounded half-up. A subject with
//! no records has 0%.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::health::is_at_risk;
use crate::routine::{Routine, SubjectSchedule};

/// One day's presence or absence for one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub subject_name: String,
    /// Serialized as `YYYY-MM-DD`
    pub date: NaiveDate,
    pub attended: bool,
}

/// Collection of attendance records. Order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger(Vec<AttendanceRecord>);

/// `round(100 * part / whole)` with halves rounded up; 0 when `whole` is 0.
fn rounded_percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    ((200 * part + whole) / (2 * whole)) as u8
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AttendanceRecord> {
        self.0.iter()
    }

    /// Total number of records across all subjects.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Record attendance, replacing any record for the same subject and date.
    pub fn mark(&mut self, subject_name: &str, date: NaiveDate, attended: bool) {
        self.0
            .retain(|r| !(r.subject_name == subject_name && r.date == date));
        self.0.push(AttendanceRecord {
            subject_name: subject_name.to_string(),
            date,
            attended,
        });
    }

    pub fn record_for(&self, subject_name: &str, date: NaiveDate) -> Option<&AttendanceRecord> {
        self.0
            .iter()
            .find(|r| r.subject_name == subject_name && r.date == date)
    }

    pub fn is_marked_on(&self, subject_name: &str, date: NaiveDate) -> bool {
        self.record_for(subject_name, date).is_some()
    }

    pub fn records_for<'a>(
        &'a self,
        subject_name: &'a str,
    ) -> impl Iterator<Item = &'a AttendanceRecord> + 'a {
        self.0.iter().filter(move |r| r.subject_name == subject_name)
    }

    pub fn total_classes(&self, subject_name: &str) -> usize {
        self.records_for(subject_name).count()
    }

    pub fn present_classes(&self, subject_name: &str) -> usize {
        self.records_for(subject_name).filter(|r| r.attended).count()
    }

    pub fn absent_classes(&self, subject_name: &str) -> usize {
        self.records_for(subject_name).filter(|r| !r.attended).count()
    }

    pub fn percentage(&self, subject_name: &str) -> u8 {
        rounded_percent(
            self.present_classes(subject_name),
            self.total_classes(subject_name),
        )
    }

    /// Unweighted mean of the per-subject percentages of every routine entry.
    ///
    /// A subject with two recorded classes weighs the same as one with fifty.
    /// Entries sharing a name are each counted.
    pub fn overall_percentage(&self, routine: &Routine) -> u8 {
        if routine.is_empty() {
            return 0;
        }
        let sum: usize = routine
            .iter()
            .map(|s| self.percentage(&s.subject_name) as usize)
            .sum();
        let n = routine.len();
        ((2 * sum + n) / (2 * n)) as u8
    }

    /// Routine entries whose percentage is below the at-risk threshold.
    pub fn at_risk_subjects<'r>(&self, routine: &'r Routine) -> Vec<&'r SubjectSchedule> {
        routine
            .iter()
            .filter(|s| is_at_risk(self.percentage(&s.subject_name)))
            .collect()
    }

    /// Records marked present, across all subjects.
    pub fn present_count(&self) -> usize {
        self.0.iter().filter(|r| r.attended).count()
    }

    /// Records marked absent, across all subjects.
    pub fn absent_count(&self) -> usize {
        self.0.iter().filter(|r| !r.attended).count()
    }
}

impl From<Vec<AttendanceRecord>> for Ledger {
    fn from(records: Vec<AttendanceRecord>) -> Self {
        Self(records)
    }
}
