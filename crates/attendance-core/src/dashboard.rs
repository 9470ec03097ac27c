//! Attendance overview report.
//!
//! Collects everything the overview screen shows into one serializable value:
//! - Overall percentage and its health band
//! - Today's classes and whether each is marked
//! - Per-subject percentage, present/total counts and health band
//! - Subjects below the minimum requirement
//! - Ledger-wide quick stats

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::day::{subjects_scheduled_on, weekday_of, Weekday};
use crate::health::{classify, is_at_risk, HealthStatus};
use crate::ledger::Ledger;
use crate::routine::{Routine, SubjectSchedule};

/// One routine entry's standing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectReport {
    pub subject_name: String,
    pub days: Vec<Weekday>,
    pub percentage: u8,
    pub present: usize,
    pub total: usize,
    pub health: HealthStatus,
}

impl SubjectReport {
    fn new(subject: &SubjectSchedule, ledger: &Ledger) -> Self {
        let percentage = ledger.percentage(&subject.subject_name);
        Self {
            subject_name: subject.subject_name.clone(),
            days: subject.days.iter().copied().collect(),
            percentage,
            present: ledger.present_classes(&subject.subject_name),
            total: ledger.total_classes(&subject.subject_name),
            health: classify(percentage),
        }
    }
}

/// A class scheduled on the report date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodayClass {
    pub subject_name: String,
    /// `None` until marked; otherwise whether it was attended.
    pub attended: Option<bool>,
}

/// Counts over the whole ledger, regardless of routine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickStats {
    pub total_records: usize,
    pub present: usize,
    pub absent: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    pub date: NaiveDate,
    pub weekday: Weekday,
    pub overall_percentage: u8,
    pub overall_health: HealthStatus,
    pub total_subjects: usize,
    pub today: Vec<TodayClass>,
    pub subjects: Vec<SubjectReport>,
    pub at_risk: Vec<SubjectReport>,
    pub quick_stats: QuickStats,
}

impl Dashboard {
    /// Build the report for `date`.
    pub fn build(routine: &Routine, ledger: &Ledger, date: NaiveDate) -> Self {
        let weekday = weekday_of(date);
        let overall_percentage = ledger.overall_percentage(routine);

        let today = subjects_scheduled_on(routine, weekday)
            .into_iter()
            .map(|s| TodayClass {
                subject_name: s.subject_name.clone(),
                attended: ledger.record_for(&s.subject_name, date).map(|r| r.attended),
            })
            .collect();

        let subjects: Vec<SubjectReport> = routine
            .iter()
            .map(|s| SubjectReport::new(s, ledger))
            .collect();
        let at_risk = subjects
            .iter()
            .filter(|r| is_at_risk(r.percentage))
            .cloned()
            .collect();

        Self {
            date,
            weekday,
            overall_percentage,
            overall_health: classify(overall_percentage),
            total_subjects: routine.len(),
            today,
            subjects,
            at_risk,
            quick_stats: QuickStats {
                total_records: ledger.len(),
                present: ledger.present_count(),
                absent: ledger.absent_count(),
            },
        }
    }
}
