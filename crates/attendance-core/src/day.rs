//! Day resolution: weekday vocabulary, clock seam, and "today's classes".
//!
//! The clock is injected so that every time-dependent query can be pinned
//! in tests. The calendar date and the weekday are always read from the same
//! local instant.

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::routine::{Routine, SubjectSchedule};

/// Day of the week, serialized as its full English name.
///
/// Declaration order (Monday first) is the order the routine editor lists
/// days in, and is the order of a subject's `days` set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All days in editor order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    /// Three-letter label used on day toggles.
    pub fn short_name(self) -> &'static str {
        &self.name()[..3]
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weekday {
    type Err = ValidationError;

    /// Accepts full names and three-letter abbreviations, any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Weekday::ALL
            .into_iter()
            .find(|day| {
                let full = day.name().to_ascii_lowercase();
                needle == full || needle == full[..3]
            })
            .ok_or_else(|| ValidationError::UnknownWeekday(s.to_string()))
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

/// Source of the current local wall-clock time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;

    /// Calendar date used for marking attendance.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Clock backed by the system time in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    /// Midnight of `date`.
    pub fn on(date: NaiveDate) -> Self {
        Self(date.and_time(chrono::NaiveTime::MIN))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

/// Weekday of a calendar date.
pub fn weekday_of(date: NaiveDate) -> Weekday {
    date.weekday().into()
}

/// Weekday of the clock's current moment.
pub fn resolve_today(clock: &impl Clock) -> Weekday {
    weekday_of(clock.today())
}

/// Routine entries held on `day`, in routine order.
pub fn subjects_scheduled_on(routine: &Routine, day: Weekday) -> Vec<&SubjectSchedule> {
    routine.iter().filter(|s| s.days.contains(&day)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn resolves_weekday_from_fixed_clock() {
        // 2026-10-19 is a Monday
        assert_eq!(resolve_today(&FixedClock::on(date(2026, 10, 19))), Weekday::Monday);
        assert_eq!(resolve_today(&FixedClock::on(date(2026, 10, 25))), Weekday::Sunday);
    }

    #[test]
    fn parses_full_and_short_names() {
        assert_eq!("monday".parse::<Weekday>().unwrap(), Weekday::Monday);
        assert_eq!("Thu".parse::<Weekday>().unwrap(), Weekday::Thursday);
        assert_eq!(" SUNDAY ".parse::<Weekday>().unwrap(), Weekday::Sunday);
        assert_eq!(
            "Funday".parse::<Weekday>(),
            Err(ValidationError::UnknownWeekday("Funday".into()))
        );
    }

    #[test]
    fn serializes_as_full_name() {
        assert_eq!(serde_json::to_string(&Weekday::Friday).unwrap(), "\"Friday\"");
        assert_eq!(Weekday::Wednesday.short_name(), "Wed");
    }

    #[test]
    fn filters_routine_by_day() {
        let routine = Routine::from(vec![
            SubjectSchedule::new("Math", BTreeSet::from([Weekday::Monday, Weekday::Wednesday])),
            SubjectSchedule::new("Physics", BTreeSet::from([Weekday::Tuesday])),
            SubjectSchedule::new("Chemistry", BTreeSet::from([Weekday::Monday])),
        ]);

        let monday: Vec<_> = subjects_scheduled_on(&routine, Weekday::Monday)
            .into_iter()
            .map(|s| s.subject_name.as_str())
            .collect();
        assert_eq!(monday, vec!["Math", "Chemistry"]);
        assert!(subjects_scheduled_on(&routine, Weekday::Saturday).is_empty());
    }
}
