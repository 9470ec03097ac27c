//! # Attendance Core Library
//!
//! This library provides the attendance-tracking and analytics engine behind
//! the CampusOne student portal. All operations are available through the
//! standalone `attendance` CLI; any other front end is a thin layer over the
//! same [`Tracker`].
//!
//! ## Architecture
//!
//! - **Day Resolver**: weekday of the current moment and the classes held on it
//! - **Health Classifier**: Excellent / Good / Critical bands for percentages
//! - **Routine Editor**: staged draft of the weekly schedule, committed on save
//! - **Ledger**: one record per subject and date, plus derived percentages
//! - **Storage**: JSON collections in a SQLite key-value table, TOML config
//!
//! ## Key Components
//!
//! - [`Tracker`]: per-session state container
//! - [`RoutineEditor`]: draft builder for the routine
//! - [`Ledger`]: attendance records and statistics
//! - [`Dashboard`]: overview report
//! - [`KeyValueStore`]: persistence seam

pub mod dashboard;
pub mod day;
pub mod error;
pub mod health;
pub mod ledger;
pub mod logging;
pub mod routine;
pub mod storage;
pub mod tracker;

pub use dashboard::{Dashboard, QuickStats, SubjectReport, TodayClass};
pub use day::{resolve_today, subjects_scheduled_on, Clock, FixedClock, SystemClock, Weekday};
pub use error::{ConfigError, CoreError, LoadError, StorageError, ValidationError};
pub use health::{classify, HealthStatus, AT_RISK_THRESHOLD, EXCELLENT_THRESHOLD};
pub use ledger::{AttendanceRecord, Ledger};
pub use routine::{Routine, RoutineEditor, SubjectSchedule};
pub use storage::{Config, KeyValueStore, MemoryStore, SqliteStore};
pub use tracker::Tracker;
