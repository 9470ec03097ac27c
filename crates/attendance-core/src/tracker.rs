//! Per-session state container.
//!
//! A [`Tracker`] owns the committed routine, the ledger, the open draft (if
//! any), the store and the clock. Callers construct one per session and
//! route every operation through it.
//!
//! Writes after `save_routine` and `mark` are fire-and-forget: a failed write
//! is logged and the in-memory change stands.

use chrono::NaiveDate;
use std::path::Path;

use crate::dashboard::Dashboard;
use crate::day::{self, Clock, SystemClock, Weekday};
use crate::error::{CoreError, LoadError, ValidationError};
use crate::ledger::Ledger;
use crate::routine::{Routine, RoutineEditor, SubjectSchedule};
use crate::storage::{
    load_collection, save_collection, try_load_collection, Collection, Config, KeyValueStore,
    SqliteStore, StorageConfig,
};

pub struct Tracker {
    routine: Routine,
    ledger: Ledger,
    editor: Option<RoutineEditor>,
    store: Box<dyn KeyValueStore>,
    clock: Box<dyn Clock>,
    keys: StorageConfig,
}

impl Tracker {
    /// Load state from `store`, treating unreadable collections as empty.
    pub fn open(store: Box<dyn KeyValueStore>, clock: Box<dyn Clock>, keys: StorageConfig) -> Self {
        let routine = load_collection(&*store, &keys.routine_key);
        let ledger = load_collection(&*store, &keys.attendance_key);
        Self::with_state(routine, ledger, store, clock, keys)
    }

    /// Load state from `store`, failing on a corrupt or unreadable collection.
    ///
    /// # Errors
    /// Returns the first [`LoadError`] encountered.
    pub fn open_strict(
        store: Box<dyn KeyValueStore>,
        clock: Box<dyn Clock>,
        keys: StorageConfig,
    ) -> Result<Self, LoadError> {
        let routine = try_load_collection(&*store, &keys.routine_key)?;
        let ledger = try_load_collection(&*store, &keys.attendance_key)?;
        Ok(Self::with_state(routine, ledger, store, clock, keys))
    }

    /// Open the SQLite store in `dir` with the system clock.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened.
    pub fn open_in(dir: &Path, config: &Config) -> Result<Self, CoreError> {
        let store = SqliteStore::open(&config.database_path(dir))?;
        Ok(Self::open(
            Box::new(store),
            Box::new(SystemClock),
            config.storage.clone(),
        ))
    }

    fn with_state(
        routine: Routine,
        ledger: Ledger,
        store: Box<dyn KeyValueStore>,
        clock: Box<dyn Clock>,
        keys: StorageConfig,
    ) -> Self {
        tracing::debug!(
            subjects = routine.len(),
            records = ledger.len(),
            "loaded attendance state"
        );
        Self {
            routine,
            ledger,
            editor: None,
            store,
            clock,
            keys,
        }
    }

    pub fn routine(&self) -> &Routine {
        &self.routine
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        &*self.store
    }

    /// Give the store back, e.g. to reopen a new session on it.
    pub fn into_store(self) -> Box<dyn KeyValueStore> {
        self.store
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn resolve_today(&self) -> Weekday {
        day::resolve_today(&self.clock)
    }

    pub fn subjects_scheduled_on(&self, weekday: Weekday) -> Vec<&SubjectSchedule> {
        day::subjects_scheduled_on(&self.routine, weekday)
    }

    pub fn todays_classes(&self) -> Vec<&SubjectSchedule> {
        self.subjects_scheduled_on(self.resolve_today())
    }

    // --- routine editing ---

    /// Open the editor on a fresh copy of the committed routine.
    ///
    /// Any draft left open from before is discarded.
    pub fn begin_edit(&mut self) -> &mut RoutineEditor {
        if self.editor.as_ref().is_some_and(RoutineEditor::is_dirty) {
            tracing::debug!("discarding unsaved routine draft");
        }
        self.editor.insert(RoutineEditor::begin(&self.routine))
    }

    pub fn is_editing(&self) -> bool {
        self.editor.is_some()
    }

    pub fn editor(&self) -> Option<&RoutineEditor> {
        self.editor.as_ref()
    }

    /// # Errors
    /// Returns [`ValidationError::NotEditing`] if no editor is open.
    pub fn editor_mut(&mut self) -> Result<&mut RoutineEditor, ValidationError> {
        self.editor.as_mut().ok_or(ValidationError::NotEditing)
    }

    /// # Errors
    /// See [`RoutineEditor::add_to_draft`]; also [`ValidationError::NotEditing`].
    pub fn add_to_draft(
        &mut self,
        name: &str,
        days: impl IntoIterator<Item = Weekday>,
    ) -> Result<(), ValidationError> {
        self.editor_mut()?.add_to_draft(name, days)
    }

    /// # Errors
    /// Returns [`ValidationError::NotEditing`] if no editor is open.
    pub fn remove_from_draft(
        &mut self,
        index: usize,
    ) -> Result<Option<SubjectSchedule>, ValidationError> {
        Ok(self.editor_mut()?.remove_from_draft(index))
    }

    /// Close the editor without saving.
    pub fn cancel_edit(&mut self) {
        self.editor = None;
    }

    /// Replace the committed routine with the draft, close the editor and
    /// persist. Returns the number of subjects saved.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptyDraft`] for an empty draft and
    /// [`ValidationError::NotEditing`] with no open editor. Nothing changes on
    /// error and the editor stays open.
    pub fn save_routine(&mut self) -> Result<usize, ValidationError> {
        let routine = self
            .editor
            .as_ref()
            .ok_or(ValidationError::NotEditing)?
            .finish()?;
        self.routine = routine;
        self.editor = None;
        tracing::debug!(subjects = self.routine.len(), "routine saved");
        Self::persist(&mut *self.store, &self.keys.routine_key, &self.routine);
        Ok(self.routine.len())
    }

    // --- attendance ---

    /// Record attendance for `subject_name` on `date`, replacing any earlier
    /// record for that day.
    pub fn mark(&mut self, subject_name: &str, date: NaiveDate, attended: bool) {
        self.ledger.mark(subject_name, date, attended);
        tracing::debug!(subject = subject_name, %date, attended, "attendance marked");
        Self::persist(&mut *self.store, &self.keys.attendance_key, &self.ledger);
    }

    pub fn mark_today(&mut self, subject_name: &str, attended: bool) {
        let today = self.today();
        self.mark(subject_name, today, attended);
    }

    pub fn is_marked_today(&self, subject_name: &str) -> bool {
        self.ledger.is_marked_on(subject_name, self.today())
    }

    pub fn percentage(&self, subject_name: &str) -> u8 {
        self.ledger.percentage(subject_name)
    }

    pub fn overall_percentage(&self) -> u8 {
        self.ledger.overall_percentage(&self.routine)
    }

    pub fn at_risk_subjects(&self) -> Vec<&SubjectSchedule> {
        self.ledger.at_risk_subjects(&self.routine)
    }

    pub fn dashboard(&self) -> Dashboard {
        Dashboard::build(&self.routine, &self.ledger, self.today())
    }

    fn persist<T: Collection>(store: &mut dyn KeyValueStore, key: &str, value: &T) {
        if let Err(e) = save_collection(store, key, value) {
            tracing::error!(key, error = %e, "failed to persist collection");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::day::FixedClock;
    use crate::storage::{MemoryStore, ATTENDANCE_KEY, ROUTINE_KEY};
    use crate::StorageError;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn tracker_with(store: MemoryStore) -> Tracker {
        Tracker::open(
            Box::new(store),
            Box::new(FixedClock::on(monday())),
            StorageConfig::default(),
        )
    }

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::other("disk full")))
        }
    }

    #[test]
    fn draft_ops_require_open_editor() {
        let mut tracker = tracker_with(MemoryStore::new());
        assert_eq!(
            tracker.add_to_draft("Math", [Weekday::Monday]),
            Err(ValidationError::NotEditing)
        );
        assert_eq!(tracker.save_routine(), Err(ValidationError::NotEditing));
    }

    #[test]
    fn save_routine_commits_and_persists() {
        let mut tracker = tracker_with(MemoryStore::new());
        tracker.begin_edit();
        tracker.add_to_draft("Math", [Weekday::Monday]).unwrap();
        tracker.add_to_draft("Physics", [Weekday::Monday]).unwrap();
        assert!(tracker.routine().is_empty());

        assert_eq!(tracker.save_routine(), Ok(2));
        assert!(!tracker.is_editing());
        assert_eq!(tracker.routine().len(), 2);
        let stored = tracker.store().get(ROUTINE_KEY).unwrap().unwrap();
        assert!(stored.contains("\"subjectName\":\"Physics\""));
    }

    #[test]
    fn empty_draft_save_leaves_routine_untouched() {
        let mut tracker = tracker_with(MemoryStore::new());
        tracker.begin_edit();
        tracker.add_to_draft("Math", [Weekday::Monday]).unwrap();
        tracker.save_routine().unwrap();

        tracker.begin_edit();
        tracker.remove_from_draft(0).unwrap();
        assert_eq!(tracker.save_routine(), Err(ValidationError::EmptyDraft));
        assert!(tracker.is_editing());
        assert_eq!(tracker.routine().len(), 1);
    }

    #[test]
    fn reopening_editor_discards_unsaved_changes() {
        let mut tracker = tracker_with(MemoryStore::new());
        tracker.begin_edit();
        tracker.add_to_draft("Math", [Weekday::Monday]).unwrap();
        tracker.save_routine().unwrap();

        tracker.begin_edit();
        tracker.add_to_draft("Art", [Weekday::Friday]).unwrap();
        tracker.cancel_edit();

        let editor = tracker.begin_edit();
        assert_eq!(editor.draft(), tracker_routine_snapshot(&["Math"]).as_slice());
    }

    #[test]
    fn begin_edit_over_dirty_draft_starts_fresh() {
        let mut tracker = tracker_with(MemoryStore::new());
        tracker.begin_edit();
        tracker.add_to_draft("Math", [Weekday::Monday]).unwrap();
        tracker.save_routine().unwrap();

        tracker.begin_edit();
        tracker.add_to_draft("Art", [Weekday::Friday]).unwrap();
        assert!(tracker.editor().unwrap().is_dirty());

        let editor = tracker.begin_edit();
        assert!(!editor.is_dirty());
        assert_eq!(editor.draft(), tracker_routine_snapshot(&["Math"]).as_slice());
        assert_eq!(tracker.routine().len(), 1);
    }

    fn tracker_routine_snapshot(names: &[&str]) -> Routine {
        Routine::from(
            names
                .iter()
                .map(|n| SubjectSchedule::new(*n, [Weekday::Monday].into()))
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn mark_today_uses_clock_date() {
        let mut tracker = tracker_with(MemoryStore::new());
        assert!(!tracker.is_marked_today("Math"));
        tracker.mark_today("Math", false);
        assert!(tracker.is_marked_today("Math"));
        assert!(tracker.ledger().record_for("Math", monday()).is_some());
        assert!(tracker.store().get(ATTENDANCE_KEY).unwrap().is_some());
    }

    #[test]
    fn todays_classes_follow_clock() {
        let mut tracker = tracker_with(MemoryStore::new());
        tracker.begin_edit();
        tracker.add_to_draft("Math", [Weekday::Monday]).unwrap();
        tracker.add_to_draft("Art", [Weekday::Friday]).unwrap();
        tracker.save_routine().unwrap();

        assert_eq!(tracker.resolve_today(), Weekday::Monday);
        let names: Vec<_> = tracker
            .todays_classes()
            .into_iter()
            .map(|s| s.subject_name.clone())
            .collect();
        assert_eq!(names, vec!["Math"]);
    }

    #[test]
    fn failed_write_keeps_in_memory_change() {
        let mut tracker = Tracker::open(
            Box::new(FailingStore),
            Box::new(FixedClock::on(monday())),
            StorageConfig::default(),
        );
        tracker.mark_today("Math", true);
        assert_eq!(tracker.percentage("Math"), 100);
    }

    #[test]
    fn strict_open_reports_corruption() {
        let mut store = MemoryStore::new();
        store.set(ROUTINE_KEY, "not json").unwrap();
        let result = Tracker::open_strict(
            Box::new(store.clone()),
            Box::new(FixedClock::on(monday())),
            StorageConfig::default(),
        );
        assert!(matches!(result, Err(LoadError::Corrupt { .. })));

        let tracker = tracker_with(store);
        assert!(tracker.routine().is_empty());
    }
}
