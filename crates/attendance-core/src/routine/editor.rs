//! Routine draft editor.
//!
//! Provides functionality for:
//! - Staging subject entries in a draft copied from the committed routine
//! - An in-progress entry (name + toggled days) as shown in the setup dialog
//! - Validating the draft before it replaces the committed routine
//!
//! The editor never touches committed state. [`RoutineEditor::finish`] only
//! produces the routine to commit; the caller swaps it in.

use std::collections::BTreeSet;

use super::{Routine, SubjectSchedule};
use crate::day::Weekday;
use crate::error::ValidationError;

/// Working copy of the routine plus the entry being typed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutineEditor {
    base: Routine,
    draft: Vec<SubjectSchedule>,
    pending_name: String,
    pending_days: BTreeSet<Weekday>,
}

impl RoutineEditor {
    /// Start editing from the committed routine.
    pub fn begin(committed: &Routine) -> Self {
        Self {
            base: committed.clone(),
            draft: committed.as_slice().to_vec(),
            pending_name: String::new(),
            pending_days: BTreeSet::new(),
        }
    }

    pub fn draft(&self) -> &[SubjectSchedule] {
        &self.draft
    }

    /// Whether the draft differs from the routine editing started from.
    pub fn is_dirty(&self) -> bool {
        self.draft != self.base.as_slice()
    }

    /// Append a subject to the draft.
    ///
    /// The name is trimmed. Same-name entries are not merged.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptySubjectName`] for a blank name and
    /// [`ValidationError::EmptyDays`] when no day is given. The draft is left
    /// unchanged on error.
    pub fn add_to_draft(
        &mut self,
        name: &str,
        days: impl IntoIterator<Item = Weekday>,
    ) -> Result<(), ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptySubjectName);
        }
        let days: BTreeSet<Weekday> = days.into_iter().collect();
        if days.is_empty() {
            return Err(ValidationError::EmptyDays);
        }
        self.draft.push(SubjectSchedule::new(name, days));
        Ok(())
    }

    /// Remove the entry at `index`. Out-of-range indices are ignored.
    pub fn remove_from_draft(&mut self, index: usize) -> Option<SubjectSchedule> {
        if index < self.draft.len() {
            Some(self.draft.remove(index))
        } else {
            None
        }
    }

    pub fn pending_name(&self) -> &str {
        &self.pending_name
    }

    pub fn pending_days(&self) -> &BTreeSet<Weekday> {
        &self.pending_days
    }

    pub fn set_pending_name(&mut self, name: impl Into<String>) {
        self.pending_name = name.into();
    }

    /// Flip `day` in the pending selection. Returns whether it is now selected.
    pub fn toggle_day(&mut self, day: Weekday) -> bool {
        if self.pending_days.remove(&day) {
            false
        } else {
            self.pending_days.insert(day);
            true
        }
    }

    /// Add the pending entry to the draft and clear it.
    ///
    /// # Errors
    /// Same as [`RoutineEditor::add_to_draft`]; the pending entry is kept so
    /// the user can fix it.
    pub fn add_pending(&mut self) -> Result<(), ValidationError> {
        let name = self.pending_name.clone();
        let days = self.pending_days.clone();
        self.add_to_draft(&name, days)?;
        self.pending_name.clear();
        self.pending_days.clear();
        Ok(())
    }

    /// The routine to commit.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptyDraft`] if the draft has no entries.
    pub fn finish(&self) -> Result<Routine, ValidationError> {
        if self.draft.is_empty() {
            return Err(ValidationError::EmptyDraft);
        }
        Ok(Routine::from(self.draft.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn committed() -> Routine {
        Routine::from(vec![SubjectSchedule::new(
            "Math",
            BTreeSet::from([Weekday::Monday]),
        )])
    }

    #[test]
    fn begins_with_copy_of_committed() {
        let editor = RoutineEditor::begin(&committed());
        assert_eq!(editor.draft(), committed().as_slice());
        assert!(!editor.is_dirty());
    }

    #[test]
    fn add_trims_name_and_allows_duplicates() {
        let mut editor = RoutineEditor::begin(&committed());
        editor.add_to_draft("  Math  ", [Weekday::Friday]).unwrap();
        assert_eq!(editor.draft().len(), 2);
        assert_eq!(editor.draft()[1].subject_name, "Math");
        assert!(editor.is_dirty());
    }

    #[test]
    fn rejects_blank_name_and_empty_days() {
        let mut editor = RoutineEditor::begin(&Routine::new());
        assert_eq!(
            editor.add_to_draft("", [Weekday::Monday]),
            Err(ValidationError::EmptySubjectName)
        );
        assert_eq!(
            editor.add_to_draft("   ", [Weekday::Monday]),
            Err(ValidationError::EmptySubjectName)
        );
        assert_eq!(
            editor.add_to_draft("Math", []),
            Err(ValidationError::EmptyDays)
        );
        assert!(editor.draft().is_empty());
    }

    #[test]
    fn remove_out_of_range_is_noop() {
        let mut editor = RoutineEditor::begin(&committed());
        assert!(editor.remove_from_draft(5).is_none());
        assert_eq!(editor.draft().len(), 1);
        let removed = editor.remove_from_draft(0).unwrap();
        assert_eq!(removed.subject_name, "Math");
        assert!(editor.draft().is_empty());
    }

    #[test]
    fn finish_rejects_empty_draft() {
        let mut editor = RoutineEditor::begin(&committed());
        editor.remove_from_draft(0);
        assert_eq!(editor.finish(), Err(ValidationError::EmptyDraft));
    }

    #[test]
    fn pending_entry_toggles_and_clears() {
        let mut editor = RoutineEditor::begin(&Routine::new());
        editor.set_pending_name("Physics");
        assert!(editor.toggle_day(Weekday::Tuesday));
        assert!(editor.toggle_day(Weekday::Thursday));
        assert!(!editor.toggle_day(Weekday::Tuesday));

        editor.add_pending().unwrap();
        assert_eq!(editor.draft()[0].days, BTreeSet::from([Weekday::Thursday]));
        assert!(editor.pending_name().is_empty());
        assert!(editor.pending_days().is_empty());
    }

    #[test]
    fn failed_pending_add_keeps_input() {
        let mut editor = RoutineEditor::begin(&Routine::new());
        editor.set_pending_name("Physics");
        assert_eq!(editor.add_pending(), Err(ValidationError::EmptyDays));
        assert_eq!(editor.pending_name(), "Physics");
        assert!(editor.draft().is_empty());
    }
}
