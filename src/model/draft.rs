// File: ./src/model/draft.rs
use serde::{Deserialize, Serialize};

use super::item::{DueDate, Priority, Reminder};

/// Caller-supplied edit state for a reminder, as captured by an edit popover
/// or a quick-add field. A draft is applied onto a record in one step so the
/// caller can skip the save entirely when nothing changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReminderDraft {
    pub title: String,
    pub notes: Option<String>,
    pub due: Option<DueDate>,
    pub priority: Priority,
    /// Target list; `None` leaves the record where it is.
    pub list_uid: Option<String>,
}

impl ReminderDraft {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Self::default()
        }
    }

    /// Seeds a draft from an existing record for editing.
    pub fn from_reminder(reminder: &Reminder) -> Self {
        Self {
            title: reminder.title.clone(),
            notes: reminder.notes.clone(),
            due: reminder.due.clone(),
            priority: reminder.priority,
            list_uid: Some(reminder.list_uid.clone()),
        }
    }

    /// Applies the draft's fields onto `reminder` and reports whether any
    /// field actually changed. Callers are expected to persist only when this
    /// returns true, avoiding redundant writes.
    pub fn apply_to(&self, reminder: &mut Reminder) -> bool {
        let mut changed = false;

        if reminder.title != self.title {
            reminder.title = self.title.clone();
            changed = true;
        }
        if reminder.notes != self.notes {
            reminder.notes = self.notes.clone();
            changed = true;
        }
        if reminder.due != self.due {
            reminder.due = self.due.clone();
            changed = true;
        }
        if reminder.priority != self.priority {
            reminder.priority = self.priority;
            changed = true;
        }
        if let Some(list_uid) = &self.list_uid
            && reminder.list_uid != *list_uid
        {
            reminder.list_uid = list_uid.clone();
            changed = true;
        }

        changed
    }
}
