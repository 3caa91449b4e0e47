// File: ./src/backend/memory.rs
//! In-memory reminders backend.
//!
//! Serves two roles: a local, dependency-free store for callers that have no
//! platform backend, and the swappable stand-in that keeps the pipeline
//! testable without touching an OS reminders database. Query semantics here
//! are the reference for every other backend.
use chrono::{DateTime, Local};
use std::sync::Mutex;

use crate::model::{ListEntry, Reminder};
use crate::store::{AuthorizationState, ReminderStore, StoreError};

pub struct MemoryStore {
    lists: Vec<ListEntry>,
    default_uid: Option<String>,
    records: Mutex<Vec<Reminder>>,
}

impl MemoryStore {
    pub fn new(lists: Vec<ListEntry>) -> Self {
        Self {
            lists,
            default_uid: None,
            records: Mutex::new(Vec::new()),
        }
    }

    /// Marks one list as the explicit default for new reminders.
    pub fn with_default(mut self, uid: &str) -> Self {
        self.default_uid = Some(uid.to_string());
        self
    }

    /// Seeds a record, keeping insertion order (the store's native order).
    pub fn insert(&self, reminder: Reminder) {
        self.records.lock().unwrap().push(reminder);
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().unwrap().is_empty()
    }

    pub fn get(&self, uid: &str) -> Option<Reminder> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.uid == uid)
            .cloned()
    }
}

impl ReminderStore for MemoryStore {
    fn authorization_state(&self) -> AuthorizationState {
        AuthorizationState::Authorized
    }

    async fn request_access(&self) -> Result<bool, StoreError> {
        Ok(true)
    }

    fn all_lists(&self) -> Vec<ListEntry> {
        self.lists.clone()
    }

    fn default_list(&self) -> Option<ListEntry> {
        self.default_uid
            .as_ref()
            .and_then(|uid| self.lists.iter().find(|l| &l.uid == uid).cloned())
            .or_else(|| self.lists.first().cloned())
    }

    async fn fetch_records(
        &self,
        lists: Option<&[String]>,
        due_before: Option<DateTime<Local>>,
        incomplete_only: bool,
    ) -> Result<Vec<Reminder>, StoreError> {
        let records = self.records.lock().unwrap();
        let matches = records
            .iter()
            .filter(|r| match lists {
                Some(uids) => uids.contains(&r.list_uid),
                None => true,
            })
            .filter(|r| !incomplete_only || !r.completed)
            .filter(|r| match (&r.due, due_before) {
                // Undated records pass an open-started bound.
                (None, _) => true,
                (Some(_), None) => true,
                (Some(due), Some(bound)) => due.comparison_time() <= bound.with_timezone(&chrono::Utc),
            })
            .cloned()
            .collect();
        Ok(matches)
    }

    fn save(&self, reminder: &Reminder) -> Result<(), StoreError> {
        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|r| r.uid == reminder.uid) {
            Some(existing) => *existing = reminder.clone(),
            None => records.push(reminder.clone()),
        }
        Ok(())
    }

    fn remove(&self, uid: &str) -> Result<(), StoreError> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.uid != uid);
        if records.len() == before {
            return Err(StoreError::NotFound(uid.to_string()));
        }
        Ok(())
    }
}
