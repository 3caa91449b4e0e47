// File: ./src/service.rs
//! Central aggregation pipeline for reminder operations.
//! This is the single source of truth between the presentation layer and the
//! backend store: it resolves lists, groups parent/child reminders, applies
//! the upcoming-horizon filter and sort, and writes edits back.
//!
//! Error policy is deliberate and uniform: fetches fail soft (log a warning,
//! return an empty result, because a blank view beats a crashed one) and
//! writes are best effort (log the rejection, keep the in-memory edit; retry
//! is left to the next user-initiated save).
use chrono::{Local, Utc};
use std::collections::HashMap;

use crate::interval::Interval;
use crate::model::{ListEntry, Reminder, ReminderDraft, ReminderItem, ReminderList};
use crate::store::{AuthorizationState, ReminderStore, StoreError};

/// Aggregation pipeline over an injected backend store.
///
/// All operations run on one logical owner; the service never issues
/// overlapping calls against the backend and offers no cancellation. A
/// caller that no longer wants a fetch result simply discards it.
pub struct ReminderService<S: ReminderStore> {
    store: S,
}

impl<S: ReminderStore> ReminderService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // --- Authorization pass-throughs ---

    pub fn authorization_state(&self) -> AuthorizationState {
        self.store.authorization_state()
    }

    pub async fn request_access(&self) -> Result<bool, StoreError> {
        self.store.request_access().await
    }

    // --- List lookups ---

    pub fn lists(&self) -> Vec<ListEntry> {
        self.store.all_lists()
    }

    pub fn default_list(&self) -> Option<ListEntry> {
        self.store.default_list()
    }

    // --- Read pipeline ---

    /// Fetches the requested lists with their reminders grouped into
    /// parent/child items.
    ///
    /// Unknown identifiers are silently dropped. Result order follows the
    /// backend's native list order filtered to the requested set, and every
    /// resolved list appears even when it holds no reminders. A failed fetch
    /// yields an empty result.
    pub async fn get_reminders(&self, list_uids: &[String]) -> Vec<ReminderList> {
        let lists: Vec<ListEntry> = self
            .store
            .all_lists()
            .into_iter()
            .filter(|l| list_uids.contains(&l.uid))
            .collect();
        if lists.is_empty() {
            return Vec::new();
        }

        let resolved_uids: Vec<String> = lists.iter().map(|l| l.uid.clone()).collect();
        let records = match self
            .store
            .fetch_records(Some(&resolved_uids), None, false)
            .await
        {
            Ok(records) => records,
            Err(e) => {
                log::warn!("Reminder fetch failed, showing nothing: {}", e);
                return Vec::new();
            }
        };

        let mut by_list: HashMap<String, Vec<Reminder>> = HashMap::new();
        for record in records {
            by_list.entry(record.list_uid.clone()).or_default().push(record);
        }

        lists
            .iter()
            .map(|entry| {
                let list_records = by_list.remove(&entry.uid).unwrap_or_default();
                ReminderList::new(entry, ReminderItem::group(list_records))
            })
            .collect()
    }

    /// Fetches incomplete reminders due within `interval`, flat and sorted.
    ///
    /// `list_uids` scopes the query: `None` means all lists, while an
    /// explicit empty set means "no lists selected" and returns nothing.
    /// Children are not associated on this path; every record surfaces as a
    /// top-level item.
    pub async fn get_upcoming(
        &self,
        interval: Interval,
        list_uids: Option<&[String]>,
    ) -> Vec<ReminderItem> {
        if let Some(uids) = list_uids
            && uids.is_empty()
        {
            return Vec::new();
        }

        let ending = interval.ending_date(Local::now());
        let records = match self
            .store
            .fetch_records(list_uids, Some(ending), true)
            .await
        {
            Ok(records) => records,
            Err(e) => {
                log::warn!("Upcoming fetch failed, showing nothing: {}", e);
                return Vec::new();
            }
        };

        let now = Utc::now();
        let mut records: Vec<Reminder> = if interval.requires_expired() {
            // Date-only reminders due today are not overdue yet; drop them.
            records
                .into_iter()
                .filter(|r| r.is_expired_at(now))
                .collect()
        } else {
            records
        };

        // Stable: equal keys keep the backend's fetch order.
        records.sort_by(|a, b| a.compare_due(b));
        records
            .into_iter()
            .map(|r| ReminderItem::top_level(r, Vec::new()))
            .collect()
    }

    // --- Mutations (best effort) ---

    /// Persists an updated reminder. A backend rejection is logged, not
    /// surfaced: the in-memory edit already reflects the user's intent.
    pub fn save(&self, reminder: &Reminder) {
        if let Err(e) = self.store.save(reminder) {
            log::error!("Error saving reminder '{}': {}", reminder.title, e);
        }
    }

    /// Builds a new reminder from an edit draft and persists it into `list`.
    pub fn create_new(&self, draft: &ReminderDraft, list: &ListEntry) -> Reminder {
        let mut reminder = Reminder::new(&draft.title, &list.uid);
        draft.apply_to(&mut reminder);
        reminder.list_uid = list.uid.clone();
        self.save(&reminder);
        reminder
    }

    /// Deletes a reminder by uid, best effort.
    pub fn remove(&self, uid: &str) {
        if let Err(e) = self.store.remove(uid) {
            log::error!("Error removing reminder '{}': {}", uid, e);
        }
    }
}
