// File: ./src/store.rs
/*! Backend store contract.

EventKit hands out reminders through an OS-coupled singleton; here the store
is an injected capability so the pipeline can run against EventKit, the
in-memory backend, or a test double without touching global state. Consumers hold the
implementation directly (the service is generic over it); nothing in this
crate reaches for a shared instance.

Fetching is the only suspension point of the contract. Implementations are
not expected to tolerate a save/remove overlapping an in-flight fetch: the
pipeline runs on one logical owner and issues operations sequentially.
*/
use chrono::{DateTime, Local};
use thiserror::Error;

use crate::model::{ListEntry, Reminder};

/// Authorization state of the backend reminders store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationState {
    NotDetermined,
    Denied,
    Restricted,
    Authorized,
}

impl AuthorizationState {
    pub fn is_authorized(&self) -> bool {
        matches!(self, AuthorizationState::Authorized)
    }
}

/// Error surface of a backend store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("access to the reminders store is not authorized")]
    Unauthorized,
    #[error("no such record or list: {0}")]
    NotFound(String),
    #[error("backend rejected the operation: {0}")]
    Backend(String),
}

/// Contract every reminders backend implements.
///
/// `fetch_records` is asynchronous because the underlying stores answer
/// queries through callbacks; everything else completes inline.
#[allow(async_fn_in_trait)]
pub trait ReminderStore {
    fn authorization_state(&self) -> AuthorizationState;

    /// Asks the backend for access. Resolves to whether access was granted;
    /// an `Err` carries the backend's failure message.
    async fn request_access(&self) -> Result<bool, StoreError>;

    /// All reminders lists, in the backend's native order.
    fn all_lists(&self) -> Vec<ListEntry>;

    fn list_by_uid(&self, uid: &str) -> Option<ListEntry> {
        self.all_lists().into_iter().find(|l| l.uid == uid)
    }

    /// The list new reminders land in when the caller has no preference.
    /// Backends with an explicit default override this and fall back to the
    /// first available list themselves.
    fn default_list(&self) -> Option<ListEntry> {
        self.all_lists().into_iter().next()
    }

    /// Fetches reminder records.
    ///
    /// - `lists`: restrict to these list uids; `None` queries every list.
    /// - `due_before`: exclude records whose due date falls after the
    ///   boundary. Records without a due date pass the bound, the way
    ///   EventKit's incomplete-reminders predicate treats an open start.
    /// - `incomplete_only`: keep only records not yet completed.
    async fn fetch_records(
        &self,
        lists: Option<&[String]>,
        due_before: Option<DateTime<Local>>,
        incomplete_only: bool,
    ) -> Result<Vec<Reminder>, StoreError>;

    fn save(&self, reminder: &Reminder) -> Result<(), StoreError>;

    fn remove(&self, uid: &str) -> Result<(), StoreError>;
}
