// File: ./src/backend/eventkit.rs
//! EventKit-backed reminders store (macOS).
//!
//! Thin adapter over `EKEventStore`: authorization, reminder calendars,
//! predicate-based fetches and save/remove. The OS owns persistence, sync
//! and notifications; this backend only translates records.
use std::sync::mpsc;

use block2::RcBlock;
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use objc2::rc::Retained;
use objc2::runtime::Bool;
use objc2::msg_send;
use objc2_event_kit::{
    EKAuthorizationStatus, EKCalendar, EKEntityType, EKEventStore, EKReminder,
};
use objc2_foundation::{NSArray, NSDate, NSDateComponents, NSError, NSString};

use crate::model::{DueDate, ListEntry, Priority, Reminder};
use crate::store::{AuthorizationState, ReminderStore, StoreError};

/// Seconds between Unix epoch (1970-01-01) and NSDate reference date (2001-01-01)
const NSDATE_UNIX_OFFSET: f64 = 978307200.0;

/// NSDateComponents reports this for components that were never set.
const COMPONENT_UNDEFINED: isize = isize::MAX;

pub struct EventKitStore {
    store: Retained<EKEventStore>,
}

impl EventKitStore {
    pub fn new() -> Self {
        let store = unsafe { EKEventStore::new() };
        Self { store }
    }

    fn calendars(&self) -> Vec<Retained<EKCalendar>> {
        let ek_calendars = unsafe { self.store.calendarsForEntityType(EKEntityType::Reminder) };
        let mut calendars = Vec::new();
        for i in 0..ek_calendars.len() {
            calendars.push(ek_calendars.objectAtIndex(i));
        }
        calendars
    }

    fn calendars_for_uids(&self, uids: &[String]) -> Vec<Retained<EKCalendar>> {
        self.calendars()
            .into_iter()
            .filter(|cal| {
                let id = unsafe { cal.calendarIdentifier().to_string() };
                uids.contains(&id)
            })
            .collect()
    }

    fn fetch_matching(&self, predicate: &objc2_foundation::NSPredicate) -> Vec<Reminder> {
        let (tx, rx) = mpsc::channel();
        // Convert inside the completion block: EK objects must not leave the
        // store's queue.
        let block = RcBlock::new(move |reminders: *mut NSArray<EKReminder>| {
            let mut out = Vec::new();
            if !reminders.is_null() {
                let reminders = unsafe { &*reminders };
                for i in 0..reminders.len() {
                    let rem = reminders.objectAtIndex(i);
                    out.push(convert_reminder(&rem));
                }
            }
            let _ = tx.send(out);
        });

        unsafe {
            self.store
                .fetchRemindersMatchingPredicate_completion(predicate, &*block as *const _ as *mut _);
        }

        rx.recv().unwrap_or_default()
    }

    /// Looks an EKReminder up by its stable item identifier.
    fn reminder_by_uid(&self, uid: &str) -> Option<Retained<EKReminder>> {
        let ns_uid = NSString::from_str(uid);
        let item = unsafe { self.store.calendarItemWithIdentifier(&ns_uid) }?;
        item.downcast::<EKReminder>().ok()
    }
}

impl Default for EventKitStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ReminderStore for EventKitStore {
    fn authorization_state(&self) -> AuthorizationState {
        let status =
            unsafe { EKEventStore::authorizationStatusForEntityType(EKEntityType::Reminder) };
        match status {
            EKAuthorizationStatus::NotDetermined => AuthorizationState::NotDetermined,
            EKAuthorizationStatus::Denied => AuthorizationState::Denied,
            EKAuthorizationStatus::Restricted => AuthorizationState::Restricted,
            _ => AuthorizationState::Authorized,
        }
    }

    async fn request_access(&self) -> Result<bool, StoreError> {
        match self.authorization_state() {
            AuthorizationState::Authorized => return Ok(true),
            AuthorizationState::Denied | AuthorizationState::Restricted => return Ok(false),
            _ => {}
        }

        let (tx, rx) = mpsc::channel();
        let block = RcBlock::new(move |granted: Bool, error: *mut NSError| {
            let message = if error.is_null() {
                None
            } else {
                Some(unsafe { (*error).localizedDescription().to_string() })
            };
            let _ = tx.send((granted.as_bool(), message));
        });

        unsafe {
            self.store
                .requestFullAccessToRemindersWithCompletion(&*block as *const _ as *mut _);
        }

        let (granted, message) = rx
            .recv()
            .map_err(|_| StoreError::Backend("no response to the access request".into()))?;
        access_result(granted, message)
    }

    fn all_lists(&self) -> Vec<ListEntry> {
        self.calendars()
            .iter()
            .map(|cal| convert_calendar(cal))
            .collect()
    }

    fn default_list(&self) -> Option<ListEntry> {
        let default = unsafe { self.store.defaultCalendarForNewReminders() };
        default
            .map(|cal| convert_calendar(&cal))
            .or_else(|| self.all_lists().into_iter().next())
    }

    async fn fetch_records(
        &self,
        lists: Option<&[String]>,
        due_before: Option<DateTime<Local>>,
        incomplete_only: bool,
    ) -> Result<Vec<Reminder>, StoreError> {
        if !self.authorization_state().is_authorized() {
            return Err(StoreError::Unauthorized);
        }

        let calendars: Option<Vec<Retained<EKCalendar>>> =
            lists.map(|uids| self.calendars_for_uids(uids));
        let ns_calendars: Option<Retained<NSArray<EKCalendar>>> = calendars
            .map(|cals| NSArray::from_retained_slice(&cals));

        let predicate = if incomplete_only {
            let ending = due_before.map(|dt| datetime_to_nsdate(&dt));
            unsafe {
                self.store
                    .predicateForIncompleteRemindersWithDueDateStarting_ending_calendars(
                        None,
                        ending.as_deref(),
                        ns_calendars.as_deref(),
                    )
            }
        } else {
            unsafe {
                self.store
                    .predicateForRemindersInCalendars(ns_calendars.as_deref())
            }
        };

        Ok(self.fetch_matching(&predicate))
    }

    fn save(&self, reminder: &Reminder) -> Result<(), StoreError> {
        let ek_reminder = match self.reminder_by_uid(&reminder.uid) {
            Some(existing) => existing,
            None => unsafe { EKReminder::reminderWithEventStore(&self.store) },
        };

        unsafe {
            ek_reminder.setTitle(&NSString::from_str(&reminder.title));
            let notes = reminder.notes.as_deref().map(NSString::from_str);
            ek_reminder.setNotes(notes.as_deref());
            ek_reminder.setCompleted(reminder.completed);
            ek_reminder.setPriority(reminder.priority.as_raw() as _);

            let components = reminder.due.as_ref().map(due_to_components);
            ek_reminder.setDueDateComponents(components.as_deref());

            let ns_uid = NSString::from_str(&reminder.list_uid);
            if let Some(calendar) = self.store.calendarWithIdentifier(&ns_uid) {
                ek_reminder.setCalendar(Some(&calendar));
            }

            self.store
                .saveReminder_commit_error(&ek_reminder, true)
                .map_err(|e| StoreError::Backend(e.localizedDescription().to_string()))
        }
    }

    fn remove(&self, uid: &str) -> Result<(), StoreError> {
        let ek_reminder = self
            .reminder_by_uid(uid)
            .ok_or_else(|| StoreError::NotFound(uid.to_string()))?;
        unsafe {
            self.store
                .removeReminder_commit_error(&ek_reminder, true)
                .map_err(|e| StoreError::Backend(e.localizedDescription().to_string()))
        }
    }
}

fn convert_reminder(rem: &EKReminder) -> Reminder {
    let uid = unsafe { rem.calendarItemIdentifier().to_string() };
    let title = unsafe { rem.title().to_string() };
    let notes = unsafe { rem.notes().map(|s| s.to_string()) };
    let completed = unsafe { rem.isCompleted() };
    let priority = Priority::from_raw(unsafe { rem.priority() } as u8);
    let due = unsafe { rem.dueDateComponents() }
        .as_deref()
        .and_then(components_to_due);
    let list_uid = unsafe {
        rem.calendar()
            .map(|cal| cal.calendarIdentifier().to_string())
            .unwrap_or_default()
    };
    // Subtask links have no public EventKit API; the store exposes the
    // parent's item identifier through this key.
    let parent_uid: Option<String> = unsafe {
        let key = NSString::from_str("parentID");
        let value: Option<Retained<NSString>> = msg_send![rem, valueForKey: &*key];
        value.map(|s| s.to_string()).filter(|s| !s.is_empty())
    };

    Reminder {
        uid,
        title,
        notes,
        completed,
        due,
        priority,
        parent_uid,
        list_uid,
    }
}

fn convert_calendar(cal: &EKCalendar) -> ListEntry {
    let uid = unsafe { cal.calendarIdentifier().to_string() };
    let title = unsafe { cal.title().to_string() };
    ListEntry {
        uid,
        title,
        color: calendar_color_hex(cal),
    }
}

fn calendar_color_hex(cal: &EKCalendar) -> Option<String> {
    unsafe {
        let cg_color = cal.CGColor()?;
        let num_components: usize = msg_send![&*cg_color, numberOfComponents];
        if num_components >= 3 {
            let components: *const f64 = msg_send![&*cg_color, components];
            let r = *components;
            let g = *components.add(1);
            let b = *components.add(2);
            return Some(format!(
                "#{:02X}{:02X}{:02X}",
                (r * 255.0) as u8,
                (g * 255.0) as u8,
                (b * 255.0) as u8
            ));
        }
    }
    None
}

fn components_to_due(c: &NSDateComponents) -> Option<DueDate> {
    let (year, month, day) = unsafe { (c.year(), c.month(), c.day()) };
    if year == COMPONENT_UNDEFINED || month == COMPONENT_UNDEFINED || day == COMPONENT_UNDEFINED {
        return None;
    }
    let date = NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32)?;

    let hour = unsafe { c.hour() };
    if hour == COMPONENT_UNDEFINED {
        return Some(DueDate::AllDay(date));
    }
    let minute = unsafe { c.minute() };
    let minute = if minute == COMPONENT_UNDEFINED { 0 } else { minute };
    let naive = date.and_hms_opt(hour as u32, minute as u32, 0)?;
    let local = Local.from_local_datetime(&naive).single()?;
    Some(DueDate::Timed(local.with_timezone(&Utc)))
}

fn due_to_components(due: &DueDate) -> Retained<NSDateComponents> {
    unsafe {
        let c = NSDateComponents::new();
        match due {
            DueDate::AllDay(d) => {
                c.setYear(chrono::Datelike::year(d) as isize);
                c.setMonth(chrono::Datelike::month(d) as isize);
                c.setDay(chrono::Datelike::day(d) as isize);
            }
            DueDate::Timed(dt) => {
                let local = dt.with_timezone(&Local);
                c.setYear(chrono::Datelike::year(&local) as isize);
                c.setMonth(chrono::Datelike::month(&local) as isize);
                c.setDay(chrono::Datelike::day(&local) as isize);
                c.setHour(chrono::Timelike::hour(&local) as isize);
                c.setMinute(chrono::Timelike::minute(&local) as isize);
            }
        }
        c
    }
}

fn datetime_to_nsdate(dt: &DateTime<Local>) -> Retained<NSDate> {
    let unix_ts = dt.timestamp() as f64;
    let nsdate_ts = unix_ts - NSDATE_UNIX_OFFSET;
    NSDate::dateWithTimeIntervalSinceReferenceDate(nsdate_ts)
}

/// Maps the access-request callback's payload onto the store contract: an OS
/// error wins over the granted flag and surfaces with its message.
fn access_result(granted: bool, error_message: Option<String>) -> Result<bool, StoreError> {
    match error_message {
        Some(msg) => Err(StoreError::Backend(msg)),
        None => Ok(granted),
    }
}
