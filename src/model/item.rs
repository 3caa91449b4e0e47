// File: ./src/model/item.rs
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use strum::EnumIter;
use uuid::Uuid;

/// A reminders list (calendar) as described by the backend store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEntry {
    pub uid: String,
    pub title: String,
    /// Hex color string ("#RRGGBB") when the backend provides one.
    pub color: Option<String>,
}

// --- PRIORITY ---

/// Priority bands shared by the reminders backends.
/// Raw values follow the EventKit convention: 0 none, 1 high, 5 medium, 9 low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumIter)]
pub enum Priority {
    #[default]
    None,
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Priority::None,
            1..=4 => Priority::High,
            5 => Priority::Medium,
            _ => Priority::Low,
        }
    }

    pub fn as_raw(&self) -> u8 {
        match self {
            Priority::None => 0,
            Priority::High => 1,
            Priority::Medium => 5,
            Priority::Low => 9,
        }
    }
}

// --- DATE TYPES ---

/// Due date of a reminder, keeping the backend's precision: a calendar-only
/// date or an exact timestamp.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum DueDate {
    AllDay(NaiveDate),
    Timed(DateTime<Utc>),
}

impl DueDate {
    pub fn date_naive(&self) -> NaiveDate {
        match self {
            DueDate::AllDay(d) => *d,
            // Convert to Local so "today" matches the user's calendar day.
            DueDate::Timed(dt) => dt.with_timezone(&Local).date_naive(),
        }
    }

    /// Returns the logical deadline instant for comparison.
    /// AllDay -> end of day (23:59:59 local). Timed -> exact time.
    pub fn comparison_time(&self) -> DateTime<Utc> {
        match self {
            DueDate::AllDay(d) => {
                let end = d.and_hms_opt(23, 59, 59).unwrap();
                Local
                    .from_local_datetime(&end)
                    .single()
                    .map(|dt| dt.with_timezone(&Utc))
                    .unwrap_or_else(|| end.and_utc())
            }
            DueDate::Timed(dt) => *dt,
        }
    }

    /// The overdue predicate. A calendar-only due date counts as "due anytime
    /// during that day": it only expires once the following local day has
    /// begun. A timed due date expires the moment its timestamp passes.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self {
            DueDate::AllDay(d) => now.with_timezone(&Local).date_naive() > *d,
            DueDate::Timed(dt) => *dt < now,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

impl PartialOrd for DueDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DueDate {
    fn cmp(&self, other: &Self) -> Ordering {
        let d1 = self.date_naive();
        let d2 = other.date_naive();
        match d1.cmp(&d2) {
            Ordering::Equal => match (self, other) {
                // Same day: a concrete time comes before all-day (urgency).
                (DueDate::Timed(t1), DueDate::Timed(t2)) => t1.cmp(t2),
                (DueDate::Timed(_), DueDate::AllDay(_)) => Ordering::Less,
                (DueDate::AllDay(_), DueDate::Timed(_)) => Ordering::Greater,
                (DueDate::AllDay(_), DueDate::AllDay(_)) => Ordering::Equal,
            },
            ord => ord,
        }
    }
}

// --- REMINDER RECORD ---

/// A reminder as held by the backend store. The durable entity: everything
/// the pipeline derives from it is rebuilt on each fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub uid: String,
    pub title: String,
    pub notes: Option<String>,
    pub completed: bool,
    pub due: Option<DueDate>,
    pub priority: Priority,
    /// Uid of the parent reminder when this is a subtask. The backends only
    /// support one level of nesting.
    pub parent_uid: Option<String>,
    /// Uid of the owning list.
    pub list_uid: String,
}

impl Reminder {
    pub fn new(title: &str, list_uid: &str) -> Self {
        Self {
            uid: Uuid::new_v4().to_string(),
            title: title.to_string(),
            notes: None,
            completed: false,
            due: None,
            priority: Priority::None,
            parent_uid: None,
            list_uid: list_uid.to_string(),
        }
    }

    /// Whether the record is overdue at `now`. An undated record never is.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.due.as_ref().is_some_and(|d| d.is_expired_at(now))
    }

    /// Ordering used for the flat upcoming view: dated before undated,
    /// dated ascending. Everything else is left to the fetch order, so the
    /// caller must sort with a stable sort.
    pub fn compare_due(&self, other: &Self) -> Ordering {
        match (&self.due, &other.due) {
            (Some(d1), Some(d2)) => d1.cmp(d2),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}
