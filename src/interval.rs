// File: ./src/interval.rs
//! Named due-date horizons for the upcoming-reminders query.
use chrono::{DateTime, Days, Local, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumIter;

/// A due-date horizon. Each variant maps to an inclusive ending boundary for
/// the incomplete-reminders query; `Due` additionally drops reminders that
/// are not yet expired (a date-only reminder due today is "due today", not
/// overdue, until midnight passes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumIter)]
pub enum Interval {
    Due,
    #[default]
    Today,
    Tomorrow,
    Week,
    Month,
}

impl Interval {
    /// Inclusive end of the queried horizon, relative to `now`.
    pub fn ending_date(&self, now: DateTime<Local>) -> DateTime<Local> {
        let today = now.date_naive();
        let day = match self {
            Interval::Due | Interval::Today => today,
            Interval::Tomorrow => today + Days::new(1),
            Interval::Week => today + Days::new(7),
            Interval::Month => today + Days::new(30),
        };
        end_of_day(day)
    }

    /// Whether results need the expiration post-filter.
    pub fn requires_expired(&self) -> bool {
        matches!(self, Interval::Due)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interval::Due => write!(f, "Due"),
            Interval::Today => write!(f, "Today"),
            Interval::Tomorrow => write!(f, "Tomorrow"),
            Interval::Week => write!(f, "Next 7 Days"),
            Interval::Month => write!(f, "Next 30 Days"),
        }
    }
}

fn end_of_day(day: NaiveDate) -> DateTime<Local> {
    let end = day.and_hms_opt(23, 59, 59).unwrap();
    // DST gaps cannot land on 23:59:59, but stay total anyway.
    Local
        .from_local_datetime(&end)
        .single()
        .or_else(|| Local.from_local_datetime(&end).earliest())
        .unwrap_or_else(|| end.and_utc().with_timezone(&Local))
}
