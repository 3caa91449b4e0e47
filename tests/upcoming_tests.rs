// Tests for the upcoming-reminders pipeline: horizons, the overdue filter
// and the sort contract.
use chrono::{Days, Duration, Local, TimeZone, Utc};
use rappel::backend::MemoryStore;
use rappel::interval::Interval;
use rappel::model::{DueDate, ListEntry, Reminder};
use rappel::service::ReminderService;

fn list(uid: &str) -> ListEntry {
    ListEntry {
        uid: uid.to_string(),
        title: uid.to_string(),
        color: None,
    }
}

fn reminder(uid: &str, list_uid: &str, due: Option<DueDate>) -> Reminder {
    let mut r = Reminder::new(uid, list_uid);
    r.uid = uid.to_string();
    r.due = due;
    r
}

fn all_day_offset(days: i64) -> DueDate {
    DueDate::AllDay(Local::now().date_naive() + Duration::days(days))
}

#[tokio::test]
async fn test_explicit_empty_selection_returns_nothing() {
    let store = MemoryStore::new(vec![list("home")]);
    store.insert(reminder("1", "home", Some(all_day_offset(0))));
    let service = ReminderService::new(store);

    let empty: &[String] = &[];
    assert!(service.get_upcoming(Interval::Week, Some(empty)).await.is_empty());
    // No selection at all means every list.
    assert_eq!(service.get_upcoming(Interval::Week, None).await.len(), 1);
}

#[tokio::test]
async fn test_horizon_excludes_later_due_dates() {
    let store = MemoryStore::new(vec![list("home")]);
    store.insert(reminder("today", "home", Some(all_day_offset(0))));
    store.insert(reminder("far", "home", Some(all_day_offset(10))));
    store.insert(reminder("undated", "home", None));
    let service = ReminderService::new(store);

    let items = service.get_upcoming(Interval::Week, None).await;
    let uids: Vec<&str> = items.iter().map(|i| i.reminder.uid.as_str()).collect();
    assert_eq!(uids, vec!["today", "undated"]);
}

#[tokio::test]
async fn test_completed_records_are_excluded() {
    let store = MemoryStore::new(vec![list("home")]);
    let mut done = reminder("done", "home", Some(all_day_offset(0)));
    done.completed = true;
    store.insert(done);
    store.insert(reminder("open", "home", Some(all_day_offset(0))));
    let service = ReminderService::new(store);

    let items = service.get_upcoming(Interval::Today, None).await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].reminder.uid, "open");
}

#[tokio::test]
async fn test_list_scoping() {
    let store = MemoryStore::new(vec![list("home"), list("work")]);
    store.insert(reminder("h", "home", Some(all_day_offset(0))));
    store.insert(reminder("w", "work", Some(all_day_offset(0))));
    let service = ReminderService::new(store);

    let selection = vec!["work".to_string()];
    let items = service.get_upcoming(Interval::Today, Some(&selection)).await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].reminder.uid, "w");
}

#[tokio::test]
async fn test_sorted_dated_before_undated_ascending() {
    let store = MemoryStore::new(vec![list("home")]);
    store.insert(reminder("undated", "home", None));
    store.insert(reminder("soon", "home", Some(all_day_offset(-2))));
    store.insert(reminder("sooner", "home", Some(all_day_offset(-4))));
    let service = ReminderService::new(store);

    let items = service.get_upcoming(Interval::Today, None).await;
    let uids: Vec<&str> = items.iter().map(|i| i.reminder.uid.as_str()).collect();
    assert_eq!(uids, vec!["sooner", "soon", "undated"]);
}

#[tokio::test]
async fn test_sort_ties_keep_fetch_order() {
    let store = MemoryStore::new(vec![list("home")]);
    store.insert(reminder("first", "home", Some(all_day_offset(-1))));
    store.insert(reminder("second", "home", Some(all_day_offset(-1))));
    store.insert(reminder("third", "home", Some(all_day_offset(-1))));
    let service = ReminderService::new(store);

    let items = service.get_upcoming(Interval::Today, None).await;
    let uids: Vec<&str> = items.iter().map(|i| i.reminder.uid.as_str()).collect();
    assert_eq!(uids, vec!["first", "second", "third"]);
}

#[tokio::test]
async fn test_timed_sorts_before_all_day_on_same_day() {
    let store = MemoryStore::new(vec![list("home")]);
    store.insert(reminder("all_day", "home", Some(all_day_offset(-1))));

    let yesterday_morning = (Local::now().date_naive() - Duration::days(1))
        .and_hms_opt(8, 0, 0)
        .unwrap();
    let timed = Local
        .from_local_datetime(&yesterday_morning)
        .single()
        .unwrap()
        .with_timezone(&Utc);
    store.insert(reminder("timed", "home", Some(DueDate::Timed(timed))));
    let service = ReminderService::new(store);

    let items = service.get_upcoming(Interval::Today, None).await;
    let uids: Vec<&str> = items.iter().map(|i| i.reminder.uid.as_str()).collect();
    assert_eq!(uids, vec!["timed", "all_day"]);
}

#[tokio::test]
async fn test_due_filter_excludes_today_all_day() {
    let store = MemoryStore::new(vec![list("home")]);
    // An all-day reminder due today is "due today", not overdue.
    store.insert(reminder("today", "home", Some(all_day_offset(0))));
    store.insert(reminder("yesterday", "home", Some(all_day_offset(-1))));
    let service = ReminderService::new(store);

    let items = service.get_upcoming(Interval::Due, None).await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].reminder.uid, "yesterday");
}

#[tokio::test]
async fn test_due_filter_includes_past_timestamps() {
    let store = MemoryStore::new(vec![list("home")]);
    let two_hours_ago = Utc::now() - Duration::hours(2);
    store.insert(reminder("late", "home", Some(DueDate::Timed(two_hours_ago))));
    store.insert(reminder("undated", "home", None));
    let service = ReminderService::new(store);

    let items = service.get_upcoming(Interval::Due, None).await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].reminder.uid, "late");
}

#[tokio::test]
async fn test_upcoming_items_are_flat() {
    let store = MemoryStore::new(vec![list("home")]);
    store.insert(reminder("parent", "home", Some(all_day_offset(-1))));
    let mut child = reminder("child", "home", Some(all_day_offset(-1)));
    child.parent_uid = Some("parent".to_string());
    store.insert(child);
    let service = ReminderService::new(store);

    // No grouping here: subtasks stand on their own.
    let items = service.get_upcoming(Interval::Today, None).await;
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|i| i.children.is_empty() && !i.is_child));
}

#[test]
fn test_interval_boundaries_are_end_of_day() {
    let now = Local::now();
    let today = now.date_naive();

    assert_eq!(Interval::Today.ending_date(now).date_naive(), today);
    assert_eq!(
        Interval::Due.ending_date(now),
        Interval::Today.ending_date(now)
    );
    assert_eq!(
        Interval::Tomorrow.ending_date(now).date_naive(),
        today + Days::new(1)
    );
    assert_eq!(
        Interval::Week.ending_date(now).date_naive(),
        today + Days::new(7)
    );
    assert_eq!(
        Interval::Month.ending_date(now).date_naive(),
        today + Days::new(30)
    );
}

#[test]
fn test_expiration_predicate() {
    let today = Local::now().date_naive();
    assert!(!DueDate::AllDay(today).is_expired());
    assert!(DueDate::AllDay(today - Duration::days(1)).is_expired());

    assert!(DueDate::Timed(Utc::now() - Duration::seconds(1)).is_expired());
    assert!(!DueDate::Timed(Utc::now() + Duration::seconds(60)).is_expired());
}
