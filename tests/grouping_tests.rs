// Tests for the list-fetch pipeline: parent/child grouping and list resolution.
use rappel::backend::MemoryStore;
use rappel::model::{ListEntry, Reminder, ReminderItem};
use rappel::service::ReminderService;

fn list(uid: &str, title: &str) -> ListEntry {
    ListEntry {
        uid: uid.to_string(),
        title: title.to_string(),
        color: None,
    }
}

fn reminder(uid: &str, title: &str, list_uid: &str) -> Reminder {
    let mut r = Reminder::new(title, list_uid);
    r.uid = uid.to_string();
    r
}

fn child_of(uid: &str, title: &str, list_uid: &str, parent: &str) -> Reminder {
    let mut r = reminder(uid, title, list_uid);
    r.parent_uid = Some(parent.to_string());
    r
}

#[tokio::test]
async fn test_parent_child_grouping() {
    let store = MemoryStore::new(vec![list("home", "Home")]);
    store.insert(reminder("1", "Buy milk", "home"));
    store.insert(child_of("2", "2%", "home", "1"));

    let service = ReminderService::new(store);
    let lists = service.get_reminders(&["home".to_string()]).await;

    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0].uid, "home");
    assert_eq!(lists[0].items.len(), 1);

    let item = &lists[0].items[0];
    assert_eq!(item.reminder.title, "Buy milk");
    assert!(!item.is_child);
    assert!(item.has_children());
    assert_eq!(item.children.len(), 1);
    assert_eq!(item.children[0].reminder.title, "2%");
    assert!(item.children[0].is_child);
}

#[tokio::test]
async fn test_no_grandchildren() {
    let store = MemoryStore::new(vec![list("home", "Home")]);
    store.insert(reminder("a", "Root", "home"));
    store.insert(child_of("b", "Child", "home", "a"));
    // A further parent reference below the first level is never surfaced.
    store.insert(child_of("c", "Grandchild", "home", "b"));

    let service = ReminderService::new(store);
    let lists = service.get_reminders(&["home".to_string()]).await;

    assert_eq!(lists[0].items.len(), 1);
    let root = &lists[0].items[0];
    assert_eq!(root.children.len(), 1);
    assert!(root.children[0].children.is_empty());
}

#[tokio::test]
async fn test_empty_identifier_set_is_vacuous() {
    let store = MemoryStore::new(vec![list("home", "Home")]);
    store.insert(reminder("1", "Something", "home"));

    let service = ReminderService::new(store);
    assert!(service.get_reminders(&[]).await.is_empty());
}

#[tokio::test]
async fn test_unknown_identifiers_are_dropped() {
    let store = MemoryStore::new(vec![list("home", "Home")]);
    store.insert(reminder("1", "Something", "home"));

    let service = ReminderService::new(store);
    let lists = service
        .get_reminders(&["home".to_string(), "missing".to_string()])
        .await;

    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0].uid, "home");
}

#[tokio::test]
async fn test_result_follows_backend_list_order() {
    let store = MemoryStore::new(vec![
        list("a", "Alpha"),
        list("b", "Beta"),
        list("c", "Gamma"),
    ]);
    let service = ReminderService::new(store);

    // Request order is not significant; the backend's order wins.
    let lists = service
        .get_reminders(&["c".to_string(), "a".to_string()])
        .await;

    let uids: Vec<&str> = lists.iter().map(|l| l.uid.as_str()).collect();
    assert_eq!(uids, vec!["a", "c"]);
}

#[tokio::test]
async fn test_empty_list_still_appears() {
    let store = MemoryStore::new(vec![list("home", "Home"), list("work", "Work")]);
    store.insert(reminder("1", "Only in home", "home"));

    let service = ReminderService::new(store);
    let lists = service
        .get_reminders(&["home".to_string(), "work".to_string()])
        .await;

    assert_eq!(lists.len(), 2);
    assert_eq!(lists[1].uid, "work");
    assert!(lists[1].items.is_empty());
}

#[test]
fn test_group_preserves_encounter_order() {
    let records = vec![
        reminder("1", "First", "home"),
        reminder("2", "Second", "home"),
        child_of("3", "Sub of first", "home", "1"),
        reminder("4", "Third", "home"),
    ];

    let items = ReminderItem::group(records);
    let titles: Vec<&str> = items.iter().map(|i| i.reminder.title.as_str()).collect();
    assert_eq!(titles, vec!["First", "Second", "Third"]);
    assert_eq!(items[0].children.len(), 1);
}

#[test]
fn test_group_drops_children_of_absent_parents() {
    let records = vec![
        reminder("1", "Root", "home"),
        child_of("2", "Orphan", "home", "gone"),
    ];

    let items = ReminderItem::group(records);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].reminder.title, "Root");
    assert!(items[0].children.is_empty());
}

#[tokio::test]
async fn test_completed_records_appear_in_list_fetch() {
    let store = MemoryStore::new(vec![list("home", "Home")]);
    let mut done = reminder("1", "Done already", "home");
    done.completed = true;
    store.insert(done);

    let service = ReminderService::new(store);
    let lists = service.get_reminders(&["home".to_string()]).await;
    assert_eq!(lists[0].items.len(), 1);
    assert!(lists[0].items[0].reminder.completed);
}
