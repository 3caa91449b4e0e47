// File: ./src/model/view.rs
//! View models produced by the aggregation pipeline. These are ephemeral:
//! rebuilt on every fetch, never persisted.
use std::collections::HashMap;

use super::item::{ListEntry, Reminder};

/// A reminder wrapped for display, with its subtasks attached.
///
/// Nesting is a single level: a child item never carries children of its own,
/// matching the flat parent-reference model of the backends.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderItem {
    pub reminder: Reminder,
    pub is_child: bool,
    pub children: Vec<ReminderItem>,
}

impl ReminderItem {
    pub fn top_level(reminder: Reminder, children: Vec<ReminderItem>) -> Self {
        Self {
            reminder,
            is_child: false,
            children,
        }
    }

    pub fn child(reminder: Reminder) -> Self {
        Self {
            reminder,
            is_child: true,
            children: Vec::new(),
        }
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Groups a list's records into top-level items with their subtasks.
    ///
    /// Builds the parent-uid -> children map once, then emits one item per
    /// parent-less record in encounter order. Children keep their own fetch
    /// order. Records whose parent is not part of the input set are dropped,
    /// as the backend never surfaces them outside their parent.
    pub fn group(records: Vec<Reminder>) -> Vec<ReminderItem> {
        let mut roots: Vec<Reminder> = Vec::new();
        let mut children_map: HashMap<String, Vec<Reminder>> = HashMap::new();

        for record in records {
            match &record.parent_uid {
                Some(parent) => children_map.entry(parent.clone()).or_default().push(record),
                None => roots.push(record),
            }
        }

        roots
            .into_iter()
            .map(|root| {
                let children = children_map
                    .remove(&root.uid)
                    .unwrap_or_default()
                    .into_iter()
                    .map(ReminderItem::child)
                    .collect();
                ReminderItem::top_level(root, children)
            })
            .collect()
    }
}

/// One reminders list together with its grouped items, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderList {
    pub uid: String,
    pub title: String,
    pub color: Option<String>,
    pub items: Vec<ReminderItem>,
}

impl ReminderList {
    pub fn new(entry: &ListEntry, items: Vec<ReminderItem>) -> Self {
        Self {
            uid: entry.uid.clone(),
            title: entry.title.clone(),
            color: entry.color.clone(),
            items,
        }
    }
}
