// File: ./src/model/mod.rs
pub mod draft;
pub mod item;
pub mod view;

pub use draft::ReminderDraft;
pub use item::{DueDate, ListEntry, Priority, Reminder};
pub use view::{ReminderItem, ReminderList};
