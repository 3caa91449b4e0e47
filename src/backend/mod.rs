// File: ./src/backend/mod.rs
pub mod memory;

#[cfg(target_os = "macos")]
pub mod eventkit;

pub use memory::MemoryStore;

#[cfg(target_os = "macos")]
pub use eventkit::EventKitStore;
