// Crate root library declaration and module exports.
pub mod backend;
pub mod config;
pub mod context;
pub mod interval;
pub mod model;
pub mod service;
pub mod store;
