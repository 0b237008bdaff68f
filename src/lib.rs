pub mod allowlist;
pub mod api;
pub mod audit;
pub mod cli;
pub mod config;
pub mod employee;
pub mod error;
pub mod menu;
pub mod permission;
pub mod role;
pub mod roster;
pub mod sidebar;
pub mod store;
pub mod types;

pub use error::{Error, Result};
