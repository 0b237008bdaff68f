pub mod address;
pub mod auth;
pub mod employee;
pub mod logs;
pub mod menu;
pub mod permission;
pub mod role;
pub mod roster;
pub mod server;
pub mod sidebar;
pub mod slot;
