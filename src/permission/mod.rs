pub mod editor;
pub mod set;

pub use editor::{PermissionEditor, PermissionRow};
pub use set::PermissionSet;
