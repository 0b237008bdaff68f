pub mod editor;
pub mod filter;
pub mod icon;
pub mod node;

pub use editor::{MenuForm, SubmenuField, SubmenuRow};
pub use filter::{filter_forest, is_route_permitted, permitted_routes};
pub use icon::resolve_icon;
pub use node::{collect_ids, find, sort_forest, MenuKind, MenuNode, TempId};
