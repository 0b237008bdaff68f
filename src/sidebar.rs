//! Navigation sidebar built from an already-filtered menu forest.

use serde::Serialize;

use crate::menu::{resolve_icon, MenuNode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub id: Option<String>,
    pub name: String,
    pub icon: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NavItem {
    /// Non-interactive section header
    Header { name: String },
    /// Expandable entry; children are shown only while it is open
    Submenu {
        id: String,
        name: String,
        icon: String,
        children: Vec<NavLink>,
    },
    Link(NavLink),
}

impl NavItem {
    fn from_node(node: &MenuNode) -> Option<Self> {
        if node.group_title {
            return Some(NavItem::Header { name: node.name.clone() });
        }
        if node.has_children() {
            return Some(NavItem::Submenu {
                id: node.id()?.to_string(),
                name: node.name.clone(),
                icon: resolve_icon(&node.icon).to_string(),
                children: node
                    .sub_items
                    .iter()
                    .map(|sub| NavLink {
                        id: sub.id().map(str::to_string),
                        name: sub.name.clone(),
                        icon: resolve_icon(&sub.icon).to_string(),
                        path: sub.path.clone(),
                    })
                    .collect(),
            });
        }
        if node.path.is_empty() {
            return None;
        }
        Some(NavItem::Link(NavLink {
            id: node.id().map(str::to_string),
            name: node.name.clone(),
            icon: resolve_icon(&node.icon).to_string(),
            path: node.path.clone(),
        }))
    }
}

/// Sidebar state: the items plus which single submenu is open
#[derive(Debug, Clone, Default)]
pub struct Sidebar {
    items: Vec<NavItem>,
    open_submenu: Option<String>,
    current_route: Option<String>,
}

impl Sidebar {
    pub fn new(filtered: &[MenuNode]) -> Self {
        Self {
            items: filtered.iter().filter_map(NavItem::from_node).collect(),
            open_submenu: None,
            current_route: None,
        }
    }

    pub fn items(&self) -> &[NavItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn open_submenu(&self) -> Option<&str> {
        self.open_submenu.as_deref()
    }

    pub fn is_active(&self, path: &str) -> bool {
        self.current_route.as_deref() == Some(path)
    }

    /// Record the current route and force open the submenu that contains it.
    /// When no submenu contains the route the open submenu is left alone.
    pub fn sync_route(&mut self, route: &str) {
        self.current_route = Some(route.to_string());
        for item in &self.items {
            if let NavItem::Submenu { id, children, .. } = item {
                if children.iter().any(|child| child.path == route) {
                    self.open_submenu = Some(id.clone());
                }
            }
        }
    }

    /// Open `id`, closing any other submenu; toggling the open one closes it
    pub fn toggle_submenu(&mut self, id: &str) {
        if self.open_submenu.as_deref() == Some(id) {
            self.open_submenu = None;
        } else {
            self.open_submenu = Some(id.to_string());
        }
    }

    /// Indented text outline; `*` marks the active route, `v`/`>` open state
    pub fn render_text(&self) -> String {
        if self.items.is_empty() {
            return "No menu items available\n".to_string();
        }

        let mut out = String::new();
        for item in &self.items {
            match item {
                NavItem::Header { name } => {
                    out.push_str(&format!("{}\n", name.to_uppercase()));
                }
                NavItem::Submenu { id, name, icon, children } => {
                    let open = self.open_submenu.as_deref() == Some(id.as_str());
                    out.push_str(&format!("  {} [{}] {}\n", if open { "v" } else { ">" }, icon, name));
                    if open {
                        for child in children {
                            out.push_str(&format!("      {} {} ({})\n", self.marker(&child.path), child.name, child.path));
                        }
                    }
                }
                NavItem::Link(link) => {
                    out.push_str(&format!("  {} [{}] {} ({})\n", self.marker(&link.path), link.icon, link.name, link.path));
                }
            }
        }
        out
    }

    fn marker(&self, path: &str) -> &'static str {
        if self.is_active(path) {
            "*"
        } else {
            "-"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forest() -> Vec<MenuNode> {
        vec![
            MenuNode::new("Main").with_id("g").group_title(),
            MenuNode::new("Dashboard").with_id("d").with_path("/").with_icon("Dashboard"),
            MenuNode::new("HR").with_id("hr").with_icon("Groups").with_children(vec![
                MenuNode::new("Staff").with_id("staff").with_path("/hr/staff"),
                MenuNode::new("Roster").with_id("roster").with_path("/hr/roster-calendar"),
            ]),
            MenuNode::new("Settings").with_id("set").with_icon("NotAnIcon").with_children(vec![
                MenuNode::new("Menus").with_id("menus").with_path("/settings/menu-master"),
            ]),
            MenuNode::new("Orphan").with_id("o"),
        ]
    }

    #[test]
    fn test_items_follow_node_kinds() {
        let sidebar = Sidebar::new(&forest());
        let items = sidebar.items();
        assert_eq!(items.len(), 4);
        assert!(matches!(items[0], NavItem::Header { .. }));
        assert!(matches!(items[1], NavItem::Link(_)));
        assert!(matches!(items[2], NavItem::Submenu { .. }));
    }

    #[test]
    fn test_unknown_icon_falls_back() {
        let sidebar = Sidebar::new(&forest());
        match &sidebar.items()[3] {
            NavItem::Submenu { icon, .. } => assert_eq!(icon, "HelpOutline"),
            other => panic!("unexpected item: {other:?}"),
        }
    }

    #[test]
    fn test_single_open_policy() {
        let mut sidebar = Sidebar::new(&forest());
        sidebar.toggle_submenu("hr");
        assert_eq!(sidebar.open_submenu(), Some("hr"));
        sidebar.toggle_submenu("set");
        assert_eq!(sidebar.open_submenu(), Some("set"));
        sidebar.toggle_submenu("set");
        assert_eq!(sidebar.open_submenu(), None);
    }

    #[test]
    fn test_route_forces_containing_submenu_open() {
        let mut sidebar = Sidebar::new(&forest());
        sidebar.toggle_submenu("set");
        sidebar.sync_route("/hr/staff");
        assert_eq!(sidebar.open_submenu(), Some("hr"));
        assert!(sidebar.is_active("/hr/staff"));

        sidebar.sync_route("/");
        assert_eq!(sidebar.open_submenu(), Some("hr"));
    }

    #[test]
    fn test_render_text_shows_open_children_only() {
        let mut sidebar = Sidebar::new(&forest());
        sidebar.sync_route("/hr/staff");
        let text = sidebar.render_text();
        assert!(text.contains("* Staff (/hr/staff)"));
        assert!(!text.contains("Menus"));
        assert!(text.starts_with("MAIN\n"));
    }

    #[test]
    fn test_empty_sidebar() {
        assert_eq!(Sidebar::new(&[]).render_text(), "No menu items available\n");
    }
}
