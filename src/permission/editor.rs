use std::collections::HashSet;

use super::PermissionSet;
use crate::api::RoleApi;
use crate::error::Result;
use crate::menu::node::{find, MenuNode};
use crate::role::{PermissionAssignment, Role};

/// One visible line of the checkable tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionRow {
    pub id: String,
    pub name: String,
    pub depth: usize,
    pub has_children: bool,
    pub expanded: bool,
    pub selected: bool,
}

/// Checkable view of the full menu tree for one role.
///
/// Toggling cascades down to every descendant and never touches ancestors.
/// Partially selected subtrees are a valid resting state.
#[derive(Debug, Clone)]
pub struct PermissionEditor {
    role_id: String,
    tree: Vec<MenuNode>,
    selected: PermissionSet,
    expanded: HashSet<String>,
}

impl PermissionEditor {
    pub fn new(role_id: impl Into<String>, tree: Vec<MenuNode>, initial: PermissionSet) -> Self {
        Self {
            role_id: role_id.into(),
            tree,
            selected: initial,
            expanded: HashSet::new(),
        }
    }

    pub fn for_role(role: &Role, tree: Vec<MenuNode>) -> Self {
        Self::new(role.id.clone(), tree, PermissionSet::from_role(role))
    }

    pub fn role_id(&self) -> &str {
        &self.role_id
    }

    pub fn tree(&self) -> &[MenuNode] {
        &self.tree
    }

    pub fn selected(&self) -> &PermissionSet {
        &self.selected
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    /// Select or deselect `id` together with its whole subtree. Returns
    /// false when no node with that id exists in the tree.
    pub fn toggle(&mut self, id: &str) -> bool {
        let Some(node) = find(&self.tree, id) else {
            return false;
        };

        let mut ids = vec![id.to_string()];
        ids.extend(node.descendant_ids());

        if self.selected.contains(id) {
            for id in &ids {
                self.selected.remove(id);
            }
        } else {
            self.selected.extend(ids);
        }
        true
    }

    pub fn toggle_expand(&mut self, id: &str) {
        if !self.expanded.remove(id) {
            self.expanded.insert(id.to_string());
        }
    }

    pub fn expand_all(&mut self) {
        self.expanded.extend(crate::menu::collect_ids(&self.tree));
    }

    /// Rows in display order; children of collapsed nodes are hidden
    pub fn visible_rows(&self) -> Vec<PermissionRow> {
        let mut rows = Vec::new();
        self.push_rows(&self.tree, 0, &mut rows);
        rows
    }

    fn push_rows(&self, nodes: &[MenuNode], depth: usize, rows: &mut Vec<PermissionRow>) {
        for node in nodes {
            let Some(id) = node.id() else { continue };
            let expanded = self.is_expanded(id);
            rows.push(PermissionRow {
                id: id.to_string(),
                name: node.name.clone(),
                depth,
                has_children: node.has_children(),
                expanded,
                selected: self.is_selected(id),
            });
            if node.has_children() && expanded {
                self.push_rows(&node.sub_items, depth + 1, rows);
            }
        }
    }

    pub fn assignment(&self) -> PermissionAssignment {
        PermissionAssignment {
            role_id: self.role_id.clone(),
            permissions: self.selected.to_sorted_vec(),
        }
    }

    /// Replace the role's grants with the current selection. Local state is
    /// left untouched either way.
    pub async fn save<A: RoleApi + ?Sized>(&self, api: &A) -> Result<()> {
        let assignment = self.assignment();
        match api.assign_permissions(&assignment).await {
            Ok(()) => {
                tracing::info!("Saved {} permissions for role {}", assignment.permissions.len(), self.role_id);
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to save permissions for role {}: {}", self.role_id, e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Vec<MenuNode> {
        vec![
            MenuNode::new("A").with_id("a").with_children(vec![
                MenuNode::new("A1").with_id("a1").with_children(vec![
                    MenuNode::new("A1x").with_id("a1x").with_path("/a/1/x"),
                ]),
                MenuNode::new("A2").with_id("a2").with_path("/a/2"),
            ]),
            MenuNode::new("B").with_id("b").with_path("/b"),
        ]
    }

    fn editor(initial: &[&str]) -> PermissionEditor {
        PermissionEditor::new("r1", tree(), initial.iter().copied().collect())
    }

    #[test]
    fn test_toggle_selects_then_clears_subtree() {
        let mut editor = editor(&[]);
        assert!(editor.toggle("a"));
        assert_eq!(editor.selected().to_sorted_vec(), vec!["a", "a1", "a1x", "a2"]);

        editor.toggle("a");
        assert!(editor.selected().is_empty());
    }

    #[test]
    fn test_toggle_round_trip_restores_selection() {
        let mut editor = editor(&["b", "a2"]);
        let before = editor.selected().clone();
        editor.toggle("a1");
        editor.toggle("a1");
        assert_eq!(editor.selected(), &before);
    }

    #[test]
    fn test_toggle_child_leaves_ancestors_alone() {
        let mut empty = editor(&[]);
        empty.toggle("a1");
        assert_eq!(empty.selected().to_sorted_vec(), vec!["a1", "a1x"]);

        let mut full = editor(&["a", "a1", "a1x", "a2"]);
        full.toggle("a1");
        assert_eq!(full.selected().to_sorted_vec(), vec!["a", "a2"]);
    }

    #[test]
    fn test_toggle_selected_parent_clears_partially_selected_subtree() {
        let mut editor = editor(&["a", "a2"]);
        editor.toggle("a");
        assert!(editor.selected().is_empty());
    }

    #[test]
    fn test_toggle_unknown_id_is_noop() {
        let mut editor = editor(&["b"]);
        assert!(!editor.toggle("missing"));
        assert_eq!(editor.selected().len(), 1);
    }

    #[test]
    fn test_expand_is_independent_of_selection() {
        let mut editor = editor(&[]);
        assert_eq!(editor.visible_rows().len(), 2);

        editor.toggle_expand("a");
        let rows = editor.visible_rows();
        let names: Vec<_> = rows.iter().map(|r| (r.name.as_str(), r.depth)).collect();
        assert_eq!(names, vec![("A", 0), ("A1", 1), ("A2", 1), ("B", 0)]);
        assert!(editor.selected().is_empty());

        editor.toggle_expand("a");
        assert_eq!(editor.visible_rows().len(), 2);
    }

    #[test]
    fn test_assignment_is_sorted() {
        let editor = editor(&["b", "a"]);
        assert_eq!(editor.assignment().permissions, vec!["a", "b"]);
        assert_eq!(editor.assignment().role_id, "r1");
    }
}
