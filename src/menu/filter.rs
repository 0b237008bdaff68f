use super::node::MenuNode;
use crate::permission::PermissionSet;

/// Prune a forest down to the nodes in `permitted`, keeping order and nesting.
///
/// A node is kept only when its own id is permitted and every ancestor was
/// kept. Nodes without an id are never permitted. A kept branch whose
/// children were all dropped stays in the result with no children.
pub fn filter_forest(forest: &[MenuNode], permitted: &PermissionSet) -> Vec<MenuNode> {
    if permitted.is_empty() {
        return Vec::new();
    }
    forest
        .iter()
        .filter_map(|node| filter_node(node, permitted))
        .collect()
}

fn filter_node(node: &MenuNode, permitted: &PermissionSet) -> Option<MenuNode> {
    let id = node.id()?;
    if !permitted.contains(id) {
        return None;
    }

    let sub_items = node
        .sub_items
        .iter()
        .filter_map(|child| filter_node(child, permitted))
        .collect();

    Some(MenuNode {
        sub_items,
        ..node.clone_shallow()
    })
}

impl MenuNode {
    fn clone_shallow(&self) -> MenuNode {
        MenuNode {
            id: self.id.clone(),
            temp_id: self.temp_id.clone(),
            name: self.name.clone(),
            icon: self.icon.clone(),
            path: self.path.clone(),
            order: self.order,
            group_title: self.group_title,
            level: self.level,
            pro: self.pro,
            parent_id: self.parent_id.clone(),
            sub_items: Vec::new(),
        }
    }
}

/// Every non-empty route in a (filtered) forest, pre-order
pub fn permitted_routes(filtered: &[MenuNode]) -> Vec<String> {
    let mut routes = Vec::new();
    for node in filtered {
        if !node.path.is_empty() && node.is_leaf() && !node.group_title {
            routes.push(node.path.clone());
        }
        routes.extend(permitted_routes(&node.sub_items));
    }
    routes
}

pub fn is_route_permitted(filtered: &[MenuNode], route: &str) -> bool {
    permitted_routes(filtered).iter().any(|path| path == route)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::node::collect_ids;

    fn sample() -> Vec<MenuNode> {
        vec![
            MenuNode::new("A").with_id("a").with_children(vec![
                MenuNode::new("A1").with_id("a1").with_path("/a/1"),
                MenuNode::new("A2").with_id("a2").with_path("/a/2"),
            ]),
            MenuNode::new("B").with_id("b").with_path("/b"),
            MenuNode::new("Reports").with_id("g").group_title(),
        ]
    }

    fn names(forest: &[MenuNode]) -> Vec<&str> {
        forest.iter().map(|n| n.name.as_str()).collect()
    }

    #[test]
    fn test_parent_and_one_child_permitted() {
        let permitted: PermissionSet = vec!["a", "a1"].into_iter().collect();
        let filtered = filter_forest(&sample(), &permitted);

        assert_eq!(names(&filtered), vec!["A"]);
        assert_eq!(names(&filtered[0].sub_items), vec!["A1"]);
    }

    #[test]
    fn test_ancestor_gate_hides_permitted_child() {
        let permitted: PermissionSet = vec!["a1"].into_iter().collect();
        assert!(filter_forest(&sample(), &permitted).is_empty());
    }

    #[test]
    fn test_empty_permission_set_yields_empty_forest() {
        assert!(filter_forest(&sample(), &PermissionSet::new()).is_empty());
    }

    #[test]
    fn test_full_permission_set_is_identity() {
        let forest = sample();
        let permitted: PermissionSet = collect_ids(&forest).into_iter().collect();
        assert_eq!(filter_forest(&forest, &permitted), forest);
    }

    #[test]
    fn test_parent_without_surviving_children_stays_visible() {
        let permitted: PermissionSet = vec!["a"].into_iter().collect();
        let filtered = filter_forest(&sample(), &permitted);
        assert_eq!(names(&filtered), vec!["A"]);
        assert!(filtered[0].sub_items.is_empty());
    }

    #[test]
    fn test_nodes_without_id_are_never_permitted() {
        let forest = vec![MenuNode::new("draft").with_path("/draft")];
        let permitted: PermissionSet = vec!["b"].into_iter().collect();
        assert!(filter_forest(&forest, &permitted).is_empty());
    }

    #[test]
    fn test_order_is_preserved() {
        let permitted: PermissionSet = vec!["g", "b", "a"].into_iter().collect();
        assert_eq!(names(&filter_forest(&sample(), &permitted)), vec!["A", "B", "Reports"]);
    }

    #[test]
    fn test_permitted_routes() {
        let permitted: PermissionSet = vec!["a", "a2", "b", "g"].into_iter().collect();
        let filtered = filter_forest(&sample(), &permitted);
        assert_eq!(permitted_routes(&filtered), vec!["/a/2", "/b"]);
        assert!(is_route_permitted(&filtered, "/b"));
        assert!(!is_route_permitted(&filtered, "/a/1"));
    }
}
