use serde::{Deserialize, Serialize};
use std::fmt;

/// Client-assigned provisional key for rows that may not have a backend id yet
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TempId(String);

impl TempId {
    pub fn generate() -> Self {
        TempId(format!("temp-{}", uuid::Uuid::new_v4().simple()))
    }

    pub fn indexed(index: usize) -> Self {
        TempId(format!("temp-{}", index))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TempId {
    fn from(value: String) -> Self {
        TempId(value)
    }
}

impl From<&str> for TempId {
    fn from(value: &str) -> Self {
        TempId(value.to_string())
    }
}

impl Default for TempId {
    fn default() -> Self {
        TempId::generate()
    }
}

impl fmt::Display for TempId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One entry of the navigation/permission tree as the backend serves it.
///
/// Children are owned by value. The backend is authoritative and the tree is
/// rebuilt from a fresh snapshot on every read, so there are no back-pointers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuNode {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub temp_id: TempId,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub path: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub group_title: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pro: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub sub_items: Vec<MenuNode>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// What a node is, according to the exactly-one-of rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuKind {
    GroupTitle,
    Branch,
    Route,
    /// Leaf with no route yet; kept but not navigable
    Unrouted,
    Invalid { reason: &'static str },
}

impl MenuNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        self.temp_id = TempId::from(id.as_str());
        self.id = Some(id);
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn with_order(mut self, order: i64) -> Self {
        self.order = order;
        self
    }

    pub fn group_title(mut self) -> Self {
        self.group_title = true;
        self
    }

    pub fn with_children(mut self, children: Vec<MenuNode>) -> Self {
        self.sub_items = children;
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn has_children(&self) -> bool {
        !self.sub_items.is_empty()
    }

    pub fn is_leaf(&self) -> bool {
        self.sub_items.is_empty()
    }

    pub fn kind(&self) -> MenuKind {
        let has_path = !self.path.trim().is_empty();
        match (self.group_title, self.has_children(), has_path) {
            (true, false, false) => MenuKind::GroupTitle,
            (true, true, _) => MenuKind::Invalid { reason: "group title cannot have submenus" },
            (true, false, true) => MenuKind::Invalid { reason: "group title cannot have a path" },
            (false, true, false) => MenuKind::Branch,
            (false, true, true) => MenuKind::Invalid { reason: "menu with submenus cannot have a path" },
            (false, false, true) => MenuKind::Route,
            (false, false, false) => MenuKind::Unrouted,
        }
    }

    /// Ids of every descendant in pre-order. Nodes without an id are skipped
    /// but their own descendants are still visited.
    pub fn descendant_ids(&self) -> Vec<String> {
        let mut ids = Vec::new();
        for child in &self.sub_items {
            if let Some(id) = child.id() {
                ids.push(id.to_string());
            }
            ids.extend(child.descendant_ids());
        }
        ids
    }

    /// First invariant violation in this subtree, reported by node name.
    /// Unrouted leaves pass; only conflicting shapes are rejected.
    pub fn validate(&self) -> Result<(), (String, &'static str)> {
        if self.name.trim().is_empty() {
            return Err((self.display_key(), "name is required"));
        }
        if let MenuKind::Invalid { reason } = self.kind() {
            return Err((self.name.clone(), reason));
        }
        self.sub_items.iter().try_for_each(MenuNode::validate)
    }

    fn display_key(&self) -> String {
        self.id().map(str::to_string).unwrap_or_else(|| self.temp_id.to_string())
    }
}

/// Every id in the forest, pre-order
pub fn collect_ids(forest: &[MenuNode]) -> Vec<String> {
    let mut ids = Vec::new();
    for node in forest {
        if let Some(id) = node.id() {
            ids.push(id.to_string());
        }
        ids.extend(node.descendant_ids());
    }
    ids
}

pub fn find<'a>(forest: &'a [MenuNode], id: &str) -> Option<&'a MenuNode> {
    for node in forest {
        if node.id() == Some(id) {
            return Some(node);
        }
        if let Some(found) = find(&node.sub_items, id) {
            return Some(found);
        }
    }
    None
}

/// Sort siblings ascending by `order` at every level. `sort_by_key` is
/// stable, so ties keep the order the backend sent them in.
pub fn sort_forest(forest: &mut [MenuNode]) {
    forest.sort_by_key(|node| node.order);
    for node in forest.iter_mut() {
        sort_forest(&mut node.sub_items);
    }
}
