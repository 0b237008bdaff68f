//! Create/edit form for one parent menu and its direct children.
//!
//! The form always submits the full desired state (`{parent, submenus}`);
//! reconciling added, edited and removed children is the backend's job.

use crate::api::{MenuApi, MenuPayload};
use crate::error::{Error, Result};
use crate::menu::node::{MenuNode, TempId};

/// One child row, keyed by `temp_id` whether or not it is persisted
#[derive(Debug, Clone, PartialEq)]
pub struct SubmenuRow {
    pub temp_id: TempId,
    pub id: Option<String>,
    pub name: String,
    pub icon: String,
    pub path: String,
    pub order: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmenuField {
    Name(String),
    Icon(String),
    Path(String),
    Order(i64),
}

#[derive(Debug, Clone)]
pub struct MenuForm {
    id: Option<String>,
    temp_id: TempId,
    name: String,
    icon: String,
    path: String,
    order: i64,
    group_title: bool,
    parent_id: String,
    has_submenus: bool,
    submenus: Vec<SubmenuRow>,
}

impl Default for MenuForm {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuForm {
    pub fn new() -> Self {
        Self {
            id: None,
            temp_id: TempId::generate(),
            name: String::new(),
            icon: crate::config::config().menu.default_icon.clone(),
            path: String::new(),
            order: 1,
            group_title: false,
            parent_id: String::new(),
            has_submenus: false,
            submenus: Vec::new(),
        }
    }

    /// Load an existing node and its direct children for editing
    pub fn edit(node: &MenuNode) -> Self {
        let submenus: Vec<SubmenuRow> = node
            .sub_items
            .iter()
            .enumerate()
            .map(|(idx, sub)| SubmenuRow {
                temp_id: sub.id().map(TempId::from).unwrap_or_else(|| TempId::indexed(idx)),
                id: sub.id().map(str::to_string),
                name: sub.name.clone(),
                icon: sub.icon.clone(),
                path: sub.path.clone(),
                order: sub.order,
            })
            .collect();

        let mut form = Self {
            id: node.id().map(str::to_string),
            temp_id: node.temp_id.clone(),
            name: node.name.clone(),
            icon: node.icon.clone(),
            path: node.path.clone(),
            order: node.order,
            group_title: false,
            parent_id: node.parent_id.clone().unwrap_or_default(),
            has_submenus: !submenus.is_empty(),
            submenus,
        };

        // Stored nodes may carry a stale path next to children or a group
        // flag; normalize the same way the setters do
        if node.group_title {
            form.set_group_title(true);
        } else if form.has_submenus {
            form.path.clear();
        }
        form
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn is_editing(&self) -> bool {
        self.id.is_some()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn order(&self) -> i64 {
        self.order
    }

    pub fn is_group_title(&self) -> bool {
        self.group_title
    }

    pub fn has_submenus(&self) -> bool {
        self.has_submenus
    }

    pub fn submenus(&self) -> &[SubmenuRow] {
        &self.submenus
    }

    /// The path input is disabled for group titles and parents with submenus
    pub fn is_path_enabled(&self) -> bool {
        !self.group_title && !self.has_submenus
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_icon(&mut self, icon: impl Into<String>) {
        self.icon = icon.into();
    }

    /// Returns false when the path input is disabled
    pub fn set_path(&mut self, path: impl Into<String>) -> bool {
        if !self.is_path_enabled() {
            return false;
        }
        self.path = path.into();
        true
    }

    pub fn set_order(&mut self, order: i64) {
        self.order = order.max(1);
    }

    pub fn set_parent_id(&mut self, parent_id: impl Into<String>) {
        self.parent_id = parent_id.into();
    }

    pub fn set_group_title(&mut self, group_title: bool) {
        self.group_title = group_title;
        if group_title {
            self.path.clear();
            self.has_submenus = false;
            self.submenus.clear();
        }
    }

    /// Returns false when refused (group titles cannot own submenus)
    pub fn set_has_submenus(&mut self, has_submenus: bool) -> bool {
        if has_submenus && self.group_title {
            return false;
        }
        self.has_submenus = has_submenus;
        if has_submenus {
            self.path.clear();
            if self.submenus.is_empty() {
                self.add_submenu();
            }
        } else {
            self.submenus.clear();
        }
        true
    }

    pub fn add_submenu(&mut self) -> TempId {
        let temp_id = TempId::generate();
        self.submenus.push(SubmenuRow {
            temp_id: temp_id.clone(),
            id: None,
            name: String::new(),
            icon: String::new(),
            path: String::new(),
            order: self.submenus.len() as i64 + 1,
        });
        temp_id
    }

    pub fn remove_submenu(&mut self, temp_id: &TempId) -> bool {
        let before = self.submenus.len();
        self.submenus.retain(|row| &row.temp_id != temp_id);
        self.submenus.len() != before
    }

    pub fn update_submenu(&mut self, temp_id: &TempId, field: SubmenuField) -> bool {
        let Some(row) = self.submenus.iter_mut().find(|row| &row.temp_id == temp_id) else {
            return false;
        };
        match field {
            SubmenuField::Name(name) => row.name = name,
            SubmenuField::Icon(icon) => row.icon = icon,
            SubmenuField::Path(path) => row.path = path,
            SubmenuField::Order(order) => row.order = order,
        }
        true
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::field_error("name", "Please fill in required fields"));
        }

        if self.has_submenus {
            if let Some(idx) = self.submenus.iter().position(|row| row.name.trim().is_empty()) {
                return Err(Error::field_error(
                    format!("submenus[{}].name", idx),
                    "Please fill in all submenu names",
                ));
            }
        }

        self.as_node().validate().map_err(|(name, reason)| {
            let field = if reason.contains("path") { "path" } else { "groupTitle" };
            Error::field_error(field, format!("{}: {}", name, reason))
        })
    }

    /// The parent exactly as entered, with the rows as its children
    fn as_node(&self) -> MenuNode {
        MenuNode {
            id: self.id.clone(),
            temp_id: self.temp_id.clone(),
            name: self.name.trim().to_string(),
            icon: self.icon.clone(),
            path: self.path.clone(),
            order: self.order,
            group_title: self.group_title,
            level: None,
            pro: None,
            parent_id: Some(self.parent_id.clone()),
            sub_items: self.submenu_nodes(),
        }
    }

    fn submenu_nodes(&self) -> Vec<MenuNode> {
        if !self.has_submenus {
            return Vec::new();
        }
        self.submenus
            .iter()
            .map(|row| MenuNode {
                id: row.id.clone(),
                temp_id: row.temp_id.clone(),
                name: row.name.trim().to_string(),
                icon: row.icon.clone(),
                path: row.path.clone(),
                order: row.order,
                group_title: false,
                level: None,
                pro: None,
                parent_id: None,
                sub_items: Vec::new(),
            })
            .collect()
    }

    /// Validate, then build the payload the create/update endpoints expect
    pub fn payload(&self) -> Result<MenuPayload> {
        self.validate()?;

        let parent = MenuNode {
            id: self.id.clone(),
            temp_id: self.temp_id.clone(),
            name: self.name.trim().to_string(),
            icon: self.icon.clone(),
            path: if self.has_submenus || self.group_title {
                String::new()
            } else {
                self.path.clone()
            },
            order: self.order,
            group_title: self.group_title,
            level: None,
            pro: None,
            parent_id: Some(self.parent_id.clone()),
            sub_items: Vec::new(),
        };

        Ok(MenuPayload { parent, submenus: self.submenu_nodes() })
    }

    /// Submit the form. On success the form is reset; on failure it is left
    /// as-is so the user can retry.
    pub async fn save<A: MenuApi + ?Sized>(&mut self, api: &A) -> Result<MenuNode> {
        let payload = self.payload()?;

        let saved = match self.id.clone() {
            Some(id) => {
                tracing::info!("Updating menu '{}' ({}) with {} submenus", payload.parent.name, id, payload.submenus.len());
                api.update_menu(&id, &payload).await?
            }
            None => {
                tracing::info!("Creating menu '{}' with {} submenus", payload.parent.name, payload.submenus.len());
                api.create_menu(&payload).await?
            }
        };

        self.reset();
        Ok(saved)
    }
}
