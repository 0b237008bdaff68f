/// Roles, their menu grants, and the signed-in user's profile

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub permissions: Vec<RolePermission>,
}

/// One grant: access to exactly one menu node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RolePermission {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub menu_id: String,
    #[serde(default)]
    pub menu_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleInput {
    pub name: String,
    pub is_active: bool,
}

/// Full replacement of a role's grants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionAssignment {
    pub role_id: String,
    pub permissions: Vec<String>,
}

/// Menu grants as embedded in a profile's role object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuGrant {
    pub menu_id: String,
}

/// A profile's role is either a bare id or an expanded object with grants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoleRef {
    Id(String),
    Expanded {
        #[serde(rename = "_id", default)]
        id: Option<String>,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        permissions: Vec<MenuGrant>,
    },
}

impl RoleRef {
    pub fn permissions(&self) -> Option<&[MenuGrant]> {
        match self {
            RoleRef::Id(_) => None,
            RoleRef::Expanded { permissions, .. } => Some(permissions),
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            RoleRef::Id(id) => Some(id),
            RoleRef::Expanded { name, id, .. } => name.as_deref().or(id.as_deref()),
        }
    }
}

/// The authenticated employee as returned by `/auth/profile`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default, alias = "firstname")]
    pub first_name: String,
    #[serde(default, alias = "lastname")]
    pub last_name: String,
    #[serde(default, alias = "email")]
    pub email_address: String,
    #[serde(default)]
    pub is_super_admin: bool,
    #[serde(default)]
    pub role: Option<RoleRef>,
}

impl Profile {
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.email_address.clone()
        } else {
            full.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_ref_expanded() {
        let profile: Profile = serde_json::from_value(json!({
            "_id": "u1",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "role": { "_id": "r1", "name": "Admin", "permissions": [{ "menuId": "m1" }] }
        }))
        .unwrap();

        let role = profile.role.as_ref().unwrap();
        assert_eq!(role.name(), Some("Admin"));
        assert_eq!(role.permissions().unwrap().len(), 1);
        assert_eq!(profile.display_name(), "Ada Lovelace");
    }

    #[test]
    fn test_assignment_wire_shape() {
        let body = serde_json::to_value(PermissionAssignment {
            role_id: "r1".into(),
            permissions: vec!["m1".into()],
        })
        .unwrap();
        assert_eq!(body, json!({ "roleId": "r1", "permissions": ["m1"] }));
    }
}
