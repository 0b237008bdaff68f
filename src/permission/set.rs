use std::collections::HashSet;

use crate::role::{Profile, Role};

/// Flat set of menu ids a role may open. Membership is per node: granting a
/// parent says nothing about its children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet {
    ids: HashSet<String>,
}

impl PermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_role(role: &Role) -> Self {
        role.permissions.iter().map(|p| p.menu_id.clone()).collect()
    }

    /// Permissions of the signed-in user. A role given only by id carries no grants.
    pub fn from_profile(profile: &Profile) -> Self {
        match profile.role.as_ref().and_then(|r| r.permissions()) {
            Some(grants) => grants.iter().map(|g| g.menu_id.clone()).collect(),
            None => Self::default(),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.ids.insert(id.into())
    }

    pub fn remove(&mut self, id: &str) -> bool {
        self.ids.remove(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn to_sorted_vec(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.ids.iter().cloned().collect();
        ids.sort();
        ids
    }
}

impl<S: Into<String>> FromIterator<S> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter
                .into_iter()
                .map(Into::into)
                .filter(|id: &String| !id.is_empty())
                .collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for PermissionSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.ids.extend(iter.into_iter().map(Into::into).filter(|id: &String| !id.is_empty()));
    }
}
