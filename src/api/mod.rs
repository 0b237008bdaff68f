//! Typed access to the staffing admin REST API.
//!
//! Each resource group is a trait so the editors and the menu store can be
//! driven by something other than HTTP in tests. [`ApiClient`] implements all
//! of them over `reqwest`.

pub mod client;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::allowlist::{AddressInput, AddressKind, AllowedAddress};
use crate::audit::{UserLog, UserLogQuery};
use crate::employee::{Employee, EmployeeInput, EmployeeQuery, EmployeeStatistics};
use crate::error::Result;
use crate::menu::MenuNode;
use crate::role::{PermissionAssignment, Profile, Role, RoleInput};
use crate::roster::{RosterSlot, SlotInput, StaffRoster, StaffRosterInput};
use crate::types::{DeleteResult, ListQuery, Page};

pub use client::ApiClient;

/// Body of the create/update menu endpoints: one parent plus its direct
/// children. The backend reconciles children against what it has stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuPayload {
    pub parent: MenuNode,
    pub submenus: Vec<MenuNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub user: Option<Profile>,
}

#[async_trait]
pub trait MenuApi: Send + Sync {
    async fn hierarchy(&self, query: &ListQuery) -> Result<Page<MenuNode>>;
    async fn create_menu(&self, payload: &MenuPayload) -> Result<MenuNode>;
    async fn update_menu(&self, id: &str, payload: &MenuPayload) -> Result<MenuNode>;
    async fn delete_menu(&self, id: &str) -> Result<()>;
    async fn delete_menus(&self, ids: &[String]) -> Result<DeleteResult>;
}

#[async_trait]
pub trait RoleApi: Send + Sync {
    async fn list_roles(&self, query: &ListQuery) -> Result<Page<Role>>;
    async fn get_role(&self, id: &str) -> Result<Role>;
    async fn create_role(&self, input: &RoleInput) -> Result<Role>;
    async fn update_role(&self, id: &str, input: &RoleInput) -> Result<Role>;
    async fn delete_role(&self, id: &str) -> Result<()>;
    async fn delete_roles(&self, ids: &[String]) -> Result<DeleteResult>;
    /// Replace the role's whole permission set. Last write wins.
    async fn assign_permissions(&self, assignment: &PermissionAssignment) -> Result<()>;
    async fn my_menus(&self) -> Result<Vec<MenuNode>>;
}

#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse>;
    async fn profile(&self) -> Result<Profile>;
}

#[async_trait]
pub trait UserLogApi: Send + Sync {
    async fn user_logs(&self, query: &UserLogQuery) -> Result<Page<UserLog>>;
}

#[async_trait]
pub trait EmployeeApi: Send + Sync {
    async fn list_employees(&self, query: &EmployeeQuery) -> Result<Page<Employee>>;
    async fn get_employee(&self, id: &str) -> Result<Employee>;
    async fn create_employee(&self, input: &EmployeeInput) -> Result<Employee>;
    async fn update_employee(&self, id: &str, input: &EmployeeInput) -> Result<Employee>;
    /// Soft delete; the record stays with `is_deleted` set
    async fn delete_employee(&self, id: &str) -> Result<()>;
    async fn purge_employee(&self, id: &str) -> Result<()>;
    async fn employee_statistics(&self) -> Result<EmployeeStatistics>;
}

#[async_trait]
pub trait RosterApi: Send + Sync {
    async fn list_slots(&self, query: &ListQuery) -> Result<Page<RosterSlot>>;
    async fn get_slot(&self, id: &str) -> Result<RosterSlot>;
    async fn create_slot(&self, input: &SlotInput) -> Result<RosterSlot>;
    async fn update_slot(&self, id: &str, input: &SlotInput) -> Result<RosterSlot>;
    async fn delete_slot(&self, id: &str) -> Result<()>;
    async fn delete_slots(&self, ids: &[String]) -> Result<DeleteResult>;

    async fn list_staff_rosters(&self, query: &ListQuery) -> Result<Page<StaffRoster>>;
    async fn get_staff_roster(&self, id: &str) -> Result<StaffRoster>;
    async fn create_staff_roster(&self, input: &StaffRosterInput) -> Result<StaffRoster>;
    async fn update_staff_roster(&self, id: &str, input: &StaffRosterInput) -> Result<StaffRoster>;
    async fn delete_staff_roster(&self, id: &str) -> Result<()>;
    async fn delete_staff_rosters(&self, ids: &[String]) -> Result<DeleteResult>;
}

/// The IP and MAC allow-lists are the same collection shape under two paths
#[async_trait]
pub trait AllowListApi: Send + Sync {
    async fn list_addresses(&self, kind: AddressKind, query: &ListQuery) -> Result<Page<AllowedAddress>>;
    async fn get_address(&self, kind: AddressKind, id: &str) -> Result<AllowedAddress>;
    async fn create_address(&self, kind: AddressKind, input: &AddressInput) -> Result<AllowedAddress>;
    async fn update_address(&self, kind: AddressKind, id: &str, input: &AddressInput) -> Result<AllowedAddress>;
    async fn delete_address(&self, kind: AddressKind, id: &str) -> Result<()>;
    async fn delete_addresses(&self, kind: AddressKind, ids: &[String]) -> Result<DeleteResult>;
}
