use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use url::Url;

use super::{
    AllowListApi, AuthApi, EmployeeApi, LoginRequest, LoginResponse, MenuApi, MenuPayload, RoleApi, RosterApi,
    UserLogApi,
};
use crate::allowlist::{AddressInput, AddressKind, AllowedAddress};
use crate::audit::{UserLog, UserLogQuery};
use crate::employee::{Employee, EmployeeInput, EmployeeQuery, EmployeeStatistics};
use crate::error::{Error, Result};
use crate::menu::MenuNode;
use crate::role::{PermissionAssignment, Profile, Role, RoleInput};
use crate::roster::{RosterSlot, SlotInput, StaffRoster, StaffRosterInput};
use crate::types::{DeleteMany, DeleteResult, ListQuery, Page};

/// HTTP client for the admin API. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(crate::config::config().api.timeout_secs))
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        // Url::join replaces the last segment unless the base ends with '/'
        let base_url = Url::parse(&format!("{}/", base_url.trim_end_matches('/')))?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(Error::Transport)?;

        Ok(Self { http, base_url, token: None })
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.url(path)?;
        if crate::config::config().api.debug_http {
            tracing::debug!("{} {}", method, url);
        }
        let builder = self.http.request(method, url);
        Ok(match self.token {
            Some(ref token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = error_message(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
            tracing::error!("API error {}: {}", status.as_u16(), message);
            return Err(Error::server(status.as_u16(), message));
        }

        // Acknowledgement endpoints may answer with an empty body
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::from_value(Value::Null)?);
        }
        Ok(serde_json::from_slice(&body)?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        self.send(self.request(Method::GET, path)?.query(query)).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        self.send(self.request(Method::POST, path)?.json(body)).await
    }

    async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        self.send(self.request(Method::PATCH, path)?.json(body)).await
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let _: Value = self.send(self.request(Method::DELETE, path)?).await?;
        Ok(())
    }

    /// Single-record fetch; some endpoints answer a missing id with 200 and
    /// an empty body
    async fn get_one<T: DeserializeOwned>(&self, path: &str, what: &str) -> Result<T> {
        let record: Option<T> = self.get(path, &[]).await?;
        record.ok_or_else(|| Error::not_found(format!("{} not found", what)))
    }

    async fn delete_many(&self, resource: &str, ids: &[String]) -> Result<DeleteResult> {
        self.post(&format!("{}/delete-many", resource), &DeleteMany { ids: ids.to_vec() }).await
    }
}

/// Pull a readable message out of an error body. NestJS-style backends send
/// either a string or an array of validation messages.
fn error_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    match value.get("message")? {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join("; "),
        ),
        _ => None,
    }
}

/// `my-menus` has been seen both bare and wrapped in a page envelope
#[derive(Deserialize)]
#[serde(untagged)]
enum MenuList {
    Paged(Page<MenuNode>),
    Plain(Vec<MenuNode>),
}

#[async_trait]
impl MenuApi for ApiClient {
    async fn hierarchy(&self, query: &ListQuery) -> Result<Page<MenuNode>> {
        self.get("menu/hierarchy", &query.to_pairs()).await
    }

    async fn create_menu(&self, payload: &MenuPayload) -> Result<MenuNode> {
        self.post("menu", payload).await
    }

    async fn update_menu(&self, id: &str, payload: &MenuPayload) -> Result<MenuNode> {
        self.patch(&format!("menu/{}", id), payload).await
    }

    async fn delete_menu(&self, id: &str) -> Result<()> {
        self.delete(&format!("menu/{}", id)).await
    }

    async fn delete_menus(&self, ids: &[String]) -> Result<DeleteResult> {
        self.delete_many("menu", ids).await
    }
}

#[async_trait]
impl RoleApi for ApiClient {
    async fn list_roles(&self, query: &ListQuery) -> Result<Page<Role>> {
        self.get("role", &query.to_pairs()).await
    }

    async fn get_role(&self, id: &str) -> Result<Role> {
        self.get_one(&format!("role/{}", id), &format!("Role '{}'", id)).await
    }

    async fn create_role(&self, input: &RoleInput) -> Result<Role> {
        self.post("role", input).await
    }

    async fn update_role(&self, id: &str, input: &RoleInput) -> Result<Role> {
        self.patch(&format!("role/{}", id), input).await
    }

    async fn delete_role(&self, id: &str) -> Result<()> {
        self.delete(&format!("role/{}", id)).await
    }

    async fn delete_roles(&self, ids: &[String]) -> Result<DeleteResult> {
        self.delete_many("role", ids).await
    }

    async fn assign_permissions(&self, assignment: &PermissionAssignment) -> Result<()> {
        let _: Value = self.post("role-permission/assign", assignment).await?;
        Ok(())
    }

    async fn my_menus(&self) -> Result<Vec<MenuNode>> {
        let menus: MenuList = self.get("role-permission/my-menus", &[]).await?;
        Ok(match menus {
            MenuList::Paged(page) => page.data,
            MenuList::Plain(list) => list,
        })
    }
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.post("auth/login", &body).await
    }

    async fn profile(&self) -> Result<Profile> {
        self.get("auth/profile", &[]).await
    }
}

#[async_trait]
impl UserLogApi for ApiClient {
    async fn user_logs(&self, query: &UserLogQuery) -> Result<Page<UserLog>> {
        self.get("user-logs", &query.to_pairs()).await
    }
}

#[async_trait]
impl EmployeeApi for ApiClient {
    async fn list_employees(&self, query: &EmployeeQuery) -> Result<Page<Employee>> {
        self.get("employee", &query.to_pairs()).await
    }

    async fn get_employee(&self, id: &str) -> Result<Employee> {
        self.get_one(&format!("employee/{}", id), &format!("Employee '{}'", id)).await
    }

    async fn create_employee(&self, input: &EmployeeInput) -> Result<Employee> {
        self.post("employee", input).await
    }

    async fn update_employee(&self, id: &str, input: &EmployeeInput) -> Result<Employee> {
        self.patch(&format!("employee/{}", id), input).await
    }

    async fn delete_employee(&self, id: &str) -> Result<()> {
        self.delete(&format!("employee/{}", id)).await
    }

    async fn purge_employee(&self, id: &str) -> Result<()> {
        self.delete(&format!("employee/{}/permanent", id)).await
    }

    async fn employee_statistics(&self) -> Result<EmployeeStatistics> {
        self.get("employee/statistics", &[]).await
    }
}

#[async_trait]
impl RosterApi for ApiClient {
    async fn list_slots(&self, query: &ListQuery) -> Result<Page<RosterSlot>> {
        self.get("roster", &query.to_pairs()).await
    }

    async fn get_slot(&self, id: &str) -> Result<RosterSlot> {
        self.get_one(&format!("roster/{}", id), &format!("Slot '{}'", id)).await
    }

    async fn create_slot(&self, input: &SlotInput) -> Result<RosterSlot> {
        self.post("roster", input).await
    }

    async fn update_slot(&self, id: &str, input: &SlotInput) -> Result<RosterSlot> {
        self.patch(&format!("roster/{}", id), input).await
    }

    async fn delete_slot(&self, id: &str) -> Result<()> {
        self.delete(&format!("roster/{}", id)).await
    }

    async fn delete_slots(&self, ids: &[String]) -> Result<DeleteResult> {
        self.delete_many("roster", ids).await
    }

    async fn list_staff_rosters(&self, query: &ListQuery) -> Result<Page<StaffRoster>> {
        self.get("staff-roster", &query.to_pairs()).await
    }

    async fn get_staff_roster(&self, id: &str) -> Result<StaffRoster> {
        self.get_one(&format!("staff-roster/{}", id), &format!("Staff roster '{}'", id)).await
    }

    async fn create_staff_roster(&self, input: &StaffRosterInput) -> Result<StaffRoster> {
        self.post("staff-roster", input).await
    }

    async fn update_staff_roster(&self, id: &str, input: &StaffRosterInput) -> Result<StaffRoster> {
        self.patch(&format!("staff-roster/{}", id), input).await
    }

    async fn delete_staff_roster(&self, id: &str) -> Result<()> {
        self.delete(&format!("staff-roster/{}", id)).await
    }

    async fn delete_staff_rosters(&self, ids: &[String]) -> Result<DeleteResult> {
        self.delete_many("staff-roster", ids).await
    }
}

#[async_trait]
impl AllowListApi for ApiClient {
    async fn list_addresses(&self, kind: AddressKind, query: &ListQuery) -> Result<Page<AllowedAddress>> {
        self.get(kind.resource(), &query.to_pairs()).await
    }

    async fn get_address(&self, kind: AddressKind, id: &str) -> Result<AllowedAddress> {
        self.get_one(&format!("{}/{}", kind.resource(), id), &format!("{} '{}'", kind.label(), id))
            .await
    }

    async fn create_address(&self, kind: AddressKind, input: &AddressInput) -> Result<AllowedAddress> {
        self.post(kind.resource(), input).await
    }

    async fn update_address(&self, kind: AddressKind, id: &str, input: &AddressInput) -> Result<AllowedAddress> {
        self.patch(&format!("{}/{}", kind.resource(), id), input).await
    }

    async fn delete_address(&self, kind: AddressKind, id: &str) -> Result<()> {
        self.delete(&format!("{}/{}", kind.resource(), id)).await
    }

    async fn delete_addresses(&self, kind: AddressKind, ids: &[String]) -> Result<DeleteResult> {
        self.delete_many(kind.resource(), ids).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_join_keeps_base_path() {
        let client = ApiClient::with_timeout("https://example.com/api", Duration::from_secs(1)).unwrap();
        assert_eq!(client.url("/menu/hierarchy").unwrap().as_str(), "https://example.com/api/menu/hierarchy");
        assert_eq!(client.url("role/r1").unwrap().as_str(), "https://example.com/api/role/r1");
    }

    #[test]
    fn test_error_message_variants() {
        assert_eq!(error_message(br#"{"message":"Role not found"}"#).as_deref(), Some("Role not found"));
        assert_eq!(
            error_message(br#"{"message":["name must be a string","name should not be empty"]}"#).as_deref(),
            Some("name must be a string; name should not be empty")
        );
        assert_eq!(error_message(b"<html>"), None);
    }
}
