//! Employee records (`/employee`) and the rules applied before saving one

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::role::RoleRef;

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkStatus {
    #[default]
    Working,
    Resigned,
    Terminated,
}

impl WorkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkStatus::Working => "Working",
            WorkStatus::Resigned => "Resigned",
            WorkStatus::Terminated => "Terminated",
        }
    }
}

impl fmt::Display for WorkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for WorkStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "working" => Ok(WorkStatus::Working),
            "resigned" => Ok(WorkStatus::Resigned),
            "terminated" => Ok(WorkStatus::Terminated),
            other => Err(Error::validation(format!(
                "Unknown work status '{}' (expected Working, Resigned or Terminated)",
                other
            ))),
        }
    }
}

/// An employee as stored by the backend. Bank, document and contact fields
/// are carried through untouched in `details`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "firstName", default)]
    pub first_name: String,
    #[serde(rename = "lastName", default)]
    pub last_name: String,
    #[serde(rename = "emailAddress", default)]
    pub email_address: String,
    #[serde(default)]
    pub role: Option<RoleRef>,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub user_phone: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub joining_date: String,
    #[serde(default)]
    pub work_status: WorkStatus,
    #[serde(default)]
    pub resigned_date: Option<String>,
    #[serde(rename = "monthlySalary", default, deserialize_with = "string_or_number")]
    pub monthly_salary: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(rename = "isSuperAdmin", default)]
    pub is_super_admin: bool,
    #[serde(rename = "isActive", default)]
    pub is_active: bool,
    #[serde(default)]
    pub created_by: String,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl Employee {
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if !full.is_empty() {
            full.to_string()
        } else if !self.full_name.is_empty() {
            self.full_name.clone()
        } else {
            self.email_address.clone()
        }
    }
}

// Salaries have been stored both as strings and as numbers
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(de::Error::custom(format!("expected string or number, got {}", other))),
    }
}

/// Partial employee body for create and update. Unset fields are omitted
/// from the request so an update only touches what was given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeInput {
    #[serde(rename = "firstName", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(rename = "emailAddress", skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Role id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joining_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_status: Option<WorkStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resigned_date: Option<String>,
    #[serde(rename = "monthlySalary", skip_serializing_if = "Option::is_none")]
    pub monthly_salary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "isActive", skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl EmployeeInput {
    /// Normalize and check the body before it is sent.
    ///
    /// `existing` is the stored record on update and `None` on create. A new
    /// employee needs a name, an email and a password; an update may leave
    /// any of them out, and a blank password keeps the stored one.
    pub fn prepare(mut self, existing: Option<&Employee>) -> Result<Self> {
        trim_opt(&mut self.first_name);
        trim_opt(&mut self.last_name);
        trim_opt(&mut self.email_address);
        trim_opt(&mut self.monthly_salary);
        self.password = self.password.filter(|p| !p.trim().is_empty());

        if existing.is_none() {
            if self.first_name.is_none() {
                return Err(Error::field_error("firstName", "First name is required"));
            }
            if self.last_name.is_none() {
                return Err(Error::field_error("lastName", "Last name is required"));
            }
            if self.email_address.is_none() {
                return Err(Error::field_error("emailAddress", "Email address is required"));
            }
            if self.password.is_none() {
                return Err(Error::field_error("password", "Password is required for new employees"));
            }
        }

        if let Some(ref email) = self.email_address {
            if !looks_like_email(email) {
                return Err(Error::validation(format!("'{}' is not a valid email address", email)));
            }
        }

        if let Some(ref password) = self.password {
            if password.chars().count() < MIN_PASSWORD_LEN {
                return Err(Error::field_error(
                    "password",
                    format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
                ));
            }
        }

        if let Some(ref salary) = self.monthly_salary {
            match salary.parse::<f64>() {
                Ok(value) if value >= 0.0 && value.is_finite() => {}
                _ => {
                    return Err(Error::field_error(
                        "monthlySalary",
                        format!("Monthly salary '{}' is not a non-negative number", salary),
                    ))
                }
            }
        }

        let status = self
            .work_status
            .or_else(|| existing.map(|e| e.work_status))
            .unwrap_or_default();
        if status == WorkStatus::Working {
            self.resigned_date = None;
        }

        Ok(self)
    }
}

fn trim_opt(value: &mut Option<String>) {
    *value = value
        .take()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}

#[derive(Debug, Clone, Default)]
pub struct EmployeeQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub work_status: Option<WorkStatus>,
    pub category: Option<String>,
}

impl EmployeeQuery {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(ref search) = self.search {
            if !search.trim().is_empty() {
                pairs.push(("search", search.trim().to_string()));
            }
        }
        if let Some(status) = self.work_status {
            pairs.push(("work_status", status.as_str().to_string()));
        }
        if let Some(ref category) = self.category {
            if !category.trim().is_empty() {
                pairs.push(("category", category.trim().to_string()));
            }
        }
        pairs
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeStatistics {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub working: u64,
    #[serde(default)]
    pub resigned: u64,
    #[serde(default)]
    pub super_admins: u64,
}
