/// User activity log entries (`/user-logs`)

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserLog {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub module: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct UserLogQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    /// Restrict to entries created on this calendar day
    pub created_at: Option<NaiveDate>,
}

impl UserLogQuery {
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
        if let Some(date) = self.created_at {
            pairs.push(("createdAt", date.format("%Y-%m-%d").to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_pairs_skip_blank_search() {
        let query = UserLogQuery {
            page: Some(2),
            search: Some("  ".into()),
            created_at: NaiveDate::from_ymd_opt(2024, 3, 9),
            ..Default::default()
        };
        assert_eq!(
            query.to_pairs(),
            vec![("page", "2".to_string()), ("createdAt", "2024-03-09".to_string())]
        );
    }

    #[test]
    fn test_deserialize_log_entry() {
        let log: UserLog = serde_json::from_str(
            r#"{"_id":"l1","userId":"u1","username":"ops","description":"Updated role","createdAt":"2024-03-09T10:15:00.000Z"}"#,
        )
        .unwrap();
        assert_eq!(log.username, "ops");
        assert!(log.module.is_none());
    }
}
