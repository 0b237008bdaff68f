use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::api::{ApiClient, AuthApi};
use crate::error::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfo {
    pub url: String,
    pub description: String,
    pub added_at: DateTime<Utc>,
    pub last_ping: Option<DateTime<Utc>>,
    pub status: ServerStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerStatus {
    Up,
    Down,
    Unknown,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    pub servers: HashMap<String, ServerInfo>,
    pub current_server: Option<String>,
}

/// Bearer token obtained by `auth login`, kept per server name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub email: String,
    pub token: String,
    pub logged_in_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    pub sessions: HashMap<String, AuthSession>,
}

/// Session key used when no named server is selected
pub const DEFAULT_SERVER: &str = "default";

impl ServerInfo {
    pub fn new(url: String, description: String) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            description,
            added_at: Utc::now(),
            last_ping: None,
            status: ServerStatus::Unknown,
        }
    }

    pub fn update_ping(&mut self, status: ServerStatus) {
        self.last_ping = Some(Utc::now());
        self.status = status;
    }
}

impl ServerStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ServerStatus::Up => "UP",
            ServerStatus::Down => "DOWN",
            ServerStatus::Unknown => "UNKNOWN",
        }
    }
}

pub fn get_config_dir() -> anyhow::Result<PathBuf> {
    let config_dir = if let Ok(custom_dir) = std::env::var("STAFFDESK_CONFIG_DIR") {
        PathBuf::from(custom_dir)
    } else {
        let home = std::env::var("HOME").map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
        PathBuf::from(home).join(".config").join("staffdesk")
    };

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

fn load_json<T: DeserializeOwned + Default>(file_name: &str) -> anyhow::Result<T> {
    let file = get_config_dir()?.join(file_name);
    if !file.exists() {
        return Ok(T::default());
    }
    let content = fs::read_to_string(file)?;
    Ok(serde_json::from_str(&content)?)
}

fn save_json<T: Serialize>(file_name: &str, value: &T) -> anyhow::Result<()> {
    let file = get_config_dir()?.join(file_name);
    fs::write(file, serde_json::to_string_pretty(value)?)?;
    Ok(())
}

pub fn load_server_config() -> anyhow::Result<ServerConfig> {
    load_json("server.json")
}

pub fn save_server_config(config: &ServerConfig) -> anyhow::Result<()> {
    save_json("server.json", config)
}

pub fn load_auth_config() -> anyhow::Result<AuthConfig> {
    load_json("auth.json")
}

pub fn save_auth_config(config: &AuthConfig) -> anyhow::Result<()> {
    save_json("auth.json", config)
}

/// Name and URL of the server commands should talk to. Falls back to the
/// URL from the environment when no server has been selected.
pub fn current_target() -> anyhow::Result<(String, String)> {
    let config = load_server_config()?;
    match config.current_server {
        Some(name) => {
            let info = config.servers.get(&name).ok_or_else(|| {
                Error::config(format!("Current server '{}' not found in configuration", name))
            })?;
            Ok((name, info.url.clone()))
        }
        None => Ok((DEFAULT_SERVER.to_string(), crate::config::config().api.base_url.clone())),
    }
}

/// API client for the current server, carrying its stored token if any
pub fn current_client() -> anyhow::Result<ApiClient> {
    let (name, url) = current_target()?;
    let token = load_auth_config()?.sessions.get(&name).map(|s| s.token.clone());
    let client = ApiClient::new(&url)?.with_token(token);
    if !client.has_token() {
        tracing::warn!("No stored token for server '{}'; run `staffdesk auth login` first", name);
    }
    Ok(client)
}

/// Id of the signed-in user, stamped as `created_by` on new records. Empty
/// when the profile cannot be read; the backend fills it in from the token.
pub async fn current_user_id(client: &ApiClient) -> String {
    match client.profile().await {
        Ok(profile) => profile.id,
        Err(e) => {
            tracing::warn!("Could not read profile for created_by: {}", e);
            String::new()
        }
    }
}

pub async fn ping_server(url: &str) -> ServerStatus {
    let client = reqwest::Client::new();

    // Any HTTP answer means the API is reachable; auth failures still count
    match client.get(url).timeout(std::time::Duration::from_secs(5)).send().await {
        Ok(response) if !response.status().is_server_error() => ServerStatus::Up,
        _ => ServerStatus::Down,
    }
}

#[derive(Debug, Deserialize)]
struct TokenClaims {
    exp: Option<i64>,
}

/// Expiry claim of a stored token. The signature is not checked here; the
/// API validates tokens on every request.
pub fn token_expiry(token: &str) -> Option<DateTime<Utc>> {
    let mut validation = jsonwebtoken::Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    let data = jsonwebtoken::decode::<TokenClaims>(
        token,
        &jsonwebtoken::DecodingKey::from_secret(&[]),
        &validation,
    )
    .ok()?;
    data.claims.exp.and_then(|exp| DateTime::from_timestamp(exp, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_expiry_reads_exp_claim() {
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &serde_json::json!({ "sub": "u1", "exp": 1_900_000_000 }),
            &jsonwebtoken::EncodingKey::from_secret(b"server-secret"),
        )
        .unwrap();

        let expiry = token_expiry(&token).unwrap();
        assert_eq!(expiry.timestamp(), 1_900_000_000);
    }

    #[test]
    fn test_token_expiry_rejects_garbage() {
        assert!(token_expiry("not-a-token").is_none());
    }

    #[test]
    fn test_missing_current_server_is_config_error() {
        let dir = std::env::temp_dir().join(format!("staffdesk-cfg-{}", uuid::Uuid::new_v4().simple()));
        std::env::set_var("STAFFDESK_CONFIG_DIR", &dir);

        let config = ServerConfig {
            servers: HashMap::new(),
            current_server: Some("gone".to_string()),
        };
        save_server_config(&config).unwrap();

        let err = current_target().unwrap_err();
        let err = err.downcast_ref::<Error>().expect("typed config error");
        assert_eq!(err.error_code(), "CONFIG_ERROR");
        assert!(err.to_string().contains("'gone'"));

        std::env::remove_var("STAFFDESK_CONFIG_DIR");
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_server_url_is_normalized() {
        let info = ServerInfo::new("https://example.com/api/".into(), String::new());
        assert_eq!(info.url, "https://example.com/api");
    }
}
