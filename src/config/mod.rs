use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub menu: MenuConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub debug_http: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuConfig {
    /// Page size used when fetching the full hierarchy
    pub hierarchy_limit: u32,
    pub default_icon: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("STAFFDESK_API_URL") {
            if !v.trim().is_empty() {
                self.api.base_url = v.trim().trim_end_matches('/').to_string();
            }
        }
        if let Ok(v) = env::var("STAFFDESK_TIMEOUT_SECS") {
            self.api.timeout_secs = v.parse().unwrap_or(self.api.timeout_secs);
        }
        if let Ok(v) = env::var("STAFFDESK_DEBUG_HTTP") {
            self.api.debug_http = v.parse().unwrap_or(self.api.debug_http);
        }
        if let Ok(v) = env::var("STAFFDESK_PAGE_LIMIT") {
            self.menu.hierarchy_limit = v.parse().unwrap_or(self.menu.hierarchy_limit);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                base_url: "http://localhost:3000/api".to_string(),
                timeout_secs: 30,
                debug_http: true,
            },
            menu: MenuConfig {
                hierarchy_limit: 100,
                default_icon: "LocalTaxi".to_string(),
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            api: ApiConfig {
                base_url: "https://staging.tiptopdevelopers.com.au/api".to_string(),
                timeout_secs: 15,
                debug_http: false,
            },
            menu: MenuConfig {
                hierarchy_limit: 100,
                default_icon: "LocalTaxi".to_string(),
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                base_url: "https://tiptopdevelopers.com.au/api".to_string(),
                timeout_secs: 10,
                debug_http: false,
            },
            menu: MenuConfig {
                hierarchy_limit: 100,
                default_icon: "LocalTaxi".to_string(),
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[macro_export]
macro_rules! is_development {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Development)
    };
}
