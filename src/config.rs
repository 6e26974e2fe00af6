use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::query::DEFAULT_QUERY_PORT;

pub const AUTH_SERVER: &str = "https://authserver.mojang.com/";
pub const SESSION_SERVER: &str = "https://sessionserver.mojang.com/";
pub const STATUS_SERVER: &str = "https://status.mojang.com/";
pub const API_SERVER: &str = "https://api.mojang.com/";
pub const REALM_SERVER: &str = "https://mcoapi.minecraft.net/";

#[derive(Debug, Clone)]
pub struct Config {
    // Query client
    pub query_timeout_ms: u64,
    pub default_query_port: u16,

    // Mojang endpoints
    pub auth_server: String,
    pub session_server: String,
    pub status_server: String,
    pub api_server: String,
    pub realm_server: String,
    pub http_timeout_secs: u64,

    // Account
    pub username: Option<String>,
    pub account_id: Option<String>,
    pub token_store: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            query_timeout_ms: 1000,
            default_query_port: DEFAULT_QUERY_PORT,
            auth_server: AUTH_SERVER.to_string(),
            session_server: SESSION_SERVER.to_string(),
            status_server: STATUS_SERVER.to_string(),
            api_server: API_SERVER.to_string(),
            realm_server: REALM_SERVER.to_string(),
            http_timeout_secs: 10,
            username: None,
            account_id: None,
            token_store: PathBuf::from("auth-tokens.json"),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            query_timeout_ms: env::var("MCSTAT_QUERY_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.query_timeout_ms),

            default_query_port: env::var("MCSTAT_QUERY_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.default_query_port),

            auth_server: env::var("MOJANG_AUTH_SERVER").unwrap_or(defaults.auth_server),
            session_server: env::var("MOJANG_SESSION_SERVER").unwrap_or(defaults.session_server),
            status_server: env::var("MOJANG_STATUS_SERVER").unwrap_or(defaults.status_server),
            api_server: env::var("MOJANG_API_SERVER").unwrap_or(defaults.api_server),
            realm_server: env::var("MOJANG_REALM_SERVER").unwrap_or(defaults.realm_server),

            http_timeout_secs: env::var("MCSTAT_HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.http_timeout_secs),

            username: env::var("MOJANG_USERNAME").ok().filter(|v| !v.is_empty()),
            account_id: env::var("MOJANG_ACCOUNT").ok().filter(|v| !v.is_empty()),

            token_store: env::var("MCSTAT_TOKEN_STORE")
                .map(PathBuf::from)
                .unwrap_or(defaults.token_store),
        }
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}
