//! Mojang account, profile and service status APIs.

pub mod http;

use log::{debug, info};
use parking_lot::RwLock;
use reqwest::header::{
    HeaderMap, HeaderValue, AUTHORIZATION, CACHE_CONTROL, CONNECTION, CONTENT_TYPE, COOKIE, PRAGMA,
};
use reqwest::{Client, Method};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::config::Config;
use crate::error::ApiError;
use crate::models::profile::{AuthResponse, Session};
use self::http::{build_http_client, send_json};

#[derive(Debug, Clone)]
pub struct Endpoints {
    pub auth: String,
    pub session: String,
    pub status: String,
    pub api: String,
    pub realms: String,
}

impl Endpoints {
    pub fn from_config(config: &Config) -> Self {
        Self {
            auth: config.auth_server.clone(),
            session: config.session_server.clone(),
            status: config.status_server.clone(),
            api: config.api_server.clone(),
            realms: config.realm_server.clone(),
        }
    }

    /// Points every endpoint at one base URL.
    pub fn all(base: &str) -> Self {
        Self {
            auth: base.to_string(),
            session: base.to_string(),
            status: base.to_string(),
            api: base.to_string(),
            realms: base.to_string(),
        }
    }
}

pub struct MojangClient {
    http: Client,
    endpoints: Endpoints,
    session: RwLock<Session>,
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue, ApiError> {
    HeaderValue::from_str(value).map_err(|_| ApiError::InvalidHeader(name))
}

impl MojangClient {
    pub fn new(config: &Config, session: Session) -> Result<Self, ApiError> {
        let http = build_http_client(config.http_timeout())?;
        Ok(Self::with_http_client(http, Endpoints::from_config(config), session))
    }

    pub fn with_http_client(http: Client, endpoints: Endpoints, session: Session) -> Self {
        Self {
            http,
            endpoints,
            session: RwLock::new(session),
        }
    }

    /// Snapshot of the current session, for persisting.
    pub fn session(&self) -> Session {
        self.session.read().clone()
    }

    pub async fn request(
        &self,
        method: Method,
        base: &str,
        path: &str,
        headers: HeaderMap,
        body: Option<&Value>,
    ) -> Result<Option<Value>, ApiError> {
        let url = format!("{}{}", base, path);
        send_json(&self.http, method, &url, headers, body).await
    }

    async fn get(&self, base: &str, path: &str, headers: HeaderMap) -> Result<Option<Value>, ApiError> {
        self.request(Method::GET, base, path, headers, None).await
    }

    /// Current state of the Mojang services. No authentication.
    pub async fn status(&self) -> Result<Option<Value>, ApiError> {
        self.get(&self.endpoints.status, "check", HeaderMap::new()).await
    }

    /// Profile id and name for a username. No authentication.
    pub async fn uuid(&self, username: &str) -> Result<Option<Value>, ApiError> {
        let path = format!("users/profiles/minecraft/{}", username);
        self.get(&self.endpoints.api, &path, HeaderMap::new()).await
    }

    /// Profile ids for several usernames at once. No authentication.
    pub async fn uuids(&self, usernames: &[String]) -> Result<Option<Value>, ApiError> {
        let body = json!(usernames);
        self.request(
            Method::POST,
            &self.endpoints.api,
            "profiles/minecraft",
            HeaderMap::new(),
            Some(&body),
        )
        .await
    }

    /// Name, skin and cape properties for a profile id. No authentication.
    pub async fn profile(&self, uuid: &str) -> Result<Option<Value>, ApiError> {
        let path = format!("session/minecraft/profile/{}", uuid);
        self.get(&self.endpoints.session, &path, HeaderMap::new()).await
    }

    /// Account details of the authenticated user.
    pub async fn user_info(&self) -> Result<Option<Value>, ApiError> {
        let token = self
            .session
            .read()
            .access_token
            .clone()
            .ok_or(ApiError::NotAuthenticated("access token"))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            header_value("Authorization", &format!("Bearer {}", token))?,
        );
        self.get(&self.endpoints.api, "user", headers).await
    }

    /// Realms the authenticated user can join.
    pub async fn realms(&self) -> Result<Option<Value>, ApiError> {
        self.ensure_uuid().await?;
        let headers = self.realm_headers()?;
        self.get(&self.endpoints.realms, "worlds", headers).await
    }

    /// Details of one realm; requires ownership.
    pub async fn realm(&self, id: u64) -> Result<Option<Value>, ApiError> {
        self.ensure_uuid().await?;
        let headers = self.realm_headers()?;
        let path = format!("worlds/{}", id);
        self.get(&self.endpoints.realms, &path, headers).await
    }

    /// Logs in with the account password and stores the returned tokens.
    pub async fn authenticate(&self, password: &str) -> Result<Option<Value>, ApiError> {
        let body = {
            let mut session = self.session.write();
            let client_token = session
                .client_token
                .get_or_insert_with(|| Uuid::new_v4().simple().to_string())
                .clone();
            let username = session
                .account_id
                .clone()
                .or_else(|| session.name.clone())
                .ok_or(ApiError::NotAuthenticated("account id"))?;

            json!({
                "clientToken": client_token,
                "username": username,
                "password": password,
                "agent": { "name": "Minecraft", "version": 1 }
            })
        };

        let result = self.auth("authenticate", &body).await?;
        self.store_tokens("authenticate", result.as_ref())?;
        Ok(result)
    }

    /// Exchanges the current access token for a fresh one.
    pub async fn refresh(&self) -> Result<Option<Value>, ApiError> {
        let body = {
            let session = self.session.read();
            json!({
                "clientToken": session.client_token,
                "accessToken": session.access_token,
            })
        };

        let result = self.auth("refresh", &body).await?;
        self.store_tokens("refresh", result.as_ref())?;
        Ok(result)
    }

    /// Succeeds with an empty reply when the access token is still valid.
    pub async fn validate(&self) -> Result<Option<Value>, ApiError> {
        let body = json!({ "accessToken": self.session.read().access_token });
        self.auth("validate", &body).await
    }

    pub async fn invalidate(&self) -> Result<Option<Value>, ApiError> {
        let body = {
            let session = self.session.read();
            json!({
                "clientToken": session.client_token,
                "accessToken": session.access_token,
            })
        };
        self.auth("invalidate", &body).await
    }

    /// Invalidates every access token of the account.
    pub async fn signout(&self, password: &str) -> Result<Option<Value>, ApiError> {
        let body = json!({
            "username": self.session.read().account_id,
            "password": password,
        });
        self.auth("signout", &body).await
    }

    async fn auth(&self, path: &str, body: &Value) -> Result<Option<Value>, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.request(Method::POST, &self.endpoints.auth, path, headers, Some(body))
            .await
    }

    fn store_tokens(&self, path: &str, result: Option<&Value>) -> Result<(), ApiError> {
        let value = result.ok_or(ApiError::MissingField("accessToken"))?;
        let response: AuthResponse =
            serde_json::from_value(value.clone()).map_err(|source| ApiError::Decode {
                url: format!("{}{}", self.endpoints.auth, path),
                source,
            })?;

        let mut session = self.session.write();
        session.access_token = Some(response.access_token);
        session.client_token = Some(response.client_token);
        if let Some(profile) = response.selected_profile {
            info!("Authenticated as {}", profile.name);
            session.name = Some(profile.name);
            session.uuid = Some(profile.id);
        }
        Ok(())
    }

    async fn ensure_uuid(&self) -> Result<(), ApiError> {
        let name = {
            let session = self.session.read();
            if session.uuid.is_some() {
                return Ok(());
            }
            session
                .name
                .clone()
                .ok_or(ApiError::NotAuthenticated("username"))?
        };

        let id = self
            .uuid(&name)
            .await?
            .as_ref()
            .and_then(|value| value.get("id"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(ApiError::MissingField("id"))?;

        debug!("Resolved {} to profile id {}", name, id);
        self.session.write().uuid = Some(id);
        Ok(())
    }

    fn realm_headers(&self) -> Result<HeaderMap, ApiError> {
        let cookie = {
            let session = self.session.read();
            format!(
                "sid=token:{}:{};user={};version=1",
                session.access_token.as_deref().unwrap_or_default(),
                session.uuid.as_deref().unwrap_or_default(),
                session.name.as_deref().unwrap_or_default(),
            )
        };

        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, header_value("Cookie", &cookie)?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
        Ok(headers)
    }
}
