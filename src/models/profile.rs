// src/models/profile.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account state kept between Mojang calls. These fields are what gets persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub name: Option<String>,
    pub uuid: Option<String>,
    pub account_id: Option<String>,
    pub access_token: Option<String>,
    pub client_token: Option<String>,
}

impl Session {
    pub fn new(name: Option<String>, account_id: Option<String>) -> Self {
        Self {
            name,
            account_id,
            ..Self::default()
        }
    }

    /// Fills fields that are unset here from `other`.
    pub fn merge_missing(&mut self, other: Session) {
        self.name = self.name.take().or(other.name);
        self.uuid = self.uuid.take().or(other.uuid);
        self.account_id = self.account_id.take().or(other.account_id);
        self.access_token = self.access_token.take().or(other.access_token);
        self.client_token = self.client_token.take().or(other.client_token);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameProfile {
    pub id: String,
    pub name: String,
}

impl GameProfile {
    /// Mojang returns ids without dashes; this gives the usual 8-4-4-4-12 form.
    pub fn hyphenated_id(&self) -> Option<String> {
        Uuid::parse_str(&self.id)
            .ok()
            .map(|id| id.hyphenated().to_string())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub client_token: String,
    pub selected_profile: Option<GameProfile>,
}
