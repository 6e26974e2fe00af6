// src/models/server.rs
use serde::{Deserialize, Serialize};

pub const VANILLA_SOFTWARE: &str = "Vanilla";

/// Decoded full-status reply of a single query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motd: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub game_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub software: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plugins: Vec<String>,
    #[serde(rename = "rawplugins", skip_serializing_if = "Option::is_none")]
    pub raw_plugins: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map: Option<String>,
    pub current: u32,
    pub max: u32,
    pub port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub players: Vec<String>,
}

impl Default for ServerStatus {
    fn default() -> Self {
        Self {
            motd: None,
            game_type: None,
            version: None,
            software: VANILLA_SOFTWARE.to_string(),
            plugins: Vec::new(),
            raw_plugins: None,
            map: None,
            current: 0,
            max: 0,
            port: 0,
            host: None,
            players: Vec::new(),
        }
    }
}

impl ServerStatus {
    pub fn is_vanilla(&self) -> bool {
        self.raw_plugins.is_none()
    }
}
