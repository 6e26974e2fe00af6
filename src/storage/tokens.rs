// src/storage/tokens.rs
use log::debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::ApiError;
use crate::models::profile::Session;

/// JSON file holding the Mojang session between runs.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<Session>, ApiError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No token store at {:?}", self.path);
                return Ok(None);
            }
            Err(source) => {
                return Err(ApiError::Store {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&json)
            .map(Some)
            .map_err(|source| ApiError::StoreFormat {
                path: self.path.clone(),
                source,
            })
    }

    pub fn save(&self, session: &Session) -> Result<(), ApiError> {
        let store_err = |source| ApiError::Store {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(store_err)?;
        }

        let json = serde_json::to_string_pretty(session).map_err(|source| ApiError::StoreFormat {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, json).map_err(store_err)?;

        debug!("Saved session tokens to {:?}", self.path);
        Ok(())
    }
}
