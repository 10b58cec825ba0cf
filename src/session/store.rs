// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::ApiError;
use crate::models::User;

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const EXPIRES_AT_KEY: &str = "expiresAt";
pub const USER_KEY: &str = "user";
pub const SESSION_KEYS: [&str; 4] = [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, EXPIRES_AT_KEY, USER_KEY];

/// Not part of the session; survives logout.
pub const WORKSPACE_KEY: &str = "currentWorkspaceId";

pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, ApiError>;
    fn set(&self, key: &str, value: &str) -> Result<(), ApiError>;
    fn remove(&self, key: &str) -> Result<(), ApiError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
    /// Epoch seconds.
    pub expires_at: i64,
}

/// `Ok(None)` when any key is missing or a value doesn't parse.
pub fn load_session(store: &dyn SessionStore) -> Result<Option<Session>, ApiError> {
    let mut values = Vec::with_capacity(SESSION_KEYS.len());
    for key in SESSION_KEYS {
        match store.get(key)? {
            Some(v) if !v.is_empty() => values.push(v),
            _ => return Ok(None),
        }
    }
    let user_json = values.pop().unwrap_or_default();
    let expires_raw = values.pop().unwrap_or_default();
    let refresh_token = values.pop().unwrap_or_default();
    let access_token = values.pop().unwrap_or_default();

    let Ok(expires_at) = expires_raw.trim().parse::<i64>() else {
        log::warn!("stored expiry '{}' is not a timestamp", expires_raw);
        return Ok(None);
    };
    let user: User = match serde_json::from_str(&user_json) {
        Ok(u) => u,
        Err(e) => {
            log::warn!("stored user record unreadable: {}", e);
            return Ok(None);
        }
    };
    Ok(Some(Session {
        user,
        access_token,
        refresh_token,
        expires_at,
    }))
}

pub fn save_session(store: &dyn SessionStore, session: &Session) -> Result<(), ApiError> {
    store.set(ACCESS_TOKEN_KEY, &session.access_token)?;
    store.set(REFRESH_TOKEN_KEY, &session.refresh_token)?;
    store.set(EXPIRES_AT_KEY, &session.expires_at.to_string())?;
    store.set(USER_KEY, &serde_json::to_string(&session.user)?)?;
    Ok(())
}

/// Removes every session key, attempting all of them even if one fails.
pub fn clear_session(store: &dyn SessionStore) -> Result<(), ApiError> {
    let mut first_err = None;
    for key in SESSION_KEYS {
        if let Err(e) = store.remove(key) {
            first_err.get_or_insert(e);
        }
    }
    match first_err {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, ApiError> {
        let m = self
            .entries
            .lock()
            .map_err(|_| ApiError::Storage("store lock poisoned".into()))?;
        Ok(m.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ApiError> {
        let mut m = self
            .entries
            .lock()
            .map_err(|_| ApiError::Storage("store lock poisoned".into()))?;
        m.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), ApiError> {
        let mut m = self
            .entries
            .lock()
            .map_err(|_| ApiError::Storage("store lock poisoned".into()))?;
        m.remove(key);
        Ok(())
    }
}
