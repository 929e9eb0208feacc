//! User profile store
//!
//! Per-user `preferences` blob, upserted on update and defaulted to an empty
//! object on first read.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use tokio::sync::RwLock;

use crate::error::AppError;

/// Stored profile record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: String,
    pub preferences: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserProfile {
    /// Profile returned for a user that never saved preferences.
    pub fn empty(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            preferences: json!({}),
            updated_at: None,
        }
    }
}

/// Key-value-by-user-id profile storage.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get(&self, user_id: &str) -> Result<Option<UserProfile>, AppError>;

    /// Inserts or replaces the preferences of `user_id`.
    async fn upsert(&self, user_id: &str, preferences: Value) -> Result<UserProfile, AppError>;
}

#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<HashMap<String, UserProfile>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn get(&self, user_id: &str) -> Result<Option<UserProfile>, AppError> {
        Ok(self.profiles.read().await.get(user_id).cloned())
    }

    async fn upsert(&self, user_id: &str, preferences: Value) -> Result<UserProfile, AppError> {
        let profile = UserProfile {
            user_id: user_id.to_string(),
            preferences,
            updated_at: Some(Utc::now()),
        };
        self.profiles
            .write()
            .await
            .insert(user_id.to_string(), profile.clone());
        Ok(profile)
    }
}
