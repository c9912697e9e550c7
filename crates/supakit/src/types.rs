use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use supakit_core::SupabaseConfig;

/// An account as the facade presents it.
///
/// Rebuilt from the backend's account record on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub email_verified: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A signed-in session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
    /// Unix timestamp (seconds).
    pub expires_at: i64,
}

/// The profile fields callers may change. Any other key is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl ProfileUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn first_name(mut self, value: impl Into<String>) -> Self {
        self.first_name = Some(value.into());
        self
    }

    pub fn last_name(mut self, value: impl Into<String>) -> Self {
        self.last_name = Some(value.into());
        self
    }

    pub fn avatar(mut self, value: impl Into<String>) -> Self {
        self.avatar = Some(value.into());
        self
    }

    /// The set fields as metadata entries (`firstName`, `lastName`, `avatar`).
    pub fn to_metadata(&self) -> Map<String, JsonValue> {
        let mut map = Map::new();
        let fields = [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("avatar", &self.avatar),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                map.insert(key.to_string(), JsonValue::String(value.clone()));
            }
        }
        map
    }
}

/// Result of a sign-up.
#[derive(Debug, Clone, PartialEq)]
pub struct SignUpOutcome {
    pub user: User,
    /// The address must be confirmed before the account is fully usable.
    pub needs_verification: bool,
}

/// Result of a sign-in.
#[derive(Debug, Clone, PartialEq)]
pub struct SignInOutcome {
    pub user: User,
    pub session: AuthSession,
}

/// Configuration for [`Supakit`](crate::Supakit).
///
/// Deserializes from `{"supabase": {"url": "...", "anonKey": "..."}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct FacadeConfig {
    pub supabase: SupabaseConfig,
}

impl FacadeConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            supabase: SupabaseConfig::new(url, anon_key),
        }
    }
}

impl From<SupabaseConfig> for FacadeConfig {
    fn from(supabase: SupabaseConfig) -> Self {
        Self { supabase }
    }
}
