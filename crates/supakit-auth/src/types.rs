use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

/// A user session returned from sign-in, sign-up, or token refresh.
///
/// Matches the Supabase GoTrue session object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expires_in: i64,
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user: User,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl Session {
    /// Fill `expires_at` from `expires_in` when the server left it out.
    pub fn with_expiry_from(mut self, now: i64) -> Self {
        if self.expires_at.is_none() {
            self.expires_at = Some(now + self.expires_in);
        }
        self
    }

    /// Whether the session expires within `margin_secs` of `now`.
    pub fn expires_within(&self, now: i64, margin_secs: i64) -> bool {
        match self.expires_at {
            Some(at) => at <= now + margin_secs,
            None => false,
        }
    }
}

/// A GoTrue user object.
///
/// Matches the Supabase `User` type from the JS/C# client libraries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub aud: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email_confirmed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub confirmation_sent_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_sign_in_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub user_metadata: Option<JsonValue>,
    #[serde(default)]
    pub app_metadata: Option<JsonValue>,
    #[serde(default)]
    pub is_anonymous: Option<bool>,
}

/// Response from sign-up and sign-in.
///
/// Mirrors Supabase JS `AuthResponse`: contains an optional session and/or user.
/// Either may be missing when the server answers with an unexpected shape.
#[derive(Debug, Clone, Default)]
pub struct AuthResponse {
    pub session: Option<Session>,
    pub user: Option<User>,
}

/// Every field of a token grant, all optional so that a partial body
/// still parses.
#[derive(Debug, Default, Deserialize)]
struct TokenGrant {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    user: Option<User>,
}

impl AuthResponse {
    /// Interpret a GoTrue body.
    ///
    /// A body carrying `access_token` is a session; a body carrying `user`
    /// or a top-level `id` is a bare user (sign-up awaiting confirmation).
    pub fn from_body(body: JsonValue, now: i64) -> Result<Self, serde_json::Error> {
        if body.get("access_token").is_some() {
            let grant: TokenGrant = serde_json::from_value(body)?;
            let user = grant.user.clone();
            let session = match (grant.access_token, grant.refresh_token, grant.user) {
                (Some(access_token), Some(refresh_token), Some(user)) => Some(
                    Session {
                        access_token,
                        refresh_token,
                        expires_in: grant.expires_in.unwrap_or_default(),
                        expires_at: grant.expires_at,
                        token_type: grant.token_type.unwrap_or_else(default_token_type),
                        user,
                    }
                    .with_expiry_from(now),
                ),
                _ => None,
            };
            return Ok(Self { session, user });
        }

        if let Some(user) = body.get("user") {
            if user.is_null() {
                return Ok(Self::default());
            }
            return Ok(Self {
                session: None,
                user: Some(serde_json::from_value(user.clone())?),
            });
        }

        if body.get("id").is_some() {
            return Ok(Self {
                session: None,
                user: Some(serde_json::from_value(body)?),
            });
        }

        Ok(Self::default())
    }
}

/// Scope for sign-out operations.
///
/// Matches `SignOutScope` from Supabase JS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignOutScope {
    /// Sign out from the current session only.
    Local,
    /// Sign out from all other sessions (keep current).
    Others,
    /// Sign out from all sessions including current.
    Global,
}

impl fmt::Display for SignOutScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Others => write!(f, "others"),
            Self::Global => write!(f, "global"),
        }
    }
}
