//! Translation from backend account records to [`User`] / [`AuthSession`].

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;

use supakit_auth::{Session, User as AccountUser};

use crate::types::{AuthSession, User};

/// The parts of a backend account record that the mapping reads.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccountRecord<'a> {
    pub id: &'a str,
    pub email: Option<&'a str>,
    pub user_metadata: Option<&'a JsonValue>,
    pub email_confirmed_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl<'a> From<&'a AccountUser> for AccountRecord<'a> {
    fn from(user: &'a AccountUser) -> Self {
        Self {
            id: &user.id,
            email: user.email.as_deref(),
            user_metadata: user.user_metadata.as_ref(),
            email_confirmed_at: user.email_confirmed_at,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

const FIRST_NAME_KEYS: [&str; 2] = ["firstName", "first_name"];
const LAST_NAME_KEYS: [&str; 2] = ["lastName", "last_name"];
const AVATAR_KEYS: [&str; 2] = ["avatar", "avatar_url"];

/// Build a [`User`] from an account record.
///
/// Each profile field takes the first of its metadata keys that holds a
/// non-empty string, camelCase key first.
pub fn map_user(account: &AccountRecord<'_>) -> User {
    let meta = account.user_metadata;
    User {
        id: account.id.to_string(),
        email: account.email.unwrap_or_default().to_string(),
        first_name: metadata_string(meta, &FIRST_NAME_KEYS),
        last_name: metadata_string(meta, &LAST_NAME_KEYS),
        avatar: metadata_string(meta, &AVATAR_KEYS),
        email_verified: account.email_confirmed_at.is_some(),
        created_at: account.created_at,
        updated_at: account.updated_at,
    }
}

pub fn map_account(user: &AccountUser) -> User {
    map_user(&AccountRecord::from(user))
}

/// Build an [`AuthSession`]. A session without `expires_at` expires
/// `expires_in` seconds after `now`.
pub fn map_session(session: &Session, now: i64) -> AuthSession {
    AuthSession {
        user: map_account(&session.user),
        access_token: session.access_token.clone(),
        refresh_token: session.refresh_token.clone(),
        expires_at: session.expires_at.unwrap_or(now + session.expires_in),
    }
}

fn metadata_string(meta: Option<&JsonValue>, keys: &[&str]) -> Option<String> {
    let meta = meta?;
    keys.iter()
        .filter_map(|key| meta.get(*key).and_then(JsonValue::as_str))
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ts(s: &str) -> Option<DateTime<Utc>> {
        Some(s.parse().unwrap())
    }

    #[test]
    fn avatar_url_fallback() {
        let meta = json!({"avatar_url": "https://cdn/a.png"});
        let user = map_user(&AccountRecord {
            id: "u1",
            email: Some("ada@example.com"),
            user_metadata: Some(&meta),
            ..Default::default()
        });
        assert_eq!(user.avatar.as_deref(), Some("https://cdn/a.png"));
    }

    #[test]
    fn camel_case_wins_over_snake_case() {
        let meta = json!({
            "firstName": "Ada", "first_name": "ada",
            "last_name": "Lovelace",
            "avatar": "mine.png", "avatar_url": "theirs.png"
        });
        let user = map_user(&AccountRecord {
            id: "u1",
            user_metadata: Some(&meta),
            ..Default::default()
        });
        assert_eq!(user.first_name.as_deref(), Some("Ada"));
        assert_eq!(user.last_name.as_deref(), Some("Lovelace"));
        assert_eq!(user.avatar.as_deref(), Some("mine.png"));
    }

    #[test]
    fn non_string_and_empty_values_are_skipped() {
        let meta = json!({"firstName": 42, "first_name": "Ada", "lastName": "", "avatar": null});
        let user = map_user(&AccountRecord {
            id: "u1",
            user_metadata: Some(&meta),
            ..Default::default()
        });
        assert_eq!(user.first_name.as_deref(), Some("Ada"));
        assert_eq!(user.last_name, None);
        assert_eq!(user.avatar, None);
    }

    #[test]
    fn verification_and_timestamps() {
        let user = map_user(&AccountRecord {
            id: "u1",
            email: None,
            email_confirmed_at: ts("2024-01-01T00:00:00Z"),
            created_at: ts("2024-01-01T00:00:00Z"),
            updated_at: ts("2024-02-01T00:00:00Z"),
            ..Default::default()
        });
        assert!(user.email_verified);
        assert_eq!(user.email, "");
        assert_eq!(user.created_at, ts("2024-01-01T00:00:00Z"));
        assert_eq!(user.updated_at, ts("2024-02-01T00:00:00Z"));

        let unverified = map_user(&AccountRecord {
            id: "u2",
            ..Default::default()
        });
        assert!(!unverified.email_verified);
    }

    #[test]
    fn session_expiry_derived_when_missing() {
        let mut session: Session = serde_json::from_value(json!({
            "access_token": "a",
            "refresh_token": "r",
            "expires_in": 3600,
            "user": {"id": "u1", "email": "ada@example.com"}
        }))
        .unwrap();
        session.expires_at = None;
        assert_eq!(map_session(&session, 1_000).expires_at, 4_600);

        session.expires_at = Some(99);
        let mapped = map_session(&session, 1_000);
        assert_eq!(mapped.expires_at, 99);
        assert_eq!(mapped.user.email, "ada@example.com");
    }
}
