use serde_json::{Map, Value as JsonValue};
use tracing::debug;

use supakit_auth::{AuthClient, SupabaseClientAuthExt, UpdateUserParams};
use supakit_core::SupabaseClient;

use crate::auth::current_user;
use crate::envelope::{failure, success, Outcome};
use crate::error::{reported, ServiceError};
use crate::mapping::map_account;
use crate::types::{ProfileUpdate, User};

pub const NO_AUTHENTICATED_USER_FOUND: &str = "No authenticated user found";

/// Reads and edits the signed-in user's profile fields.
///
/// Runs on a handle it is given.
#[derive(Debug, Clone)]
pub struct ProfileService {
    auth: AuthClient,
}

impl ProfileService {
    pub fn new(client: &SupabaseClient) -> Self {
        Self {
            auth: client.auth(),
        }
    }

    /// Merge `updates` into the signed-in user's metadata and save it.
    ///
    /// This is a read followed by a write with nothing in between to detect
    /// a concurrent change: a write landing between the two is overwritten.
    pub async fn update_profile(&self, updates: ProfileUpdate) -> Outcome<User> {
        let session = match self.auth.get_session().await {
            Ok(session) => session,
            Err(e) => return failure(reported("update_profile", e)),
        };
        let Some(session) = session else {
            return failure(reported(
                "update_profile",
                ServiceError::NotAuthenticated(NO_AUTHENTICATED_USER_FOUND.into()),
            ));
        };

        let account = match self.auth.get_user(&session.access_token).await {
            Ok(account) => account,
            Err(e) => return failure(reported("update_profile", e)),
        };

        let merged = merge_metadata(account.user_metadata.as_ref(), &updates);
        debug!(user_id = %account.id, fields = merged.len(), "Writing merged profile metadata");

        match self
            .auth
            .update_user(
                &session.access_token,
                UpdateUserParams::data(JsonValue::Object(merged)),
            )
            .await
        {
            Ok(updated) => success(map_account(&updated)),
            Err(e) => failure(reported("update_profile", e)),
        }
    }

    /// The signed-in user, or `None` when nobody is signed in.
    pub async fn get_current_user(&self) -> Outcome<Option<User>> {
        current_user(&self.auth).await
    }
}

/// Existing metadata with `updates` laid over it. Non-object metadata
/// is treated as empty.
pub fn merge_metadata(
    existing: Option<&JsonValue>,
    updates: &ProfileUpdate,
) -> Map<String, JsonValue> {
    let mut merged = existing
        .and_then(JsonValue::as_object)
        .cloned()
        .unwrap_or_default();
    merged.extend(updates.to_metadata());
    merged
}
