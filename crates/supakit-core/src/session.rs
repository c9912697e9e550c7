use std::fmt;
use std::sync::Arc;

use serde_json::Value as JsonValue;
use tokio::sync::RwLock;

/// In-memory slot holding the signed-in session as raw JSON.
///
/// The auth client owns the shape of the value; this type only stores it.
/// Cloning shares the slot, so every handle built from the same config
/// sees the same sign-in.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Option<JsonValue>>>,
}

impl SessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a copy of the stored session, if any.
    pub async fn load(&self) -> Option<JsonValue> {
        self.inner.read().await.clone()
    }

    /// Replace the stored session.
    pub async fn save(&self, session: JsonValue) {
        *self.inner.write().await = Some(session);
    }

    /// Remove the stored session.
    pub async fn clear(&self) {
        *self.inner.write().await = None;
    }

    /// The `access_token` of the stored session, if one is present.
    pub async fn access_token(&self) -> Option<String> {
        self.inner
            .read()
            .await
            .as_ref()
            .and_then(|s| s.get("access_token"))
            .and_then(|t| t.as_str())
            .map(str::to_string)
    }

    /// Whether two stores share the same slot.
    pub fn ptr_eq(&self, other: &SessionStore) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print tokens.
        let present = self.inner.try_read().map(|s| s.is_some()).ok();
        f.debug_struct("SessionStore")
            .field("present", &present)
            .finish()
    }
}
