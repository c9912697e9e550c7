use serde::Deserialize;

use crate::session::SessionStore;

/// Configuration for connecting to a Supabase project.
///
/// Deserializes from `{ "url": "...", "anonKey": "..." }`; the remaining
/// fields are optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupabaseConfig {
    /// Project URL (e.g. "https://your-project.supabase.co")
    pub url: String,
    /// Public anon key, sent as the `apikey` header
    pub anon_key: String,
    /// Default schema (defaults to "public")
    #[serde(default = "default_schema")]
    pub schema: String,
    /// Refresh the stored session when it is about to expire
    #[serde(default = "default_true")]
    pub auto_refresh_token: bool,
    /// Where the signed-in session lives. Clones of a config share it.
    #[serde(skip)]
    pub session_store: SessionStore,
}

fn default_schema() -> String {
    "public".to_string()
}

fn default_true() -> bool {
    true
}

impl SupabaseConfig {
    /// Create a new config from a project URL and anon key.
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
            schema: default_schema(),
            auto_refresh_token: true,
            session_store: SessionStore::new(),
        }
    }

    /// Set the default schema.
    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = schema.into();
        self
    }

    /// Enable or disable automatic session refresh.
    pub fn auto_refresh_token(mut self, enabled: bool) -> Self {
        self.auto_refresh_token = enabled;
        self
    }

    /// Use an existing session store (e.g. one shared with another config).
    pub fn session_store(mut self, store: SessionStore) -> Self {
        self.session_store = store;
        self
    }
}
