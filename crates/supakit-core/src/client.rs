use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue};
use url::Url;

use crate::config::SupabaseConfig;
use crate::error::{SupabaseError, SupabaseResult};
use crate::session::SessionStore;

/// Connection handle for one Supabase project.
///
/// Wraps a single HTTP client plus the project URL and session store.
/// Cloning is cheap and clones share everything.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    inner: Arc<ClientInner>,
}

#[derive(Debug)]
struct ClientInner {
    http: reqwest::Client,
    base_url: Url,
    config: SupabaseConfig,
}

impl SupabaseClient {
    /// Create a new handle from a configuration.
    ///
    /// Fails if the URL cannot be parsed or the key is not a valid header value.
    pub fn new(config: SupabaseConfig) -> SupabaseResult<Self> {
        let base_url = Url::parse(config.url.trim_end_matches('/'))?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            "apikey",
            HeaderValue::from_str(&config.anon_key)
                .map_err(|e| SupabaseError::config(format!("Invalid API key header: {}", e)))?,
        );

        let http = reqwest::Client::builder()
            .default_headers(default_headers)
            .build()?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                config,
            }),
        })
    }

    /// Get the underlying HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.inner.http
    }

    /// Get the project base URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Get the anon key.
    pub fn api_key(&self) -> &str {
        &self.inner.config.anon_key
    }

    /// Get the default schema.
    pub fn schema(&self) -> &str {
        &self.inner.config.schema
    }

    /// Get the full config.
    pub fn config(&self) -> &SupabaseConfig {
        &self.inner.config
    }

    /// Get the session store.
    pub fn session_store(&self) -> &SessionStore {
        &self.inner.config.session_store
    }

    /// Build a URL under the project, e.g. `endpoint("/auth/v1", "/signup")`.
    ///
    /// `path` may carry a query string (`"/token?grant_type=password"`).
    pub fn endpoint(&self, service: &str, path: &str) -> Url {
        let mut url = self.inner.base_url.clone();
        let current = url.path().trim_end_matches('/').to_string();
        match path.split_once('?') {
            Some((p, query)) => {
                url.set_path(&format!("{}{}{}", current, service, p));
                url.set_query(Some(query));
            }
            None => {
                url.set_path(&format!("{}{}{}", current, service, path));
            }
        }
        url
    }

    /// Bearer token for data requests: the session's access token when
    /// signed in, the anon key otherwise.
    pub async fn bearer_token(&self) -> String {
        match self.session_store().access_token().await {
            Some(token) => token,
            None => self.api_key().to_string(),
        }
    }

    /// Whether two handles are the same connection.
    pub fn ptr_eq(&self, other: &SupabaseClient) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}
