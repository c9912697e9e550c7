use chrono::Utc;
use serde_json::{json, Value as JsonValue};
use tracing::{debug, warn};
use url::Url;

use supakit_core::SupabaseClient;

use crate::error::{AuthError, GoTrueErrorResponse};
use crate::params::{ResendParams, UpdateUserParams};
use crate::types::*;

const AUTH_PATH: &str = "/auth/v1";

/// Sessions expiring within this many seconds are refreshed before use.
pub const EXPIRY_MARGIN_SECS: i64 = 10;

/// HTTP client for the Supabase GoTrue auth API.
///
/// Bound to a [`SupabaseClient`] handle: it uses the handle's HTTP client
/// and keeps the signed-in session in the handle's session store.
///
/// # Example
/// ```ignore
/// use supakit_auth::AuthClient;
/// use supakit_core::{SupabaseClient, SupabaseConfig};
///
/// let client = SupabaseClient::new(SupabaseConfig::new("https://your-project.supabase.co", "anon-key"))?;
/// let auth = AuthClient::new(&client);
/// let resp = auth.sign_in_with_password_email("user@example.com", "password").await?;
/// ```
#[derive(Debug, Clone)]
pub struct AuthClient {
    client: SupabaseClient,
}

impl AuthClient {
    /// Create an auth client on top of an existing handle.
    pub fn new(client: &SupabaseClient) -> Self {
        Self {
            client: client.clone(),
        }
    }

    /// Get the base URL for the auth API.
    pub fn base_url(&self) -> Url {
        self.client.endpoint(AUTH_PATH, "")
    }

    /// The handle this client runs on.
    pub fn handle(&self) -> &SupabaseClient {
        &self.client
    }

    // ─── Sign Up ───────────────────────────────────────────────

    /// Sign up a new user with email, password, and custom user metadata.
    ///
    /// Mirrors `supabase.auth.signUp({ email, password, options: { data } })`.
    /// When the project auto-confirms, the returned session is stored.
    pub async fn sign_up_with_email_and_data(
        &self,
        email: &str,
        password: &str,
        data: Option<JsonValue>,
    ) -> Result<AuthResponse, AuthError> {
        let mut body = json!({
            "email": email,
            "password": password,
        });
        if let Some(data) = data {
            body["data"] = data;
        }

        let url = self.url("/signup");
        debug!(url = %url, "POST signup");
        let resp = self.client.http().post(url).json(&body).send().await?;
        let body = self.handle_json_response(resp).await?;
        let auth = AuthResponse::from_body(body, now())?;
        if let Some(session) = &auth.session {
            self.save_session(session).await?;
        }
        Ok(auth)
    }

    // ─── Sign In ───────────────────────────────────────────────

    /// Sign in with email and password.
    ///
    /// Mirrors `supabase.auth.signInWithPassword({ email, password })`.
    /// The session, when present, is stored.
    pub async fn sign_in_with_password_email(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, AuthError> {
        let body = json!({
            "email": email,
            "password": password,
        });

        let url = self.url("/token?grant_type=password");
        debug!(url = %url, "POST password grant");
        let resp = self.client.http().post(url).json(&body).send().await?;
        let body = self.handle_json_response(resp).await?;
        let auth = AuthResponse::from_body(body, now())?;
        if let Some(session) = &auth.session {
            self.save_session(session).await?;
        }
        Ok(auth)
    }

    // ─── Session Management ────────────────────────────────────

    /// Get the stored session, refreshing it first if it is about to expire.
    ///
    /// Returns `Ok(None)` when nobody is signed in. A failed refresh removes
    /// the stored session and returns the error.
    ///
    /// Mirrors `supabase.auth.getSession()`.
    pub async fn get_session(&self) -> Result<Option<Session>, AuthError> {
        let store = self.client.session_store();
        let Some(raw) = store.load().await else {
            return Ok(None);
        };
        let session: Session = match serde_json::from_value(raw) {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "Discarding unreadable stored session");
                store.clear().await;
                return Ok(None);
            }
        };

        if !self.client.config().auto_refresh_token
            || !session.expires_within(now(), EXPIRY_MARGIN_SECS)
        {
            return Ok(Some(session));
        }

        debug!("Stored session is expiring, refreshing");
        match self.refresh_session(&session.refresh_token).await {
            Ok(refreshed) => Ok(Some(refreshed)),
            Err(e) => {
                store.clear().await;
                Err(e)
            }
        }
    }

    /// Store a session as the signed-in one.
    pub async fn set_session(&self, session: Session) -> Result<(), AuthError> {
        self.save_session(&session.with_expiry_from(now())).await
    }

    /// Refresh a session using a refresh token and store the result.
    ///
    /// Mirrors `supabase.auth.refreshSession()`.
    pub async fn refresh_session(&self, refresh_token: &str) -> Result<Session, AuthError> {
        let body = json!({
            "refresh_token": refresh_token,
        });

        let url = self.url("/token?grant_type=refresh_token");
        debug!(url = %url, "POST refresh grant");
        let resp = self.client.http().post(url).json(&body).send().await?;
        let body = self.handle_json_response(resp).await?;
        let session = AuthResponse::from_body(body, now())?
            .session
            .ok_or(AuthError::SessionExpired)?;
        self.save_session(&session).await?;
        Ok(session)
    }

    // ─── User Management ───────────────────────────────────────

    /// Get the user associated with an access token.
    ///
    /// Mirrors `supabase.auth.getUser(jwt)`.
    pub async fn get_user(&self, access_token: &str) -> Result<User, AuthError> {
        let url = self.url("/user");
        debug!(url = %url, "GET user");
        let resp = self
            .client
            .http()
            .get(url)
            .bearer_auth(access_token)
            .send()
            .await?;
        self.handle_user_response(resp).await
    }

    /// Get the signed-in user, or `None` when there is no session.
    pub async fn current_user(&self) -> Result<Option<User>, AuthError> {
        match self.get_session().await? {
            Some(session) => self.get_user(&session.access_token).await.map(Some),
            None => Ok(None),
        }
    }

    /// Update the user behind an access token.
    ///
    /// If that token belongs to the stored session, the stored user is
    /// replaced with the updated one.
    ///
    /// Mirrors `supabase.auth.updateUser(attributes)`.
    pub async fn update_user(
        &self,
        access_token: &str,
        params: UpdateUserParams,
    ) -> Result<User, AuthError> {
        let url = self.url("/user");
        debug!(url = %url, "PUT user");
        let resp = self
            .client
            .http()
            .put(url)
            .bearer_auth(access_token)
            .json(&params)
            .send()
            .await?;
        let user = self.handle_user_response(resp).await?;

        let store = self.client.session_store();
        if let Some(raw) = store.load().await {
            if let Ok(mut session) = serde_json::from_value::<Session>(raw) {
                if session.access_token == access_token {
                    session.user = user.clone();
                    self.save_session(&session).await?;
                }
            }
        }
        Ok(user)
    }

    // ─── Sign Out ──────────────────────────────────────────────

    /// Sign out the user (global scope).
    ///
    /// Mirrors `supabase.auth.signOut()`.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.sign_out_with_scope(SignOutScope::Global).await
    }

    /// Sign out with a specific scope.
    ///
    /// The server answering 401, 403 or 404 means the session is already
    /// gone and counts as success. Except for `Others`, the stored session
    /// is removed once the server call succeeds.
    pub async fn sign_out_with_scope(&self, scope: SignOutScope) -> Result<(), AuthError> {
        let store = self.client.session_store();
        if let Some(token) = store.access_token().await {
            let url = self.url(&format!("/logout?scope={}", scope));
            debug!(url = %url, "POST logout");
            let resp = self
                .client
                .http()
                .post(url)
                .bearer_auth(token)
                .send()
                .await?;
            match self.handle_empty_response(resp).await {
                Ok(()) => {}
                Err(AuthError::Api { status, .. }) if matches!(status, 401 | 403 | 404) => {
                    debug!(status, "Session already revoked on the server");
                }
                Err(e) => return Err(e),
            }
        }

        if scope != SignOutScope::Others {
            store.clear().await;
        }
        Ok(())
    }

    // ─── Confirmation ──────────────────────────────────────────

    /// Resend a confirmation email.
    ///
    /// Mirrors `supabase.auth.resend({ type, email })`.
    pub async fn resend(&self, params: ResendParams) -> Result<(), AuthError> {
        let url = self.url("/resend");
        debug!(url = %url, resend_type = %params.resend_type, "POST resend");
        let resp = self.client.http().post(url).json(&params).send().await?;
        self.handle_empty_response(resp).await
    }

    // ─── Internal Helpers ──────────────────────────────────────

    pub(crate) fn url(&self, path: &str) -> Url {
        self.client.endpoint(AUTH_PATH, path)
    }

    async fn save_session(&self, session: &Session) -> Result<(), AuthError> {
        let raw = serde_json::to_value(session)?;
        self.client.session_store().save(raw).await;
        Ok(())
    }

    async fn handle_json_response(
        &self,
        resp: reqwest::Response,
    ) -> Result<JsonValue, AuthError> {
        let status = resp.status().as_u16();
        if status >= 400 {
            return Err(self.parse_error(status, resp).await);
        }
        Ok(resp.json().await?)
    }

    async fn handle_user_response(&self, resp: reqwest::Response) -> Result<User, AuthError> {
        let status = resp.status().as_u16();
        if status >= 400 {
            return Err(self.parse_error(status, resp).await);
        }

        let user: User = resp.json().await?;
        Ok(user)
    }

    async fn handle_empty_response(&self, resp: reqwest::Response) -> Result<(), AuthError> {
        let status = resp.status().as_u16();
        if status >= 400 {
            return Err(self.parse_error(status, resp).await);
        }
        Ok(())
    }

    async fn parse_error(&self, status: u16, resp: reqwest::Response) -> AuthError {
        match resp.json::<GoTrueErrorResponse>().await {
            Ok(err_resp) => {
                let error_code = err_resp.error_code.as_deref().map(|s| s.into());
                AuthError::Api {
                    status,
                    message: err_resp.error_message(),
                    error_code,
                }
            }
            Err(_) => AuthError::Api {
                status,
                message: format!("HTTP {}", status),
                error_code: None,
            },
        }
    }
}

fn now() -> i64 {
    Utc::now().timestamp()
}
