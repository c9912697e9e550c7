use chrono::Utc;
use tracing::debug;

use supakit_auth::{AuthClient, ResendParams, ResendType, SupabaseClientAuthExt};
use supakit_core::{SupabaseClient, SupabaseConfig, SupabaseResult};

use crate::envelope::{failure, success, Outcome};
use crate::error::{reported, ServiceError};
use crate::mapping::{map_account, map_session};
use crate::types::{AuthSession, ProfileUpdate, SignInOutcome, SignUpOutcome, User};

pub const USER_CREATION_FAILED: &str = "User creation failed";
pub const SIGN_IN_INCOMPLETE: &str = "Sign in failed: missing user or session";
pub const NO_AUTHENTICATED_USER: &str = "No authenticated user";

/// Registration, sign-in and session operations.
///
/// Owns a connection handle of its own, built from the config it is given.
#[derive(Debug, Clone)]
pub struct AuthService {
    auth: AuthClient,
}

impl AuthService {
    /// Build the service and its own handle.
    ///
    /// Handles built from clones of one config share the signed-in session.
    pub fn new(config: &SupabaseConfig) -> SupabaseResult<Self> {
        let client = SupabaseClient::new(config.clone())?;
        Ok(Self {
            auth: client.auth(),
        })
    }

    /// The handle this service owns.
    pub fn handle(&self) -> &SupabaseClient {
        self.auth.handle()
    }

    /// Register an account. `profile` is stored as the account's metadata.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        profile: Option<ProfileUpdate>,
    ) -> Outcome<SignUpOutcome> {
        let data = profile.map(|p| p.to_metadata().into());
        let resp = match self.auth.sign_up_with_email_and_data(email, password, data).await {
            Ok(resp) => resp,
            Err(e) => return failure(reported("sign_up", e)),
        };
        let Some(account) = resp.user else {
            return failure(reported(
                "sign_up",
                ServiceError::MissingPayload(USER_CREATION_FAILED.into()),
            ));
        };
        let needs_verification = account.email_confirmed_at.is_none();
        debug!(user_id = %account.id, needs_verification, "Signed up");
        success(SignUpOutcome {
            user: map_account(&account),
            needs_verification,
        })
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Outcome<SignInOutcome> {
        let resp = match self.auth.sign_in_with_password_email(email, password).await {
            Ok(resp) => resp,
            Err(e) => return failure(reported("sign_in", e)),
        };
        match (resp.user, resp.session) {
            (Some(account), Some(session)) => {
                debug!(user_id = %account.id, "Signed in");
                success(SignInOutcome {
                    user: map_account(&account),
                    session: map_session(&session, now()),
                })
            }
            _ => failure(reported(
                "sign_in",
                ServiceError::MissingPayload(SIGN_IN_INCOMPLETE.into()),
            )),
        }
    }

    pub async fn sign_out(&self) -> Outcome<()> {
        self.auth
            .sign_out()
            .await
            .map_err(|e| reported("sign_out", e))
    }

    /// The signed-in user, or `None` when nobody is signed in.
    pub async fn get_current_user(&self) -> Outcome<Option<User>> {
        current_user(&self.auth).await
    }

    /// The signed-in session, or `None` when nobody is signed in.
    pub async fn get_current_session(&self) -> Outcome<Option<AuthSession>> {
        match self.auth.get_session().await {
            Ok(session) => success(session.map(|s| map_session(&s, now()))),
            Err(e) => failure(reported("get_current_session", e)),
        }
    }

    /// Send the sign-up confirmation email again to the signed-in user.
    pub async fn resend_verification_email(&self) -> Outcome<()> {
        let account = match self.auth.current_user().await {
            Ok(Some(account)) => account,
            Ok(None) => {
                return failure(reported(
                    "resend_verification_email",
                    ServiceError::NotAuthenticated(NO_AUTHENTICATED_USER.into()),
                ))
            }
            Err(e) => return failure(reported("resend_verification_email", e)),
        };
        let Some(email) = account.email.as_deref() else {
            return failure(reported(
                "resend_verification_email",
                ServiceError::MissingPayload("Current user has no email address".into()),
            ));
        };
        self.auth
            .resend(ResendParams::email(email, ResendType::Signup))
            .await
            .map_err(|e| reported("resend_verification_email", e))
    }
}

/// Shared by the auth and profile services.
pub(crate) async fn current_user(auth: &AuthClient) -> Outcome<Option<User>> {
    match auth.current_user().await {
        Ok(account) => success(account.as_ref().map(map_account)),
        Err(e) => failure(reported("get_current_user", e)),
    }
}

fn now() -> i64 {
    Utc::now().timestamp()
}
