//! Supabase Auth (GoTrue) HTTP client.
//!
//! Talks to GoTrue REST endpoints at `/auth/v1/...` through a
//! [`SupabaseClient`] handle, and keeps the signed-in session in that
//! handle's session store.
//!
//! # Usage
//!
//! ```ignore
//! use supakit_auth::SupabaseClientAuthExt;
//!
//! let auth = client.auth();
//! let resp = auth.sign_in_with_password_email("user@example.com", "pass").await?;
//! let user = auth.current_user().await?;
//! auth.sign_out().await?;
//! ```

pub mod client;
pub mod error;
pub mod params;
pub mod types;

// Re-exports for convenient access
pub use client::{AuthClient, EXPIRY_MARGIN_SECS};
pub use error::{AuthError, AuthErrorCode, GoTrueErrorResponse};
pub use params::*;
pub use types::*;

use supakit_core::SupabaseClient;

/// Extension trait to create an [`AuthClient`] from a [`SupabaseClient`].
pub trait SupabaseClientAuthExt {
    /// Create an [`AuthClient`] sharing this handle's HTTP client and session.
    fn auth(&self) -> AuthClient;
}

impl SupabaseClientAuthExt for SupabaseClient {
    fn auth(&self) -> AuthClient {
        AuthClient::new(self)
    }
}
