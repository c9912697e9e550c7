use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Parameters for updating the current user.
///
/// Matches the `UserAttributes` parameter in Supabase JS `updateUser()`.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateUserParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonValue>,
}

impl UpdateUserParams {
    /// Params that replace the user's metadata with `data`.
    pub fn data(data: JsonValue) -> Self {
        Self {
            data: Some(data),
            ..Default::default()
        }
    }
}

/// Type of OTP/confirmation to resend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResendType {
    Signup,
    EmailChange,
}

impl std::fmt::Display for ResendType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Signup => write!(f, "signup"),
            Self::EmailChange => write!(f, "email_change"),
        }
    }
}

/// Parameters for resending a confirmation email.
#[derive(Debug, Clone, Serialize)]
pub struct ResendParams {
    #[serde(rename = "type")]
    pub resend_type: ResendType,
    pub email: String,
}

impl ResendParams {
    /// Create resend params for an email address.
    pub fn email(email: &str, resend_type: ResendType) -> Self {
        Self {
            resend_type,
            email: email.to_string(),
        }
    }
}
