use supakit_auth::AuthError;
use supakit_core::SupabaseError;

/// Used when a failure carries no message of its own.
pub const FALLBACK_MESSAGE: &str = "An unexpected error occurred";

/// The error carried by every failed [`Outcome`](crate::Outcome).
///
/// All variants display as their bare message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// The backend rejected the call; its message is passed through verbatim.
    #[error("{message}")]
    Backend {
        message: String,
        code: Option<String>,
    },

    /// The backend reported success but left out part of the answer.
    #[error("{0}")]
    MissingPayload(String),

    /// The operation needs a signed-in user and there is none.
    #[error("{0}")]
    NotAuthenticated(String),

    /// Transport, decoding or any other failure outside the backend's error channel.
    #[error("{0}")]
    Unexpected(String),
}

impl ServiceError {
    pub fn backend(message: impl Into<String>, code: Option<String>) -> Self {
        Self::Backend {
            message: message.into(),
            code,
        }
    }

    /// Build an `Unexpected` error, substituting [`FALLBACK_MESSAGE`] for an empty one.
    pub fn unexpected(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Self::Unexpected(FALLBACK_MESSAGE.to_string())
        } else {
            Self::Unexpected(message)
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Backend { message, .. } => message,
            Self::MissingPayload(m) | Self::NotAuthenticated(m) | Self::Unexpected(m) => m,
        }
    }

    /// Backend error code (GoTrue `error_code` or PostgREST `code`), if any.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Backend { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

impl From<AuthError> for ServiceError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Api {
                message,
                error_code,
                ..
            } => Self::backend(message, error_code.map(|c| c.to_string())),
            other => Self::unexpected(other.to_string()),
        }
    }
}

impl From<SupabaseError> for ServiceError {
    fn from(err: SupabaseError) -> Self {
        match err {
            SupabaseError::Postgrest { message, code, .. } => Self::backend(message, code),
            SupabaseError::Auth(message) => Self::backend(message, None),
            SupabaseError::NoRows | SupabaseError::MultipleRows(_) => {
                Self::MissingPayload(err.to_string())
            }
            other => Self::unexpected(other.to_string()),
        }
    }
}

/// Log a failure on its way out of a collaborator.
pub(crate) fn reported(operation: &'static str, err: impl Into<ServiceError>) -> ServiceError {
    let err = err.into();
    tracing::warn!(operation, error = %err, code = ?err.code(), "Operation failed");
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use supakit_auth::AuthErrorCode;

    #[test]
    fn backend_message_is_verbatim() {
        let err: ServiceError = AuthError::Api {
            status: 400,
            message: "Invalid login credentials".into(),
            error_code: Some(AuthErrorCode::InvalidCredentials),
        }
        .into();
        assert_eq!(err.message(), "Invalid login credentials");
        assert_eq!(err.to_string(), "Invalid login credentials");
        assert_eq!(err.code(), Some("invalid_credentials"));
    }

    #[test]
    fn postgrest_code_is_kept() {
        let err: ServiceError =
            SupabaseError::postgrest(409, "duplicate key", Some("23505".into())).into();
        assert_eq!(
            err,
            ServiceError::Backend {
                message: "duplicate key".into(),
                code: Some("23505".into())
            }
        );
    }

    #[test]
    fn transport_errors_are_unexpected() {
        let err: ServiceError = SupabaseError::Http("connection refused".into()).into();
        assert!(matches!(err, ServiceError::Unexpected(_)));
        assert_eq!(err.message(), "HTTP error: connection refused");
        assert!(err.code().is_none());
    }

    #[test]
    fn empty_message_falls_back() {
        assert_eq!(ServiceError::unexpected("").message(), FALLBACK_MESSAGE);
        assert_eq!(ServiceError::unexpected("  ").message(), FALLBACK_MESSAGE);
        assert_eq!(ServiceError::unexpected("x").message(), "x");
    }
}
