use crate::error::ServiceError;

/// Outcome of every facade operation: `Ok(value)` or `Err(error)`.
pub type Outcome<T, E = ServiceError> = Result<T, E>;

/// Wrap a value as a successful outcome.
pub fn success<T, E>(value: T) -> Outcome<T, E> {
    Ok(value)
}

/// Wrap an error as a failed outcome.
pub fn failure<T, E>(error: E) -> Outcome<T, E> {
    Err(error)
}

/// True when the outcome carries a value. Always the negation of [`is_failure`].
pub fn is_success<T, E>(outcome: &Outcome<T, E>) -> bool {
    outcome.is_ok()
}

/// True when the outcome carries an error. Always the negation of [`is_success`].
pub fn is_failure<T, E>(outcome: &Outcome<T, E>) -> bool {
    outcome.is_err()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_one_variant() {
        let ok: Outcome<u8> = success(1);
        assert!(is_success(&ok));
        assert!(!is_failure(&ok));

        let err: Outcome<u8> = failure(ServiceError::Unexpected("boom".into()));
        assert!(is_failure(&err));
        assert!(!is_success(&err));
        match err {
            Err(e) => assert_eq!(e.message(), "boom"),
            Ok(_) => panic!("expected failure"),
        }
    }

    #[test]
    fn custom_error_type() {
        let err: Outcome<(), &str> = failure("nope");
        assert!(is_failure(&err));
    }
}
