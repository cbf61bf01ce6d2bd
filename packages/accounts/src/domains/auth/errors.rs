use thiserror::Error;

/// Failure taxonomy for the account engine.
///
/// Callers branch on these kinds to pick a response: validation and
/// credential kinds are client errors, `Delivery` and `Store` are
/// server-side and retryable.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Phone number is not a valid mobile number")]
    InvalidPhone,

    #[error("Email address is malformed")]
    InvalidEmail,

    #[error("Verification code expired or not issued")]
    CodeExpired,

    #[error("Verification code does not match")]
    CodeMismatch,

    #[error("Account not found")]
    AccountNotFound,

    #[error("An account already exists for this phone number")]
    AccountAlreadyExists,

    #[error("Session token is invalid")]
    TokenInvalid,

    #[error("Session token has expired")]
    TokenExpired,

    #[error("No email address is bound to this account")]
    EmailNotBound,

    #[error("Delivery failed: {0}")]
    Delivery(#[source] anyhow::Error),

    #[error("Store error: {0}")]
    Store(#[from] anyhow::Error),
}
