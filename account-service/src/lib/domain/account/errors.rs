use thiserror::Error;

use crate::account::validation::ValidationErrors;

/// Error for IdentityId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for all account operations
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    // Input errors
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    // Bearer token errors
    #[error("Auth header is not valid")]
    AuthHeaderInvalid,

    #[error("User is not authorized")]
    SignatureInvalid,

    #[error("Token rejected: {0}")]
    TokenRejected(String),

    #[error("User is not authorized")]
    InvalidSession,

    // Domain-level errors
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Phone number is not registered: {0}")]
    NotFoundByPhoneNumber(String),

    #[error("Password is not valid")]
    InvalidCredentials,

    #[error("phone number conflict")]
    DuplicatePhoneNumber(String),

    // Infrastructure errors
    #[error("Credential error: {0}")]
    Credential(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<IdentityIdError> for AccountError {
    fn from(_: IdentityIdError) -> Self {
        // An unparseable id can only come from token claims.
        AccountError::InvalidSession
    }
}
