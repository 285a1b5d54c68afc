use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::account::errors::AccountError;
use crate::account::errors::IdentityIdError;

/// Identity aggregate as stored by persistence.
///
/// The core only reads identities or builds new ones for storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: IdentityId,
    pub full_name: String,
    pub phone_number: String,
    pub password_hash: String,
}

/// Identity unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdentityId(pub Uuid);

impl IdentityId {
    /// Generate a new random identity ID.
    ///
    /// # Returns
    /// IdentityId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identity ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, IdentityIdError> {
        Uuid::parse_str(s)
            .map(IdentityId)
            .map_err(|e| IdentityIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for IdentityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Raw registration input. The password is plaintext and transient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterRequest {
    pub full_name: String,
    pub phone_number: String,
    pub password: String,
}

/// Raw login credential. The password is plaintext and transient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRequest {
    pub phone_number: String,
    pub password: String,
}

/// Raw profile update input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateProfileRequest {
    pub full_name: String,
    pub phone_number: String,
}

/// Result of a successful login.
///
/// The token is already issued when the login counter is updated, and a
/// counter failure does not revoke it. The counter outcome is reported here
/// for the caller to surface.
#[derive(Debug)]
pub struct LoginOutcome {
    pub user_id: IdentityId,
    pub token: String,
    pub login_counter: Result<(), AccountError>,
}

/// Current profile of an identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub full_name: String,
    pub phone_number: String,
}

impl From<Identity> for Profile {
    fn from(identity: Identity) -> Self {
        Self {
            full_name: identity.full_name,
            phone_number: identity.phone_number,
        }
    }
}

/// Identity facts extracted from a verified session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    pub user_id: String,
    pub phone_number: String,
    pub full_name: String,
    pub expires_at: DateTime<Utc>,
}

/// Verified session token.
///
/// `valid` is part of the verification contract: an `Ok` verification with
/// `valid == false` must still be rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedSession {
    pub claims: SessionClaims,
    pub valid: bool,
}

/// Token part of an `Authorization` header value.
///
/// The header is split on single spaces; the second part is the token.
/// Anything with fewer than two parts is rejected before any cryptography.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Extract the token from a raw header value.
    ///
    /// # Errors
    /// * `AuthHeaderInvalid` - Header has no space separated token part
    pub fn parse(authorization: &str) -> Result<Self, AccountError> {
        authorization
            .split(' ')
            .nth(1)
            .map(|token| Self(token.to_string()))
            .ok_or(AccountError::AuthHeaderInvalid)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
