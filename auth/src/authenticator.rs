use chrono::Duration;
use chrono::Utc;

use crate::jwt::JwtError;
use crate::jwt::TokenIssuer;
use crate::jwt::TokenVerifier;
use crate::jwt::VerifiedToken;
use crate::password::HashCost;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password hashing and session tokens.
///
/// Holds only immutable key material and hashing parameters, so one
/// instance can be shared across all request handlers.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
    token_verifier: TokenVerifier,
}

/// Authenticator construction errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create an authenticator from already constructed parts.
    pub fn new(
        password_hasher: PasswordHasher,
        token_issuer: TokenIssuer,
        token_verifier: TokenVerifier,
    ) -> Self {
        Self {
            password_hasher,
            token_issuer,
            token_verifier,
        }
    }

    /// Create an authenticator from PEM encoded RSA key material.
    ///
    /// # Arguments
    /// * `private_key_pem` - Signing key
    /// * `public_key_pem` - Verification key of the same pair
    /// * `token_ttl` - Lifetime of issued tokens
    /// * `hash_cost` - Argon2id work factor
    ///
    /// # Errors
    /// * `JwtError` - A key is malformed
    /// * `PasswordError` - Hash cost is out of range
    pub fn from_pem(
        private_key_pem: &[u8],
        public_key_pem: &[u8],
        token_ttl: Duration,
        hash_cost: HashCost,
    ) -> Result<Self, AuthenticationError> {
        Ok(Self {
            password_hasher: PasswordHasher::with_cost(hash_cost)?,
            token_issuer: TokenIssuer::from_rsa_pem(private_key_pem, token_ttl)?,
            token_verifier: TokenVerifier::from_rsa_pem(public_key_pem)?,
        })
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a candidate password against a stored hash.
    ///
    /// # Returns
    /// False on mismatch; a mismatch is not an error
    ///
    /// # Errors
    /// * `PasswordError` - Stored hash is unreadable
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Issue a session token for an identity, valid from now for the
    /// configured lifetime.
    ///
    /// # Errors
    /// * `JwtError` - Token signing failed
    pub fn issue_token(
        &self,
        user_id: &str,
        phone_number: &str,
        full_name: &str,
    ) -> Result<String, JwtError> {
        let claims = self
            .token_issuer
            .claims_at(user_id, phone_number, full_name, Utc::now());
        self.token_issuer.issue(&claims)
    }

    /// Verify a session token and return its claims with the validity flag.
    ///
    /// # Errors
    /// * `JwtError` - Signature, expiry or structure check failed
    pub fn validate_token(&self, token: &str) -> Result<VerifiedToken, JwtError> {
        self.token_verifier.verify(token)
    }

    /// Lifetime of issued tokens.
    pub fn token_ttl(&self) -> Duration {
        self.token_issuer.ttl()
    }
}
