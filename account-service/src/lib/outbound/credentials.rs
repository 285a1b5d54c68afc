use std::sync::Arc;

use auth::Authenticator;
use auth::JwtError;
use chrono::DateTime;
use chrono::Utc;

use crate::account::errors::AccountError;
use crate::account::ports::CredentialService;
use crate::domain::account::models::Identity;
use crate::domain::account::models::SessionClaims;
use crate::domain::account::models::VerifiedSession;

/// Credential port backed by the `auth` library (Argon2id + RS256).
pub struct AuthCredentialService {
    authenticator: Arc<Authenticator>,
}

impl AuthCredentialService {
    pub fn new(authenticator: Arc<Authenticator>) -> Self {
        Self { authenticator }
    }
}

impl CredentialService for AuthCredentialService {
    fn hash_password(&self, password: &str) -> Result<String, AccountError> {
        self.authenticator
            .hash_password(password)
            .map_err(|e| AccountError::Credential(e.to_string()))
    }

    fn verify_password(&self, password: &str, password_hash: &str) -> Result<bool, AccountError> {
        self.authenticator
            .verify_password(password, password_hash)
            .map_err(|e| AccountError::Credential(e.to_string()))
    }

    fn issue_token(&self, identity: &Identity) -> Result<String, AccountError> {
        self.authenticator
            .issue_token(
                &identity.id.to_string(),
                &identity.phone_number,
                &identity.full_name,
            )
            .map_err(|e| AccountError::Credential(format!("Token generation failed: {}", e)))
    }

    fn verify_token(&self, token: &str) -> Result<VerifiedSession, AccountError> {
        let verified = self.authenticator.validate_token(token).map_err(|e| match e {
            JwtError::SignatureInvalid => AccountError::SignatureInvalid,
            JwtError::InvalidKey(_) | JwtError::EncodingFailed(_) => {
                AccountError::Credential(e.to_string())
            }
            JwtError::Expired | JwtError::Malformed(_) => AccountError::TokenRejected(e.to_string()),
        })?;

        let expires_at = DateTime::<Utc>::from_timestamp(verified.claims.exp, 0)
            .ok_or_else(|| AccountError::TokenRejected("expiry out of range".to_string()))?;

        Ok(VerifiedSession {
            claims: SessionClaims {
                user_id: verified.claims.user_id,
                phone_number: verified.claims.phone_number,
                full_name: verified.claims.full_name,
                expires_at,
            },
            valid: verified.valid,
        })
    }
}
