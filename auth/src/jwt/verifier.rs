use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// Outcome of a successful token verification.
///
/// `valid` must be checked even though verification returned `Ok`: a token
/// can carry a correct signature and a future expiry yet name no identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken {
    pub claims: Claims,
    pub valid: bool,
}

/// Verifies RS256 session tokens against an RSA public key.
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Create a verifier from a PEM encoded RSA public key.
    ///
    /// # Errors
    /// * `InvalidKey` - PEM is malformed or not an RSA key
    pub fn from_rsa_pem(public_key_pem: &[u8]) -> Result<Self, JwtError> {
        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem)
            .map_err(|e| JwtError::InvalidKey(e.to_string()))?;

        let mut validation = Validation::new(Algorithm::RS256);
        // Expiry is checked against the caller's clock in `verify_at`
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            decoding_key,
            validation,
        })
    }

    /// Verify a token against the current time.
    pub fn verify(&self, token: &str) -> Result<VerifiedToken, JwtError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verify a token's signature and structure, then its expiry against
    /// `current_timestamp`.
    ///
    /// # Errors
    /// * `SignatureInvalid` - Token was not signed by the matching private key
    /// * `Expired` - `exp` is before `current_timestamp`
    /// * `Malformed` - Token cannot be parsed, uses another algorithm or lacks `exp`
    pub fn verify_at(
        &self,
        token: &str,
        current_timestamp: i64,
    ) -> Result<VerifiedToken, JwtError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        let claims = token_data.claims;

        if claims.is_expired(current_timestamp) {
            return Err(JwtError::Expired);
        }

        let valid = claims.has_identity();
        Ok(VerifiedToken { claims, valid })
    }
}
