use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;

use super::claims::Claims;
use super::errors::JwtError;

/// Signs session tokens with an RSA private key (RS256).
///
/// The key is parsed once at construction; a handler holding a
/// `TokenIssuer` can never hit a key error per request.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl TokenIssuer {
    /// Lifetime applied when none is configured.
    pub const DEFAULT_TTL_MINUTES: i64 = 5;

    /// Create an issuer from a PEM encoded RSA private key.
    ///
    /// # Arguments
    /// * `private_key_pem` - PKCS#1 or PKCS#8 PEM
    /// * `ttl` - Lifetime of every issued token
    ///
    /// # Errors
    /// * `InvalidKey` - PEM is malformed or not an RSA key
    pub fn from_rsa_pem(private_key_pem: &[u8], ttl: Duration) -> Result<Self, JwtError> {
        let encoding_key = EncodingKey::from_rsa_pem(private_key_pem)
            .map_err(|e| JwtError::InvalidKey(e.to_string()))?;

        Ok(Self {
            encoding_key,
            algorithm: Algorithm::RS256,
            ttl,
        })
    }

    /// Token lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Build claims for an identity, expiring `ttl` after `issued_at`.
    pub fn claims_at(
        &self,
        user_id: &str,
        phone_number: &str,
        full_name: &str,
        issued_at: DateTime<Utc>,
    ) -> Claims {
        Claims::for_identity(user_id, phone_number, full_name, issued_at, self.ttl)
    }

    /// Sign claims into a compact token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Serialization or signing failed
    pub fn issue(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }
}
