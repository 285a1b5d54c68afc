use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Invalid key material: {0}")]
    InvalidKey(String),

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token signature is invalid")]
    SignatureInvalid,

    #[error("Token is expired")]
    Expired,

    #[error("Token is malformed: {0}")]
    Malformed(String),
}

impl JwtError {
    /// True when the token parsed but was not signed by the expected key.
    ///
    /// Every other decoding failure (expired, malformed, missing claims)
    /// belongs to the "malformed/expired" family.
    pub fn is_signature_invalid(&self) -> bool {
        matches!(self, JwtError::SignatureInvalid)
    }
}

impl From<jsonwebtoken::errors::Error> for JwtError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::InvalidSignature => JwtError::SignatureInvalid,
            ErrorKind::ExpiredSignature => JwtError::Expired,
            ErrorKind::InvalidRsaKey(_) | ErrorKind::InvalidKeyFormat => {
                JwtError::InvalidKey(err.to_string())
            }
            _ => JwtError::Malformed(err.to_string()),
        }
    }
}
