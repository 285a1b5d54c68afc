use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Identity claims carried by a session token.
///
/// Identity fields default to empty strings when absent so that a token
/// lacking them still decodes; `TokenVerifier` then reports it as not valid
/// instead of failing outright.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Identifier of the authenticated user
    #[serde(default)]
    pub user_id: String,

    /// Phone number at the time of issuance
    #[serde(default)]
    pub phone_number: String,

    /// Full name at the time of issuance
    #[serde(default)]
    pub full_name: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl Claims {
    /// Create claims for an authenticated identity.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `phone_number` - Phone number of the identity
    /// * `full_name` - Full name of the identity
    /// * `issued_at` - Issuance instant
    /// * `ttl` - Lifetime of the token
    ///
    /// # Returns
    /// Claims with `exp = issued_at + ttl`
    pub fn for_identity(
        user_id: impl ToString,
        phone_number: impl Into<String>,
        full_name: impl Into<String>,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            user_id: user_id.to_string(),
            phone_number: phone_number.into(),
            full_name: full_name.into(),
            exp: (issued_at + ttl).timestamp(),
            iat: Some(issued_at.timestamp()),
        }
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }

    /// Whether the claims name a user at all.
    pub fn has_identity(&self) -> bool {
        !self.user_id.trim().is_empty()
    }
}
