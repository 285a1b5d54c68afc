//! Credential utilities for the account service
//!
//! Provides the cryptographic side of authentication:
//! - Password hashing (Argon2id, configurable cost)
//! - Session token issuance and verification (RS256 JWT)
//! - Authentication coordination
//!
//! The service defines its own credential port and adapts these
//! implementations to it, so domain logic never depends on this crate directly.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("Passw0rd!").unwrap();
//! assert!(hasher.verify("Passw0rd!", &hash).unwrap());
//! assert!(!hasher.verify("passw0rd!", &hash).unwrap());
//! ```
//!
//! ## Session Tokens
//! ```rust,ignore
//! use auth::{TokenIssuer, TokenVerifier};
//! use chrono::{Duration, Utc};
//!
//! let issuer = TokenIssuer::from_rsa_pem(private_pem.as_bytes(), Duration::minutes(5)).unwrap();
//! let verifier = TokenVerifier::from_rsa_pem(public_pem.as_bytes()).unwrap();
//!
//! let claims = issuer.claims_at("user123", "+6281234567890", "alice", Utc::now());
//! let token = issuer.issue(&claims).unwrap();
//!
//! let verified = verifier.verify(&token).unwrap();
//! assert!(verified.valid);
//! assert_eq!(verified.claims.user_id, "user123");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::TokenIssuer;
pub use jwt::TokenVerifier;
pub use jwt::VerifiedToken;
pub use password::HashCost;
pub use password::PasswordError;
pub use password::PasswordHasher;
