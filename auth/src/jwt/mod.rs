pub mod claims;
pub mod errors;
pub mod issuer;
pub mod verifier;

#[cfg(test)]
pub(crate) mod test_keys;

pub use claims::Claims;
pub use errors::JwtError;
pub use issuer::TokenIssuer;
pub use verifier::TokenVerifier;
pub use verifier::VerifiedToken;
