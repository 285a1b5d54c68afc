use async_trait::async_trait;

use crate::account::errors::AccountError;
use crate::domain::account::models::Identity;
use crate::domain::account::models::IdentityId;
use crate::domain::account::models::LoginOutcome;
use crate::domain::account::models::LoginRequest;
use crate::domain::account::models::Profile;
use crate::domain::account::models::RegisterRequest;
use crate::domain::account::models::UpdateProfileRequest;
use crate::domain::account::models::VerifiedSession;

/// Port for account use cases.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new identity.
    ///
    /// # Arguments
    /// * `request` - Raw full name, phone number and password
    ///
    /// # Returns
    /// Newly generated identity ID
    ///
    /// # Errors
    /// * `Validation` - Input violates registration policy
    /// * `DuplicatePhoneNumber` - Phone number is already registered
    /// * `Credential` - Password hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, request: RegisterRequest) -> Result<IdentityId, AccountError>;

    /// Authenticate a phone number and password and issue a session token.
    ///
    /// # Returns
    /// Identity ID, signed token and the outcome of the login counter update
    ///
    /// # Errors
    /// * `Validation` - Input violates login policy
    /// * `NotFoundByPhoneNumber` - No identity with this phone number
    /// * `InvalidCredentials` - Password does not match
    /// * `Credential` - Hash verification or token signing failed
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, request: LoginRequest) -> Result<LoginOutcome, AccountError>;

    /// Read the current profile of the bearer.
    ///
    /// # Arguments
    /// * `authorization` - Raw `Authorization` header value
    ///
    /// # Errors
    /// * `AuthHeaderInvalid` - Header carries no token
    /// * `SignatureInvalid` / `TokenRejected` / `InvalidSession` - Token not accepted
    /// * `NotFound` - Identity no longer exists
    /// * `DatabaseError` - Database operation failed
    async fn get_profile(&self, authorization: &str) -> Result<Profile, AccountError>;

    /// Replace full name and phone number of the bearer.
    ///
    /// # Errors
    /// * `AuthHeaderInvalid` - Header carries no token
    /// * `SignatureInvalid` / `TokenRejected` / `InvalidSession` - Token not accepted
    /// * `Validation` - Input violates profile policy
    /// * `NotFound` - Identity no longer exists
    /// * `DuplicatePhoneNumber` - Phone number belongs to another identity
    /// * `DatabaseError` - Database operation failed
    async fn update_profile(
        &self,
        authorization: &str,
        request: UpdateProfileRequest,
    ) -> Result<(), AccountError>;
}

/// Persistence operations for the identity aggregate.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist a new identity.
    ///
    /// # Errors
    /// * `DuplicatePhoneNumber` - Phone number is already registered
    /// * `DatabaseError` - Database operation failed
    async fn store_identity(&self, identity: &Identity) -> Result<(), AccountError>;

    /// Retrieve identity by phone number.
    ///
    /// # Returns
    /// Optional identity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_phone_number(
        &self,
        phone_number: &str,
    ) -> Result<Option<Identity>, AccountError>;

    /// Retrieve identity by identifier.
    ///
    /// # Returns
    /// Optional identity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>, AccountError>;

    /// Replace full name and phone number of an identity.
    ///
    /// # Errors
    /// * `NotFound` - Identity does not exist
    /// * `DuplicatePhoneNumber` - Phone number belongs to another identity
    /// * `DatabaseError` - Database operation failed
    async fn update_profile(
        &self,
        id: &IdentityId,
        full_name: &str,
        phone_number: &str,
    ) -> Result<(), AccountError>;

    /// Count one more successful login for an identity.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn increment_login_counter(&self, id: &IdentityId) -> Result<(), AccountError>;
}

/// Password hashing and session token capabilities.
///
/// All methods are CPU-bound and synchronous.
pub trait CredentialService: Send + Sync + 'static {
    /// Produce a salted, self-describing hash of a password.
    ///
    /// # Errors
    /// * `Credential` - Hashing failed
    fn hash_password(&self, password: &str) -> Result<String, AccountError>;

    /// Compare a candidate password with a stored hash.
    ///
    /// # Returns
    /// False on mismatch
    ///
    /// # Errors
    /// * `Credential` - Stored hash is unreadable
    fn verify_password(&self, password: &str, password_hash: &str) -> Result<bool, AccountError>;

    /// Sign a session token for an identity.
    ///
    /// # Errors
    /// * `Credential` - Signing failed
    fn issue_token(&self, identity: &Identity) -> Result<String, AccountError>;

    /// Verify a session token's signature and expiry.
    ///
    /// # Errors
    /// * `SignatureInvalid` - Token was signed by another key
    /// * `TokenRejected` - Token is expired or malformed
    fn verify_token(&self, token: &str) -> Result<VerifiedSession, AccountError>;
}
