use std::sync::Arc;

use async_trait::async_trait;

use crate::account::errors::AccountError;
use crate::account::ports::AccountRepository;
use crate::account::ports::AccountServicePort;
use crate::account::ports::CredentialService;
use crate::account::validation;
use crate::domain::account::models::BearerToken;
use crate::domain::account::models::Identity;
use crate::domain::account::models::IdentityId;
use crate::domain::account::models::LoginOutcome;
use crate::domain::account::models::LoginRequest;
use crate::domain::account::models::Profile;
use crate::domain::account::models::RegisterRequest;
use crate::domain::account::models::UpdateProfileRequest;

/// Domain service implementation for account operations.
///
/// Every failure is returned to the caller exactly once; nothing is retried
/// and nothing is logged here.
pub struct AccountService<AR, CS>
where
    AR: AccountRepository,
    CS: CredentialService,
{
    repository: Arc<AR>,
    credentials: Arc<CS>,
}

impl<AR, CS> AccountService<AR, CS>
where
    AR: AccountRepository,
    CS: CredentialService,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Identity persistence implementation
    /// * `credentials` - Password hashing and token implementation
    pub fn new(repository: Arc<AR>, credentials: Arc<CS>) -> Self {
        Self {
            repository,
            credentials,
        }
    }

    /// Resolve the identity a bearer header speaks for.
    fn authorize(&self, authorization: &str) -> Result<IdentityId, AccountError> {
        let token = BearerToken::parse(authorization)?;
        let session = self.credentials.verify_token(token.as_str())?;

        // Verification succeeding is not enough on its own.
        if !session.valid {
            return Err(AccountError::InvalidSession);
        }

        Ok(IdentityId::from_string(&session.claims.user_id)?)
    }
}

#[async_trait]
impl<AR, CS> AccountServicePort for AccountService<AR, CS>
where
    AR: AccountRepository,
    CS: CredentialService,
{
    async fn register(&self, request: RegisterRequest) -> Result<IdentityId, AccountError> {
        validation::validate_registration(&request)?;

        let password_hash = self.credentials.hash_password(&request.password)?;

        let identity = Identity {
            id: IdentityId::new(),
            full_name: request.full_name,
            phone_number: request.phone_number,
            password_hash,
        };

        self.repository.store_identity(&identity).await?;

        Ok(identity.id)
    }

    async fn login(&self, request: LoginRequest) -> Result<LoginOutcome, AccountError> {
        validation::validate_login(&request)?;

        let identity = self
            .repository
            .find_by_phone_number(&request.phone_number)
            .await?
            .ok_or_else(|| AccountError::NotFoundByPhoneNumber(request.phone_number.clone()))?;

        if !self
            .credentials
            .verify_password(&request.password, &identity.password_hash)?
        {
            return Err(AccountError::InvalidCredentials);
        }

        let token = self.credentials.issue_token(&identity)?;

        // Not transactional with issuance: the token stands either way.
        let login_counter = self.repository.increment_login_counter(&identity.id).await;

        Ok(LoginOutcome {
            user_id: identity.id,
            token,
            login_counter,
        })
    }

    async fn get_profile(&self, authorization: &str) -> Result<Profile, AccountError> {
        let id = self.authorize(authorization)?;

        self.repository
            .find_by_id(&id)
            .await?
            .map(Profile::from)
            .ok_or(AccountError::NotFound(id.to_string()))
    }

    async fn update_profile(
        &self,
        authorization: &str,
        request: UpdateProfileRequest,
    ) -> Result<(), AccountError> {
        let id = self.authorize(authorization)?;

        validation::validate_profile_update(&request)?;

        self.repository
            .update_profile(&id, &request.full_name, &request.phone_number)
            .await
    }
}
