#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration as StdDuration;

use account_service::account::errors::AccountError;
use account_service::account::models::Identity;
use account_service::account::models::IdentityId;
use account_service::account::ports::AccountRepository;
use account_service::domain::account::service::AccountService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::AuthCredentialService;
use async_trait::async_trait;
use auth::Authenticator;
use auth::HashCost;
use auth::TokenIssuer;
use chrono::Duration;
use chrono::Utc;
use sqlx::postgres::PgConnectOptions;
use sqlx::postgres::PgPoolOptions;
use sqlx::Connection;
use sqlx::Executor;
use sqlx::PgConnection;
use sqlx::PgPool;

pub const PRIVATE_KEY: &str = include_str!("../../../fixtures/keys/primary_private.pem");
pub const PUBLIC_KEY: &str = include_str!("../../../fixtures/keys/primary_public.pem");
pub const FOREIGN_PRIVATE_KEY: &str = include_str!("../../../fixtures/keys/foreign_private.pem");

pub const CHEAP_HASH_COST: HashCost = HashCost {
    memory_kib: 1024,
    iterations: 1,
    parallelism: 1,
};

/// Identity store kept in process memory.
///
/// Phone number uniqueness is checked under the same lock as the write.
#[derive(Default)]
pub struct InMemoryAccountRepository {
    identities: Mutex<HashMap<IdentityId, Identity>>,
    logins: Mutex<HashMap<IdentityId, u32>>,
    fail_login_counter: AtomicBool,
}

impl InMemoryAccountRepository {
    pub fn login_count(&self, id: &IdentityId) -> u32 {
        self.logins.lock().unwrap().get(id).copied().unwrap_or(0)
    }

    pub fn fail_login_counter(&self, fail: bool) {
        self.fail_login_counter.store(fail, Ordering::SeqCst);
    }

    pub fn remove(&self, id: &IdentityId) -> Option<Identity> {
        self.identities.lock().unwrap().remove(id)
    }

    pub fn get(&self, id: &IdentityId) -> Option<Identity> {
        self.identities.lock().unwrap().get(id).cloned()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn store_identity(&self, identity: &Identity) -> Result<(), AccountError> {
        let mut identities = self.identities.lock().unwrap();
        if identities
            .values()
            .any(|existing| existing.phone_number == identity.phone_number)
        {
            return Err(AccountError::DuplicatePhoneNumber(
                identity.phone_number.clone(),
            ));
        }
        identities.insert(identity.id, identity.clone());
        Ok(())
    }

    async fn find_by_phone_number(
        &self,
        phone_number: &str,
    ) -> Result<Option<Identity>, AccountError> {
        Ok(self
            .identities
            .lock()
            .unwrap()
            .values()
            .find(|identity| identity.phone_number == phone_number)
            .cloned())
    }

    async fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>, AccountError> {
        Ok(self.get(id))
    }

    async fn update_profile(
        &self,
        id: &IdentityId,
        full_name: &str,
        phone_number: &str,
    ) -> Result<(), AccountError> {
        let mut identities = self.identities.lock().unwrap();
        if identities
            .values()
            .any(|other| other.id != *id && other.phone_number == phone_number)
        {
            return Err(AccountError::DuplicatePhoneNumber(phone_number.to_string()));
        }

        let identity = identities
            .get_mut(id)
            .ok_or(AccountError::NotFound(id.to_string()))?;
        identity.full_name = full_name.to_string();
        identity.phone_number = phone_number.to_string();
        Ok(())
    }

    async fn increment_login_counter(&self, id: &IdentityId) -> Result<(), AccountError> {
        if self.fail_login_counter.load(Ordering::SeqCst) {
            return Err(AccountError::DatabaseError("login table unavailable".to_string()));
        }
        *self.logins.lock().unwrap().entry(*id).or_insert(0) += 1;
        Ok(())
    }
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub repository: Arc<InMemoryAccountRepository>,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let authenticator = Arc::new(
            Authenticator::from_pem(
                PRIVATE_KEY.as_bytes(),
                PUBLIC_KEY.as_bytes(),
                Duration::minutes(TokenIssuer::DEFAULT_TTL_MINUTES),
                CHEAP_HASH_COST,
            )
            .expect("Failed to build authenticator"),
        );

        let repository = Arc::new(InMemoryAccountRepository::default());
        let credentials = Arc::new(AuthCredentialService::new(authenticator));
        let account_service = Arc::new(AccountService::new(Arc::clone(&repository), credentials));

        let router = create_router(account_service, StdDuration::from_secs(10));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            repository,
            api_client: reqwest::Client::new(),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make PATCH request
    pub fn patch(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.patch(format!("{}{}", self.address, path))
    }

    /// Register an identity and return its id.
    pub async fn register(&self, full_name: &str, phone_number: &str, password: &str) -> String {
        let response = self
            .post("/register")
            .json(&serde_json::json!({
                "full_name": full_name,
                "phone_number": phone_number,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["user_id"]
            .as_str()
            .expect("user_id missing")
            .to_string()
    }

    /// Log in and return the bearer token.
    pub async fn login(&self, phone_number: &str, password: &str) -> String {
        let response = self
            .post("/login")
            .json(&serde_json::json!({
                "phone_number": phone_number,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("token missing")
            .to_string()
    }
}

/// Sign a token for `identity` with an arbitrary key and issuance time.
pub fn sign_token(
    private_key: &str,
    identity: &Identity,
    issued_at: chrono::DateTime<Utc>,
) -> String {
    let issuer = TokenIssuer::from_rsa_pem(
        private_key.as_bytes(),
        Duration::minutes(TokenIssuer::DEFAULT_TTL_MINUTES),
    )
    .expect("Failed to load private key");
    let claims = issuer.claims_at(
        &identity.id.to_string(),
        &identity.phone_number,
        &identity.full_name,
        issued_at,
    );
    issuer.issue(&claims).expect("Failed to issue token")
}

/// Test database helper
pub struct TestDb {
    pub pool: PgPool,
    pub db_name: String,
}

impl TestDb {
    /// Create a fresh, migrated database on the server at `DATABASE_URL`.
    ///
    /// Returns `None` when `DATABASE_URL` is unset so database tests can be
    /// skipped on machines without Postgres.
    pub async fn new() -> Option<Self> {
        let postgres_url = match std::env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) => {
                eprintln!("DATABASE_URL not set, skipping database test");
                return None;
            }
        };

        let db_name = format!(
            "test_account_service_{}",
            uuid::Uuid::new_v4().to_string().replace('-', "_")
        );

        let mut conn = PgConnection::connect(&postgres_url)
            .await
            .expect("Failed to connect to Postgres");

        conn.execute(format!(r#"CREATE DATABASE "{}";"#, db_name).as_str())
            .await
            .expect("Failed to create test database");

        let options = postgres_url
            .parse::<PgConnectOptions>()
            .expect("Failed to parse DATABASE_URL")
            .database(&db_name);

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Some(Self { pool, db_name })
    }
}
