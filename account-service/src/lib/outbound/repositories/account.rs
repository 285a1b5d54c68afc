use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::account::errors::AccountError;
use crate::domain::account::models::Identity;
use crate::domain::account::models::IdentityId;
use crate::domain::account::ports::AccountRepository;

const PHONE_NUMBER_CONSTRAINT: &str = "users_phone_number_key";

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn identity_from_row(row: PgRow) -> Result<Identity, AccountError> {
    let read = |e: sqlx::Error| AccountError::DatabaseError(e.to_string());

    Ok(Identity {
        id: IdentityId(row.try_get::<Uuid, _>("id").map_err(read)?),
        full_name: row.try_get("full_name").map_err(read)?,
        phone_number: row.try_get("phone_number").map_err(read)?,
        password_hash: row.try_get("password_hash").map_err(read)?,
    })
}

/// Map a write error, turning the phone number uniqueness violation into a
/// domain conflict.
fn map_write_error(e: sqlx::Error, phone_number: &str) -> AccountError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() && db_err.constraint() == Some(PHONE_NUMBER_CONSTRAINT) {
            return AccountError::DuplicatePhoneNumber(phone_number.to_string());
        }
    }
    AccountError::DatabaseError(e.to_string())
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn store_identity(&self, identity: &Identity) -> Result<(), AccountError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, full_name, phone_number, password_hash)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(identity.id.0)
        .bind(&identity.full_name)
        .bind(&identity.phone_number)
        .bind(&identity.password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &identity.phone_number))?;

        Ok(())
    }

    async fn find_by_phone_number(
        &self,
        phone_number: &str,
    ) -> Result<Option<Identity>, AccountError> {
        sqlx::query(
            r#"
            SELECT id, full_name, phone_number, password_hash
            FROM users
            WHERE phone_number = $1
            "#,
        )
        .bind(phone_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?
        .map(identity_from_row)
        .transpose()
    }

    async fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>, AccountError> {
        sqlx::query(
            r#"
            SELECT id, full_name, phone_number, password_hash
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?
        .map(identity_from_row)
        .transpose()
    }

    async fn update_profile(
        &self,
        id: &IdentityId,
        full_name: &str,
        phone_number: &str,
    ) -> Result<(), AccountError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET full_name = $2, phone_number = $3
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .bind(full_name)
        .bind(phone_number)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, phone_number))?;

        if result.rows_affected() == 0 {
            return Err(AccountError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn increment_login_counter(&self, id: &IdentityId) -> Result<(), AccountError> {
        sqlx::query(
            r#"
            INSERT INTO logins (id, user_id, success_counter)
            VALUES ($1, $2, 1)
            ON CONFLICT (user_id)
            DO UPDATE SET success_counter = logins.success_counter + 1
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
