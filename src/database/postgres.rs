use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::store::{AccountStore, StoreError};
use crate::models::{Account, AccountChanges, NewAccount};

/// Account store backed by the `accounts` table
#[derive(Debug, Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn find_by_owner(&self, owner: &Uuid) -> Result<Vec<Account>, StoreError> {
        let accounts = sqlx::query_as::<_, Account>(
            "SELECT id, text, owner, created_at, updated_at FROM accounts \
             WHERE owner = $1 ORDER BY created_at, id",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        Ok(accounts)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Account>, StoreError> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT id, text, owner, created_at, updated_at FROM accounts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn create(&self, account: NewAccount) -> Result<Account, StoreError> {
        let created = sqlx::query_as::<_, Account>(
            "INSERT INTO accounts (id, text, owner) VALUES ($1, $2, $3) \
             RETURNING id, text, owner, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(&account.text)
        .bind(account.owner)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update_by_id(
        &self,
        id: &Uuid,
        changes: &AccountChanges,
    ) -> Result<Option<Account>, StoreError> {
        // Single statement: the row is either updated as a whole or not found
        let updated = sqlx::query_as::<_, Account>(
            "UPDATE accounts SET text = COALESCE($2, text), updated_at = now() \
             WHERE id = $1 \
             RETURNING id, text, owner, created_at, updated_at",
        )
        .bind(id)
        .bind(changes.text.as_deref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn delete_by_id(&self, id: &Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
