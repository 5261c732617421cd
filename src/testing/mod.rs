use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::auth::{generate_jwt, Claims};
use crate::database::{AccountStore, StoreError};
use crate::middleware::AuthUser;
use crate::models::{Account, AccountChanges, NewAccount};

pub const TEST_SECRET: &str = "unit-test-secret";

/// A fresh caller identity
pub fn caller() -> AuthUser {
    AuthUser {
        user_id: Uuid::new_v4(),
    }
}

/// `Authorization` header value for `user_id`, signed with [`TEST_SECRET`]
pub fn bearer(user_id: Uuid) -> String {
    let token = generate_jwt(&Claims::new(user_id, 1), TEST_SECRET).expect("sign test token");
    format!("Bearer {}", token)
}

/// Store whose every call fails
pub struct FailingStore;

/// Store that finds `account` on lookup but reports it gone on every write,
/// as if another request removed it in between
pub struct VanishingStore {
    pub account: Account,
}

impl VanishingStore {
    pub fn owned_by(owner: Uuid) -> Self {
        let now = Utc::now();
        Self {
            account: Account {
                id: Uuid::new_v4(),
                text: "gym".to_string(),
                owner,
                created_at: now,
                updated_at: now,
            },
        }
    }
}

#[async_trait]
impl AccountStore for VanishingStore {
    async fn find_by_owner(&self, owner: &Uuid) -> Result<Vec<Account>, StoreError> {
        Ok(vec![self.account.clone()]
            .into_iter()
            .filter(|account| account.is_owned_by(owner))
            .collect())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Account>, StoreError> {
        Ok(Some(self.account.clone()).filter(|account| account.id == *id))
    }

    async fn create(&self, _account: NewAccount) -> Result<Account, StoreError> {
        Err(unavailable())
    }

    async fn update_by_id(
        &self,
        _id: &Uuid,
        _changes: &AccountChanges,
    ) -> Result<Option<Account>, StoreError> {
        Ok(None)
    }

    async fn delete_by_id(&self, _id: &Uuid) -> Result<bool, StoreError> {
        Ok(false)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

fn unavailable() -> StoreError {
    StoreError::Unavailable("failing store".to_string())
}

#[async_trait]
impl AccountStore for FailingStore {
    async fn find_by_owner(&self, _owner: &Uuid) -> Result<Vec<Account>, StoreError> {
        Err(unavailable())
    }

    async fn find_by_id(&self, _id: &Uuid) -> Result<Option<Account>, StoreError> {
        Err(unavailable())
    }

    async fn create(&self, _account: NewAccount) -> Result<Account, StoreError> {
        Err(unavailable())
    }

    async fn update_by_id(
        &self,
        _id: &Uuid,
        _changes: &AccountChanges,
    ) -> Result<Option<Account>, StoreError> {
        Err(unavailable())
    }

    async fn delete_by_id(&self, _id: &Uuid) -> Result<bool, StoreError> {
        Err(unavailable())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Err(unavailable())
    }
}
