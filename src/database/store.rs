use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Account, AccountChanges, NewAccount};

/// Errors from the record store. Opaque to callers beyond "the store failed".
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Keyed storage for account records.
///
/// Each call is atomic for the single record it touches. No call spans
/// more than one record, so there is nothing to roll back across calls.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// All records owned by `owner`, in the store's natural (creation) order
    async fn find_by_owner(&self, owner: &Uuid) -> Result<Vec<Account>, StoreError>;

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Account>, StoreError>;

    /// Persist a new record, assigning its id and timestamps
    async fn create(&self, account: NewAccount) -> Result<Account, StoreError>;

    /// Apply `changes` to the record and return the new state, or `None`
    /// if no record has this id
    async fn update_by_id(
        &self,
        id: &Uuid,
        changes: &AccountChanges,
    ) -> Result<Option<Account>, StoreError>;

    /// Returns whether a record was removed
    async fn delete_by_id(&self, id: &Uuid) -> Result<bool, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}
