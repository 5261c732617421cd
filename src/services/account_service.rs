use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::database::{AccountStore, StoreError};
use crate::middleware::AuthUser;
use crate::models::{Account, AccountChanges, DeletedAccount, NewAccount};

/// Failures of the account operations
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Please add a {0} field")]
    MissingField(&'static str),

    /// Carries the id exactly as the caller sent it
    #[error("Account not found")]
    NotFound(String),

    /// The update body could not be read as a change set
    #[error("{0}")]
    InvalidBody(String),

    #[error("User not found")]
    Unauthenticated,

    #[error("User not authorized")]
    Forbidden,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// List, create, update and delete of owner-scoped account records.
///
/// The caller is passed into every operation. Update and delete run the same
/// ordered checks before touching the store:
///
/// 1. the record must exist (`NotFound`)
/// 2. a caller must be present (`Unauthenticated`)
/// 3. the caller must own the record (`Forbidden`)
///
/// Update receives its body already decoded, or the decode failure. A bad
/// body is only reported once all three checks have passed.
///
/// Lookup and write are separate store calls. A delete landing between them
/// turns the write into `NotFound`; concurrent updates are last-write-wins.
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn AccountStore>,
}

impl AccountService {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    #[tracing::instrument(skip_all)]
    pub async fn list(&self, caller: Option<&AuthUser>) -> Result<Vec<Account>, AccountError> {
        let caller = caller.ok_or(AccountError::Unauthenticated)?;
        let accounts = self.store.find_by_owner(&caller.user_id).await?;

        debug!(user_id = %caller.user_id, count = accounts.len(), "Listed accounts");
        Ok(accounts)
    }

    #[tracing::instrument(skip_all)]
    pub async fn create(
        &self,
        caller: Option<&AuthUser>,
        text: Option<String>,
    ) -> Result<Account, AccountError> {
        let caller = caller.ok_or(AccountError::Unauthenticated)?;
        let text = text
            .filter(|text| !text.is_empty())
            .ok_or(AccountError::MissingField("text"))?;

        let account = self
            .store
            .create(NewAccount {
                text,
                owner: caller.user_id,
            })
            .await?;

        info!(account_id = %account.id, user_id = %caller.user_id, "Created account");
        Ok(account)
    }

    #[tracing::instrument(skip(self, caller, changes))]
    pub async fn update(
        &self,
        caller: Option<&AuthUser>,
        id: &str,
        changes: Result<AccountChanges, AccountError>,
    ) -> Result<Account, AccountError> {
        let account = self.load_owned(caller, id).await?;
        let changes = changes?;

        if matches!(changes.text.as_deref(), Some("")) {
            return Err(AccountError::MissingField("text"));
        }

        let updated = self
            .store
            .update_by_id(&account.id, &changes)
            .await?
            .ok_or_else(|| AccountError::NotFound(id.to_string()))?;

        info!(account_id = %updated.id, "Updated account");
        Ok(updated)
    }

    #[tracing::instrument(skip(self, caller))]
    pub async fn delete(
        &self,
        caller: Option<&AuthUser>,
        id: &str,
    ) -> Result<DeletedAccount, AccountError> {
        let account = self.load_owned(caller, id).await?;

        if !self.store.delete_by_id(&account.id).await? {
            return Err(AccountError::NotFound(id.to_string()));
        }

        info!(account_id = %account.id, "Deleted account");
        Ok(DeletedAccount { id: id.to_string() })
    }

    /// Lookup, then identity, then ownership. Callers can observe the order
    /// through the error returned.
    async fn load_owned(
        &self,
        caller: Option<&AuthUser>,
        id: &str,
    ) -> Result<Account, AccountError> {
        // An id that cannot be parsed cannot name a stored record
        let account = match Uuid::parse_str(id) {
            Ok(uuid) => self.store.find_by_id(&uuid).await?,
            Err(_) => None,
        }
        .ok_or_else(|| AccountError::NotFound(id.to_string()))?;

        let caller = caller.ok_or(AccountError::Unauthenticated)?;

        if !account.is_owned_by(&caller.user_id) {
            warn!(
                account_id = %account.id,
                user_id = %caller.user_id,
                "Rejected access to account owned by another user"
            );
            return Err(AccountError::Forbidden);
        }

        Ok(account)
    }
}
