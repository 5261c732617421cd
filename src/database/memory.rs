use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::store::{AccountStore, StoreError};
use crate::models::{Account, AccountChanges, NewAccount};

/// In-process store used for development and tests.
///
/// Records live in insertion order; every call takes the lock once, which
/// makes each operation atomic with respect to the others.
#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    accounts: RwLock<Vec<Account>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find_by_owner(&self, owner: &Uuid) -> Result<Vec<Account>, StoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .iter()
            .filter(|account| account.owner == *owner)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Account>, StoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.iter().find(|account| account.id == *id).cloned())
    }

    async fn create(&self, account: NewAccount) -> Result<Account, StoreError> {
        let now = Utc::now();
        let account = Account {
            id: Uuid::new_v4(),
            text: account.text,
            owner: account.owner,
            created_at: now,
            updated_at: now,
        };

        self.accounts.write().await.push(account.clone());
        Ok(account)
    }

    async fn update_by_id(
        &self,
        id: &Uuid,
        changes: &AccountChanges,
    ) -> Result<Option<Account>, StoreError> {
        let mut accounts = self.accounts.write().await;
        let Some(account) = accounts.iter_mut().find(|account| account.id == *id) else {
            return Ok(None);
        };

        if let Some(text) = &changes.text {
            account.text = text.clone();
        }
        account.updated_at = Utc::now();

        Ok(Some(account.clone()))
    }

    async fn delete_by_id(&self, id: &Uuid) -> Result<bool, StoreError> {
        let mut accounts = self.accounts.write().await;
        let before = accounts.len();
        accounts.retain(|account| account.id != *id);
        Ok(accounts.len() != before)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_account(text: &str, owner: Uuid) -> NewAccount {
        NewAccount {
            text: text.to_string(),
            owner,
        }
    }

    #[tokio::test]
    async fn create_assigns_id_and_timestamps() {
        let store = MemoryAccountStore::new();
        let owner = Uuid::new_v4();

        let account = store.create(new_account("gym", owner)).await.unwrap();

        assert_eq!(account.text, "gym");
        assert_eq!(account.owner, owner);
        assert_eq!(account.created_at, account.updated_at);
        assert_eq!(store.find_by_id(&account.id).await.unwrap(), Some(account.clone()));
    }

    #[tokio::test]
    async fn find_by_owner_keeps_creation_order() {
        let store = MemoryAccountStore::new();
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();

        let first = store.create(new_account("first", owner)).await.unwrap();
        store.create(new_account("theirs", other)).await.unwrap();
        let second = store.create(new_account("second", owner)).await.unwrap();

        let ids: Vec<Uuid> = store
            .find_by_owner(&owner)
            .await
            .unwrap()
            .into_iter()
            .map(|account| account.id)
            .collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[tokio::test]
    async fn update_overwrites_text_only() {
        let store = MemoryAccountStore::new();
        let owner = Uuid::new_v4();
        let account = store.create(new_account("gym", owner)).await.unwrap();

        let changes = AccountChanges {
            text: Some("swim".to_string()),
        };
        let updated = store
            .update_by_id(&account.id, &changes)
            .await
            .unwrap()
            .expect("record exists");

        assert_eq!(updated.id, account.id);
        assert_eq!(updated.owner, owner);
        assert_eq!(updated.text, "swim");
        assert!(updated.updated_at >= account.updated_at);
    }

    #[tokio::test]
    async fn update_and_delete_of_missing_id_report_absence() {
        let store = MemoryAccountStore::new();
        let missing = Uuid::new_v4();

        let updated = store
            .update_by_id(&missing, &AccountChanges::default())
            .await
            .unwrap();
        assert!(updated.is_none());
        assert!(!store.delete_by_id(&missing).await.unwrap());
    }

    #[tokio::test]
    async fn delete_removes_record() {
        let store = MemoryAccountStore::new();
        let owner = Uuid::new_v4();
        let account = store.create(new_account("gym", owner)).await.unwrap();

        assert!(store.delete_by_id(&account.id).await.unwrap());
        assert!(store.find_by_id(&account.id).await.unwrap().is_none());
        assert!(store.find_by_owner(&owner).await.unwrap().is_empty());
    }
}
