use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A goal record owned by exactly one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Account {
    pub id: Uuid,
    pub text: String,
    /// Set once at creation from the caller's identity
    pub owner: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    pub fn is_owned_by(&self, user_id: &Uuid) -> bool {
        self.owner == *user_id
    }
}

/// Insert data for a new record. The store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub text: String,
    pub owner: Uuid,
}

/// Fields an update is allowed to overwrite.
///
/// Deserialized straight from the request body; keys other than the ones
/// listed here (`id`, `owner`, timestamps, anything else) are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AccountChanges {
    pub text: Option<String>,
}

/// Response body for a successful delete. `id` is the path segment as sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedAccount {
    pub id: String,
}
