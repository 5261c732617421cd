pub mod manager;
pub mod memory;
pub mod postgres;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryAccountStore;
pub use postgres::PgAccountStore;
pub use store::{AccountStore, StoreError};
