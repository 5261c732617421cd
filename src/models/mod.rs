pub mod account;

pub use account::{Account, AccountChanges, DeletedAccount, NewAccount};
