//! Domain entities

mod account;

pub use account::{Account, AccountId};
