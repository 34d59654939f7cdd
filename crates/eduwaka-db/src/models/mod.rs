//! Database models

mod account;

pub use account::AccountModel;
