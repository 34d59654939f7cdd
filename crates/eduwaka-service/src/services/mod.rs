//! Application services

mod account;
mod auth;
mod context;
mod error;

pub use account::AccountService;
pub use auth::{Authenticated, AuthService};
pub use context::ServiceContext;
pub use error::{ServiceError, ServiceResult};
