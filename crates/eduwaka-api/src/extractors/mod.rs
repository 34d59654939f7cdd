//! Request extractors

mod auth;
mod validated;

pub use auth::AuthAccount;
pub use validated::ValidatedJson;
