//! # eduwaka-core
//!
//! Domain layer containing the account entity, the lifecycle state machine,
//! repository traits, and domain errors.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod lifecycle;
pub mod traits;

// Re-export commonly used types at crate root
pub use entities::{Account, AccountId};
pub use error::DomainError;
pub use lifecycle::{AccountStatus, LoginDecision, LoginGate, RecoveryWindow};
pub use traits::{AccountRepository, RepoResult};
