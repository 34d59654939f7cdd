//! # eduwaka-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

// Re-export commonly used types at crate root
pub use dto::{
    AuthResponse, ChangePasswordRequest, CurrentAccountResponse, DeactivationResponse,
    HealthResponse, LoginRequest, ReadinessResponse, RefreshTokenRequest, RegisterRequest,
    UpdateAccountRequest,
};
pub use services::{
    AccountService, Authenticated, AuthService, ServiceContext, ServiceError, ServiceResult,
};
