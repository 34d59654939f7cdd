//! Data transfer objects for the API surface

mod mappers;
mod requests;
mod responses;

pub use requests::{
    ChangePasswordRequest, LoginRequest, RefreshTokenRequest, RegisterRequest,
    UpdateAccountRequest,
};
pub use responses::{
    AuthResponse, CurrentAccountResponse, DeactivationResponse, HealthResponse,
    ReadinessResponse,
};
