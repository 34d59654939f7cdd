//! Request handlers

pub mod accounts;
pub mod auth;
pub mod health;
