//! Integration test utilities for the eduwaka backend
//!
//! This crate provides an in-memory account repository and fixtures for
//! exercising the service layer end to end without a database.

pub mod fixtures;
pub mod memory;

pub use fixtures::*;
pub use memory::*;
