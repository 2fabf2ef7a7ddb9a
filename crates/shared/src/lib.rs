//! Shared types, errors, and configuration for Workcast.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for the lookup and forecast tables
//! - Offset/limit pagination for list endpoints
//! - Application-wide error kinds with stable codes
//! - Configuration loading from the secrets bundle

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, PostgresConfig, ServerConfig};
pub use error::{AppError, AppResult};
