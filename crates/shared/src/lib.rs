//! Shared types, errors, and configuration for Declara.
//!
//! This crate provides common pieces used across all other crates:
//! - Typed IDs for tenants, legal entities, source documents and ledger rows
//! - Application-wide error types
//! - Configuration management
//! - Tracing subscriber setup

pub mod config;
pub mod error;
pub mod telemetry;
pub mod types;

pub use config::{AppConfig, DeclarationSettings};
pub use error::AppError;
