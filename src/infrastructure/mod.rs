//! Infrastructure layer module
//!
//! This module contains all infrastructure adapters and external integrations:
//! - FishPi HTTP client facade
//! - Credential stores
//! - Event notifiers
//! - Configuration management
//! - Logging infrastructure
//!
//! Infrastructure implementations satisfy the port traits defined in the domain layer.

pub mod config;
pub mod credentials;
pub mod events;
pub mod http;
pub mod logging;
