//! Domain layer for the FishPi client
//!
//! This module contains the request/response models and the port traits the
//! client facade depends on.

pub mod models;
pub mod ports;

pub use ports::CredentialStoreError;
