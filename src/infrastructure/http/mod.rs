//! FishPi HTTP client facade
//!
//! - `auth`: request stage, injects the stored credential
//! - `response`: response stage, interprets the `{code, msg}` envelope
//! - `client`: verb helpers and credential accessors tying both together

pub mod auth;
pub mod client;
pub mod errors;
pub mod response;

pub use auth::apply_credential;
pub use client::{FishpiClient, TEXT_PLAIN_UTF8, UPLOAD_FIELD};
pub use errors::RequestError;
pub use response::ResponseNormalizer;
