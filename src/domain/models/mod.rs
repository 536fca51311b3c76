//! Plain data types shared by the client, its ports and the CLI.

pub mod config;
pub mod credential;
pub mod envelope;
pub mod event;
pub mod request;

pub use config::{ApiConfig, Config, CredentialsConfig, LoggingConfig};
pub use credential::{Credential, API_KEY_PARAM, LEGACY_KEY, TOKEN_NAME_KEY, TOKEN_VALUE_KEY};
pub use envelope::{AuthFailureKind, ResponseEnvelope, DEFAULT_FAILURE_MESSAGE};
pub use event::{ClientEvent, ERROR_EVENT, LOGIN_INVALID_EVENT};
pub use request::{HttpMethod, OutgoingRequest, RequestBody, RequestOptions, UploadFile};
