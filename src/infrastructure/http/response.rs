//! Response-stage envelope handling.

use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use super::errors::RequestError;
use crate::domain::models::{
    AuthFailureKind, ClientEvent, ResponseEnvelope, LEGACY_KEY, TOKEN_NAME_KEY, TOKEN_VALUE_KEY,
};
use crate::domain::ports::{CredentialStore, Notifier};
use crate::infrastructure::logging::SecretScrubber;

/// Response stage: interprets the `{code, msg}` envelope of every response
///
/// Success envelopes are returned unmodified. Auth-failure envelopes (code -1
/// or 401) are turned into [`RequestError::Api`], publish an error event, and,
/// when the message says the credential was rejected, purge the stored
/// credentials and publish a login-invalid event first.
pub struct ResponseNormalizer {
    store: Arc<dyn CredentialStore>,
    notifier: Arc<dyn Notifier>,
    scrubber: SecretScrubber,
}

impl ResponseNormalizer {
    /// Normalizer purging `store` and publishing to `notifier`
    pub fn new(store: Arc<dyn CredentialStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store,
            notifier,
            scrubber: SecretScrubber::new(),
        }
    }

    /// Normalize a raw response
    ///
    /// Bodies that are not JSON come back as `Value::String`. A non-2xx status is
    /// a transport failure unless its body is itself an auth-failure envelope.
    pub fn normalize(&self, status: StatusCode, body: &str) -> Result<Value, RequestError> {
        let parsed = serde_json::from_str::<Value>(body).ok();
        let envelope = parsed.as_ref().map(ResponseEnvelope::from_value);

        let logged_body = self.scrubber.scrub_message(body);
        debug!(status = %status, code = ?envelope.as_ref().and_then(|e| e.code), body = %logged_body, "API response");

        if let Some(envelope) = envelope.as_ref().filter(|e| e.is_auth_failure()) {
            return Err(self.handle_auth_failure(envelope));
        }

        if !status.is_success() {
            error!(status = %status, body = %logged_body, "API request failed");
            return Err(RequestError::Status {
                status,
                body: body.to_string(),
            });
        }

        Ok(parsed.unwrap_or_else(|| Value::String(body.to_string())))
    }

    fn handle_auth_failure(&self, envelope: &ResponseEnvelope) -> RequestError {
        let code = envelope.code.unwrap_or_default();
        let message = envelope.message_or_default();

        if envelope.failure_kind() == AuthFailureKind::CredentialRejected {
            info!(code, message = %message, "credentials rejected by server, clearing stored credentials");
            self.purge_credentials();
            self.notifier.publish(ClientEvent::LoginInvalid);
        }

        self.notifier.publish(ClientEvent::Error {
            message: message.clone(),
            code,
        });

        error!(code, message = %message, "API returned auth failure");
        RequestError::Api { code, message }
    }

    fn purge_credentials(&self) {
        for key in [LEGACY_KEY, TOKEN_NAME_KEY, TOKEN_VALUE_KEY] {
            if let Err(err) = self.store.remove(key) {
                warn!(key, error = %err, "failed to clear credential");
            }
        }
    }
}
