use serde::{Deserialize, Serialize};

/// Wire name of the login-invalid notification
pub const LOGIN_INVALID_EVENT: &str = "fishpi:login-invalid";

/// Wire name of the error notification
pub const ERROR_EVENT: &str = "fishpi:error";

/// Lifecycle notifications emitted by the client facade
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "detail")]
pub enum ClientEvent {
    /// Stored credentials were rejected and have been cleared
    #[serde(rename = "fishpi:login-invalid")]
    LoginInvalid,

    /// An auth-failure envelope was received
    #[serde(rename = "fishpi:error")]
    Error {
        /// Server message, or the default failure message
        message: String,
        /// Envelope code
        code: i64,
    },
}

impl ClientEvent {
    /// Wire name of the event
    pub const fn name(&self) -> &'static str {
        match self {
            Self::LoginInvalid => LOGIN_INVALID_EVENT,
            Self::Error { .. } => ERROR_EVENT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_names() {
        assert_eq!(ClientEvent::LoginInvalid.name(), "fishpi:login-invalid");
        let error = ClientEvent::Error {
            message: "x".to_string(),
            code: -1,
        };
        assert_eq!(error.name(), "fishpi:error");
    }

    #[test]
    fn test_event_serialization() {
        let error = ClientEvent::Error {
            message: "Invalid API Key".to_string(),
            code: -1,
        };
        assert_eq!(
            serde_json::to_value(&error).unwrap(),
            json!({"event": "fishpi:error", "detail": {"message": "Invalid API Key", "code": -1}})
        );
        assert_eq!(
            serde_json::to_value(ClientEvent::LoginInvalid).unwrap(),
            json!({"event": "fishpi:login-invalid"})
        );
    }
}
