use serde_json::Value;

/// Message used when a failed envelope carries no `msg`
pub const DEFAULT_FAILURE_MESSAGE: &str = "request failed";

/// Codes the server uses to signal an authentication failure
const AUTH_FAILURE_CODES: [i64; 2] = [-1, 401];

/// Message fragments that mean the stored credentials are no longer accepted
const CREDENTIAL_REJECTED_PATTERNS: [&str; 3] = ["API Key", "未登录", "token"];

/// How an auth-failure envelope relates to the stored credentials
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailureKind {
    /// The server rejected the key or token; stored credentials must be purged
    CredentialRejected,

    /// Any other failure reported with an auth-failure code
    Other,
}

/// The server's uniform `{code, msg, ...}` wrapper
///
/// Parsing is lenient: a body that is not an object, or whose `code` is not an
/// integer, yields an envelope with `code: None`, which is never a failure.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope {
    /// Status code; `0` means success
    pub code: Option<i64>,
    /// Human-readable message, usually present on failure
    pub msg: Option<String>,
}

impl ResponseEnvelope {
    /// Read `code` and `msg` from a parsed body
    pub fn from_value(value: &Value) -> Self {
        let object = value.as_object();
        Self {
            code: object.and_then(|o| o.get("code")).and_then(Value::as_i64),
            msg: object
                .and_then(|o| o.get("msg"))
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }

    /// Whether `code` is one of the authentication failure codes
    pub fn is_auth_failure(&self) -> bool {
        self.code.is_some_and(|code| AUTH_FAILURE_CODES.contains(&code))
    }

    /// Classify the failure by message content
    ///
    /// This is a substring heuristic, not a typed error code.
    pub fn failure_kind(&self) -> AuthFailureKind {
        let Some(msg) = self.msg.as_deref() else {
            return AuthFailureKind::Other;
        };

        if msg == "Invalid API Key" || CREDENTIAL_REJECTED_PATTERNS.iter().any(|p| msg.contains(p)) {
            AuthFailureKind::CredentialRejected
        } else {
            AuthFailureKind::Other
        }
    }

    /// The message to report, falling back to [`DEFAULT_FAILURE_MESSAGE`] when absent or empty
    pub fn message_or_default(&self) -> String {
        self.msg
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_FAILURE_MESSAGE)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(value: Value) -> ResponseEnvelope {
        ResponseEnvelope::from_value(&value)
    }

    #[test]
    fn test_success_codes_are_not_failures() {
        assert!(!envelope(json!({"code": 0, "msg": ""})).is_auth_failure());
        assert!(!envelope(json!({"code": 500, "msg": "oops"})).is_auth_failure());
        assert!(!envelope(json!("plain text")).is_auth_failure());
        assert!(!envelope(json!({"code": "-1"})).is_auth_failure());
    }

    #[test]
    fn test_auth_failure_codes() {
        assert!(envelope(json!({"code": -1, "msg": "x"})).is_auth_failure());
        assert!(envelope(json!({"code": 401, "msg": "x"})).is_auth_failure());
    }

    #[test]
    fn test_failure_kind_patterns() {
        let rejected = [
            "Invalid API Key",
            "API Key expired",
            "用户未登录",
            "invalid token",
        ];
        for msg in rejected {
            assert_eq!(
                envelope(json!({"code": -1, "msg": msg})).failure_kind(),
                AuthFailureKind::CredentialRejected,
                "{msg}"
            );
        }

        assert_eq!(
            envelope(json!({"code": 401, "msg": "permission denied"})).failure_kind(),
            AuthFailureKind::Other
        );
        // Matching is case-sensitive.
        assert_eq!(
            envelope(json!({"code": 401, "msg": "Token expired"})).failure_kind(),
            AuthFailureKind::Other
        );
        assert_eq!(envelope(json!({"code": -1})).failure_kind(), AuthFailureKind::Other);
    }

    #[test]
    fn test_message_or_default() {
        assert_eq!(envelope(json!({"code": -1})).message_or_default(), DEFAULT_FAILURE_MESSAGE);
        assert_eq!(
            envelope(json!({"code": -1, "msg": ""})).message_or_default(),
            DEFAULT_FAILURE_MESSAGE
        );
        assert_eq!(envelope(json!({"code": -1, "msg": "bad"})).message_or_default(), "bad");
    }
}
