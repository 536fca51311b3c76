//! Request-stage credential injection.
//!
//! Exactly one credential is applied per request. A token always goes into a
//! header. A legacy key is placed according to the request's shape:
//!
//! | request                         | legacy key goes to        |
//! |---------------------------------|---------------------------|
//! | multipart upload                | URL query string          |
//! | `GET`                           | query parameter map       |
//! | raw string body                 | URL query string          |
//! | structured or empty body        | merged into the JSON body |

use serde_json::{Map, Value};

use crate::domain::models::{Credential, HttpMethod, OutgoingRequest, RequestBody, API_KEY_PARAM};

/// Mutate `request` in place so it carries `credential`
///
/// With `None` the request is left untouched.
pub fn apply_credential(request: &mut OutgoingRequest, credential: Option<&Credential>) {
    match credential {
        None => {}
        Some(Credential::Token { name, value }) => {
            // Header names are case-insensitive; a caller's copy must not outlive the token.
            request.headers.retain(|k, _| !k.eq_ignore_ascii_case(name));
            request.headers.insert(name.clone(), value.clone());
        }
        Some(Credential::LegacyKey(key)) => apply_legacy_key(request, key),
    }
}

fn apply_legacy_key(request: &mut OutgoingRequest, key: &str) {
    if request.is_multipart() {
        request.append_url_param(API_KEY_PARAM, key);
        return;
    }

    if request.method == HttpMethod::Get {
        request.query.insert(API_KEY_PARAM.to_string(), key.to_string());
        return;
    }

    request.body = match std::mem::take(&mut request.body) {
        RequestBody::Structured(mut map) => {
            map.insert(API_KEY_PARAM.to_string(), Value::String(key.to_string()));
            RequestBody::Structured(map)
        }
        RequestBody::Empty => {
            let mut map = Map::new();
            map.insert(API_KEY_PARAM.to_string(), Value::String(key.to_string()));
            RequestBody::Structured(map)
        }
        body @ (RequestBody::Raw(_) | RequestBody::Multipart(_)) => {
            request.append_url_param(API_KEY_PARAM, key);
            body
        }
    };
}
