//! Property tests for credential injection

use fishpi_client::domain::models::{Credential, HttpMethod, OutgoingRequest, RequestBody, UploadFile};
use fishpi_client::infrastructure::http::apply_credential;
use proptest::prelude::*;
use serde_json::{Map, Value};

fn method_strategy() -> impl Strategy<Value = HttpMethod> {
    prop_oneof![
        Just(HttpMethod::Get),
        Just(HttpMethod::Post),
        Just(HttpMethod::Put),
        Just(HttpMethod::Delete),
    ]
}

fn body_strategy() -> impl Strategy<Value = RequestBody> {
    prop_oneof![
        Just(RequestBody::Empty),
        "[ -~]{0,24}".prop_map(RequestBody::Raw),
        prop::collection::btree_map("[a-z]{1,6}", "[a-z0-9]{0,8}", 0..4).prop_map(|fields| {
            RequestBody::Structured(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, Value::String(v)))
                    .collect::<Map<String, Value>>(),
            )
        }),
        prop::collection::vec("[a-z]{1,8}\\.txt", 1..4).prop_map(|names| {
            RequestBody::Multipart(
                names
                    .into_iter()
                    .map(|name| UploadFile::new(name, b"data".to_vec()))
                    .collect(),
            )
        }),
    ]
}

fn request_strategy() -> impl Strategy<Value = OutgoingRequest> {
    (
        method_strategy(),
        "/[a-z]{1,8}(\\?page=[0-9])?",
        body_strategy(),
        any::<bool>(),
    )
        .prop_map(|(method, path, body, multipart_header)| {
            let request = OutgoingRequest::new(method, path).with_body(body);
            if multipart_header {
                request.with_header("Content-Type", "multipart/form-data")
            } else {
                request
            }
        })
}

/// Number of places the legacy key ended up in
fn key_locations(request: &OutgoingRequest) -> usize {
    let in_query = usize::from(request.query.contains_key("apiKey"));
    let in_url = usize::from(request.path.contains("apiKey="));
    let in_body = usize::from(matches!(
        &request.body,
        RequestBody::Structured(map) if map.contains_key("apiKey")
    ));
    in_query + in_url + in_body
}

proptest! {
    #[test]
    fn legacy_key_lands_in_exactly_one_place(
        mut request in request_strategy(),
        key in "[A-Za-z0-9]{1,16}",
    ) {
        apply_credential(&mut request, Some(&Credential::LegacyKey(key)));
        prop_assert_eq!(key_locations(&request), 1);
    }

    #[test]
    fn legacy_key_never_alters_raw_or_multipart_bodies(
        mut request in request_strategy(),
        key in "[A-Za-z0-9]{1,16}",
    ) {
        let before = request.body.clone();
        apply_credential(&mut request, Some(&Credential::LegacyKey(key)));
        if matches!(before, RequestBody::Raw(_) | RequestBody::Multipart(_)) {
            prop_assert_eq!(request.body, before);
        }
    }

    #[test]
    fn token_never_carries_legacy_key(
        mut request in request_strategy(),
        value in "[A-Za-z0-9]{1,24}",
    ) {
        let original = request.clone();
        apply_credential(
            &mut request,
            Some(&Credential::Token { name: "X-Token".to_string(), value: value.clone() }),
        );

        prop_assert_eq!(key_locations(&request), 0);
        prop_assert_eq!(request.header("x-token"), Some(value.as_str()));
        prop_assert_eq!(&request.body, &original.body);
        prop_assert_eq!(&request.path, &original.path);
        prop_assert_eq!(&request.query, &original.query);
    }

    #[test]
    fn missing_credential_is_a_no_op(mut request in request_strategy()) {
        let original = request.clone();
        apply_credential(&mut request, None);
        prop_assert_eq!(request, original);
    }
}
