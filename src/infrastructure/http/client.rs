use std::collections::BTreeMap;
use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Client as ReqwestClient, RequestBuilder};
use serde_json::Value;
use tracing::{debug, error, info, instrument};

use super::auth::apply_credential;
use super::errors::RequestError;
use super::response::ResponseNormalizer;
use crate::domain::models::{
    ApiConfig, Credential, HttpMethod, OutgoingRequest, RequestBody, RequestOptions, UploadFile,
    LEGACY_KEY, TOKEN_NAME_KEY, TOKEN_VALUE_KEY,
};
use crate::domain::ports::{CredentialStore, CredentialStoreError, Notifier};
use crate::infrastructure::logging::SecretScrubber;

/// Content type forced by [`FishpiClient::post_text`] and used for raw bodies
pub const TEXT_PLAIN_UTF8: &str = "text/plain;charset=UTF-8";

/// Multipart field name every uploaded file is appended under
pub const UPLOAD_FIELD: &str = "file[]";

/// HTTP client facade for the FishPi API
///
/// Every call goes through the same three stages:
/// 1. the stored credential is injected (token header, or legacy key placed by
///    request shape)
/// 2. the request is dispatched once, with no retry
/// 3. the response envelope is normalized, raising events on auth failures
///
/// The client holds no per-request state, so concurrent calls are independent.
pub struct FishpiClient {
    http_client: ReqwestClient,
    base_url: String,
    store: Arc<dyn CredentialStore>,
    normalizer: ResponseNormalizer,
    scrubber: SecretScrubber,
}

impl FishpiClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `config` - Base transport options (base URL, timeout, default headers)
    /// * `store` - Credential store consulted before every request
    /// * `notifier` - Receives `fishpi:login-invalid` / `fishpi:error` events
    ///
    /// # Example
    /// ```no_run
    /// use std::sync::Arc;
    /// use fishpi_client::domain::models::ApiConfig;
    /// use fishpi_client::infrastructure::credentials::MemoryCredentialStore;
    /// use fishpi_client::infrastructure::events::BroadcastNotifier;
    /// use fishpi_client::infrastructure::http::FishpiClient;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = FishpiClient::new(
    ///     ApiConfig::default(),
    ///     Arc::new(MemoryCredentialStore::new()),
    ///     Arc::new(BroadcastNotifier::new()),
    /// )?;
    /// let user = client.get("/api/user", Default::default()).await?;
    /// println!("{user}");
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(
        config: ApiConfig,
        store: Arc<dyn CredentialStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, RequestError> {
        info!(
            "Initializing FishPi client: base_url={}, timeout={}s, default_headers={}",
            config.base_url,
            config.timeout_secs,
            config.headers.len()
        );

        let http_client = ReqwestClient::builder()
            .timeout(config.timeout())
            .tcp_nodelay(true)
            .default_headers(to_header_map(&config.headers)?)
            .build()?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            store: Arc::clone(&store),
            normalizer: ResponseNormalizer::new(store, notifier),
            scrubber: SecretScrubber::new(),
        })
    }

    /// `GET path` with query parameters
    pub async fn get(
        &self,
        path: &str,
        params: BTreeMap<String, String>,
    ) -> Result<Value, RequestError> {
        self.send(OutgoingRequest::new(HttpMethod::Get, path).with_query(params))
            .await
    }

    /// `POST path` with a JSON object or raw string body
    pub async fn post(
        &self,
        path: &str,
        data: impl Into<RequestBody> + Send,
        options: RequestOptions,
    ) -> Result<Value, RequestError> {
        self.send(
            OutgoingRequest::new(HttpMethod::Post, path)
                .with_body(data)
                .with_options(options),
        )
        .await
    }

    /// `POST path` with a literal `text/plain` body
    ///
    /// The string is sent byte-for-byte: `"hello"` goes out as the five bytes
    /// `hello`, never JSON-quoted.
    pub async fn post_text(&self, path: &str, data: impl Into<String> + Send) -> Result<Value, RequestError> {
        self.send(
            OutgoingRequest::new(HttpMethod::Post, path)
                .with_header(CONTENT_TYPE.as_str(), TEXT_PLAIN_UTF8)
                .with_body(RequestBody::Raw(data.into())),
        )
        .await
    }

    /// `PUT path` with a JSON object or raw string body
    pub async fn put(
        &self,
        path: &str,
        data: impl Into<RequestBody> + Send,
    ) -> Result<Value, RequestError> {
        self.send(OutgoingRequest::new(HttpMethod::Put, path).with_body(data))
            .await
    }

    /// `DELETE path`
    pub async fn delete(&self, path: &str) -> Result<Value, RequestError> {
        self.send(OutgoingRequest::new(HttpMethod::Delete, path))
            .await
    }

    /// `POST path` as `multipart/form-data`, one `file[]` part per file in order
    pub async fn upload(&self, path: &str, files: Vec<UploadFile>) -> Result<Value, RequestError> {
        self.send(OutgoingRequest::new(HttpMethod::Post, path).with_body(files))
            .await
    }

    /// Run a fully described request through the auth and response stages
    #[instrument(skip_all, fields(method = %request.method))]
    pub async fn send(&self, mut request: OutgoingRequest) -> Result<Value, RequestError> {
        let credential = Credential::resolve(self.store.as_ref());
        apply_credential(&mut request, credential.as_ref());

        let url = self.url_for(&request.path);
        debug!(
            url = %self.scrubber.scrub_message(&url),
            credential = credential.as_ref().map_or("none", Credential::kind),
            "sending request"
        );

        let builder = self.build(&url, request)?;
        let response = builder.send().await.map_err(|err| {
            error!(url = %self.scrubber.scrub_message(&url), error = %err, "API error");
            RequestError::Network(err)
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|err| {
            error!(status = %status, error = %err, "failed to read response body");
            RequestError::Network(err)
        })?;

        self.normalizer.normalize(status, &body)
    }

    fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    fn build(&self, url: &str, request: OutgoingRequest) -> Result<RequestBuilder, RequestError> {
        let OutgoingRequest {
            method,
            query,
            mut headers,
            body,
            timeout,
            ..
        } = request;

        // reqwest appends its own multipart content type with the boundary.
        if matches!(body, RequestBody::Multipart(_)) {
            headers.retain(|name, _| !name.eq_ignore_ascii_case(CONTENT_TYPE.as_str()));
        }
        let has_content_type = headers
            .keys()
            .any(|name| name.eq_ignore_ascii_case(CONTENT_TYPE.as_str()));

        let mut builder = self
            .http_client
            .request(method.into(), url)
            .headers(to_header_map(&headers)?);

        if !query.is_empty() {
            builder = builder.query(&query);
        }
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Raw(text) => {
                let builder = if has_content_type {
                    builder
                } else {
                    builder.header(CONTENT_TYPE, TEXT_PLAIN_UTF8)
                };
                builder.body(text)
            }
            RequestBody::Structured(map) => builder.json(&map),
            RequestBody::Multipart(files) => builder.multipart(build_form(files)?),
        };

        Ok(builder)
    }

    /// The credential the next request would carry
    pub fn credential(&self) -> Option<Credential> {
        Credential::resolve(self.store.as_ref())
    }

    /// Stored token header name, if any
    pub fn token_name(&self) -> Option<String> {
        self.store.get(TOKEN_NAME_KEY)
    }

    /// Stored token value, if any
    pub fn token_value(&self) -> Option<String> {
        self.store.get(TOKEN_VALUE_KEY)
    }

    /// Store a token credential; it takes precedence over any legacy key
    pub fn set_token(&self, name: &str, value: &str) -> Result<(), CredentialStoreError> {
        self.store.set(TOKEN_NAME_KEY, name)?;
        self.store.set(TOKEN_VALUE_KEY, value)
    }

    /// Remove both halves of the stored token
    pub fn clear_token(&self) -> Result<(), CredentialStoreError> {
        self.store.remove(TOKEN_NAME_KEY)?;
        self.store.remove(TOKEN_VALUE_KEY)
    }

    /// Stored legacy API key, if any
    pub fn api_key(&self) -> Option<String> {
        self.store.get(LEGACY_KEY)
    }

    /// Store a legacy API key; used only while no token is stored
    pub fn set_api_key(&self, api_key: &str) -> Result<(), CredentialStoreError> {
        self.store.set(LEGACY_KEY, api_key)
    }

    /// Remove the stored legacy API key
    pub fn clear_api_key(&self) -> Result<(), CredentialStoreError> {
        self.store.remove(LEGACY_KEY)
    }
}

fn build_form(files: Vec<UploadFile>) -> Result<Form, RequestError> {
    files.into_iter().try_fold(Form::new(), |form, file| {
        let part = Part::bytes(file.bytes).file_name(file.file_name);
        let part = match file.mime {
            Some(mime) => part
                .mime_str(&mime)
                .map_err(|e| RequestError::InvalidBody(format!("invalid MIME type {mime:?}: {e}")))?,
            None => part,
        };
        Ok(form.part(UPLOAD_FIELD, part))
    })
}

fn to_header_map(headers: &BTreeMap<String, String>) -> Result<HeaderMap, RequestError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| RequestError::InvalidHeader(format!("{name}: {e}")))?;
        let mut header_value = HeaderValue::from_str(value)
            .map_err(|e| RequestError::InvalidHeader(format!("{name}: {e}")))?;
        header_value.set_sensitive(true);
        map.insert(header_name, header_value);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::credentials::MemoryCredentialStore;
    use crate::infrastructure::events::NullNotifier;

    fn client(base_url: &str) -> FishpiClient {
        let config = ApiConfig {
            base_url: base_url.to_string(),
            ..ApiConfig::default()
        };
        FishpiClient::new(
            config,
            Arc::new(MemoryCredentialStore::new()),
            Arc::new(NullNotifier),
        )
        .unwrap()
    }

    #[test]
    fn test_client_creation() {
        let c = client("https://fishpi.cn/");
        assert_eq!(c.base_url, "https://fishpi.cn");
    }

    #[test]
    fn test_invalid_default_header_is_rejected() {
        let mut config = ApiConfig::default();
        config
            .headers
            .insert("bad header".to_string(), "x".to_string());

        let result = FishpiClient::new(
            config,
            Arc::new(MemoryCredentialStore::new()),
            Arc::new(NullNotifier),
        );
        assert!(matches!(result, Err(RequestError::InvalidHeader(_))));
    }

    #[test]
    fn test_url_for() {
        let c = client("https://fishpi.cn");
        assert_eq!(c.url_for("/api/user"), "https://fishpi.cn/api/user");
        assert_eq!(c.url_for("api/user"), "https://fishpi.cn/api/user");
        assert_eq!(c.url_for("https://other.test/x"), "https://other.test/x");
    }

    #[test]
    fn test_credential_accessors() {
        let c = client("https://fishpi.cn");
        assert_eq!(c.credential(), None);

        c.set_api_key("k-1").unwrap();
        assert_eq!(c.api_key().as_deref(), Some("k-1"));
        assert_eq!(c.credential(), Some(Credential::LegacyKey("k-1".to_string())));

        c.set_token("X-Token", "tok").unwrap();
        assert_eq!(c.token_name().as_deref(), Some("X-Token"));
        assert_eq!(c.token_value().as_deref(), Some("tok"));
        assert!(matches!(c.credential(), Some(Credential::Token { .. })));

        c.clear_token().unwrap();
        assert_eq!(c.token_name(), None);
        assert_eq!(c.credential(), Some(Credential::LegacyKey("k-1".to_string())));

        c.clear_api_key().unwrap();
        assert_eq!(c.credential(), None);
    }

    #[test]
    fn test_build_form_rejects_bad_mime() {
        let files = vec![UploadFile::new("a.bin", vec![1]).with_mime("not a mime")];
        assert!(matches!(build_form(files), Err(RequestError::InvalidBody(_))));
    }
}
