use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::Serialize;
use serde_json::{Map, Value};

/// HTTP verbs used by the client facade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

impl HttpMethod {
    /// Upper-case method name as sent on the wire
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Delete => Self::DELETE,
        }
    }
}

/// A single file destined for a multipart upload
#[derive(Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// File name reported in the part's `Content-Disposition`
    pub file_name: String,

    /// Raw file contents
    pub bytes: Vec<u8>,

    /// Optional MIME type of the part
    pub mime: Option<String>,
}

impl UploadFile {
    /// File part with no explicit MIME type
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
            mime: None,
        }
    }

    /// Set the part's MIME type
    #[must_use]
    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    /// Read a file from disk, using its final path component as the file name
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map_or_else(|| "file".to_string(), |n| n.to_string_lossy().into_owned());

        Ok(Self::new(file_name, bytes))
    }
}

impl fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadFile")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .field("mime", &self.mime)
            .finish()
    }
}

/// Shape of an outgoing request body
///
/// The auth stage matches on this to decide where a legacy key can go: a raw
/// string cannot gain a field, so its key falls back to the URL.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    /// No body
    #[default]
    Empty,

    /// Literal string sent as-is, never JSON-quoted
    Raw(String),

    /// JSON object
    Structured(Map<String, Value>),

    /// `multipart/form-data` with every file under the `file[]` field
    Multipart(Vec<UploadFile>),
}

impl RequestBody {
    /// Build a body from any serializable value
    ///
    /// Objects become [`RequestBody::Structured`], strings [`RequestBody::Raw`]
    /// and `null` [`RequestBody::Empty`]. Anything else is rejected.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        match serde_json::to_value(value)? {
            Value::Null => Ok(Self::Empty),
            Value::String(text) => Ok(Self::Raw(text)),
            Value::Object(map) => Ok(Self::Structured(map)),
            other => Err(serde::ser::Error::custom(format!(
                "request body must be a JSON object or string, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Whether there is no body at all
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl From<Map<String, Value>> for RequestBody {
    fn from(map: Map<String, Value>) -> Self {
        Self::Structured(map)
    }
}

impl From<String> for RequestBody {
    fn from(text: String) -> Self {
        Self::Raw(text)
    }
}

impl From<&str> for RequestBody {
    fn from(text: &str) -> Self {
        Self::Raw(text.to_string())
    }
}

impl From<Vec<UploadFile>> for RequestBody {
    fn from(files: Vec<UploadFile>) -> Self {
        Self::Multipart(files)
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Per-call overrides layered over the configured defaults
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Extra headers; these replace configured defaults with the same name
    pub headers: BTreeMap<String, String>,

    /// Extra query parameters
    pub query: BTreeMap<String, String>,

    /// Per-request timeout overriding the client-wide one
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    /// Add or replace a header
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Add or replace a query parameter
    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    /// Override the client-wide timeout for this call
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Request-scoped description of a call, mutated by the auth stage before dispatch
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingRequest {
    /// HTTP verb
    pub method: HttpMethod,

    /// Path relative to the base URL, possibly already carrying a query string
    pub path: String,

    /// Query parameters encoded by the transport
    pub query: BTreeMap<String, String>,

    /// Per-request headers, layered over the configured defaults
    pub headers: BTreeMap<String, String>,

    /// Request body
    pub body: RequestBody,

    /// Timeout for this request only
    pub timeout: Option<Duration>,
}

impl OutgoingRequest {
    /// Request with no query, headers or body
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: BTreeMap::new(),
            headers: BTreeMap::new(),
            body: RequestBody::Empty,
            timeout: None,
        }
    }

    /// Replace the body
    #[must_use]
    pub fn with_body(mut self, body: impl Into<RequestBody>) -> Self {
        self.body = body.into();
        self
    }

    /// Add query parameters
    #[must_use]
    pub fn with_query(mut self, query: BTreeMap<String, String>) -> Self {
        self.query.extend(query);
        self
    }

    /// Add or replace a header
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Merge per-call overrides into this request
    #[must_use]
    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.headers.extend(options.headers);
        self.query.extend(options.query);
        if options.timeout.is_some() {
            self.timeout = options.timeout;
        }
        self
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// True for file uploads, detected either from the body or an explicit content type
    pub fn is_multipart(&self) -> bool {
        matches!(self.body, RequestBody::Multipart(_))
            || self
                .header("content-type")
                .is_some_and(|ct| ct.to_ascii_lowercase().starts_with("multipart/form-data"))
    }

    /// Append `name=value` to the path's query string
    pub fn append_url_param(&mut self, name: &str, value: &str) {
        let separator = if self.path.contains('?') { '&' } else { '?' };
        self.path = format!("{}{separator}{name}={value}", self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_append_url_param_without_query() {
        let mut request = OutgoingRequest::new(HttpMethod::Post, "/upload");
        request.append_url_param("apiKey", "k");
        assert_eq!(request.path, "/upload?apiKey=k");
    }

    #[test]
    fn test_append_url_param_with_existing_query() {
        let mut request = OutgoingRequest::new(HttpMethod::Post, "/upload?type=img");
        request.append_url_param("apiKey", "k");
        assert_eq!(request.path, "/upload?type=img&apiKey=k");
    }

    #[test]
    fn test_is_multipart_from_body() {
        let request = OutgoingRequest::new(HttpMethod::Post, "/upload")
            .with_body(vec![UploadFile::new("a.png", vec![1, 2, 3])]);
        assert!(request.is_multipart());
    }

    #[test]
    fn test_is_multipart_from_header() {
        let request = OutgoingRequest::new(HttpMethod::Post, "/upload")
            .with_header("content-type", "multipart/form-data; boundary=x");
        assert!(request.is_multipart());

        let plain = OutgoingRequest::new(HttpMethod::Post, "/x")
            .with_header("Content-Type", "application/json");
        assert!(!plain.is_multipart());
    }

    #[test]
    fn test_body_from_json_value() {
        assert_eq!(RequestBody::json(&json!(null)).unwrap(), RequestBody::Empty);
        assert_eq!(
            RequestBody::json(&json!("hello")).unwrap(),
            RequestBody::Raw("hello".to_string())
        );
        assert!(matches!(
            RequestBody::json(&json!({"a": 1})).unwrap(),
            RequestBody::Structured(map) if map["a"] == 1
        ));
        assert!(RequestBody::json(&json!([1, 2])).is_err());
        assert!(RequestBody::json(&json!(42)).is_err());
    }

    #[test]
    fn test_with_options_overrides_headers_and_timeout() {
        let request = OutgoingRequest::new(HttpMethod::Get, "/x")
            .with_header("Accept", "text/html")
            .with_options(
                RequestOptions::default()
                    .header("Accept", "application/json")
                    .query("page", "2")
                    .timeout(Duration::from_secs(5)),
            );

        assert_eq!(request.header("accept"), Some("application/json"));
        assert_eq!(request.query.get("page").map(String::as_str), Some("2"));
        assert_eq!(request.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_upload_file_debug_hides_bytes() {
        let file = UploadFile::new("a.txt", b"secret-bytes".to_vec());
        let rendered = format!("{file:?}");
        assert!(rendered.contains("a.txt"));
        assert!(rendered.contains("len: 12"));
    }

    #[tokio::test]
    async fn test_upload_file_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.txt");
        std::fs::write(&path, "hi").unwrap();

        let file = UploadFile::from_path(&path).await.unwrap();
        assert_eq!(file.file_name, "note.txt");
        assert_eq!(file.bytes, b"hi");
    }
}
