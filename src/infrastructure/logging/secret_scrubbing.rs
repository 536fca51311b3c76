use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

// `apiKey=...` in a URL or query string
static QUERY_KEY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(api_?key=)[^&\s#]+").expect("valid regex"));

// `"apiKey": "..."` in a JSON body
static JSON_KEY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)("api_?key"\s*:\s*")[^"]*(")"#).expect("valid regex")
});

// `Bearer ...` authorization values
static BEARER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Bearer\s+[a-zA-Z0-9\-_.]+").expect("valid regex"));

/// Redacts credentials from text before it reaches a log line
#[derive(Debug, Clone, Copy, Default)]
pub struct SecretScrubber;

impl SecretScrubber {
    /// Create a scrubber
    pub const fn new() -> Self {
        Self
    }

    /// Scrub a message of legacy keys and bearer tokens
    pub fn scrub_message<'a>(&self, message: &'a str) -> Cow<'a, str> {
        let scrubbed = redact(Cow::Borrowed(message), &QUERY_KEY_PATTERN, "${1}[REDACTED]");
        let scrubbed = redact(scrubbed, &JSON_KEY_PATTERN, "${1}[REDACTED]${2}");
        redact(scrubbed, &BEARER_PATTERN, "Bearer [REDACTED]")
    }
}

fn redact<'a>(input: Cow<'a, str>, pattern: &Regex, replacement: &str) -> Cow<'a, str> {
    let replaced = match pattern.replace_all(&input, replacement) {
        Cow::Owned(s) => Some(s),
        Cow::Borrowed(_) => None,
    };
    replaced.map_or(input, Cow::Owned)
}
