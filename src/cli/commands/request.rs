//! Implementation of the request commands (`get`, `post`, `post-text`, `put`,
//! `delete`, `upload`).

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::cli::context::CliContext;
use crate::cli::output::{output, CommandOutput};
use crate::cli::Commands;
use crate::domain::models::{RequestBody, RequestOptions, UploadFile};

/// Arguments for commands taking only a path
#[derive(Args, Debug)]
pub struct PathArgs {
    /// Request path, relative to the configured base URL
    pub path: String,
}

/// Arguments for `fishpi get`
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Request path, relative to the configured base URL
    pub path: String,

    /// Query parameter as key=value (repeatable)
    #[arg(long = "query", short = 'q', value_parser = parse_key_val)]
    pub query: Vec<(String, String)>,
}

/// Arguments for `fishpi post` and `fishpi put`
#[derive(Args, Debug)]
pub struct BodyArgs {
    /// Request path, relative to the configured base URL
    pub path: String,

    /// JSON object or JSON string body (defaults to `{}`)
    #[arg(long, short)]
    pub data: Option<String>,

    /// Extra header as name=value (repeatable)
    #[arg(long = "header", short = 'H', value_parser = parse_key_val)]
    pub headers: Vec<(String, String)>,
}

/// Arguments for `fishpi post-text`
#[derive(Args, Debug)]
pub struct PostTextArgs {
    /// Request path, relative to the configured base URL
    pub path: String,

    /// Literal body, sent without any quoting
    #[arg(default_value = "")]
    pub text: String,
}

/// Arguments for `fishpi upload`
#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Request path, relative to the configured base URL
    pub path: String,

    /// Files to upload, in order
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

/// Response payload exactly as the server returned it
#[derive(Debug, Serialize)]
pub struct ResponseOutput {
    /// Parsed JSON, or the raw text when the body was not JSON
    pub response: Value,
}

impl CommandOutput for ResponseOutput {
    fn to_human(&self) -> String {
        match &self.response {
            Value::String(text) => text.clone(),
            other => serde_json::to_string_pretty(other).unwrap_or_default(),
        }
    }

    fn to_json(&self) -> Value {
        self.response.clone()
    }
}

/// Parse a `key=value` pair
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("invalid KEY=value: no `=` found in `{s}`"))
}

/// Parse `--data`, defaulting to an empty JSON object
pub fn parse_body(data: Option<&str>) -> Result<RequestBody> {
    match data {
        None => Ok(RequestBody::Structured(Map::new())),
        Some(raw) => {
            let value: Value = serde_json::from_str(raw).context("--data must be valid JSON")?;
            RequestBody::json(&value).context("--data must be a JSON object or string")
        }
    }
}

/// Run a request command and print its response
pub async fn execute(ctx: &CliContext, command: Commands, json_mode: bool) -> Result<()> {
    let client = &ctx.client;
    let response = match command {
        Commands::Get(args) => {
            let params: BTreeMap<String, String> = args.query.into_iter().collect();
            client.get(&args.path, params).await?
        }
        Commands::Post(args) => {
            let body = parse_body(args.data.as_deref())?;
            let options = args
                .headers
                .into_iter()
                .fold(RequestOptions::default(), |opts, (k, v)| opts.header(k, v));
            client.post(&args.path, body, options).await?
        }
        Commands::PostText(args) => client.post_text(&args.path, args.text).await?,
        Commands::Put(args) => {
            let body = parse_body(args.data.as_deref())?;
            client.put(&args.path, body).await?
        }
        Commands::Delete(args) => client.delete(&args.path).await?,
        Commands::Upload(args) => {
            let mut files = Vec::with_capacity(args.files.len());
            for path in &args.files {
                let file = UploadFile::from_path(path)
                    .await
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                files.push(file);
            }
            client.upload(&args.path, files).await?
        }
        other => anyhow::bail!("not a request command: {other:?}"),
    };

    output(&ResponseOutput { response }, json_mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_val() {
        assert_eq!(
            parse_key_val("page=2").unwrap(),
            ("page".to_string(), "2".to_string())
        );
        assert_eq!(
            parse_key_val("q=a=b").unwrap(),
            ("q".to_string(), "a=b".to_string())
        );
        assert!(parse_key_val("novalue").is_err());
        assert!(parse_key_val("=x").is_err());
    }

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body(None).unwrap(), RequestBody::Structured(Map::new()));
        assert_eq!(
            parse_body(Some(r#""hello""#)).unwrap(),
            RequestBody::Raw("hello".to_string())
        );
        assert!(matches!(
            parse_body(Some(r#"{"a": 1}"#)).unwrap(),
            RequestBody::Structured(map) if map.len() == 1
        ));
        assert!(parse_body(Some("[1]")).is_err());
        assert!(parse_body(Some("{oops")).is_err());
    }

    #[test]
    fn test_response_output_human() {
        let text = ResponseOutput {
            response: Value::String("pong".to_string()),
        };
        assert_eq!(text.to_human(), "pong");

        let json = ResponseOutput {
            response: serde_json::json!({"code": 0}),
        };
        assert!(json.to_human().contains("\"code\": 0"));
    }
}
