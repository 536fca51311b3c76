//! Implementation of `fishpi login`, `fishpi logout` and `fishpi whoami`.

use anyhow::{Context, Result};
use clap::Subcommand;
use serde::Serialize;

use crate::cli::context::CliContext;
use crate::cli::output::{output, redact, CommandOutput};
use crate::domain::models::Credential;

/// Credential kinds accepted by `fishpi login`
#[derive(Subcommand, Debug)]
pub enum LoginCommands {
    /// Store a header token (takes precedence over an API key)
    Token {
        /// Header name the token is sent under
        name: String,
        /// Token value
        value: String,
    },

    /// Store a legacy API key
    ApiKey {
        /// API key value
        key: String,
    },
}

/// Result of a credential command
#[derive(Debug, Serialize)]
pub struct CredentialOutput {
    /// Whether the command succeeded
    pub success: bool,
    /// Human-readable summary
    pub message: String,
    /// "token", "legacy_key" or null
    pub credential: Option<String>,
}

impl CommandOutput for CredentialOutput {
    fn to_human(&self) -> String {
        self.message.clone()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Store a token or API key
pub fn login(ctx: &CliContext, command: LoginCommands, json_mode: bool) -> Result<()> {
    let message = match command {
        LoginCommands::Token { name, value } => {
            ctx.client
                .set_token(&name, &value)
                .context("Failed to store token")?;
            format!("Token stored for header {name}.")
        }
        LoginCommands::ApiKey { key } => {
            ctx.client
                .set_api_key(&key)
                .context("Failed to store API key")?;
            "API key stored.".to_string()
        }
    };

    let credential = ctx.client.credential().map(|c| c.kind().to_string());
    output(
        &CredentialOutput {
            success: true,
            message,
            credential,
        },
        json_mode,
    );
    Ok(())
}

/// Clear every stored credential
pub fn logout(ctx: &CliContext, json_mode: bool) -> Result<()> {
    ctx.client.clear_token().context("Failed to clear token")?;
    ctx.client
        .clear_api_key()
        .context("Failed to clear API key")?;

    output(
        &CredentialOutput {
            success: true,
            message: "Stored credentials cleared.".to_string(),
            credential: None,
        },
        json_mode,
    );
    Ok(())
}

/// Show the credential the next request will carry, redacted
pub fn whoami(ctx: &CliContext, json_mode: bool) -> Result<()> {
    let credential = ctx.client.credential();
    let message = match &credential {
        Some(Credential::Token { name, value }) => {
            format!("Token auth: {name}: {}", redact(value))
        }
        Some(Credential::LegacyKey(key)) => format!("API key auth: {}", redact(key)),
        None => format!(
            "No credentials stored in {}.",
            ctx.config.credentials.path
        ),
    };

    output(
        &CredentialOutput {
            success: credential.is_some(),
            message,
            credential: credential.map(|c| c.kind().to_string()),
        },
        json_mode,
    );
    Ok(())
}
