//! Output formatting utilities for the CLI.

use serde::Serialize;

/// Command result renderable as text or JSON
pub trait CommandOutput: Serialize {
    /// Plain text for terminals
    fn to_human(&self) -> String;
    /// Machine-readable form for `--json`
    fn to_json(&self) -> serde_json::Value;
}

/// Print `result` on stdout in the requested format
pub fn output<T: CommandOutput>(result: &T, json_mode: bool) {
    if json_mode {
        println!("{}", result.to_json());
    } else {
        println!("{}", result.to_human());
    }
}

/// Mask all but the first few characters of a secret.
pub fn redact(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if visible.chars().count() == secret.chars().count() {
        "[REDACTED]".to_string()
    } else {
        format!("{visible}...[REDACTED]")
    }
}
