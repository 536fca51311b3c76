//! Command-line interface for the FishPi client.

pub mod commands;
pub mod context;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::auth::LoginCommands;
pub use commands::request::{BodyArgs, GetArgs, PathArgs, PostTextArgs, UploadArgs};
pub use context::CliContext;

/// Top-level arguments of the `fishpi` binary
#[derive(Parser, Debug)]
#[command(name = "fishpi", version, about = "Authenticated client for the FishPi API")]
pub struct Cli {
    /// Config file (defaults to .fishpi/config.yaml merged with .fishpi/local.yaml)
    #[arg(long, short, global = true, env = "FISHPI_CONFIG")]
    pub config: Option<PathBuf>,

    /// Emit machine-readable JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Every `fishpi` command
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send a GET request
    Get(GetArgs),

    /// Send a POST request with a JSON body
    Post(BodyArgs),

    /// Send a POST request with a literal text/plain body
    PostText(PostTextArgs),

    /// Send a PUT request with a JSON body
    Put(BodyArgs),

    /// Send a DELETE request
    Delete(PathArgs),

    /// Upload files as multipart/form-data under `file[]`
    Upload(UploadArgs),

    /// Store credentials
    Login {
        #[command(subcommand)]
        command: LoginCommands,
    },

    /// Clear every stored credential
    Logout,

    /// Show which credential requests will carry
    Whoami,
}

/// Print an error in the requested format and exit with a failure status
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let payload = serde_json::json!({
            "success": false,
            "error": format!("{err:#}"),
        });
        eprintln!("{payload}");
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1)
}
