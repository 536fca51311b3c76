//! FishPi CLI entry point.

use clap::Parser;

use fishpi_client::cli::commands::{auth, request};
use fishpi_client::cli::{handle_error, CliContext, Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;

    let mut ctx = match CliContext::build(&cli) {
        Ok(ctx) => ctx,
        Err(err) => handle_error(err, json_mode),
    };

    let result = match cli.command {
        Commands::Login { command } => auth::login(&ctx, command, json_mode),
        Commands::Logout => auth::logout(&ctx, json_mode),
        Commands::Whoami => auth::whoami(&ctx, json_mode),
        command => request::execute(&ctx, command, json_mode).await,
    };

    ctx.report_events(json_mode);

    if let Err(err) = result {
        handle_error(err, json_mode);
    }
}
