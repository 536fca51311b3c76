//! Argument parsing tests for the `fishpi` binary

use clap::Parser;
use fishpi_client::cli::{Cli, Commands, LoginCommands};

#[test]
fn test_get_with_query_params() {
    let cli = Cli::try_parse_from(["fishpi", "get", "/api/user", "-q", "page=2", "--query", "size=20"])
        .unwrap();

    match cli.command {
        Commands::Get(args) => {
            assert_eq!(args.path, "/api/user");
            assert_eq!(
                args.query,
                vec![
                    ("page".to_string(), "2".to_string()),
                    ("size".to_string(), "20".to_string()),
                ]
            );
        }
        other => panic!("expected get, got {other:?}"),
    }
}

#[test]
fn test_query_param_requires_equals() {
    assert!(Cli::try_parse_from(["fishpi", "get", "/api/user", "-q", "page"]).is_err());
    assert!(Cli::try_parse_from(["fishpi", "get", "/api/user", "-q", "=2"]).is_err());
}

#[test]
fn test_post_with_data_and_headers() {
    let cli = Cli::try_parse_from([
        "fishpi",
        "--json",
        "post",
        "/chat-room/send",
        "--data",
        r#"{"content":"hi"}"#,
        "-H",
        "X-Trace=abc",
    ])
    .unwrap();

    assert!(cli.json);
    match cli.command {
        Commands::Post(args) => {
            assert_eq!(args.path, "/chat-room/send");
            assert_eq!(args.data.as_deref(), Some(r#"{"content":"hi"}"#));
            assert_eq!(args.headers, vec![("X-Trace".to_string(), "abc".to_string())]);
        }
        other => panic!("expected post, got {other:?}"),
    }
}

#[test]
fn test_post_text_defaults_to_empty_body() {
    let cli = Cli::try_parse_from(["fishpi", "post-text", "/chat-room/send"]).unwrap();
    match cli.command {
        Commands::PostText(args) => assert_eq!(args.text, ""),
        other => panic!("expected post-text, got {other:?}"),
    }
}

#[test]
fn test_upload_requires_files() {
    assert!(Cli::try_parse_from(["fishpi", "upload", "/upload"]).is_err());

    let cli = Cli::try_parse_from(["fishpi", "upload", "/upload", "a.png", "b.txt"]).unwrap();
    match cli.command {
        Commands::Upload(args) => assert_eq!(args.files.len(), 2),
        other => panic!("expected upload, got {other:?}"),
    }
}

#[test]
fn test_login_subcommands() {
    let cli = Cli::try_parse_from(["fishpi", "login", "token", "X-Token", "secret"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Login {
            command: LoginCommands::Token { ref name, ref value }
        } if name == "X-Token" && value == "secret"
    ));

    let cli = Cli::try_parse_from(["fishpi", "login", "api-key", "k-1"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Login {
            command: LoginCommands::ApiKey { ref key }
        } if key == "k-1"
    ));
}

#[test]
fn test_global_config_flag_after_subcommand() {
    let cli = Cli::try_parse_from(["fishpi", "whoami", "--config", "custom.yaml"]).unwrap();
    assert_eq!(
        cli.config.as_deref(),
        Some(std::path::Path::new("custom.yaml"))
    );
    assert!(matches!(cli.command, Commands::Whoami));
}

#[test]
fn test_unknown_command_is_rejected() {
    assert!(Cli::try_parse_from(["fishpi", "patch", "/x"]).is_err());
}
