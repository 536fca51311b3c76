//! Shared setup for every CLI command.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::broadcast;
use tracing::debug;

use crate::cli::Cli;
use crate::domain::models::{ClientEvent, Config};
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::credentials::FileCredentialStore;
use crate::infrastructure::events::BroadcastNotifier;
use crate::infrastructure::http::FishpiClient;
use crate::infrastructure::logging::{LogConfig, LoggerImpl};

/// Everything a command needs: the client plus a subscription to its events
pub struct CliContext {
    /// Client wired to the file credential store
    pub client: FishpiClient,
    /// Loaded configuration
    pub config: Config,
    events: broadcast::Receiver<ClientEvent>,
    _logger: Option<LoggerImpl>,
}

impl CliContext {
    /// Load config, start logging and build the client
    pub fn build(cli: &Cli) -> Result<Self> {
        let config = match cli.config {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };

        // A subscriber may already be installed (e.g. in tests); keep going without one.
        let logger = LoggerImpl::init(&LogConfig::from(&config.logging)).ok();

        let store = Arc::new(FileCredentialStore::new(&config.credentials.path));
        debug!(path = %store.path().display(), "using credential store");
        let notifier = Arc::new(BroadcastNotifier::new());
        let events = notifier.subscribe();

        let client = FishpiClient::new(config.api.clone(), store, notifier)
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            config,
            events,
            _logger: logger,
        })
    }

    /// Report every event published since the last drain on stderr
    pub fn report_events(&mut self, json_mode: bool) {
        while let Ok(event) = self.events.try_recv() {
            if json_mode {
                if let Ok(line) = serde_json::to_string(&event) {
                    eprintln!("{line}");
                }
                continue;
            }
            match event {
                ClientEvent::LoginInvalid => {
                    eprintln!("Login is no longer valid; stored credentials were cleared. Run `fishpi login` again.");
                }
                ClientEvent::Error { message, code } => {
                    eprintln!("Server error ({code}): {message}");
                }
            }
        }
    }
}
