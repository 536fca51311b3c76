//! Common test utilities for integration tests
//!
//! Provides a client wired to a wiremock server with in-memory collaborators.

use std::sync::Arc;

use fishpi_client::domain::models::ClientEvent;
use fishpi_client::{ApiConfig, BroadcastNotifier, FishpiClient, MemoryCredentialStore};
use tokio::sync::broadcast;
use wiremock::MockServer;

/// A client plus handles on everything it was injected with
pub struct TestClient {
    pub client: FishpiClient,
    pub store: Arc<MemoryCredentialStore>,
    pub notifier: Arc<BroadcastNotifier>,
    pub events: broadcast::Receiver<ClientEvent>,
}

impl TestClient {
    /// Drain every event published so far
    pub fn drain_events(&mut self) -> Vec<ClientEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            events.push(event);
        }
        events
    }
}

/// Build a client pointed at `server`
pub fn client_for(server: &MockServer) -> TestClient {
    client_with_config(ApiConfig {
        base_url: server.uri(),
        timeout_secs: 5,
        ..ApiConfig::default()
    })
}

/// Build a client from an explicit config
pub fn client_with_config(config: ApiConfig) -> TestClient {
    let store = Arc::new(MemoryCredentialStore::new());
    let notifier = Arc::new(BroadcastNotifier::new());
    let events = notifier.subscribe();
    let client = FishpiClient::new(config, store.clone(), notifier.clone())
        .expect("client should build");

    TestClient {
        client,
        store,
        notifier,
        events,
    }
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
#[allow(dead_code)]
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
