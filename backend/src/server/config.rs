//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use command_center::domain::FixtureStore;
use command_center::inbound::http::auth::SyncSecret;
use command_center::inbound::http::state::HttpStatePorts;
use mockable::Clock;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) store: Arc<FixtureStore>,
    pub(crate) ports: HttpStatePorts,
    pub(crate) tracked_team_id: u64,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) sync_secret: Option<SyncSecret>,
}

impl ServerConfig {
    /// Construct a server configuration around a seeded store and the upstream
    /// adapters. `tracked_team_id` selects the team reported by
    /// `GET /api/scores`.
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        store: Arc<FixtureStore>,
        ports: HttpStatePorts,
        tracked_team_id: u64,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            bind_addr,
            store,
            ports,
            tracked_team_id,
            clock,
            sync_secret: None,
        }
    }

    /// Enable `POST /api/sync` behind a bearer secret.
    #[must_use]
    pub fn with_sync_secret(mut self, secret: Option<SyncSecret>) -> Self {
        self.sync_secret = secret;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
