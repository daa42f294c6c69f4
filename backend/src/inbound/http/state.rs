//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain services and remain testable without network I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{IssueBoardSource, PaymentsSource, ScoreFeedSource};
use crate::domain::{
    DashboardService, FixtureStore, IssueBoardService, PaymentsService, ScoreFeedService,
};

use super::auth::SyncSecret;

/// Parameter object bundling the upstream feed adapters.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub issues: Arc<dyn IssueBoardSource>,
    pub scores: Arc<dyn ScoreFeedSource>,
    pub payments: Arc<dyn PaymentsSource>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub dashboard: DashboardService,
    pub issue_board: Arc<IssueBoardService>,
    pub scores: Arc<ScoreFeedService>,
    pub payments: Arc<PaymentsService>,
    pub sync_secret: Option<SyncSecret>,
}

impl HttpState {
    /// Wire the services around one store and one clock.
    ///
    /// `tracked_team_id` selects the team reported by the score feed. Bulk
    /// sync stays disabled until [`HttpState::with_sync_secret`] supplies a
    /// secret.
    pub fn new(
        store: Arc<FixtureStore>,
        ports: HttpStatePorts,
        tracked_team_id: u64,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let HttpStatePorts {
            issues,
            scores,
            payments,
        } = ports;
        Self {
            dashboard: DashboardService::new(store, Arc::clone(&clock)),
            issue_board: Arc::new(IssueBoardService::new(issues, Arc::clone(&clock))),
            scores: Arc::new(ScoreFeedService::new(
                scores,
                tracked_team_id,
                Arc::clone(&clock),
            )),
            payments: Arc::new(PaymentsService::new(payments, clock)),
            sync_secret: None,
        }
    }

    /// Enable bulk sync behind the given bearer secret.
    #[must_use]
    pub fn with_sync_secret(mut self, secret: Option<SyncSecret>) -> Self {
        self.sync_secret = secret;
        self
    }
}
