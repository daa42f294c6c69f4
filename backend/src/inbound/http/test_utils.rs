//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::App;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::web;

use crate::domain::FixtureStore;
use crate::domain::ports::{
    MockScoreFeedSource, ScoreFeedSourceError, UnconfiguredIssueBoardSource,
    UnconfiguredPaymentsSource,
};
use crate::test_support::MutableClock;

use super::state::{HttpState, HttpStatePorts};

/// Team id of the tracked side in test scoreboards.
pub const TRACKED_TEAM_ID: u64 = 1_610_612_752;

/// Ports whose upstreams are all unavailable.
///
/// Issue board and payments report `not_configured`; the score feed fails
/// with a transport error.
pub fn offline_ports() -> HttpStatePorts {
    let mut scores = MockScoreFeedSource::new();
    scores
        .expect_fetch_scoreboard()
        .returning(|| Err(ScoreFeedSourceError::transport("feed offline")));
    scores.expect_fetch_standings().returning(|| Ok(Vec::new()));
    HttpStatePorts {
        issues: Arc::new(UnconfiguredIssueBoardSource),
        scores: Arc::new(scores),
        payments: Arc::new(UnconfiguredPaymentsSource),
    }
}

/// State over freshly seeded fixtures and a frozen clock.
pub fn seeded_state(ports: HttpStatePorts) -> (HttpState, Arc<FixtureStore>, Arc<MutableClock>) {
    let store = Arc::new(FixtureStore::seeded().expect("fixtures decode"));
    let clock = MutableClock::shared();
    let state = HttpState::new(Arc::clone(&store), ports, TRACKED_TEAM_ID, clock.clone());
    (state, store, clock)
}

/// Application exposing every API route over `state`.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(crate::Trace)
        .configure(super::configure_api)
}
