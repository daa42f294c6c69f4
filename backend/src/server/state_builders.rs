//! Builders for the upstream adapters and the shared HTTP state.
//!
//! Issue tracker and payments adapters are only built when their credentials
//! are configured; otherwise the unconfigured sources answer every request
//! with a not-configured error. The score feed needs no credentials and is
//! always live.

use std::io;
use std::sync::Arc;

use actix_web::web;
use tracing::info;

use command_center::domain::ports::{
    IssueBoardSource, PaymentsSource, ScoreFeedSource, UnconfiguredIssueBoardSource,
    UnconfiguredPaymentsSource,
};
use command_center::inbound::http::state::{HttpState, HttpStatePorts};
use command_center::outbound::linear::LinearHttpSource;
use command_center::outbound::nba::NbaHttpSource;
use command_center::outbound::stripe::StripeHttpSource;
use command_center::settings::AppSettings;

use super::ServerConfig;

fn io_error(context: &str, err: impl std::fmt::Display) -> io::Error {
    io::Error::other(format!("{context}: {err}"))
}

fn build_issue_source(settings: &AppSettings) -> io::Result<Arc<dyn IssueBoardSource>> {
    let Some(api_key) = settings.linear_api_key() else {
        info!("issue tracker key not set; issue board disabled");
        return Ok(Arc::new(UnconfiguredIssueBoardSource));
    };
    let endpoint = settings
        .linear_endpoint()
        .map_err(|err| io_error("issue tracker endpoint", err))?;
    let source = LinearHttpSource::new(
        endpoint,
        api_key,
        settings.linear_team_key(),
        settings.upstream_timeout(),
    )
    .map_err(|err| io_error("issue tracker client", err))?;
    Ok(Arc::new(source))
}

fn build_score_source(settings: &AppSettings) -> io::Result<Arc<dyn ScoreFeedSource>> {
    let scoreboard = settings
        .scoreboard_url()
        .map_err(|err| io_error("scoreboard url", err))?;
    let standings = settings
        .standings_url()
        .map_err(|err| io_error("standings url", err))?;
    let source = NbaHttpSource::new(scoreboard, standings, settings.upstream_timeout())
        .map_err(|err| io_error("score feed client", err))?;
    Ok(Arc::new(source))
}

fn build_payments_source(settings: &AppSettings) -> io::Result<Arc<dyn PaymentsSource>> {
    let Some(secret_key) = settings.stripe_secret_key() else {
        info!("payments key not set; payments disabled");
        return Ok(Arc::new(UnconfiguredPaymentsSource));
    };
    let base_url = settings
        .stripe_base_url()
        .map_err(|err| io_error("payments base url", err))?;
    let source = StripeHttpSource::new(base_url, secret_key, settings.upstream_timeout())
        .map_err(|err| io_error("payments client", err))?;
    Ok(Arc::new(source))
}

/// Build the three upstream adapters from settings.
///
/// # Errors
/// Returns [`io::Error`] when a configured URL is malformed or a reqwest
/// client cannot be constructed.
pub fn build_ports(settings: &AppSettings) -> io::Result<HttpStatePorts> {
    Ok(HttpStatePorts {
        issues: build_issue_source(settings)?,
        scores: build_score_source(settings)?,
        payments: build_payments_source(settings)?,
    })
}

/// Wire the HTTP state shared by every worker.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = HttpState::new(
        Arc::clone(&config.store),
        config.ports.clone(),
        config.tracked_team_id,
        Arc::clone(&config.clock),
    )
    .with_sync_secret(config.sync_secret.clone());
    web::Data::new(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[actix_web::test]
    async fn missing_credentials_select_unconfigured_sources() {
        let settings = AppSettings::default();
        let ports = build_ports(&settings).expect("ports build");

        let issues = ports.issues.fetch_issues().await;
        let balance = ports.payments.fetch_available_balance().await;

        assert!(issues.is_err());
        assert!(balance.is_err());
    }

    #[rstest]
    fn malformed_scoreboard_url_is_reported() {
        let settings = AppSettings {
            scoreboard_url: Some("not a url".to_owned()),
            ..AppSettings::default()
        };
        let err = build_ports(&settings).err().expect("bad url rejected");
        assert!(err.to_string().contains("scoreboard url"));
    }
}
