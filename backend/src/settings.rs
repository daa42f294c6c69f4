//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `DASHBOARD_*` environment variables or a
//! configuration file. Only the bind address carries a loader default so an
//! empty environment still merges; accessors supply the remaining defaults.
//! Credentials stay out of `Debug` output; accessors hand out zeroising copies
//! and [`AppSettings::scrub`] wipes the originals once adapters are built.

use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use url::Url;
use serde::Deserialize;
use zeroize::{Zeroize, Zeroizing};

use crate::outbound::linear::DEFAULT_LINEAR_ENDPOINT;
use crate::outbound::nba::{DEFAULT_SCOREBOARD_URL, DEFAULT_STANDINGS_URL};
use crate::outbound::stripe::DEFAULT_STRIPE_BASE_URL;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_LINEAR_TEAM_KEY: &str = "WNU";
const DEFAULT_TRACKED_TEAM_ID: u64 = 1_610_612_752;

/// A setting that failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address {value:?}: {message}")]
    BindAddr { value: String, message: String },
    #[error("invalid URL for {setting} {value:?}: {message}")]
    Url {
        setting: &'static str,
        value: String,
        message: String,
    },
}

/// Runtime configuration for the dashboard server.
#[derive(Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DASHBOARD")]
pub struct AppSettings {
    /// Socket address to listen on.
    #[ortho_config(default = DEFAULT_BIND_ADDR.to_owned())]
    pub bind_addr: Option<String>,
    /// Bearer secret guarding `POST /api/sync`.
    pub sync_secret: Option<String>,
    /// Issue tracker API key.
    pub linear_api_key: Option<String>,
    /// Issue tracker team key.
    pub linear_team_key: Option<String>,
    /// Payments processor secret key.
    pub stripe_secret_key: Option<String>,
    /// League identifier of the tracked team.
    pub tracked_team_id: Option<u64>,
    /// Per-request timeout for upstream calls; unset keeps the client default.
    pub upstream_timeout_secs: Option<u64>,
    /// Issue tracker GraphQL endpoint override.
    pub linear_endpoint: Option<String>,
    /// Scoreboard feed override.
    pub scoreboard_url: Option<String>,
    /// Standings feed override.
    pub standings_url: Option<String>,
    /// Payments API base override.
    pub stripe_base_url: Option<String>,
}

fn secret(value: Option<&String>) -> Option<Zeroizing<String>> {
    value
        .filter(|value| !value.trim().is_empty())
        .map(|value| Zeroizing::new(value.clone()))
}

fn parse_url(
    setting: &'static str,
    value: Option<&str>,
    default: &str,
) -> Result<Url, SettingsError> {
    let raw = value.unwrap_or(default);
    Url::parse(raw).map_err(|err| SettingsError::Url {
        setting,
        value: raw.to_owned(),
        message: err.to_string(),
    })
}

impl AppSettings {
    /// Return the listen address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| SettingsError::BindAddr {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    pub fn sync_secret(&self) -> Option<Zeroizing<String>> {
        secret(self.sync_secret.as_ref())
    }

    pub fn linear_api_key(&self) -> Option<Zeroizing<String>> {
        secret(self.linear_api_key.as_ref())
    }

    pub fn stripe_secret_key(&self) -> Option<Zeroizing<String>> {
        secret(self.stripe_secret_key.as_ref())
    }

    pub fn linear_team_key(&self) -> &str {
        self.linear_team_key
            .as_deref()
            .unwrap_or(DEFAULT_LINEAR_TEAM_KEY)
    }

    pub fn tracked_team_id(&self) -> u64 {
        self.tracked_team_id.unwrap_or(DEFAULT_TRACKED_TEAM_ID)
    }

    /// Upstream timeout; `None` keeps reqwest's default.
    pub fn upstream_timeout(&self) -> Option<Duration> {
        self.upstream_timeout_secs.map(Duration::from_secs)
    }

    pub fn linear_endpoint(&self) -> Result<Url, SettingsError> {
        parse_url(
            "linear_endpoint",
            self.linear_endpoint.as_deref(),
            DEFAULT_LINEAR_ENDPOINT,
        )
    }

    pub fn scoreboard_url(&self) -> Result<Url, SettingsError> {
        parse_url(
            "scoreboard_url",
            self.scoreboard_url.as_deref(),
            DEFAULT_SCOREBOARD_URL,
        )
    }

    pub fn standings_url(&self) -> Result<Url, SettingsError> {
        parse_url(
            "standings_url",
            self.standings_url.as_deref(),
            DEFAULT_STANDINGS_URL,
        )
    }

    /// Wipe the credential fields in place.
    pub fn scrub(&mut self) {
        self.sync_secret.zeroize();
        self.linear_api_key.zeroize();
        self.stripe_secret_key.zeroize();
    }

    pub fn stripe_base_url(&self) -> Result<Url, SettingsError> {
        parse_url(
            "stripe_base_url",
            self.stripe_base_url.as_deref(),
            DEFAULT_STRIPE_BASE_URL,
        )
    }
}

fn redacted(value: Option<&String>) -> Option<&'static str> {
    value.map(|_| "<redacted>")
}

impl fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppSettings")
            .field("bind_addr", &self.bind_addr)
            .field("sync_secret", &redacted(self.sync_secret.as_ref()))
            .field("linear_api_key", &redacted(self.linear_api_key.as_ref()))
            .field("linear_team_key", &self.linear_team_key)
            .field(
                "stripe_secret_key",
                &redacted(self.stripe_secret_key.as_ref()),
            )
            .field("tracked_team_id", &self.tracked_team_id)
            .field("upstream_timeout_secs", &self.upstream_timeout_secs)
            .field("linear_endpoint", &self.linear_endpoint)
            .field("scoreboard_url", &self.scoreboard_url)
            .field("standings_url", &self.standings_url)
            .field("stripe_base_url", &self.stripe_base_url)
            .finish()
    }
}


#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 11] = [
        "DASHBOARD_BIND_ADDR",
        "DASHBOARD_SYNC_SECRET",
        "DASHBOARD_LINEAR_API_KEY",
        "DASHBOARD_LINEAR_TEAM_KEY",
        "DASHBOARD_STRIPE_SECRET_KEY",
        "DASHBOARD_TRACKED_TEAM_ID",
        "DASHBOARD_UPSTREAM_TIMEOUT_SECS",
        "DASHBOARD_LINEAR_ENDPOINT",
        "DASHBOARD_SCOREBOARD_URL",
        "DASHBOARD_STANDINGS_URL",
        "DASHBOARD_STRIPE_BASE_URL",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("command-center")])
            .expect("config should load")
    }

    fn cleared_env() -> Vec<(&'static str, Option<String>)> {
        VARS.iter().map(|name| (*name, None)).collect()
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(cleared_env());

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default parses"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("valid address")
        );
        assert!(settings.sync_secret().is_none());
        assert!(settings.linear_api_key().is_none());
        assert_eq!(settings.linear_team_key(), "WNU");
        assert_eq!(settings.tracked_team_id(), 1_610_612_752);
        assert!(settings.upstream_timeout().is_none());
        assert_eq!(
            settings.stripe_base_url().expect("default parses").as_str(),
            "https://api.stripe.com/"
        );
    }

    #[rstest]
    fn empty_environment_loads_unconfigured_settings() {
        let _guard = lock_env(cleared_env());

        let settings = AppSettings::load_from_iter([OsString::from("command-center")]);

        let settings = settings.expect("an empty environment must still load");
        assert!(settings.bind_addr().is_ok());
        assert!(settings.sync_secret().is_none());
        assert!(settings.stripe_secret_key().is_none());
        assert!(settings.linear_api_key().is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let mut vars = cleared_env();
        vars.extend([
            ("DASHBOARD_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            ("DASHBOARD_SYNC_SECRET", Some("s3cret".to_owned())),
            ("DASHBOARD_LINEAR_TEAM_KEY", Some("OPS".to_owned())),
            ("DASHBOARD_TRACKED_TEAM_ID", Some("1610612738".to_owned())),
            ("DASHBOARD_UPSTREAM_TIMEOUT_SECS", Some("4".to_owned())),
            (
                "DASHBOARD_STANDINGS_URL",
                Some("http://127.0.0.1:9999/standings.json".to_owned()),
            ),
        ]);
        let _guard = lock_env(vars);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("override parses").port(),
            9000
        );
        assert_eq!(
            settings.sync_secret().as_deref().map(String::as_str),
            Some("s3cret")
        );
        assert_eq!(settings.linear_team_key(), "OPS");
        assert_eq!(settings.tracked_team_id(), 1_610_612_738);
        assert_eq!(settings.upstream_timeout(), Some(Duration::from_secs(4)));
        assert_eq!(
            settings.standings_url().expect("override parses").port(),
            Some(9999)
        );
    }

    #[rstest]
    fn blank_secrets_count_as_unset() {
        let settings = AppSettings {
            stripe_secret_key: Some("   ".to_owned()),
            ..AppSettings::default()
        };
        assert!(settings.stripe_secret_key().is_none());
    }

    #[rstest]
    fn debug_output_redacts_credentials() {
        let settings = AppSettings {
            sync_secret: Some("s3cret".to_owned()),
            linear_api_key: Some("lin_api_key".to_owned()),
            stripe_secret_key: Some("sk_live_key".to_owned()),
            ..AppSettings::default()
        };
        let rendered = format!("{settings:?}");
        for secret in ["s3cret", "lin_api_key", "sk_live_key"] {
            assert!(!rendered.contains(secret), "{secret} leaked into Debug");
        }
    }

    #[rstest]
    fn scrub_clears_credentials() {
        let mut settings = AppSettings {
            sync_secret: Some("s3cret".to_owned()),
            linear_team_key: Some("OPS".to_owned()),
            ..AppSettings::default()
        };
        settings.scrub();
        assert!(settings.sync_secret().is_none());
        assert_eq!(settings.linear_team_key(), "OPS");
    }

    #[rstest]
    fn malformed_bind_address_is_reported() {
        let settings = AppSettings {
            bind_addr: Some("nowhere".to_owned()),
            ..AppSettings::default()
        };
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::BindAddr { .. })
        ));
    }

    #[rstest]
    fn malformed_url_names_the_setting() {
        let settings = AppSettings {
            scoreboard_url: Some("not a url".to_owned()),
            ..AppSettings::default()
        };
        match settings.scoreboard_url() {
            Err(SettingsError::Url { setting, .. }) => assert_eq!(setting, "scoreboard_url"),
            other => panic!("expected URL error, got {other:?}"),
        }
    }
}
