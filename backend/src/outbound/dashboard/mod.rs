//! Dashboard REST client adapter used by the poller.

mod http_client;

pub use http_client::DashboardHttpClient;
