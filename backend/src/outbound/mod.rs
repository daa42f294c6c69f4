//! Outbound adapters implementing the domain's driven ports.
//!
//! Each submodule wraps one HTTP API with reqwest; `dashboard` is the client
//! the poller uses against this server. Adapters own transport details only:
//! requests, status mapping and JSON decoding.

pub mod dashboard;
pub(crate) mod http_failure;
pub mod linear;
pub mod nba;
pub mod stripe;
