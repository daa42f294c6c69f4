//! Score feed outbound adapter.
//!
//! Thin HTTP implementation of the `ScoreFeedSource` port over the public
//! scoreboard and standings JSON documents.

mod dto;
mod http_source;

pub use http_source::{DEFAULT_SCOREBOARD_URL, DEFAULT_STANDINGS_URL, NbaHttpSource};
